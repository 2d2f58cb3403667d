//! Result of a single QR reader invocation.

/// What one call to the QR reader produced.
///
/// The reader never retries on its own; the orchestrator asks again when it
/// needs another attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanAttempt {
    /// A QR code was decoded.  The text is never empty.
    Decoded(String),
    /// The reader stopped without decoding anything.
    NothingDecoded,
    /// The operator closed the preview ("quit").  Nothing was acquired; the
    /// orchestrator asks again.
    Quit,
}

impl ScanAttempt {
    /// Builds an attempt from raw reader output, mapping blank text to
    /// [`ScanAttempt::NothingDecoded`].
    pub fn from_output(text: &str) -> Self {
        let text = text.trim_end_matches(['\r', '\n']);
        if text.is_empty() {
            ScanAttempt::NothingDecoded
        } else {
            ScanAttempt::Decoded(text.to_string())
        }
    }

    /// The decoded text, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            ScanAttempt::Decoded(text) => Some(text),
            ScanAttempt::NothingDecoded | ScanAttempt::Quit => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_output_strips_trailing_newline() {
        assert_eq!(
            ScanAttempt::from_output("lava=10.0.0.5\n"),
            ScanAttempt::Decoded("lava=10.0.0.5".to_string())
        );
    }

    #[test]
    fn test_from_output_keeps_inner_whitespace() {
        assert_eq!(
            ScanAttempt::from_output("WIFI:S:my net;P:a b;;\r\n").text(),
            Some("WIFI:S:my net;P:a b;;")
        );
    }

    #[test]
    fn test_from_output_blank_is_nothing_decoded() {
        assert_eq!(ScanAttempt::from_output("\n"), ScanAttempt::NothingDecoded);
        assert_eq!(ScanAttempt::from_output(""), ScanAttempt::NothingDecoded);
    }

    #[test]
    fn test_quit_has_no_text() {
        assert_eq!(ScanAttempt::Quit.text(), None);
    }
}
