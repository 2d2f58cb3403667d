//! Integration tests for the kiosk-core payload parsers.
//!
//! These tests drive the public API with payloads shaped like the ones real
//! phones and label printers produce, exercising the parsers, the address
//! strategy, and the domain types together.

use kiosk_core::{
    parse_server_address, parse_wifi_credential, AddressStrategy, PayloadError, ScanAttempt,
    DEFAULT_ADDRESS_MARKER,
};

/// Every permutation of the three common Wi-Fi fields must parse to the same
/// credential.
#[test]
fn test_wifi_payload_field_order_does_not_matter() {
    let orders = [
        "WIFI:S:kiosk-net;T:WPA;P:s3cret;;",
        "WIFI:S:kiosk-net;P:s3cret;T:WPA;;",
        "T:WPA;WIFI:S:kiosk-net;P:s3cret;;",
        "T:WPA;P:s3cret;WIFI:S:kiosk-net;;",
        "P:s3cret;WIFI:S:kiosk-net;T:WPA;;",
        "P:s3cret;T:WPA;WIFI:S:kiosk-net;;",
    ];

    for text in orders {
        let cred = parse_wifi_credential(text).unwrap_or_else(|e| panic!("{text}: {e}"));
        assert_eq!(cred.ssid(), "kiosk-net", "{text}");
        assert_eq!(cred.password(), "s3cret", "{text}");
    }
}

#[test]
fn test_wifi_payload_from_scanner_output_line() {
    // zbarcam prints one decoded payload per line.
    let attempt = ScanAttempt::from_output("WIFI:S:kiosk-net;T:WPA;P:s3cret;H:false;;\n");
    let text = attempt.text().expect("decoded");

    let cred = parse_wifi_credential(text).expect("valid credential");

    assert_eq!(cred.ssid(), "kiosk-net");
    assert_eq!(cred.password(), "s3cret");
}

#[test]
fn test_server_code_is_not_a_wifi_code_and_vice_versa() {
    let server = "lava=10.0.0.5";
    let wifi = "WIFI:S:kiosk-net;P:s3cret;;";

    assert!(parse_wifi_credential(server).is_err());
    assert!(parse_server_address(wifi, DEFAULT_ADDRESS_MARKER).is_err());
}

#[test]
fn test_empty_server_address_has_one_defined_outcome() {
    assert_eq!(
        parse_server_address("lava=", DEFAULT_ADDRESS_MARKER),
        Err(PayloadError::EmptyAddress)
    );
    assert_eq!(
        AddressStrategy::default().extract("lava="),
        Err(PayloadError::EmptyAddress)
    );
}

#[test]
fn test_strategies_resolve_url_for_browser() {
    let prefixed = AddressStrategy::default()
        .extract("lava=10.0.0.5:3000")
        .expect("prefixed");
    let bare = AddressStrategy::BareIpv4
        .extract("Server: 10.0.0.5")
        .expect("bare");

    assert_eq!(prefixed.url(), "http://10.0.0.5:3000");
    assert_eq!(bare.url(), "http://10.0.0.5");
}
