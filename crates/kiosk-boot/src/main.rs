//! Kiosk bootstrap daemon entry point.
//!
//! Loads the configuration, wires the OS adapters into the bootstrap use case,
//! and runs it once.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config()            -- TOML file or defaults
//!  └─ build adapters
//!       ├─ ZbarQrReader         (zbarcam)
//!       ├─ IpCommandProbe       (ip -o addr)
//!       ├─ NmcliWifiController  (nmcli)
//!       ├─ HttpReachabilityProbe (reqwest)
//!       └─ CommandLauncher      (browser)
//!  └─ BootstrapUseCase::run()  -- until launched, failed, or cancelled
//! ```
//!
//! # Exit status
//!
//! | Outcome                        | Exit code |
//! |--------------------------------|-----------|
//! | browser launched               | 0         |
//! | cancelled by Ctrl-C or SIGTERM | 0         |
//! | Wi-Fi association not verified | 2         |
//! | config or launch error         | 1         |
//!
//! A non-zero exit lets systemd (`Restart=on-failure`) start over from
//! scratch.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use kiosk_boot::application::bootstrap::{BootstrapOutcome, BootstrapUseCase, Collaborators};
use kiosk_boot::application::cancel::CancelToken;
use kiosk_boot::infrastructure::{
    launcher::CommandLauncher, network_status::IpCommandProbe, qr_reader::ZbarQrReader,
    reachability::HttpReachabilityProbe, storage::config, wifi::NmcliWifiController,
};

/// Exit code when the scanned Wi-Fi network could not be joined.
const EXIT_WIFI_NOT_CONNECTED: u8 = 2;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let loaded = config::load_config();

    // Initialise structured logging.  `RUST_LOG` overrides the config level.
    let fallback_level = match &loaded {
        Ok((cfg, _)) => cfg.bootstrap.log_level.clone(),
        Err(_) => "info".to_string(),
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback_level)),
        )
        .init();

    let (cfg, path) = loaded.context("failed to load configuration")?;
    info!(config = %path.display(), "kiosk-boot starting");

    let reachability = HttpReachabilityProbe::new(cfg.request_timeout())
        .context("failed to build HTTP client")?;

    let ports = Collaborators {
        qr_reader: Arc::new(ZbarQrReader::new(
            cfg.qr.scanner_command.clone(),
            cfg.qr.video_device.clone(),
        )),
        network_status: Arc::new(IpCommandProbe::new()),
        wifi: Arc::new(NmcliWifiController::new(cfg.network.wifi_interface.clone())),
        reachability: Arc::new(reachability),
        launcher: Arc::new(CommandLauncher::new(
            cfg.browser.command.clone(),
            cfg.browser.args.clone(),
        )),
    };

    // ── Ctrl-C / SIGTERM handler ──────────────────────────────────────────────
    let cancel = CancelToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        info!("shutdown signal received");
        signal_cancel.cancel();
    });

    let use_case = BootstrapUseCase::new(cfg.bootstrap_config(), ports, cancel);

    match use_case.run().await {
        Ok(BootstrapOutcome::LaunchedAt(address)) => {
            info!(%address, "kiosk-boot finished");
            Ok(ExitCode::SUCCESS)
        }
        Ok(BootstrapOutcome::Cancelled) => {
            info!("kiosk-boot stopped before launch");
            Ok(ExitCode::SUCCESS)
        }
        Ok(BootstrapOutcome::WifiNotConnected { ssid }) => {
            warn!(%ssid, "could not join Wi-Fi network; exiting for restart");
            Ok(ExitCode::from(EXIT_WIFI_NOT_CONNECTED))
        }
        Err(e) => {
            error!("{e}");
            Err(e.into())
        }
    }
}

/// Completes on Ctrl-C, or on SIGTERM where available.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = sigterm.recv() => {}
                }
            }
            Err(e) => {
                warn!("cannot listen for SIGTERM: {e}");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
