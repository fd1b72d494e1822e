use std::sync::Arc;

use configs::{ConsoleConfig, LogFormat};
use service::{observability, AdminClient, Session};
use tracing::{info, warn};

use crate::args::Cli;
use crate::commands;

/// Install the tracing subscriber selected by configuration.
pub fn init_logging(format: LogFormat) {
    match format {
        LogFormat::Compact => common::utils::logging::init_logging_default(),
        LogFormat::Json => common::utils::logging::init_logging_json(),
    }
}

/// Flags win over configured credentials; with neither, requests go out unauthenticated.
pub fn session_for(cli: &Cli, cfg: &ConsoleConfig) -> Session {
    let flags = cli.token.as_ref().zip(cli.identity.as_ref());
    let configured = cfg.session.token.as_ref().zip(cfg.session.identity.as_ref());
    match flags.or(configured) {
        Some((token, identity)) => Session::signed_in(token.as_str(), identity.as_str()),
        None => {
            warn!("no credentials configured; requests are sent unauthenticated");
            Session::new()
        }
    }
}

/// Run one console command and return the process exit code.
pub async fn run(cli: Cli, cfg: ConsoleConfig) -> anyhow::Result<u8> {
    let session = Arc::new(session_for(&cli, &cfg));
    let client = AdminClient::new(&cfg.backend, Arc::clone(&session))?;
    info!(base_url = %cfg.backend.base_url, timeout_ms = cfg.backend.timeout_ms, "console ready");

    let code = match commands::execute(&client, cli.command).await {
        Ok(out) => {
            print!("{out}");
            0
        }
        Err(e) => {
            eprintln!("{e}");
            if e.requires_reauthentication() {
                eprintln!("Sign in again and pass the new --token and --identity.");
            }
            commands::exit_code(&e)
        }
    };

    if cli.metrics {
        print!("{}", observability::encode_metrics()?);
    }
    Ok(code)
}
