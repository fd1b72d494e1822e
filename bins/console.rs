use clap::Parser;
use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn main() -> std::process::ExitCode {
    // .env first so RUST_LOG and the config overrides apply
    dotenv().ok();
    let cli = cli::Cli::parse();

    let config = configs::ConsoleConfig::load_and_validate();
    cli::init_logging(config.as_ref().map(|c| c.logging.format).unwrap_or_default());
    info!(service = "console", event = "logger_init", "tracing subscriber initialized");

    let run_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(service = "console", event = "panic", %run_id, pid, message = %info, "unhandled panic occurred");
    }));

    let config = match config {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "console", event = "config_invalid", error = %e, "failed to load configuration");
            eprintln!("configuration error: {e:#}");
            return std::process::ExitCode::FAILURE;
        }
    };

    let rt = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "console", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(service = "console", event = "start", %run_id, pid, version, "console starting");
    let code = rt.block_on(async move {
        tokio::select! {
            res = cli::run(cli, config) => match res {
                Ok(code) => code,
                Err(e) => {
                    error!(service = "console", event = "run_failed", error = %e, "console run returned error");
                    eprintln!("{e:#}");
                    1
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!(service = "console", event = "shutdown_signal", %run_id, pid, "received Ctrl+C, stopping");
                130
            }
        }
    });
    info!(service = "console", event = "stop", %run_id, pid, code, "console stopped");

    std::process::ExitCode::from(code)
}
