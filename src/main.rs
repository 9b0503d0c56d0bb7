//! Command-line entry point: `filehttp [CONFIG_FILE]`.

use std::process::ExitCode;

use env_logger::Env;
use log::{error, info};

use filehttp_rs::{HttpServer, ServerConfig};

const DEFAULT_CONFIG_PATH: &str = "httpd.conf";

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let config = match ServerConfig::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    // One runtime thread per pool worker; the accept loop runs on this thread.
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.worker_count())
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to start runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(HttpServer::new(config).start()) {
        // The server only returns cleanly after an interrupt.
        Ok(()) => {
            info!("Exiting after interrupt");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("Server error: {e}");
            ExitCode::FAILURE
        }
    }
}
