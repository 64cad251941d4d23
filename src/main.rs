//! dqsegdb-wui-session binary entry point.

use std::process::ExitCode;

use dqsegdb_wui_session::api::{self, AppState};
use dqsegdb_wui_session::cli;
use dqsegdb_wui_session::config::Config;
use dqsegdb_wui_session::logging;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("Try '--help' for more information.");
            return ExitCode::FAILURE;
        }
    };

    if args.help {
        cli::print_help();
        return ExitCode::SUCCESS;
    }

    if args.version {
        cli::print_version();
        return ExitCode::SUCCESS;
    }

    let config = match Config::load(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    logging::try_init_with_filter(config.log_filter()).ok();

    info!("dqsegdb-wui-session v{}", env!("CARGO_PKG_VERSION"));
    info!(
        default_host_id = config.hosts.default_host_id,
        hosts = config.hosts.hosts.len(),
        "host directory loaded"
    );

    let server_config = match config.to_server_config() {
        Ok(server_config) => server_config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = api::serve(server_config, AppState::from_config(&config)).await {
        error!("server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
