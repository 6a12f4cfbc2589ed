use std::sync::Arc;

use color_eyre::eyre::WrapErr;
use color_eyre::Result;

use social_client::adapters::FileSessionStore;
use social_client::cli::{help_lines, parse_args, version_line, Cli, CliCommand};
use social_client::config::AppConfig;
use social_client::logging::init_logging;
use social_client::queries::Queries;
use social_client::state::SessionContext;

fn main() -> Result<()> {
    color_eyre::install()?;

    let command = match parse_args(std::env::args()) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Run 'social-client help' for usage.");
            std::process::exit(2);
        }
    };

    init_logging();
    let config = AppConfig::from_env();

    // Version and help need neither the network nor the session file
    if matches!(command, CliCommand::Version | CliCommand::Help) {
        let lines = match command {
            CliCommand::Version => vec![version_line(&config.app_name)],
            _ => help_lines(&config.app_name),
        };
        for line in lines {
            println!("{}", line);
        }
        return Ok(());
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to start async runtime")?;

    runtime.block_on(run(command, config))
}

async fn run(command: CliCommand, config: AppConfig) -> Result<()> {
    let queries = Queries::from_config(&config).wrap_err("invalid configuration")?;
    tracing::debug!(base_url = %config.base_url, "API client ready");

    let store = FileSessionStore::new().wrap_err("session storage unavailable")?;
    let session = SessionContext::restore(Arc::new(store)).await;

    let mut cli = Cli::new(queries, session).with_app_name(config.app_name.clone());
    let result = cli.run(command).await;

    for line in cli.take_notifications() {
        eprintln!("{}", line);
    }

    match result {
        Ok(lines) => {
            for line in lines {
                println!("{}", line);
            }
            Ok(())
        }
        Err(e) => {
            tracing::debug!(error = %e, code = e.error_code(), "command failed");
            eprintln!("{}", e.recovery_hint());
            std::process::exit(1);
        }
    }
}
