use clap::Parser;
use tracing::{debug, error, trace};
use tracing_subscriber::EnvFilter;

use ticketdesk::cli::{apply_overrides, execute_command, get_log_level, load_options, Cli};
use ticketdesk::config::load_config;
use ticketdesk::error::DeskError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config = match load_config(&load_options(&cli)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e.user_message());
            std::process::exit(e.exit_code());
        }
    };
    apply_overrides(&cli, &mut config);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(get_log_level(cli.verbose, &config.log_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(cli.verbose >= 2) // Show target module for -vv and above
        .with_thread_ids(cli.verbose >= 3) // Show thread IDs for -vvv
        .with_line_number(cli.verbose >= 3) // Show line numbers for -vvv
        .init();

    debug!("ticketdesk started with verbosity level: {}", cli.verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());

    if let Err(e) = execute_command(cli.command, config).await {
        error!("Fatal error: {:#}", e);
        match e.downcast_ref::<DeskError>() {
            Some(desk_error) => {
                eprintln!("Error: {}", desk_error.user_message());
                std::process::exit(desk_error.exit_code());
            }
            None => {
                eprintln!("Error: {e:#}");
                std::process::exit(1);
            }
        }
    }
}
