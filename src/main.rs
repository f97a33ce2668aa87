use std::fs::File;
use std::io;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tenuki::core::agent::RandomAgent;
use tenuki::core::board::{MAX_SIZE, MIN_SIZE};
use tenuki::input::command_line::Cli;
use tenuki::input::connection::{GtpConnection, SessionConfig};
use tenuki::input::stdin::listen_to_stdin;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    if !(MIN_SIZE..=MAX_SIZE).contains(&cli.size) {
        anyhow::bail!(
            "unacceptable board size {} (expected {}..={})",
            cli.size,
            MIN_SIZE,
            MAX_SIZE
        );
    }

    let log = match &cli.log_file {
        Some(path) => Some(File::create(path)?),
        None => None,
    };

    let mut conn = GtpConnection::new(SessionConfig {
        out: io::stdout(),
        log,
        size: cli.size,
        komi: cli.komi,
        agent: Box::new(RandomAgent::new(cli.seed)),
    });

    tracing::debug!("start up successful");
    listen_to_stdin(&mut conn)
}

fn init_tracing(debug: bool) {
    // Diagnostics go to stderr; stdout belongs to the protocol.
    let default = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
