use clap::Parser;
use diagonator_client::client::HttpTransport;
use diagonator_client::config::Config;
use diagonator_client::dispatch::{dispatch, Command};
use diagonator_client::init_tracing;
use tracing::info;

/// Send a single request to the diagonator service and print the response.
#[derive(Debug, Parser)]
struct Opts {
    /// Request to send.
    #[clap(value_enum)]
    cmd: Command,
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = Opts::parse();
    let config = Config::from_env();
    info!(?args, ?config, "Loaded args");

    let transport = HttpTransport::new(config.server_url)?;
    println!("{}", dispatch(&transport, args.cmd)?);
    Ok(())
}
