//! GreenOrbit CLI - environmental impact simulation and dashboard data.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "greenorbit",
    version,
    about = "GreenOrbit smart-city environmental toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: greenorbit_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("greenorbit {}", env!("CARGO_PKG_VERSION"));
    greenorbit_cmd::run(cli.command)
}
