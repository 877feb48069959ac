use netlens_cli::commands::{CommandLine, Commands, diagnose, serve};
use netlens_cli::terminal::{logging, print};
use netlens_common::network::target::ProbeMode;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init(commands.verbose);
    let cfg = commands.config();

    match commands.command {
        Commands::Serve { addr } => serve::serve(addr, cfg).await,
        Commands::Ping { target } => {
            print::banner();
            print::header("reachability probe");
            diagnose::run(&target, ProbeMode::Reachability, cfg).await
        }
        Commands::Trace { target } => {
            print::banner();
            print::header("path trace");
            diagnose::run(&target, ProbeMode::PathTrace, cfg).await
        }
    }
}
