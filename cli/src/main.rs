mod commands;
mod terminal;

use commands::{CommandLine, resolve};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init(commands.verbose, commands.quiet);

    if !commands.json {
        print::header("resolving inventory", commands.quiet);
    }
    resolve::resolve(&commands).await
}
