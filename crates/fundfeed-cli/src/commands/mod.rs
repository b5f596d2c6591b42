mod fetch;
mod normalize;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<(), CliError> {
    let as_of = cli.processing_date();

    match &cli.command {
        Command::Fetch(args) => fetch::run(args, &cli.output_dir, as_of).await,
        Command::Normalize(args) => normalize::run(args, &cli.output_dir, as_of),
    }
}
