//! Subcommand dispatch and execution.
//!
//! The [`dispatch`] function routes the parsed CLI to the appropriate
//! subcommand handler: [`run`] or [`validate`].

pub mod run;
pub mod validate;

use crate::cli::{Cli, Commands};
use crate::error::EnvelopeError;

pub async fn dispatch(cli: Cli) -> Result<(), EnvelopeError> {
    match cli.command {
        Some(Commands::Run(args)) => run::execute(*args).await,
        Some(Commands::Validate(ref args)) => validate::execute(args),
        None => {
            print_welcome();
            Ok(())
        }
    }
}

fn print_welcome() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        "\n  envelope v{version} \u{2014} uniform response envelopes for HTTP services\n\n  \
         No command provided. To get started:\n\n    \
         envelope run                      Start the demo service on :3000\n    \
         envelope run -c envelope.yaml     Start with a config file\n    \
         envelope --help                   See all commands and options\n"
    );
}
