//! Trustgate CLI entry point.

use clap::Parser;

use trustgate::cli::{Cli, Commands};
use trustgate::infrastructure::config::ConfigLoader;

#[tokio::main]
async fn main() {
    // Config errors surface later with proper reporting; logging just
    // falls back to defaults here.
    let logging = ConfigLoader::load()
        .map(|config| config.logging)
        .unwrap_or_default();
    trustgate::infrastructure::logging::init(&logging);

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init(args) => trustgate::cli::commands::init::execute(args, cli.json).await,
        Commands::Agent(args) => trustgate::cli::commands::agent::execute(args, cli.json).await,
        Commands::Record(args) => trustgate::cli::commands::record::execute(args, cli.json).await,
        Commands::Trust(args) => trustgate::cli::commands::trust::execute(args, cli.json).await,
        Commands::Approval(args) => {
            trustgate::cli::commands::approval::execute(args, cli.json).await
        }
    };

    if let Err(err) = result {
        trustgate::cli::handle_error(err, cli.json);
    }
}
