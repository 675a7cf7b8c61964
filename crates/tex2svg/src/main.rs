mod cli;
mod commands;
mod context;
mod output;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = cli.config.as_deref();
    let result = match cli.command {
        Commands::Serve {
            bind,
            port,
            template,
        } => commands::serve::run(
            config_path,
            commands::serve::Overrides {
                bind,
                port,
                template,
            },
            cli.verbose,
        ),
        Commands::Convert {
            snippet,
            template,
            output,
        } => commands::convert::run(
            config_path,
            &snippet,
            template.as_deref(),
            &output,
            cli.verbose,
        ),
        Commands::Doctor { json } => commands::doctor::run(config_path, json, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` wins over `--verbose`
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},hyper=warn", default_level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
