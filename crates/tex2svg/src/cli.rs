//! CLI command structure using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tex2svg")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (default: ./tex2svg.toml if present)
    #[arg(short, long, global = true, env = "TEX2SVG_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the web converter until Ctrl-C
    Serve {
        /// Address to bind (overrides server.bind)
        #[arg(long, env = "TEX2SVG_BIND")]
        bind: Option<String>,

        /// Port to listen on (overrides server.port)
        #[arg(short, long, env = "TEX2SVG_PORT")]
        port: Option<u16>,

        /// Template shown in the form (overrides paths.template)
        #[arg(long, env = "TEX2SVG_TEMPLATE")]
        template: Option<PathBuf>,
    },

    /// Convert a LaTeX snippet to SVG once
    Convert {
        /// File containing the snippet, or `-` for stdin
        snippet: PathBuf,

        /// Document template containing %%content%%
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Where to write the SVG
        #[arg(short, long, default_value = "output.svg")]
        output: PathBuf,
    },

    /// Check configuration and external tools
    Doctor {
        #[arg(long)]
        json: bool,
    },
}
