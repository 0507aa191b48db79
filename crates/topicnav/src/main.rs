//! topicnav CLI - documentation shells driven by a topic tree.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "topicnav")]
#[command(about = "Build and serve documentation shells driven by a topic tree")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to site.toml config file
    #[arg(short, long, default_value = "site.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold a site in the current directory
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// Start development server with live reload
    Dev {
        /// Port to listen on (defaults to config or 7777)
        #[arg(short, long)]
        port: Option<u16>,

        /// Do not open browser
        #[arg(long)]
        no_open: bool,
    },

    /// Build the static site
    Build {
        /// Output directory (defaults to config or "dist")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip minification
        #[arg(long)]
        no_minify: bool,
    },

    /// Preview a built site
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// Directory to serve
        #[arg(short, long, default_value = "dist")]
        dir: PathBuf,
    },

    /// Click every page in the topic tree and report the ones that fail to load
    Check {
        /// Check a running site at this URL instead of the site directory
        #[arg(long)]
        base_url: Option<String>,

        /// Open external targets in the default browser
        #[arg(long)]
        open_external: bool,
    },

    /// Print the topic outline
    Tree,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes).await?;
        }
        Commands::Dev { port, no_open } => {
            commands::dev::run(&cli.config, port, !no_open).await?;
        }
        Commands::Build { output, no_minify } => {
            let minify = if no_minify { Some(false) } else { None };
            commands::build::run(&cli.config, output, minify).await?;
        }
        Commands::Serve { port, dir } => {
            commands::serve::run(port, dir).await?;
        }
        Commands::Check {
            base_url,
            open_external,
        } => {
            commands::check::run(&cli.config, base_url, open_external).await?;
        }
        Commands::Tree => {
            commands::tree::run(&cli.config)?;
        }
    }

    Ok(())
}
