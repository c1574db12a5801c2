use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use jotted::config::{read_config, Config};
use jotted::logger::configure_logger;
use jotted::server::server_run;

#[derive(Parser)]
#[command(name = "jotted", about = "A markdown blog platform for posts, thoughts and talks")]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "jotted.toml")]
    config: PathBuf,
}

#[ntex::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config: Config = read_config(&args.config)
        .with_context(|| format!("Error loading configuration {}", args.config.display()))?;

    configure_logger(&config)?;

    server_run(config).await
}
