//! Toolshelf - a catalog generator for standalone html tools.

mod build;
mod catalog;
mod cli;
mod config;
mod init;
mod logger;
mod render;
mod serve;
mod utils;

use anyhow::{Result, bail};
use build::{build_site, list_catalog};
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;
use init::new_project;
use std::net::SocketAddr;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = load_config(&cli)?;

    match &cli.command {
        Commands::Init { .. } => new_project(&config),
        Commands::Build { .. } => build_site(&config).map(|_| ()),
        Commands::List { json, .. } => list_catalog(&config, *json),
        Commands::Serve { .. } => {
            let (server, addr) = serve::bind(&config)?;
            config.base.url = Some(local_url(addr));
            build_site(&config)?;
            serve::serve_site(server, addr, &config)
        }
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let root = cli.root.as_deref().unwrap_or(std::path::Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() && !cli.is_init() {
        SiteConfig::from_path(&config_path)?
    } else {
        SiteConfig::default()
    };
    config.update_with_cli(cli);

    let config_exists = config.config_path.exists();
    match (cli.is_init(), config_exists) {
        (true, true) => {
            bail!("Config file already exists. Remove it manually or init in a different path.")
        }
        (false, false) => bail!("Config file not found. Run `toolshelf init` first."),
        _ => {}
    }

    if !cli.is_init() {
        config.validate()?;
    }

    Ok(config)
}

/// Base URL of the preview server, as a browser would reach it.
fn local_url(addr: SocketAddr) -> String {
    if addr.ip().is_unspecified() {
        format!("http://localhost:{}", addr.port())
    } else {
        format!("http://{addr}")
    }
}
