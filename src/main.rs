//! Task Calendar MCP Server - Main Entry Point
//!
//! This is the main entry point for the task calendar MCP server.
//! The actual implementation is in the `task_calendar_mcp` library.

use anyhow::{Result, bail};
use clap::Parser;
use mcp_attr::server::serve_stdio;
use std::path::PathBuf;
use task_calendar_mcp::config::{self, AppConfig};
use task_calendar_mcp::weather::TemperatureUnit;
use task_calendar_mcp::TaskServerHandler;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Task Calendar MCP Server - dated, prioritized tasks with calendar, timeline and weather tips
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML configuration file (defaults to the user config directory)
    config: Option<PathBuf>,

    /// Fixed device latitude, overrides the config file
    #[arg(long, allow_negative_numbers = true, requires = "longitude")]
    latitude: Option<f64>,

    /// Fixed device longitude, overrides the config file
    #[arg(long, allow_negative_numbers = true, requires = "latitude")]
    longitude: Option<f64>,

    /// Report temperatures in Fahrenheit
    #[arg(long)]
    fahrenheit: bool,

    /// Skip the user config file and start from built-in defaults
    #[arg(long, conflicts_with = "config")]
    defaults: bool,
}

fn load_config(args: &Args) -> Result<AppConfig> {
    let path = if args.defaults {
        None
    } else {
        args.config.clone().or_else(config::default_config_path)
    };
    let mut config = match path {
        Some(path) => {
            info!("loading config from {}", path.display());
            AppConfig::load(&path)?
        }
        None => AppConfig::default(),
    };

    if let (Some(latitude), Some(longitude)) = (args.latitude, args.longitude) {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            bail!("Coordinates out of range: {}, {}", latitude, longitude);
        }
        config.location.latitude = Some(latitude);
        config.location.longitude = Some(longitude);
    }
    if args.fahrenheit {
        config.weather.temperature_unit = TemperatureUnit::Fahrenheit;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the MCP protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let handler = TaskServerHandler::new(config);
    info!("serving MCP over stdio");
    let served = serve_stdio(handler).await;
    info!("MCP session ended");
    served?;
    Ok(())
}
