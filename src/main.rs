use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod api;
mod cli;
mod command;
mod domain;
mod mcp;
mod session;
mod template;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // If --mcp flag is set, run as MCP server
    if cli.mcp {
        let service =
            command::try_build_service(cli.cache_dir.clone(), cli.max_key_attempts).map(Arc::new);
        return mcp::run_mcp_server(service, cli.cache_dir).await;
    }

    match cli.command {
        Some(Commands::Login {
            shop,
            token,
            api_version,
        }) => {
            command::run_login(cli.cache_dir, shop, token, api_version).await?;
        }
        Some(Commands::Logout) => {
            command::run_logout(cli.cache_dir).await?;
        }
        Some(Commands::Status) => {
            command::run_status(cli.cache_dir).await?;
        }
        Some(Commands::Themes { json }) => {
            let service = command::build_service(cli.cache_dir, cli.max_key_attempts)?;
            command::run_themes(&service, json).await?;
        }
        Some(Commands::List {
            theme_id,
            category,
            json,
        }) => {
            let service = command::build_service(cli.cache_dir, cli.max_key_attempts)?;
            command::run_list(&service, theme_id, category, json).await?;
        }
        Some(Commands::Duplicate {
            key,
            theme_id,
            json,
        }) => {
            let service = command::build_service(cli.cache_dir, cli.max_key_attempts)?;
            command::run_duplicate(&service, key, theme_id, json).await?;
        }
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            eprintln!("Use 'themedup login' to store credentials or 'themedup --mcp' to start the MCP server.");
        }
    }

    Ok(())
}
