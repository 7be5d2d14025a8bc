use clap::{Parser, Subcommand};

use crate::api::DEFAULT_API_VERSION;
use crate::template::Selector;

/// Themedup - browse and duplicate storefront theme templates
#[derive(Parser)]
#[command(name = "themedup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as MCP server over stdio
    #[arg(long)]
    pub mcp: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory to store the session file. Defaults to ~/.themedup
    #[arg(long, global = true, env = "THEMEDUP_CACHE_DIR")]
    pub cache_dir: Option<String>,

    /// Give up after this many colliding key candidates (default: keep drawing)
    #[arg(
        long,
        global = true,
        env = "THEMEDUP_MAX_KEY_ATTEMPTS",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub max_key_attempts: Option<u32>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Store the shop domain and Admin API access token
    Login {
        /// Shop domain, e.g. my-store.myshopify.com
        #[arg(long)]
        shop: String,

        /// Admin API access token (prompted for when omitted)
        #[arg(long)]
        token: Option<String>,

        /// Admin API version
        #[arg(long, default_value = DEFAULT_API_VERSION)]
        api_version: String,
    },
    /// Remove the stored session
    Logout,
    /// Show current session status
    Status,
    /// List the shop's themes
    Themes {
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List template assets of one category (home, collection, product or all)
    List {
        /// Theme to list (defaults to the main theme)
        #[arg(short = 't', long)]
        theme_id: Option<String>,

        /// Category to show
        #[arg(short, long, default_value = "all")]
        category: Selector,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Duplicate a template under a freshly generated key
    Duplicate {
        /// Key of the template to duplicate, e.g. templates/product.liquid
        #[arg(short, long)]
        key: String,

        /// Theme containing the template (defaults to the main theme)
        #[arg(short = 't', long)]
        theme_id: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}
