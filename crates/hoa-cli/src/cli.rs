//! Command-line argument definitions.

use clap::{Parser, Subcommand};

/// Hydro Oasis calculator helpers
#[derive(Parser, Debug)]
#[command(name = "hoa", author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch a data resource with mirror fallback
    Fetch {
        /// Resource path, relative to the page or absolute
        path: String,
        /// URL of the page the request is made from
        #[arg(long)]
        page_url: Option<String>,
        /// Print the body as text instead of JSON
        #[arg(long)]
        text: bool,
    },
    /// List the URLs a fetch would try, in order
    Candidates {
        /// Resource path
        path: String,
        /// URL of the page the request is made from
        #[arg(long)]
        page_url: String,
    },
    /// Classify a page URL as canonical or preview
    Preview {
        /// Page URL
        url: String,
    },
    /// Render a recommendation markdown file to HTML
    Render {
        /// Markdown file, or `-` for stdin
        file: String,
    },
    /// Harvest handoff list operations
    Harvest {
        #[command(subcommand)]
        action: HarvestAction,
    },
    /// Print the drawing plan for a branded report
    BrandPlan {
        /// Number of pages in the report
        #[arg(long, default_value_t = 1)]
        pages: usize,
        /// Skip fetching brand assets
        #[arg(long)]
        offline: bool,
    },
    /// Configuration file operations
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum HarvestAction {
    /// Push a JSON payload
    Push {
        /// Payload as JSON; anything else is stored as a string
        payload: String,
    },
    /// List stored payloads, newest first
    List,
    /// Remove every stored payload
    Clear,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path
    Path,
    /// Print the effective configuration as TOML
    Show,
    /// Write a default config file
    Init {
        /// Target file instead of the default location
        #[arg(long)]
        file: Option<String>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
