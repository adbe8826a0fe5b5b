//! Defines the command-line interface structure using clap.

use crate::core::storage::Category;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "wavy-prompts", version, about = "Local gallery for AI image prompts")]
pub struct Cli {
    /// Directory holding the prompt collection (overrides config.toml)
    #[arg(long, global = true, env = "WAVY_PROMPTS_HOME")]
    pub home: Option<String>,

    /// Origin used when building share and view links
    #[arg(long, global = true, env = "WAVY_PROMPTS_ORIGIN")]
    pub origin: Option<String>,

    #[command(subcommand)]
    pub command: Cmd,
}

#[derive(Subcommand)]
pub enum Cmd {
    /// List stored prompts, newest first
    List {
        #[arg(long, help = "Only show one category (NanoBanana, Midjourney, Seedream)")]
        category: Option<Category>,
    },
    /// Search prompts by title or prompt text
    Search {
        query: String,
        #[arg(long, help = "Restrict to a category")]
        category: Option<Category>,
    },
    /// Create a new prompt; missing fields are asked for interactively
    New {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        prompt: Option<String>,
        #[arg(long = "image", help = "Image URL or data URI")]
        image_url: Option<String>,
        #[arg(long)]
        category: Option<Category>,
    },
    /// Show a prompt by ID
    Get { id: String },
    /// Edit a prompt; without flags an interactive menu opens
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        prompt: Option<String>,
        #[arg(long = "image")]
        image_url: Option<String>,
        #[arg(long)]
        category: Option<Category>,
    },
    /// Delete a prompt by ID
    Delete { id: String },
    /// Print a shareable link for a prompt
    Share {
        id: String,
        #[arg(long, help = "Also copy the link to the clipboard")]
        copy: bool,
    },
    /// Display the prompt carried by a share link or token
    Open {
        /// Full link, `#/share/<token>` fragment, or bare token
        link: String,
    },
    /// Copy a prompt's text to the clipboard
    Copy { id: String },
    /// Show collection statistics
    Stats,
}
