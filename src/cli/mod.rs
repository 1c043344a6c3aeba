// Command-line interface: serve the API or query a dataset directly

pub mod commands;

use crate::search::{LengthPreference, MatchMode};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cookmate")]
#[command(about = "CookMate - find recipes for the ingredients you have", long_about = None)]
pub struct Cli {
    /// Recipe dataset (CSV)
    #[arg(long, global = true, env = "RECIPES_CSV")]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long, env = "HOST")]
        host: Option<String>,
    },

    /// Search recipes by ingredients
    Search {
        /// Ingredients you have, separated by commas or spaces
        #[arg(default_value = "")]
        ingredients: String,

        /// Only recipes in this category
        #[arg(short, long, default_value = "All")]
        category: String,

        /// Only recipes in this subcategory
        #[arg(short, long, default_value = "All")]
        subcategory: String,

        /// Require all ingredients or any of them
        #[arg(short, long, value_enum, default_value_t = MatchMode::All)]
        mode: MatchMode,

        /// Recipe length preference
        #[arg(short, long, value_enum, default_value_t = LengthPreference::All)]
        length: LengthPreference,

        /// Maximum number of recipes to show
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// List categories, or the subcategories of one category
    Categories {
        /// Category whose subcategories to list
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show the most common ingredients in a selection
    Ingredients {
        #[arg(short, long, default_value = "All")]
        category: String,

        #[arg(short, long, default_value = "All")]
        subcategory: String,

        /// Number of top ingredient words to consider
        #[arg(short, long)]
        top: Option<usize>,
    },

    /// Show dataset statistics
    Stats,
}
