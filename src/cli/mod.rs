pub mod commands;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cukraren")]
#[command(about = "Manage the Cukráreň Janka website content", long_about = None)]
pub struct Cli {
    /// Configuration file (default: ~/.config/cukraren/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage products
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Manage news
    News {
        #[command(subcommand)]
        action: NewsAction,
    },
    /// Manage the gallery
    Gallery {
        #[command(subcommand)]
        action: GalleryAction,
    },
    /// Show or change shop settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// Inspect or clear the local cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
pub enum ProductAction {
    /// List products
    List,
    /// Add a product
    Add {
        #[arg(long)]
        name: String,
        /// Display price, e.g. "2,50 €"
        #[arg(long)]
        price: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        category: String,
        #[arg(long, default_value = "")]
        image: String,
    },
    /// Update fields of a product
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        image: Option<String>,
    },
    /// Delete a product
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum NewsAction {
    /// List news, newest first
    List,
    /// Add a news item
    Add {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        excerpt: String,
        #[arg(long, default_value = "")]
        content: String,
        #[arg(long, default_value = "")]
        image: String,
        /// Publication date (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Update fields of a news item
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        excerpt: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        image: Option<String>,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Delete a news item
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum GalleryAction {
    /// List gallery images
    List,
    /// Add a gallery image
    Add {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        image: String,
    },
    /// Delete a gallery image
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Print the shop settings
    Show,
    /// Change contact details or opening hours
    Set {
        #[arg(long)]
        shop_name: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        weekdays: Option<String>,
        #[arg(long)]
        saturday: Option<String>,
        #[arg(long)]
        sunday: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum CacheAction {
    /// List cached entries with age and size
    Status,
    /// Remove one entry (e.g. "produkty") or all entries
    Clear { key: Option<String> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_news_add_with_date() {
        let cli = Cli::try_parse_from([
            "cukraren", "news", "add", "--title", "Nová torta", "--date", "2024-03-01",
        ])
        .unwrap();

        match cli.command {
            Commands::News {
                action: NewsAction::Add { title, date, .. },
            } => {
                assert_eq!(title, "Nová torta");
                assert_eq!(date, Some("2024-03-01".parse().unwrap()));
            }
            _ => panic!("expected news add"),
        }
    }

    #[test]
    fn test_parse_cache_clear_all() {
        let cli = Cli::try_parse_from(["cukraren", "cache", "clear"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Cache {
                action: CacheAction::Clear { key: None }
            }
        ));
    }

    #[test]
    fn test_bad_date_rejected() {
        let result = Cli::try_parse_from(["cukraren", "news", "add", "--title", "x", "--date", "1.3.2024"]);
        assert!(result.is_err());
    }
}
