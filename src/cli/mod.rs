//! Command-line surface for bidmart.
//!
//! With no subcommand the binary launches the terminal UI. The subcommands
//! cover session housekeeping and the catalogue operations no screen uses.

mod common;
mod completions;
mod products;
mod session;

pub use common::*;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use tracing::info;

#[derive(Parser)]
#[command(name = "bidmart")]
#[command(about = "Terminal client for the bidmart marketplace")]
#[command(version)]
pub struct Cli {
    /// GraphQL endpoint (overrides GRAPHQL_URL and the config file)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Color theme for the UI (dark, light, nocolor)
    #[arg(long, global = true, value_name = "THEME")]
    pub theme: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show whether a session is stored
    Session,
    /// Remove the stored session
    Logout,
    /// List products, or show one product
    Products {
        /// Only show the product with this id
        #[arg(long)]
        id: Option<String>,
    },
    /// Update fields of a product
    UpdateProduct {
        /// Product id
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Delete a product
    DeleteProduct {
        /// Product id
        id: String,
    },
    /// Print the log file path
    Logs,
    /// Print the config file path
    Config,
    /// Generate shell completions
    Completions {
        /// Shell to generate for (detected from $SHELL when omitted)
        shell: Option<Shell>,
    },
}

impl Cli {
    /// Run the selected subcommand. Does nothing when none was given.
    pub fn execute(self) -> Result<()> {
        let api_url = self.api_url;
        match self.command {
            Some(Commands::Session) => session::cmd_session(),
            Some(Commands::Logout) => session::cmd_logout(),
            Some(Commands::Products { id }) => products::cmd_products(api_url.as_deref(), id),
            Some(Commands::UpdateProduct {
                id,
                name,
                price,
                description,
                category,
            }) => products::cmd_update_product(
                api_url.as_deref(),
                &id,
                crate::api::ProductInput {
                    name,
                    price,
                    description,
                    category,
                },
            ),
            Some(Commands::DeleteProduct { id }) => {
                products::cmd_delete_product(api_url.as_deref(), &id)
            }
            Some(Commands::Logs) => Self::cmd_logs(),
            Some(Commands::Config) => Self::cmd_config(),
            Some(Commands::Completions { shell }) => completions::generate(shell),
            None => Ok(()),
        }
    }

    fn cmd_logs() -> Result<()> {
        let log_file = crate::utils::path::get_log_dir().join("bidmart.log");
        info!("CLI: logs command executed");
        println!("{}", log_file.display());
        Ok(())
    }

    fn cmd_config() -> Result<()> {
        println!("{}", crate::utils::get_config_path().display());
        Ok(())
    }
}
