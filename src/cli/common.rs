//! Shared pieces for CLI commands: the loaded context and output helpers.

use crate::api::{self, GraphQLMarketplace};
use crate::config::Config;
use crate::session::{FileSessionStore, SessionStore, StoredSession};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

/// Config and session store for a single CLI invocation
pub struct CliContext {
    pub config: Config,
    pub config_path: PathBuf,
    pub store: Arc<dyn SessionStore>,
}

impl CliContext {
    pub fn load() -> Result<Self> {
        let config_path = crate::utils::get_config_path();
        let config =
            Config::load_or_create(&config_path).context("Failed to load configuration")?;
        let store = FileSessionStore::open(&crate::utils::get_session_path())
            .context("Failed to open session store")?;

        Ok(Self {
            config,
            config_path,
            store: Arc::new(store),
        })
    }

    /// Endpoint after applying the flag and `GRAPHQL_URL`
    pub fn endpoint(&self, flag: Option<&str>) -> String {
        self.config.api_url_with_env(flag)
    }

    /// API client that authenticates with the stored session
    pub fn api(&self, flag: Option<&str>) -> GraphQLMarketplace {
        api::connect(
            &self.endpoint(flag),
            Arc::new(StoredSession::new(self.store.clone())),
        )
    }
}

/// Runtime for commands that talk to the API
pub fn runtime() -> Result<Runtime> {
    Runtime::new().context("Failed to create tokio runtime")
}

/// Print a success message with a checkmark prefix.
pub fn print_success(msg: &str) {
    println!("\u{2713} {}", msg);
}

/// Print an error message with an X prefix to stderr.
pub fn print_error(msg: &str) {
    eprintln!("\u{2717} {}", msg);
}

/// Print a warning message with a warning sign prefix.
pub fn print_warning(msg: &str) {
    println!("\u{26A0}\u{FE0F} {}", msg);
}

/// Print an info message with an info sign prefix.
pub fn print_info(msg: &str) {
    println!("\u{2139}\u{FE0F} {}", msg);
}
