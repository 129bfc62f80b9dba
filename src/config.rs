use crate::keymap::Keymap;
use crate::location::LocationConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Environment variable naming the GraphQL endpoint
pub const GRAPHQL_URL_ENV: &str = "GRAPHQL_URL";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// GraphQL endpoint
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Prefix added to phone numbers typed without one
    #[serde(default = "default_country_code")]
    pub country_code: String,
    /// UI theme: "dark", "light" or "nocolor"
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default)]
    pub keymap: Keymap,
    #[serde(default)]
    pub media: MediaConfig,
    /// Coordinates attached to listings; remove the table to disable posting
    #[serde(default)]
    pub location: Option<LocationConfig>,
}

/// `[media]` table: where photos come from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Directory that relative photo paths are resolved against
    #[serde(default = "default_library_dir")]
    pub library_dir: String,
    /// Program and arguments that capture a photo and print its path
    #[serde(default)]
    pub camera_command: Vec<String>,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            library_dir: default_library_dir(),
            camera_command: Vec::new(),
        }
    }
}

fn default_api_url() -> String {
    "http://localhost:4000/graphql".to_string()
}

fn default_country_code() -> String {
    "+91".to_string()
}

fn default_theme() -> String {
    "dark".to_string()
}

fn default_library_dir() -> String {
    "~/Pictures".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            country_code: default_country_code(),
            theme: default_theme(),
            keymap: Keymap::default(),
            media: MediaConfig::default(),
            location: Some(LocationConfig::default()),
        }
    }
}

impl Config {
    /// Load configuration from file or create the default one
    pub fn load_or_create(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config file: {config_path:?}"))?;
            let mut config: Config =
                toml::from_str(&content).with_context(|| "Failed to parse config file")?;

            // Blank values fall back to defaults
            if config.api_url.trim().is_empty() {
                config.api_url = default_api_url();
            }
            if config.country_code.trim().is_empty() {
                config.country_code = default_country_code();
            }

            debug!("Loaded config from {:?}", config_path);
            Ok(config)
        } else {
            let config = Self::default();
            config.save(config_path)?;
            info!("Created default config at {:?}", config_path);
            Ok(config)
        }
    }

    /// Save configuration to file with secure permissions
    pub fn save(&self, config_path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {parent:?}"))?;
        }

        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {config_path:?}"))?;

        // Set secure permissions (600: owner read/write only)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(config_path)
                .with_context(|| format!("Failed to get file metadata: {config_path:?}"))?
                .permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(config_path, perms)
                .with_context(|| format!("Failed to set file permissions: {config_path:?}"))?;
        }

        Ok(())
    }

    /// The endpoint to use: `flag`, then `env_url`, then the config file
    pub fn resolve_api_url(&self, flag: Option<&str>, env_url: Option<&str>) -> String {
        [flag, env_url]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|url| !url.is_empty())
            .unwrap_or(&self.api_url)
            .to_string()
    }

    /// [`Config::resolve_api_url`] reading `GRAPHQL_URL` from the environment
    pub fn api_url_with_env(&self, flag: Option<&str>) -> String {
        let env_url = std::env::var(GRAPHQL_URL_ENV).ok();
        self.resolve_api_url(flag, env_url.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.country_code, "+91");
        assert_eq!(config.theme, "dark");
        assert_eq!(config.location, Some(LocationConfig::default()));
        assert!(config.media.camera_command.is_empty());
    }

    #[test]
    fn test_load_creates_default_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bidmart").join("config.toml");

        let config = Config::load_or_create(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.api_url, default_api_url());

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.api_url = "https://api.example.com/graphql".to_string();
        config.media.camera_command = vec!["snap".to_string(), "--print".to_string()];
        config.save(&path).unwrap();

        let loaded = Config::load_or_create(&path).unwrap();
        assert_eq!(loaded.api_url, "https://api.example.com/graphql");
        assert_eq!(loaded.media.camera_command, vec!["snap", "--print"]);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "country_code = \"\"\ntheme = \"light\"\n").unwrap();

        let config = Config::load_or_create(&path).unwrap();
        assert_eq!(config.theme, "light");
        assert_eq!(config.country_code, "+91");
        assert_eq!(config.media.library_dir, "~/Pictures");
        // No [location] table means no coordinates
        assert_eq!(config.location, None);
    }

    #[test]
    fn test_location_table_is_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[location]\nlat = 19.07\nlng = 72.87\n").unwrap();

        let config = Config::load_or_create(&path).unwrap();
        assert_eq!(
            config.location,
            Some(LocationConfig {
                lat: 19.07,
                lng: 72.87
            })
        );
    }

    #[test]
    fn test_created_file_keeps_default_location() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        Config::load_or_create(&path).unwrap();

        let reloaded = Config::load_or_create(&path).unwrap();
        assert_eq!(reloaded.location, Some(LocationConfig::default()));
    }

    #[test]
    fn test_resolve_api_url_precedence() {
        let config = Config::default();
        assert_eq!(
            config.resolve_api_url(Some("http://flag"), Some("http://env")),
            "http://flag"
        );
        assert_eq!(config.resolve_api_url(None, Some("http://env")), "http://env");
        assert_eq!(config.resolve_api_url(None, None), default_api_url());
        assert_eq!(config.resolve_api_url(Some("  "), None), default_api_url());
    }
}
