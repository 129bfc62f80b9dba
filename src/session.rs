//! Session storage for issued credentials.
//!
//! Tokens are kept in a small string key-value store. The file-backed store
//! writes `session.json` next to the config with owner-only permissions; the
//! in-memory store is used by tests and headless callers.
//!
//! The transport never touches the store directly. It is handed a
//! [`SessionProvider`] at construction, and [`StoredSession`] adapts a store
//! into one.

use anyhow::{Context, Result};
use base64::Engine;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const ID_TOKEN_KEY: &str = "idToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// Credentials issued by a successful OTP verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    pub id_token: String,
    pub refresh_token: String,
}

impl Session {
    pub fn new(
        access_token: impl Into<String>,
        id_token: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            id_token: id_token.into(),
            refresh_token: refresh_token.into(),
        }
    }

    /// The authenticated user id (`sub` claim of the ID token).
    ///
    /// The payload is decoded without verifying the signature; the server
    /// remains the authority on whether the token is valid.
    pub fn user_id(&self) -> Option<String> {
        user_id_from_token(&self.id_token)
    }
}

#[derive(Deserialize)]
struct IdClaims {
    sub: Option<String>,
}

/// Extract the `sub` claim from a JWT without verifying it
pub fn user_id_from_token(token: &str) -> Option<String> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }

    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(parts[1].trim_end_matches('='))
        .ok()?;
    let claims: IdClaims = serde_json::from_slice(&payload).ok()?;
    claims.sub.filter(|s| !s.is_empty())
}

/// Mask a token for logs and display
pub fn token_preview(token: &str) -> String {
    let count = token.chars().count();
    if count > 8 {
        let head: String = token.chars().take(4).collect();
        let tail: String = token.chars().skip(count - 4).collect();
        format!("{}...{}", head, tail)
    } else {
        "***".to_string()
    }
}

/// Persistent string key-value storage
pub trait SessionStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<()>;

    /// Write several items as one update
    fn set_items(&self, items: &[(&str, &str)]) -> Result<()> {
        for (key, value) in items {
            self.set_item(key, value)?;
        }
        Ok(())
    }

    /// Remove several items as one update
    fn remove_items(&self, keys: &[&str]) -> Result<()> {
        for key in keys {
            self.remove_item(key)?;
        }
        Ok(())
    }
}

/// Persist all three tokens
pub fn save_session(store: &dyn SessionStore, session: &Session) -> Result<()> {
    store.set_items(&[
        (ACCESS_TOKEN_KEY, session.access_token.as_str()),
        (ID_TOKEN_KEY, session.id_token.as_str()),
        (REFRESH_TOKEN_KEY, session.refresh_token.as_str()),
    ])?;
    info!("Session saved (id token {})", token_preview(&session.id_token));
    Ok(())
}

/// Load the stored session, if all three tokens are present
pub fn load_session(store: &dyn SessionStore) -> Result<Option<Session>> {
    let access = store.get_item(ACCESS_TOKEN_KEY)?;
    let id = store.get_item(ID_TOKEN_KEY)?;
    let refresh = store.get_item(REFRESH_TOKEN_KEY)?;

    Ok(match (access, id, refresh) {
        (Some(access), Some(id), Some(refresh)) => Some(Session::new(access, id, refresh)),
        _ => None,
    })
}

/// Remove every stored token
pub fn clear_session(store: &dyn SessionStore) -> Result<()> {
    store.remove_items(&[ACCESS_TOKEN_KEY, ID_TOKEN_KEY, REFRESH_TOKEN_KEY])?;
    info!("Session cleared");
    Ok(())
}

/// Session store backed by a JSON file
pub struct FileSessionStore {
    path: PathBuf,
    items: Mutex<BTreeMap<String, String>>,
}

impl FileSessionStore {
    /// Open the store at `path`, reading existing items if the file exists
    pub fn open(path: &Path) -> Result<Self> {
        let items = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read session file: {:?}", path))?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content)
                    .with_context(|| format!("Failed to parse session file: {:?}", path))?
            }
        } else {
            BTreeMap::new()
        };

        debug!("Opened session store at {:?} ({} items)", path, items.len());
        Ok(Self {
            path: path.to_path_buf(),
            items: Mutex::new(items),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>> {
        self.items
            .lock()
            .map_err(|_| anyhow::anyhow!("Session store lock poisoned"))
    }

    fn flush(&self, items: &BTreeMap<String, String>) -> Result<()> {
        let content =
            serde_json::to_string_pretty(items).context("Failed to serialize session")?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create session directory: {:?}", parent))?;
        }

        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write session file: {:?}", self.path))?;

        // Tokens are credentials: owner read/write only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&self.path)
                .with_context(|| format!("Failed to get file metadata: {:?}", self.path))?
                .permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&self.path, perms)
                .with_context(|| format!("Failed to set file permissions: {:?}", self.path))?;
        }

        Ok(())
    }

    /// Apply `update` and flush once. The map is left untouched if the write fails.
    fn update(&self, update: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<()> {
        let mut items = self.lock()?;
        let mut next = items.clone();
        update(&mut next);
        if next == *items {
            return Ok(());
        }
        self.flush(&next)?;
        *items = next;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.set_items(&[(key, value)])
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.remove_items(&[key])
    }

    fn set_items(&self, items: &[(&str, &str)]) -> Result<()> {
        self.update(|map| {
            for (key, value) in items {
                map.insert((*key).to_string(), (*value).to_string());
            }
        })
    }

    fn remove_items(&self, keys: &[&str]) -> Result<()> {
        self.update(|map| {
            for key in keys {
                map.remove(*key);
            }
        })
    }
}

/// Session store kept in memory only
#[derive(Default)]
pub struct MemorySessionStore {
    items: Mutex<BTreeMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>> {
        self.items
            .lock()
            .map_err(|_| anyhow::anyhow!("Session store lock poisoned"))
    }
}

impl SessionStore for MemorySessionStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// Capability handed to the transport for reading the bearer token
pub trait SessionProvider: Send + Sync {
    /// The ID token to present as a bearer credential, if signed in
    fn id_token(&self) -> Option<String>;
}

/// [`SessionProvider`] that reads the ID token from a [`SessionStore`]
#[derive(Clone)]
pub struct StoredSession {
    store: Arc<dyn SessionStore>,
}

impl StoredSession {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }
}

impl SessionProvider for StoredSession {
    fn id_token(&self) -> Option<String> {
        match self.store.get_item(ID_TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!("Could not read ID token from session store: {}", e);
                None
            }
        }
    }
}
