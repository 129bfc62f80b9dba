//! Shared test utilities for the integration tests.
//!
//! Provides:
//! - `TestEnv`: an isolated config/session/media layout on a `TempDir`
//! - `FakeMarketplace`: an in-memory `MarketplaceApi` that records calls

use async_trait::async_trait;
use base64::Engine;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use bidmart::api::{
    AddProductInput, BidProduct, CatalogProduct, DeleteResult, EmailAvailability,
    MarketplaceApi, ProductInput, SendOtpPayload, TransportError, VerifyOtpInput,
    VerifyOtpPayload,
};
use bidmart::location::{ConfiguredLocation, DEFAULT_LOCATION};
use bidmart::media::FsMediaSource;
use bidmart::services::TaskRunner;
use bidmart::session::{FileSessionStore, SessionStore};

/// An unsigned JWT whose payload carries `sub`
#[allow(dead_code)]
pub fn id_token_for(sub: &str) -> String {
    let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;
    let header = engine.encode(r#"{"alg":"none","typ":"JWT"}"#);
    let payload = engine.encode(format!(r#"{{"sub":"{}"}}"#, sub));
    format!("{}.{}.sig", header, payload)
}

// =============================================================================
// TestEnv
// =============================================================================

/// Isolated on-disk layout:
/// - `config/` - config dir holding `session.json`
/// - `photos/` - media library
#[allow(dead_code)]
pub struct TestEnv {
    temp_dir: TempDir,
    pub config_dir: PathBuf,
    pub library_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_dir = temp_dir.path().join("config");
        let library_dir = temp_dir.path().join("photos");
        std::fs::create_dir_all(&config_dir).expect("Failed to create config dir");
        std::fs::create_dir_all(&library_dir).expect("Failed to create photos dir");

        Self {
            temp_dir,
            config_dir,
            library_dir,
        }
    }

    pub fn root(&self) -> &std::path::Path {
        self.temp_dir.path()
    }

    pub fn session_path(&self) -> PathBuf {
        self.config_dir.join("session.json")
    }

    /// Open the session file (a fresh handle each call)
    pub fn store(&self) -> Arc<dyn SessionStore> {
        Arc::new(FileSessionStore::open(&self.session_path()).expect("Failed to open store"))
    }

    /// Write a photo of `size` bytes into the library
    pub fn add_photo(&self, name: &str, size: usize) -> PathBuf {
        let path = self.library_dir.join(name);
        std::fs::write(&path, vec![0u8; size]).expect("Failed to write photo");
        path
    }

    /// Runner wired to `api`, this env's store and library, and a fixed location
    pub fn runner(&self, api: Arc<dyn MarketplaceApi>, store: Arc<dyn SessionStore>) -> TaskRunner {
        let library = self.library_dir.to_string_lossy().to_string();
        TaskRunner::new(
            api,
            store,
            Arc::new(FsMediaSource::new(&library, &[])),
            Arc::new(ConfiguredLocation::fixed(DEFAULT_LOCATION)),
            "+91",
        )
    }
}

// =============================================================================
// FakeMarketplace
// =============================================================================

/// One recorded API call
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SendOtp(String),
    VerifyOtp(VerifyOtpInput),
    VerifyEmail(String),
    AddProduct(AddProductInput),
    UpdateProduct(String, ProductInput),
    DeleteProduct(String),
    Products,
    Product(String),
}

/// In-memory marketplace. Accepts one OTP and issues tokens for `user_id`.
#[allow(dead_code)]
pub struct FakeMarketplace {
    calls: Mutex<Vec<Call>>,
    pub new_user: bool,
    pub valid_otp: String,
    pub user_id: String,
    pub taken_emails: Vec<String>,
    /// Fail every call with this network error
    pub offline: Option<String>,
}

#[allow(dead_code)]
impl FakeMarketplace {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            new_user: false,
            valid_otp: "123456".to_string(),
            user_id: "user-42".to_string(),
            taken_emails: Vec::new(),
            offline: None,
        }
    }

    pub fn new_user(mut self) -> Self {
        self.new_user = true;
        self
    }

    pub fn with_taken_email(mut self, email: &str) -> Self {
        self.taken_emails.push(email.to_string());
        self
    }

    pub fn offline(mut self, message: &str) -> Self {
        self.offline = Some(message.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<(), TransportError> {
        self.calls.lock().unwrap().push(call);
        match &self.offline {
            Some(message) => Err(TransportError::Network(message.clone())),
            None => Ok(()),
        }
    }

    fn catalog_product(id: &str) -> CatalogProduct {
        CatalogProduct {
            id: id.to_string(),
            name: Some("Bicycle".to_string()),
            price: Some(4500.0),
            description: None,
            category: Some("sports".to_string()),
            created_at: None,
            updated_at: None,
        }
    }
}

#[async_trait]
impl MarketplaceApi for FakeMarketplace {
    async fn send_otp(&self, phone_number: &str) -> Result<Option<SendOtpPayload>, TransportError> {
        self.record(Call::SendOtp(phone_number.to_string()))?;
        Ok(Some(SendOtpPayload {
            success: true,
            message: Some("OTP sent".to_string()),
            is_new_user: Some(self.new_user),
            expires_in: Some(300),
            otp: None,
        }))
    }

    async fn verify_otp(
        &self,
        input: &VerifyOtpInput,
    ) -> Result<Option<VerifyOtpPayload>, TransportError> {
        self.record(Call::VerifyOtp(input.clone()))?;
        if input.otp != self.valid_otp {
            return Ok(Some(VerifyOtpPayload {
                success: false,
                message: Some("Invalid OTP".to_string()),
                ..Default::default()
            }));
        }
        Ok(Some(VerifyOtpPayload {
            success: true,
            message: None,
            access_token: Some("access-token-value".to_string()),
            id_token: Some(id_token_for(&self.user_id)),
            refresh_token: Some("refresh-token-value".to_string()),
            is_new_user: Some(self.new_user),
        }))
    }

    async fn verify_email(&self, email: &str) -> Result<Option<EmailAvailability>, TransportError> {
        self.record(Call::VerifyEmail(email.to_string()))?;
        let taken = self.taken_emails.iter().any(|e| e == email);
        Ok(Some(EmailAvailability {
            available: !taken,
            message: taken.then(|| "Email already registered".to_string()),
        }))
    }

    async fn add_product(&self, input: &AddProductInput) -> Result<Option<BidProduct>, TransportError> {
        self.record(Call::AddProduct(input.clone()))?;
        let product = serde_json::from_value(serde_json::json!({
            "productId": "prod-1",
            "name": input.name,
            "expectedPrice": input.expected_price,
            "userId": input.user_id,
        }))
        .map_err(|e| TransportError::Decode(e.to_string()))?;
        Ok(Some(product))
    }

    async fn update_product(
        &self,
        id: &str,
        input: &ProductInput,
    ) -> Result<Option<CatalogProduct>, TransportError> {
        self.record(Call::UpdateProduct(id.to_string(), input.clone()))?;
        let mut product = Self::catalog_product(id);
        if let Some(name) = &input.name {
            product.name = Some(name.clone());
        }
        if let Some(price) = input.price {
            product.price = Some(price);
        }
        Ok(Some(product))
    }

    async fn delete_product(&self, id: &str) -> Result<Option<DeleteResult>, TransportError> {
        self.record(Call::DeleteProduct(id.to_string()))?;
        Ok(Some(DeleteResult {
            success: true,
            message: None,
        }))
    }

    async fn products(&self) -> Result<Vec<CatalogProduct>, TransportError> {
        self.record(Call::Products)?;
        Ok(vec![Self::catalog_product("p1"), Self::catalog_product("p2")])
    }

    async fn product(&self, id: &str) -> Result<Option<CatalogProduct>, TransportError> {
        self.record(Call::Product(id.to_string()))?;
        Ok((id == "p1").then(|| Self::catalog_product(id)))
    }
}
