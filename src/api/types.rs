//! Typed variables and payloads for the operations in [`super::operations`].

use crate::session::Session;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of `sendOTP`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOtpPayload {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub is_new_user: Option<bool>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    /// Echoed code (development servers only)
    #[serde(default)]
    pub otp: Option<String>,
}

impl SendOtpPayload {
    pub fn is_new_user(&self) -> bool {
        self.is_new_user.unwrap_or(false)
    }
}

/// `VerifyOTPInput`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpInput {
    pub phone_number: String,
    pub otp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
}

/// Result of `verifyOTP`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpPayload {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub id_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub is_new_user: Option<bool>,
}

impl VerifyOtpPayload {
    /// The issued credentials, if the server returned all three tokens
    pub fn session(&self) -> Option<Session> {
        match (&self.access_token, &self.id_token, &self.refresh_token) {
            (Some(access), Some(id), Some(refresh)) => {
                Some(Session::new(access.clone(), id.clone(), refresh.clone()))
            }
            _ => None,
        }
    }
}

/// Result of `verifyEmailId`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EmailAvailability {
    pub available: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Latitude/longitude pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// `AddBidProductInput`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddProductInput {
    pub name: String,
    pub expected_price: f64,
    /// Milliseconds since the Unix epoch
    pub bid_start_date: i64,
    /// Milliseconds since the Unix epoch
    pub bid_end_date: i64,
    pub image_urls: Vec<String>,
    pub description_text: String,
    pub user_id: String,
    pub location: GeoPoint,
    pub location_name: String,
}

/// A timestamp as the server returns it: epoch millis or a string
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Millis(f64),
    Text(String),
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::Millis(ms) => {
                match chrono::DateTime::from_timestamp_millis(*ms as i64) {
                    Some(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M UTC")),
                    None => write!(f, "{}", ms),
                }
            }
            Timestamp::Text(text) => write!(f, "{}", text),
        }
    }
}

/// Result of `addProduct`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidProduct {
    pub product_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub expected_price: Option<f64>,
    #[serde(default)]
    pub bid_start_date: Option<Timestamp>,
    #[serde(default)]
    pub bid_end_date: Option<Timestamp>,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub description_text: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub location: Option<GeoPoint>,
    #[serde(default)]
    pub location_name: Option<String>,
}

/// `ProductInput` for `updateProduct`; unset fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ProductInput {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.description.is_none()
            && self.category.is_none()
    }
}

/// Catalogue entry returned by `products`, `product` and `updateProduct`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProduct {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Result of `deleteProduct`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DeleteResult {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

// Response envelopes: the `data` object of each operation.

#[derive(Debug, Deserialize)]
pub(crate) struct SendOtpData {
    #[serde(rename = "sendOTP")]
    pub send_otp: Option<SendOtpPayload>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VerifyOtpData {
    #[serde(rename = "verifyOTP")]
    pub verify_otp: Option<VerifyOtpPayload>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VerifyEmailData {
    #[serde(rename = "verifyEmailId")]
    pub verify_email_id: Option<EmailAvailability>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddProductData {
    #[serde(rename = "addProduct")]
    pub add_product: Option<BidProduct>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpdateProductData {
    #[serde(rename = "updateProduct")]
    pub update_product: Option<CatalogProduct>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeleteProductData {
    #[serde(rename = "deleteProduct")]
    pub delete_product: Option<DeleteResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductsData {
    #[serde(default)]
    pub products: Option<Vec<CatalogProduct>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductData {
    pub product: Option<CatalogProduct>,
}
