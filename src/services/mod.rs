//! Application services layer.
//!
//! Services hold the sign-in and listing logic apart from the UI. Screens
//! describe work as a [`Task`]; the [`TaskRunner`] executes it on the tokio
//! runtime through the services below.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                   UI Layer                      │
//! │  (App, Screens, Widgets)                        │
//! └─────────────────────┬───────────────────────────┘
//!                       │ Task / TaskHandle
//!                       ▼
//! ┌─────────────────────────────────────────────────┐
//! │               Services Layer                    │
//! │  ┌─────────────┐ ┌────────────────┐             │
//! │  │ AuthService │ │ ListingService │             │
//! │  └─────────────┘ └────────────────┘             │
//! └─────────────────────┬───────────────────────────┘
//!                       │
//!                       ▼
//! ┌─────────────────────────────────────────────────┐
//! │             Infrastructure Layer                │
//! │  (MarketplaceApi, SessionStore, MediaSource)    │
//! └─────────────────────────────────────────────────┘
//! ```

pub mod auth_service;
pub mod listing_service;
pub mod task;

pub use auth_service::{AuthService, EmailWording, Registration};
pub use listing_service::ListingService;
pub use task::{Task, TaskHandle, TaskOutcome, TaskRunner};
