//! bidmart - a terminal client for a phone-OTP marketplace
//!
//! Sign in with a one-time code, then bid on products as a buyer or list
//! products for auction as a seller, all against the marketplace's GraphQL
//! API.

// Core modules
pub mod api;
pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod flow;
pub mod forms;
pub mod keymap;
pub mod location;
pub mod media;
pub mod screens;
pub mod services;
pub mod session;
pub mod styles;
pub mod tui;
pub mod utils;
pub mod widgets;

// Re-exports for convenience
pub use config::Config;
pub use flow::{Navigator, Route};
pub use session::Session;

// Keymap re-exports (used by Config and for external API)
pub use keymap::{Action, KeyBinding, Keymap, KeymapPreset};
