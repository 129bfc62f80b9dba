//! GraphQL client for the marketplace API.

pub mod client;
pub mod operations;
pub mod transport;
pub mod types;

pub use client::{GraphQLMarketplace, MarketplaceApi};
pub use operations::Operation;
pub use transport::{GraphQLTransport, TransportError};
pub use types::*;

use crate::session::SessionProvider;
use std::sync::Arc;

/// Build the GraphQL-backed API for `endpoint`
pub fn connect(endpoint: &str, session: Arc<dyn SessionProvider>) -> GraphQLMarketplace {
    GraphQLMarketplace::new(GraphQLTransport::new(endpoint, session))
}
