//! HTTP transport for GraphQL operations.
//!
//! One attempt per call: no retry, no timeout, no backoff. Before dispatch
//! the transport asks its [`SessionProvider`] for an ID token and, if one is
//! stored, sends it as a bearer credential.

use super::operations::Operation;
use crate::session::{token_preview, SessionProvider};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// GraphQL request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQLRequest<'a, V: Serialize> {
    pub operation_name: &'a str,
    pub query: &'a str,
    pub variables: V,
}

/// GraphQL response wrapper
#[derive(Debug, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQLError>>,
}

/// GraphQL error entry
#[derive(Debug, Deserialize)]
pub struct GraphQLError {
    pub message: String,
}

/// Failure of a single transport call
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The request never produced a response
    #[error("{0}")]
    Network(String),

    /// The server answered with a non-success status and no GraphQL errors
    #[error("Response not successful: Received status code {status}")]
    Http { status: u16 },

    /// The response carried GraphQL errors
    #[error("{}", .0.join(", "))]
    Application(Vec<String>),

    #[error("No data returned")]
    NoData,

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl TransportError {
    /// Best-effort message for the user.
    ///
    /// Preference order: the network-level message, then the application
    /// error messages joined with `", "`, then `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            TransportError::Network(message) if !message.is_empty() => message.clone(),
            TransportError::Http { .. } => self.to_string(),
            TransportError::Application(messages) => {
                let joined = messages
                    .iter()
                    .filter(|m| !m.is_empty())
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", ");
                if joined.is_empty() {
                    fallback.to_string()
                } else {
                    joined
                }
            }
            _ => fallback.to_string(),
        }
    }
}

/// Request pipeline shared by every operation
#[derive(Clone)]
pub struct GraphQLTransport {
    client: Client,
    endpoint: String,
    session: Arc<dyn SessionProvider>,
}

impl GraphQLTransport {
    /// Create a transport for `endpoint` that reads bearer tokens from `session`
    pub fn new(endpoint: impl Into<String>, session: Arc<dyn SessionProvider>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            session,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Execute `operation` with `variables` and decode its `data` object
    pub async fn execute<V, R>(&self, operation: &Operation, variables: V) -> Result<R, TransportError>
    where
        V: Serialize,
        R: DeserializeOwned,
    {
        let body = GraphQLRequest {
            operation_name: operation.name,
            query: operation.document,
            variables,
        };

        let mut request = self.client.post(&self.endpoint).json(&body);

        match self.session.id_token() {
            Some(token) => {
                debug!(
                    "Dispatching {} to {} (bearer {})",
                    operation.name,
                    self.endpoint,
                    token_preview(&token)
                );
                request = request.bearer_auth(token);
            }
            None => debug!("Dispatching {} to {} (anonymous)", operation.name, self.endpoint),
        }

        let response = request.send().await.map_err(|e| {
            error!("{} failed before a response: {}", operation.name, e);
            TransportError::Network(e.to_string())
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            error!("{} response body could not be read: {}", operation.name, e);
            TransportError::Network(e.to_string())
        })?;

        decode_response(operation, status.as_u16(), &text)
    }
}

/// Turn a raw HTTP status and body into typed data or a [`TransportError`]
pub fn decode_response<R: DeserializeOwned>(
    operation: &Operation,
    status: u16,
    body: &str,
) -> Result<R, TransportError> {
    let success = (200..300).contains(&status);

    let parsed: GraphQLResponse<R> = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(e) if success => {
            warn!("{} returned an unexpected body: {}", operation.name, e);
            return Err(TransportError::Decode(e.to_string()));
        }
        Err(_) => {
            warn!("{} returned HTTP {}", operation.name, status);
            return Err(TransportError::Http { status });
        }
    };

    if let Some(errors) = parsed.errors.filter(|errors| !errors.is_empty()) {
        let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
        warn!("{} returned errors: {}", operation.name, messages.join(", "));
        return Err(TransportError::Application(messages));
    }

    if !success {
        warn!("{} returned HTTP {}", operation.name, status);
        return Err(TransportError::Http { status });
    }

    parsed.data.ok_or(TransportError::NoData)
}
