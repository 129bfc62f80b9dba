use super::Notice;
use crate::api::TransportError;

/// Why a flow step did not complete.
///
/// Every variant is terminal for the attempt and maps to a titled notice;
/// the user retries by submitting again.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    /// Local validation failed; no network call was made
    #[error("{title}: {message}")]
    Invalid { title: String, message: String },

    /// The server answered but refused the request
    #[error("{title}: {message}")]
    Rejected { title: String, message: String },

    /// The request did not complete
    #[error("{title}: {message}")]
    Transport {
        title: String,
        message: String,
        #[source]
        source: TransportError,
    },

    /// A local resource (session file, media) failed
    #[error("{title}: {message}")]
    Local { title: String, message: String },
}

impl FlowError {
    pub fn invalid(title: impl Into<String>, message: impl Into<String>) -> Self {
        FlowError::Invalid {
            title: title.into(),
            message: message.into(),
        }
    }

    /// Remote refusal using the server message when there is one
    pub fn rejected(title: impl Into<String>, server_message: Option<&str>, fallback: &str) -> Self {
        let message = server_message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(fallback);
        FlowError::Rejected {
            title: title.into(),
            message: message.to_string(),
        }
    }

    /// Transport failure with the best-effort message
    pub fn transport(source: TransportError, fallback: &str) -> Self {
        FlowError::Transport {
            title: "Error".to_string(),
            message: source.user_message(fallback),
            source,
        }
    }

    pub fn local(title: impl Into<String>, message: impl Into<String>) -> Self {
        FlowError::Local {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            FlowError::Invalid { title, .. }
            | FlowError::Rejected { title, .. }
            | FlowError::Transport { title, .. }
            | FlowError::Local { title, .. } => title,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            FlowError::Invalid { message, .. }
            | FlowError::Rejected { message, .. }
            | FlowError::Transport { message, .. }
            | FlowError::Local { message, .. } => message,
        }
    }

    pub fn is_local_validation(&self) -> bool {
        matches!(self, FlowError::Invalid { .. })
    }

    pub fn notice(&self) -> Notice {
        Notice::error(self.title(), self.message())
    }
}
