use shared::error::{ApiException, ErrorCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request rejected: {0}")]
    Http(#[from] ApiException),
    #[error("request failed to complete: {0}")]
    Transport(String),
    #[error("unexpected response body: {0}")]
    Decode(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("local storage failure: {0}")]
    Storage(#[source] anyhow::Error),
}

impl ClientError {
    pub fn http(status: u16, detail: Option<String>) -> Self {
        Self::Http(ApiException::new(status, detail))
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http(err) => Some(err.status),
            _ => None,
        }
    }

    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Http(err) => Some(err.code),
            _ => None,
        }
    }

    /// True when no HTTP response was obtained (or it could not be read).
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Decode(_))
    }

    /// Message shown to the user for an HTTP rejection: the server detail
    /// when it sent one, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Http(err) => err.detail.clone().unwrap_or_else(|| fallback.to_string()),
            Self::InvalidInput(message) => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}
