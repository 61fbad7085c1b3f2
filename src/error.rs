//! Error types shared by every kibctl component.

use reqwest::{Method, StatusCode};

/// Result alias used throughout the library.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Missing or invalid operator input (flags, environment, payload)
    #[error("{0}")]
    Validation(String),

    #[error("invalid kibana host {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The request never produced an HTTP response
    #[error("failed to send request to {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status
    #[error("{method} {path} failed. Status: {status}. Response: {body}")]
    Api {
        method: Method,
        path: String,
        status: StatusCode,
        body: String,
    },

    #[error("no {kind} found matching: {name}")]
    NotFound { kind: String, name: String },

    #[error("more than one {kind} found matching: {name}")]
    Ambiguous { kind: String, name: String },

    #[error("could not parse {what}: {reason}")]
    Parse { what: String, reason: String },
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn parse(what: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Parse {
            what: what.into(),
            reason: reason.to_string(),
        }
    }

    /// Process exit code for this failure: 1 for usage problems, 2 for
    /// anything that went wrong while talking to Kibana.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) | Self::InvalidUrl { .. } => 1,
            _ => 2,
        }
    }
}
