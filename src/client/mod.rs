//! Kibana API client and authentication.
//!
//! This module provides the [`Gateway`] trait that every API component talks
//! through, the [`KibanaClient`] that implements it over HTTP, and the
//! [`Credentials`] used for Basic Auth.

mod auth;
mod kibana;

#[cfg(test)]
pub(crate) mod fake;

pub use auth::Credentials;
pub use kibana::KibanaClient;

use crate::error::Result;
use reqwest::Method;
use std::future::Future;

/// A single authenticated round-trip to the Kibana API
///
/// Implementors return the raw response body for 2xx responses. Any other
/// status must surface as [`crate::Error::Api`] carrying the status and body,
/// and connection failures as [`crate::Error::Transport`]. No retries.
pub trait Gateway: Send + Sync {
    /// Send `method path?query` with an optional JSON body
    ///
    /// `path` is relative to the configured Kibana host.
    fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&[u8]>,
    ) -> impl Future<Output = Result<Vec<u8>>> + Send;

    fn get(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> impl Future<Output = Result<Vec<u8>>> + Send {
        self.request(Method::GET, path, query, None)
    }

    fn post(
        &self,
        path: &str,
        query: &[(&str, &str)],
        body: &[u8],
    ) -> impl Future<Output = Result<Vec<u8>>> + Send {
        self.request(Method::POST, path, query, Some(body))
    }
}

impl<G: Gateway + ?Sized> Gateway for &G {
    fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&[u8]>,
    ) -> impl Future<Output = Result<Vec<u8>>> + Send {
        (**self).request(method, path, query, body)
    }
}
