//! Kibana client module
//!
//! Provides `KibanaClient`, the reqwest-backed [`Gateway`] implementation.

use super::{Credentials, Gateway};
use crate::error::{Error, Result};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method};
use url::Url;

/// Kibana client for making authenticated API requests.
///
/// Every request carries `kbn-xsrf: true`, and Basic Auth when credentials
/// were supplied. Timeouts are left at reqwest's defaults.
///
/// # Example
/// ```no_run
/// use kibctl::client::{Credentials, Gateway, KibanaClient};
/// use url::Url;
///
/// # async fn example() -> kibctl::Result<()> {
/// let url = Url::parse("http://localhost:5601").unwrap();
/// let client = KibanaClient::try_new(url, Some(Credentials::new("elastic", "changeme")))?;
/// let body = client.get("/api/saved_objects/_find", &[("type", "dashboard")]).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct KibanaClient {
    client: Client,
    url: Url,
}

impl KibanaClient {
    /// Create a new KibanaClient from a base URL and optional credentials.
    ///
    /// # Errors
    /// Returns an error if the credentials do not form a valid header or the
    /// HTTP client cannot be built.
    pub fn try_new(url: Url, credentials: Option<Credentials>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert("kbn-xsrf", HeaderValue::from_static("true"));
        if let Some(credentials) = &credentials {
            headers.insert(reqwest::header::AUTHORIZATION, credentials.header_value()?);
        }
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|source| Error::Transport {
                url: url.to_string(),
                source,
            })?;

        Ok(Self { client, url })
    }

    /// Get the base URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        // Strip leading slash so paths join beneath any prefix in the base URL
        let path_stripped = path.strip_prefix('/').unwrap_or(path);
        self.url
            .join(path_stripped)
            .map_err(|source| Error::InvalidUrl {
                url: format!("{}{}", self.url, path_stripped),
                source,
            })
    }
}

impl Gateway for KibanaClient {
    async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&[u8]>,
    ) -> Result<Vec<u8>> {
        let url = self.endpoint(path)?;
        log::trace!("{} {} {:?}", method, url, query);

        let mut request = self.client.request(method.clone(), url.clone()).query(query);
        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(body.to_vec());
        }

        let transport = |source| Error::Transport {
            url: url.to_string(),
            source,
        };
        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(transport)?;
        log::trace!("{} {} -> {} ({} bytes)", method, url, status, bytes.len());

        if !status.is_success() {
            return Err(Error::Api {
                method,
                path: path.to_string(),
                status,
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        Ok(bytes.to_vec())
    }
}

impl std::fmt::Display for KibanaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.url)
    }
}
