//! Connection configuration
//!
//! Host and credentials come from command-line flags first, then from the
//! environment (optionally seeded from a dotenv file). The resolved
//! [`Config`] is an explicit value handed to [`KibanaClient::try_new`].

use crate::client::{Credentials, KibanaClient};
use crate::error::{Error, Result};
use std::path::Path;
use url::Url;

pub const HOST_VAR: &str = "KIBANA_HOST";
pub const USERNAME_VAR: &str = "KIBANA_USERNAME";
pub const PASSWORD_VAR: &str = "KIBANA_PASSWORD";

/// Connection flags shared by every subcommand
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// Kibana api endpoint [env: KIBANA_HOST]
    #[arg(short = 'H', long, global = true)]
    pub host: Option<String>,

    /// Basic auth username [env: KIBANA_USERNAME]
    #[arg(short, long, global = true)]
    pub username: Option<String>,

    /// Basic auth password [env: KIBANA_PASSWORD]
    #[arg(short, long, global = true)]
    pub password: Option<String>,
}

/// Resolved connection settings for one invocation
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: Url,
    pub credentials: Option<Credentials>,
}

impl Config {
    /// Resolve flags against the process environment.
    ///
    /// With `require_credentials`, a missing username or password is a
    /// validation error; otherwise Basic Auth is only used when both are set.
    pub fn resolve(args: &ConnectionArgs, require_credentials: bool) -> Result<Self> {
        Self::resolve_with(args, require_credentials, |key| std::env::var(key).ok())
    }

    /// Same as [`Config::resolve`] with an explicit environment lookup.
    pub fn resolve_with(
        args: &ConnectionArgs,
        require_credentials: bool,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let pick = |flag: &Option<String>, key: &str| {
            flag.clone()
                .or_else(|| env(key))
                .filter(|value| !value.is_empty())
        };

        let host = pick(&args.host, HOST_VAR)
            .ok_or_else(|| Error::validation("kibana host not defined"))?;
        let username = pick(&args.username, USERNAME_VAR);
        let password = pick(&args.password, PASSWORD_VAR);

        let credentials = match (username, password) {
            (Some(username), Some(password)) => Some(Credentials::new(username, password)),
            (None, _) if require_credentials => {
                return Err(Error::validation("kibana username not defined"));
            }
            (_, None) if require_credentials => {
                return Err(Error::validation("kibana password not defined"));
            }
            _ => None,
        };

        Ok(Self {
            host: parse_host(&host)?,
            credentials,
        })
    }

    pub fn client(&self) -> Result<KibanaClient> {
        KibanaClient::try_new(self.host.clone(), self.credentials.clone())
    }
}

/// Parse the host URL, making sure a base path ends with `/` so API paths
/// are joined beneath it rather than replacing its last segment.
fn parse_host(host: &str) -> Result<Url> {
    let mut url = Url::parse(host).map_err(|source| Error::InvalidUrl {
        url: host.to_string(),
        source,
    })?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Load variables from a dotenv file into the process environment.
///
/// Returns `Ok(false)` when the file does not exist; variables already set in
/// the environment take precedence over the file.
pub fn load_env_file(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    if !path.exists() {
        log::trace!("No env file at {}", path.display());
        return Ok(false);
    }
    dotenvy::from_filename(path).map_err(|e| {
        Error::validation(format!("could not load env file {}: {}", path.display(), e))
    })?;
    log::debug!("Loaded environment from {}", path.display());
    Ok(true)
}
