//! Credentials and client configuration.

use std::env;
use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Production API root.
pub const API_BASE_URL: &str = "https://api.cloudflare.com/client/v4/";

pub const API_KEY_HEADER: &str = "X-Auth-Key";
pub const EMAIL_HEADER: &str = "X-Auth-Email";

/// Account email and API key attached to every request.
///
/// Fields are private so a client's credentials cannot change after
/// construction.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    email: String,
    api_key: String,
}

impl Credentials {
    pub fn new(email: &str, api_key: &str) -> Self {
        Self {
            email: email.to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// The authentication headers plus the JSON content type, in the order
    /// they are sent.
    pub(crate) fn headers(&self) -> Vec<(String, String)> {
        vec![
            (API_KEY_HEADER.to_string(), self.api_key.clone()),
            (EMAIL_HEADER.to_string(), self.email.clone()),
            ("Content-Type".to_string(), "application/json".to_string()),
        ]
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Everything needed to construct a `Client`.
///
/// Deserializable so callers can keep it in whatever file format they
/// already use.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    pub email: String,
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Upper bound for a whole call. Unset means no client-side timeout.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    API_BASE_URL.to_string()
}

impl ClientConfig {
    pub fn new(email: &str, api_key: &str) -> Self {
        Self {
            email: email.to_string(),
            api_key: api_key.to_string(),
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.email, &self.api_key)
    }

    /// Read `CLOUDFLARE_EMAIL` and `CLOUDFLARE_API_KEY`, plus the optional
    /// `CLOUDFLARE_API_BASE_URL` and `CLOUDFLARE_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| Error::Config(format!("{key} is not set")))
        };

        let mut config = Self::new(&required("CLOUDFLARE_EMAIL")?, &required("CLOUDFLARE_API_KEY")?);
        if let Some(base_url) = lookup("CLOUDFLARE_API_BASE_URL").filter(|v| !v.is_empty()) {
            config.base_url = base_url;
        }
        if let Some(timeout) = lookup("CLOUDFLARE_TIMEOUT_SECS") {
            let secs = timeout
                .parse::<u64>()
                .map_err(|_| Error::Config(format!("CLOUDFLARE_TIMEOUT_SECS is not a number: {timeout:?}")))?;
            config.timeout_secs = Some(secs);
        }
        Ok(config)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("email", &self.email)
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
