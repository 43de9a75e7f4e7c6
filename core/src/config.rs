//! Client configuration.
//!
//! Values come from the environment (`WIT_API_BASE`, `WIT_ACCESS_TOKEN`,
//! `WIT_API_VERSION`) or are set directly. Blank variables count as unset.

pub const DEFAULT_API_BASE: &str = "https://api.wit.ai";
pub const DEFAULT_API_VERSION: &str = "20141022";

pub const ENV_API_BASE: &str = "WIT_API_BASE";
pub const ENV_ACCESS_TOKEN: &str = "WIT_ACCESS_TOKEN";
pub const ENV_API_VERSION: &str = "WIT_API_VERSION";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Server access token sent as a bearer credential. Acquiring it is the
    /// caller's business.
    pub access_token: Option<String>,
    /// Dated API version requested through the `Accept` header.
    pub api_version: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            access_token: None,
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup, falling back to
    /// the defaults for anything missing or blank.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();
        Self {
            base_url: read(ENV_API_BASE).unwrap_or(defaults.base_url),
            access_token: read(ENV_ACCESS_TOKEN),
            api_version: read(ENV_API_VERSION).unwrap_or(defaults.api_version),
        }
    }

    /// Value of the `Accept` header for the configured API version.
    pub fn accept_header(&self) -> String {
        format!("application/vnd.wit.{}+json", self.api_version)
    }
}
