// src/config.rs
use crate::constants::{API_BASE_URL, API_BASE_URL_ENV, API_KEY_ENV, NOTION_VERSION};
use crate::error::ClientError;
use crate::types::{ApiKey, ValidatedUrl, ValidationError};

/// Resolved client configuration, validated and ready to build a transport.
#[derive(Debug, Clone)]
pub struct ClientConfiguration {
    pub api_key: ApiKey,
    /// API root override; the public API when `None`.
    pub base_url: Option<ValidatedUrl>,
    pub notion_version: String,
    pub user_agent: Option<String>,
}

impl ClientConfiguration {
    /// Configuration against the public API root.
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            base_url: None,
            notion_version: NOTION_VERSION.to_string(),
            user_agent: None,
        }
    }

    /// Resolves a configuration from the environment.
    ///
    /// `NOTION_API_KEY` is required. `NOTION_API_BASE_URL` overrides the API
    /// root when set and non-empty.
    pub fn from_env() -> Result<Self, ClientError> {
        let api_key_str = std::env::var(API_KEY_ENV).map_err(|_| {
            ClientError::MissingConfiguration(format!(
                "{} environment variable not set",
                API_KEY_ENV
            ))
        })?;
        let config = Self::new(ApiKey::new(api_key_str)?);

        match std::env::var(API_BASE_URL_ENV) {
            Ok(base) if !base.trim().is_empty() => Ok(config.with_base_url(base.trim())?),
            _ => Ok(config),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ValidationError> {
        self.base_url = Some(ValidatedUrl::parse(base_url)?);
        Ok(self)
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn base_url(&self) -> &str {
        self.base_url
            .as_ref()
            .map(ValidatedUrl::as_base)
            .unwrap_or(API_BASE_URL)
    }

    /// Full URL for an endpoint path such as `pages/{id}`.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url(), path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> ApiKey {
        ApiKey::new("secret_0123456789abcdefghij").unwrap()
    }

    #[test]
    fn defaults_to_public_api_root() {
        let config = ClientConfiguration::new(key());
        assert_eq!(config.notion_version, NOTION_VERSION);
        assert_eq!(
            config.endpoint_url("pages/abc"),
            "https://api.notion.com/v1/pages/abc"
        );
        assert_eq!(config.user_agent, None);
    }

    #[test]
    fn base_url_override_is_validated() {
        let config = ClientConfiguration::new(key())
            .with_base_url("http://localhost:8080/v1/")
            .unwrap();
        assert_eq!(
            config.endpoint_url("/users/me"),
            "http://localhost:8080/v1/users/me"
        );

        let err = ClientConfiguration::new(key())
            .with_base_url("ftp://example.com")
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidUrl { .. }));
    }
}
