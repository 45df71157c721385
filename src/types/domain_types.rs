// src/types/domain_types.rs
//! Domain-specific newtypes for type safety and validation.

use super::ValidationError;
use std::fmt;
use url::Url;

/// API key for Notion API authentication
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Create a new API key with validation
    pub fn new(key: impl Into<String>) -> Result<Self, ValidationError> {
        let key = key.into();

        if key.is_empty() {
            return Err(ValidationError::InvalidApiKey {
                reason: "API key cannot be empty".to_string(),
            });
        }

        if !key.starts_with("secret_") && !key.starts_with("ntn_") {
            return Err(ValidationError::InvalidApiKey {
                reason: "API key must start with 'secret_' or 'ntn_'".to_string(),
            });
        }

        if key.len() < 20 {
            return Err(ValidationError::InvalidApiKey {
                reason: "API key is too short".to_string(),
            });
        }

        Ok(Self(key))
    }

    /// Get the API key as a string reference
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Redact API key in display
        let visible: String = self.0.chars().take(10).collect();
        write!(f, "{}...", visible)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey({})", self)
    }
}

/// Validated http(s) base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUrl(Url);

impl ValidatedUrl {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let url = Url::parse(input).map_err(|e| ValidationError::InvalidUrl {
            url: input.to_string(),
            reason: e.to_string(),
        })?;

        match url.scheme() {
            "http" | "https" => Ok(Self(url)),
            scheme => Err(ValidationError::InvalidUrl {
                url: input.to_string(),
                reason: format!("unsupported scheme '{}'", scheme),
            }),
        }
    }

    /// The URL without a trailing slash, ready for `format!("{}/{}", ..)`
    pub fn as_base(&self) -> &str {
        self.0.as_str().trim_end_matches('/')
    }
}

impl fmt::Display for ValidatedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_validation() {
        assert!(ApiKey::new("secret_1234567890abcdefghij").is_ok());
        assert!(ApiKey::new("ntn_1234567890abcdefghij").is_ok());
        assert!(ApiKey::new("").is_err());
        assert!(ApiKey::new("bearer_1234567890abcdefghij").is_err());
        assert!(ApiKey::new("secret_short").is_err());
    }

    #[test]
    fn api_key_is_redacted() {
        let key = ApiKey::new("secret_1234567890abcdefghij").unwrap();
        assert_eq!(key.to_string(), "secret_123...");
        assert!(!format!("{:?}", key).contains("abcdefghij"));
    }

    #[test]
    fn api_key_redaction_respects_char_boundaries() {
        let key = ApiKey::new("ntn_abc😀😀😀😀").unwrap();
        assert_eq!(key.to_string(), "ntn_abc😀😀😀...");

        let key = ApiKey::new("ntn_abcde😀😀😀😀").unwrap();
        assert_eq!(key.to_string(), "ntn_abcde😀...");
    }

    #[test]
    fn base_url_validation() {
        let url = ValidatedUrl::parse("https://api.notion.com/v1/").unwrap();
        assert_eq!(url.as_base(), "https://api.notion.com/v1");
        assert!(ValidatedUrl::parse("ftp://example.com").is_err());
        assert!(ValidatedUrl::parse("not a url").is_err());
    }
}
