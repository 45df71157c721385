// src/api/mod.rs
//! Notion API interaction.
//!
//! The typed operations in [`NotionClient`] encode requests with the codec
//! and hand them to a [`Transport`]. The transport only moves JSON; it never
//! sees model types. [`NotionHttpClient`] is the reqwest-backed transport.

pub mod client;
pub mod notion;

use crate::error::ClientError;
use serde_json::Value;
use std::fmt;

/// HTTP verbs the Notion API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One API call: verb, endpoint path relative to the API root, query
/// parameters, and an optional JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    pub fn patch(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Patch,
            path: path.into(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }
}

/// The ability to execute a request against the Notion API.
///
/// Implementations return the parsed JSON body of a 2xx response. Any other
/// status becomes `ClientError::Http` with the API's error envelope intact.
/// No retries happen at this layer.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<Value, ClientError>;
}

#[async_trait::async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn execute(&self, request: ApiRequest) -> Result<Value, ClientError> {
        (**self).execute(request).await
    }
}

// Re-export the public interface
pub use client::NotionHttpClient;
pub use notion::NotionClient;
