// src/api/client.rs
//! Pure HTTP transport for the Notion API.
//!
//! A thin wrapper around reqwest that handles authentication headers and
//! maps responses to JSON or `HttpError`, without parsing or business logic.

use super::{ApiRequest, Method, Transport};
use crate::config::ClientConfiguration;
use crate::error::{ClientError, HttpError};
use reqwest::{header, Client, RequestBuilder, Response};
use serde_json::Value;

/// A thin wrapper around reqwest Client for Notion API requests.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
    config: ClientConfiguration,
}

impl NotionHttpClient {
    /// Creates a new HTTP client with Notion API authentication.
    pub fn new(config: ClientConfiguration) -> Result<Self, ClientError> {
        let mut builder = Client::builder().default_headers(Self::create_headers(&config)?);
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.as_str());
        }
        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    /// Creates the default headers for Notion API requests.
    fn create_headers(config: &ClientConfiguration) -> Result<header::HeaderMap, ClientError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", config.api_key.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                ClientError::MissingConfiguration(format!("Invalid API token format: {}", e))
            })?,
        );

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_str(&config.notion_version).map_err(|e| {
                ClientError::MissingConfiguration(format!("Invalid Notion-Version: {}", e))
            })?,
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    pub fn configuration(&self) -> &ClientConfiguration {
        &self.config
    }

    fn build(&self, request: &ApiRequest) -> RequestBuilder {
        let url = self.config.endpoint_url(&request.path);
        let builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Patch => self.client.patch(url),
        };
        let builder = if request.query.is_empty() {
            builder
        } else {
            builder.query(&request.query)
        };
        match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        }
    }
}

#[async_trait::async_trait]
impl Transport for NotionHttpClient {
    async fn execute(&self, request: ApiRequest) -> Result<Value, ClientError> {
        log::debug!("{} {}", request.method, self.config.endpoint_url(&request.path));
        if let Some(body) = &request.body {
            log::trace!("Request body: {}", body);
        }

        let response = self.build(&request).send().await?;
        let result = extract_response_text(response).await?;
        log::debug!(
            "{} {} -> {}",
            request.method,
            request.path,
            result.status
        );

        if !result.status.is_success() {
            return Err(HttpError::from_response(result.status.as_u16(), result.data).into());
        }
        if result.data.trim().is_empty() {
            return Err(ClientError::MalformedResponse(format!(
                "empty body from {}",
                result.url
            )));
        }
        Ok(serde_json::from_str(&result.data)?)
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text with metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, ClientError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
