use std::time::Duration;

use reqwest::Response;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::core::error::{ConfigError, ProviderError};
use crate::core::types::{AdapterContext, ProviderId};

pub(crate) const AUTH_BEARER_TOKEN_KEY: &str = "transport.auth.bearer_token";
pub(crate) const CUSTOM_HEADER_PREFIX: &str = "transport.header.";
pub(crate) const REQUEST_ID_HEADER_KEY: &str = "transport.request_id_header";
const DEFAULT_REQUEST_ID_HEADER: &str = "x-request-id";

pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// JSON-over-HTTP transport shared by the provider adapters.
///
/// Every call is a single attempt; failures go straight back to the caller.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    timeout_ms: u64,
}

impl HttpTransport {
    pub fn new(timeout_ms: u64) -> Result<Self, ConfigError> {
        Self::validate_timeout(timeout_ms)?;

        let client = reqwest::Client::builder()
            .build()
            .map_err(|error| ConfigError::HttpClient {
                reason: error.to_string(),
            })?;

        Ok(Self { client, timeout_ms })
    }

    pub fn with_client(client: reqwest::Client, timeout_ms: u64) -> Result<Self, ConfigError> {
        Self::validate_timeout(timeout_ms)?;
        Ok(Self { client, timeout_ms })
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    pub async fn post_json<TReq, TResp>(
        &self,
        provider: ProviderId,
        url: &str,
        body: &TReq,
        ctx: &AdapterContext,
    ) -> Result<TResp, ProviderError>
    where
        TReq: Serialize + ?Sized,
        TResp: DeserializeOwned,
    {
        let payload = serde_json::to_vec(body).map_err(|error| ProviderError::Serialization {
            provider: provider.clone(),
            request_id: None,
            message: error.to_string(),
        })?;

        let header_config = build_header_config(&provider, ctx)?;

        let response = self
            .client
            .post(url)
            .timeout(Duration::from_millis(self.timeout_ms))
            .headers(header_config.headers)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(payload)
            .send()
            .await
            .map_err(|error| self.classify_send_error(&provider, &error))?;

        let status_code = response.status().as_u16();
        let request_id = extract_request_id(response.headers(), &header_config.request_id_header);

        if !response.status().is_success() {
            return Err(build_status_error(provider, status_code, request_id, response).await);
        }

        response
            .json::<TResp>()
            .await
            .map_err(|error| ProviderError::Serialization {
                provider,
                request_id,
                message: error.to_string(),
            })
    }

    fn classify_send_error(&self, provider: &ProviderId, error: &reqwest::Error) -> ProviderError {
        if error.is_timeout() {
            return ProviderError::Timeout {
                provider: provider.clone(),
                timeout_ms: self.timeout_ms,
            };
        }

        ProviderError::Transport {
            provider: provider.clone(),
            request_id: None,
            message: error.to_string(),
        }
    }

    fn validate_timeout(timeout_ms: u64) -> Result<(), ConfigError> {
        if timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout { timeout_ms });
        }
        Ok(())
    }
}

struct HeaderConfig {
    headers: HeaderMap,
    request_id_header: HeaderName,
}

fn build_header_config(
    provider: &ProviderId,
    ctx: &AdapterContext,
) -> Result<HeaderConfig, ProviderError> {
    let request_id_header = match ctx.metadata.get(REQUEST_ID_HEADER_KEY) {
        Some(value) => parse_header_name(value, provider)?,
        None => HeaderName::from_static(DEFAULT_REQUEST_ID_HEADER),
    };

    let mut headers = HeaderMap::new();
    if let Some(token) = ctx.metadata.get(AUTH_BEARER_TOKEN_KEY) {
        let auth_value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|error| {
            ProviderError::protocol(
                provider.clone(),
                format!("invalid bearer token header value: {error}"),
            )
        })?;
        headers.insert(AUTHORIZATION, auth_value);
    }

    for (key, value) in &ctx.metadata {
        if let Some(raw_name) = key.strip_prefix(CUSTOM_HEADER_PREFIX) {
            let header_name = parse_header_name(raw_name, provider)?;
            let header_value = HeaderValue::from_str(value).map_err(|error| {
                ProviderError::protocol(
                    provider.clone(),
                    format!("invalid header value for {raw_name}: {error}"),
                )
            })?;
            headers.insert(header_name, header_value);
        }
    }

    Ok(HeaderConfig {
        headers,
        request_id_header,
    })
}

async fn build_status_error(
    provider: ProviderId,
    status_code: u16,
    request_id: Option<String>,
    response: Response,
) -> ProviderError {
    let message = match response.text().await {
        Ok(body) if !body.trim().is_empty() => body,
        Ok(_) => format!("http status {status_code}"),
        Err(error) => format!("http status {status_code}; failed to read response body: {error}"),
    };

    ProviderError::Status {
        provider,
        status_code,
        request_id,
        message,
    }
}

fn parse_header_name(value: &str, provider: &ProviderId) -> Result<HeaderName, ProviderError> {
    HeaderName::from_bytes(value.as_bytes()).map_err(|error| {
        ProviderError::protocol(
            provider.clone(),
            format!("invalid header name: {value}: {error}"),
        )
    })
}

fn extract_request_id(headers: &HeaderMap, request_id_header: &HeaderName) -> Option<String> {
    headers
        .get(request_id_header)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
