use async_trait::async_trait;
use serde_json::Value;

use crate::core::error::{ConfigError, ProviderError};
use crate::core::traits::ProviderAdapter;
use crate::core::types::{AdapterContext, ProviderId, TranslationRequest};
use crate::providers::anthropic_codec::{
    AnthropicCodec, format_anthropic_error_message, parse_anthropic_error_envelope,
};
use crate::providers::codec_contract::ProviderCodec;
use crate::providers::{normalize_base_url, sanitize_api_key};
use crate::transport::http::{
    CUSTOM_HEADER_PREFIX, DEFAULT_TIMEOUT_MS, HttpTransport, REQUEST_ID_HEADER_KEY,
};

const ANTHROPIC_DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";

pub struct AnthropicAdapter {
    transport: HttpTransport,
    codec: AnthropicCodec,
    base_url: String,
    api_key: Option<String>,
}

impl AnthropicAdapter {
    pub fn new(api_key: Option<String>) -> Result<Self, ConfigError> {
        Self::with_base_url(api_key, ANTHROPIC_DEFAULT_BASE_URL)
    }

    pub fn with_base_url(
        api_key: Option<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let transport = HttpTransport::new(DEFAULT_TIMEOUT_MS)?;
        Ok(Self::with_transport(api_key, base_url, transport))
    }

    pub fn with_transport(
        api_key: Option<String>,
        base_url: impl Into<String>,
        transport: HttpTransport,
    ) -> Self {
        Self {
            transport,
            codec: AnthropicCodec::default(),
            base_url: normalize_base_url(base_url, ANTHROPIC_DEFAULT_BASE_URL),
            api_key: sanitize_api_key(api_key),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.codec.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.codec.max_tokens = max_tokens;
        self
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.base_url)
    }

    fn attach_transport_headers(ctx: &AdapterContext, api_key: String) -> AdapterContext {
        let mut request_ctx = ctx.clone();
        request_ctx
            .metadata
            .insert(format!("{CUSTOM_HEADER_PREFIX}x-api-key"), api_key);
        request_ctx.metadata.insert(
            format!("{CUSTOM_HEADER_PREFIX}anthropic-version"),
            ANTHROPIC_VERSION.to_string(),
        );
        request_ctx
            .metadata
            .insert(REQUEST_ID_HEADER_KEY.to_string(), "request-id".to_string());
        request_ctx
    }

    fn normalize_transport_error(error: ProviderError) -> ProviderError {
        match error {
            ProviderError::Status {
                provider,
                status_code,
                request_id,
                message,
            } => match parse_anthropic_error_envelope(&message) {
                Some(envelope) => ProviderError::Status {
                    provider,
                    status_code,
                    request_id: request_id.or_else(|| envelope.request_id.clone()),
                    message: format_anthropic_error_message(&envelope),
                },
                None => ProviderError::Status {
                    provider,
                    status_code,
                    request_id,
                    message,
                },
            },
            other => other,
        }
    }
}

#[async_trait]
impl ProviderAdapter for AnthropicAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Anthropic
    }

    async fn translate(
        &self,
        req: &TranslationRequest,
        ctx: &AdapterContext,
    ) -> Result<String, ProviderError> {
        let api_key = self
            .api_key
            .clone()
            .ok_or(ProviderError::CredentialMissing {
                provider: ProviderId::Anthropic,
            })?;

        let body = self.codec.encode_request(req)?;
        let request_ctx = Self::attach_transport_headers(ctx, api_key);

        let response_body: Value = self
            .transport
            .post_json(
                ProviderId::Anthropic,
                &self.messages_url(),
                &body,
                &request_ctx,
            )
            .await
            .map_err(Self::normalize_transport_error)?;

        self.codec.decode_response(&response_body)
    }
}
