use async_trait::async_trait;
use serde_json::Value;

use crate::core::error::{ConfigError, ProviderError};
use crate::core::traits::ProviderAdapter;
use crate::core::types::{AdapterContext, ProviderId, TranslationRequest};
use crate::providers::codec_contract::ProviderCodec;
use crate::providers::openai_codec::{
    OpenAiCodec, format_openai_error_message, parse_openai_error_envelope,
};
use crate::providers::{normalize_base_url, sanitize_api_key};
use crate::transport::http::{AUTH_BEARER_TOKEN_KEY, DEFAULT_TIMEOUT_MS, HttpTransport};

const OPENAI_DEFAULT_BASE_URL: &str = "https://api.openai.com";

pub struct OpenAiAdapter {
    transport: HttpTransport,
    codec: OpenAiCodec,
    base_url: String,
    api_key: Option<String>,
}

impl OpenAiAdapter {
    pub fn new(api_key: Option<String>) -> Result<Self, ConfigError> {
        Self::with_base_url(api_key, OPENAI_DEFAULT_BASE_URL)
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
            codec: OpenAiCodec::default(),
            base_url: normalize_base_url(base_url, OPENAI_DEFAULT_BASE_URL),
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

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.codec.temperature = temperature;
        self
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }

    fn chat_completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }

    fn normalize_transport_error(error: ProviderError) -> ProviderError {
        match error {
            ProviderError::Status {
                provider,
                status_code,
                request_id,
                message,
            } => {
                let message = parse_openai_error_envelope(&message)
                    .map(|envelope| format_openai_error_message(&envelope))
                    .unwrap_or(message);

                ProviderError::Status {
                    provider,
                    status_code,
                    request_id,
                    message,
                }
            }
            other => other,
        }
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Openai
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
                provider: ProviderId::Openai,
            })?;

        let body = self.codec.encode_request(req)?;

        let mut request_ctx = ctx.clone();
        request_ctx
            .metadata
            .insert(AUTH_BEARER_TOKEN_KEY.to_string(), api_key);

        let response_body: Value = self
            .transport
            .post_json(
                ProviderId::Openai,
                &self.chat_completions_url(),
                &body,
                &request_ctx,
            )
            .await
            .map_err(Self::normalize_transport_error)?;

        self.codec.decode_response(&response_body)
    }
}
