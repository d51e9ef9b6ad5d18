use async_trait::async_trait;
use serde_json::Value;

use crate::core::error::{ConfigError, ProviderError};
use crate::core::traits::ProviderAdapter;
use crate::core::types::{AdapterContext, ProviderId, TranslationRequest};
use crate::providers::codec_contract::ProviderCodec;
use crate::providers::google_translate_codec::{
    GoogleCodec, format_google_error_message, parse_google_error_envelope,
};
use crate::providers::{normalize_base_url, sanitize_api_key};
use crate::transport::http::{DEFAULT_TIMEOUT_MS, HttpTransport};

const GOOGLE_TRANSLATE_DEFAULT_BASE_URL: &str = "https://translation.googleapis.com";

pub struct GoogleTranslateAdapter {
    transport: HttpTransport,
    base_url: String,
    api_key: Option<String>,
}

impl GoogleTranslateAdapter {
    pub fn new(api_key: Option<String>) -> Result<Self, ConfigError> {
        Self::with_base_url(api_key, GOOGLE_TRANSLATE_DEFAULT_BASE_URL)
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
            base_url: normalize_base_url(base_url, GOOGLE_TRANSLATE_DEFAULT_BASE_URL),
            api_key: sanitize_api_key(api_key),
        }
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }

    fn translate_url(&self) -> String {
        format!("{}/language/translate/v2", self.base_url)
    }

    fn normalize_transport_error(error: ProviderError) -> ProviderError {
        match error {
            ProviderError::Status {
                provider,
                status_code,
                request_id,
                message,
            } => {
                let message = parse_google_error_envelope(&message)
                    .map(|envelope| format_google_error_message(&envelope))
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
impl ProviderAdapter for GoogleTranslateAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::GoogleTranslate
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
                provider: ProviderId::GoogleTranslate,
            })?;

        let codec = GoogleCodec { api_key };
        let body = codec.encode_request(req)?;

        let response_body: Value = self
            .transport
            .post_json(ProviderId::GoogleTranslate, &self.translate_url(), &body, ctx)
            .await
            .map_err(Self::normalize_transport_error)?;

        codec.decode_response(&response_body)
    }
}
