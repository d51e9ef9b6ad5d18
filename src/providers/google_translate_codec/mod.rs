use serde::Serialize;
use serde_json::Value;

use crate::core::error::ProviderError;
use crate::core::types::{ProviderId, TranslationRequest};
use crate::providers::codec_contract::{ProviderCodec, extract_text_at, value_to_string};

const RESPONSE_TEXT_PATH: [&str; 4] = ["data", "translations", "0", "translatedText"];

/// Body for the v2 `translate` endpoint. The API key travels in the body, not a header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct GoogleTranslateRequest {
    pub q: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub target: String,
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct GoogleErrorEnvelope {
    pub message: String,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct GoogleCodec {
    pub api_key: String,
}

impl ProviderCodec for GoogleCodec {
    type RequestPayload = GoogleTranslateRequest;

    fn encode_request(
        &self,
        req: &TranslationRequest,
    ) -> Result<Self::RequestPayload, ProviderError> {
        let source = if req.is_auto_source() {
            None
        } else {
            Some(req.source_language().to_string())
        };

        Ok(GoogleTranslateRequest {
            q: req.text().to_string(),
            source,
            target: req.target_language().to_string(),
            key: self.api_key.clone(),
        })
    }

    fn decode_response(&self, payload: &Value) -> Result<String, ProviderError> {
        extract_text_at(ProviderId::GoogleTranslate, payload, &RESPONSE_TEXT_PATH)
    }
}

pub(crate) fn parse_google_error_envelope(body: &str) -> Option<GoogleErrorEnvelope> {
    let payload = serde_json::from_str::<Value>(body).ok()?;
    let error = payload.as_object()?.get("error")?.as_object()?;

    Some(GoogleErrorEnvelope {
        message: value_to_string(error.get("message"))?,
        status: value_to_string(error.get("status")),
    })
}

pub(crate) fn format_google_error_message(envelope: &GoogleErrorEnvelope) -> String {
    match &envelope.status {
        Some(status) => format!("google translate error: {} [status={status}]", envelope.message),
        None => format!("google translate error: {}", envelope.message),
    }
}
