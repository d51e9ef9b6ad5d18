use serde::Serialize;
use serde_json::Value;

use crate::core::error::ProviderError;
use crate::core::types::{ProviderId, TranslationRequest};
use crate::providers::codec_contract::{ProviderCodec, extract_text_at, value_to_string};

pub(crate) const DEFAULT_ANTHROPIC_MODEL: &str = "claude-3-sonnet-20240229";
pub(crate) const DEFAULT_MAX_TOKENS: u32 = 150;

const RESPONSE_TEXT_PATH: [&str; 3] = ["content", "0", "text"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct AnthropicMessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    pub messages: Vec<AnthropicMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct AnthropicMessage {
    pub role: &'static str,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AnthropicErrorEnvelope {
    pub error_type: Option<String>,
    pub message: String,
    pub request_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AnthropicCodec {
    pub model: String,
    pub max_tokens: u32,
}

impl Default for AnthropicCodec {
    fn default() -> Self {
        Self {
            model: DEFAULT_ANTHROPIC_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl ProviderCodec for AnthropicCodec {
    type RequestPayload = AnthropicMessagesRequest;

    fn encode_request(
        &self,
        req: &TranslationRequest,
    ) -> Result<Self::RequestPayload, ProviderError> {
        if self.model.trim().is_empty() {
            return Err(ProviderError::protocol(
                ProviderId::Anthropic,
                "anthropic model must be non-empty",
            ));
        }
        if self.max_tokens == 0 {
            return Err(ProviderError::protocol(
                ProviderId::Anthropic,
                "anthropic max_tokens must be >= 1",
            ));
        }

        Ok(AnthropicMessagesRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            messages: vec![AnthropicMessage {
                role: "user",
                content: user_prompt(req),
            }],
        })
    }

    fn decode_response(&self, payload: &Value) -> Result<String, ProviderError> {
        extract_text_at(ProviderId::Anthropic, payload, &RESPONSE_TEXT_PATH)
    }
}

fn user_prompt(req: &TranslationRequest) -> String {
    format!(
        "Translate this text from {} to {}. Only respond with the translation: \"{}\"",
        req.source_language(),
        req.target_language(),
        req.text()
    )
}

pub(crate) fn parse_anthropic_error_envelope(body: &str) -> Option<AnthropicErrorEnvelope> {
    let payload = serde_json::from_str::<Value>(body).ok()?;
    let root = payload.as_object()?;

    let error_obj = root.get("error")?.as_object()?;
    let message = value_to_string(error_obj.get("message"))?;

    Some(AnthropicErrorEnvelope {
        error_type: value_to_string(error_obj.get("type")),
        message,
        request_id: value_to_string(root.get("request_id")),
    })
}

pub(crate) fn format_anthropic_error_message(envelope: &AnthropicErrorEnvelope) -> String {
    match &envelope.error_type {
        Some(error_type) => format!("anthropic error: {} [type={error_type}]", envelope.message),
        None => format!("anthropic error: {}", envelope.message),
    }
}
