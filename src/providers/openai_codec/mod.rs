use serde::Serialize;
use serde_json::Value;

use crate::core::error::ProviderError;
use crate::core::types::{ProviderId, TranslationRequest};
use crate::providers::codec_contract::{ProviderCodec, extract_text_at, value_to_string};

pub(crate) const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
pub(crate) const DEFAULT_MAX_TOKENS: u32 = 150;
pub(crate) const DEFAULT_TEMPERATURE: f64 = 0.3;

const RESPONSE_TEXT_PATH: [&str; 4] = ["choices", "0", "message", "content"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct OpenAiChatRequest {
    pub model: String,
    pub messages: Vec<OpenAiChatMessage>,
    pub max_tokens: u32,
    pub temperature: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct OpenAiChatMessage {
    pub role: &'static str,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OpenAiErrorEnvelope {
    pub message: String,
    pub code: Option<String>,
    pub error_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct OpenAiCodec {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl Default for OpenAiCodec {
    fn default() -> Self {
        Self {
            model: DEFAULT_OPENAI_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl ProviderCodec for OpenAiCodec {
    type RequestPayload = OpenAiChatRequest;

    fn encode_request(
        &self,
        req: &TranslationRequest,
    ) -> Result<Self::RequestPayload, ProviderError> {
        if self.model.trim().is_empty() {
            return Err(ProviderError::protocol(
                ProviderId::Openai,
                "openai model must be non-empty",
            ));
        }

        Ok(OpenAiChatRequest {
            model: self.model.clone(),
            messages: vec![
                OpenAiChatMessage {
                    role: "system",
                    content: system_prompt(req.source_language(), req.target_language()),
                },
                OpenAiChatMessage {
                    role: "user",
                    content: req.text().to_string(),
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        })
    }

    fn decode_response(&self, payload: &Value) -> Result<String, ProviderError> {
        extract_text_at(ProviderId::Openai, payload, &RESPONSE_TEXT_PATH)
    }
}

fn system_prompt(source_language: &str, target_language: &str) -> String {
    format!(
        "You are a professional translator. Translate the following text from {source_language} to {target_language}. Only respond with the translation, no additional text."
    )
}

pub(crate) fn parse_openai_error_envelope(body: &str) -> Option<OpenAiErrorEnvelope> {
    let payload = serde_json::from_str::<Value>(body).ok()?;
    let error = payload.as_object()?.get("error")?.as_object()?;
    let message = value_to_string(error.get("message"))
        .unwrap_or_else(|| "openai response reported an error".to_string());

    Some(OpenAiErrorEnvelope {
        message,
        code: value_to_string(error.get("code")),
        error_type: value_to_string(error.get("type")),
    })
}

pub(crate) fn format_openai_error_message(envelope: &OpenAiErrorEnvelope) -> String {
    let mut context = Vec::new();

    if let Some(code) = &envelope.code {
        context.push(format!("code={code}"));
    }
    if let Some(error_type) = &envelope.error_type {
        context.push(format!("type={error_type}"));
    }

    if context.is_empty() {
        format!("openai error: {}", envelope.message)
    } else {
        format!(
            "openai error: {} [{}]",
            envelope.message,
            context.join(", ")
        )
    }
}
