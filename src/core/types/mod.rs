use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::error::RequestError;

/// Source-language sentinel that asks providers to detect the language themselves.
pub const AUTO_SOURCE_LANGUAGE: &str = "auto";

pub const DEFAULT_MAX_TEXT_LENGTH: usize = 5_000;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderId {
    Openai,
    Anthropic,
    GoogleTranslate,
    Custom(String),
}

impl ProviderId {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Openai => "openai",
            Self::Anthropic => "anthropic",
            Self::GoogleTranslate => "google-translate",
            Self::Custom(name) => name.as_str(),
        }
    }

    /// Parses one of the built-in provider names. Custom providers are never parsed.
    pub fn from_name(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "openai" => Some(Self::Openai),
            "anthropic" => Some(Self::Anthropic),
            "google-translate" | "google_translate" | "google" => Some(Self::GoogleTranslate),
            _ => None,
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated unit of text to translate.
///
/// Fields are private so a request can only be produced through
/// [`TranslationRequest::new`], which enforces the non-empty and maximum-length rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationRequest {
    text: String,
    source_language: String,
    target_language: String,
}

impl TranslationRequest {
    pub fn new(
        text: impl Into<String>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
        max_text_length: usize,
    ) -> Result<Self, RequestError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(RequestError::EmptyText);
        }

        let length = text.chars().count();
        if length > max_text_length {
            return Err(RequestError::TextTooLong {
                length,
                max_length: max_text_length,
            });
        }

        let target_language = target_language.into().trim().to_string();
        if target_language.is_empty() {
            return Err(RequestError::EmptyTargetLanguage);
        }

        let source_language = source_language.into().trim().to_string();
        let source_language = if source_language.is_empty() {
            AUTO_SOURCE_LANGUAGE.to_string()
        } else {
            source_language
        };

        Ok(Self {
            text,
            source_language,
            target_language,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source_language(&self) -> &str {
        &self.source_language
    }

    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    pub fn is_auto_source(&self) -> bool {
        self.source_language == AUTO_SOURCE_LANGUAGE
    }
}

/// Which tier of the fallback chain produced a translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "provider", rename_all = "snake_case")]
pub enum TranslationOrigin {
    PhraseTable,
    Provider(ProviderId),
    Placeholder,
}

impl fmt::Display for TranslationOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PhraseTable => f.write_str("phrase-table"),
            Self::Provider(provider) => write!(f, "{provider}"),
            Self::Placeholder => f.write_str("placeholder"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub translated_text: String,
    pub origin: TranslationOrigin,
}

/// Per-call metadata handed to adapters. Keys under `transport.` are consumed by
/// [`crate::transport::http::HttpTransport`] to build outbound headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct AdapterContext {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}
