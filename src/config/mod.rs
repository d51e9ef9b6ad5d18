use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::error::ConfigError;
use crate::core::traits::ProviderAdapter;
use crate::core::types::{DEFAULT_MAX_TEXT_LENGTH, ProviderId};
use crate::providers::anthropic::AnthropicAdapter;
use crate::providers::google_translate::GoogleTranslateAdapter;
use crate::providers::openai::OpenAiAdapter;
use crate::resolver::{TranslationResolver, TranslationResolverBuilder};
use crate::transport::http::{DEFAULT_TIMEOUT_MS, HttpTransport};

pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const ANTHROPIC_API_KEY_ENV: &str = "ANTHROPIC_API_KEY";
pub const GOOGLE_TRANSLATE_API_KEY_ENV: &str = "GOOGLE_TRANSLATE_API_KEY";
pub const OPENAI_BASE_URL_ENV: &str = "OPENAI_BASE_URL";
pub const ANTHROPIC_BASE_URL_ENV: &str = "ANTHROPIC_BASE_URL";
pub const GOOGLE_TRANSLATE_BASE_URL_ENV: &str = "GOOGLE_TRANSLATE_BASE_URL";
pub const DEFAULT_TARGET_LANGUAGE_ENV: &str = "DEFAULT_TARGET_LANGUAGE";
pub const ENABLE_FALLBACK_TRANSLATIONS_ENV: &str = "ENABLE_FALLBACK_TRANSLATIONS";
pub const REQUEST_TIMEOUT_MS_ENV: &str = "TRANSLATOR_REQUEST_TIMEOUT_MS";
pub const MAX_TEXT_LENGTH_ENV: &str = "TRANSLATOR_MAX_TEXT_LENGTH";
pub const PROVIDER_ORDER_ENV: &str = "TRANSLATOR_PROVIDER_ORDER";

fn default_target_language() -> String {
    "es".to_string()
}

fn default_enable_phrase_table() -> bool {
    true
}

fn default_request_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_max_text_length() -> usize {
    DEFAULT_MAX_TEXT_LENGTH
}

fn default_provider_order() -> Vec<String> {
    vec![
        ProviderId::Openai.to_string(),
        ProviderId::Anthropic.to_string(),
        ProviderId::GoogleTranslate.to_string(),
    ]
}

/// Everything needed to assemble a [`TranslationResolver`].
///
/// Credentials are plain fields handed to adapter constructors; nothing below this
/// layer reads the environment.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub google_translate_api_key: Option<String>,
    pub openai_base_url: Option<String>,
    pub anthropic_base_url: Option<String>,
    pub google_translate_base_url: Option<String>,
    #[serde(default = "default_target_language")]
    pub default_target_language: String,
    #[serde(default = "default_enable_phrase_table")]
    pub enable_phrase_table: bool,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default = "default_max_text_length")]
    pub max_text_length: usize,
    #[serde(default = "default_provider_order")]
    pub provider_order: Vec<String>,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            anthropic_api_key: None,
            google_translate_api_key: None,
            openai_base_url: None,
            anthropic_base_url: None,
            google_translate_base_url: None,
            default_target_language: default_target_language(),
            enable_phrase_table: default_enable_phrase_table(),
            request_timeout_ms: default_request_timeout_ms(),
            max_text_length: default_max_text_length(),
            provider_order: default_provider_order(),
        }
    }
}

// Credentials stay out of debug output.
impl std::fmt::Debug for TranslatorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslatorConfig")
            .field("openai_api_key", &redact(&self.openai_api_key))
            .field("anthropic_api_key", &redact(&self.anthropic_api_key))
            .field(
                "google_translate_api_key",
                &redact(&self.google_translate_api_key),
            )
            .field("openai_base_url", &self.openai_base_url)
            .field("anthropic_base_url", &self.anthropic_base_url)
            .field("google_translate_base_url", &self.google_translate_base_url)
            .field("default_target_language", &self.default_target_language)
            .field("enable_phrase_table", &self.enable_phrase_table)
            .field("request_timeout_ms", &self.request_timeout_ms)
            .field("max_text_length", &self.max_text_length)
            .field("provider_order", &self.provider_order)
            .finish()
    }
}

fn redact(value: &Option<String>) -> Option<&'static str> {
    value.as_ref().map(|_| "<redacted>")
}

impl TranslatorConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Overlays values found through `lookup` on the defaults. Blank values are
    /// treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self {
            openai_api_key: lookup(OPENAI_API_KEY_ENV),
            anthropic_api_key: lookup(ANTHROPIC_API_KEY_ENV),
            google_translate_api_key: lookup(GOOGLE_TRANSLATE_API_KEY_ENV),
            openai_base_url: lookup(OPENAI_BASE_URL_ENV),
            anthropic_base_url: lookup(ANTHROPIC_BASE_URL_ENV),
            google_translate_base_url: lookup(GOOGLE_TRANSLATE_BASE_URL_ENV),
            ..Self::default()
        };

        if let Some(target_language) = lookup(DEFAULT_TARGET_LANGUAGE_ENV) {
            config.default_target_language = target_language;
        }
        if let Some(flag) = lookup(ENABLE_FALLBACK_TRANSLATIONS_ENV) {
            config.enable_phrase_table = flag != "false";
        }
        if let Some(value) = lookup(REQUEST_TIMEOUT_MS_ENV) {
            config.request_timeout_ms = parse_number(REQUEST_TIMEOUT_MS_ENV, value)?;
        }
        if let Some(value) = lookup(MAX_TEXT_LENGTH_ENV) {
            config.max_text_length = parse_number(MAX_TEXT_LENGTH_ENV, value)?;
        }
        if let Some(order) = lookup(PROVIDER_ORDER_ENV) {
            config.provider_order = order
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(ToString::to_string)
                .collect();
        }

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout {
                timeout_ms: self.request_timeout_ms,
            });
        }
        if self.max_text_length == 0 {
            return Err(ConfigError::InvalidMaxTextLength {
                max_text_length: self.max_text_length,
            });
        }
        self.providers().map(|_| ())
    }

    /// Parses `provider_order` into provider ids, rejecting unknown and repeated names.
    pub fn providers(&self) -> Result<Vec<ProviderId>, ConfigError> {
        let mut providers: Vec<ProviderId> = Vec::with_capacity(self.provider_order.len());
        for name in &self.provider_order {
            let provider = ProviderId::from_name(name)
                .ok_or_else(|| ConfigError::UnknownProvider { name: name.clone() })?;
            if providers.contains(&provider) {
                return Err(ConfigError::DuplicateProvider { provider });
            }
            providers.push(provider);
        }
        Ok(providers)
    }

    pub fn resolver_builder(&self) -> Result<TranslationResolverBuilder, ConfigError> {
        self.validate()?;

        let transport = HttpTransport::new(self.request_timeout_ms)?;
        let mut builder = TranslationResolver::builder()
            .with_attempt_timeout(Duration::from_millis(self.request_timeout_ms))
            .with_max_text_length(self.max_text_length);
        if !self.enable_phrase_table {
            builder = builder.without_phrase_table();
        }

        for provider in self.providers()? {
            builder = builder.with_adapter(self.build_adapter(&provider, transport.clone())?);
        }

        Ok(builder)
    }

    pub fn build_resolver(&self) -> Result<TranslationResolver, ConfigError> {
        Ok(self.resolver_builder()?.build())
    }

    fn build_adapter(
        &self,
        provider: &ProviderId,
        transport: HttpTransport,
    ) -> Result<Arc<dyn ProviderAdapter>, ConfigError> {
        let adapter: Arc<dyn ProviderAdapter> = match provider {
            ProviderId::Openai => Arc::new(OpenAiAdapter::with_transport(
                self.openai_api_key.clone(),
                self.openai_base_url.clone().unwrap_or_default(),
                transport,
            )),
            ProviderId::Anthropic => Arc::new(AnthropicAdapter::with_transport(
                self.anthropic_api_key.clone(),
                self.anthropic_base_url.clone().unwrap_or_default(),
                transport,
            )),
            ProviderId::GoogleTranslate => Arc::new(GoogleTranslateAdapter::with_transport(
                self.google_translate_api_key.clone(),
                self.google_translate_base_url.clone().unwrap_or_default(),
                transport,
            )),
            ProviderId::Custom(name) => {
                return Err(ConfigError::UnknownProvider { name: name.clone() });
            }
        };
        Ok(adapter)
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: String) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidEnvValue {
        key: key.to_string(),
        value,
    })
}
