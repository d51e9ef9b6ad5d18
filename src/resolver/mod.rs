use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::core::error::{ProviderError, RequestError};
use crate::core::traits::ProviderAdapter;
use crate::core::types::{
    AdapterContext, DEFAULT_MAX_TEXT_LENGTH, TranslationOrigin, TranslationRequest,
    TranslationResult,
};
use crate::phrase_table::PhraseTable;
use crate::placeholder;
use crate::registry::ProviderRegistry;
use crate::transport::http::DEFAULT_TIMEOUT_MS;

/// Three-tier translation policy: exact phrase-table match, then each registered
/// provider in order, then a tagged placeholder.
///
/// Resolution never fails once a request is valid. Provider errors (missing credentials
/// included), blank outputs and attempt timeouts are logged as warnings and treated as
/// "no result". Each adapter is tried at most once per request.
pub struct TranslationResolver {
    phrase_table: Option<Arc<PhraseTable>>,
    registry: Arc<ProviderRegistry>,
    adapter_context: AdapterContext,
    attempt_timeout: Duration,
    max_text_length: usize,
}

pub struct TranslationResolverBuilder {
    adapters: Vec<Arc<dyn ProviderAdapter>>,
    phrase_table: Option<Arc<PhraseTable>>,
    adapter_context: AdapterContext,
    attempt_timeout: Duration,
    max_text_length: usize,
}

impl TranslationResolver {
    /// Starts from the built-in phrase table, no providers and a 10 s attempt timeout.
    pub fn builder() -> TranslationResolverBuilder {
        TranslationResolverBuilder {
            adapters: Vec::new(),
            phrase_table: Some(Arc::new(PhraseTable::builtin())),
            adapter_context: AdapterContext::default(),
            attempt_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            max_text_length: DEFAULT_MAX_TEXT_LENGTH,
        }
    }

    /// Validates the raw inputs into a [`TranslationRequest`] and resolves it.
    pub async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<TranslationResult, RequestError> {
        let request = TranslationRequest::new(
            text,
            source_language,
            target_language,
            self.max_text_length,
        )?;
        Ok(self.resolve(&request).await)
    }

    pub async fn resolve(&self, request: &TranslationRequest) -> TranslationResult {
        let target_language = request.target_language();

        if let Some(translated) = self
            .phrase_table
            .as_deref()
            .and_then(|table| table.lookup(request.text(), target_language))
        {
            debug!(target_language, "phrase table hit");
            return TranslationResult {
                translated_text: translated.to_string(),
                origin: TranslationOrigin::PhraseTable,
            };
        }

        for adapter in self.registry.iter() {
            let provider = adapter.id();
            let attempt = tokio::time::timeout(
                self.attempt_timeout,
                adapter.translate(request, &self.adapter_context),
            )
            .await;

            let error = match attempt {
                Ok(Ok(output)) => {
                    let output = output.trim();
                    if !output.is_empty() {
                        return TranslationResult {
                            translated_text: output.to_string(),
                            origin: TranslationOrigin::Provider(provider),
                        };
                    }
                    ProviderError::protocol(provider, "provider returned empty translation")
                }
                Ok(Err(error)) => error,
                Err(_) => ProviderError::Timeout {
                    provider,
                    timeout_ms: self.attempt_timeout_ms(),
                },
            };

            warn!(provider = %error.provider(), error = %error, "translation provider failed");
        }

        debug!(target_language, "no provider produced a translation, using placeholder");
        TranslationResult {
            translated_text: placeholder::placeholder(request.text(), target_language),
            origin: TranslationOrigin::Placeholder,
        }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub fn phrase_table(&self) -> Option<&PhraseTable> {
        self.phrase_table.as_deref()
    }

    pub fn attempt_timeout(&self) -> Duration {
        self.attempt_timeout
    }

    pub fn max_text_length(&self) -> usize {
        self.max_text_length
    }

    fn attempt_timeout_ms(&self) -> u64 {
        u64::try_from(self.attempt_timeout.as_millis()).unwrap_or(u64::MAX)
    }
}

impl TranslationResolverBuilder {
    pub fn with_adapter(mut self, adapter: Arc<dyn ProviderAdapter>) -> Self {
        self.adapters.push(adapter);
        self
    }

    pub fn with_phrase_table(mut self, phrase_table: PhraseTable) -> Self {
        self.phrase_table = Some(Arc::new(phrase_table));
        self
    }

    pub fn without_phrase_table(mut self) -> Self {
        self.phrase_table = None;
        self
    }

    pub fn with_adapter_context(mut self, adapter_context: AdapterContext) -> Self {
        self.adapter_context = adapter_context;
        self
    }

    pub fn with_attempt_timeout(mut self, attempt_timeout: Duration) -> Self {
        self.attempt_timeout = attempt_timeout;
        self
    }

    pub fn with_max_text_length(mut self, max_text_length: usize) -> Self {
        self.max_text_length = max_text_length;
        self
    }

    pub fn build(self) -> TranslationResolver {
        let mut registry = ProviderRegistry::new();
        for adapter in self.adapters {
            registry.register(adapter);
        }

        TranslationResolver {
            phrase_table: self.phrase_table,
            registry: Arc::new(registry),
            adapter_context: self.adapter_context,
            attempt_timeout: self.attempt_timeout,
            max_text_length: self.max_text_length,
        }
    }
}
