use std::sync::Arc;

use tracing::debug;

use crate::core::error::SessionError;
use crate::core::types::{AUTO_SOURCE_LANGUAGE, TranslationResult};
use crate::resolver::TranslationResolver;

/// Receives recognized-text events from an external capture source and translates
/// them on demand or automatically.
///
/// Holds the two user settings the resolver depends on (target language and the
/// auto-translate flag) plus the most recent detected text and its translation.
pub struct CaptureSession {
    resolver: Arc<TranslationResolver>,
    target_language: String,
    auto_translate: bool,
    detected_text: Option<String>,
    last_translation: Option<TranslationResult>,
}

impl CaptureSession {
    pub fn new(resolver: Arc<TranslationResolver>, target_language: impl Into<String>) -> Self {
        Self {
            resolver,
            target_language: target_language.into(),
            auto_translate: false,
            detected_text: None,
            last_translation: None,
        }
    }

    pub fn with_auto_translate(mut self, auto_translate: bool) -> Self {
        self.auto_translate = auto_translate;
        self
    }

    /// Accepts one recognized-text event.
    ///
    /// Blank input and repeats of the current text are ignored and return `Ok(None)`.
    /// New text replaces the current text and clears the previous translation; with
    /// auto-translate on it is translated immediately.
    pub async fn handle_detected_text(
        &mut self,
        text: &str,
    ) -> Result<Option<TranslationResult>, SessionError> {
        let text = text.trim();
        if text.is_empty() || self.detected_text.as_deref() == Some(text) {
            return Ok(None);
        }

        debug!(chars = text.chars().count(), "new detected text");
        self.detected_text = Some(text.to_string());
        self.last_translation = None;

        if !self.auto_translate {
            return Ok(None);
        }

        self.translate_current().await.map(Some)
    }

    pub async fn translate_current(&mut self) -> Result<TranslationResult, SessionError> {
        let text = self
            .detected_text
            .as_deref()
            .ok_or(SessionError::NoDetectedText)?;

        let result = self
            .resolver
            .translate(text, AUTO_SOURCE_LANGUAGE, &self.target_language)
            .await?;
        self.last_translation = Some(result.clone());
        Ok(result)
    }

    /// Changing the target invalidates the stored translation but keeps the text.
    pub fn set_target_language(&mut self, target_language: impl Into<String>) {
        self.target_language = target_language.into();
        self.last_translation = None;
    }

    pub fn set_auto_translate(&mut self, auto_translate: bool) {
        self.auto_translate = auto_translate;
    }

    pub fn clear(&mut self) {
        self.detected_text = None;
        self.last_translation = None;
    }

    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    pub fn auto_translate(&self) -> bool {
        self.auto_translate
    }

    pub fn detected_text(&self) -> Option<&str> {
        self.detected_text.as_deref()
    }

    pub fn last_translation(&self) -> Option<&TranslationResult> {
        self.last_translation.as_ref()
    }
}
