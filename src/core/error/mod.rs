use crate::core::types::ProviderId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid timeout: {timeout_ms} ms")]
    InvalidTimeout { timeout_ms: u64 },
    #[error("invalid max text length: {max_text_length}")]
    InvalidMaxTextLength { max_text_length: usize },
    #[error("invalid provider config for {provider}: {reason}")]
    InvalidProviderConfig {
        provider: ProviderId,
        reason: String,
    },
    #[error("unknown provider: {name}")]
    UnknownProvider { name: String },
    #[error("provider listed more than once: {provider}")]
    DuplicateProvider { provider: ProviderId },
    #[error("invalid phrase table: {reason}")]
    InvalidPhraseTable { reason: String },
    #[error("failed to build http client: {reason}")]
    HttpClient { reason: String },
    #[error("invalid value for {key}: {value:?}")]
    InvalidEnvValue { key: String, value: String },
}

/// Input rejected before it reaches the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("text to translate is empty")]
    EmptyText,
    #[error("text is too long: {length} chars exceeds the {max_length} char limit")]
    TextTooLong { length: usize, max_length: usize },
    #[error("target language is empty")]
    EmptyTargetLanguage,
}

/// A single failed adapter attempt. The resolver logs these and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error(
        "provider credential missing{context}",
        context = format_context(Some(.provider), None, None)
    )]
    CredentialMissing { provider: ProviderId },
    #[error(
        "provider transport error{context}: {message}",
        context = format_context(Some(.provider), .request_id.as_deref(), None)
    )]
    Transport {
        provider: ProviderId,
        request_id: Option<String>,
        message: String,
    },
    #[error(
        "provider timed out{context} after {timeout_ms} ms",
        context = format_context(Some(.provider), None, None)
    )]
    Timeout {
        provider: ProviderId,
        timeout_ms: u64,
    },
    #[error(
        "provider status error{context}: {message}",
        context = format_context(Some(.provider), .request_id.as_deref(), Some(*.status_code))
    )]
    Status {
        provider: ProviderId,
        status_code: u16,
        request_id: Option<String>,
        message: String,
    },
    #[error(
        "provider protocol error{context}: {message}",
        context = format_context(Some(.provider), .request_id.as_deref(), None)
    )]
    Protocol {
        provider: ProviderId,
        request_id: Option<String>,
        message: String,
    },
    #[error(
        "provider serialization error{context}: {message}",
        context = format_context(Some(.provider), .request_id.as_deref(), None)
    )]
    Serialization {
        provider: ProviderId,
        request_id: Option<String>,
        message: String,
    },
}

impl ProviderError {
    pub fn provider(&self) -> &ProviderId {
        match self {
            Self::CredentialMissing { provider }
            | Self::Transport { provider, .. }
            | Self::Timeout { provider, .. }
            | Self::Status { provider, .. }
            | Self::Protocol { provider, .. }
            | Self::Serialization { provider, .. } => provider,
        }
    }

    pub(crate) fn protocol(provider: ProviderId, message: impl Into<String>) -> Self {
        Self::Protocol {
            provider,
            request_id: None,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("no detected text to translate")]
    NoDetectedText,
    #[error(transparent)]
    Request(#[from] RequestError),
}

fn format_context(
    provider: Option<&ProviderId>,
    request_id: Option<&str>,
    status_code: Option<u16>,
) -> String {
    let mut context = Vec::new();

    if let Some(provider) = provider {
        context.push(format!("provider={provider}"));
    }
    if let Some(request_id) = request_id {
        context.push(format!("request_id={request_id}"));
    }
    if let Some(status_code) = status_code {
        context.push(format!("status_code={status_code}"));
    }

    if context.is_empty() {
        String::new()
    } else {
        format!(" [{}]", context.join(", "))
    }
}
