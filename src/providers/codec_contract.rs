use serde_json::Value;

use crate::core::error::ProviderError;
use crate::core::types::{ProviderId, TranslationRequest};

/// Internal provider-layer codec contract.
///
/// `ProviderAdapter` stays the resolver-facing extension point (auth, transport).
/// This contract is crate-private and used by provider modules to turn a
/// `TranslationRequest` into a provider payload and pull the translated text back out.
pub(crate) trait ProviderCodec {
    /// Provider protocol payload used for outbound request encoding.
    type RequestPayload;

    /// Encodes a translation request into a provider protocol payload.
    fn encode_request(
        &self,
        req: &TranslationRequest,
    ) -> Result<Self::RequestPayload, ProviderError>;

    /// Extracts the translated text from a provider response body.
    fn decode_response(&self, payload: &Value) -> Result<String, ProviderError>;
}

/// Walks `path` through nested objects and arrays (`"0"` indexes an array) and
/// returns the trimmed, non-empty string found at the end.
pub(crate) fn extract_text_at(
    provider: ProviderId,
    payload: &Value,
    path: &[&str],
) -> Result<String, ProviderError> {
    let mut current = payload;
    for (depth, segment) in path.iter().enumerate() {
        let next = match current {
            Value::Object(map) => map.get(*segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        };

        current = next.ok_or_else(|| {
            ProviderError::protocol(
                provider.clone(),
                format!("response missing {}", path[..=depth].join(".")),
            )
        })?;
    }

    let text = current.as_str().ok_or_else(|| {
        ProviderError::protocol(
            provider.clone(),
            format!("response field {} is not a string", path.join(".")),
        )
    })?;

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ProviderError::protocol(
            provider,
            format!("response field {} is empty", path.join(".")),
        ));
    }

    Ok(trimmed.to_string())
}

/// Reads a string field from a JSON object, ignoring blank values.
pub(crate) fn value_to_string(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Some(Value::Number(number)) => Some(number.to_string()),
        Some(Value::Bool(flag)) => Some(flag.to_string()),
        _ => None,
    }
}
