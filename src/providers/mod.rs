pub mod anthropic;
pub(crate) mod anthropic_codec;
pub(crate) mod codec_contract;
pub mod google_translate;
pub(crate) mod google_translate_codec;
pub mod openai;
pub(crate) mod openai_codec;

pub(crate) fn normalize_base_url(base_url: impl Into<String>, default_base_url: &str) -> String {
    let value = base_url.into();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return default_base_url.to_string();
    }

    trimmed.trim_end_matches('/').to_string()
}

/// Blank credentials count as missing.
pub(crate) fn sanitize_api_key(api_key: Option<String>) -> Option<String> {
    api_key.and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
