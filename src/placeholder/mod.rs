/// Prefix used when the target language has no tag of its own.
pub const GENERIC_TAG: &str = "[TRANSLATED]";

const LANGUAGE_TAGS: [(&str, &str); 10] = [
    ("es", "[ES]"),
    ("fr", "[FR]"),
    ("de", "[DE]"),
    ("it", "[IT]"),
    ("pt", "[PT]"),
    ("ru", "[RU]"),
    ("ja", "[JA]"),
    ("ko", "[KO]"),
    ("zh", "[ZH]"),
    ("ar", "[AR]"),
];

/// Bracketed tag for a target language, if it has one. Matching is exact.
pub fn language_tag(target_language: &str) -> Option<&'static str> {
    LANGUAGE_TAGS
        .iter()
        .find(|(code, _)| *code == target_language)
        .map(|(_, tag)| *tag)
}

/// Last-resort output of the fallback chain: `"<tag> <text>"`.
///
/// The tag is always present, so the result is never empty.
pub fn placeholder(text: &str, target_language: &str) -> String {
    let tag = language_tag(target_language).unwrap_or(GENERIC_TAG);
    format!("{tag} {text}")
}
