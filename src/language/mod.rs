//! Script/diacritic language guessing and the supported-language list.
//!
//! Detection is a first-match heuristic over an ordered rule list, not a classifier.
//! Overlapping character classes go to whichever rule comes first: `é` is claimed by
//! Spanish before French sees it, `ä` by French before German, and kanji-only text
//! reads as Chinese because Japanese is only recognised through kana.

use indexmap::IndexMap;

pub const DEFAULT_LANGUAGE: &str = "en";

#[derive(Debug, Clone, Copy)]
pub struct DetectionRule {
    pub language: &'static str,
    pub matches: fn(char) -> bool,
}

#[derive(Debug, Clone)]
pub struct LanguageDetector {
    rules: Vec<DetectionRule>,
}

impl LanguageDetector {
    pub fn new(rules: Vec<DetectionRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[DetectionRule] {
        &self.rules
    }

    /// Returns the language of the first rule any character of `text` satisfies,
    /// or [`DEFAULT_LANGUAGE`].
    pub fn detect(&self, text: &str) -> &'static str {
        self.rules
            .iter()
            .find(|rule| text.chars().any(rule.matches))
            .map(|rule| rule.language)
            .unwrap_or(DEFAULT_LANGUAGE)
    }
}

impl Default for LanguageDetector {
    fn default() -> Self {
        Self::new(vec![
            DetectionRule {
                language: "es",
                matches: is_spanish_mark,
            },
            DetectionRule {
                language: "fr",
                matches: is_french_mark,
            },
            DetectionRule {
                language: "de",
                matches: is_german_mark,
            },
            DetectionRule {
                language: "ru",
                matches: is_cyrillic,
            },
            DetectionRule {
                language: "ja",
                matches: is_kana,
            },
            DetectionRule {
                language: "ko",
                matches: is_hangul,
            },
            DetectionRule {
                language: "zh",
                matches: is_cjk_ideograph,
            },
            DetectionRule {
                language: "ar",
                matches: is_arabic_letter,
            },
        ])
    }
}

/// Shorthand for [`LanguageDetector::default`]`.detect(text)`.
pub fn detect_language(text: &str) -> &'static str {
    LanguageDetector::default().detect(text)
}

fn is_spanish_mark(c: char) -> bool {
    matches!(
        c,
        'ñ' | 'á' | 'é' | 'í' | 'ó' | 'ú' | 'ü' | 'Ñ' | 'Á' | 'É' | 'Í' | 'Ó' | 'Ú' | 'Ü'
    )
}

fn is_french_mark(c: char) -> bool {
    matches!(
        c,
        'à' | 'â'
            | 'ä'
            | 'é'
            | 'è'
            | 'ê'
            | 'ë'
            | 'ï'
            | 'î'
            | 'ô'
            | 'ö'
            | 'ù'
            | 'û'
            | 'ü'
            | 'ÿ'
            | 'ç'
            | 'À'
            | 'Â'
            | 'Ä'
            | 'É'
            | 'È'
            | 'Ê'
            | 'Ë'
            | 'Ï'
            | 'Î'
            | 'Ô'
            | 'Ö'
            | 'Ù'
            | 'Û'
            | 'Ü'
            | 'Ÿ'
            | 'Ç'
    )
}

fn is_german_mark(c: char) -> bool {
    matches!(c, 'ä' | 'ö' | 'ü' | 'ß' | 'Ä' | 'Ö' | 'Ü' | 'ẞ')
}

fn is_cyrillic(c: char) -> bool {
    matches!(c, 'а'..='я' | 'А'..='Я' | 'ё' | 'Ё')
}

fn is_kana(c: char) -> bool {
    matches!(c, '\u{3040}'..='\u{309f}' | '\u{30a0}'..='\u{30ff}')
}

fn is_hangul(c: char) -> bool {
    matches!(c, '\u{ac00}'..='\u{d7a3}')
}

fn is_cjk_ideograph(c: char) -> bool {
    matches!(c, '\u{4e00}'..='\u{9faf}')
}

fn is_arabic_letter(c: char) -> bool {
    matches!(c, '\u{0621}'..='\u{064a}')
}

/// Language codes offered to users, in display order, with English names.
/// `auto` is the source-only sentinel.
pub fn supported_languages() -> IndexMap<&'static str, &'static str> {
    SUPPORTED_LANGUAGES.into_iter().collect()
}

pub fn is_supported(code: &str) -> bool {
    SUPPORTED_LANGUAGES.iter().any(|(known, _)| *known == code)
}

pub fn language_name(code: &str) -> Option<&'static str> {
    SUPPORTED_LANGUAGES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, name)| *name)
}

const SUPPORTED_LANGUAGES: [(&str, &str); 12] = [
    ("auto", "Auto-detect"),
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("zh", "Chinese"),
    ("ar", "Arabic"),
];
