use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::error::ConfigError;

/// Curated phrase translations answered without any network call.
///
/// Keys are matched exactly (case-sensitive, whole string) against the trimmed
/// request text. The table is read-only once built.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhraseTable {
    entries: IndexMap<String, IndexMap<String, String>>,
}

impl PhraseTable {
    pub fn new(entries: IndexMap<String, IndexMap<String, String>>) -> Result<Self, ConfigError> {
        for (phrase, translations) in &entries {
            if phrase.trim().is_empty() {
                return Err(ConfigError::InvalidPhraseTable {
                    reason: "phrase keys must be non-empty".to_string(),
                });
            }
            if phrase.trim() != phrase {
                return Err(ConfigError::InvalidPhraseTable {
                    reason: format!("phrase key has surrounding whitespace: {phrase:?}"),
                });
            }
            if let Some((language, _)) = translations
                .iter()
                .find(|(language, text)| language.trim().is_empty() || text.trim().is_empty())
            {
                return Err(ConfigError::InvalidPhraseTable {
                    reason: format!("blank translation for {phrase:?} in language {language:?}"),
                });
            }
        }

        Ok(Self { entries })
    }

    /// Parses `{"phrase": {"lang": "translation"}}`.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let entries = serde_json::from_str(json).map_err(|error| {
            ConfigError::InvalidPhraseTable {
                reason: error.to_string(),
            }
        })?;
        Self::new(entries)
    }

    /// The demo phrases shipped with the camera translator.
    pub fn builtin() -> Self {
        let entries = BUILTIN_PHRASES
            .iter()
            .map(|(phrase, translations)| {
                let translations = translations
                    .iter()
                    .map(|(language, text)| (language.to_string(), text.to_string()))
                    .collect();
                (phrase.to_string(), translations)
            })
            .collect();

        Self { entries }
    }

    pub fn lookup(&self, text: &str, target_language: &str) -> Option<&str> {
        self.entries
            .get(text.trim())
            .and_then(|translations| translations.get(target_language))
            .map(String::as_str)
    }

    pub fn phrases(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

const BUILTIN_PHRASES: [(&str, [(&str, &str); 10]); 2] = [
    (
        "Hello World",
        [
            ("es", "Hola Mundo"),
            ("fr", "Bonjour le Monde"),
            ("de", "Hallo Welt"),
            ("it", "Ciao Mondo"),
            ("pt", "Olá Mundo"),
            ("ru", "Привет Мир"),
            ("ja", "こんにちは世界"),
            ("ko", "안녕하세요 세계"),
            ("zh", "你好世界"),
            ("ar", "مرحبا بالعالم"),
        ],
    ),
    (
        "Good morning",
        [
            ("es", "Buenos días"),
            ("fr", "Bonjour"),
            ("de", "Guten Morgen"),
            ("it", "Buongiorno"),
            ("pt", "Bom dia"),
            ("ru", "Доброе утро"),
            ("ja", "おはようございます"),
            ("ko", "좋은 아침"),
            ("zh", "早上好"),
            ("ar", "صباح الخير"),
        ],
    ),
];
