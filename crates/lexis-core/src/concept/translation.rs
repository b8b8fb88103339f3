use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::LexisError;

/// The closed set of languages a concept is maintained in.
///
/// English is the anchor language: every concept is keyed and deduplicated
/// by its English term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Fr,
    Ar,
}

impl Language {
    /// All supported languages, anchor first.
    pub const ALL: [Language; 3] = [Language::En, Language::Fr, Language::Ar];

    /// ISO 639-1 code.
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fr => "fr",
            Language::Ar => "ar",
        }
    }

    /// Human-readable name, used in generation/translation prompts.
    pub fn name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Fr => "French",
            Language::Ar => "Arabic",
        }
    }

    /// Parse an ISO 639-1 code.
    pub fn from_code(code: &str) -> Result<Self, LexisError> {
        match code {
            "en" => Ok(Language::En),
            "fr" => Ok(Language::Fr),
            "ar" => Ok(Language::Ar),
            other => Err(LexisError::Validation {
                reason: format!("unsupported language code '{other}'"),
            }),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Lifecycle state of one language slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationStatus {
    /// Not yet translated.
    Pending,
    /// Term present and usable for keyword fetch.
    Translated,
    /// Translation attempt failed; term is empty until repaired.
    Failed,
}

/// One language slot: a term plus its translation status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub term: String,
    pub status: TranslationStatus,
}

impl Translation {
    /// A successfully translated term.
    pub fn translated(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            status: TranslationStatus::Translated,
        }
    }

    /// An empty slot awaiting translation.
    pub fn pending() -> Self {
        Self {
            term: String::new(),
            status: TranslationStatus::Pending,
        }
    }

    /// A failed translation attempt. The term stays empty.
    pub fn failed() -> Self {
        Self {
            term: String::new(),
            status: TranslationStatus::Failed,
        }
    }

    pub fn is_translated(&self) -> bool {
        self.status == TranslationStatus::Translated
    }
}

/// Fixed-size mapping over the closed language set — one slot per language,
/// not an open dictionary.
///
/// The English slot is always `Translated` once the concept exists, seeded
/// from the concept's `english_term`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationSet {
    pub en: Translation,
    pub fr: Translation,
    pub ar: Translation,
}

impl TranslationSet {
    /// Seed a set from the English anchor term; other slots start pending.
    pub fn seeded(english_term: impl Into<String>) -> Self {
        Self {
            en: Translation::translated(english_term),
            fr: Translation::pending(),
            ar: Translation::pending(),
        }
    }

    pub fn get(&self, language: Language) -> &Translation {
        match language {
            Language::En => &self.en,
            Language::Fr => &self.fr,
            Language::Ar => &self.ar,
        }
    }

    pub fn get_mut(&mut self, language: Language) -> &mut Translation {
        match language {
            Language::En => &mut self.en,
            Language::Fr => &mut self.fr,
            Language::Ar => &mut self.ar,
        }
    }

    pub fn set(&mut self, language: Language, translation: Translation) {
        *self.get_mut(language) = translation;
    }

    /// Iterate slots in anchor-first order.
    pub fn iter(&self) -> impl Iterator<Item = (Language, &Translation)> {
        Language::ALL.iter().map(move |&l| (l, self.get(l)))
    }
}
