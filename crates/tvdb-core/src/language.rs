//! The fixed set of languages supported by the catalog service

use serde::Serialize;

/// A language the catalog can deliver metadata in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
    /// Two-letter abbreviation, e.g. "en"
    pub abbreviation: &'static str,
    /// Localized display name
    pub name: &'static str,
    /// Numeric id used by the service
    pub id: u32,
}

/// The supported languages, keyed by abbreviation. This table is fixed by
/// the service and never changes at runtime.
pub const LANGUAGES: [Language; 23] = [
    Language { abbreviation: "cs", name: "čeština", id: 28 },
    Language { abbreviation: "da", name: "Dansk", id: 10 },
    Language { abbreviation: "de", name: "Deutsch", id: 14 },
    Language { abbreviation: "el", name: "Ελληνικά", id: 20 },
    Language { abbreviation: "en", name: "English", id: 7 },
    Language { abbreviation: "es", name: "Español", id: 16 },
    Language { abbreviation: "fi", name: "Suomeksi", id: 11 },
    Language { abbreviation: "fr", name: "Français", id: 17 },
    Language { abbreviation: "he", name: "עברית", id: 24 },
    Language { abbreviation: "hr", name: "Hrvatski", id: 31 },
    Language { abbreviation: "hu", name: "Magyar", id: 19 },
    Language { abbreviation: "it", name: "Italiano", id: 15 },
    Language { abbreviation: "ja", name: "日本語", id: 25 },
    Language { abbreviation: "ko", name: "한국어", id: 32 },
    Language { abbreviation: "nl", name: "Nederlands", id: 13 },
    Language { abbreviation: "no", name: "Norsk", id: 9 },
    Language { abbreviation: "pl", name: "Polski", id: 18 },
    Language { abbreviation: "pt", name: "Português", id: 26 },
    Language { abbreviation: "ru", name: "русский язык", id: 22 },
    Language { abbreviation: "sl", name: "Slovenski", id: 30 },
    Language { abbreviation: "sv", name: "Svenska", id: 8 },
    Language { abbreviation: "tr", name: "Türkçe", id: 21 },
    Language { abbreviation: "zh", name: "中文", id: 27 },
];

impl Language {
    /// Look a language up by its two-letter abbreviation
    pub fn get(abbreviation: &str) -> Option<&'static Language> {
        LANGUAGES.iter().find(|l| l.abbreviation == abbreviation)
    }

    /// Whether the abbreviation names a supported language. Note that the
    /// "all" pseudo-language accepted by search is not part of the table.
    pub fn is_supported(abbreviation: &str) -> bool {
        Self::get(abbreviation).is_some()
    }
}
