use std::collections::HashSet;
use std::num::IntErrorKind;

use anyhow::anyhow;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

pub const BASE_LANGUAGE: &str = "en";

static LANG_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]{2,3}(?:-[A-Za-z0-9]{2,8})*$").expect("lang code regex"));

const BUILTIN_LANGUAGES: [(&str, &str); 9] = [
    ("en", "English"),
    ("zh-CN", "Mandarin Chinese"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("ar", "Modern Standard Arabic"),
    ("pt", "Portuguese"),
    ("id", "Indonesian"),
    ("de", "German"),
    ("tr", "Turkish"),
];

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Language {
    pub code: String,
    pub name: String,
}

impl Language {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// Ordered, immutable list of chain languages.
///
/// Codes are unique and the base language is always a member.
#[derive(Clone, Debug)]
pub struct LanguageCatalog {
    languages: Vec<Language>,
}

impl LanguageCatalog {
    pub fn builtin() -> Self {
        Self {
            languages: BUILTIN_LANGUAGES
                .iter()
                .map(|(code, name)| Language::new(*code, *name))
                .collect(),
        }
    }

    pub fn from_entries(entries: Vec<Language>, base_language: &str) -> anyhow::Result<Self> {
        if entries.is_empty() {
            return Err(anyhow!("language catalog is empty"));
        }
        let mut seen: HashSet<&str> = HashSet::new();
        for lang in &entries {
            let code = lang.code.as_str();
            if !LANG_CODE_RE.is_match(code) {
                return Err(anyhow!("invalid language code in catalog: {code:?}"));
            }
            if !seen.insert(code) {
                return Err(anyhow!("duplicate language code in catalog: {code}"));
            }
        }
        if !seen.contains(base_language) {
            return Err(anyhow!(
                "base language {base_language} is not in the language catalog"
            ));
        }
        Ok(Self { languages: entries })
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Language> {
        self.languages.iter()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.languages.iter().any(|l| l.code == code)
    }

    pub fn display_name(&self, code: &str) -> Option<&str> {
        self.languages
            .iter()
            .find(|l| l.code == code)
            .map(|l| l.name.as_str())
    }

    /// First `min(n, len)` languages in catalog order. `None` and `Some(0)` select everything.
    #[must_use]
    pub fn select(&self, n: Option<usize>) -> Vec<Language> {
        let keep = match n {
            Some(n) if n > 0 => n.min(self.languages.len()),
            _ => self.languages.len(),
        };
        self.languages[..keep].to_vec()
    }
}

impl Default for LanguageCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LanguageCount {
    Valid(usize),
    NonPositive(i64),
    Invalid(String),
}

pub fn parse_language_count(raw: &str) -> LanguageCount {
    let trimmed = raw.trim();
    match trimmed.parse::<i64>() {
        Ok(n) if n > 0 => LanguageCount::Valid(usize::try_from(n).unwrap_or(usize::MAX)),
        Ok(n) => LanguageCount::NonPositive(n),
        // Out-of-range integers are still integers: huge counts clamp to the whole catalog.
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => LanguageCount::Valid(usize::MAX),
            IntErrorKind::NegOverflow => LanguageCount::NonPositive(i64::MIN),
            _ => LanguageCount::Invalid(trimmed.to_string()),
        },
    }
}
