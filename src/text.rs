//! Localized alert text.
//!
//! Alert wording is data, not logic: it lives in JSON resources embedded
//! into the binary at compile time and is looked up by key while the
//! policy table is built. Nothing here touches the file system.

use std::collections::HashMap;
use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

const EN_JSON: &str = include_str!("../locales/en.json");
const RU_JSON: &str = include_str!("../locales/ru.json");

const PLACEHOLDER_PATTERN: &str = r"\{([a-z_]+)\}";

/// Supported alert languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    /// English.
    #[default]
    En,
    /// Russian.
    Ru,
}

impl Locale {
    /// Short language tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ru => "ru",
        }
    }

    const fn resource(self) -> &'static str {
        match self {
            Self::En => EN_JSON,
            Self::Ru => RU_JSON,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A text with `{name}` placeholders.
#[derive(Debug, Clone)]
pub struct Template {
    raw: String,
    placeholder: Regex,
}

impl Template {
    /// The unrendered text.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Substitutes placeholders from `values`.
    ///
    /// Placeholders without a value are left verbatim.
    #[must_use]
    pub fn render(&self, values: &[(&str, &str)]) -> String {
        self.placeholder
            .replace_all(&self.raw, |caps: &regex::Captures<'_>| {
                let name = &caps[1];
                values
                    .iter()
                    .find(|(k, _)| *k == name)
                    .map_or_else(|| caps[0].to_string(), |(_, v)| (*v).to_string())
            })
            .into_owned()
    }
}

/// Keyed alert text for one locale.
#[derive(Debug, Clone)]
pub struct TextCatalog {
    locale: Locale,
    texts: HashMap<String, String>,
    placeholder: Regex,
}

impl TextCatalog {
    /// Loads the catalog embedded for `locale`.
    pub fn embedded(locale: Locale) -> Result<Self, ValidationError> {
        Self::from_json(locale, locale.resource())
    }

    /// Parses a catalog from a flat JSON object of key to text.
    pub fn from_json(locale: Locale, json: &str) -> Result<Self, ValidationError> {
        let texts: HashMap<String, String> =
            serde_json::from_str(json).map_err(|e| ValidationError::MalformedCatalog {
                locale: locale.to_string(),
                reason: e.to_string(),
            })?;
        let placeholder =
            Regex::new(PLACEHOLDER_PATTERN).map_err(|e| ValidationError::MalformedCatalog {
                locale: locale.to_string(),
                reason: format!("invalid placeholder pattern: {e}"),
            })?;

        let catalog = Self {
            locale,
            texts,
            placeholder,
        };
        if catalog.is_empty() {
            return Err(ValidationError::MalformedCatalog {
                locale: locale.to_string(),
                reason: "catalog has no entries".to_string(),
            });
        }
        Ok(catalog)
    }

    /// The catalog's locale.
    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    /// Returns true if the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Looks up a text by key.
    pub fn text(&self, key: &str) -> Result<&str, ValidationError> {
        self.texts
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| ValidationError::MissingText {
                locale: self.locale.to_string(),
                key: key.to_string(),
            })
    }

    /// Looks up a text by key as an owned string.
    pub fn owned(&self, key: &str) -> Result<String, ValidationError> {
        self.text(key).map(str::to_string)
    }

    /// Looks up a text by key as a renderable template.
    pub fn template(&self, key: &str) -> Result<Template, ValidationError> {
        Ok(Template {
            raw: self.owned(key)?,
            placeholder: self.placeholder.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn embedded_catalogs_load() {
        let en = TextCatalog::embedded(Locale::En).unwrap();
        let ru = TextCatalog::embedded(Locale::Ru).unwrap();
        assert!(!en.is_empty());
        assert_eq!(en.locale(), Locale::En);
        assert_eq!(ru.locale(), Locale::Ru);
    }

    #[test]
    fn embedded_catalogs_share_keys() {
        let en: HashSet<String> = serde_json::from_str::<HashMap<String, String>>(EN_JSON)
            .unwrap()
            .into_keys()
            .collect();
        let ru: HashSet<String> = serde_json::from_str::<HashMap<String, String>>(RU_JSON)
            .unwrap()
            .into_keys()
            .collect();
        assert_eq!(en, ru);
    }

    #[test]
    fn missing_key_is_reported() {
        let en = TextCatalog::embedded(Locale::En).unwrap();
        let err = en.text("no.such.key").unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingText {
                locale: "en".to_string(),
                key: "no.such.key".to_string(),
            }
        );
    }

    #[test]
    fn empty_catalog_is_rejected() {
        let err = TextCatalog::from_json(Locale::Ru, "{}").unwrap_err();
        assert_eq!(
            err,
            ValidationError::MalformedCatalog {
                locale: "ru".to_string(),
                reason: "catalog has no entries".to_string(),
            }
        );
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = TextCatalog::from_json(Locale::En, "[1, 2]").unwrap_err();
        assert!(matches!(err, ValidationError::MalformedCatalog { .. }));
    }

    #[test]
    fn template_renders_known_placeholders() {
        let catalog =
            TextCatalog::from_json(Locale::En, r#"{"t": "Gas: {gas}%, Steer: {steer}%"}"#).unwrap();
        let t = catalog.template("t").unwrap();
        assert_eq!(t.render(&[("gas", "10"), ("steer", "-5")]), "Gas: 10%, Steer: -5%");
    }

    #[test]
    fn template_keeps_unknown_placeholders() {
        let catalog = TextCatalog::from_json(Locale::En, r#"{"t": "Below {speed} {unit}"}"#).unwrap();
        let t = catalog.template("t").unwrap();
        assert_eq!(t.render(&[("speed", "30")]), "Below 30 {unit}");
        assert_eq!(t.raw(), "Below {speed} {unit}");
    }
}
