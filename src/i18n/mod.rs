//! Localization: locale matching, message lookup and the stored preference

mod catalog;
mod preference;

pub use catalog::Key;
pub use preference::PreferenceStore;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported interface languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    /// English (United States)
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    /// Spanish (Spain)
    #[serde(rename = "es-ES")]
    EsEs,
}

impl Locale {
    /// All locales, in the order they are offered
    pub const ALL: [Locale; 2] = [Locale::EnUs, Locale::EsEs];

    /// BCP 47 tag
    pub fn tag(self) -> &'static str {
        match self {
            Locale::EnUs => "en-US",
            Locale::EsEs => "es-ES",
        }
    }

    /// Name of the language in that language
    pub fn display_name(self) -> &'static str {
        match self {
            Locale::EnUs => "English",
            Locale::EsEs => "Español",
        }
    }

    /// Look up `key`, falling back to English and then to the key name.
    pub fn t(self, key: Key) -> &'static str {
        translate(self, key)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = Error;

    /// Exact tag match only; use [`find_matching_locale`] for lenient matching.
    fn from_str(value: &str) -> Result<Self> {
        Locale::ALL
            .into_iter()
            .find(|locale| locale.tag() == value)
            .ok_or_else(|| Error::Unknown {
                kind: "locale",
                value: value.to_string(),
            })
    }
}

/// Map any language tag onto a supported locale.
///
/// Exact tag first, then the first locale sharing the language subtag,
/// then `en-US`. POSIX forms such as `es_ES.UTF-8` are accepted.
pub fn find_matching_locale(tag: &str) -> Locale {
    let normalized = tag
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .trim()
        .replace('_', "-");

    if let Ok(exact) = normalized.parse::<Locale>() {
        return exact;
    }

    let lang = normalized.split('-').next().unwrap_or_default();
    let prefix = format!("{lang}-");
    Locale::ALL
        .into_iter()
        .find(|locale| locale.tag().starts_with(&prefix))
        .unwrap_or_default()
}

/// Translate `key` for `locale`
pub fn translate(locale: Locale, key: Key) -> &'static str {
    catalog::lookup(locale, key)
        .or_else(|| catalog::lookup(Locale::EnUs, key))
        .unwrap_or_else(|| key.as_str())
}

/// Locale tag advertised by the environment, if any
pub fn system_locale_tag<F>(lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .into_iter()
        .filter_map(lookup)
        .find(|value| !value.is_empty() && value != "C" && value != "POSIX")
}

/// Pick the active locale.
///
/// Precedence: explicit choice, stored preference, configured locale,
/// system locale, `en-US`.
pub fn resolve_locale(
    explicit: Option<&str>,
    stored: Option<&str>,
    configured: Option<&str>,
    system: Option<&str>,
) -> Locale {
    explicit
        .or(stored)
        .or(configured)
        .or(system)
        .map(find_matching_locale)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn exact_and_language_matches() {
        assert_eq!(find_matching_locale("es-ES"), Locale::EsEs);
        assert_eq!(find_matching_locale("es-MX"), Locale::EsEs);
        assert_eq!(find_matching_locale("es"), Locale::EsEs);
        assert_eq!(find_matching_locale("en-GB"), Locale::EnUs);
    }

    #[test]
    fn unknown_languages_fall_back_to_english() {
        assert_eq!(find_matching_locale("zh-CN"), Locale::EnUs);
        assert_eq!(find_matching_locale(""), Locale::EnUs);
        assert_eq!(find_matching_locale("e"), Locale::EnUs);
    }

    #[test]
    fn posix_tags_are_normalized() {
        assert_eq!(find_matching_locale("es_ES.UTF-8"), Locale::EsEs);
        assert_eq!(find_matching_locale("es_AR@euro"), Locale::EsEs);
    }

    #[test]
    fn translation_falls_back_to_english() {
        assert_eq!(translate(Locale::EsEs, Key::Download), "Descargar");
        assert_eq!(
            translate(Locale::EsEs, Key::ShareError),
            translate(Locale::EnUs, Key::ShareError)
        );
        assert_eq!(Locale::EnUs.t(Key::CopyData), "Copy Data");
    }

    #[test]
    fn resolution_precedence() {
        assert_eq!(
            resolve_locale(Some("en-US"), Some("es-ES"), None, None),
            Locale::EnUs
        );
        assert_eq!(
            resolve_locale(None, Some("es-ES"), Some("en-US"), None),
            Locale::EsEs
        );
        assert_eq!(resolve_locale(None, None, None, Some("es_ES.UTF-8")), Locale::EsEs);
        assert_eq!(resolve_locale(None, None, None, None), Locale::EnUs);
    }

    #[test]
    fn system_locale_skips_c_locale() {
        let vars = HashMap::from([("LC_ALL", "C"), ("LANG", "es_ES.UTF-8")]);
        let tag = system_locale_tag(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(tag.as_deref(), Some("es_ES.UTF-8"));
        assert!(system_locale_tag(|_| None).is_none());
    }

    #[test]
    fn display_names() {
        let names: Vec<_> = Locale::ALL.iter().map(|l| l.display_name()).collect();
        assert_eq!(names, ["English", "Español"]);
    }
}
