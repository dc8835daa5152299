//! Payload composition: URL normalisation, vCard formatting and form state
//!
//! Each input tab produces one QR payload string. The form keeps every tab's
//! input around so switching tabs does not lose what the user typed.

use crate::error::{Error, Result};
use crate::qr::Customization;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Input tab selecting how the payload is built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabType {
    /// Website address, normalised with [`format_url`]
    #[default]
    Url,
    /// Free text, encoded verbatim
    Text,
    /// Contact card, encoded with [`generate_vcard`]
    Contact,
}

impl TabType {
    /// All tabs in display order
    pub const ALL: [TabType; 3] = [TabType::Url, TabType::Text, TabType::Contact];

    /// Stable identifier used in file names and JSON output
    pub fn as_str(self) -> &'static str {
        match self {
            TabType::Url => "url",
            TabType::Text => "text",
            TabType::Contact => "contact",
        }
    }
}

impl fmt::Display for TabType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TabType {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "url" => Ok(TabType::Url),
            "text" => Ok(TabType::Text),
            "contact" => Ok(TabType::Contact),
            _ => Err(Error::Unknown {
                kind: "tab",
                value: value.to_string(),
            }),
        }
    }
}

/// Contact fields collected by the contact tab
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactInfo {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Phone number
    pub phone: String,
    /// Email address
    pub email: String,
    /// Company or organization
    pub organization: String,
    /// Personal or company website
    pub url: String,
}

impl ContactInfo {
    /// Whether enough is filled in to warrant a card.
    ///
    /// Organization and website alone do not identify a person.
    pub fn has_identity(&self) -> bool {
        !(self.first_name.is_empty()
            && self.last_name.is_empty()
            && self.phone.is_empty()
            && self.email.is_empty())
    }
}

/// Prefix `https://` when the input has no http(s) scheme.
///
/// Blank input yields an empty string so the display is cleared.
pub fn format_url(url: &str) -> String {
    if url.trim().is_empty() {
        return String::new();
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return format!("https://{url}");
    }
    url.to_string()
}

/// Format a contact as a vCard 3.0 block.
///
/// Field order is fixed and values are inserted verbatim.
pub fn generate_vcard(contact: &ContactInfo) -> String {
    [
        "BEGIN:VCARD".to_string(),
        "VERSION:3.0".to_string(),
        format!("FN:{} {}", contact.first_name, contact.last_name),
        format!("N:{};{};;;", contact.last_name, contact.first_name),
        format!("ORG:{}", contact.organization),
        format!("TEL:{}", contact.phone),
        format!("EMAIL:{}", contact.email),
        format!("URL:{}", contact.url),
        "END:VCARD".to_string(),
    ]
    .join("\n")
}

/// Everything the user has entered, across all tabs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormState {
    /// Tab whose input feeds the payload
    pub active_tab: TabType,
    /// URL tab input
    pub url_input: String,
    /// Text tab input
    pub text_input: String,
    /// Contact tab input
    pub contact: ContactInfo,
    /// Colors and logo
    pub customization: Customization,
}

impl FormState {
    /// Empty form with the given customization defaults
    pub fn with_customization(customization: Customization) -> Self {
        Self {
            customization,
            ..Self::default()
        }
    }

    /// The string to encode for the active tab; empty when nothing is entered.
    pub fn payload(&self) -> String {
        match self.active_tab {
            TabType::Url => format_url(&self.url_input),
            TabType::Text => self.text_input.clone(),
            TabType::Contact => {
                if self.contact.has_identity() {
                    generate_vcard(&self.contact)
                } else {
                    String::new()
                }
            }
        }
    }

    /// Clear every input and restore default customization. The active tab stays.
    pub fn reset(&mut self) {
        self.url_input.clear();
        self.text_input.clear();
        self.contact = ContactInfo::default();
        self.customization = Customization::default();
    }

    /// Base file name for downloads of the active tab's code
    pub fn download_name(&self) -> String {
        format!("qr-code-{}", self.active_tab)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jane() -> ContactInfo {
        ContactInfo {
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            phone: "+1 555 0100".into(),
            email: "jane@example.com".into(),
            organization: "Acme".into(),
            url: "https://acme.test".into(),
        }
    }

    #[test]
    fn format_url_adds_https() {
        assert_eq!(format_url("example.com"), "https://example.com");
        assert_eq!(format_url("http://example.com"), "http://example.com");
        assert_eq!(format_url("https://example.com/a?b"), "https://example.com/a?b");
    }

    #[test]
    fn format_url_blank_is_empty() {
        assert_eq!(format_url(""), "");
        assert_eq!(format_url("   \t"), "");
    }

    #[test]
    fn format_url_only_checks_lowercase_scheme() {
        assert_eq!(format_url("HTTP://x.test"), "https://HTTP://x.test");
        assert_eq!(format_url("ftp://x.test"), "https://ftp://x.test");
    }

    #[test]
    fn vcard_has_fixed_layout() {
        let card = generate_vcard(&jane());
        assert_eq!(
            card,
            "BEGIN:VCARD\nVERSION:3.0\nFN:Jane Doe\nN:Doe;Jane;;;\nORG:Acme\n\
             TEL:+1 555 0100\nEMAIL:jane@example.com\nURL:https://acme.test\nEND:VCARD"
        );
    }

    #[test]
    fn vcard_keeps_empty_fields() {
        let card = generate_vcard(&ContactInfo {
            first_name: "Solo".into(),
            ..ContactInfo::default()
        });
        let lines: Vec<&str> = card.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[2], "FN:Solo ");
        assert_eq!(lines[3], "N:;Solo;;;");
        assert_eq!(lines[4], "ORG:");
        assert!(!card.ends_with('\n'));
    }

    #[test]
    fn identity_requires_a_person_field() {
        let org_only = ContactInfo {
            organization: "Acme".into(),
            url: "acme.test".into(),
            ..ContactInfo::default()
        };
        assert!(!org_only.has_identity());
        let phone_only = ContactInfo {
            phone: "123".into(),
            ..ContactInfo::default()
        };
        assert!(phone_only.has_identity());
    }

    #[test]
    fn payload_follows_active_tab() {
        let mut form = FormState {
            url_input: "rust-lang.org".into(),
            text_input: "hello".into(),
            contact: jane(),
            ..FormState::default()
        };
        assert_eq!(form.payload(), "https://rust-lang.org");
        form.active_tab = TabType::Text;
        assert_eq!(form.payload(), "hello");
        form.active_tab = TabType::Contact;
        assert!(form.payload().starts_with("BEGIN:VCARD"));
        form.contact = ContactInfo::default();
        assert_eq!(form.payload(), "");
    }

    #[test]
    fn reset_clears_inputs_but_keeps_tab() {
        let mut form = FormState {
            active_tab: TabType::Contact,
            url_input: "x".into(),
            text_input: "y".into(),
            contact: jane(),
            customization: Customization {
                logo_size: 25,
                ..Customization::default()
            },
        };
        form.reset();
        assert_eq!(form.active_tab, TabType::Contact);
        assert!(form.url_input.is_empty());
        assert!(form.text_input.is_empty());
        assert_eq!(form.contact, ContactInfo::default());
        assert_eq!(form.customization, Customization::default());
        assert_eq!(form.payload(), "");
    }

    #[test]
    fn download_name_uses_tab() {
        let form = FormState {
            active_tab: TabType::Text,
            ..FormState::default()
        };
        assert_eq!(form.download_name(), "qr-code-text");
    }

    #[test]
    fn tab_parses_case_insensitively() {
        assert_eq!("CONTACT".parse::<TabType>().unwrap(), TabType::Contact);
        assert!("wifi".parse::<TabType>().is_err());
    }
}
