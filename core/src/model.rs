//! Data model shared by the import and export pipelines.
//!
//! Wire types mirror the translation service's JSON shapes; local types
//! mirror what the store adapter hands back.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Name of the flag set on entries created by the engine during import.
pub const FLAG_DEFINED: &str = "defined";

/// Flag name for a `(entry, mode)` pair that has been pushed successfully.
pub fn mode_flag(name: &str, mode_id: &str) -> String {
    format!("{name}_{mode_id}")
}

/// The locales the bridge manages, in import order.
///
/// The order is load-bearing: the store cannot hold a collection without a
/// mode, so `en-US` must be processed first and become the renamed base mode.
/// The host caps collections at four modes, so the list is closed.
pub const IMPORT_ORDER: [Locale; 4] = [Locale::EnUs, Locale::TrTr, Locale::DeDe, Locale::ArSa];

/// Locale of the base mode (mode position 0).
pub const BASE_LOCALE: Locale = Locale::EnUs;

/// A supported locale, serialized as its culture code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "tr-TR")]
    TrTr,
    #[serde(rename = "de-DE")]
    DeDe,
    #[serde(rename = "ar-SA")]
    ArSa,
}

impl Locale {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::TrTr => "tr-TR",
            Self::DeDe => "de-DE",
            Self::ArSa => "ar-SA",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en-US" => Ok(Self::EnUs),
            "tr-TR" => Ok(Self::TrTr),
            "de-DE" => Ok(Self::DeDe),
            "ar-SA" => Ok(Self::ArSa),
            other => Err(format!("unsupported locale: {other}")),
        }
    }
}

/// One localized resource as returned by the translation service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteResource {
    pub resource_key: String,
    pub language_culture_code: String,
    pub translation: String,
}

/// Envelope every service endpoint responds with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceResponse<T> {
    #[serde(rename = "type")]
    pub status: String,
    #[serde(default)]
    pub value: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> ServiceResponse<T> {
    pub fn is_ok(&self) -> bool {
        self.status == "Ok"
    }

    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or("<no message>")
    }
}

/// A named variant (locale) within a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mode {
    pub id: String,
    pub name: String,
}

/// The managed translation collection as seen through the store adapter.
///
/// Invariants enforced by the store: at most [`crate::store::MAX_MODES`]
/// modes, never zero modes, and the mode at position 0 is the base mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub name: String,
    pub modes: Vec<Mode>,
}

impl Collection {
    /// Look up a mode by its locale name.
    pub fn mode_by_name(&self, name: &str) -> Option<&Mode> {
        self.modes.iter().find(|m| m.name == name)
    }
}

/// A local entry: one normalized resource key with one value per mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalEntry {
    pub id: String,
    /// Normalized resource key (`.` replaced with `_`), unique per collection.
    pub name: String,
    /// mode id -> translation value.
    #[serde(default)]
    pub values_by_mode: HashMap<String, String>,
    /// Flag name -> value. Idempotency markers, not translation data.
    #[serde(default)]
    pub flags: HashMap<String, String>,
}

impl LocalEntry {
    pub fn has_flag(&self, name: &str) -> bool {
        self.flags.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_round_trip() {
        for locale in IMPORT_ORDER {
            assert_eq!(locale.as_str().parse::<Locale>(), Ok(locale));
        }
        assert!("fr-FR".parse::<Locale>().is_err());
    }

    #[test]
    fn test_base_locale_is_first_in_import_order() {
        assert_eq!(IMPORT_ORDER[0], BASE_LOCALE);
    }

    #[test]
    fn test_service_response_status() {
        let ok: ServiceResponse<Vec<RemoteResource>> = serde_json::from_str(
            r#"{"type":"Ok","value":[],"message":"done"}"#,
        )
        .unwrap();
        assert!(ok.is_ok());

        let rejected: ServiceResponse<Vec<RemoteResource>> =
            serde_json::from_str(r#"{"type":"Error","message":"denied"}"#).unwrap();
        assert!(!rejected.is_ok());
        assert_eq!(rejected.message(), "denied");
    }

    #[test]
    fn test_remote_resource_wire_shape() {
        let resource: RemoteResource = serde_json::from_str(
            r#"{"resourceKey":"Mod_Title","languageCultureCode":"en-US","translation":"Hello"}"#,
        )
        .unwrap();
        assert_eq!(resource.resource_key, "Mod_Title");
        assert_eq!(resource.language_culture_code, "en-US");
    }

    #[test]
    fn test_mode_flag_name() {
        assert_eq!(mode_flag(FLAG_DEFINED, "m1"), "defined_m1");
    }
}
