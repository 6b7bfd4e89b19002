//! Managed-namespace gate shared by both pipelines.

/// Separator the service uses inside resource keys.
const NAMESPACE_SEPARATOR: char = '.';

/// Decides which resource/entry keys the engine is allowed to touch.
///
/// Applied to remote resource keys during import and to local entry names
/// during export. Pure and stateless.
#[derive(Debug, Clone)]
pub struct KeyFilter {
    prefixes: Vec<String>,
}

impl KeyFilter {
    pub fn new(prefixes: Vec<String>) -> Self {
        Self { prefixes }
    }

    /// True iff `key` starts with one of the configured managed prefixes.
    pub fn is_managed(&self, key: &str) -> bool {
        self.prefixes.iter().any(|p| key.starts_with(p.as_str()))
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }
}

/// Normalize a resource key into a store-safe entry name.
pub fn normalize_key(resource_key: &str) -> String {
    resource_key.replace(NAMESPACE_SEPARATOR, "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> KeyFilter {
        KeyFilter::new(vec!["Mod_".to_string(), "Com_".to_string()])
    }

    #[test]
    fn test_managed_prefixes_match() {
        let f = filter();
        assert!(f.is_managed("Mod_Title"));
        assert!(f.is_managed("Com_Label"));
        assert!(f.is_managed("Mod_"));
    }

    #[test]
    fn test_unmanaged_keys_rejected() {
        let f = filter();
        assert!(!f.is_managed("Other_Key"));
        assert!(!f.is_managed("mod_title"));
        assert!(!f.is_managed(""));
    }

    #[test]
    fn test_normalize_key_replaces_separators() {
        assert_eq!(normalize_key("Mod.Page.Title"), "Mod_Page_Title");
        assert_eq!(normalize_key("Mod_Title"), "Mod_Title");
    }
}
