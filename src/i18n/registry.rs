//! Language registry: which language codes are known, and their names.
//!
//! Registration is independent of whether message data has been loaded for a
//! code. The manager owns one registry next to its per-language stores.

use super::language::{display_name_for, Language};
use std::collections::HashMap;

/// Mapping of language code to display name.
#[derive(Debug, Clone, Default)]
pub struct LanguageRegistry {
    languages: HashMap<String, String>,
}

impl LanguageRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether a code is registered.
    pub fn has_language(&self, code: &str) -> bool {
        self.languages.contains_key(code)
    }

    /// Register a language.
    ///
    /// The first registration of a code wins: calling again with the same
    /// code keeps the original display name. An empty `name` is derived from
    /// the code.
    ///
    /// # Returns
    /// `true` if the code was newly registered.
    pub fn add_language(&mut self, code: &str, name: &str) -> bool {
        if self.has_language(code) {
            return false;
        }

        let name = if name.is_empty() {
            display_name_for(code)
        } else {
            name.to_string()
        };
        self.languages.insert(code.to_string(), name);
        true
    }

    /// Remove a language.
    ///
    /// # Returns
    /// `true` if the code was registered.
    pub fn remove_language(&mut self, code: &str) -> bool {
        self.languages.remove(code).is_some()
    }

    /// Get a language by its code.
    pub fn get_by_code(&self, code: &str) -> Option<Language> {
        self.languages
            .get_key_value(code)
            .map(|(code, name)| Language::new(code.as_str(), name.as_str()))
    }

    /// Display name for a code.
    ///
    /// # Returns
    /// `None` if the code is not registered.
    pub fn name(&self, code: &str) -> Option<&str> {
        self.languages.get(code).map(String::as_str)
    }

    /// The live code → display name mapping.
    pub fn languages(&self) -> &HashMap<String, String> {
        &self.languages
    }

    /// All registered languages, sorted by code.
    pub fn list_all(&self) -> Vec<Language> {
        let mut all: Vec<_> = self
            .languages
            .iter()
            .map(|(code, name)| Language::new(code.as_str(), name.as_str()))
            .collect();
        all.sort_by(|a, b| a.code().cmp(b.code()));
        all
    }

    /// Registered codes, in no particular order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    /// Number of registered languages.
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    /// Check whether no language is registered.
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for LanguageRegistry
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut registry = LanguageRegistry::new();
        for (code, name) in iter {
            registry.add_language(code.as_ref(), name.as_ref());
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LanguageRegistry {
        [("en", "English"), ("zh-CN", "简体中文")].into_iter().collect()
    }

    #[test]
    fn test_has_language() {
        let registry = sample();
        assert!(registry.has_language("en"));
        assert!(registry.has_language("zh-CN"));
        assert!(!registry.has_language("zh-TW"));
    }

    #[test]
    fn test_first_registration_wins() {
        let mut registry = sample();
        assert!(!registry.add_language("en", "Anglais"));
        assert_eq!(registry.name("en"), Some("English"));
    }

    #[test]
    fn test_add_with_empty_name() {
        let mut registry = LanguageRegistry::new();
        assert!(registry.add_language("custom", ""));
        assert_eq!(registry.name("custom"), Some("Custom"));
    }

    #[test]
    fn test_remove_language() {
        let mut registry = sample();
        assert!(registry.remove_language("zh-CN"));
        assert!(!registry.has_language("zh-CN"));
        assert!(!registry.remove_language("zh-CN"));
    }

    #[test]
    fn test_get_by_code() {
        let registry = sample();
        let lang = registry.get_by_code("zh-CN").expect("registered");
        assert_eq!(lang.name(), "简体中文");
        assert!(registry.get_by_code("fr").is_none());
    }

    #[test]
    fn test_list_all_sorted() {
        let registry = sample();
        let codes: Vec<_> = registry.list_all().iter().map(|l| l.code().to_string()).collect();
        assert_eq!(codes, vec!["en", "zh-CN"]);
    }

    #[test]
    fn test_languages_map() {
        let registry = sample();
        assert_eq!(registry.languages().get("en").map(String::as_str), Some("English"));
        assert_eq!(registry.len(), 2);
    }
}
