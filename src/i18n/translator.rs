//! Message resolution with a single fallback language.

use super::registry::LanguageRegistry;
use crate::store::MessageStore;
use std::collections::HashMap;
use tracing::debug;

/// Where a message was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// Found in the requested language
    Found(&'a str),

    /// Found in the fallback language
    Fallback(&'a str),

    /// Not found in either
    Missing,
}

impl<'a> Resolution<'a> {
    pub fn message(&self) -> Option<&'a str> {
        match *self {
            Resolution::Found(msg) | Resolution::Fallback(msg) => Some(msg),
            Resolution::Missing => None,
        }
    }
}

/// Read-only view over the manager's languages used for lookups.
pub(crate) struct Translator<'a> {
    pub(crate) registry: &'a LanguageRegistry,
    pub(crate) stores: &'a HashMap<String, MessageStore>,
    pub(crate) fallback_lang: &'a str,
}

impl<'a> Translator<'a> {
    /// Resolve `key` for `lang`.
    ///
    /// An unregistered `lang` goes straight to the fallback language. The
    /// fallback is consulted once and never chains further.
    pub(crate) fn resolve(&self, lang: &str, key: &str) -> Resolution<'a> {
        if let Some(msg) = self.local(lang, key) {
            return Resolution::Found(msg);
        }

        match self.local(self.fallback_lang, key) {
            Some(msg) => {
                debug!(
                    "Key '{}' resolved from fallback language '{}' (requested '{}')",
                    key, self.fallback_lang, lang
                );
                Resolution::Fallback(msg)
            }
            None => Resolution::Missing,
        }
    }

    /// Whether `lang` itself holds `key`. The fallback is not consulted.
    pub(crate) fn has_key(&self, lang: &str, key: &str) -> bool {
        self.local(lang, key).is_some()
    }

    /// Lookup in one registered language. A registered language without a
    /// store behaves as empty.
    fn local(&self, lang: &str, key: &str) -> Option<&'a str> {
        if !self.registry.has_language(lang) {
            return None;
        }
        self.stores.get(lang)?.get(key)
    }
}
