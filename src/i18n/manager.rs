//! The `I18n` manager: languages, their message stores and settings.

use super::loader::{LoadMode, Loader};
use super::metrics::LookupMetrics;
use super::registry::LanguageRegistry;
use super::render::{Args, RenderMode, Renderer};
use super::translator::{Resolution, Translator};
use crate::config::I18nConfig;
use crate::error::{I18nError, Result};
use crate::store::MessageStore;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Language manager.
///
/// Construct it once, register languages and call [`I18n::init`] during
/// startup, then serve lookups. Mutating methods take `&mut self`; share a
/// manager across threads behind the application's own lock.
///
/// ```
/// use ini_i18n::{Args, I18n};
///
/// let mut i18n = I18n::new_empty();
/// i18n.add("en", "English");
/// i18n.load_string("en", "greet = hello, %s\n[site]\nname = Blog").unwrap();
///
/// assert_eq!(i18n.translate("en", "site.name"), "Blog");
/// assert_eq!(i18n.translate_with("en", "greet", &Args::list(["Bob"])), "hello, Bob");
/// assert_eq!(i18n.translate("en", "missing"), "missing");
/// ```
#[derive(Debug)]
pub struct I18n {
    registry: LanguageRegistry,
    stores: HashMap<String, MessageStore>,

    lang_dir: PathBuf,
    file_extension: String,
    load_mode: LoadMode,
    render_mode: RenderMode,
    default_lang: String,
    fallback_lang: String,

    metrics: LookupMetrics,
}

impl Default for I18n {
    fn default() -> Self {
        Self::new_empty()
    }
}

impl I18n {
    // ==================== Construction ====================

    /// Create a manager for `languages` (code → display name) stored under
    /// `lang_dir`. Nothing is loaded until [`I18n::init`].
    pub fn new<I, K, V>(lang_dir: impl Into<PathBuf>, default_lang: &str, languages: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        Self {
            registry: languages.into_iter().collect(),
            lang_dir: lang_dir.into(),
            default_lang: default_lang.to_string(),
            ..Self::new_empty()
        }
    }

    /// Create a manager with no languages.
    pub fn new_empty() -> Self {
        let config = I18nConfig::default();
        Self {
            registry: LanguageRegistry::new(),
            stores: HashMap::new(),
            lang_dir: config.lang_dir,
            file_extension: config.file_extension,
            load_mode: config.load_mode,
            render_mode: config.render_mode,
            default_lang: String::new(),
            fallback_lang: config.fallback_lang,
            metrics: LookupMetrics::new(),
        }
    }

    /// Create a manager and load all languages immediately.
    pub fn new_with_init<I, K, V>(
        lang_dir: impl Into<PathBuf>,
        default_lang: &str,
        languages: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut i18n = Self::new(lang_dir, default_lang, languages);
        i18n.init()?;
        Ok(i18n)
    }

    /// Create a manager from configuration. Nothing is loaded until
    /// [`I18n::init`].
    pub fn from_config(config: I18nConfig) -> Self {
        Self {
            registry: config.languages.iter().collect(),
            stores: HashMap::new(),
            lang_dir: config.lang_dir,
            file_extension: config.file_extension,
            load_mode: config.load_mode,
            render_mode: config.render_mode,
            default_lang: config.default_lang,
            fallback_lang: config.fallback_lang,
            metrics: LookupMetrics::new(),
        }
    }

    /// Adjust settings in one closure.
    pub fn configure(&mut self, f: impl FnOnce(&mut Self)) -> &mut Self {
        f(self);
        self
    }

    /// Load every registered language from the language directory.
    ///
    /// Any unreadable directory or file, or any parse error, fails the whole
    /// call. Languages already loaded keep their data; re-loaded keys are
    /// overwritten.
    pub fn init(&mut self) -> Result<&mut Self> {
        let loader = Loader {
            dir: &self.lang_dir,
            extension: &self.file_extension,
            mode: self.load_mode,
        };
        loader.load_all(&self.registry, &mut self.stores)?;

        info!(
            "Loaded {} languages (default '{}', fallback '{}')",
            self.stores.len(),
            self.default_lang,
            self.fallback_lang
        );
        Ok(self)
    }

    // ==================== Settings ====================

    /// Directory language files are loaded from.
    pub fn lang_dir(&self) -> &Path {
        &self.lang_dir
    }

    /// Change the language directory. Takes effect on the next [`I18n::init`].
    pub fn set_lang_dir(&mut self, dir: impl Into<PathBuf>) {
        self.lang_dir = dir.into();
    }

    /// Extension of language files, without the dot (`ini` by default).
    pub fn file_extension(&self) -> &str {
        &self.file_extension
    }

    /// Set the language file extension (a leading dot is ignored).
    pub fn set_file_extension(&mut self, ext: &str) {
        self.file_extension = ext.trim_start_matches('.').to_string();
    }

    /// Layout used by [`I18n::init`].
    pub fn load_mode(&self) -> LoadMode {
        self.load_mode
    }

    /// Select file or directory layout for the next [`I18n::init`].
    pub fn set_load_mode(&mut self, mode: LoadMode) {
        self.load_mode = mode;
    }

    /// How arguments are applied to messages.
    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    /// Change the render mode. Applies to the next translate call.
    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.render_mode = mode;
    }

    /// Language used by the `translate_default*` calls.
    pub fn default_lang(&self) -> &str {
        &self.default_lang
    }

    /// Set the default language. It does not need to be registered yet.
    pub fn set_default_lang(&mut self, lang: &str) {
        self.default_lang = lang.to_string();
    }

    /// Language consulted when a key is missing. Empty when disabled.
    pub fn fallback_lang(&self) -> &str {
        &self.fallback_lang
    }

    /// Set the fallback language. An empty string disables fallback.
    pub fn set_fallback_lang(&mut self, lang: &str) {
        self.fallback_lang = lang.to_string();
    }

    // ==================== Translation ====================

    /// Translate `key` in `lang` without arguments.
    pub fn translate(&self, lang: &str, key: &str) -> String {
        self.translate_with(lang, key, &Args::none())
    }

    /// Translate `key` in `lang`, rendering `args` into the message.
    ///
    /// Falls back to the fallback language when `lang` is unknown or lacks
    /// the key. When neither yields a non-empty message the key itself is
    /// returned unrendered.
    pub fn translate_with(&self, lang: &str, key: &str, args: &Args) -> String {
        let message = match self.translator().resolve(lang, key) {
            Resolution::Found(msg) if !msg.is_empty() => {
                self.metrics.record_hit();
                msg
            }
            Resolution::Fallback(msg) if !msg.is_empty() => {
                self.metrics.record_fallback_hit();
                msg
            }
            _ => {
                self.metrics.record_miss();
                return key.to_string();
            }
        };

        if args.is_empty() {
            message.to_string()
        } else {
            Renderer::new(self.render_mode).render(message, args)
        }
    }

    /// Translate `key` in the default language.
    pub fn translate_default(&self, key: &str) -> String {
        self.translate_with(&self.default_lang, key, &Args::none())
    }

    /// Translate `key` in the default language with arguments.
    pub fn translate_default_with(&self, key: &str, args: &Args) -> String {
        self.translate_with(&self.default_lang, key, args)
    }

    /// Alias of [`I18n::translate_with`].
    pub fn tr(&self, lang: &str, key: &str, args: &Args) -> String {
        self.translate_with(lang, key, args)
    }

    /// Alias of [`I18n::translate_default_with`].
    pub fn dt(&self, key: &str, args: &Args) -> String {
        self.translate_default_with(key, args)
    }

    /// Resolve the raw message without rendering or key echo.
    pub fn resolve(&self, lang: &str, key: &str) -> Option<&str> {
        self.translator().resolve(lang, key).message()
    }

    /// Whether `lang` itself contains `key`. The fallback language is not
    /// consulted.
    pub fn has_key(&self, lang: &str, key: &str) -> bool {
        self.translator().has_key(lang, key)
    }

    fn translator(&self) -> Translator<'_> {
        Translator {
            registry: &self.registry,
            stores: &self.stores,
            fallback_lang: &self.fallback_lang,
        }
    }

    // ==================== Language Management ====================

    /// Check whether a language code is registered.
    pub fn has_lang(&self, lang: &str) -> bool {
        self.registry.has_language(lang)
    }

    /// Register a language and give it an empty store.
    ///
    /// An already registered code keeps its display name and its data.
    pub fn new_lang(&mut self, lang: &str, name: &str) {
        self.registry.add_language(lang, name);
        self.stores.entry(lang.to_string()).or_default();
    }

    /// Alias of [`I18n::new_lang`].
    pub fn add(&mut self, lang: &str, name: &str) {
        self.new_lang(lang, name);
    }

    /// Alias of [`I18n::new_lang`].
    pub fn add_lang(&mut self, lang: &str, name: &str) {
        self.new_lang(lang, name);
    }

    /// Builder form of [`I18n::new_lang`].
    pub fn with_lang(mut self, lang: &str, name: &str) -> Self {
        self.new_lang(lang, name);
        self
    }

    /// Remove a language and its data.
    ///
    /// # Returns
    /// `true` if the language was registered.
    pub fn del_lang(&mut self, lang: &str) -> bool {
        let existed = self.registry.remove_language(lang);
        self.stores.remove(lang);
        existed
    }

    /// Registered languages (code → display name).
    pub fn languages(&self) -> &HashMap<String, String> {
        self.registry.languages()
    }

    /// The language registry backing this manager.
    pub fn registry(&self) -> &LanguageRegistry {
        &self.registry
    }

    /// Message store of a registered language.
    pub fn lang(&self, lang: &str) -> Option<&MessageStore> {
        if !self.has_lang(lang) {
            return None;
        }
        self.stores.get(lang)
    }

    /// Mutable message store of a registered language.
    ///
    /// # Returns
    /// `None` if the language is unknown or has no data yet.
    pub fn lang_mut(&mut self, lang: &str) -> Option<&mut MessageStore> {
        if !self.has_lang(lang) {
            return None;
        }
        self.stores.get_mut(lang)
    }

    // ==================== Data Loading ====================

    /// Append a language file to a registered language.
    pub fn load_file(&mut self, lang: &str, path: impl AsRef<Path>) -> Result<()> {
        self.store_for_append(lang)?.load_file(path)
    }

    /// Append INI text to a registered language.
    pub fn load_string(&mut self, lang: &str, data: &str) -> Result<()> {
        self.store_for_append(lang)?.load_str(data)
    }

    /// Set values in a group of a registered language. An empty `group`
    /// targets the default group.
    ///
    /// # Errors
    /// [`I18nError::LanguageNotRegistered`] for an unknown language, and
    /// [`I18nError::InvalidKey`]/[`I18nError::InvalidGroup`] for names that
    /// could not be exported. Nothing is stored on error.
    pub fn set_values<I, K, V>(&mut self, lang: &str, group: &str, values: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let store = self.store_for_append(lang)?;
        let values: Vec<(K, V)> = values.into_iter().collect();
        if values.is_empty() {
            return Ok(());
        }

        store.set_group(group, values)
    }

    /// Serialize a language's data as INI text. Unknown languages give an
    /// empty string.
    pub fn export(&self, lang: &str) -> String {
        self.lang(lang).map(ToString::to_string).unwrap_or_default()
    }

    /// Lookup statistics for this manager.
    pub fn metrics(&self) -> &LookupMetrics {
        &self.metrics
    }

    fn store_for_append(&mut self, lang: &str) -> Result<&mut MessageStore> {
        if !self.registry.has_language(lang) {
            warn!("Cannot add data to unregistered language '{}'", lang);
            return Err(I18nError::LanguageNotRegistered(lang.to_string()));
        }
        Ok(self.stores.entry(lang.to_string()).or_default())
    }
}
