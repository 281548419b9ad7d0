use crate::i18n::{LoadMode, RenderMode};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Settings for building an [`I18n`](crate::I18n) manager.
///
/// Every field has a default, so a JSON document only needs the values it
/// changes:
///
/// ```
/// use ini_i18n::{I18nConfig, LoadMode};
///
/// let config = I18nConfig::from_json_str(r#"{
///     "lang_dir": "conf/lang",
///     "load_mode": "dir",
///     "languages": { "en": "English", "zh-CN": "简体中文" }
/// }"#).unwrap();
///
/// assert_eq!(config.load_mode, LoadMode::Dir);
/// assert_eq!(config.file_extension, "ini");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct I18nConfig {
    /// Directory holding the language files
    pub lang_dir: PathBuf,

    /// Language used by the `translate_default*` calls
    pub default_lang: String,

    /// Language consulted when a key is missing; empty disables fallback
    pub fallback_lang: String,

    pub load_mode: LoadMode,
    pub render_mode: RenderMode,

    /// File extension of language files, without the dot
    pub file_extension: String,

    /// Language code → display name
    pub languages: BTreeMap<String, String>,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            lang_dir: PathBuf::from("lang"),
            default_lang: "en".to_string(),
            fallback_lang: String::new(),
            load_mode: LoadMode::default(),
            render_mode: RenderMode::default(),
            file_extension: "ini".to_string(),
            languages: BTreeMap::new(),
        }
    }
}

impl I18nConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid i18n configuration JSON")
    }

    /// Read settings from `I18N_*` environment variables. Unset variables
    /// keep their defaults.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            lang_dir: std::env::var("I18N_LANG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.lang_dir),
            default_lang: std::env::var("I18N_DEFAULT_LANG").unwrap_or(defaults.default_lang),
            fallback_lang: std::env::var("I18N_FALLBACK_LANG").unwrap_or(defaults.fallback_lang),

            load_mode: match std::env::var("I18N_LOAD_MODE") {
                Ok(v) => v.parse().context("I18N_LOAD_MODE is invalid")?,
                Err(_) => defaults.load_mode,
            },
            render_mode: match std::env::var("I18N_RENDER_MODE") {
                Ok(v) => v.parse().context("I18N_RENDER_MODE is invalid")?,
                Err(_) => defaults.render_mode,
            },

            file_extension: std::env::var("I18N_FILE_EXT")
                .map(|ext| ext.trim_start_matches('.').to_string())
                .unwrap_or(defaults.file_extension),
            languages: std::env::var("I18N_LANGUAGES")
                .map(|v| parse_languages(&v))
                .unwrap_or(defaults.languages),
        })
    }
}

/// Parse `en:English,zh-CN:简体中文`. A code without a name gets an empty
/// name, which the registry derives from the code.
fn parse_languages(raw: &str) -> BTreeMap<String, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| match item.split_once(':') {
            Some((code, name)) => (code.trim().to_string(), name.trim().to_string()),
            None => (item.to_string(), String::new()),
        })
        .collect()
}
