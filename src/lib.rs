//! Runtime translation lookups backed by INI language files.
//!
//! Languages are loaded either from one file per language
//! (`lang/en.ini`) or from a directory per language whose files are merged
//! (`lang/en/*.ini`). Lookups fall back to a single fallback language and
//! finally to the key itself, and messages can be rendered printf-style or
//! with `{name}` placeholders.

pub mod config;
pub mod error;
pub mod i18n;
pub mod store;

pub use config::I18nConfig;
pub use error::{I18nError, Result};
pub use i18n::{
    Args, I18n, Language, LanguageRegistry, LoadMode, LookupMetrics, MetricsReport, RenderMode,
    Resolution, CANNOT_TO_STRING,
};
pub use store::{Group, MessageStore, DEFAULT_GROUP};
