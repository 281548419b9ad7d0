//! Internationalization (i18n) module: language registry, loading,
//! resolution and rendering.
//!
//! # Architecture
//!
//! - `registry`: which language codes are known and their display names
//! - `language`: the `Language` value type
//! - `loader`: bulk loading in file or directory layout
//! - `translator`: key resolution with one fallback language
//! - `render` / `format`: `{name}` replacement and printf-style formatting
//! - `metrics`: per-manager lookup counters
//! - `manager`: the `I18n` facade tying it all together
//!
//! # Example
//!
//! ```rust,no_run
//! use ini_i18n::I18n;
//!
//! let i18n = I18n::new_with_init("conf/lang", "en", [("en", "English"), ("zh-CN", "简体中文")])?;
//!
//! let name = i18n.translate_default("name");
//! let zh_name = i18n.translate("zh-CN", "name");
//! # Ok::<(), ini_i18n::I18nError>(())
//! ```

mod format;
mod language;
mod loader;
mod manager;
mod metrics;
mod registry;
mod render;
mod translator;

pub use format::sprintf;
pub use language::Language;
pub use loader::LoadMode;
pub use manager::I18n;
pub use metrics::{LookupMetrics, MetricsReport};
pub use registry::LanguageRegistry;
pub use render::{replace_all, stringify, Args, RenderMode, Renderer, CANNOT_TO_STRING};
pub use translator::Resolution;
