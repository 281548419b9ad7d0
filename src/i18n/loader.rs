//! Bulk loading of language files from the language directory.
//!
//! Two layouts are supported:
//!
//! ```text
//! File mode            Dir mode
//! lang/                lang/
//!   en.ini               en/
//!   zh-CN.ini              default.ini
//!                          other.ini
//!                        zh-CN/
//!                          default.ini
//! ```
//!
//! Every source is parsed completely before it touches a language's store,
//! and new data is merged over what is already there, so re-loading adds and
//! overrides keys but never drops them.

use super::registry::LanguageRegistry;
use crate::error::{I18nError, Result};
use crate::store::MessageStore;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, warn};

/// How language files are laid out under the language directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadMode {
    /// One file per language: `{dir}/{code}.{ext}`
    #[default]
    File,

    /// One directory per language, every `*.{ext}` file merged:
    /// `{dir}/{code}/*.{ext}`
    Dir,
}

impl TryFrom<u8> for LoadMode {
    type Error = I18nError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(LoadMode::File),
            1 => Ok(LoadMode::Dir),
            other => Err(I18nError::InvalidLoadMode(other.to_string())),
        }
    }
}

impl FromStr for LoadMode {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "file" => Ok(LoadMode::File),
            "1" | "dir" | "directory" => Ok(LoadMode::Dir),
            _ => Err(I18nError::InvalidLoadMode(s.to_string())),
        }
    }
}

impl fmt::Display for LoadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadMode::File => f.write_str("file"),
            LoadMode::Dir => f.write_str("dir"),
        }
    }
}

/// Loads every registered language from a directory.
pub(crate) struct Loader<'a> {
    pub(crate) dir: &'a Path,
    pub(crate) extension: &'a str,
    pub(crate) mode: LoadMode,
}

impl Loader<'_> {
    /// Load all languages in `registry` into `stores`.
    ///
    /// Stops at the first failure. Which language fails first is unspecified
    /// when several are broken.
    pub(crate) fn load_all(
        &self,
        registry: &LanguageRegistry,
        stores: &mut HashMap<String, MessageStore>,
    ) -> Result<()> {
        info!(
            "Loading {} languages from {} ({} mode)",
            registry.len(),
            self.dir.display(),
            self.mode
        );

        for code in registry.codes() {
            let loaded = match self.mode {
                LoadMode::File => self.load_file_mode(code),
                LoadMode::Dir => self.load_dir_mode(code),
            }
            .map_err(|e| I18nError::load_language(code, e))?;

            stores.entry(code.to_string()).or_default().merge(loaded);
        }

        Ok(())
    }

    fn load_file_mode(&self, code: &str) -> Result<MessageStore> {
        let path = self.dir.join(format!("{}.{}", code, self.extension));
        debug!("Loading language file {}", path.display());
        MessageStore::from_file(&path)
    }

    fn load_dir_mode(&self, code: &str) -> Result<MessageStore> {
        let dir = self.dir.join(code);
        let files = self.language_files(&dir)?;

        if files.is_empty() {
            warn!(
                "No .{} files found for language '{}' in {}",
                self.extension,
                code,
                dir.display()
            );
        }

        let mut store = MessageStore::new();
        for path in files {
            debug!("Loading language file {}", path.display());
            store.load_file(&path)?;
        }

        Ok(store)
    }

    /// Matching files in `dir`, sorted by file name. Sub-directories are
    /// skipped.
    fn language_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let entries = std::fs::read_dir(dir).map_err(|e| I18nError::io(dir, e))?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| I18nError::io(dir, e))?.path();
            if path.is_dir() {
                continue;
            }
            let matches = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext == self.extension);
            if matches {
                files.push(path);
            }
        }

        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(files)
    }
}
