use std::path::PathBuf;

/// Errors produced while configuring, loading or mutating translation data.
#[derive(Debug, thiserror::Error)]
pub enum I18nError {
    #[error("invalid load mode '{0}', only file (0) and dir (1) are allowed")]
    InvalidLoadMode(String),

    #[error("invalid render mode '{0}', only sprintf (0) and replace (1) are allowed")]
    InvalidRenderMode(String),

    #[error("language '{0}' is not registered")]
    LanguageNotRegistered(String),

    #[error("invalid message key '{0}'")]
    InvalidKey(String),

    #[error("invalid group name '{0}'")]
    InvalidGroup(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("failed to load language '{lang}': {source}")]
    LoadLanguage {
        lang: String,
        #[source]
        source: Box<I18nError>,
    },
}

impl I18nError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        I18nError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn load_language(lang: &str, source: I18nError) -> Self {
        I18nError::LoadLanguage {
            lang: lang.to_string(),
            source: Box::new(source),
        }
    }
}

/// Alias for Result with I18nError
pub type Result<T> = std::result::Result<T, I18nError>;
