//! Language type: a code plus a human-readable display name.

/// A registered language.
///
/// Identity is the code; the display name is cosmetic and ignored by
/// equality.
#[derive(Debug, Clone, Eq)]
pub struct Language {
    /// Language code (e.g., "en", "zh-CN")
    code: String,

    /// Display name (e.g., "English", "简体中文")
    name: String,
}

impl Language {
    /// Create a language. An empty `name` is derived from the code.
    ///
    /// # Example
    /// ```
    /// use ini_i18n::Language;
    ///
    /// assert_eq!(Language::new("custom", "").name(), "Custom");
    /// assert_eq!(Language::new("en", "English").name(), "English");
    /// ```
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        let code = code.into();
        let mut name = name.into();
        if name.is_empty() {
            name = display_name_for(&code);
        }
        Self { code, name }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Language {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

/// Derive a display name by upper-casing the first character of a code.
pub fn display_name_for(code: &str) -> String {
    let mut chars = code.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
