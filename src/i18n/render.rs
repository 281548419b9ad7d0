//! Message rendering: positional formatting or `{name}` replacement.

use super::format::sprintf;
use crate::error::{I18nError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Replacement used for a value that has no string form.
pub const CANNOT_TO_STRING: &str = "CANNOT-TO-STRING";

/// How message arguments are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// printf-style directives (`%s`, `%d`, ...) filled in order
    #[default]
    Sprintf,

    /// `{name}` tokens replaced by named values
    Replace,
}

impl TryFrom<u8> for RenderMode {
    type Error = I18nError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(RenderMode::Sprintf),
            1 => Ok(RenderMode::Replace),
            other => Err(I18nError::InvalidRenderMode(other.to_string())),
        }
    }
}

impl FromStr for RenderMode {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "sprintf" | "positional" => Ok(RenderMode::Sprintf),
            "1" | "replace" => Ok(RenderMode::Replace),
            _ => Err(I18nError::InvalidRenderMode(s.to_string())),
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderMode::Sprintf => f.write_str("sprintf"),
            RenderMode::Replace => f.write_str("replace"),
        }
    }
}

/// Arguments for a translated message.
///
/// The variant picks the calling convention explicitly:
///
/// ```
/// use ini_i18n::Args;
/// use serde_json::json;
///
/// // positional values, or `field, value, ...` in replace mode
/// let list = Args::list([json!("tom"), json!(22)]);
/// // `old, new, ...` replaced verbatim
/// let pairs = Args::pairs(["{name}", "tom"]);
/// // field name to value
/// let named = Args::named([("name", json!("tom"))]);
/// # assert!(!list.is_empty() && !pairs.is_empty() && !named.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Args {
    List(Vec<Value>),
    Pairs(Vec<String>),
    Named(Map<String, Value>),
}

impl Args {
    /// No arguments: the message is returned as resolved.
    pub fn none() -> Self {
        Args::List(Vec::new())
    }

    /// Positional values, or a flat `field, value, ...` list in replace mode.
    pub fn list<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Args::List(values.into_iter().map(Into::into).collect())
    }

    /// Alternating `old, new, ...` strings replaced verbatim.
    pub fn pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Args::Pairs(pairs.into_iter().map(Into::into).collect())
    }

    /// Field name to value; each `{field}` token is replaced.
    pub fn named<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Args::Named(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Args::List(values) => values.is_empty(),
            Args::Pairs(pairs) => pairs.is_empty(),
            Args::Named(fields) => fields.is_empty(),
        }
    }
}

impl Default for Args {
    fn default() -> Self {
        Args::none()
    }
}

impl From<Vec<Value>> for Args {
    fn from(values: Vec<Value>) -> Self {
        Args::List(values)
    }
}

impl From<Map<String, Value>> for Args {
    fn from(fields: Map<String, Value>) -> Self {
        Args::Named(fields)
    }
}

/// Applies arguments to a raw message according to a [`RenderMode`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    pub mode: RenderMode,
}

impl Renderer {
    pub fn new(mode: RenderMode) -> Self {
        Self { mode }
    }

    pub fn render(&self, message: &str, args: &Args) -> String {
        match self.mode {
            RenderMode::Sprintf => sprintf(message, &positional(args)),
            RenderMode::Replace => replace_all(message, &replacement_pairs(args)),
        }
    }
}

/// Arguments as an ordered value list for printf-style formatting.
fn positional(args: &Args) -> Vec<Value> {
    match args {
        Args::List(values) => values.clone(),
        Args::Pairs(pairs) => pairs.iter().cloned().map(Value::String).collect(),
        Args::Named(fields) => vec![Value::Object(fields.clone())],
    }
}

/// Build `(token, replacement)` pairs.
fn replacement_pairs(args: &Args) -> Vec<(String, String)> {
    match args {
        Args::Pairs(flat) => flat
            .chunks_exact(2)
            .map(|pair| (pair[0].clone(), pair[1].clone()))
            .collect(),
        Args::Named(fields) => fields
            .iter()
            .map(|(field, value)| (format!("{{{}}}", field), stringify_or_sentinel(value)))
            .collect(),
        Args::List(flat) => flat
            .chunks_exact(2)
            .map(|pair| {
                (
                    format!("{{{}}}", stringify_or_sentinel(&pair[0])),
                    stringify_or_sentinel(&pair[1]),
                )
            })
            .collect(),
    }
}

/// String form of a scalar value. Arrays and objects have none.
pub fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn stringify_or_sentinel(value: &Value) -> String {
    stringify(value).unwrap_or_else(|| CANNOT_TO_STRING.to_string())
}

/// Replace every token occurrence in a single left-to-right pass.
///
/// At each position the first matching pair (in order) wins and the
/// inserted text is not scanned again. Empty tokens are ignored.
pub fn replace_all(message: &str, pairs: &[(String, String)]) -> String {
    let pairs: Vec<_> = pairs.iter().filter(|(old, _)| !old.is_empty()).collect();
    if pairs.is_empty() {
        return message.to_string();
    }

    let mut out = String::with_capacity(message.len());
    let mut rest = message;

    'scan: while let Some(c) = rest.chars().next() {
        for (old, new) in &pairs {
            if let Some(after) = rest.strip_prefix(old.as_str()) {
                out.push_str(new);
                rest = after;
                continue 'scan;
            }
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }

    out
}
