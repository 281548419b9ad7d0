//! Conversion between INI text and [`MessageStore`], backed by `rust-ini`.
//!
//! Reading goes through [`ini::Ini`] with quoting and escapes enabled.
//! Writing emits text that the same reader turns back into identical values:
//! a value is double-quoted (with `\\`, `\"`, `\n`, `\r`, `\t` escaped)
//! whenever its bare form would be trimmed, unescaped or read as a quote or
//! comment.

use super::{MessageStore, DEFAULT_GROUP};
use crate::error::{I18nError, Result};
use ini::{Ini, ParseOption};

fn parse_option() -> ParseOption {
    ParseOption {
        enabled_quote: true,
        enabled_escape: true,
        ..ParseOption::default()
    }
}

/// Parse INI source text into a fresh store.
///
/// The whole text is parsed before anything is returned, so a parse error
/// never leaves a half-filled store behind.
pub(crate) fn parse(text: &str) -> Result<MessageStore> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let ini = Ini::load_from_str_opt(text, parse_option()).map_err(|e| I18nError::Parse {
        line: e.line,
        message: e.msg.to_string(),
    })?;
    from_ini(&ini)
}

/// Copy every section of `ini` into a new store. The general section becomes
/// the default group; repeated sections and keys fold together, later wins.
pub(crate) fn from_ini(ini: &Ini) -> Result<MessageStore> {
    let mut store = MessageStore::new();

    for (section, props) in ini.iter() {
        let group = match section.map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => DEFAULT_GROUP,
        };
        validate_group(group)?;
        store.ensure_group(group);

        for (key, value) in props.iter() {
            validate_key(key)?;
            store.insert(group, key, value.to_string());
        }
    }

    Ok(store)
}

/// Build an [`Ini`] holding the same sections and values.
pub(crate) fn to_ini(store: &MessageStore) -> Ini {
    let mut ini = Ini::new();
    for name in store.group_names() {
        let Some(group) = store.group(name) else {
            continue;
        };
        let section = (name != DEFAULT_GROUP).then_some(name);
        for (key, value) in group.iter() {
            ini.set_to(section, key.to_string(), value.to_string());
        }
    }
    ini
}

/// Check that a key is written and read back as itself.
pub(crate) fn validate_key(key: &str) -> Result<()> {
    let invalid = key.is_empty()
        || key != key.trim()
        || key.starts_with(['[', '\u{feff}'])
        || key
            .chars()
            .any(|c| matches!(c, '=' | ':' | '\\' | ';' | '#' | '"' | '\'') || c.is_control());

    if invalid {
        return Err(I18nError::InvalidKey(key.to_string()));
    }
    Ok(())
}

/// Check that a group name survives as a `[section]` header.
pub(crate) fn validate_group(name: &str) -> Result<()> {
    let invalid = name.is_empty()
        || name != name.trim()
        || name.chars().any(|c| matches!(c, '[' | ']' | '\\') || c.is_control());

    if invalid {
        return Err(I18nError::InvalidGroup(name.to_string()));
    }
    Ok(())
}

/// Encode a value for output so that parsing it back yields the same string.
pub(crate) fn encode_value(value: &str) -> String {
    let needs_quotes = value != value.trim()
        || value.starts_with(['"', '\''])
        || value.chars().any(|c| matches!(c, '\\' | '"' | ';' | '#') || c.is_control());

    if !needs_quotes {
        return value.to_string();
    }

    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}
