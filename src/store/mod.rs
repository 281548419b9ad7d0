//! Grouped key/value message store backed by INI source text.
//!
//! A store holds named groups (INI sections) of string entries. Keys written
//! before any `[section]` header belong to the default group. Lookups accept
//! compound keys: `"site.name"` reads `name` from group `site`, while a bare
//! `"name"` reads the default group.
//!
//! Groups and keys keep their insertion order, so [`MessageStore::to_string`]
//! output is stable and parses back into an equal store. Text is read through
//! `rust-ini`; keys and group names that would not survive a write and re-read
//! are rejected when they are set.

mod codec;

use crate::error::{I18nError, Result};
use ini::Ini;
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::Path;

/// Name of the group holding keys that appear before any section header.
pub const DEFAULT_GROUP: &str = "__default";

/// An ordered set of key/value entries inside a store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Group {
    keys: Vec<String>,
    values: HashMap<String, String>,
}

impl Group {
    /// Value of a plain (non-compound) key in this group.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Insert or overwrite a value. Overwriting keeps the original position.
    pub(crate) fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        if !self.values.contains_key(&key) {
            self.keys.push(key.clone());
        }
        self.values.insert(key, value.into());
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.keys
            .iter()
            .filter_map(|k| self.values.get(k).map(|v| (k.as_str(), v.as_str())))
    }

    /// Number of entries in the group.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Message data for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageStore {
    /// Group names in insertion order; the default group is always first.
    names: Vec<String>,
    groups: HashMap<String, Group>,
}

impl Default for MessageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageStore {
    /// Create an empty store containing only the default group.
    pub fn new() -> Self {
        let mut groups = HashMap::new();
        groups.insert(DEFAULT_GROUP.to_string(), Group::default());
        Self {
            names: vec![DEFAULT_GROUP.to_string()],
            groups,
        }
    }

    /// Parse INI text into a new store.
    pub fn parse(text: &str) -> Result<Self> {
        codec::parse(text)
    }

    /// Copy the sections of a parsed [`Ini`] document into a new store.
    ///
    /// # Errors
    /// [`I18nError::InvalidKey`] or [`I18nError::InvalidGroup`] when a name
    /// could not be written back out unchanged.
    pub fn from_ini(ini: &Ini) -> Result<Self> {
        codec::from_ini(ini)
    }

    /// The store as an [`Ini`] document, default group as the general section.
    pub fn to_ini(&self) -> Ini {
        codec::to_ini(self)
    }

    /// Read and parse a file into a new store.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut store = Self::new();
        store.load_file(path)?;
        Ok(store)
    }

    /// Parse a file and merge it into this store.
    ///
    /// Nothing is merged if reading or parsing fails.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| I18nError::io(path, e))?;
        self.load_str(&text)
    }

    /// Parse source text and merge it into this store.
    pub fn load_str(&mut self, text: &str) -> Result<()> {
        let parsed = codec::parse(text)?;
        self.merge(parsed);
        Ok(())
    }

    /// Fold another store into this one. Values from `other` win on collision.
    pub fn merge(&mut self, other: MessageStore) {
        let MessageStore { names, mut groups } = other;
        for name in names {
            if let Some(Group { keys, mut values }) = groups.remove(&name) {
                let target = self.ensure_group(&name);
                for key in keys {
                    if let Some(value) = values.remove(&key) {
                        target.set(key, value);
                    }
                }
            }
        }
    }

    /// Look up a value by compound key.
    pub fn get(&self, key: &str) -> Option<&str> {
        let (group, name) = split_key(key);
        self.groups.get(group)?.get(name)
    }

    /// Look up a value, returning an empty string when absent.
    pub fn string(&self, key: &str) -> String {
        self.get(key).unwrap_or_default().to_string()
    }

    /// Parse a value as an integer.
    ///
    /// # Returns
    /// `None` if the key is missing or the value is not a number.
    pub fn int(&self, key: &str) -> Option<i64> {
        self.get(key)?.trim().parse().ok()
    }

    /// Parse a value as a boolean (`1/0`, `on/off`, `yes/no`, `true/false`).
    pub fn bool(&self, key: &str) -> Option<bool> {
        match self.get(key)?.trim().to_ascii_lowercase().as_str() {
            "1" | "on" | "yes" | "true" => Some(true),
            "0" | "off" | "no" | "false" => Some(false),
            _ => None,
        }
    }

    /// Check whether a compound key is present.
    pub fn has_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Set a single value by compound key, creating the group if needed.
    ///
    /// # Errors
    /// [`I18nError::InvalidKey`] for a key that cannot be exported, such as
    /// an empty one or one containing `=`.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<()> {
        let (group, name) = split_key(key);
        codec::validate_group(group)?;
        codec::validate_key(name)?;
        self.ensure_group(group).set(name, value);
        Ok(())
    }

    /// Insert a batch of values into a group. An empty name targets the
    /// default group.
    ///
    /// Every key is checked first; on error nothing is inserted.
    pub fn set_group<I, K, V>(&mut self, name: &str, values: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let name = if name.is_empty() { DEFAULT_GROUP } else { name };
        codec::validate_group(name)?;

        let values: Vec<(String, String)> = values
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        for (key, _) in &values {
            codec::validate_key(key)?;
        }

        let group = self.ensure_group(name);
        for (key, value) in values {
            group.set(key, value);
        }
        Ok(())
    }

    /// Group by name. Use [`DEFAULT_GROUP`] for top-level keys.
    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.get(name)
    }

    /// Group names in insertion order, default group first.
    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Total number of entries across all groups.
    pub fn len(&self) -> usize {
        self.groups.values().map(Group::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Serialize into `writer` as INI text.
    pub fn write_to<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        write!(writer, "{}", self)
    }

    pub(crate) fn insert(&mut self, group: &str, key: &str, value: String) {
        self.ensure_group(group).set(key, value);
    }

    pub(crate) fn ensure_group(&mut self, name: &str) -> &mut Group {
        if !self.groups.contains_key(name) {
            self.names.push(name.to_string());
        }
        self.groups.entry(name.to_string()).or_default()
    }
}

impl fmt::Display for MessageStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut wrote_any = false;

        for name in &self.names {
            let Some(group) = self.groups.get(name) else {
                continue;
            };
            let is_default = name == DEFAULT_GROUP;
            if is_default && group.is_empty() {
                continue;
            }

            if wrote_any {
                writeln!(f)?;
            }
            if !is_default {
                writeln!(f, "[{}]", name)?;
            }
            for (key, value) in group.iter() {
                writeln!(f, "{} = {}", key, codec::encode_value(value))?;
            }
            wrote_any = true;
        }

        Ok(())
    }
}

/// Split `"group.key"` into its parts; bare keys map to the default group.
fn split_key(key: &str) -> (&str, &str) {
    match key.split_once('.') {
        Some((group, name)) if !group.is_empty() && !name.is_empty() => (group, name),
        _ => (DEFAULT_GROUP, key),
    }
}
