//! The string mapping persisted in the address bar.
//!
//! # Design
//! `QueryState` is an insertion-ordered list of unique keys. Empty values
//! never enter it: setting a key to `""` removes the key instead, so the
//! serialized form can never contain `key=`. Encoding follows
//! `application/x-www-form-urlencoded`, the same rules a browser applies to
//! `location.search`.

use std::fmt;

use url::form_urlencoded;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    pairs: Vec<(String, String)>,
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a query string, with or without its leading `?`.
    ///
    /// Empty values are dropped and the first occurrence of a repeated key
    /// wins.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut state = Self::new();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if state.get(&key).is_none() {
                state.set(key, value);
            }
        }
        state
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set `key`, keeping its position if already present. An empty value
    /// removes the key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if value.is_empty() {
            self.remove(&key);
            return;
        }
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Merge a partial update: unset values delete, others overwrite, and
    /// keys the update does not mention are left alone.
    pub fn apply(&mut self, update: QueryUpdate) {
        for (key, value) in update.entries {
            match value.into_param() {
                Some(value) => self.set(key, value),
                None => self.remove(&key),
            }
        }
    }

    /// Serialized form without the leading `?`.
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }

    /// The history entry to push: `?query`, or the bare pathname when the
    /// mapping is empty.
    pub fn to_location(&self, pathname: &str) -> String {
        if self.is_empty() {
            pathname.to_string()
        } else {
            format!("?{}", self.to_query_string())
        }
    }
}

impl fmt::Display for QueryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryState {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut state = Self::new();
        for (key, value) in iter {
            state.set(key, value);
        }
        state
    }
}

/// A value in a partial update. `Unset` stands for both `null` and
/// "not provided"; an empty `Text` is treated the same way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Unset,
    Text(String),
    Number(u64),
}

impl ParamValue {
    fn into_param(self) -> Option<String> {
        match self {
            ParamValue::Unset => None,
            ParamValue::Text(text) if text.is_empty() => None,
            ParamValue::Text(text) => Some(text),
            ParamValue::Number(n) => Some(n.to_string()),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Number(u64::from(value))
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        ParamValue::Number(value)
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ParamValue::Unset, Into::into)
    }
}

/// A partial-update object for [`QueryState::apply`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryUpdate {
    entries: Vec<(String, ParamValue)>,
}

impl QueryUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.entries.push((key.into(), value.into()));
        self
    }

    pub fn unset(self, key: impl Into<String>) -> Self {
        self.with(key, ParamValue::Unset)
    }
}
