//! Schema-less key/value views over the places a request parameter can live.
//!
//! Presence is a plain key lookup: a name is present exactly when it is a
//! key of the map, regardless of its value (`null`, `""` and `false` all
//! count as present).

use std::collections::HashMap;

use axum::extract::RawPathParams;
use axum::http::{header, HeaderMap};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields(HashMap<String, Value>);

impl Fields {
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Top-level keys of a JSON object. Anything else yields no fields.
    #[must_use]
    pub fn from_json_object(bytes: &[u8]) -> Self {
        serde_json::from_slice::<serde_json::Map<String, Value>>(bytes)
            .map(|map| map.into_iter().collect())
            .unwrap_or_default()
    }

    /// Pairs of an `application/x-www-form-urlencoded` string. A repeated
    /// key keeps its last value.
    #[must_use]
    pub fn from_urlencoded(bytes: &[u8]) -> Self {
        url::form_urlencoded::parse(bytes)
            .map(|(k, v)| (k.into_owned(), Value::String(v.into_owned())))
            .collect()
    }

    #[must_use]
    pub fn from_query(query: Option<&str>) -> Self {
        query.map_or_else(Self::default, |q| Self::from_urlencoded(q.as_bytes()))
    }

    #[must_use]
    pub fn from_path(params: &RawPathParams) -> Self {
        params
            .iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
            .collect()
    }

    /// Body fields, decoded according to `content-type`. Form bodies are
    /// read as urlencoded pairs; everything else is tried as a JSON object.
    #[must_use]
    pub fn from_body(headers: &HeaderMap, bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            return Self::default();
        }
        let is_form = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));
        if is_form {
            Self::from_urlencoded(bytes)
        } else {
            Self::from_json_object(bytes)
        }
    }
}

impl FromIterator<(String, Value)> for Fields {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The three parameter sources, checked body first, then path, then query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamSources {
    pub body: Fields,
    pub path: Fields,
    pub query: Fields,
}

impl ParamSources {
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.body.contains_key(name)
            || self.path.contains_key(name)
            || self.query.contains_key(name)
    }

    /// Value of `name` from the first source that has it.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.body
            .get(name)
            .or_else(|| self.path.get(name))
            .or_else(|| self.query.get(name))
    }
}
