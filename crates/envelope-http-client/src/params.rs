//! Query and body parameter encoding

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::BuildError;

/// Named request parameters
///
/// Keeps insertion order, replacing the value when a key is inserted twice.
/// Entries holding `null` are kept here but never encoded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters {
    entries: Vec<(String, Value)>,
}

impl Parameters {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Parameters::insert`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a parameter, replacing any previous value for `key`
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Build parameters from the fields of a serializable struct or map
    pub fn from_serializable<T: Serialize + ?Sized>(value: &T) -> Result<Self, BuildError> {
        match serde_json::to_value(value)? {
            Value::Object(map) => Ok(map.into_iter().collect()),
            other => Err(BuildError::Serialization(format!(
                "parameters must serialize to a JSON object, got `{other}`"
            ))),
        }
    }

    /// Value stored for `key`
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Number of stored entries, `null` ones included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries are stored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the stored entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn present(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.iter().filter(|(_, v)| !v.is_null())
    }

    /// Encode as `?key=value&...`
    ///
    /// Returns an empty string when nothing is left after dropping `null`
    /// entries.
    pub fn to_query_string(&self) -> Result<String, BuildError> {
        let pairs: Vec<(&str, String)> = self
            .present()
            .map(|(k, v)| (k, query_text(v)))
            .collect();

        if pairs.is_empty() {
            return Ok(String::new());
        }

        Ok(format!("?{}", serde_urlencoded::to_string(pairs)?))
    }

    /// Encode as a JSON object body
    pub fn to_json_body(&self) -> Result<Vec<u8>, BuildError> {
        let object: Map<String, Value> = self
            .present()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();

        Ok(serde_json::to_vec(&Value::Object(object))?)
    }
}

fn query_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Parameters::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

/// Everything a builder may need besides the URL
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestParameters {
    /// Parameters appended to the URL in query mode
    pub query: Option<Parameters>,
    /// Parameters sent as the JSON body
    pub body: Option<Parameters>,
    /// Positional values for `{0}`, `{1}`, ... in route mode
    pub route: Vec<String>,
}

impl RequestParameters {
    /// No parameters at all
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the query parameters
    pub fn query(mut self, query: Parameters) -> Self {
        self.query = Some(query);
        self
    }

    /// Set the body parameters
    pub fn body(mut self, body: Parameters) -> Self {
        self.body = Some(body);
        self
    }

    /// Set the route parameters
    pub fn route<I, S>(mut self, route: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.route = route.into_iter().map(|s| s.to_string()).collect();
        self
    }
}
