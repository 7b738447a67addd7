//! Request parameters.
//!
//! The remote API owns schema validation, so parameters are an untyped
//! string-keyed bag of JSON values. The only local concern is where they
//! go on the wire: the query string for GET, the JSON body for POST/PATCH.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::GlassfrogError;

/// A string-keyed mapping of JSON-compatible values.
///
/// # Example
///
/// ```
/// use glassfrog::models::Params;
///
/// let params = Params::new()
///     .with("name", "Launch website")
///     .with("private_to_circle", true);
/// assert_eq!(params.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(Map<String, Value>);

impl Params {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, replacing any previous value under the same key.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts a parameter, returning the previous value if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Flattens the parameters into query-string pairs.
    ///
    /// Scalars become `key=value`, arrays repeat `key[]=value`, nested
    /// objects become `key[field]=value`, and `null` becomes `key=`.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for (key, value) in &self.0 {
            flatten_into(key.clone(), value, &mut pairs);
        }
        pairs
    }

    /// Serializes the parameters as a JSON request body.
    pub fn to_json_body(&self) -> Result<Vec<u8>, GlassfrogError> {
        Ok(serde_json::to_vec(&self.0)?)
    }
}

impl From<Map<String, Value>> for Params {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn flatten_into(prefix: String, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Null => out.push((prefix, String::new())),
        Value::Bool(b) => out.push((prefix, b.to_string())),
        Value::Number(n) => out.push((prefix, n.to_string())),
        Value::String(s) => out.push((prefix, s.clone())),
        Value::Array(items) => {
            let key = format!("{}[]", prefix);
            for item in items {
                flatten_into(key.clone(), item, out);
            }
        }
        Value::Object(map) => {
            for (field, nested) in map {
                flatten_into(format!("{}[{}]", prefix, field), nested, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn pair(k: &str, v: &str) -> (String, String) {
        (k.to_string(), v.to_string())
    }

    #[test]
    fn test_empty_params_have_no_query_pairs() {
        assert!(Params::new().query_pairs().is_empty());
    }

    #[test]
    fn test_scalar_query_pairs() {
        let params = Params::new()
            .with("archived", false)
            .with("limit", 25)
            .with("name", "Ops");
        assert_eq!(
            params.query_pairs(),
            vec![
                pair("archived", "false"),
                pair("limit", "25"),
                pair("name", "Ops"),
            ]
        );
    }

    #[test]
    fn test_array_and_nested_query_pairs() {
        let params = Params::new()
            .with("ids", json!([1, 2]))
            .with("filter", json!({"status": "open"}))
            .with("cursor", Value::Null);
        let mut pairs = params.query_pairs();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                pair("cursor", ""),
                pair("filter[status]", "open"),
                pair("ids[]", "1"),
                pair("ids[]", "2"),
            ]
        );
    }

    #[test]
    fn test_json_body() {
        let params = Params::new().with("name", "X");
        let body = params.to_json_body().unwrap();
        assert_eq!(String::from_utf8(body).unwrap(), r#"{"name":"X"}"#);
    }

    #[test]
    fn test_insert_replaces_value() {
        let mut params = Params::new().with("include", "roles");
        let previous = params.insert("include", "members");
        assert_eq!(previous, Some(json!("roles")));
        assert_eq!(params.len(), 1);
    }
}
