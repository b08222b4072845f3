//! Boolean filter: maps conventional true/false spellings

use crate::errors::ErrorCode;
use crate::filters::{CommonOptions, Filter};
use crate::value::Value;
use indexmap::IndexMap;

/// Options for [`BooleanFilter`]
#[derive(Debug, Clone)]
pub struct BooleanOptions {
    pub common: CommonOptions,
    /// String spellings accepted as booleans, matched case-insensitively.
    /// Integers are matched against their decimal form, so the default map
    /// also covers `1` and `0`.
    pub coercion_map: IndexMap<String, bool>,
}

impl Default for BooleanOptions {
    fn default() -> Self {
        let mut coercion_map = IndexMap::new();
        coercion_map.insert("true".to_string(), true);
        coercion_map.insert("1".to_string(), true);
        coercion_map.insert("false".to_string(), false);
        coercion_map.insert("0".to_string(), false);
        Self {
            common: CommonOptions::default(),
            coercion_map,
        }
    }
}

/// Filters one field into a `bool`
pub struct BooleanFilter {
    key: String,
    options: BooleanOptions,
}

impl BooleanFilter {
    pub fn new(key: impl Into<String>, options: BooleanOptions) -> Self {
        Self {
            key: key.into(),
            options,
        }
    }
}

impl Filter for BooleanFilter {
    fn key(&self) -> &str {
        &self.key
    }

    fn common(&self) -> &CommonOptions {
        &self.options.common
    }

    fn coerce(&self, raw: Value) -> Value {
        match raw {
            Value::Boolean(_) => raw,
            Value::String(s) => {
                match self.options.coercion_map.get(&s.trim().to_lowercase()) {
                    Some(b) => Value::Boolean(*b),
                    None => Value::String(s),
                }
            }
            Value::Integer(i) => match self.options.coercion_map.get(&i.to_string()) {
                Some(b) => Value::Boolean(*b),
                None => Value::Integer(i),
            },
            other => other,
        }
    }

    fn coerce_error(&self, coerced: &Value) -> Option<ErrorCode> {
        match coerced {
            Value::Boolean(_) => None,
            _ => Some(ErrorCode::Boolean),
        }
    }
}
