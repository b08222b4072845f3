//! Integer filter: numeric string parsing and range checks

use crate::errors::{ErrorCode, ErrorContext};
use crate::filters::{CommonOptions, Filter};
use crate::value::Value;
use rust_decimal::prelude::ToPrimitive;

/// Options for [`IntegerFilter`]
#[derive(Debug, Clone)]
pub struct IntegerOptions {
    pub common: CommonOptions,
    /// Grouping characters stripped from numeric strings before parsing
    pub delimiter: String,
    pub min: Option<i64>,
    pub max: Option<i64>,
    /// Accepted values
    pub one_of: Option<Vec<i64>>,
}

impl Default for IntegerOptions {
    fn default() -> Self {
        Self {
            common: CommonOptions::default(),
            delimiter: ", ".to_string(),
            min: None,
            max: None,
            one_of: None,
        }
    }
}

/// Filters one field into an `i64`
///
/// Whole-valued floats and decimals convert; numeric strings parse after
/// grouping characters are stripped, so `"1,000,000"` comes through as
/// `1000000`.
pub struct IntegerFilter {
    key: String,
    options: IntegerOptions,
}

impl IntegerFilter {
    pub fn new(key: impl Into<String>, options: IntegerOptions) -> Self {
        Self {
            key: key.into(),
            options,
        }
    }
}

impl Filter for IntegerFilter {
    fn key(&self) -> &str {
        &self.key
    }

    fn common(&self) -> &CommonOptions {
        &self.options.common
    }

    fn coerce(&self, raw: Value) -> Value {
        match raw {
            Value::Integer(_) => raw,
            // f64 keeps integers exact only inside +/-2^53, and `as`
            // saturates outside i64's range
            Value::Float(f) if f.fract() == 0.0 && f.abs() <= 9_007_199_254_740_992.0 => {
                Value::Integer(f as i64)
            }
            Value::Decimal(d) if d.is_integer() => match d.to_i64() {
                Some(i) => Value::Integer(i),
                None => Value::Decimal(d),
            },
            Value::String(s) => {
                let cleaned: String = s
                    .trim()
                    .chars()
                    .filter(|c| !self.options.delimiter.contains(*c))
                    .collect();
                match cleaned.parse::<i64>() {
                    Ok(i) => Value::Integer(i),
                    Err(_) => Value::String(s),
                }
            }
            other => other,
        }
    }

    fn coerce_error(&self, coerced: &Value) -> Option<ErrorCode> {
        match coerced {
            Value::Integer(_) => None,
            _ => Some(ErrorCode::Integer),
        }
    }

    fn validate(&self, coerced: &Value) -> Option<ErrorCode> {
        let i = coerced.as_i64()?;
        if self.options.min.is_some_and(|min| i < min) {
            return Some(ErrorCode::Min);
        }
        if self.options.max.is_some_and(|max| i > max) {
            return Some(ErrorCode::Max);
        }
        if let Some(choices) = &self.options.one_of {
            if !choices.contains(&i) {
                return Some(ErrorCode::In);
            }
        }
        None
    }

    fn context_for(&self, code: ErrorCode) -> ErrorContext {
        let mut context = ErrorContext::new();
        match code {
            ErrorCode::Min => {
                if let Some(min) = self.options.min {
                    context.insert("min".to_string(), Value::Integer(min));
                }
            }
            ErrorCode::Max => {
                if let Some(max) = self.options.max {
                    context.insert("max".to_string(), Value::Integer(max));
                }
            }
            _ => {}
        }
        context
    }
}
