//! Float filter: locale-aware numeric string parsing and range checks

use crate::errors::{ErrorCode, ErrorContext};
use crate::filters::{CommonOptions, Filter};
use crate::value::Value;
use rust_decimal::prelude::ToPrimitive;

/// Options for [`FloatFilter`]
#[derive(Debug, Clone)]
pub struct FloatOptions {
    pub common: CommonOptions,
    /// Grouping characters stripped from numeric strings before parsing
    pub delimiter: String,
    /// Character separating the fractional part in numeric strings
    pub decimal_mark: String,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Default for FloatOptions {
    fn default() -> Self {
        Self {
            common: CommonOptions::default(),
            delimiter: ", ".to_string(),
            decimal_mark: ".".to_string(),
            min: None,
            max: None,
        }
    }
}

/// Filters one field into an `f64`
pub struct FloatFilter {
    key: String,
    options: FloatOptions,
}

impl FloatFilter {
    pub fn new(key: impl Into<String>, options: FloatOptions) -> Self {
        Self {
            key: key.into(),
            options,
        }
    }

    fn parse(&self, s: &str) -> Option<f64> {
        let trimmed = s.trim();
        // A '.' in the input contradicts a custom decimal mark; reject it
        // rather than guess which separator the caller meant.
        if self.options.decimal_mark != "."
            && !self.options.delimiter.contains('.')
            && trimmed.contains('.')
        {
            return None;
        }
        let cleaned: String = trimmed
            .chars()
            .filter(|c| !self.options.delimiter.contains(*c))
            .collect();
        let cleaned = if self.options.decimal_mark == "." {
            cleaned
        } else {
            cleaned.replace(&self.options.decimal_mark, ".")
        };
        match cleaned.parse::<f64>() {
            Ok(f) if f.is_finite() => Some(f),
            _ => None,
        }
    }
}

impl Filter for FloatFilter {
    fn key(&self) -> &str {
        &self.key
    }

    fn common(&self) -> &CommonOptions {
        &self.options.common
    }

    fn coerce(&self, raw: Value) -> Value {
        match raw {
            Value::Float(_) => raw,
            Value::Integer(i) => Value::Float(i as f64),
            Value::Decimal(d) => match d.to_f64() {
                Some(f) => Value::Float(f),
                None => Value::Decimal(d),
            },
            Value::String(s) => match self.parse(&s) {
                Some(f) => Value::Float(f),
                None => Value::String(s),
            },
            other => other,
        }
    }

    fn coerce_error(&self, coerced: &Value) -> Option<ErrorCode> {
        match coerced {
            Value::Float(_) => None,
            _ => Some(ErrorCode::Float),
        }
    }

    fn validate(&self, coerced: &Value) -> Option<ErrorCode> {
        let f = coerced.as_f64()?;
        if self.options.min.is_some_and(|min| f < min) {
            return Some(ErrorCode::Min);
        }
        if self.options.max.is_some_and(|max| f > max) {
            return Some(ErrorCode::Max);
        }
        None
    }

    fn context_for(&self, code: ErrorCode) -> ErrorContext {
        let mut context = ErrorContext::new();
        match code {
            ErrorCode::Min => {
                if let Some(min) = self.options.min {
                    context.insert("min".to_string(), Value::Float(min));
                }
            }
            ErrorCode::Max => {
                if let Some(max) = self.options.max {
                    context.insert("max".to_string(), Value::Float(max));
                }
            }
            _ => {}
        }
        context
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorNode;
    use crate::outcome::Feed;

    fn filter(options: FloatOptions) -> FloatFilter {
        FloatFilter::new("float1", options)
    }

    fn code_of(feed: &Feed) -> Option<ErrorCode> {
        feed.error().and_then(ErrorNode::code)
    }

    // === coercion ===

    #[test]
    fn test_floats_and_integers_pass_through() {
        let f = filter(FloatOptions::default());
        assert_eq!(f.feed(Value::Float(3.5)), Feed::Success(Value::Float(3.5)));
        assert_eq!(f.feed(Value::Integer(3)), Feed::Success(Value::Float(3.0)));
    }

    #[test]
    fn test_parses_numeric_strings() {
        let f = filter(FloatOptions::default());
        assert_eq!(f.feed(Value::from("3.5")), Feed::Success(Value::Float(3.5)));
        assert_eq!(f.feed(Value::from("-0.25")), Feed::Success(Value::Float(-0.25)));
        assert_eq!(f.feed(Value::from("1,000.5")), Feed::Success(Value::Float(1000.5)));
    }

    #[test]
    fn test_custom_decimal_mark() {
        let options = FloatOptions {
            delimiter: ". ".to_string(),
            decimal_mark: ",".to_string(),
            ..Default::default()
        };
        let feed = filter(options).feed(Value::from("1.000,5"));
        assert_eq!(feed, Feed::Success(Value::Float(1000.5)));
    }

    #[test]
    fn test_dot_conflicts_with_custom_mark() {
        let options = FloatOptions {
            delimiter: " ".to_string(),
            decimal_mark: ",".to_string(),
            ..Default::default()
        };
        let feed = filter(options).feed(Value::from("1.5"));
        assert_eq!(code_of(&feed), Some(ErrorCode::Float));
    }

    #[test]
    fn test_rejects_non_finite_and_junk_strings() {
        let f = filter(FloatOptions::default());
        assert_eq!(code_of(&f.feed(Value::from("inf"))), Some(ErrorCode::Float));
        assert_eq!(code_of(&f.feed(Value::from("NaN"))), Some(ErrorCode::Float));
        let feed = f.feed(Value::from("12abc"));
        assert_eq!(code_of(&feed), Some(ErrorCode::Float));
        assert_eq!(feed.value(), Some(&Value::from("12abc")));
    }

    #[test]
    fn test_booleans_are_not_floats() {
        let feed = filter(FloatOptions::default()).feed(Value::Boolean(true));
        assert_eq!(code_of(&feed), Some(ErrorCode::Float));
    }

    // === validation ===

    #[test]
    fn test_range_bounds_are_inclusive() {
        let options = FloatOptions {
            min: Some(0.0),
            max: Some(1.0),
            ..Default::default()
        };
        let f = filter(options);
        assert!(f.feed(Value::Float(0.0)).is_success());
        assert!(f.feed(Value::Float(1.0)).is_success());
        assert_eq!(code_of(&f.feed(Value::Float(-0.1))), Some(ErrorCode::Min));
        assert_eq!(code_of(&f.feed(Value::Float(1.1))), Some(ErrorCode::Max));
    }
}
