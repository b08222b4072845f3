//! Decimal filter: exact arithmetic values with scale checks

use crate::errors::{ErrorCode, ErrorContext};
use crate::filters::{CommonOptions, Filter};
use crate::value::Value;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

/// Options for [`DecimalFilter`]
#[derive(Debug, Clone)]
pub struct DecimalOptions {
    pub common: CommonOptions,
    /// Grouping characters stripped from numeric strings before parsing
    pub delimiter: String,
    /// Character separating the fractional part in numeric strings
    pub decimal_mark: String,
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
    /// Maximum number of fractional digits
    pub scale: Option<u32>,
}

impl Default for DecimalOptions {
    fn default() -> Self {
        Self {
            common: CommonOptions::default(),
            delimiter: ", ".to_string(),
            decimal_mark: ".".to_string(),
            min: None,
            max: None,
            scale: None,
        }
    }
}

/// Filters one field into an exact [`Decimal`], for money and other values
/// where binary floats drift
pub struct DecimalFilter {
    key: String,
    options: DecimalOptions,
}

impl DecimalFilter {
    pub fn new(key: impl Into<String>, options: DecimalOptions) -> Self {
        Self {
            key: key.into(),
            options,
        }
    }

    fn parse(&self, s: &str) -> Option<Decimal> {
        let trimmed = s.trim();
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
        cleaned.parse::<Decimal>().ok()
    }
}

impl Filter for DecimalFilter {
    fn key(&self) -> &str {
        &self.key
    }

    fn common(&self) -> &CommonOptions {
        &self.options.common
    }

    fn coerce(&self, raw: Value) -> Value {
        match raw {
            Value::Decimal(_) => raw,
            Value::Integer(i) => Value::Decimal(Decimal::from(i)),
            Value::Float(f) => match Decimal::from_f64(f) {
                Some(d) => Value::Decimal(d),
                None => Value::Float(f),
            },
            Value::String(s) => match self.parse(&s) {
                Some(d) => Value::Decimal(d),
                None => Value::String(s),
            },
            other => other,
        }
    }

    fn coerce_error(&self, coerced: &Value) -> Option<ErrorCode> {
        match coerced {
            Value::Decimal(_) => None,
            _ => Some(ErrorCode::Decimal),
        }
    }

    fn validate(&self, coerced: &Value) -> Option<ErrorCode> {
        let d = coerced.as_decimal()?;
        if self.options.min.is_some_and(|min| d < min) {
            return Some(ErrorCode::Min);
        }
        if self.options.max.is_some_and(|max| d > max) {
            return Some(ErrorCode::Max);
        }
        if let Some(scale) = self.options.scale {
            // Trailing zeros do not count against the scale: 1.50 fits in
            // one fractional digit.
            if d.round_dp(scale) != d {
                return Some(ErrorCode::Scale);
            }
        }
        None
    }

    fn context_for(&self, code: ErrorCode) -> ErrorContext {
        let mut context = ErrorContext::new();
        match code {
            ErrorCode::Min => {
                if let Some(min) = self.options.min {
                    context.insert("min".to_string(), Value::Decimal(min));
                }
            }
            ErrorCode::Max => {
                if let Some(max) = self.options.max {
                    context.insert("max".to_string(), Value::Decimal(max));
                }
            }
            ErrorCode::Scale => {
                if let Some(scale) = self.options.scale {
                    context.insert("scale".to_string(), Value::Integer(i64::from(scale)));
                }
            }
            _ => {}
        }
        context
    }
}
