//! Time filter: UTC timestamps

use crate::errors::{ErrorCode, ErrorContext};
use crate::filters::{CommonOptions, Filter};
use crate::value::Value;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Options for [`TimeFilter`]
#[derive(Debug, Clone, Default)]
pub struct TimeOptions {
    pub common: CommonOptions,
    /// strftime format the string must match; when unset, RFC 3339 and a
    /// few common layouts are tried
    pub format: Option<String>,
    /// Earliest accepted instant, inclusive
    pub min: Option<DateTime<Utc>>,
    /// Latest accepted instant, inclusive
    pub max: Option<DateTime<Utc>>,
}

/// Filters one field into a [`DateTime<Utc>`]
///
/// Naive inputs (dates, format strings without offsets) are taken to be
/// UTC; integers are treated as Unix timestamps in seconds.
pub struct TimeFilter {
    key: String,
    options: TimeOptions,
}

impl TimeFilter {
    pub fn new(key: impl Into<String>, options: TimeOptions) -> Self {
        Self {
            key: key.into(),
            options,
        }
    }

    fn parse(&self, s: &str) -> Option<DateTime<Utc>> {
        let trimmed = s.trim();
        if let Some(format) = &self.options.format {
            return NaiveDateTime::parse_from_str(trimmed, format)
                .ok()
                .map(|t| t.and_utc());
        }
        DateTime::parse_from_rfc3339(trimmed)
            .ok()
            .map(|t| t.with_timezone(&Utc))
            .or_else(|| {
                NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S")
                    .ok()
                    .map(|t| t.and_utc())
            })
            .or_else(|| {
                NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                    .ok()
                    .map(|d| d.and_time(NaiveTime::MIN).and_utc())
            })
    }
}

impl Filter for TimeFilter {
    fn key(&self) -> &str {
        &self.key
    }

    fn common(&self) -> &CommonOptions {
        &self.options.common
    }

    fn coerce(&self, raw: Value) -> Value {
        match raw {
            Value::Time(_) => raw,
            Value::Date(d) => Value::Time(d.and_time(NaiveTime::MIN).and_utc()),
            Value::Integer(i) => match DateTime::from_timestamp(i, 0) {
                Some(t) => Value::Time(t),
                None => Value::Integer(i),
            },
            Value::String(s) => match self.parse(&s) {
                Some(t) => Value::Time(t),
                None => Value::String(s),
            },
            other => other,
        }
    }

    fn coerce_error(&self, coerced: &Value) -> Option<ErrorCode> {
        match coerced {
            Value::Time(_) => None,
            _ => Some(ErrorCode::Time),
        }
    }

    fn validate(&self, coerced: &Value) -> Option<ErrorCode> {
        let t = coerced.as_time()?;
        if self.options.min.is_some_and(|min| t < min) {
            return Some(ErrorCode::Min);
        }
        if self.options.max.is_some_and(|max| t > max) {
            return Some(ErrorCode::Max);
        }
        None
    }

    fn context_for(&self, code: ErrorCode) -> ErrorContext {
        let mut context = ErrorContext::new();
        match code {
            ErrorCode::Min => {
                if let Some(min) = self.options.min {
                    context.insert("min".to_string(), Value::Time(min));
                }
            }
            ErrorCode::Max => {
                if let Some(max) = self.options.max {
                    context.insert("max".to_string(), Value::Time(max));
                }
            }
            _ => {}
        }
        context
    }
}
