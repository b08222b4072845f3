//! Date filter: calendar dates without time-of-day

use crate::errors::{ErrorCode, ErrorContext};
use crate::filters::{CommonOptions, Filter};
use crate::value::Value;
use chrono::{DateTime, NaiveDate};

/// Formats tried in order when no explicit format is declared
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y", "%Y/%m/%d", "%d/%m/%Y"];

/// Options for [`DateFilter`]
#[derive(Debug, Clone, Default)]
pub struct DateOptions {
    pub common: CommonOptions,
    /// strftime format the string must match; when unset, common layouts
    /// and RFC 3339 timestamps are tried
    pub format: Option<String>,
    /// Earliest accepted date, inclusive
    pub min: Option<NaiveDate>,
    /// Latest accepted date, inclusive
    pub max: Option<NaiveDate>,
}

/// Filters one field into a [`NaiveDate`]
pub struct DateFilter {
    key: String,
    options: DateOptions,
}

impl DateFilter {
    pub fn new(key: impl Into<String>, options: DateOptions) -> Self {
        Self {
            key: key.into(),
            options,
        }
    }

    fn parse(&self, s: &str) -> Option<NaiveDate> {
        let trimmed = s.trim();
        if let Some(format) = &self.options.format {
            return NaiveDate::parse_from_str(trimmed, format).ok();
        }
        DATE_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
            .or_else(|| {
                DateTime::parse_from_rfc3339(trimmed)
                    .ok()
                    .map(|t| t.date_naive())
            })
    }
}

impl Filter for DateFilter {
    fn key(&self) -> &str {
        &self.key
    }

    fn common(&self) -> &CommonOptions {
        &self.options.common
    }

    fn coerce(&self, raw: Value) -> Value {
        match raw {
            Value::Date(_) => raw,
            Value::Time(t) => Value::Date(t.date_naive()),
            Value::String(s) => match self.parse(&s) {
                Some(d) => Value::Date(d),
                None => Value::String(s),
            },
            other => other,
        }
    }

    fn coerce_error(&self, coerced: &Value) -> Option<ErrorCode> {
        match coerced {
            Value::Date(_) => None,
            _ => Some(ErrorCode::Date),
        }
    }

    fn validate(&self, coerced: &Value) -> Option<ErrorCode> {
        let d = coerced.as_date()?;
        if self.options.min.is_some_and(|min| d < min) {
            return Some(ErrorCode::Min);
        }
        if self.options.max.is_some_and(|max| d > max) {
            return Some(ErrorCode::Max);
        }
        None
    }

    fn context_for(&self, code: ErrorCode) -> ErrorContext {
        let mut context = ErrorContext::new();
        match code {
            ErrorCode::Min => {
                if let Some(min) = self.options.min {
                    context.insert("min".to_string(), Value::Date(min));
                }
            }
            ErrorCode::Max => {
                if let Some(max) = self.options.max {
                    context.insert("max".to_string(), Value::Date(max));
                }
            }
            _ => {}
        }
        context
    }
}
