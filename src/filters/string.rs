//! String filter: scalar coercion, cleanup, and length/format checks

use crate::errors::{ErrorCode, ErrorContext};
use crate::filters::{CommonOptions, Filter, Policy};
use crate::value::Value;
use regex::Regex;

/// Options for [`StringFilter`]
#[derive(Debug, Clone)]
pub struct StringOptions {
    pub common: CommonOptions,
    /// Trim surrounding whitespace during coercion
    pub strip: bool,
    /// Applied when the cleaned string is empty
    pub empty: Policy,
    /// Replace control characters (other than tab and newlines) with spaces
    pub allow_control_characters: bool,
    /// Coerce booleans, numbers, and UUIDs into their string forms
    pub coerce_scalars: bool,
    /// Minimum length in characters
    pub min: Option<usize>,
    /// Maximum length in characters
    pub max: Option<usize>,
    /// Accepted values
    pub one_of: Option<Vec<String>>,
    /// Pattern the string must match
    pub matches: Option<Regex>,
}

impl Default for StringOptions {
    fn default() -> Self {
        Self {
            common: CommonOptions::default(),
            strip: true,
            empty: Policy::Deny,
            allow_control_characters: false,
            coerce_scalars: true,
            min: None,
            max: None,
            one_of: None,
            matches: None,
        }
    }
}

/// Filters one field into a cleaned string
pub struct StringFilter {
    key: String,
    options: StringOptions,
}

impl StringFilter {
    pub fn new(key: impl Into<String>, options: StringOptions) -> Self {
        Self {
            key: key.into(),
            options,
        }
    }

    fn scrub_control(s: String) -> String {
        if s.chars().all(|c| !c.is_control() || matches!(c, '\t' | '\r' | '\n')) {
            return s;
        }
        s.chars()
            .map(|c| {
                if c.is_control() && !matches!(c, '\t' | '\r' | '\n') {
                    ' '
                } else {
                    c
                }
            })
            .collect()
    }
}

impl Filter for StringFilter {
    fn key(&self) -> &str {
        &self.key
    }

    fn common(&self) -> &CommonOptions {
        &self.options.common
    }

    fn coerce(&self, raw: Value) -> Value {
        let s = match raw {
            Value::String(s) => s,
            Value::Boolean(b) if self.options.coerce_scalars => b.to_string(),
            Value::Integer(i) if self.options.coerce_scalars => i.to_string(),
            Value::Float(f) if self.options.coerce_scalars => f.to_string(),
            Value::Decimal(d) if self.options.coerce_scalars => d.to_string(),
            Value::Uuid(u) if self.options.coerce_scalars => u.to_string(),
            other => return other,
        };
        let s = if self.options.allow_control_characters {
            s
        } else {
            Self::scrub_control(s)
        };
        if self.options.strip {
            Value::String(s.trim().to_string())
        } else {
            Value::String(s)
        }
    }

    fn coerce_error(&self, coerced: &Value) -> Option<ErrorCode> {
        match coerced {
            Value::String(_) => None,
            _ => Some(ErrorCode::String),
        }
    }

    fn validate(&self, coerced: &Value) -> Option<ErrorCode> {
        let s = coerced.as_str()?;
        if s.is_empty() && self.options.empty != Policy::Allow {
            return Some(ErrorCode::Empty);
        }
        let length = s.chars().count();
        if self.options.min.is_some_and(|min| length < min) {
            return Some(ErrorCode::Min);
        }
        if self.options.max.is_some_and(|max| length > max) {
            return Some(ErrorCode::Max);
        }
        if let Some(choices) = &self.options.one_of {
            if !choices.iter().any(|choice| choice == s) {
                return Some(ErrorCode::In);
            }
        }
        if let Some(pattern) = &self.options.matches {
            if !pattern.is_match(s) {
                return Some(ErrorCode::Matches);
            }
        }
        None
    }

    fn policy_for(&self, code: ErrorCode) -> Policy {
        match code {
            ErrorCode::Empty => self.options.empty,
            _ => self.options.common.invalid,
        }
    }

    fn context_for(&self, code: ErrorCode) -> ErrorContext {
        let mut context = ErrorContext::new();
        match code {
            ErrorCode::Min => {
                if let Some(min) = self.options.min {
                    context.insert("min".to_string(), Value::Integer(min as i64));
                }
            }
            ErrorCode::Max => {
                if let Some(max) = self.options.max {
                    context.insert("max".to_string(), Value::Integer(max as i64));
                }
            }
            _ => {}
        }
        context
    }
}
