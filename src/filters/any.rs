//! Pass-through filter for fields that accept anything

use crate::errors::ErrorCode;
use crate::filters::{CommonOptions, Filter, Policy};
use crate::value::Value;

/// Options for [`AnyFilter`]
///
/// Unlike the typed filters, `any` lets nils through by default: a field
/// declared as anything really does accept anything.
#[derive(Debug, Clone)]
pub struct AnyOptions {
    pub common: CommonOptions,
}

impl Default for AnyOptions {
    fn default() -> Self {
        Self {
            common: CommonOptions {
                nils: Policy::Allow,
                ..Default::default()
            },
        }
    }
}

/// Accepts any present value unchanged
pub struct AnyFilter {
    key: String,
    options: AnyOptions,
}

impl AnyFilter {
    pub fn new(key: impl Into<String>, options: AnyOptions) -> Self {
        Self {
            key: key.into(),
            options,
        }
    }
}

impl Filter for AnyFilter {
    fn key(&self) -> &str {
        &self.key
    }

    fn common(&self) -> &CommonOptions {
        &self.options.common
    }

    fn coerce_error(&self, _coerced: &Value) -> Option<ErrorCode> {
        None
    }
}
