//! Sequence filter: per-element filtering with positional errors

use crate::errors::{ErrorArray, ErrorCode, ErrorNode};
use crate::filters::{CommonOptions, Filter};
use crate::outcome::Feed;
use crate::value::Value;

/// Options for [`SequenceFilter`]
#[derive(Debug, Clone, Default)]
pub struct SequenceOptions {
    pub common: CommonOptions,
    /// Wrap a lone non-array value into a one-element array before
    /// filtering. Nil is never wrapped; the nil policy settles it first.
    pub wrap: bool,
}

/// Filters an array by feeding every element through one element filter
///
/// Discarded elements close the gap they leave: later elements shift down,
/// and error positions track the shifted output, not the raw input. A
/// failing element keeps its (shifted) slot in both the output array and
/// the error array, so the two always line up.
pub struct SequenceFilter {
    key: String,
    options: SequenceOptions,
    element: Box<dyn Filter>,
}

impl SequenceFilter {
    /// `element` filters each member and should carry the sequence's own
    /// key so element errors render under it.
    pub fn new(key: impl Into<String>, options: SequenceOptions, element: Box<dyn Filter>) -> Self {
        Self {
            key: key.into(),
            options,
            element,
        }
    }

    /// The filter applied to every element
    pub fn element(&self) -> &dyn Filter {
        self.element.as_ref()
    }
}

impl Filter for SequenceFilter {
    fn key(&self) -> &str {
        &self.key
    }

    fn common(&self) -> &CommonOptions {
        &self.options.common
    }

    fn coerce(&self, raw: Value) -> Value {
        if self.options.wrap && !matches!(raw, Value::Array(_)) {
            Value::Array(vec![raw])
        } else {
            raw
        }
    }

    fn coerce_error(&self, coerced: &Value) -> Option<ErrorCode> {
        match coerced {
            Value::Array(_) => None,
            _ => Some(ErrorCode::Array),
        }
    }

    fn feed(&self, raw: Value) -> Feed {
        let coerced = match self.feed_base(raw) {
            Ok(value) => value,
            Err(settled) => return settled,
        };
        let Value::Array(items) = coerced else {
            return Feed::Success(coerced);
        };

        let mut output = Vec::with_capacity(items.len());
        let mut errors = ErrorArray::new();
        for item in items {
            match self.element.feed(item) {
                // Discarded elements leave no slot; everything after them
                // shifts down
                Feed::Discard => {}
                Feed::Success(value) => output.push(value),
                Feed::Failure { value, error } => {
                    // output.len() is the post-discard index; the error and
                    // the best-effort value land in the same slot
                    errors.insert(output.len(), error);
                    output.push(value);
                }
            }
        }

        if errors.is_empty() {
            Feed::Success(Value::Array(output))
        } else {
            Feed::Failure {
                value: Value::Array(output),
                error: ErrorNode::Array(errors),
            }
        }
    }
}
