//! Filtering results: per-filter feeds and the top-level outcome

use crate::errors::{DefaultMessages, ErrorNode, MessageRenderer};
use crate::value::Value;
use thiserror::Error;

/// Result of feeding one raw value through one filter
///
/// A feed settles exactly one way: the value passed, the value failed, or
/// the value was discarded by policy. Discarded values leave no trace in
/// either the output or the error tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Feed {
    /// The value passed; carry the coerced form forward
    Success(Value),
    /// The value failed; keep the best-effort coercion alongside the error
    Failure { value: Value, error: ErrorNode },
    /// Drop the value entirely: no output, no error
    Discard,
}

impl Feed {
    pub fn is_success(&self) -> bool {
        matches!(self, Feed::Success(_))
    }

    pub fn is_discard(&self) -> bool {
        matches!(self, Feed::Discard)
    }

    /// The coerced value, whether the feed passed or failed
    pub fn value(&self) -> Option<&Value> {
        match self {
            Feed::Success(value) | Feed::Failure { value, .. } => Some(value),
            Feed::Discard => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorNode> {
        match self {
            Feed::Failure { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// The result of feeding a raw record through a schema
///
/// `errors()` is `None` exactly when the record passed. On failure,
/// `value()` still carries the fields that did pass, so hosts can echo the
/// partially filtered record back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    value: Option<Value>,
    error: Option<ErrorNode>,
}

impl Outcome {
    pub(crate) fn from_feed(feed: Feed) -> Self {
        match feed {
            Feed::Success(value) => Self {
                value: Some(value),
                error: None,
            },
            Feed::Failure { value, error } => Self {
                value: Some(value),
                error: Some(error),
            },
            // Root filters never discard, so this arm is only reachable
            // through hand-built feeds.
            Feed::Discard => Self {
                value: None,
                error: None,
            },
        }
    }

    /// Whether the record passed every filter
    pub fn success(&self) -> bool {
        self.error.is_none()
    }

    /// The filtered value tree, typed and whitelisted
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// The error tree, mirroring the shape of the failing input
    pub fn errors(&self) -> Option<&ErrorNode> {
        self.error.as_ref()
    }

    pub fn into_value(self) -> Option<Value> {
        self.value
    }

    /// Flattened prose for every recorded error, empty on success
    pub fn messages(&self, renderer: &dyn MessageRenderer) -> Vec<String> {
        self.error
            .as_ref()
            .map(|node| node.message_list(renderer))
            .unwrap_or_default()
    }

    /// Convert into a `Result`, consuming the outcome
    pub fn into_result(self) -> Result<Value, Invalid> {
        match self.error {
            Some(error) => Err(Invalid::new(error)),
            None => Ok(self.value.unwrap_or(Value::Null)),
        }
    }
}

/// Error returned when a schema rejects a record
///
/// `Display` flattens the tree through the default renderer; the full tree
/// stays available for structured handling.
#[derive(Debug, Clone, Error)]
#[error("invalid input: {summary}")]
pub struct Invalid {
    errors: ErrorNode,
    summary: String,
}

impl Invalid {
    pub fn new(errors: ErrorNode) -> Self {
        let summary = errors.message_list(&DefaultMessages).join("; ");
        Self { errors, summary }
    }

    pub fn errors(&self) -> &ErrorNode {
        &self.errors
    }

    pub fn into_errors(self) -> ErrorNode {
        self.errors
    }
}
