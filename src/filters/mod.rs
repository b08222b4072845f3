//! Filter contract and catalogue
//!
//! A filter owns one key in the declared shape. Feeding it a raw value runs
//! a fixed pipeline: settle the nil policy, coerce, type-check, validate.
//! Leaf filters stop there; the sequence and mapping filters recurse into
//! their children and assemble composite values and error trees.
//!
//! Every pipeline stage settles into a [`Feed`]: success with the coerced
//! value, failure with the best-effort value and an error node, or discard
//! with nothing at all.

use crate::errors::{ErrorAtom, ErrorCode, ErrorContext, ErrorNode};
use crate::outcome::Feed;
use crate::value::Value;

pub mod any;
pub mod boolean;
pub mod date;
pub mod decimal;
pub mod float;
pub mod integer;
pub mod mapping;
pub mod sequence;
pub mod string;
pub mod time;
pub mod uuid;

pub use any::{AnyFilter, AnyOptions};
pub use boolean::{BooleanFilter, BooleanOptions};
pub use date::{DateFilter, DateOptions};
pub use decimal::{DecimalFilter, DecimalOptions};
pub use float::{FloatFilter, FloatOptions};
pub use integer::{IntegerFilter, IntegerOptions};
pub use mapping::{MappingFilter, MappingOptions};
pub use sequence::{SequenceFilter, SequenceOptions};
pub use string::{StringFilter, StringOptions};
pub use time::{TimeFilter, TimeOptions};
pub use uuid::{UuidFilter, UuidOptions};

/// What to do with a value in a state the filter does not accept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Record an error
    Deny,
    /// Let the value through as-is
    Allow,
    /// Drop the value with no output and no error
    Discard,
}

/// Options shared by every filter kind
#[derive(Debug, Clone)]
pub struct CommonOptions {
    /// Applied when the value is present but nil
    pub nils: Policy,
    /// Applied by the enclosing mapping when the key is absent
    pub none: Policy,
    /// Applied when coercion or validation fails. `Allow` would accept a
    /// value the filter just rejected, so it is treated as `Deny`.
    pub invalid: Policy,
    /// Injected by the enclosing mapping when the key is absent
    pub default: Option<Value>,
}

impl Default for CommonOptions {
    fn default() -> Self {
        Self {
            nils: Policy::Deny,
            none: Policy::Deny,
            invalid: Policy::Deny,
            default: None,
        }
    }
}

/// One key's worth of filtering behavior
///
/// Implementors supply coercion and checks; the provided [`feed`](Filter::feed)
/// method runs them in pipeline order. Composite filters override `feed` to
/// recurse into children after the shared front half, which they reach
/// through [`feed_base`](Filter::feed_base).
pub trait Filter: Send + Sync {
    /// The key this filter was declared under. Sequence element filters
    /// inherit the sequence's key so their errors render with it.
    fn key(&self) -> &str;

    /// The shared policy options for this filter
    fn common(&self) -> &CommonOptions;

    /// Best-effort conversion of the raw value toward this filter's type.
    /// Values that cannot be converted come back unchanged for the type
    /// check to reject.
    fn coerce(&self, raw: Value) -> Value {
        raw
    }

    /// Type check applied after coercion
    fn coerce_error(&self, coerced: &Value) -> Option<ErrorCode>;

    /// Domain checks applied after the type check, first violation wins
    fn validate(&self, _coerced: &Value) -> Option<ErrorCode> {
        None
    }

    /// The policy applied when `code` is produced. Filters with per-state
    /// knobs (the string filter's `empty`, for instance) override this.
    fn policy_for(&self, _code: ErrorCode) -> Policy {
        self.common().invalid
    }

    /// Option values recorded on atoms for `code`, for message rendering
    fn context_for(&self, _code: ErrorCode) -> ErrorContext {
        ErrorContext::new()
    }

    /// Settle a failure `code` against this filter's policies
    fn fail(&self, value: Value, code: ErrorCode) -> Feed {
        match self.policy_for(code) {
            Policy::Discard => Feed::Discard,
            Policy::Deny | Policy::Allow => Feed::Failure {
                value,
                error: ErrorNode::Atom(ErrorAtom::with_context(
                    self.key(),
                    code,
                    self.context_for(code),
                )),
            },
        }
    }

    /// Front half of the pipeline shared by every filter: settle the nil
    /// policy, coerce, type-check. `Ok` carries the coerced value onward;
    /// `Err` carries a feed that already settled.
    fn feed_base(&self, raw: Value) -> Result<Value, Feed> {
        if raw.is_null() {
            return Err(match self.common().nils {
                Policy::Allow => Feed::Success(Value::Null),
                Policy::Discard => Feed::Discard,
                Policy::Deny => Feed::Failure {
                    value: Value::Null,
                    error: ErrorNode::Atom(ErrorAtom::new(self.key(), ErrorCode::Nils)),
                },
            });
        }
        let coerced = self.coerce(raw);
        if let Some(code) = self.coerce_error(&coerced) {
            return Err(self.fail(coerced, code));
        }
        Ok(coerced)
    }

    /// Run the full pipeline against one raw value
    fn feed(&self, raw: Value) -> Feed {
        let coerced = match self.feed_base(raw) {
            Ok(value) => value,
            Err(settled) => return settled,
        };
        if let Some(code) = self.validate(&coerced) {
            return self.fail(coerced, code);
        }
        Feed::Success(coerced)
    }
}
