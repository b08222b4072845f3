//! Human-readable rendering of error atoms
//!
//! Rendering is a strategy trait so hosts can localize or re-brand messages
//! without touching filtering logic. The built-in renderer produces English
//! prose like `"Newsletter Subscription must be a boolean"`.

use crate::errors::node::{ErrorCode, ErrorContext};
use crate::inflect::Inflect;

/// Strategy for turning one error atom into prose
pub trait MessageRenderer: Send + Sync {
    /// Render the atom recorded under `key` with the given `code`.
    ///
    /// `context` carries the option values that triggered the failure (the
    /// violated `min` bound, for instance). `index` is the element position
    /// when the atom sits directly inside a sequence, so renderers can
    /// produce ordinal subjects like `"1st Items"`.
    fn render(
        &self,
        key: &str,
        code: ErrorCode,
        context: &ErrorContext,
        index: Option<usize>,
    ) -> String;
}

/// Built-in English renderer
///
/// Messages read `"<Subject> <predicate>"` where the subject is the
/// titleized key, prefixed with an ordinal inside sequences.
///
/// # Examples
///
/// ```
/// use intake::errors::{DefaultMessages, ErrorCode, ErrorContext, MessageRenderer};
///
/// let renderer = DefaultMessages;
/// let context = ErrorContext::new();
///
/// assert_eq!(
///     renderer.render("newsletter_subscription", ErrorCode::Boolean, &context, None),
///     "Newsletter Subscription must be a boolean",
/// );
/// assert_eq!(
///     renderer.render("arr1", ErrorCode::Integer, &context, Some(0)),
///     "1st Arr1 must be an integer",
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMessages;

impl DefaultMessages {
    fn predicate(code: ErrorCode, context: &ErrorContext) -> String {
        match code {
            ErrorCode::Required => "is required".to_string(),
            ErrorCode::Nils => "cannot be nil".to_string(),
            ErrorCode::Empty => "cannot be empty".to_string(),
            ErrorCode::String => "must be a string".to_string(),
            ErrorCode::Integer => "must be an integer".to_string(),
            ErrorCode::Float => "must be a number".to_string(),
            ErrorCode::Decimal => "must be a decimal".to_string(),
            ErrorCode::Boolean => "must be a boolean".to_string(),
            ErrorCode::Date => "must be a date".to_string(),
            ErrorCode::Time => "must be a time".to_string(),
            ErrorCode::Uuid => "must be a UUID".to_string(),
            ErrorCode::Array => "must be an array".to_string(),
            ErrorCode::Hash => "must be a hash".to_string(),
            ErrorCode::In => "is not an available option".to_string(),
            ErrorCode::Matches => "has an invalid format".to_string(),
            ErrorCode::Min => match context.get("min") {
                Some(min) => format!("must be at least {min}"),
                None => "is below the minimum".to_string(),
            },
            ErrorCode::Max => match context.get("max") {
                Some(max) => format!("must be at most {max}"),
                None => "is above the maximum".to_string(),
            },
            ErrorCode::Scale => match context.get("scale") {
                Some(scale) => format!("cannot have more than {scale} decimal places"),
                None => "has too many decimal places".to_string(),
            },
        }
    }
}

impl MessageRenderer for DefaultMessages {
    fn render(
        &self,
        key: &str,
        code: ErrorCode,
        context: &ErrorContext,
        index: Option<usize>,
    ) -> String {
        let predicate = Self::predicate(code, context);
        let mut subject = Inflect::titleize(key);
        if let Some(i) = index {
            subject = if subject.is_empty() {
                Inflect::ordinalize(i)
            } else {
                format!("{} {}", Inflect::ordinalize(i), subject)
            };
        }
        if subject.is_empty() {
            Inflect::capitalize(&predicate)
        } else {
            format!("{subject} {predicate}")
        }
    }
}
