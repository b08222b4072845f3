//! UUID filter: identifier fields

use crate::errors::ErrorCode;
use crate::filters::{CommonOptions, Filter};
use crate::value::Value;
use uuid::Uuid;

/// Options for [`UuidFilter`]
#[derive(Debug, Clone, Default)]
pub struct UuidOptions {
    pub common: CommonOptions,
}

/// Filters one field into a [`Uuid`]
///
/// Accepts hyphenated, simple, and urn string forms.
pub struct UuidFilter {
    key: String,
    options: UuidOptions,
}

impl UuidFilter {
    pub fn new(key: impl Into<String>, options: UuidOptions) -> Self {
        Self {
            key: key.into(),
            options,
        }
    }
}

impl Filter for UuidFilter {
    fn key(&self) -> &str {
        &self.key
    }

    fn common(&self) -> &CommonOptions {
        &self.options.common
    }

    fn coerce(&self, raw: Value) -> Value {
        match raw {
            Value::Uuid(_) => raw,
            Value::String(s) => match Uuid::parse_str(s.trim()) {
                Ok(u) => Value::Uuid(u),
                Err(_) => Value::String(s),
            },
            other => other,
        }
    }

    fn coerce_error(&self, coerced: &Value) -> Option<ErrorCode> {
        match coerced {
            Value::Uuid(_) => None,
            _ => Some(ErrorCode::Uuid),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorNode;
    use crate::outcome::Feed;

    fn filter() -> UuidFilter {
        UuidFilter::new("id", UuidOptions::default())
    }

    #[test]
    fn test_uuids_pass_through() {
        let id = Uuid::new_v4();
        assert_eq!(filter().feed(Value::Uuid(id)), Feed::Success(Value::Uuid(id)));
    }

    #[test]
    fn test_parses_hyphenated_and_simple_forms() {
        let id = Uuid::new_v4();
        let f = filter();
        assert_eq!(f.feed(Value::from(id.to_string())), Feed::Success(Value::Uuid(id)));
        assert_eq!(
            f.feed(Value::from(id.simple().to_string())),
            Feed::Success(Value::Uuid(id)),
        );
    }

    #[test]
    fn test_junk_strings_keep_original_value() {
        let feed = filter().feed(Value::from("not-a-uuid"));
        assert_eq!(feed.error().and_then(ErrorNode::code), Some(ErrorCode::Uuid));
        assert_eq!(feed.value(), Some(&Value::from("not-a-uuid")));
    }

    #[test]
    fn test_numbers_are_not_uuids() {
        let feed = filter().feed(Value::Integer(42));
        assert_eq!(feed.error().and_then(ErrorNode::code), Some(ErrorCode::Uuid));
    }
}
