//! Mapping filter: whitelisted, per-key filtering of records

use crate::errors::{ErrorAtom, ErrorCode, ErrorHash, ErrorNode};
use crate::filters::{CommonOptions, Filter, Policy};
use crate::outcome::Feed;
use crate::value::{Object, Value};
use indexmap::IndexMap;

/// Options for [`MappingFilter`]
#[derive(Debug, Clone, Default)]
pub struct MappingOptions {
    pub common: CommonOptions,
}

/// Filters a record against a declared set of child filters
///
/// Declared keys are fed to their filters; keys the record carries but the
/// mapping never declared are dropped without comment. The output object
/// and the error hash both follow declaration order, not input order.
pub struct MappingFilter {
    key: String,
    options: MappingOptions,
    children: IndexMap<String, Box<dyn Filter>>,
}

impl MappingFilter {
    pub fn new(key: impl Into<String>, options: MappingOptions) -> Self {
        Self {
            key: key.into(),
            options,
            children: IndexMap::new(),
        }
    }

    /// Declare a child under its own key. Declaring a key twice replaces
    /// the earlier filter.
    pub fn declare(&mut self, child: Box<dyn Filter>) {
        self.children.insert(child.key().to_string(), child);
    }

    /// Declared keys in declaration order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.children.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Feed one present key's raw value to its child filter
    fn feed_present(
        &self,
        key: &str,
        child: &dyn Filter,
        raw: Value,
        output: &mut Object,
        errors: &mut ErrorHash,
    ) {
        match child.feed(raw) {
            Feed::Success(value) => {
                output.insert(key.to_string(), value);
            }
            // Discard wins over any declared default: the key vanishes
            Feed::Discard => {}
            Feed::Failure { error, .. } => {
                errors.insert(key.to_string(), error);
            }
        }
    }

    /// Settle an absent key: inject the default, demand it, or let it go
    fn feed_absent(&self, key: &str, child: &dyn Filter, output: &mut Object, errors: &mut ErrorHash) {
        let common = child.common();
        if let Some(default) = &common.default {
            output.insert(key.to_string(), default.clone());
        } else if common.none == Policy::Deny {
            errors.insert(
                key.to_string(),
                ErrorNode::Atom(ErrorAtom::new(key, ErrorCode::Required)),
            );
        }
        // Allow and Discard leave the key absent with no error
    }
}

impl Filter for MappingFilter {
    fn key(&self) -> &str {
        &self.key
    }

    fn common(&self) -> &CommonOptions {
        &self.options.common
    }

    fn coerce_error(&self, coerced: &Value) -> Option<ErrorCode> {
        match coerced {
            Value::Object(_) => None,
            _ => Some(ErrorCode::Hash),
        }
    }

    fn feed(&self, raw: Value) -> Feed {
        let coerced = match self.feed_base(raw) {
            Ok(value) => value,
            Err(settled) => return settled,
        };
        let Value::Object(mut data) = coerced else {
            return Feed::Success(coerced);
        };

        let mut output = Object::new();
        let mut errors = ErrorHash::new();
        for (key, child) in &self.children {
            match data.swap_remove(key) {
                Some(value) => self.feed_present(key, child.as_ref(), value, &mut output, &mut errors),
                None => self.feed_absent(key, child.as_ref(), &mut output, &mut errors),
            }
        }
        // Whatever remains in `data` was never declared: whitelisting drops
        // it silently, errors included.

        if errors.is_empty() {
            Feed::Success(Value::Object(output))
        } else {
            Feed::Failure {
                value: Value::Object(output),
                error: ErrorNode::Hash(errors),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::boolean::{BooleanFilter, BooleanOptions};
    use crate::filters::integer::{IntegerFilter, IntegerOptions};
    use crate::filters::string::{StringFilter, StringOptions};
    use serde_json::json;

    fn record(raw: serde_json::Value) -> Value {
        Value::from(raw)
    }

    /// name: required string, age: integer with common overrides
    fn people(age_common: CommonOptions) -> MappingFilter {
        let mut mapping = MappingFilter::new("", MappingOptions::default());
        mapping.declare(Box::new(StringFilter::new("name", StringOptions::default())));
        mapping.declare(Box::new(IntegerFilter::new(
            "age",
            IntegerOptions {
                common: age_common,
                ..Default::default()
            },
        )));
        mapping
    }

    // === shape ===

    #[test]
    fn test_non_objects_fail_with_hash_code() {
        let feed = people(CommonOptions::default()).feed(Value::from("bob"));
        assert_eq!(feed.error().and_then(ErrorNode::code), Some(ErrorCode::Hash));
    }

    #[test]
    fn test_unknown_keys_are_dropped_silently() {
        let feed = people(CommonOptions::default())
            .feed(record(json!({ "name": "bob", "age": 5, "admin": true })));
        let output = feed.value().and_then(Value::as_object).unwrap();
        assert!(output.contains_key("name"));
        assert!(!output.contains_key("admin"));
        assert!(feed.is_success());
    }

    #[test]
    fn test_output_follows_declaration_order() {
        let feed = people(CommonOptions::default())
            .feed(record(json!({ "age": 5, "name": "bob" })));
        let output = feed.value().and_then(Value::as_object).unwrap();
        let keys: Vec<&String> = output.keys().collect();
        assert_eq!(keys, vec!["name", "age"]);
    }

    // === absent keys ===

    #[test]
    fn test_absent_required_key_records_required() {
        let feed = people(CommonOptions::default()).feed(record(json!({ "name": "bob" })));
        let errors = feed.error().and_then(ErrorNode::as_hash).unwrap();
        assert_eq!(errors.get("age").and_then(ErrorNode::code), Some(ErrorCode::Required));
        // The field that passed is still in the output
        let output = feed.value().and_then(Value::as_object).unwrap();
        assert_eq!(output.get("name"), Some(&Value::from("bob")));
    }

    #[test]
    fn test_absent_key_with_default_gets_injected() {
        let common = CommonOptions {
            default: Some(Value::Integer(18)),
            ..Default::default()
        };
        let feed = people(common).feed(record(json!({ "name": "bob" })));
        assert!(feed.is_success());
        let output = feed.value().and_then(Value::as_object).unwrap();
        assert_eq!(output.get("age"), Some(&Value::Integer(18)));
    }

    #[test]
    fn test_absent_optional_key_is_omitted() {
        for policy in [Policy::Allow, Policy::Discard] {
            let common = CommonOptions {
                none: policy,
                ..Default::default()
            };
            let feed = people(common).feed(record(json!({ "name": "bob" })));
            assert!(feed.is_success());
            let output = feed.value().and_then(Value::as_object).unwrap();
            assert!(!output.contains_key("age"));
        }
    }

    // === present keys ===

    #[test]
    fn test_failing_key_is_left_out_of_the_output() {
        let feed = people(CommonOptions::default())
            .feed(record(json!({ "name": "bob", "age": "old" })));
        let output = feed.value().and_then(Value::as_object).unwrap();
        assert!(!output.contains_key("age"));
        assert_eq!(feed.error().unwrap().codes(), json!({ "age": "integer" }));
    }

    #[test]
    fn test_discarded_failure_beats_the_default() {
        let common = CommonOptions {
            invalid: Policy::Discard,
            default: Some(Value::Integer(18)),
            ..Default::default()
        };
        let feed = people(common).feed(record(json!({ "name": "bob", "age": "old" })));
        assert!(feed.is_success());
        let output = feed.value().and_then(Value::as_object).unwrap();
        assert!(!output.contains_key("age"));
    }

    #[test]
    fn test_present_nil_follows_the_nils_policy_not_none() {
        let common = CommonOptions {
            nils: Policy::Deny,
            none: Policy::Allow,
            ..Default::default()
        };
        let feed = people(common).feed(record(json!({ "name": "bob", "age": null })));
        let errors = feed.error().and_then(ErrorNode::as_hash).unwrap();
        assert_eq!(errors.get("age").and_then(ErrorNode::code), Some(ErrorCode::Nils));
    }

    // === nesting ===

    #[test]
    fn test_nested_mapping_errors_pass_through_unwrapped() {
        let mut address = MappingFilter::new("address", MappingOptions::default());
        address.declare(Box::new(StringFilter::new("city", StringOptions::default())));

        let mut mapping = MappingFilter::new("", MappingOptions::default());
        mapping.declare(Box::new(address));

        let feed = mapping.feed(record(json!({ "address": {} })));
        let errors = feed.error().and_then(ErrorNode::as_hash).unwrap();
        let nested = errors.get("address").and_then(ErrorNode::as_hash).unwrap();
        assert_eq!(nested.get("city").and_then(ErrorNode::code), Some(ErrorCode::Required));
        assert_eq!(
            feed.error().unwrap().codes(),
            json!({ "address": { "city": "required" } }),
        );
    }

    #[test]
    fn test_declaring_a_key_twice_replaces_it() {
        let mut mapping = MappingFilter::new("", MappingOptions::default());
        mapping.declare(Box::new(StringFilter::new("x", StringOptions::default())));
        mapping.declare(Box::new(BooleanFilter::new("x", BooleanOptions::default())));
        assert_eq!(mapping.len(), 1);

        let feed = mapping.feed(record(json!({ "x": true })));
        assert_eq!(feed, Feed::Success(record(json!({ "x": true }))));
    }
}
