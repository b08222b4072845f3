//! Schema declaration and execution
//!
//! A [`Schema`] is an immutable filter tree built once with
//! [`SchemaBuilder`] and fed any number of raw records afterwards. Feeding
//! never mutates the schema, so one instance can serve concurrent callers.

use crate::errors::{DefaultMessages, MessageRenderer};
use crate::filters::{
    AnyFilter, AnyOptions, BooleanFilter, BooleanOptions, DateFilter, DateOptions, DecimalFilter,
    DecimalOptions, Filter, FloatFilter, FloatOptions, IntegerFilter, IntegerOptions,
    MappingFilter, MappingOptions, SequenceFilter, SequenceOptions, StringFilter, StringOptions,
    TimeFilter, TimeOptions, UuidFilter, UuidOptions,
};
use crate::outcome::Outcome;
use crate::value::Value;
use std::sync::Arc;

/// A declared input shape: one root mapping plus a message renderer
///
/// # Examples
///
/// ```
/// use intake::prelude::*;
/// use serde_json::json;
///
/// let schema = Schema::builder()
///     .string("name", StringOptions::default())
///     .integer("age", IntegerOptions { min: Some(0), ..Default::default() })
///     .build();
///
/// let outcome = schema.feed(json!({ "name": " Ada ", "age": "36", "role": "admin" }));
/// assert!(outcome.success());
///
/// let record = outcome.value().and_then(Value::as_object).unwrap();
/// assert_eq!(record["name"], Value::from("Ada"));
/// assert_eq!(record["age"], Value::Integer(36));
/// // "role" was never declared, so it is gone
/// assert!(!record.contains_key("role"));
/// ```
pub struct Schema {
    root: MappingFilter,
    renderer: Arc<dyn MessageRenderer>,
}

impl Schema {
    /// Start declaring a schema
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// Replace the message renderer used by [`messages`](Self::messages)
    pub fn with_renderer(mut self, renderer: impl MessageRenderer + 'static) -> Self {
        self.renderer = Arc::new(renderer);
        self
    }

    /// Feed one raw record through the filter tree
    ///
    /// Descent is recursive and places no depth limit of its own; callers
    /// accepting adversarial input should bound nesting before feeding.
    ///
    /// ```
    /// use intake::prelude::*;
    /// use serde_json::json;
    ///
    /// let schema = Schema::builder()
    ///     .string("name", StringOptions::default())
    ///     .build();
    ///
    /// let outcome = schema.feed(json!({ "name": "" }));
    /// assert!(!outcome.success());
    /// assert_eq!(outcome.errors().unwrap().codes(), json!({ "name": "empty" }));
    /// assert_eq!(schema.messages(&outcome), vec!["Name cannot be empty"]);
    /// ```
    pub fn feed(&self, raw: impl Into<Value>) -> Outcome {
        let raw = raw.into();
        let outcome = Outcome::from_feed(self.root.feed(raw));
        tracing::debug!(
            success = outcome.success(),
            fields = self.root.len(),
            "record filtered"
        );
        outcome
    }

    /// The renderer prose projections go through
    pub fn renderer(&self) -> &dyn MessageRenderer {
        self.renderer.as_ref()
    }

    /// Flattened prose for an outcome's errors, empty on success
    pub fn messages(&self, outcome: &Outcome) -> Vec<String> {
        outcome.messages(self.renderer())
    }

    /// Declared top-level keys in declaration order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.root.keys()
    }
}

/// Fluent declaration of a mapping's fields
///
/// The same builder declares the root schema and, through closures, the
/// fields of nested mappings.
pub struct SchemaBuilder {
    children: Vec<Box<dyn Filter>>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
        }
    }

    fn declare(mut self, child: Box<dyn Filter>) -> Self {
        self.children.push(child);
        self
    }

    /// Declare a field accepting anything
    pub fn any(self, key: &str, options: AnyOptions) -> Self {
        self.declare(Box::new(AnyFilter::new(key, options)))
    }

    /// Declare a string field
    pub fn string(self, key: &str, options: StringOptions) -> Self {
        self.declare(Box::new(StringFilter::new(key, options)))
    }

    /// Declare an integer field
    pub fn integer(self, key: &str, options: IntegerOptions) -> Self {
        self.declare(Box::new(IntegerFilter::new(key, options)))
    }

    /// Declare a float field
    pub fn float(self, key: &str, options: FloatOptions) -> Self {
        self.declare(Box::new(FloatFilter::new(key, options)))
    }

    /// Declare a decimal field
    pub fn decimal(self, key: &str, options: DecimalOptions) -> Self {
        self.declare(Box::new(DecimalFilter::new(key, options)))
    }

    /// Declare a boolean field
    pub fn boolean(self, key: &str, options: BooleanOptions) -> Self {
        self.declare(Box::new(BooleanFilter::new(key, options)))
    }

    /// Declare a calendar date field
    pub fn date(self, key: &str, options: DateOptions) -> Self {
        self.declare(Box::new(DateFilter::new(key, options)))
    }

    /// Declare a UTC timestamp field
    pub fn time(self, key: &str, options: TimeOptions) -> Self {
        self.declare(Box::new(TimeFilter::new(key, options)))
    }

    /// Declare a UUID field
    pub fn uuid(self, key: &str, options: UuidOptions) -> Self {
        self.declare(Box::new(UuidFilter::new(key, options)))
    }

    /// Declare a sequence field; `element` builds the filter applied to
    /// every member
    ///
    /// ```
    /// use intake::prelude::*;
    /// use serde_json::json;
    ///
    /// let schema = Schema::builder()
    ///     .sequence("scores", SequenceOptions::default(), |e| {
    ///         e.integer(IntegerOptions::default())
    ///     })
    ///     .build();
    ///
    /// let outcome = schema.feed(json!({ "scores": ["3", 4] }));
    /// assert!(outcome.success());
    /// ```
    pub fn sequence(
        self,
        key: &str,
        options: SequenceOptions,
        element: impl FnOnce(ElementBuilder) -> Box<dyn Filter>,
    ) -> Self {
        let element = element(ElementBuilder::new(key));
        self.declare(Box::new(SequenceFilter::new(key, options, element)))
    }

    /// Declare a nested mapping field; `fields` declares its children
    ///
    /// ```
    /// use intake::prelude::*;
    /// use serde_json::json;
    ///
    /// let schema = Schema::builder()
    ///     .mapping("address", MappingOptions::default(), |fields| {
    ///         fields.string("city", StringOptions::default())
    ///     })
    ///     .build();
    ///
    /// let outcome = schema.feed(json!({ "address": { "city": "Nantes" } }));
    /// assert!(outcome.success());
    /// ```
    pub fn mapping(
        self,
        key: &str,
        options: MappingOptions,
        fields: impl FnOnce(SchemaBuilder) -> SchemaBuilder,
    ) -> Self {
        let mut child = MappingFilter::new(key, options);
        for filter in fields(SchemaBuilder::new()).children {
            child.declare(filter);
        }
        self.declare(Box::new(child))
    }

    /// Finish the declaration with the default English renderer
    pub fn build(self) -> Schema {
        let mut root = MappingFilter::new("", MappingOptions::default());
        for child in self.children {
            root.declare(child);
        }
        Schema {
            root,
            renderer: Arc::new(DefaultMessages),
        }
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds the element filter of a sequence
///
/// Element filters carry the sequence's own key, so their errors render
/// under it (`"1st Scores must be an integer"`).
pub struct ElementBuilder {
    key: String,
}

impl ElementBuilder {
    fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
        }
    }

    pub fn any(self, options: AnyOptions) -> Box<dyn Filter> {
        Box::new(AnyFilter::new(self.key, options))
    }

    pub fn string(self, options: StringOptions) -> Box<dyn Filter> {
        Box::new(StringFilter::new(self.key, options))
    }

    pub fn integer(self, options: IntegerOptions) -> Box<dyn Filter> {
        Box::new(IntegerFilter::new(self.key, options))
    }

    pub fn float(self, options: FloatOptions) -> Box<dyn Filter> {
        Box::new(FloatFilter::new(self.key, options))
    }

    pub fn decimal(self, options: DecimalOptions) -> Box<dyn Filter> {
        Box::new(DecimalFilter::new(self.key, options))
    }

    pub fn boolean(self, options: BooleanOptions) -> Box<dyn Filter> {
        Box::new(BooleanFilter::new(self.key, options))
    }

    pub fn date(self, options: DateOptions) -> Box<dyn Filter> {
        Box::new(DateFilter::new(self.key, options))
    }

    pub fn time(self, options: TimeOptions) -> Box<dyn Filter> {
        Box::new(TimeFilter::new(self.key, options))
    }

    pub fn uuid(self, options: UuidOptions) -> Box<dyn Filter> {
        Box::new(UuidFilter::new(self.key, options))
    }

    /// Elements that are themselves sequences
    pub fn sequence(
        self,
        options: SequenceOptions,
        element: impl FnOnce(ElementBuilder) -> Box<dyn Filter>,
    ) -> Box<dyn Filter> {
        let inner = element(ElementBuilder::new(&self.key));
        Box::new(SequenceFilter::new(self.key, options, inner))
    }

    /// Elements that are records
    pub fn mapping(
        self,
        options: MappingOptions,
        fields: impl FnOnce(SchemaBuilder) -> SchemaBuilder,
    ) -> Box<dyn Filter> {
        let mut child = MappingFilter::new(self.key, options);
        for filter in fields(SchemaBuilder::new()).children {
            child.declare(filter);
        }
        Box::new(child)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ErrorCode, ErrorContext};
    use serde_json::json;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_schema_is_send_and_sync() {
        assert_send_sync::<Schema>();
    }

    #[test]
    fn test_builder_preserves_declaration_order() {
        let schema = Schema::builder()
            .string("zeta", StringOptions::default())
            .integer("alpha", IntegerOptions::default())
            .boolean("mid", BooleanOptions::default())
            .build();
        let keys: Vec<&str> = schema.keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_feed_accepts_json_and_values() {
        let schema = Schema::builder()
            .string("name", StringOptions::default())
            .build();

        assert!(schema.feed(json!({ "name": "bob" })).success());
        assert!(schema.feed(Value::from(json!({ "name": "bob" }))).success());
    }

    #[test]
    fn test_nil_root_is_denied() {
        let schema = Schema::builder()
            .string("name", StringOptions::default())
            .build();
        let outcome = schema.feed(json!(null));
        assert_eq!(
            outcome.errors().and_then(|e| e.code()),
            Some(ErrorCode::Nils),
        );
    }

    #[test]
    fn test_non_record_root_is_denied() {
        let schema = Schema::builder()
            .string("name", StringOptions::default())
            .build();
        let outcome = schema.feed(json!("bob"));
        assert_eq!(outcome.errors().and_then(|e| e.code()), Some(ErrorCode::Hash));
    }

    #[test]
    fn test_custom_renderer_changes_messages_only() {
        struct Terse;

        impl MessageRenderer for Terse {
            fn render(
                &self,
                key: &str,
                code: ErrorCode,
                _context: &ErrorContext,
                _index: Option<usize>,
            ) -> String {
                format!("{key}:{code}")
            }
        }

        let schema = Schema::builder()
            .string("name", StringOptions::default())
            .build()
            .with_renderer(Terse);

        let outcome = schema.feed(json!({}));
        assert_eq!(schema.messages(&outcome), vec!["name:required"]);
        // Codes are renderer-independent
        assert_eq!(outcome.errors().unwrap().codes(), json!({ "name": "required" }));
    }

    #[test]
    fn test_schema_reuse_across_threads() {
        let schema = Schema::builder()
            .integer("n", IntegerOptions::default())
            .build();

        std::thread::scope(|scope| {
            for i in 0..4 {
                let schema = &schema;
                scope.spawn(move || {
                    let outcome = schema.feed(json!({ "n": i.to_string() }));
                    assert_eq!(
                        outcome.value().and_then(Value::as_object).unwrap()["n"],
                        Value::Integer(i),
                    );
                });
            }
        });
    }

    #[test]
    fn test_feeding_is_idempotent_on_canonical_values() {
        let schema = Schema::builder()
            .string("name", StringOptions::default())
            .integer("age", IntegerOptions::default())
            .build();

        let first = schema.feed(json!({ "name": " Ada ", "age": "36" }));
        let second = schema.feed(first.value().cloned().unwrap());
        assert_eq!(first.value(), second.value());
        assert!(second.success());
    }
}
