//! Error tree mirroring the shape of the filtered input
//!
//! Filtering never aborts on the first failure. Every rejected value is
//! recorded in a tree whose hashes and arrays line up with the record that
//! produced them, so callers can address errors the same way they address
//! fields.

use crate::errors::messages::MessageRenderer;
use crate::value::Value;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Machine-readable code naming why a filter rejected a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// A required field was absent
    Required,
    /// A field was present but nil and nils are denied
    Nils,
    /// A string was empty and empties are denied
    Empty,
    /// Value could not be coerced to a string
    String,
    /// Value could not be coerced to an integer
    Integer,
    /// Value could not be coerced to a float
    Float,
    /// Value could not be coerced to a decimal
    Decimal,
    /// Value could not be coerced to a boolean
    Boolean,
    /// Value could not be coerced to a calendar date
    Date,
    /// Value could not be coerced to a timestamp
    Time,
    /// Value could not be coerced to a UUID
    Uuid,
    /// Value is not an array where a sequence was declared
    Array,
    /// Value is not a hash where a mapping was declared
    Hash,
    /// Value fell below a declared minimum
    Min,
    /// Value exceeded a declared maximum
    Max,
    /// Value is not one of the declared options
    In,
    /// String did not match the declared pattern
    Matches,
    /// Decimal carried more fractional digits than declared
    Scale,
}

impl ErrorCode {
    /// The wire form of the code, as it appears in `codes()` projections
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Required => "required",
            ErrorCode::Nils => "nils",
            ErrorCode::Empty => "empty",
            ErrorCode::String => "string",
            ErrorCode::Integer => "integer",
            ErrorCode::Float => "float",
            ErrorCode::Decimal => "decimal",
            ErrorCode::Boolean => "boolean",
            ErrorCode::Date => "date",
            ErrorCode::Time => "time",
            ErrorCode::Uuid => "uuid",
            ErrorCode::Array => "array",
            ErrorCode::Hash => "hash",
            ErrorCode::Min => "min",
            ErrorCode::Max => "max",
            ErrorCode::In => "in",
            ErrorCode::Matches => "matches",
            ErrorCode::Scale => "scale",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Option values that triggered a failure (e.g. the violated `min` bound),
/// kept for message interpolation
pub type ErrorContext = IndexMap<String, Value>;

/// A single rejected value: the key it was filtered under, the code, and
/// any option context useful for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorAtom {
    key: String,
    code: ErrorCode,
    context: ErrorContext,
}

impl ErrorAtom {
    pub fn new(key: impl Into<String>, code: ErrorCode) -> Self {
        Self {
            key: key.into(),
            code,
            context: ErrorContext::new(),
        }
    }

    pub fn with_context(key: impl Into<String>, code: ErrorCode, context: ErrorContext) -> Self {
        Self {
            key: key.into(),
            code,
            context,
        }
    }

    /// The field key this atom was recorded under
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn context(&self) -> &ErrorContext {
        &self.context
    }

    /// Render this atom as prose. `index` is the element position when the
    /// atom sits directly inside a sequence.
    pub fn message(&self, renderer: &dyn MessageRenderer, index: Option<usize>) -> String {
        renderer.render(&self.key, self.code, &self.context, index)
    }
}

/// Errors for a filtered record, keyed by field in declaration order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ErrorHash {
    entries: IndexMap<String, ErrorNode>,
}

impl ErrorHash {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `node` under `key`, replacing any earlier error for that key
    pub fn insert(&mut self, key: impl Into<String>, node: ErrorNode) {
        self.entries.insert(key.into(), node);
    }

    pub fn get(&self, key: &str) -> Option<&ErrorNode> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Keys in declaration order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ErrorNode)> {
        self.entries.iter().map(|(key, node)| (key.as_str(), node))
    }
}

/// Errors for a filtered sequence, indexed by post-discard position.
///
/// Positions whose element passed hold no entry and project as `null`, so
/// error indexes always line up with the output array.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ErrorArray {
    entries: Vec<Option<ErrorNode>>,
}

impl ErrorArray {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `node` at `index`, padding skipped positions with holes
    pub fn insert(&mut self, index: usize, node: ErrorNode) {
        while self.entries.len() < index {
            self.entries.push(None);
        }
        if index < self.entries.len() {
            self.entries[index] = Some(node);
        } else {
            self.entries.push(Some(node));
        }
    }

    pub fn get(&self, index: usize) -> Option<&ErrorNode> {
        self.entries.get(index).and_then(Option::as_ref)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(Option::is_none)
    }

    /// Number of positions covered, holes included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<&ErrorNode>> {
        self.entries.iter().map(Option::as_ref)
    }
}

/// A node in the error tree: a single atom, a keyed hash, or a sparse array
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorNode {
    Atom(ErrorAtom),
    Hash(ErrorHash),
    Array(ErrorArray),
}

impl ErrorNode {
    pub fn as_atom(&self) -> Option<&ErrorAtom> {
        match self {
            ErrorNode::Atom(atom) => Some(atom),
            _ => None,
        }
    }

    pub fn as_hash(&self) -> Option<&ErrorHash> {
        match self {
            ErrorNode::Hash(hash) => Some(hash),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ErrorArray> {
        match self {
            ErrorNode::Array(array) => Some(array),
            _ => None,
        }
    }

    /// The code of this node when it is an atom
    pub fn code(&self) -> Option<ErrorCode> {
        self.as_atom().map(ErrorAtom::code)
    }

    /// Project the tree onto bare codes: atoms become code strings, hashes
    /// become objects, arrays become arrays with `null` holes
    pub fn codes(&self) -> serde_json::Value {
        match self {
            ErrorNode::Atom(atom) => serde_json::Value::String(atom.code().as_str().to_string()),
            ErrorNode::Hash(hash) => serde_json::Value::Object(
                hash.entries
                    .iter()
                    .map(|(key, node)| (key.clone(), node.codes()))
                    .collect(),
            ),
            ErrorNode::Array(array) => serde_json::Value::Array(
                array
                    .entries
                    .iter()
                    .map(|slot| slot.as_ref().map_or(serde_json::Value::Null, Self::codes))
                    .collect(),
            ),
        }
    }

    /// Project the tree onto rendered messages with the same shape as
    /// [`codes`](Self::codes)
    pub fn message(&self, renderer: &dyn MessageRenderer) -> serde_json::Value {
        self.message_at(renderer, None)
    }

    fn message_at(&self, renderer: &dyn MessageRenderer, index: Option<usize>) -> serde_json::Value {
        match self {
            ErrorNode::Atom(atom) => serde_json::Value::String(atom.message(renderer, index)),
            ErrorNode::Hash(hash) => serde_json::Value::Object(
                hash.entries
                    .iter()
                    .map(|(key, node)| (key.clone(), node.message_at(renderer, None)))
                    .collect(),
            ),
            ErrorNode::Array(array) => serde_json::Value::Array(
                array
                    .entries
                    .iter()
                    .enumerate()
                    .map(|(i, slot)| match slot {
                        Some(node) => node.message_at(renderer, Some(i)),
                        None => serde_json::Value::Null,
                    })
                    .collect(),
            ),
        }
    }

    /// Flatten the tree into rendered messages, depth-first: hash entries in
    /// declaration order, array entries in index order
    pub fn message_list(&self, renderer: &dyn MessageRenderer) -> Vec<String> {
        let mut messages = Vec::new();
        self.collect_messages(renderer, None, &mut messages);
        messages
    }

    fn collect_messages(
        &self,
        renderer: &dyn MessageRenderer,
        index: Option<usize>,
        out: &mut Vec<String>,
    ) {
        match self {
            ErrorNode::Atom(atom) => out.push(atom.message(renderer, index)),
            ErrorNode::Hash(hash) => {
                for node in hash.entries.values() {
                    node.collect_messages(renderer, None, out);
                }
            }
            ErrorNode::Array(array) => {
                for (i, slot) in array.entries.iter().enumerate() {
                    if let Some(node) = slot {
                        node.collect_messages(renderer, Some(i), out);
                    }
                }
            }
        }
    }
}

impl From<ErrorAtom> for ErrorNode {
    fn from(atom: ErrorAtom) -> Self {
        ErrorNode::Atom(atom)
    }
}

impl From<ErrorHash> for ErrorNode {
    fn from(hash: ErrorHash) -> Self {
        ErrorNode::Hash(hash)
    }
}

impl From<ErrorArray> for ErrorNode {
    fn from(array: ErrorArray) -> Self {
        ErrorNode::Array(array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::messages::DefaultMessages;
    use serde_json::json;

    #[test]
    fn test_error_code_wire_form() {
        assert_eq!(ErrorCode::Required.as_str(), "required");
        assert_eq!(ErrorCode::In.as_str(), "in");
        assert_eq!(ErrorCode::Uuid.as_str(), "uuid");
        assert_eq!(serde_json::to_value(ErrorCode::Nils).unwrap(), json!("nils"));
    }

    #[test]
    fn test_atom_accessors() {
        let atom = ErrorAtom::new("name", ErrorCode::Required);
        assert_eq!(atom.key(), "name");
        assert_eq!(atom.code(), ErrorCode::Required);
        assert!(atom.context().is_empty());
    }

    #[test]
    fn test_hash_preserves_insertion_order() {
        let mut hash = ErrorHash::new();
        hash.insert("zeta", ErrorAtom::new("zeta", ErrorCode::Required).into());
        hash.insert("alpha", ErrorAtom::new("alpha", ErrorCode::Nils).into());
        let keys: Vec<&str> = hash.keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_hash_insert_replaces() {
        let mut hash = ErrorHash::new();
        hash.insert("key", ErrorAtom::new("key", ErrorCode::Required).into());
        hash.insert("key", ErrorAtom::new("key", ErrorCode::Nils).into());
        assert_eq!(hash.len(), 1);
        assert_eq!(hash.get("key").and_then(ErrorNode::code), Some(ErrorCode::Nils));
    }

    #[test]
    fn test_array_insert_pads_holes() {
        let mut array = ErrorArray::new();
        array.insert(2, ErrorAtom::new("items", ErrorCode::Integer).into());
        assert_eq!(array.len(), 3);
        assert!(array.get(0).is_none());
        assert!(array.get(1).is_none());
        assert!(array.get(2).is_some());
        assert!(!array.is_empty());
    }

    #[test]
    fn test_array_empty_when_no_entries() {
        assert!(ErrorArray::new().is_empty());
    }

    #[test]
    fn test_codes_projection_shapes() {
        let mut inner = ErrorArray::new();
        inner.insert(0, ErrorAtom::new("items", ErrorCode::Integer).into());
        inner.insert(2, ErrorAtom::new("items", ErrorCode::Integer).into());

        let mut hash = ErrorHash::new();
        hash.insert("name", ErrorAtom::new("name", ErrorCode::Required).into());
        hash.insert("items", ErrorNode::Array(inner));

        let codes = ErrorNode::Hash(hash).codes();
        assert_eq!(
            codes,
            json!({
                "name": "required",
                "items": ["integer", null, "integer"],
            })
        );
    }

    #[test]
    fn test_message_projection_mirrors_codes() {
        let mut array = ErrorArray::new();
        array.insert(0, ErrorAtom::new("items", ErrorCode::Integer).into());

        let message = ErrorNode::Array(array).message(&DefaultMessages);
        assert_eq!(message, json!(["1st Items must be an integer"]));
    }

    #[test]
    fn test_message_list_is_depth_first_and_ordered() {
        let mut nested = ErrorHash::new();
        nested.insert("city", ErrorAtom::new("city", ErrorCode::Required).into());

        let mut hash = ErrorHash::new();
        hash.insert("name", ErrorAtom::new("name", ErrorCode::Required).into());
        hash.insert("address", ErrorNode::Hash(nested));

        let messages = ErrorNode::Hash(hash).message_list(&DefaultMessages);
        assert_eq!(messages, vec!["Name is required", "City is required"]);
    }

    #[test]
    fn test_message_list_skips_array_holes() {
        let mut array = ErrorArray::new();
        array.insert(1, ErrorAtom::new("items", ErrorCode::Integer).into());

        let messages = ErrorNode::Array(array).message_list(&DefaultMessages);
        assert_eq!(messages, vec!["2nd Items must be an integer"]);
    }
}
