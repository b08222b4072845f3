//! Units of work guarded by a schema
//!
//! A unit couples a schema with the operation it protects. [`Unit::run`]
//! feeds the raw input through the schema and only executes on success, so
//! the operation body always sees canonical, whitelisted values.

use crate::outcome::Invalid;
use crate::schema::Schema;
use crate::value::Value;

/// An operation that only ever runs on filtered input
///
/// # Examples
///
/// ```
/// use intake::prelude::*;
/// use serde_json::json;
///
/// struct Greet {
///     schema: Schema,
/// }
///
/// impl Greet {
///     fn new() -> Self {
///         let schema = Schema::builder()
///             .string("name", StringOptions::default())
///             .build();
///         Self { schema }
///     }
/// }
///
/// impl Unit for Greet {
///     type Output = String;
///
///     fn schema(&self) -> &Schema {
///         &self.schema
///     }
///
///     fn execute(&self, inputs: Value) -> String {
///         let name = inputs.as_object().and_then(|r| r["name"].as_str()).unwrap_or("");
///         format!("hello, {name}")
///     }
/// }
///
/// let greet = Greet::new();
/// assert_eq!(greet.run(json!({ "name": " Ada " })).unwrap(), "hello, Ada");
/// assert!(greet.run(json!({})).is_err());
/// ```
pub trait Unit {
    /// What a successful run produces
    type Output;

    /// The schema guarding this unit
    fn schema(&self) -> &Schema;

    /// The operation body, handed the filtered value tree
    fn execute(&self, inputs: Value) -> Self::Output;

    /// Filter `raw` and execute on success
    fn run(&self, raw: impl Into<Value>) -> Result<Self::Output, Invalid>
    where
        Self: Sized,
    {
        self.schema()
            .feed(raw)
            .into_result()
            .map(|inputs| self.execute(inputs))
    }
}
