//! Tests for units of work guarded by a schema
//!
//! These tests verify that:
//! - `run` filters the raw input before the operation body sees it
//! - Invalid input short-circuits with the full error tree attached
//! - The operation body only ever receives whitelisted, coerced values

use intake::prelude::*;
use serde_json::json;

#[derive(Debug, PartialEq)]
struct NewUser {
    name: String,
    admin: bool,
}

struct CreateUser {
    schema: Schema,
}

impl CreateUser {
    fn new() -> Self {
        let schema = Schema::builder()
            .string("name", StringOptions::default())
            .boolean(
                "admin",
                BooleanOptions {
                    common: CommonOptions {
                        default: Some(Value::Boolean(false)),
                        ..Default::default()
                    },
                    ..Default::default()
                },
            )
            .build();
        Self { schema }
    }
}

impl Unit for CreateUser {
    type Output = NewUser;

    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn execute(&self, inputs: Value) -> NewUser {
        let record = inputs.as_object().cloned().unwrap_or_default();
        NewUser {
            name: record
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            admin: record.get("admin").and_then(Value::as_bool).unwrap_or(false),
        }
    }
}

#[test]
fn test_run_coerces_before_executing() {
    let unit = CreateUser::new();
    let user = unit.run(json!({ "name": "  Ada  ", "admin": "1" })).unwrap();
    assert_eq!(
        user,
        NewUser {
            name: "Ada".to_string(),
            admin: true,
        }
    );
}

#[test]
fn test_run_applies_defaults() {
    let unit = CreateUser::new();
    let user = unit.run(json!({ "name": "Grace" })).unwrap();
    assert!(!user.admin);
}

#[test]
fn test_run_short_circuits_with_the_error_tree() {
    let unit = CreateUser::new();
    let err = unit.run(json!({ "admin": "maybe" })).unwrap_err();

    assert_eq!(
        err.errors().codes(),
        json!({ "name": "required", "admin": "boolean" })
    );
    assert_eq!(
        err.to_string(),
        "invalid input: Name is required; Admin must be a boolean",
    );
}

#[test]
fn test_run_drops_undeclared_keys_before_execute() {
    struct Echo {
        schema: Schema,
    }

    impl Unit for Echo {
        type Output = Vec<String>;

        fn schema(&self) -> &Schema {
            &self.schema
        }

        fn execute(&self, inputs: Value) -> Vec<String> {
            inputs
                .as_object()
                .map(|record| record.keys().cloned().collect())
                .unwrap_or_default()
        }
    }

    let unit = Echo {
        schema: Schema::builder()
            .string("wanted", StringOptions::default())
            .build(),
    };

    let keys = unit
        .run(json!({ "wanted": "yes", "smuggled": "no" }))
        .unwrap();
    assert_eq!(keys, vec!["wanted"]);
}
