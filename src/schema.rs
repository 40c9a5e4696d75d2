//! Declarative tool input schemas.
//!
//! Each tool declares its argument shape as an [`InputSchema`]: a flat list
//! of named fields with a type, a required flag and a free-text description.
//! A single generic validator checks caller arguments against the
//! declaration before any handler runs, and the same declaration renders to
//! JSON Schema for `tools/list`. Closed string sets (task states, run
//! statuses, channel types) are expressed as enums and rejected outside the
//! set.
//!
//! Fields not declared in the schema are ignored rather than rejected.

use serde::{Serialize, Serializer};
use serde_json::{json, Value};

/// The type of a single input field.
#[derive(Debug, Clone)]
pub enum FieldType {
    /// A JSON string.
    Text,

    /// A JSON integer (floats are rejected).
    Integer,

    /// A JSON boolean.
    Boolean,

    /// An array of strings.
    TextArray,

    /// A flat string-to-string object. Used for props, where the remote API
    /// rejects nested values.
    TextMap,

    /// A string restricted to a closed set of values.
    TextEnum(&'static [&'static str]),

    /// An array of strings, each restricted to a closed set of values.
    EnumArray(&'static [&'static str]),

    /// An array of objects. Only the outer shape is checked here; the
    /// handler's deserialization enforces the element layout.
    ObjectArray,
}

impl FieldType {
    fn matches(&self, value: &Value) -> Result<(), String> {
        match self {
            FieldType::Text => {
                if value.is_string() {
                    Ok(())
                } else {
                    Err("expected a string".to_string())
                }
            }
            FieldType::Integer => {
                if value.is_i64() || value.is_u64() {
                    Ok(())
                } else {
                    Err("expected an integer".to_string())
                }
            }
            FieldType::Boolean => {
                if value.is_boolean() {
                    Ok(())
                } else {
                    Err("expected a boolean".to_string())
                }
            }
            FieldType::TextArray => match value.as_array() {
                Some(items) if items.iter().all(Value::is_string) => Ok(()),
                _ => Err("expected an array of strings".to_string()),
            },
            FieldType::TextMap => match value.as_object() {
                Some(map) if map.values().all(Value::is_string) => Ok(()),
                Some(_) => Err(
                    "expected a flat string-to-string object; encode lists as CSV and numbers as strings"
                        .to_string(),
                ),
                None => Err("expected an object".to_string()),
            },
            FieldType::TextEnum(allowed) => match value.as_str() {
                Some(s) if allowed.contains(&s) => Ok(()),
                _ => Err(format!("expected one of {}", quote_all(allowed))),
            },
            FieldType::EnumArray(allowed) => match value.as_array() {
                Some(items)
                    if items
                        .iter()
                        .all(|v| v.as_str().is_some_and(|s| allowed.contains(&s))) =>
                {
                    Ok(())
                }
                _ => Err(format!(
                    "expected an array with values from {}",
                    quote_all(allowed)
                )),
            },
            FieldType::ObjectArray => match value.as_array() {
                Some(items) if items.iter().all(Value::is_object) => Ok(()),
                _ => Err("expected an array of objects".to_string()),
            },
        }
    }

    fn json_schema(&self) -> Value {
        match self {
            FieldType::Text => json!({"type": "string"}),
            FieldType::Integer => json!({"type": "integer"}),
            FieldType::Boolean => json!({"type": "boolean"}),
            FieldType::TextArray => json!({"type": "array", "items": {"type": "string"}}),
            FieldType::TextMap => {
                json!({"type": "object", "additionalProperties": {"type": "string"}})
            }
            FieldType::TextEnum(allowed) => json!({"type": "string", "enum": allowed}),
            FieldType::EnumArray(allowed) => {
                json!({"type": "array", "items": {"type": "string", "enum": allowed}})
            }
            FieldType::ObjectArray => json!({"type": "array", "items": {"type": "object"}}),
        }
    }
}

fn quote_all(values: &[&str]) -> String {
    values
        .iter()
        .map(|v| format!("\"{v}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

/// One declared input field.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldType,
    pub required: bool,
    pub description: &'static str,
}

/// The declared argument shape of a tool.
#[derive(Debug, Clone, Default)]
pub struct InputSchema {
    fields: Vec<FieldSpec>,
}

impl InputSchema {
    /// Create an empty schema (a tool taking no arguments).
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a required field.
    pub fn required(
        mut self,
        name: &'static str,
        kind: FieldType,
        description: &'static str,
    ) -> Self {
        self.fields.push(FieldSpec {
            name,
            kind,
            required: true,
            description,
        });
        self
    }

    /// Declare an optional field.
    pub fn optional(
        mut self,
        name: &'static str,
        kind: FieldType,
        description: &'static str,
    ) -> Self {
        self.fields.push(FieldSpec {
            name,
            kind,
            required: false,
            description,
        });
        self
    }

    /// Declared fields.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Validate caller arguments against the declaration.
    ///
    /// Runs before the handler and therefore before any network call.
    pub fn validate(&self, args: &Value) -> Result<(), String> {
        let Some(object) = args.as_object() else {
            return Err("arguments must be a JSON object".to_string());
        };

        for field in &self.fields {
            match object.get(field.name) {
                None | Some(Value::Null) => {
                    if field.required {
                        return Err(format!("missing required field \"{}\"", field.name));
                    }
                }
                Some(value) => {
                    field
                        .kind
                        .matches(value)
                        .map_err(|e| format!("invalid value for \"{}\": {e}", field.name))?;
                }
            }
        }

        Ok(())
    }

    /// Render the declaration as a JSON Schema object for `tools/list`.
    pub fn to_json_schema(&self) -> Value {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();

        for field in &self.fields {
            let mut schema = field.kind.json_schema();
            if let Some(object) = schema.as_object_mut() {
                object.insert("description".to_string(), json!(field.description));
            }
            properties.insert(field.name.to_string(), schema);
            if field.required {
                required.push(field.name);
            }
        }

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

impl Serialize for InputSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json_schema().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskState;
    use serde_json::json;

    fn task_state_schema() -> InputSchema {
        InputSchema::new()
            .required("run_id", FieldType::Text, "Run id")
            .required("item_index", FieldType::Integer, "Item index")
            .required("state", FieldType::TextEnum(TaskState::VALUES), "New state")
            .optional("dry_run", FieldType::Boolean, "Validate only")
    }

    #[test]
    fn test_valid_arguments_pass() {
        let schema = task_state_schema();
        let args = json!({"run_id": "r1", "item_index": 0, "state": "in_progress"});
        assert!(schema.validate(&args).is_ok());
    }

    #[test]
    fn test_missing_required_field() {
        let schema = task_state_schema();
        let err = schema.validate(&json!({"run_id": "r1"})).unwrap_err();
        assert!(err.contains("item_index"));
    }

    #[test]
    fn test_wrong_type_rejected() {
        let schema = task_state_schema();
        let args = json!({"run_id": "r1", "item_index": "zero", "state": ""});
        let err = schema.validate(&args).unwrap_err();
        assert!(err.contains("item_index"));
        assert!(err.contains("integer"));
    }

    #[test]
    fn test_closed_set_rejected() {
        let schema = task_state_schema();
        let args = json!({"run_id": "r1", "item_index": 0, "state": "done"});
        let err = schema.validate(&args).unwrap_err();
        assert!(err.contains("state"));

        // The empty string is a member of the set, not a missing value.
        let args = json!({"run_id": "r1", "item_index": 0, "state": ""});
        assert!(schema.validate(&args).is_ok());
    }

    #[test]
    fn test_text_map_rejects_nested_values() {
        let schema = InputSchema::new().required("props", FieldType::TextMap, "Props");
        assert!(schema
            .validate(&json!({"props": {"a": "1", "b": "2"}}))
            .is_ok());
        assert!(schema
            .validate(&json!({"props": {"a": {"nested": true}}}))
            .is_err());
        assert!(schema.validate(&json!({"props": {"a": 42}})).is_err());
    }

    #[test]
    fn test_undeclared_fields_ignored() {
        let schema = InputSchema::new().required("id", FieldType::Text, "Id");
        assert!(schema.validate(&json!({"id": "x", "extra": 7})).is_ok());
    }

    #[test]
    fn test_non_object_arguments_rejected() {
        let schema = InputSchema::new();
        assert!(schema.validate(&json!("not an object")).is_err());
    }

    #[test]
    fn test_json_schema_rendering() {
        let schema = task_state_schema().to_json_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["run_id"]["type"], "string");
        assert_eq!(schema["properties"]["state"]["enum"][1], "in_progress");
        assert_eq!(schema["required"], json!(["run_id", "item_index", "state"]));
    }
}
