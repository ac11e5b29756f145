//! Tool specs and argument validation
//!
//! Renders each operation's parameter contract as a JSON schema for the front
//! end, and validates incoming arguments against the same contract before
//! anything reaches the dispatcher.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{BridgeError, Result};

use super::operation::{Operation, ParamKind, ParamSpec};

/// A tool as advertised to the calling agent
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolSpec {
    pub name: String,
    pub title: String,
    pub description: String,
    pub input_schema: Value,
}

impl ToolSpec {
    /// Build the spec for one operation
    pub fn for_operation(op: Operation) -> Self {
        Self {
            name: op.tool_name().to_string(),
            title: op.title().to_string(),
            description: op.description().to_string(),
            input_schema: input_schema(op),
        }
    }
}

fn param_schema(param: &ParamSpec) -> Value {
    let mut prop = Map::new();
    prop.insert("type".to_string(), Value::String(param.kind.json_type().to_string()));
    if let ParamKind::OneOf(values) = param.kind {
        prop.insert(
            "enum".to_string(),
            Value::Array(values.iter().map(|v| Value::String(v.to_string())).collect()),
        );
    }
    prop.insert("description".to_string(), Value::String(param.description.to_string()));
    Value::Object(prop)
}

/// JSON schema for an operation's input object
pub fn input_schema(op: Operation) -> Value {
    let mut properties = Map::new();
    for param in op.params() {
        properties.insert(param.name.to_string(), param_schema(param));
    }
    let required: Vec<&str> = op.params().iter().filter(|p| p.required).map(|p| p.name).collect();

    serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

fn check_kind(op: Operation, param: &ParamSpec, value: &Value) -> Result<()> {
    let ok = match param.kind {
        ParamKind::Number => value.is_number(),
        ParamKind::String => value.is_string(),
        ParamKind::OneOf(allowed) => value.as_str().is_some_and(|s| allowed.contains(&s)),
    };
    if ok {
        return Ok(());
    }

    let expected = match param.kind {
        ParamKind::OneOf(allowed) => format!("one of {}", allowed.join(", ")),
        kind => kind.json_type().to_string(),
    };
    Err(BridgeError::Validation(format!(
        "Tool '{}' field '{}' must be {}, got {}",
        op, param.name, expected, value
    )))
}

/// Validate tool arguments and return the parsed params document
///
/// Absent arguments count as an empty object. Undeclared keys are dropped.
pub fn validate(op: Operation, args: &Value) -> Result<Value> {
    let empty = Map::new();
    let input = match args {
        Value::Null => &empty,
        Value::Object(map) => map,
        other => {
            return Err(BridgeError::Validation(format!(
                "Tool '{}' arguments must be an object, got {}",
                op, other
            )));
        }
    };

    let mut parsed = Map::new();
    for param in op.params() {
        match input.get(param.name) {
            Some(value) => {
                check_kind(op, param, value)?;
                parsed.insert(param.name.to_string(), value.clone());
            }
            None if param.required => {
                return Err(BridgeError::Validation(format!(
                    "Tool '{}' missing required field: {}",
                    op, param.name
                )));
            }
            None => {}
        }
    }

    Ok(Value::Object(parsed))
}

/// Catalog of every tool the bridge exposes, in a stable order
#[derive(Debug, Clone)]
pub struct OperationCatalog {
    tools: Vec<ToolSpec>,
}

impl OperationCatalog {
    /// Catalog covering every operation
    pub fn standard() -> Self {
        Self {
            tools: Operation::ALL.into_iter().map(ToolSpec::for_operation).collect(),
        }
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<&ToolSpec> {
        self.tools.iter().find(|t| t.name == name)
    }

    /// List all tool names
    pub fn list(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name.as_str()).collect()
    }

    /// Get all tools
    pub fn all(&self) -> &[ToolSpec] {
        &self.tools
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Check if a tool exists
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Resolve a tool name and validate its arguments in one step
    pub fn parse_call(&self, name: &str, args: &Value) -> Result<(Operation, Value)> {
        let op = Operation::from_tool_name(name).ok_or_else(|| BridgeError::UnknownTool(name.to_string()))?;
        let params = validate(op, args)?;
        Ok((op, params))
    }
}

impl Default for OperationCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
