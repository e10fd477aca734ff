//! Outline input validation.
//!
//! The only accepted input shape is `{name: string, children?: [same shape]}`.
//! Anything else fails with a path-qualified [`Error::InvalidData`] before any
//! tree is built, so a malformed outline can never reach layout.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};

/// Maximum nesting accepted from a collaborator before validation bails out.
///
/// JSON input cannot encode cycles, but it can encode arbitrarily deep
/// nesting; the guard keeps recursive validation bounded.
pub const DEFAULT_MAX_OUTLINE_DEPTH: usize = 32;

/// A validated hierarchical outline as produced by the generation
/// collaborator or a fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outline {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Outline>,
}

impl Outline {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(name: impl Into<String>, children: Vec<Outline>) -> Self {
        Self {
            name: name.into(),
            children,
        }
    }

    /// Validates an arbitrary JSON value into an outline.
    pub fn from_value(value: &Value) -> Result<Self> {
        Self::from_value_bounded(value, DEFAULT_MAX_OUTLINE_DEPTH)
    }

    /// Validates with an explicit nesting limit (levels, root = level 1).
    pub fn from_value_bounded(value: &Value, max_depth: usize) -> Result<Self> {
        let max_depth = max_depth.max(1);
        validate_node(value, "outline", 1, max_depth)
    }

    /// Total node count, the outline itself included.
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(Outline::node_count)
            .sum::<usize>()
    }
}

fn validate_node(value: &Value, path: &str, depth: usize, max_depth: usize) -> Result<Outline> {
    if depth > max_depth {
        return Err(Error::DepthExceeded { limit: max_depth });
    }

    let Some(map) = value.as_object() else {
        return Err(Error::invalid(format!(
            "`{path}` must be an object, got {}",
            json_type_name(value)
        )));
    };

    let name = match map.get("name") {
        Some(Value::String(s)) => s.trim(),
        Some(other) => {
            return Err(Error::invalid(format!(
                "`{path}.name` must be a string, got {}",
                json_type_name(other)
            )));
        }
        None => {
            return Err(Error::invalid(format!("`{path}` is missing a \"name\"")));
        }
    };
    if name.is_empty() {
        return Err(Error::invalid(format!("`{path}.name` must not be empty")));
    }

    let mut children = Vec::new();
    match map.get("children") {
        None | Some(Value::Null) => {}
        Some(Value::Array(items)) => {
            children.reserve(items.len());
            for (index, item) in items.iter().enumerate() {
                let child_path = format!("{path}.children[{index}]");
                children.push(validate_node(item, &child_path, depth + 1, max_depth)?);
            }
        }
        Some(other) => {
            return Err(Error::invalid(format!(
                "`{path}.children` must be an array, got {}",
                json_type_name(other)
            )));
        }
    }

    // Unknown keys are tolerated: collaborators occasionally attach extra
    // metadata and the contract only owns `name` and `children`.
    Ok(Outline {
        name: name.to_string(),
        children,
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
