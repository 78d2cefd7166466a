//! Function-spec intermediate representation
//!
//! These types serialize to the OpenAI tool-calling wire format. The
//! [`FunctionBinding`] travels with each function for the code emitter but
//! never reaches the spec file.

use crate::{HttpMethod, MappedType, ParamLocation};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Description attached to every response descriptor
pub const RESPONSE_DESCRIPTION: &str = "Response from the API call";

/// `{type: "function", function: {...}}` envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolFunction {
    /// Always `"function"`
    #[serde(rename = "type")]
    pub kind: String,

    /// The function specification
    pub function: FunctionSpec,

    /// Source path/method/location metadata
    #[serde(skip)]
    pub binding: FunctionBinding,
}

impl ToolFunction {
    pub fn new(function: FunctionSpec, binding: FunctionBinding) -> Self {
        Self {
            kind: "function".to_string(),
            function,
            binding,
        }
    }

    /// Generated function name
    pub fn name(&self) -> &str {
        &self.function.name
    }
}

/// One callable variant of an operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionSpec {
    /// operationId plus the optional-parameter suffix
    pub name: String,

    pub description: String,

    pub parameters: ParameterSchema,

    pub responses: ResponseSpec,
}

/// JSON-schema object describing the function arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSchema {
    #[serde(rename = "type")]
    pub schema_type: String,

    /// Parameter name to type/description, in required-then-optional order
    pub properties: IndexMap<String, PropertySchema>,

    /// Names of the operation's required parameters
    pub required: Vec<String>,
}

impl Default for ParameterSchema {
    fn default() -> Self {
        Self {
            schema_type: "object".to_string(),
            properties: IndexMap::new(),
            required: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub property_type: MappedType,

    pub description: String,
}

/// Response descriptor: `{type: "object", properties: {response: {...}}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseSpec {
    #[serde(rename = "type")]
    pub schema_type: String,

    pub properties: ResponseProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseProperties {
    pub response: ResponseValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseValue {
    /// Coerced response type
    #[serde(rename = "type")]
    pub response_type: MappedType,

    pub description: String,

    /// Full resolved response schema
    pub schema: Value,
}

impl ResponseSpec {
    pub fn new(response_type: MappedType, schema: Value) -> Self {
        Self {
            schema_type: "object".to_string(),
            properties: ResponseProperties {
                response: ResponseValue {
                    response_type,
                    description: RESPONSE_DESCRIPTION.to_string(),
                    schema,
                },
            },
        }
    }

    pub fn response(&self) -> &ResponseValue {
        &self.properties.response
    }
}

/// Where a generated function came from and how its arguments travel
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FunctionBinding {
    /// URL template, e.g. `/users/{userId}`
    pub path: String,

    pub method: HttpMethod,

    /// Parameters in signature order
    pub params: Vec<ParamBinding>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParamBinding {
    pub name: String,

    /// `None` when the parameter declared no `in`
    pub location: Option<ParamLocation>,
}

impl FunctionBinding {
    pub fn location_of(&self, name: &str) -> Option<&ParamLocation> {
        self.params
            .iter()
            .find(|p| p.name == name)
            .and_then(|p| p.location.as_ref())
    }
}
