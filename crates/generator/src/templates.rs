//! Template loading and management

use crate::python;
use api2gen_common::{GeneratorError, Result};
use std::collections::HashMap;
use tera::{Tera, Value};

/// HTTP helper embedded verbatim at the top of every generated client
pub const PREAMBLE: &str = include_str!("../templates/preamble.py");

/// Bumped whenever `PREAMBLE` changes
pub const PREAMBLE_VERSION: &str = "1";

/// Name of the Python client template
pub const CLIENT_TEMPLATE: &str = "client.py";

/// Load all templates
pub fn load_templates() -> Result<Tera> {
    let mut tera = Tera::default();

    tera.register_filter("py_str", py_str_filter);

    tera.add_raw_template(CLIENT_TEMPLATE, include_str!("../templates/client.py.tera"))
        .map_err(|e| {
            GeneratorError::Generation(format!("Failed to load client.py template: {}", e))
        })?;

    Ok(tera)
}

/// Filter to render a value as a Python string literal
fn py_str_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("py_str filter expects a string"))?;

    Ok(Value::String(python::string_literal(s)))
}
