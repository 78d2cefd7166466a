//! Optional-parameter expansion
//!
//! An operation with `k` optional parameters yields `2^k` variants. Variant
//! `i` includes optional parameter `j` iff bit `j` of `i` is set, so the
//! order is stable across runs. Required parameters lead every variant.

use serde_json::Value;

/// A single operation parameter, borrowed from the document
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter<'a> {
    pub name: &'a str,

    /// Raw `in` value, if declared
    pub location: Option<&'a str>,

    /// Absent `required` means optional
    pub required: bool,

    pub description: &'a str,

    /// The whole parameter object, for type lookup
    pub raw: &'a Value,
}

impl<'a> Parameter<'a> {
    /// Read a parameter object; `None` if it is not an object or has no name
    pub fn from_value(raw: &'a Value) -> Option<Self> {
        let object = raw.as_object()?;
        let name = object.get("name").and_then(Value::as_str)?;

        Some(Self {
            name,
            location: object.get("in").and_then(Value::as_str),
            required: object
                .get("required")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            description: object
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or(""),
            raw,
        })
    }
}

/// One callable variant of an operation
#[derive(Debug, Clone, PartialEq)]
pub struct Variant<'a> {
    /// operationId, plus `_name` per included optional parameter
    pub name: String,

    /// Required parameters followed by the selected optional ones
    pub params: Vec<Parameter<'a>>,
}

/// Parameters of one operation split by the `required` flag
#[derive(Debug, Clone, Default)]
pub struct ParameterSet<'a> {
    required: Vec<Parameter<'a>>,
    optional: Vec<Parameter<'a>>,
}

impl<'a> ParameterSet<'a> {
    /// Partition parameters, keeping declaration order within each group
    pub fn partition(params: impl IntoIterator<Item = Parameter<'a>>) -> Self {
        let (required, optional) = params.into_iter().partition(|p| p.required);
        Self { required, optional }
    }

    pub fn required(&self) -> &[Parameter<'a>] {
        &self.required
    }

    pub fn optional(&self) -> &[Parameter<'a>] {
        &self.optional
    }

    /// `2^k`, or `None` when it does not fit in a `usize`
    pub fn variant_count(&self) -> Option<usize> {
        u32::try_from(self.optional.len())
            .ok()
            .and_then(|k| 1usize.checked_shl(k))
    }

    /// Enumerate every optional-parameter subset
    ///
    /// The empty subset comes first and keeps `operation_id` unchanged.
    /// Callers should check [`variant_count`](Self::variant_count) first; an
    /// unrepresentable count yields no variants.
    pub fn variants(&self, operation_id: &str) -> Vec<Variant<'a>> {
        let Some(count) = self.variant_count() else {
            return Vec::new();
        };

        (0..count)
            .map(|mask| {
                let selected: Vec<&Parameter<'a>> = self
                    .optional
                    .iter()
                    .enumerate()
                    .filter(|(bit, _)| (mask >> bit) & 1 == 1)
                    .map(|(_, param)| param)
                    .collect();

                let mut name = operation_id.to_string();
                for param in &selected {
                    name.push('_');
                    name.push_str(param.name);
                }

                let params = self
                    .required
                    .iter()
                    .chain(selected.into_iter())
                    .cloned()
                    .collect();

                Variant { name, params }
            })
            .collect()
    }
}
