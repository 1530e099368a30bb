// src/schema/mod.rs
// ============================================================================
// Module: Schema Descriptors
// Description: Declarative structural contracts for API responses.
// Purpose: Validate JSON bodies against composable field constraints.
// Dependencies: serde_json, regex
// ============================================================================

//! ## Overview
//! Declarative validation descriptors, independent of any validation library:
//! each field carries a kind (bool, integer, string, object, list-of) plus
//! tagged constraints (required, nullable, min length, minimum, allowed
//! values, regex pattern, nested shape). Objects reject unknown fields unless
//! explicitly permitted. Violations carry a JSON-path-like location so
//! failures read as `data.history[0].timestamp: ...`.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod registry;

// ============================================================================
// SECTION: Tests
// ============================================================================


use std::fmt;

use regex::Regex;
use serde_json::Value;

/// One structural violation found during validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// JSON-path-like location of the offending value.
    pub path: String,
    /// Human-readable reason.
    pub reason: String,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.reason)
    }
}

/// The JSON kind a field must have, with nested shapes where applicable.
#[derive(Debug, Clone)]
pub enum FieldKind {
    /// JSON boolean.
    Bool,
    /// JSON integer (floats are rejected).
    Integer,
    /// JSON string.
    Str,
    /// Nested object validated against its own schema.
    Object(Schema),
    /// Array whose elements each satisfy the given rule.
    ListOf(Box<FieldRule>),
}

/// Constraints attached to a single field.
#[derive(Debug, Clone)]
pub struct FieldRule {
    kind: FieldKind,
    required: bool,
    nullable: bool,
    min_length: Option<usize>,
    min: Option<i64>,
    allowed: Option<Vec<Value>>,
    pattern: Option<String>,
}

impl FieldRule {
    fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            required: true,
            nullable: false,
            min_length: None,
            min: None,
            allowed: None,
            pattern: None,
        }
    }

    /// Boolean field.
    #[must_use]
    pub fn boolean() -> Self {
        Self::new(FieldKind::Bool)
    }

    /// Integer field.
    #[must_use]
    pub fn integer() -> Self {
        Self::new(FieldKind::Integer)
    }

    /// String field.
    #[must_use]
    pub fn string() -> Self {
        Self::new(FieldKind::Str)
    }

    /// Nested object field.
    #[must_use]
    pub fn object(schema: Schema) -> Self {
        Self::new(FieldKind::Object(schema))
    }

    /// List field whose elements satisfy `element`.
    #[must_use]
    pub fn list_of(element: Self) -> Self {
        Self::new(FieldKind::ListOf(Box::new(element)))
    }

    /// Marks the field optional (fields are required by default).
    #[must_use]
    pub const fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Permits an explicit JSON null.
    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Minimum string length or list length.
    #[must_use]
    pub const fn min_len(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }

    /// Minimum numeric value.
    #[must_use]
    pub const fn min(mut self, min: i64) -> Self {
        self.min = Some(min);
        self
    }

    /// Restricts string values to a fixed set.
    #[must_use]
    pub fn allowed_strings(mut self, values: &[&str]) -> Self {
        self.allowed = Some(values.iter().map(|value| Value::from(*value)).collect());
        self
    }

    /// Restricts a boolean to a single value.
    #[must_use]
    pub fn allowed_bool(mut self, value: bool) -> Self {
        self.allowed = Some(vec![Value::from(value)]);
        self
    }

    /// Requires string values to match a regex pattern.
    #[must_use]
    pub fn pattern(mut self, pattern: &str) -> Self {
        self.pattern = Some(pattern.to_string());
        self
    }

    fn check(&self, value: &Value, path: &str, out: &mut Vec<SchemaViolation>) {
        if value.is_null() {
            if !self.nullable {
                push(out, path, "must not be null");
            }
            return;
        }
        match &self.kind {
            FieldKind::Bool => self.check_bool(value, path, out),
            FieldKind::Integer => self.check_integer(value, path, out),
            FieldKind::Str => self.check_string(value, path, out),
            FieldKind::Object(schema) => match value.as_object() {
                Some(_) => schema.validate_at(value, path, out),
                None => push(out, path, "must be an object"),
            },
            FieldKind::ListOf(element) => self.check_list(element, value, path, out),
        }
    }

    fn check_bool(&self, value: &Value, path: &str, out: &mut Vec<SchemaViolation>) {
        if !value.is_boolean() {
            push(out, path, "must be a boolean");
            return;
        }
        self.check_allowed(value, path, out);
    }

    fn check_integer(&self, value: &Value, path: &str, out: &mut Vec<SchemaViolation>) {
        let Some(number) = value.as_i64() else {
            push(out, path, "must be an integer");
            return;
        };
        if let Some(min) = self.min
            && number < min
        {
            push(out, path, &format!("must be >= {min} (got {number})"));
        }
        self.check_allowed(value, path, out);
    }

    fn check_string(&self, value: &Value, path: &str, out: &mut Vec<SchemaViolation>) {
        let Some(text) = value.as_str() else {
            push(out, path, "must be a string");
            return;
        };
        if let Some(min_length) = self.min_length
            && text.chars().count() < min_length
        {
            push(out, path, &format!("must have at least {min_length} characters"));
        }
        if let Some(pattern) = &self.pattern {
            match Regex::new(pattern) {
                Ok(regex) => {
                    if !regex.is_match(text) {
                        push(out, path, &format!("{text:?} does not match pattern {pattern}"));
                    }
                }
                // Fail closed on a bad descriptor instead of skipping it.
                Err(err) => push(out, path, &format!("invalid pattern {pattern}: {err}")),
            }
        }
        self.check_allowed(value, path, out);
    }

    fn check_list(
        &self,
        element: &Self,
        value: &Value,
        path: &str,
        out: &mut Vec<SchemaViolation>,
    ) {
        let Some(items) = value.as_array() else {
            push(out, path, "must be a list");
            return;
        };
        if let Some(min_length) = self.min_length
            && items.len() < min_length
        {
            push(out, path, &format!("must have at least {min_length} items"));
        }
        for (index, item) in items.iter().enumerate() {
            element.check(item, &format!("{path}[{index}]"), out);
        }
    }

    fn check_allowed(&self, value: &Value, path: &str, out: &mut Vec<SchemaViolation>) {
        if let Some(allowed) = &self.allowed
            && !allowed.contains(value)
        {
            let options: Vec<String> = allowed.iter().map(ToString::to_string).collect();
            push(out, path, &format!("{value} is not one of [{}]", options.join(", ")));
        }
    }
}

/// Declarative object schema: named field rules plus an unknown-field policy.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<(String, FieldRule)>,
    allow_unknown: bool,
}

impl Schema {
    /// Empty object schema rejecting unknown fields.
    #[must_use]
    pub fn object() -> Self {
        Self::default()
    }

    /// Adds a field rule.
    #[must_use]
    pub fn field(mut self, name: &str, rule: FieldRule) -> Self {
        self.fields.push((name.to_string(), rule));
        self
    }

    /// Permits fields not declared in the schema.
    #[must_use]
    pub const fn permit_unknown(mut self) -> Self {
        self.allow_unknown = true;
        self
    }

    /// Validates a JSON value, returning every violation found.
    #[must_use]
    pub fn validate(&self, value: &Value) -> Vec<SchemaViolation> {
        let mut out = Vec::new();
        self.validate_at(value, "$", &mut out);
        out
    }

    fn validate_at(&self, value: &Value, path: &str, out: &mut Vec<SchemaViolation>) {
        let Some(map) = value.as_object() else {
            push(out, path, "must be an object");
            return;
        };
        for (name, rule) in &self.fields {
            let field_path = format!("{path}.{name}");
            match map.get(name) {
                Some(field_value) => rule.check(field_value, &field_path, out),
                None if rule.required => push(out, &field_path, "required field is missing"),
                None => {}
            }
        }
        if !self.allow_unknown {
            for key in map.keys() {
                if !self.fields.iter().any(|(name, _)| name == key) {
                    push(out, &format!("{path}.{key}"), "unknown field");
                }
            }
        }
    }
}

fn push(out: &mut Vec<SchemaViolation>, path: &str, reason: &str) {
    out.push(SchemaViolation {
        path: path.to_string(),
        reason: reason.to_string(),
    });
}
