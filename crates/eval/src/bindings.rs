//! Input binding assembly from JSON.
//!
//! Declaration-driven: walks the table's input clauses and coerces what
//! the caller supplied. Keys the table does not declare are ignored;
//! missing keys stay unbound and the evaluator treats them as null.
//! Number clauses accept JSON numbers (converted through their literal
//! text, so `0.1` stays exactly `0.1`) and decimal strings.

use rust_decimal::Decimal;
use std::str::FromStr;

use dmntab_core::{DecisionTable, TypeHint, Value};

use crate::types::{BindingError, EvalError, InputBindings};

/// Assemble typed input bindings from a JSON object.
pub fn assemble_bindings(
    table: &DecisionTable,
    inputs_json: &serde_json::Value,
) -> Result<InputBindings, EvalError> {
    let obj = inputs_json.as_object().ok_or_else(|| {
        EvalError::from(BindingError::InvalidInputs {
            message: format!("expected a JSON object, got {}", json_type_name(inputs_json)),
        })
    })?;

    let mut bindings = InputBindings::new();
    for clause in &table.inputs {
        let Some(raw) = obj.get(&clause.name) else {
            continue;
        };
        let value = coerce(raw, clause.type_hint).ok_or_else(|| {
            EvalError::from(BindingError::TypeMismatch {
                clause: clause.name.clone(),
                expected: clause
                    .type_hint
                    .map(|h| h.name())
                    .unwrap_or("literal")
                    .to_string(),
                got: json_type_name(raw).to_string(),
            })
        })?;
        bindings.insert(clause.name.clone(), value);
    }
    Ok(bindings)
}

/// Coerce a JSON value according to the clause's declared type; without a
/// declared type, infer.
fn coerce(raw: &serde_json::Value, hint: Option<TypeHint>) -> Option<Value> {
    match hint {
        Some(TypeHint::Number) => match raw {
            serde_json::Value::Null => Some(Value::Null),
            serde_json::Value::Number(n) => {
                Decimal::from_str(&n.to_string()).ok().map(Value::Number)
            }
            serde_json::Value::String(s) => Decimal::from_str(s).ok().map(Value::Number),
            _ => None,
        },
        Some(TypeHint::Text) => match raw {
            serde_json::Value::Null => Some(Value::Null),
            serde_json::Value::String(s) => Some(Value::Text(s.clone())),
            _ => None,
        },
        Some(TypeHint::Boolean) => match raw {
            serde_json::Value::Null => Some(Value::Null),
            serde_json::Value::Bool(b) => Some(Value::Bool(*b)),
            _ => None,
        },
        None => Value::from_json(raw),
    }
}

/// Descriptive type name of a JSON value, for error messages.
fn json_type_name(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
