//! Evaluation-time types: the error taxonomy, ephemeral match records, and
//! the result map.
//!
//! Errors split into two families. A [`BindingError`] means the caller's
//! inputs were unusable and no rule was matched at all; a
//! [`PolicyViolation`] means the matched rules broke the hit policy's
//! preconditions. Expression-level type mismatches are neither -- they
//! surface as rules that simply do not match.

use std::collections::BTreeMap;
use std::fmt;

use dmntab_core::Value;

// ──────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────

/// The caller's input bindings were unusable for this table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    /// A clause marked required had no non-null binding.
    MissingRequired { clause: String },
    /// A bound value does not fit the clause's declared type.
    TypeMismatch {
        clause: String,
        expected: String,
        got: String,
    },
    /// The input document handed to the binding assembler was not an object.
    InvalidInputs { message: String },
}

impl fmt::Display for BindingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingError::MissingRequired { clause } => {
                write!(f, "required input '{}' is missing", clause)
            }
            BindingError::TypeMismatch {
                clause,
                expected,
                got,
            } => {
                write!(
                    f,
                    "input '{}': expected {}, got {}",
                    clause, expected, got
                )
            }
            BindingError::InvalidInputs { message } => {
                write!(f, "invalid inputs: {}", message)
            }
        }
    }
}

impl std::error::Error for BindingError {}

/// The hit policy's preconditions were violated by the matched rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyViolation {
    /// More than one rule matched under UNIQUE. Rows are 1-based.
    AmbiguousRules { rows: Vec<usize> },
    /// Matched rules disagree on an output value under ANY.
    OutputDisagreement { clause: String },
    /// PRIORITY / OUTPUT ORDER need a declared value order for every
    /// output clause.
    NoPriorityOrder { clause: String },
    /// A matched output value is missing from the clause's declared order.
    UndeclaredOutputValue { clause: String, value: String },
}

impl fmt::Display for PolicyViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyViolation::AmbiguousRules { rows } => {
                let rows: Vec<String> = rows.iter().map(|r| r.to_string()).collect();
                write!(
                    f,
                    "ambiguous match under UNIQUE: rules {} all match",
                    rows.join(", ")
                )
            }
            PolicyViolation::OutputDisagreement { clause } => {
                write!(
                    f,
                    "matched rules disagree on output '{}' under ANY",
                    clause
                )
            }
            PolicyViolation::NoPriorityOrder { clause } => {
                write!(
                    f,
                    "output '{}' declares no value order for priority resolution",
                    clause
                )
            }
            PolicyViolation::UndeclaredOutputValue { clause, value } => {
                write!(
                    f,
                    "output '{}': value {} is not in the declared order",
                    clause, value
                )
            }
        }
    }
}

impl std::error::Error for PolicyViolation {}

/// Any error an evaluation call can return. A call that errors produces no
/// result; there is never a partial result alongside an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    Binding(BindingError),
    Policy(PolicyViolation),
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::Binding(e) => write!(f, "binding error: {}", e),
            EvalError::Policy(e) => write!(f, "policy violation: {}", e),
        }
    }
}

impl std::error::Error for EvalError {}

impl From<BindingError> for EvalError {
    fn from(e: BindingError) -> EvalError {
        EvalError::Binding(e)
    }
}

impl From<PolicyViolation> for EvalError {
    fn from(e: PolicyViolation) -> EvalError {
        EvalError::Policy(e)
    }
}

// ──────────────────────────────────────────────
// Per-call data
// ──────────────────────────────────────────────

/// Named input values for one evaluation call.
pub type InputBindings = BTreeMap<String, Value>;

/// A rule that matched, with its resolved output values. Built fresh per
/// evaluation, in rule order, and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedRule {
    pub row: usize,
    pub outputs: Vec<Value>,
}

/// The final mapping from output-clause name to value. List-valued for
/// COLLECT and for multi-match RULE ORDER / OUTPUT ORDER resolution.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EvaluationResult(pub BTreeMap<String, Value>);

impl EvaluationResult {
    pub fn new() -> EvaluationResult {
        EvaluationResult(BTreeMap::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Serialize to a plain JSON object for the result sink.
    pub fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for (name, value) in &self.0 {
            map.insert(name.clone(), value.to_json());
        }
        serde_json::Value::Object(map)
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
