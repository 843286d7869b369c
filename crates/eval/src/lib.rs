//! Decision-table evaluation engine.
//!
//! Consumes an immutable [`DecisionTable`] (built by the `dmntab-core`
//! loader) plus named input values and produces the decision's named
//! outputs. Evaluation is a pure function of (table, bindings): it does no
//! I/O, touches no shared state, and allocates its match records and
//! result fresh per call, so one table can be evaluated concurrently from
//! any number of threads without locking.

pub mod bindings;
pub mod expression;
pub mod matcher;
pub mod policy;
pub mod types;

pub use bindings::assemble_bindings;
pub use types::{
    BindingError, EvalError, EvaluationResult, InputBindings, MatchedRule, PolicyViolation,
};

use dmntab_core::DecisionTable;

/// Evaluate a decision table against named input values.
///
/// 1. The caller's bindings are validated against the table's input
///    clauses first; a missing required input or a type-incompatible value
///    aborts with a `BindingError` and no partial result.
/// 2. Rules are matched in ascending row order.
/// 3. The table's hit policy resolves the matches into the result, or
///    fails with a `PolicyViolation`.
pub fn evaluate(
    table: &DecisionTable,
    bindings: &InputBindings,
) -> Result<EvaluationResult, EvalError> {
    validate_bindings(table, bindings)?;
    let matched = collect_matches(table, bindings);
    policy::resolve(table, &matched)
}

/// Check the caller's bindings against the table's input clauses.
fn validate_bindings(table: &DecisionTable, bindings: &InputBindings) -> Result<(), EvalError> {
    for clause in &table.inputs {
        let value = matcher::bound_value(bindings, clause);
        if clause.required && value.is_null() {
            return Err(BindingError::MissingRequired {
                clause: clause.name.clone(),
            }
            .into());
        }
        if let Some(hint) = clause.type_hint {
            if !hint.admits(value) {
                return Err(BindingError::TypeMismatch {
                    clause: clause.name.clone(),
                    expected: hint.name().to_string(),
                    got: value.type_name().to_string(),
                }
                .into());
            }
        }
    }
    Ok(())
}

/// Run every rule in row order, keeping the matches with their outputs.
fn collect_matches(table: &DecisionTable, bindings: &InputBindings) -> Vec<MatchedRule> {
    table
        .rules
        .iter()
        .filter(|rule| matcher::matches(rule, &table.inputs, bindings))
        .map(|rule| MatchedRule {
            row: rule.row,
            outputs: rule.then.clone(),
        })
        .collect()
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
