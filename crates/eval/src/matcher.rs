//! Rule matching.
//!
//! A rule matches iff every one of its input cells accepts the value bound
//! to the corresponding clause. Cells are walked positionally in clause
//! order and the walk stops at the first rejecting cell; since `accepts`
//! is pure, stopping early is invisible to the caller.

use dmntab_core::{InputClause, Rule, Value};

use crate::expression::accepts;
use crate::types::InputBindings;

/// Value bound to a clause for this call: the named binding, or null when
/// the caller supplied none.
pub(crate) fn bound_value<'a>(bindings: &'a InputBindings, clause: &InputClause) -> &'a Value {
    bindings.get(&clause.name).unwrap_or(&Value::Null)
}

/// Whether every input cell of the rule accepts its bound value.
pub fn matches(rule: &Rule, inputs: &[InputClause], bindings: &InputBindings) -> bool {
    rule.when
        .iter()
        .zip(inputs)
        .all(|(test, clause)| accepts(test, bound_value(bindings, clause)))
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
