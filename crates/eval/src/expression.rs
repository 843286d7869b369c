//! Input-cell expression evaluation.
//!
//! `accepts` is total: a type mismatch (say, a string bound against a
//! numeric range) means the test does not accept, never an error. This
//! keeps single-rule evaluation side-effect-free, and the whole walk is
//! read-only, so one table can be evaluated from many threads at once.

use std::cmp::Ordering;

use dmntab_core::{CompareOp, UnaryTest, Value};

/// Whether a parsed input-cell test accepts the bound value.
pub fn accepts(test: &UnaryTest, value: &Value) -> bool {
    match test {
        UnaryTest::Any => true,
        UnaryTest::Equal(literal) => value == literal,
        UnaryTest::Compare { op, rhs } => match order(value, rhs) {
            Some(ord) => match op {
                CompareOp::Lt => ord == Ordering::Less,
                CompareOp::Le => ord != Ordering::Greater,
                CompareOp::Gt => ord == Ordering::Greater,
                CompareOp::Ge => ord != Ordering::Less,
            },
            None => false,
        },
        UnaryTest::Range {
            lo,
            lo_inclusive,
            hi,
            hi_inclusive,
        } => {
            let above_lo = match order(value, lo) {
                Some(Ordering::Greater) => true,
                Some(Ordering::Equal) => *lo_inclusive,
                _ => false,
            };
            let below_hi = match order(value, hi) {
                Some(Ordering::Less) => true,
                Some(Ordering::Equal) => *hi_inclusive,
                _ => false,
            };
            above_lo && below_hi
        }
        UnaryTest::AnyOf(tests) => tests.iter().any(|t| accepts(t, value)),
        UnaryTest::Not(inner) => !accepts(inner, value),
    }
}

/// Ordering between a bound value and a cell literal. Defined for
/// number-number pairs (exact decimal comparison) and string-string pairs
/// (lexicographic); anything else is not comparable.
fn order(value: &Value, rhs: &Value) -> Option<Ordering> {
    match (value, rhs) {
        (Value::Number(l), Value::Number(r)) => Some(l.cmp(r)),
        (Value::Text(l), Value::Text(r)) => Some(l.as_str().cmp(r.as_str())),
        _ => None,
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
