//! Hit-policy resolution.
//!
//! One closed match over the seven policy kinds; the policy set is stable,
//! so there is no trait dispatch. Resolution is pure: the same matched
//! rules against the same table always produce the same result or the
//! same violation.

use dmntab_core::{DecisionTable, HitPolicy, Value};

use crate::types::{EvalError, EvaluationResult, MatchedRule, PolicyViolation};

/// Resolve the ordered matched rules into the final result.
///
/// `matched` must be in ascending row order, which is what the table
/// evaluator produces. Zero matches resolve to an empty result under
/// every policy.
pub fn resolve(
    table: &DecisionTable,
    matched: &[MatchedRule],
) -> Result<EvaluationResult, EvalError> {
    if matched.is_empty() {
        return Ok(EvaluationResult::new());
    }
    match table.hit_policy {
        HitPolicy::Unique => {
            if matched.len() > 1 {
                return Err(PolicyViolation::AmbiguousRules {
                    rows: matched.iter().map(|m| m.row + 1).collect(),
                }
                .into());
            }
            Ok(single(table, &matched[0]))
        }
        HitPolicy::First => Ok(single(table, &matched[0])),
        HitPolicy::Any => {
            let first = &matched[0];
            for m in &matched[1..] {
                for (i, clause) in table.outputs.iter().enumerate() {
                    if first.outputs[i] != m.outputs[i] {
                        return Err(PolicyViolation::OutputDisagreement {
                            clause: clause.name.clone(),
                        }
                        .into());
                    }
                }
            }
            Ok(single(table, first))
        }
        HitPolicy::Priority => {
            if matched.len() == 1 {
                return Ok(single(table, &matched[0]));
            }
            // Lowest rank vector wins; matched is row-ordered, so keeping
            // the incumbent on ties breaks them toward the lowest row.
            let mut best = &matched[0];
            let mut best_rank = rank(table, best)?;
            for m in &matched[1..] {
                let r = rank(table, m)?;
                if r < best_rank {
                    best = m;
                    best_rank = r;
                }
            }
            Ok(single(table, best))
        }
        HitPolicy::Collect => {
            let refs: Vec<&MatchedRule> = matched.iter().collect();
            Ok(lists(table, &refs))
        }
        HitPolicy::RuleOrder => {
            if matched.len() == 1 {
                return Ok(single(table, &matched[0]));
            }
            let refs: Vec<&MatchedRule> = matched.iter().collect();
            Ok(lists(table, &refs))
        }
        HitPolicy::OutputOrder => {
            if matched.len() == 1 {
                return Ok(single(table, &matched[0]));
            }
            let mut ranked: Vec<(Vec<usize>, &MatchedRule)> = matched
                .iter()
                .map(|m| rank(table, m).map(|r| (r, m)))
                .collect::<Result<_, _>>()?;
            // Stable sort: equal ranks stay in row order.
            ranked.sort_by(|a, b| a.0.cmp(&b.0));
            let refs: Vec<&MatchedRule> = ranked.into_iter().map(|(_, m)| m).collect();
            Ok(lists(table, &refs))
        }
    }
}

/// One rule's outputs as the result map.
fn single(table: &DecisionTable, m: &MatchedRule) -> EvaluationResult {
    let mut result = EvaluationResult::new();
    for (clause, value) in table.outputs.iter().zip(&m.outputs) {
        result.0.insert(clause.name.clone(), value.clone());
    }
    result
}

/// Every rule's value per clause, as lists, in the given order.
fn lists(table: &DecisionTable, ordered: &[&MatchedRule]) -> EvaluationResult {
    let mut result = EvaluationResult::new();
    for (i, clause) in table.outputs.iter().enumerate() {
        let values: Vec<Value> = ordered.iter().map(|m| m.outputs[i].clone()).collect();
        result.0.insert(clause.name.clone(), Value::List(values));
    }
    result
}

/// Rank vector of a matched rule under the declared output-value orders,
/// compared lexicographically across clauses; lower ranks higher.
fn rank(table: &DecisionTable, m: &MatchedRule) -> Result<Vec<usize>, EvalError> {
    table
        .outputs
        .iter()
        .zip(&m.outputs)
        .map(|(clause, value)| {
            let order = clause.values.as_deref().ok_or_else(|| {
                EvalError::from(PolicyViolation::NoPriorityOrder {
                    clause: clause.name.clone(),
                })
            })?;
            order.iter().position(|v| v == value).ok_or_else(|| {
                PolicyViolation::UndeclaredOutputValue {
                    clause: clause.name.clone(),
                    value: value.to_string(),
                }
                .into()
            })
        })
        .collect()
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
