//! Definition loader.
//!
//! Deserializes a JSON definition document into the immutable model,
//! parsing every cell up front. Everything a table can be wrong about --
//! cell counts, unparsable cells, unknown policies or types, duplicate
//! names -- is rejected here, before the caller ever evaluates.
//!
//! Two document shapes are accepted: a file object with a `decisions`
//! array, or a single bare decision object.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::DefinitionError;
use crate::parser::{parse_output_entry, parse_unary_tests};
use crate::table::{DecisionTable, HitPolicy, InputClause, OutputClause, Rule, TypeHint};
use crate::value::Value;

/// A loaded definition document: one or more decision tables.
#[derive(Debug, Clone)]
pub struct DefinitionFile {
    pub decisions: Vec<DecisionTable>,
}

impl DefinitionFile {
    /// Load from an already-parsed JSON document.
    pub fn from_json(doc: &serde_json::Value) -> Result<DefinitionFile, DefinitionError> {
        let raw_decisions: Vec<RawDecision> = if let Some(list) = doc.get("decisions") {
            serde_json::from_value(list.clone())
                .map_err(|e| DefinitionError::Malformed(e.to_string()))?
        } else {
            let single: RawDecision = serde_json::from_value(doc.clone())
                .map_err(|e| DefinitionError::Malformed(e.to_string()))?;
            vec![single]
        };
        if raw_decisions.is_empty() {
            return Err(DefinitionError::Empty);
        }

        let mut seen = BTreeSet::new();
        let mut decisions = Vec::with_capacity(raw_decisions.len());
        for raw in raw_decisions {
            if !seen.insert(raw.id.clone()) {
                return Err(DefinitionError::DuplicateDecision { id: raw.id });
            }
            decisions.push(build_decision(raw)?);
        }
        Ok(DefinitionFile { decisions })
    }

    /// Select a decision by id, or the first decision when no id is given.
    pub fn decision(&self, id: Option<&str>) -> Result<&DecisionTable, DefinitionError> {
        match id {
            Some(id) => self
                .decisions
                .iter()
                .find(|d| d.id == id)
                .ok_or_else(|| DefinitionError::UnknownDecision { id: id.to_string() }),
            None => Ok(&self.decisions[0]),
        }
    }
}

impl FromStr for DefinitionFile {
    type Err = DefinitionError;

    fn from_str(s: &str) -> Result<DefinitionFile, DefinitionError> {
        let doc: serde_json::Value =
            serde_json::from_str(s).map_err(|e| DefinitionError::Malformed(e.to_string()))?;
        DefinitionFile::from_json(&doc)
    }
}

// ──────────────────────────────────────────────
// Raw document shapes
// ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RawDecision {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(alias = "hitPolicy")]
    hit_policy: String,
    #[serde(default)]
    inputs: Vec<RawClause>,
    outputs: Vec<RawClause>,
    #[serde(default)]
    rules: Vec<RawRule>,
}

#[derive(Debug, Deserialize)]
struct RawClause {
    name: String,
    #[serde(rename = "type", default)]
    type_hint: Option<String>,
    /// Inputs only: the caller must bind a non-null value.
    #[serde(default)]
    required: bool,
    /// Outputs only: declared value order for PRIORITY / OUTPUT ORDER.
    #[serde(default)]
    values: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct RawRule {
    when: Vec<String>,
    then: Vec<String>,
}

// ──────────────────────────────────────────────
// Validation
// ──────────────────────────────────────────────

fn build_decision(raw: RawDecision) -> Result<DecisionTable, DefinitionError> {
    let decision = raw.id;
    if decision.trim().is_empty() {
        return Err(DefinitionError::Malformed(
            "decision id must not be empty".to_string(),
        ));
    }

    let hit_policy =
        HitPolicy::parse(&raw.hit_policy).ok_or_else(|| DefinitionError::UnknownHitPolicy {
            decision: decision.clone(),
            token: raw.hit_policy.clone(),
        })?;

    let mut inputs = Vec::with_capacity(raw.inputs.len());
    let mut input_names = BTreeSet::new();
    for clause in raw.inputs {
        check_clause_name(&decision, &clause.name, "input", &mut input_names)?;
        inputs.push(InputClause {
            type_hint: parse_hint(&decision, &clause.name, clause.type_hint.as_deref())?,
            required: clause.required,
            name: clause.name,
        });
    }

    if raw.outputs.is_empty() {
        return Err(DefinitionError::InvalidClause {
            decision,
            message: "at least one output clause is required".to_string(),
        });
    }
    let mut outputs = Vec::with_capacity(raw.outputs.len());
    let mut output_names = BTreeSet::new();
    for clause in raw.outputs {
        check_clause_name(&decision, &clause.name, "output", &mut output_names)?;
        let values = match clause.values {
            Some(raw_values) => Some(
                raw_values
                    .iter()
                    .map(|v| {
                        Value::from_json(v).ok_or_else(|| DefinitionError::InvalidDeclaredValue {
                            decision: decision.clone(),
                            clause: clause.name.clone(),
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            None => None,
        };
        outputs.push(OutputClause {
            type_hint: parse_hint(&decision, &clause.name, clause.type_hint.as_deref())?,
            values,
            name: clause.name,
        });
    }

    let mut rules = Vec::with_capacity(raw.rules.len());
    for (row, rule) in raw.rules.into_iter().enumerate() {
        if rule.when.len() != inputs.len() {
            return Err(DefinitionError::CellCountMismatch {
                decision,
                rule: row + 1,
                side: "input",
                expected: inputs.len(),
                got: rule.when.len(),
            });
        }
        if rule.then.len() != outputs.len() {
            return Err(DefinitionError::CellCountMismatch {
                decision,
                rule: row + 1,
                side: "output",
                expected: outputs.len(),
                got: rule.then.len(),
            });
        }
        let when = rule
            .when
            .iter()
            .zip(&inputs)
            .map(|(cell, clause)| {
                parse_unary_tests(cell).map_err(|source| DefinitionError::InvalidInputCell {
                    decision: decision.clone(),
                    rule: row + 1,
                    clause: clause.name.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let then = rule
            .then
            .iter()
            .zip(&outputs)
            .map(|(cell, clause)| {
                parse_output_entry(cell).map_err(|source| DefinitionError::InvalidOutputCell {
                    decision: decision.clone(),
                    rule: row + 1,
                    clause: clause.name.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        rules.push(Rule { row, when, then });
    }

    Ok(DecisionTable {
        id: decision,
        name: raw.name,
        hit_policy,
        inputs,
        outputs,
        rules,
    })
}

fn check_clause_name(
    decision: &str,
    name: &str,
    side: &str,
    seen: &mut BTreeSet<String>,
) -> Result<(), DefinitionError> {
    if name.trim().is_empty() {
        return Err(DefinitionError::InvalidClause {
            decision: decision.to_string(),
            message: format!("{} clause name must not be empty", side),
        });
    }
    if !seen.insert(name.to_string()) {
        return Err(DefinitionError::InvalidClause {
            decision: decision.to_string(),
            message: format!("duplicate {} clause '{}'", side, name),
        });
    }
    Ok(())
}

fn parse_hint(
    decision: &str,
    clause: &str,
    token: Option<&str>,
) -> Result<Option<TypeHint>, DefinitionError> {
    match token {
        None => Ok(None),
        Some(token) => {
            TypeHint::parse(token)
                .map(Some)
                .ok_or_else(|| DefinitionError::UnknownTypeHint {
                    decision: decision.to_string(),
                    clause: clause.to_string(),
                    token: token.to_string(),
                })
        }
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
