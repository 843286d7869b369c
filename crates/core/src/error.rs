//! Load-time errors.

use crate::parser::ParseError;

/// All errors a definition can fail with while loading. These are fatal to
/// using the definition; evaluation never raises them.
#[derive(Debug, thiserror::Error)]
pub enum DefinitionError {
    /// The document is not valid JSON or not the expected shape.
    #[error("malformed definition: {0}")]
    Malformed(String),

    /// The document declares no decisions.
    #[error("definition contains no decisions")]
    Empty,

    /// Two decisions share one id.
    #[error("duplicate decision id '{id}'")]
    DuplicateDecision { id: String },

    /// The requested decision id does not exist in the file.
    #[error("no decision with id '{id}'")]
    UnknownDecision { id: String },

    /// The hit-policy token was not recognized.
    #[error("decision '{decision}': unknown hit policy '{token}'")]
    UnknownHitPolicy { decision: String, token: String },

    /// A clause declared a type that is not number, string, or boolean.
    #[error("decision '{decision}', clause '{clause}': unknown type '{token}'")]
    UnknownTypeHint {
        decision: String,
        clause: String,
        token: String,
    },

    /// A clause has an empty name, two clauses share one, or the output
    /// clause list is empty.
    #[error("decision '{decision}': {message}")]
    InvalidClause { decision: String, message: String },

    /// A rule's cell count does not line up with the clause count.
    #[error(
        "decision '{decision}', rule {rule}: {got} {side} cell(s), expected {expected}"
    )]
    CellCountMismatch {
        decision: String,
        rule: usize,
        side: &'static str,
        expected: usize,
        got: usize,
    },

    /// An input cell failed to parse.
    #[error("decision '{decision}', rule {rule}, input '{clause}': {source}")]
    InvalidInputCell {
        decision: String,
        rule: usize,
        clause: String,
        source: ParseError,
    },

    /// An output cell is not a literal.
    #[error("decision '{decision}', rule {rule}, output '{clause}': {source}")]
    InvalidOutputCell {
        decision: String,
        rule: usize,
        clause: String,
        source: ParseError,
    },

    /// A declared output value (priority order entry) is not representable
    /// as a literal value.
    #[error("decision '{decision}', output '{clause}': declared value is not a literal")]
    InvalidDeclaredValue { decision: String, clause: String },
}
