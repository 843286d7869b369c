//! Decision-table definition model and loader.
//!
//! This crate owns the data side of decision-table evaluation: the
//! [`Value`] type, the table model ([`DecisionTable`] and its clauses,
//! rules, and hit policy), the cell-expression grammar, and the loader
//! that turns a JSON definition document into a fully parsed, immutable
//! table. All cell text is parsed here, once, at load time; evaluation
//! lives in the `dmntab-eval` crate and only walks the parsed trees.

pub mod cell;
pub mod error;
pub mod load;
pub mod parser;
pub mod table;
pub mod value;

pub use cell::{CompareOp, UnaryTest};
pub use error::DefinitionError;
pub use load::DefinitionFile;
pub use parser::ParseError;
pub use table::{DecisionTable, HitPolicy, InputClause, OutputClause, Rule, TypeHint};
pub use value::Value;
