//! Cell text parser.
//!
//! Turns the textual cell grammar -- literals, comparisons, ranges, comma
//! lists, `not(...)`, the `-` wildcard -- into [`UnaryTest`] trees. Output
//! cells are literal-only; anything else in an output cell is a parse
//! error, surfaced at load time and never at evaluation time.

use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

use crate::cell::{CompareOp, UnaryTest};
use crate::value::Value;

/// Cell parse failure, reported with the offending cell text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub text: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot parse cell '{}': {}", self.text, self.message)
    }
}

impl std::error::Error for ParseError {}

fn err(text: &str, message: impl Into<String>) -> ParseError {
    ParseError {
        message: message.into(),
        text: text.to_string(),
    }
}

/// Parse an input cell into a test tree.
pub fn parse_unary_tests(text: &str) -> Result<UnaryTest, ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == "-" {
        return Ok(UnaryTest::Any);
    }
    let parts = split_top_level(trimmed);
    if parts.len() > 1 {
        let tests = parts
            .iter()
            .map(|part| parse_single(part.trim(), text))
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(UnaryTest::AnyOf(tests));
    }
    parse_single(trimmed, text)
}

/// Parse an output cell. Output cells are literal-only; an empty cell
/// evaluates to null.
pub fn parse_output_entry(text: &str) -> Result<Value, ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Value::Null);
    }
    parse_literal(trimmed, text)
}

fn parse_single(part: &str, cell: &str) -> Result<UnaryTest, ParseError> {
    if part.is_empty() {
        return Err(err(cell, "empty test"));
    }
    if let Some(rest) = part.strip_prefix("not(") {
        let inner = rest
            .strip_suffix(')')
            .ok_or_else(|| err(cell, "unterminated not(...)"))?;
        return Ok(UnaryTest::Not(Box::new(parse_unary_tests(inner)?)));
    }
    // Two-character operators first so `<=` is not read as `<` then `=`.
    for (symbol, op) in [
        ("<=", CompareOp::Le),
        (">=", CompareOp::Ge),
        ("<", CompareOp::Lt),
        (">", CompareOp::Gt),
    ] {
        if let Some(rest) = part.strip_prefix(symbol) {
            let rhs = parse_literal(rest.trim(), cell)?;
            return Ok(UnaryTest::Compare { op, rhs });
        }
    }
    if (part.starts_with('[') || part.starts_with('(')) && part.contains("..") {
        return parse_range(part, cell);
    }
    Ok(UnaryTest::Equal(parse_literal(part, cell)?))
}

fn parse_range(part: &str, cell: &str) -> Result<UnaryTest, ParseError> {
    if !part.ends_with(']') && !part.ends_with(')') {
        return Err(err(cell, "range must close with ']' or ')'"));
    }
    let lo_inclusive = part.starts_with('[');
    let hi_inclusive = part.ends_with(']');
    let body = &part[1..part.len() - 1];
    let (lo, hi) = body
        .split_once("..")
        .ok_or_else(|| err(cell, "range needs '..' between its bounds"))?;
    Ok(UnaryTest::Range {
        lo: parse_literal(lo.trim(), cell)?,
        lo_inclusive,
        hi: parse_literal(hi.trim(), cell)?,
        hi_inclusive,
    })
}

/// Parse a literal: quoted text, `true`/`false`, `null`, or a decimal
/// number. Numbers go through `Decimal::from_str`, so `100.50` keeps its
/// exact decimal representation.
fn parse_literal(part: &str, cell: &str) -> Result<Value, ParseError> {
    if part.is_empty() {
        return Err(err(cell, "expected a literal"));
    }
    if part.len() >= 2
        && ((part.starts_with('"') && part.ends_with('"'))
            || (part.starts_with('\'') && part.ends_with('\'')))
    {
        return Ok(Value::Text(part[1..part.len() - 1].to_string()));
    }
    match part {
        "true" => return Ok(Value::Bool(true)),
        "false" => return Ok(Value::Bool(false)),
        "null" => return Ok(Value::Null),
        _ => {}
    }
    Decimal::from_str(part)
        .map(Value::Number)
        .map_err(|_| err(cell, format!("'{}' is not a literal", part)))
}

/// Split on top-level commas. Commas inside quotes, brackets, or
/// parentheses do not split.
fn split_top_level(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '"' | '\'' => match quote {
                Some(q) if q == c => quote = None,
                None => quote = Some(c),
                _ => {}
            },
            '[' | '(' if quote.is_none() => depth += 1,
            ']' | ')' if quote.is_none() => depth = depth.saturating_sub(1),
            ',' if quote.is_none() && depth == 0 => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn num(s: &str) -> Value {
        Value::Number(Decimal::from_str(s).unwrap())
    }

    #[test]
    fn empty_and_dash_are_wildcards() {
        assert_eq!(parse_unary_tests("").unwrap(), UnaryTest::Any);
        assert_eq!(parse_unary_tests("  ").unwrap(), UnaryTest::Any);
        assert_eq!(parse_unary_tests("-").unwrap(), UnaryTest::Any);
    }

    #[test]
    fn bare_literals() {
        assert_eq!(parse_unary_tests("18").unwrap(), UnaryTest::Equal(num("18")));
        assert_eq!(
            parse_unary_tests("\"minor\"").unwrap(),
            UnaryTest::Equal(Value::Text("minor".to_string()))
        );
        assert_eq!(
            parse_unary_tests("'minor'").unwrap(),
            UnaryTest::Equal(Value::Text("minor".to_string()))
        );
        assert_eq!(
            parse_unary_tests("true").unwrap(),
            UnaryTest::Equal(Value::Bool(true))
        );
        assert_eq!(
            parse_unary_tests("null").unwrap(),
            UnaryTest::Equal(Value::Null)
        );
    }

    #[test]
    fn negative_and_fractional_numbers() {
        assert_eq!(parse_unary_tests("-3.5").unwrap(), UnaryTest::Equal(num("-3.5")));
        assert_eq!(parse_unary_tests("0.10").unwrap(), UnaryTest::Equal(num("0.10")));
    }

    #[test]
    fn comparisons() {
        assert_eq!(
            parse_unary_tests("< 18").unwrap(),
            UnaryTest::Compare {
                op: CompareOp::Lt,
                rhs: num("18")
            }
        );
        assert_eq!(
            parse_unary_tests(">=18").unwrap(),
            UnaryTest::Compare {
                op: CompareOp::Ge,
                rhs: num("18")
            }
        );
        assert_eq!(
            parse_unary_tests("<= \"m\"").unwrap(),
            UnaryTest::Compare {
                op: CompareOp::Le,
                rhs: Value::Text("m".to_string())
            }
        );
    }

    #[test]
    fn ranges_honor_bracket_shape() {
        assert_eq!(
            parse_unary_tests("[18..65]").unwrap(),
            UnaryTest::Range {
                lo: num("18"),
                lo_inclusive: true,
                hi: num("65"),
                hi_inclusive: true,
            }
        );
        assert_eq!(
            parse_unary_tests("(0 .. 100]").unwrap(),
            UnaryTest::Range {
                lo: num("0"),
                lo_inclusive: false,
                hi: num("100"),
                hi_inclusive: true,
            }
        );
        assert_eq!(
            parse_unary_tests("[1..2)").unwrap(),
            UnaryTest::Range {
                lo: num("1"),
                lo_inclusive: true,
                hi: num("2"),
                hi_inclusive: false,
            }
        );
    }

    #[test]
    fn comma_lists_become_any_of() {
        let parsed = parse_unary_tests("1, 2, >= 10").unwrap();
        assert_eq!(
            parsed,
            UnaryTest::AnyOf(vec![
                UnaryTest::Equal(num("1")),
                UnaryTest::Equal(num("2")),
                UnaryTest::Compare {
                    op: CompareOp::Ge,
                    rhs: num("10")
                },
            ])
        );
    }

    #[test]
    fn commas_inside_quotes_and_ranges_do_not_split() {
        assert_eq!(
            parse_unary_tests("\"a,b\"").unwrap(),
            UnaryTest::Equal(Value::Text("a,b".to_string()))
        );
        let parsed = parse_unary_tests("[1..2], [3..4]").unwrap();
        match parsed {
            UnaryTest::AnyOf(tests) => assert_eq!(tests.len(), 2),
            other => panic!("expected AnyOf, got {:?}", other),
        }
    }

    #[test]
    fn negation_wraps_inner_tests() {
        assert_eq!(
            parse_unary_tests("not(18)").unwrap(),
            UnaryTest::Not(Box::new(UnaryTest::Equal(num("18"))))
        );
        assert_eq!(
            parse_unary_tests("not(1, 2)").unwrap(),
            UnaryTest::Not(Box::new(UnaryTest::AnyOf(vec![
                UnaryTest::Equal(num("1")),
                UnaryTest::Equal(num("2")),
            ])))
        );
    }

    #[test]
    fn parse_errors() {
        assert!(parse_unary_tests("not(1").is_err());
        assert!(parse_unary_tests("1,,2").is_err());
        assert!(parse_unary_tests("< ").is_err());
        assert!(parse_unary_tests("adult").is_err()); // unquoted word
        assert!(parse_unary_tests("[1..]").is_err());
    }

    #[test]
    fn output_entries_are_literal_only() {
        assert_eq!(parse_output_entry("\"minor\"").unwrap(), Value::Text("minor".to_string()));
        assert_eq!(parse_output_entry("42").unwrap(), num("42"));
        assert_eq!(parse_output_entry("").unwrap(), Value::Null);
        assert!(parse_output_entry("< 18").is_err());
        assert!(parse_output_entry("minor").is_err());
    }
}
