//! Unit-expression parsing and evaluation
//!
//! Unit annotations are small algebraic strings over unit names: products,
//! quotients, powers, numeric literals and parentheses, e.g. `"joule"`,
//! `"1 / meter^2"` or `"kilogram*meter^2/second^3"`. One tree serves three
//! purposes: collecting the unit symbols, evaluating the expression under
//! a substitution scope to obtain a net scaling factor, and rewriting the
//! symbol names for display labels.

use crate::ConvertError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Binary operators of the unit algebra
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitOp {
    Mul,
    Div,
    Pow,
}

/// Parsed unit expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UnitExpr {
    Number(f64),
    Symbol(String),
    Binary(UnitOp, Box<UnitExpr>, Box<UnitExpr>),
}

/// Parse a unit expression. `**` is accepted as an alias for `^` since the
/// archive metainfo writes exponents Python-style.
pub fn parse_unit(input: &str) -> Result<UnitExpr, ConvertError> {
    let normalized = input.replace("**", "^");
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        return Err(ConvertError::Parse("empty expression".to_string()));
    }

    let mut depth = 0i32;
    for c in trimmed.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return Err(ConvertError::Parse(format!(
                        "unbalanced parentheses in '{}'",
                        input.trim()
                    )));
                }
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(ConvertError::Parse(format!(
            "unbalanced parentheses in '{}'",
            input.trim()
        )));
    }

    parse_multiplicative(trimmed)
}

/// Scan right-to-left for `*` or `/` outside parentheses so the operators
/// associate to the left.
fn parse_multiplicative(input: &str) -> Result<UnitExpr, ConvertError> {
    let input = input.trim();
    let mut depth = 0i32;
    let chars: Vec<(usize, char)> = input.char_indices().collect();

    for idx in (0..chars.len()).rev() {
        let (pos, c) = chars[idx];
        match c {
            ')' => depth += 1,
            '(' => depth -= 1,
            '*' | '/' if depth == 0 => {
                let left = input[..pos].trim();
                let right = input[pos + c.len_utf8()..].trim();
                if left.is_empty() || right.is_empty() {
                    return Err(ConvertError::Parse(format!(
                        "dangling '{}' in '{}'",
                        c, input
                    )));
                }
                let op = if c == '*' { UnitOp::Mul } else { UnitOp::Div };
                return Ok(UnitExpr::Binary(
                    op,
                    Box::new(parse_multiplicative(left)?),
                    Box::new(parse_power(right)?),
                ));
            }
            _ => {}
        }
    }

    parse_power(input)
}

/// Scan left-to-right for `^` outside parentheses; the operator associates
/// to the right.
fn parse_power(input: &str) -> Result<UnitExpr, ConvertError> {
    let input = input.trim();
    let mut depth = 0i32;

    for (pos, c) in input.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            '^' if depth == 0 => {
                let left = input[..pos].trim();
                let right = input[pos + 1..].trim();
                if left.is_empty() || right.is_empty() {
                    return Err(ConvertError::Parse(format!(
                        "dangling '^' in '{}'",
                        input
                    )));
                }
                return Ok(UnitExpr::Binary(
                    UnitOp::Pow,
                    Box::new(parse_primary(left)?),
                    Box::new(parse_power(right)?),
                ));
            }
            _ => {}
        }
    }

    parse_primary(input)
}

fn parse_primary(input: &str) -> Result<UnitExpr, ConvertError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ConvertError::Parse("empty operand".to_string()));
    }

    if input.starts_with('(') && input.ends_with(')') {
        return parse_multiplicative(&input[1..input.len() - 1]);
    }

    if input.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
        && input.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Ok(UnitExpr::Symbol(input.to_string()));
    }

    input
        .parse::<f64>()
        .map(UnitExpr::Number)
        .map_err(|_| ConvertError::Parse(format!("invalid token '{}'", input)))
}

impl UnitExpr {
    /// Every unit name appearing in the tree.
    pub fn symbols(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.collect_symbols(&mut out);
        out
    }

    fn collect_symbols(&self, out: &mut BTreeSet<String>) {
        match self {
            UnitExpr::Number(_) => {}
            UnitExpr::Symbol(name) => {
                out.insert(name.clone());
            }
            UnitExpr::Binary(_, lhs, rhs) => {
                lhs.collect_symbols(out);
                rhs.collect_symbols(out);
            }
        }
    }

    /// Evaluate under a substitution scope mapping unit name -> factor.
    pub fn evaluate(&self, scope: &HashMap<String, f64>) -> Result<f64, ConvertError> {
        match self {
            UnitExpr::Number(x) => Ok(*x),
            UnitExpr::Symbol(name) => scope
                .get(name)
                .copied()
                .ok_or_else(|| ConvertError::UnknownUnit(name.clone())),
            UnitExpr::Binary(op, lhs, rhs) => {
                let l = lhs.evaluate(scope)?;
                let r = rhs.evaluate(scope)?;
                Ok(match op {
                    UnitOp::Mul => l * r,
                    UnitOp::Div => l / r,
                    UnitOp::Pow => l.powf(r),
                })
            }
        }
    }

    /// Rewrite symbol names while preserving operator structure. Names
    /// missing from the map are kept as-is.
    pub fn rename(&self, names: &HashMap<String, String>) -> UnitExpr {
        match self {
            UnitExpr::Number(x) => UnitExpr::Number(*x),
            UnitExpr::Symbol(name) => UnitExpr::Symbol(
                names.get(name).cloned().unwrap_or_else(|| name.clone()),
            ),
            UnitExpr::Binary(op, lhs, rhs) => UnitExpr::Binary(
                *op,
                Box::new(lhs.rename(names)),
                Box::new(rhs.rename(names)),
            ),
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            UnitExpr::Number(_) | UnitExpr::Symbol(_) => 3,
            UnitExpr::Binary(UnitOp::Pow, _, _) => 2,
            UnitExpr::Binary(_, _, _) => 1,
        }
    }
}

impl fmt::Display for UnitExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitExpr::Number(x) => write!(f, "{}", x),
            UnitExpr::Symbol(name) => write!(f, "{}", name),
            UnitExpr::Binary(op, lhs, rhs) => {
                let prec = self.precedence();
                // Right side of '/' needs parens at equal precedence
                // (a / (b * c)); right side of '^' does not since the
                // operator is right-associative.
                let (symbol, left_needs, right_needs) = match op {
                    UnitOp::Mul => (" * ", lhs.precedence() < prec, rhs.precedence() < prec),
                    UnitOp::Div => (" / ", lhs.precedence() < prec, rhs.precedence() <= prec),
                    UnitOp::Pow => ("^", lhs.precedence() <= prec, rhs.precedence() < prec),
                };
                if left_needs {
                    write!(f, "({})", lhs)?;
                } else {
                    write!(f, "{}", lhs)?;
                }
                f.write_str(symbol)?;
                if right_needs {
                    write!(f, "({})", rhs)
                } else {
                    write!(f, "{}", rhs)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope(entries: &[(&str, f64)]) -> HashMap<String, f64> {
        entries
            .iter()
            .map(|(name, factor)| (name.to_string(), *factor))
            .collect()
    }

    #[test]
    fn test_parse_symbol() {
        assert_eq!(
            parse_unit("joule").unwrap(),
            UnitExpr::Symbol("joule".to_string())
        );
    }

    #[test]
    fn test_parse_quotient_with_literal() {
        let expr = parse_unit("1 / meter^2").unwrap();
        assert_eq!(
            expr,
            UnitExpr::Binary(
                UnitOp::Div,
                Box::new(UnitExpr::Number(1.0)),
                Box::new(UnitExpr::Binary(
                    UnitOp::Pow,
                    Box::new(UnitExpr::Symbol("meter".to_string())),
                    Box::new(UnitExpr::Number(2.0)),
                )),
            )
        );
    }

    #[test]
    fn test_parse_python_style_exponent() {
        assert_eq!(
            parse_unit("meter**2").unwrap(),
            parse_unit("meter^2").unwrap()
        );
    }

    #[test]
    fn test_parse_negative_exponent() {
        let expr = parse_unit("meter^-2").unwrap();
        let factors = scope(&[("meter", 10.0)]);
        assert_eq!(expr.evaluate(&factors).unwrap(), 0.01);
    }

    #[test]
    fn test_multiplication_is_left_associative() {
        // a / b * c parses as (a / b) * c, not a / (b * c)
        let expr = parse_unit("second / meter * kilogram").unwrap();
        let factors = scope(&[("second", 12.0), ("meter", 4.0), ("kilogram", 2.0)]);
        assert_eq!(expr.evaluate(&factors).unwrap(), 6.0);
    }

    #[test]
    fn test_parentheses() {
        let expr = parse_unit("second / (meter * kilogram)").unwrap();
        let factors = scope(&[("second", 12.0), ("meter", 4.0), ("kilogram", 2.0)]);
        assert_eq!(expr.evaluate(&factors).unwrap(), 1.5);
    }

    #[test]
    fn test_symbols_of_compound_expression() {
        let expr = parse_unit("meter / second^2").unwrap();
        let symbols: Vec<String> = expr.symbols().into_iter().collect();
        assert_eq!(symbols, vec!["meter".to_string(), "second".to_string()]);
    }

    #[test]
    fn test_evaluate_missing_symbol_fails() {
        let expr = parse_unit("meter / second").unwrap();
        let factors = scope(&[("meter", 1.0)]);
        assert_eq!(
            expr.evaluate(&factors),
            Err(ConvertError::UnknownUnit("second".to_string()))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_unit(""), Err(ConvertError::Parse(_))));
        assert!(matches!(parse_unit("   "), Err(ConvertError::Parse(_))));
        assert!(matches!(parse_unit("(meter"), Err(ConvertError::Parse(_))));
        assert!(matches!(parse_unit("meter)"), Err(ConvertError::Parse(_))));
        assert!(matches!(parse_unit("meter /"), Err(ConvertError::Parse(_))));
        assert!(matches!(parse_unit("* meter"), Err(ConvertError::Parse(_))));
        assert!(matches!(parse_unit("meter^"), Err(ConvertError::Parse(_))));
        assert!(matches!(parse_unit("me ter"), Err(ConvertError::Parse(_))));
        assert!(matches!(parse_unit("meter + second"), Err(ConvertError::Parse(_))));
    }

    #[test]
    fn test_rename_preserves_structure() {
        let expr = parse_unit("kelvin / second").unwrap();
        let names = [("kelvin".to_string(), "K".to_string())]
            .into_iter()
            .collect();
        assert_eq!(expr.rename(&names).to_string(), "K / second");
    }

    #[test]
    fn test_display_parenthesizes_by_precedence() {
        assert_eq!(
            parse_unit("second / (meter * kilogram)").unwrap().to_string(),
            "second / (meter * kilogram)"
        );
        assert_eq!(
            parse_unit("1 / meter^2").unwrap().to_string(),
            "1 / meter^2"
        );
        assert_eq!(
            parse_unit("(meter / second)^2").unwrap().to_string(),
            "(meter / second)^2"
        );
        assert_eq!(
            parse_unit("meter^-2").unwrap().to_string(),
            "meter^-2"
        );
    }
}
