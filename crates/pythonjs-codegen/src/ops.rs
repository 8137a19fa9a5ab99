//! Operator tokens and literal formatting.

use crate::error::{Result, TranslateError};
use pythonjs_syntax::{BoolOperator, CmpOp, Number, Operator, UnaryOperator};

/// JavaScript token for an arithmetic or bitwise operator.
pub fn binary_token(op: Operator) -> Result<&'static str> {
    match op {
        Operator::Add => Ok("+"),
        Operator::Sub => Ok("-"),
        Operator::Mult => Ok("*"),
        Operator::Div => Ok("/"),
        Operator::Mod => Ok("%"),
        Operator::LShift => Ok("<<"),
        Operator::RShift => Ok(">>"),
        Operator::BitOr => Ok("|"),
        Operator::BitXor => Ok("^"),
        Operator::BitAnd => Ok("&"),
        Operator::Pow => Err(TranslateError::UnsupportedOperator("**")),
        Operator::FloorDiv => Err(TranslateError::UnsupportedOperator("//")),
        Operator::MatMult => Err(TranslateError::UnsupportedOperator("@")),
    }
}

pub fn compare_token(op: CmpOp) -> Result<&'static str> {
    match op {
        CmpOp::Eq => Ok("=="),
        CmpOp::NotEq => Ok("!="),
        CmpOp::Lt => Ok("<"),
        CmpOp::LtE => Ok("<="),
        CmpOp::Gt => Ok(">"),
        CmpOp::GtE => Ok(">="),
        CmpOp::Is => Ok("==="),
        CmpOp::IsNot => Ok("!=="),
        CmpOp::In => Err(TranslateError::UnsupportedOperator("in")),
        CmpOp::NotIn => Err(TranslateError::UnsupportedOperator("not in")),
    }
}

/// Separator placed between the operands of a boolean chain.
pub fn bool_separator(op: BoolOperator) -> &'static str {
    match op {
        BoolOperator::And => " && ",
        BoolOperator::Or => " || ",
    }
}

pub fn unary_token(op: UnaryOperator) -> Result<&'static str> {
    match op {
        UnaryOperator::Not => Ok("!"),
        UnaryOperator::USub => Ok("-"),
        UnaryOperator::UAdd => Err(TranslateError::UnsupportedOperator("+")),
        UnaryOperator::Invert => Err(TranslateError::UnsupportedOperator("~")),
    }
}

/// Render a name, mapping Python's singletons onto JavaScript's.
pub fn name(id: &str) -> &str {
    match id {
        "None" => "undefined",
        "True" => "true",
        "False" => "false",
        other => other,
    }
}

/// Default numeric text: integers plainly, integral floats without a
/// fractional part, everything else in shortest round-trip form.
pub fn format_number(n: Number) -> String {
    match n {
        Number::Int(i) => i.to_string(),
        Number::Float(f) if f.is_nan() => "NaN".into(),
        Number::Float(f) if f == f64::INFINITY => "Infinity".into(),
        Number::Float(f) if f == f64::NEG_INFINITY => "-Infinity".into(),
        Number::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => (f as i64).to_string(),
        Number::Float(f) => f.to_string(),
    }
}

/// Quote a string literal.
///
/// Only newlines are escaped. A string holding both quote characters comes
/// out unbalanced, which downstream JavaScript tooling reports.
pub fn quote_string(s: &str) -> String {
    let s = s.replace('\n', "\\n");
    if s.contains('"') {
        format!("'{s}'")
    } else {
        format!("\"{s}\"")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_supported_operator_has_a_token() {
        let table = [
            (Operator::Add, "+"),
            (Operator::Sub, "-"),
            (Operator::Mult, "*"),
            (Operator::Div, "/"),
            (Operator::Mod, "%"),
            (Operator::LShift, "<<"),
            (Operator::RShift, ">>"),
            (Operator::BitXor, "^"),
            (Operator::BitOr, "|"),
            (Operator::BitAnd, "&"),
        ];
        for (op, token) in table {
            assert_eq!(binary_token(op), Ok(token));
        }
    }

    #[test]
    fn unsupported_operators() {
        assert_eq!(
            binary_token(Operator::Pow),
            Err(TranslateError::UnsupportedOperator("**"))
        );
        assert_eq!(
            binary_token(Operator::FloorDiv),
            Err(TranslateError::UnsupportedOperator("//"))
        );
        assert_eq!(
            compare_token(CmpOp::In),
            Err(TranslateError::UnsupportedOperator("in"))
        );
        assert!(unary_token(UnaryOperator::Invert).is_err());
        assert!(unary_token(UnaryOperator::UAdd).is_err());
    }

    #[test]
    fn identity_comparisons_are_strict() {
        assert_eq!(compare_token(CmpOp::Is), Ok("==="));
        assert_eq!(compare_token(CmpOp::IsNot), Ok("!=="));
    }

    #[test]
    fn singletons() {
        assert_eq!(name("None"), "undefined");
        assert_eq!(name("True"), "true");
        assert_eq!(name("False"), "false");
        assert_eq!(name("null"), "null");
        assert_eq!(name("none"), "none");
    }

    #[test]
    fn numbers() {
        assert_eq!(format_number(Number::Int(-7)), "-7");
        assert_eq!(format_number(Number::Float(2.0)), "2");
        assert_eq!(format_number(Number::Float(2.5)), "2.5");
        assert_eq!(format_number(Number::Float(0.1)), "0.1");
        assert_eq!(format_number(Number::Float(f64::INFINITY)), "Infinity");
    }

    #[test]
    fn string_quoting() {
        assert_eq!(quote_string("hi"), "\"hi\"");
        assert_eq!(quote_string("say \"hi\""), "'say \"hi\"'");
        assert_eq!(quote_string("a\nb"), "\"a\\nb\"");
        // Both quote kinds: the single-quoted form is emitted unescaped.
        assert_eq!(quote_string("it's \"x\""), "'it's \"x\"'");
    }
}
