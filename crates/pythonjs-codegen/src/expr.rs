//! Expression rendering.

use crate::error::{Result, TranslateError};
use crate::ops;
use crate::scope::Translator;
use pythonjs_syntax::{Expr, Slice};

impl Translator {
    pub(crate) fn render_expr(&mut self, expr: &Expr) -> Result<String> {
        match expr {
            Expr::Name { id } => Ok(ops::name(id).to_string()),

            Expr::Attribute { value, attr } => Ok(format!("{}.{attr}", self.render_expr(value)?)),

            Expr::Subscript { value, slice } => {
                let value = self.render_expr(value)?;
                match slice.as_ref() {
                    Slice::Index { value: index } => {
                        Ok(format!("{value}[{}]", self.render_expr(index)?))
                    }
                    Slice::Ellipsis => Ok(format!("{value}[\"$wrapped\"]")),
                    Slice::Slice { .. } => Err(TranslateError::unsupported(
                        "Slice",
                        format!("`{value}[a:b]` has no JavaScript form"),
                    )),
                }
            }

            Expr::Tuple { elts } | Expr::List { elts } => {
                Ok(format!("[{}]", self.render_list(elts)?.join(", ")))
            }

            Expr::Dict { entries } => {
                let mut pairs = Vec::with_capacity(entries.len());
                for (key, value) in entries {
                    pairs.push(format!(
                        "{}:{}",
                        self.render_expr(key)?,
                        self.render_expr(value)?
                    ));
                }
                Ok(format!("{{ {} }}", pairs.join(",")))
            }

            Expr::Str { s } => Ok(ops::quote_string(s)),
            Expr::Num { n } => Ok(ops::format_number(*n)),

            Expr::Compare {
                left,
                ops: operators,
                comparators,
            } => {
                let mut out = format!("({})", self.render_expr(left)?);
                for (op, comparator) in operators.iter().zip(comparators) {
                    let token = ops::compare_token(*op)?;
                    let rendered = self.render_expr(comparator)?;
                    if matches!(comparator, Expr::BinOp { .. }) {
                        out.push_str(&format!(" {token} ({rendered})"));
                    } else {
                        out.push_str(&format!(" {token} {rendered}"));
                    }
                }
                Ok(out)
            }

            Expr::BoolOp { op, values } => {
                Ok(self.render_list(values)?.join(ops::bool_separator(*op)))
            }

            Expr::BinOp { left, op, right } => {
                let token = ops::binary_token(*op)?;
                Ok(format!(
                    "({} {token} {})",
                    self.render_expr(left)?,
                    self.render_expr(right)?
                ))
            }

            Expr::UnaryOp { op, operand } => {
                let token = ops::unary_token(*op)?;
                Ok(format!("{token} ({})", self.render_expr(operand)?))
            }

            Expr::Lambda { args, body } => Ok(format!(
                "(function ({}) {{return {}}})",
                args.join(","),
                self.render_expr(body)?
            )),

            Expr::Call {
                func,
                args,
                keywords,
            } => self.render_call(func, args, keywords),

            Expr::Yield { value: Some(value) } => Ok(format!("yield {}", self.render_expr(value)?)),
            Expr::Yield { value: None } => Ok("yield".into()),
        }
    }

    pub(crate) fn render_list(&mut self, exprs: &[Expr]) -> Result<Vec<String>> {
        exprs.iter().map(|e| self.render_expr(e)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pythonjs_syntax::{BoolOperator, CmpOp, Operator, UnaryOperator};

    fn render(expr: Expr) -> Result<String> {
        Translator::new().render_expr(&expr)
    }

    fn name(id: &str) -> Expr {
        Expr::name(id)
    }

    #[test]
    fn names_and_attributes() {
        assert_eq!(render(name("None")).unwrap(), "undefined");
        assert_eq!(render(Expr::attribute(name("a"), "b")).unwrap(), "a.b");
        assert_eq!(
            render(Expr::attribute(name("True"), "x")).unwrap(),
            "true.x"
        );
    }

    #[test]
    fn subscripts() {
        assert_eq!(
            render(Expr::subscript(name("a"), Expr::int(0))).unwrap(),
            "a[0]"
        );
        assert_eq!(
            render(Expr::ellipsis_subscript(name("a"))).unwrap(),
            "a[\"$wrapped\"]"
        );
        let slice = Expr::Subscript {
            value: Box::new(name("a")),
            slice: Box::new(Slice::Slice {
                lower: Some(Expr::int(1)),
                upper: None,
                step: None,
            }),
        };
        assert!(matches!(
            render(slice),
            Err(TranslateError::UnsupportedConstruct { construct: "Slice", .. })
        ));
    }

    #[test]
    fn collections() {
        assert_eq!(
            render(Expr::tuple(vec![Expr::int(1), name("x")])).unwrap(),
            "[1, x]"
        );
        assert_eq!(render(Expr::list(vec![])).unwrap(), "[]");
        assert_eq!(
            render(Expr::dict(vec![
                (Expr::string("a"), Expr::int(1)),
                (name("k"), name("v")),
            ]))
            .unwrap(),
            "{ \"a\":1,k:v }"
        );
    }

    #[test]
    fn comparisons() {
        let chain = Expr::compare(
            name("a"),
            vec![(CmpOp::Lt, name("b")), (CmpOp::LtE, name("c"))],
        );
        assert_eq!(render(chain).unwrap(), "(a) < b <= c");

        let arith = Expr::compare(
            name("x"),
            vec![(
                CmpOp::Is,
                Expr::binop(name("y"), Operator::Add, Expr::int(1)),
            )],
        );
        assert_eq!(render(arith).unwrap(), "(x) === ((y + 1))");

        let membership = Expr::compare(name("x"), vec![(CmpOp::In, name("xs"))]);
        assert_eq!(
            render(membership),
            Err(TranslateError::UnsupportedOperator("in"))
        );
    }

    #[test]
    fn operators() {
        assert_eq!(
            render(Expr::bool_op(
                BoolOperator::Or,
                vec![name("a"), name("b"), name("c")]
            ))
            .unwrap(),
            "a || b || c"
        );
        assert_eq!(
            render(Expr::binop(name("a"), Operator::Mult, Expr::float(1.5))).unwrap(),
            "(a * 1.5)"
        );
        assert_eq!(
            render(Expr::unary(UnaryOperator::Not, name("ok"))).unwrap(),
            "! (ok)"
        );
        assert_eq!(
            render(Expr::unary(UnaryOperator::USub, name("n"))).unwrap(),
            "- (n)"
        );
    }

    #[test]
    fn lambda_and_yield() {
        assert_eq!(
            render(Expr::lambda(
                vec!["a".into(), "b".into()],
                Expr::binop(name("a"), Operator::Add, name("b"))
            ))
            .unwrap(),
            "(function (a,b) {return (a + b)})"
        );
        assert_eq!(
            render(Expr::yield_expr(Some(name("x")))).unwrap(),
            "yield x"
        );
        assert_eq!(render(Expr::yield_expr(None)).unwrap(), "yield");
    }
}
