//! Function definitions.

use crate::error::{Result, TranslateError};
use crate::scope::Translator;
use pythonjs_syntax::{Expr, FunctionDef, Stmt};

fn is_docstring(stmt: &Stmt) -> bool {
    matches!(
        stmt,
        Stmt::Expr {
            value: Expr::Str { .. }
        }
    )
}

impl Translator {
    /// Render `def` as a function expression assigned to its name.
    ///
    /// Top-level functions assign without `var` so they land on the global
    /// object, and are recorded in the function registry. A single decorator
    /// names the object the function is attached to.
    pub(crate) fn render_function(&mut self, def: &FunctionDef) -> Result<String> {
        let params = def.args.join(", ");
        let outermost = self.functions.is_empty();

        let header = match def.decorators.as_slice() {
            [] if outermost => format!("{} = function({params}) {{", def.name),
            [] => format!("var {} = function({params}) {{", def.name),
            [decorator] => {
                let target = self.render_expr(decorator)?;
                format!("{target}.{} = function({params}) {{", def.name)
            }
            many => {
                return Err(TranslateError::unsupported(
                    "FunctionDef",
                    format!(
                        "`{}` has {} decorators, at most one is supported",
                        def.name,
                        many.len()
                    ),
                ));
            }
        };

        let close = self.indent_str();
        let start = def
            .body
            .iter()
            .position(|stmt| !is_docstring(stmt))
            .unwrap_or(def.body.len());
        let body = self.enter_function(&def.name).render_block(&def.body[start..])?;

        let mut text = header;
        for line in body {
            text.push('\n');
            text.push_str(&line);
        }
        text.push('\n');
        text.push_str(&close);
        text.push_str("}\n");

        if outermost {
            self.registry.insert(def.name.clone(), text.clone());
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ret(name: &str) -> Stmt {
        Stmt::return_stmt(Some(Expr::name(name)))
    }

    #[test]
    fn top_level_function() {
        let mut tr = Translator::new();
        let def = FunctionDef::new(
            "add",
            vec!["a".into(), "b".into()],
            vec![Stmt::return_stmt(Some(Expr::binop(
                Expr::name("a"),
                pythonjs_syntax::Operator::Add,
                Expr::name("b"),
            )))],
        );
        let text = tr.render_function(&def).unwrap();
        assert_eq!(text, "add = function(a, b) {\n  return (a + b);\n}\n");
        assert_eq!(tr.functions().get("add"), Some(&text));
    }

    #[test]
    fn decorated_function() {
        let mut tr = Translator::new();
        let def = FunctionDef::new("f", vec![], vec![Stmt::Pass])
            .with_decorator(Expr::attribute(Expr::name("ns"), "sub"));
        assert_eq!(
            tr.render_function(&def).unwrap(),
            "ns.sub.f = function() {\n  /*pass*/\n}\n"
        );
    }

    #[test]
    fn two_decorators_are_rejected() {
        let mut tr = Translator::new();
        let def = FunctionDef::new("f", vec![], vec![Stmt::Pass])
            .with_decorator(Expr::name("a"))
            .with_decorator(Expr::name("b"));
        assert!(matches!(
            tr.render_function(&def),
            Err(TranslateError::UnsupportedConstruct {
                construct: "FunctionDef",
                ..
            })
        ));
    }

    #[test]
    fn leading_docstrings_are_dropped() {
        let mut tr = Translator::new();
        let def = FunctionDef::new(
            "f",
            vec![],
            vec![
                Stmt::expr(Expr::string("Docs.")),
                ret("x"),
                Stmt::expr(Expr::string("kept")),
            ],
        );
        assert_eq!(
            tr.render_function(&def).unwrap(),
            "f = function() {\n  return x;\n  \"kept\";\n}\n"
        );
    }

    #[test]
    fn nested_function_uses_var_and_is_not_registered() {
        let mut tr = Translator::new();
        let inner = FunctionDef::new("inner", vec!["b".into()], vec![ret("b")]);
        let outer = FunctionDef::new(
            "outer",
            vec!["a".into()],
            vec![Stmt::function(inner), ret("inner")],
        );
        assert_eq!(
            tr.render_function(&outer).unwrap(),
            "outer = function(a) {\n  var inner = function(b) {\n    return b;\n  }\n\n  return inner;\n}\n"
        );
        assert_eq!(tr.functions().keys().collect::<Vec<_>>(), vec!["outer"]);
    }
}
