//! Lowering of try/except onto a single JavaScript catch block.
//!
//! JavaScript catches everything in one clause, so each typed Python handler
//! turns into its own `if` testing the caught value. A bare handler is not
//! guarded and always runs:
//!
//! ```text
//! try {
//!   body
//! } catch(__exception__) {
//!   if (__exception__ == T || isinstance([__exception__, T], Object())) {
//!     var e = __exception__;
//!     ...
//!   }
//!   ...
//! }
//! ```

use crate::error::{Result, TranslateError};
use crate::scope::Translator;
use pythonjs_syntax::{ExceptHandler, Expr, Stmt};

/// Name the caught value is bound to in the generated catch clause.
pub const EXCEPTION: &str = "__exception__";

fn guard(ty: &str) -> String {
    format!("{EXCEPTION} == {ty} || isinstance([{EXCEPTION}, {ty}], Object())")
}

impl Translator {
    pub(crate) fn render_try(
        &mut self,
        body: &[Stmt],
        handlers: &[ExceptHandler],
        finalbody: &[Stmt],
    ) -> Result<String> {
        let close = self.indent_str();
        let mut lines = vec!["try {".to_string()];
        lines.extend(self.nested().render_block(body)?);

        if !handlers.is_empty() || finalbody.is_empty() {
            lines.push(format!("{close}}} catch({EXCEPTION}) {{"));
            lines.extend(self.nested().render_handlers(handlers)?);
        }
        if !finalbody.is_empty() {
            lines.push(format!("{close}}} finally {{"));
            lines.extend(self.nested().render_block(finalbody)?);
        }
        lines.push(format!("{close}}}"));

        Ok(lines.join("\n"))
    }

    /// The body of the catch clause, at the current depth.
    fn render_handlers(&mut self, handlers: &[ExceptHandler]) -> Result<Vec<String>> {
        let indent = self.indent_str();
        let mut lines = Vec::new();

        for (i, handler) in handlers.iter().enumerate() {
            match &handler.ty {
                Some(ty) => {
                    let ty = self.render_expr(ty)?;
                    lines.push(format!("{indent}if ({}) {{", guard(&ty)));
                    lines.extend(self.render_handler_body(handler, 1)?);
                    lines.push(format!("{indent}}}"));
                }
                None if i + 1 != handlers.len() => {
                    return Err(TranslateError::unsupported(
                        "ExceptHandler",
                        "a bare `except:` must be the last handler",
                    ));
                }
                None => lines.extend(self.render_handler_body(handler, 0)?),
            }
        }
        Ok(lines)
    }

    fn render_handler_body(&mut self, handler: &ExceptHandler, levels: usize) -> Result<Vec<String>> {
        let mut scope = self.enter_handler(levels);
        let mut lines = Vec::new();
        if let Some(name) = &handler.name {
            lines.push(format!("{}var {name} = {EXCEPTION};", scope.indent_str()));
        }
        lines.extend(scope.render_block(&handler.body)?);
        Ok(lines)
    }

    /// `throw`, re-throwing the caught value for a bare `raise`.
    pub(crate) fn render_raise(&mut self, exc: Option<&Expr>) -> Result<String> {
        match exc {
            Some(exc) => Ok(format!("throw {};", self.render_expr(exc)?)),
            None if self.handler_depth > 0 => Ok(format!("throw {EXCEPTION};")),
            None => Err(TranslateError::unsupported(
                "Raise",
                "bare `raise` outside an except handler",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn print(name: &str) -> Stmt {
        Stmt::print(vec![Expr::name(name)])
    }

    #[test]
    fn typed_then_bare() {
        let mut tr = Translator::new();
        let text = tr
            .render_try(
                &[Stmt::expr(Expr::call(Expr::name("f"), vec![]))],
                &[
                    ExceptHandler::new(Some(Expr::name("TypeError")), Some("e"), vec![print("e")]),
                    ExceptHandler::new(None, None, vec![Stmt::Pass]),
                ],
                &[],
            )
            .unwrap();
        assert_eq!(
            text,
            "try {
  f();
} catch(__exception__) {
  if (__exception__ == TypeError || isinstance([__exception__, TypeError], Object())) {
    var e = __exception__;
    console.log(e);
  }
  /*pass*/
}"
        );
    }

    #[test]
    fn typed_handlers_are_independent_guards() {
        let mut tr = Translator::new();
        let text = tr
            .render_try(
                &[Stmt::Pass],
                &[
                    ExceptHandler::new(Some(Expr::name("A")), None, vec![Stmt::Break]),
                    ExceptHandler::new(Some(Expr::name("B")), None, vec![Stmt::Continue]),
                ],
                &[],
            )
            .unwrap();
        assert_eq!(
            text,
            "try {
  /*pass*/
} catch(__exception__) {
  if (__exception__ == A || isinstance([__exception__, A], Object())) {
    break;
  }
  if (__exception__ == B || isinstance([__exception__, B], Object())) {
    continue
  }
}"
        );
    }

    #[test]
    fn lone_bare_handler_with_rethrow_and_finally() {
        let mut tr = Translator::new();
        let text = tr
            .render_try(
                &[Stmt::Pass],
                &[ExceptHandler::new(None, Some("err"), vec![Stmt::raise(None)])],
                &[print("done")],
            )
            .unwrap();
        assert_eq!(
            text,
            "try {
  /*pass*/
} catch(__exception__) {
  var err = __exception__;
  throw __exception__;
} finally {
  console.log(done);
}"
        );
    }

    #[test]
    fn bare_handler_must_be_last() {
        let mut tr = Translator::new();
        let err = tr
            .render_try(
                &[Stmt::Pass],
                &[
                    ExceptHandler::new(None, None, vec![Stmt::Pass]),
                    ExceptHandler::new(Some(Expr::name("A")), None, vec![Stmt::Pass]),
                ],
                &[],
            )
            .unwrap_err();
        assert!(matches!(
            err,
            TranslateError::UnsupportedConstruct {
                construct: "ExceptHandler",
                ..
            }
        ));
        assert_eq!(tr.indent, 0);
        assert_eq!(tr.handler_depth, 0);
    }

    #[test]
    fn bare_raise_needs_a_handler() {
        let mut tr = Translator::new();
        assert!(tr.render_raise(None).is_err());
        assert_eq!(tr.render_raise(Some(&Expr::name("e"))).unwrap(), "throw e;");
    }
}
