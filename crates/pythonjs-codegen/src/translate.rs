//! Statement dispatch and the translation entry points.

use crate::error::{Result, TranslateError};
use crate::scope::Translator;
use pythonjs_syntax::{Module, Stmt};

/// Translate a module with default options.
pub fn translate(module: &Module) -> Result<String> {
    Translator::new().translate(module)
}

impl Translator {
    /// Translate a whole module. Top-level statements are joined by newlines.
    pub fn translate(&mut self, module: &Module) -> Result<String> {
        self.reset();

        let mut lines = Vec::with_capacity(module.body.len());
        for stmt in &module.body {
            match self.render_stmt(stmt)? {
                None => {}
                Some(text) if text.is_empty() => {
                    return Err(TranslateError::EmptyStatement(stmt.kind()));
                }
                Some(text) => lines.push(text),
            }
        }
        Ok(lines.join("\n"))
    }

    /// Render a statement.
    ///
    /// The first line carries no indentation; the caller places it. Any
    /// further lines are indented absolutely. `None` means the statement has
    /// no output at all.
    pub(crate) fn render_stmt(&mut self, stmt: &Stmt) -> Result<Option<String>> {
        let text = match stmt {
            Stmt::FunctionDef(def) => self.render_function(def)?,
            Stmt::If { test, body, orelse } => self.render_if(test, body, orelse)?,
            Stmt::While { test, body } => self.render_while(test, body)?,
            Stmt::For { target, iter, body } => self.render_for(target, iter, body)?,
            Stmt::TryExcept {
                body,
                handlers,
                finalbody,
            } => self.render_try(body, handlers, finalbody)?,
            Stmt::Assign { targets, value } => self.render_assign(targets, value)?,
            Stmt::AugAssign { target, op, value } => self.render_aug_assign(target, *op, value)?,
            Stmt::Expr { value } => self.render_expr_stmt(value)?,
            Stmt::Return { value } => self.render_return(value.as_ref())?,
            Stmt::Raise { exc } => self.render_raise(exc.as_ref())?,
            Stmt::Print { values } => self.render_print(values)?,
            Stmt::Import { .. } | Stmt::ImportFrom { .. } => return Ok(None),
            Stmt::Pass => "/*pass*/".into(),
            Stmt::Break => "break;".into(),
            Stmt::Continue => "continue".into(),
        };
        Ok(Some(text))
    }

    /// Render a body at the current depth, one indented line group per
    /// statement. Statements without output are skipped.
    pub(crate) fn render_block(&mut self, body: &[Stmt]) -> Result<Vec<String>> {
        let indent = self.indent_str();
        let mut lines = Vec::with_capacity(body.len());
        for stmt in body {
            match self.render_stmt(stmt)? {
                Some(text) if !text.is_empty() => lines.push(format!("{indent}{text}")),
                _ => {}
            }
        }
        Ok(lines)
    }
}
