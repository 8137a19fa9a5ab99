//! Conditionals, loops and simple statements.

use crate::error::{Result, TranslateError};
use crate::ops;
use crate::scope::Translator;
use pythonjs_syntax::{Expr, Operator, Stmt};

impl Translator {
    pub(crate) fn render_if(&mut self, test: &Expr, body: &[Stmt], orelse: &[Stmt]) -> Result<String> {
        let close = self.indent_str();
        let mut lines = vec![format!("if ({}) {{", self.render_expr(test)?)];
        lines.extend(self.nested().render_block(body)?);

        let orelse = self.nested().render_block(orelse)?;
        if !orelse.is_empty() {
            lines.push(format!("{close}}} else {{"));
            lines.extend(orelse);
        }
        lines.push(format!("{close}}}"));

        Ok(lines.join("\n"))
    }

    pub(crate) fn render_while(&mut self, test: &Expr, body: &[Stmt]) -> Result<String> {
        let close = self.indent_str();
        let mut lines = vec![format!("while ({}) {{", self.render_expr(test)?)];
        lines.extend(self.nested().render_block(body)?);
        lines.push(format!("{close}}}"));
        Ok(lines.join("\n"))
    }

    /// Python iteration over an array index loop.
    ///
    /// The iterable is evaluated once. Objects iterate over their keys, like a
    /// Python dict.
    pub(crate) fn render_for(&mut self, target: &Expr, iter: &Expr, body: &[Stmt]) -> Result<String> {
        let target = match target {
            Expr::Name { id } => id,
            other => {
                return Err(TranslateError::unsupported(
                    "For",
                    format!("loop target must be a name, got {}", other.kind()),
                ));
            }
        };

        let n = self.next_iter_id();
        let iter_name = format!("__iter{n}");
        let index = format!("__idx{n}");
        let indent = self.indent_str();

        let mut lines = vec![
            format!("var {iter_name} = {};", self.render_expr(iter)?),
            format!(
                "{indent}if (! ({iter_name} instanceof Array) ) {{ {iter_name} = __object_keys__({iter_name}) }}"
            ),
            format!("{indent}for (var {index}=0; {index} < {iter_name}.length; {index}++) {{"),
        ];
        {
            let mut inner = self.nested();
            lines.push(format!(
                "{}var {target} = {iter_name}[ {index} ];",
                inner.indent_str()
            ));
            lines.extend(inner.render_block(body)?);
        }
        lines.push(format!("{indent}}}"));

        Ok(lines.join("\n"))
    }

    pub(crate) fn render_assign(&mut self, targets: &[Expr], value: &Expr) -> Result<String> {
        let mut parts = Vec::with_capacity(targets.len() + 1);
        for target in targets {
            parts.push(self.render_target(target)?);
        }
        parts.push(self.render_expr(value)?);
        Ok(format!("{};", parts.join(" = ")))
    }

    pub(crate) fn render_aug_assign(&mut self, target: &Expr, op: Operator, value: &Expr) -> Result<String> {
        let token = ops::binary_token(op)?;
        Ok(format!(
            "{} {token}= {};",
            self.render_target(target)?,
            self.render_expr(value)?
        ))
    }

    fn render_target(&mut self, target: &Expr) -> Result<String> {
        match target {
            Expr::Tuple { .. } | Expr::List { .. } => Err(TranslateError::unsupported(
                "Assign",
                "unpacking assignment has no JavaScript form",
            )),
            other => self.render_expr(other),
        }
    }

    pub(crate) fn render_return(&mut self, value: Option<&Expr>) -> Result<String> {
        match value {
            Some(Expr::Tuple { elts }) => Ok(format!("return [{}];", self.render_list(elts)?.join(", "))),
            Some(value) => Ok(format!("return {};", self.render_expr(value)?)),
            None => Ok("return undefined;".into()),
        }
    }

    pub(crate) fn render_print(&mut self, values: &[Expr]) -> Result<String> {
        Ok(format!("console.log({});", self.render_list(values)?.join(", ")))
    }

    /// An expression used as a statement. Empty when the expression renders
    /// to nothing, such as a `var(...)` with only known names.
    pub(crate) fn render_expr_stmt(&mut self, value: &Expr) -> Result<String> {
        let mut text = self.render_expr(value)?;
        if !text.is_empty() && !text.ends_with(';') {
            text.push(';');
        }
        Ok(text)
    }
}
