//! Reserved call forms.
//!
//! A call whose rendered callee is one of the names in [`MACROS`] is rewritten
//! into a JavaScript construct instead of being emitted as a call.

use crate::error::{Result, TranslateError};
use crate::scope::Translator;
use pythonjs_syntax::{Expr, Keyword};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Macro {
    /// `instanceof(a, B)` → `a instanceof B`
    Instanceof,
    /// `new(f(x))` → ` new f(x)`
    New,
    /// `JSObject(k=v)` → `{"k": v}`
    JsObject,
    /// `var(a, b)` → `var a, b`, minus names already declared
    Var,
    /// `JSArray(a, b)` → `__create_array__(a, b)`
    JsArray,
    /// `JS("text")` → raw text
    Js,
    /// `dart_import("path", "alias")` → `import "path" as alias;`
    DartImport,
}

pub const MACROS: &[(&str, Macro)] = &[
    ("instanceof", Macro::Instanceof),
    ("new", Macro::New),
    ("JSObject", Macro::JsObject),
    ("var", Macro::Var),
    ("JSArray", Macro::JsArray),
    ("JS", Macro::Js),
    ("dart_import", Macro::DartImport),
];

impl Macro {
    pub fn lookup(callee: &str) -> Option<Macro> {
        MACROS
            .iter()
            .find(|(name, _)| *name == callee)
            .map(|(_, m)| *m)
    }

    pub fn name(self) -> &'static str {
        MACROS
            .iter()
            .find(|(_, m)| *m == self)
            .map(|(name, _)| *name)
            .unwrap_or("?")
    }

    fn error(self, reason: impl Into<String>) -> TranslateError {
        TranslateError::MacroArgument {
            name: self.name(),
            reason: reason.into(),
        }
    }

    fn expect_arity(self, args: &[Expr], accepted: &[usize]) -> Result<()> {
        if accepted.contains(&args.len()) {
            return Ok(());
        }
        let expected = accepted
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(" or ");
        Err(self.error(format!(
            "expected {expected} positional arguments, got {}",
            args.len()
        )))
    }

    fn string_arg(self, arg: &Expr) -> Result<&str> {
        match arg {
            Expr::Str { s } => Ok(s),
            other => Err(self.error(format!("expected a string literal, got {}", other.kind()))),
        }
    }
}

impl Translator {
    pub(crate) fn render_call(
        &mut self,
        func: &Expr,
        args: &[Expr],
        keywords: &[Keyword],
    ) -> Result<String> {
        let callee = self.render_expr(func)?;

        if let Some(m) = Macro::lookup(&callee) {
            if m != Macro::JsObject && !keywords.is_empty() {
                return Err(m.error("keyword arguments are not accepted"));
            }
            return self.expand_macro(m, args, keywords);
        }

        if let Some(keyword) = keywords.first() {
            return Err(TranslateError::unsupported(
                "Call",
                format!("keyword argument `{}` in call to `{callee}`", keyword.arg),
            ));
        }

        let rendered = self.render_list(args)?;
        let args: Vec<_> = rendered.into_iter().filter(|a| !a.is_empty()).collect();
        Ok(format!("{callee}({})", args.join(", ")))
    }

    fn expand_macro(&mut self, m: Macro, args: &[Expr], keywords: &[Keyword]) -> Result<String> {
        match m {
            Macro::Instanceof => {
                m.expect_arity(args, &[2])?;
                let value = self.render_expr(&args[0])?;
                let class = self.render_expr(&args[1])?;
                Ok(format!("{value} instanceof {class}"))
            }

            Macro::New => {
                m.expect_arity(args, &[1])?;
                Ok(format!(" new {}", self.render_expr(&args[0])?))
            }

            Macro::JsObject => {
                if !args.is_empty() {
                    return Err(m.error("only keyword arguments are accepted"));
                }
                if keywords.is_empty() {
                    return Ok("Object()".into());
                }
                let mut fields = Vec::with_capacity(keywords.len());
                for keyword in keywords {
                    fields.push(format!(
                        "\"{}\": {}",
                        keyword.arg,
                        self.render_expr(&keyword.value)?
                    ));
                }
                Ok(format!("{{{}}}", fields.join(", ")))
            }

            Macro::Var => self.declare(args),

            Macro::JsArray => {
                if args.is_empty() {
                    return Ok("[]".into());
                }
                Ok(format!("__create_array__({})", self.render_list(args)?.join(", ")))
            }

            Macro::Js => {
                m.expect_arity(args, &[1])?;
                Ok(inline_js(m.string_arg(&args[0])?))
            }

            Macro::DartImport => {
                m.expect_arity(args, &[1, 2])?;
                let path = m.string_arg(&args[0])?;
                match args.get(1) {
                    Some(alias) => Ok(format!(
                        "import \"{path}\" as {};",
                        m.string_arg(alias)?
                    )),
                    None => Ok(format!("import \"{path}\";")),
                }
            }
        }
    }

    /// `var(a, b)`: declare the names not yet declared in the enclosing function.
    fn declare(&mut self, args: &[Expr]) -> Result<String> {
        let mut names = Vec::with_capacity(args.len());
        for arg in args {
            match arg {
                Expr::Name { id } => names.push(id.as_str()),
                other => {
                    let place = match self.current_function() {
                        Some(f) => format!(" in function `{}`", f.name),
                        None => String::new(),
                    };
                    return Err(Macro::Var.error(format!(
                        "expected names, got {}{place}",
                        other.kind()
                    )));
                }
            }
        }

        if let Some(function) = self.current_function() {
            names.retain(|name| function.locals.insert(name.to_string()));
        }

        if names.is_empty() {
            Ok(String::new())
        } else {
            Ok(format!("var {}", names.join(", ")))
        }
    }
}

/// Body of a `JS("...")` call.
///
/// Text starting with `#` becomes a block comment. When the text holds no
/// quotes, the Python keywords `or`, `not` and `and` are swapped for their
/// operators, comments included.
fn inline_js(text: &str) -> String {
    let mut s = text.replace('\n', "\\n").replace('\0', "\\0");

    if s.trim().starts_with('#') {
        s = format!("/*{s}*/");
    }
    if s.contains(['"', '\'']) {
        return s;
    }
    s.replace(" or ", " || ")
        .replace(" not ", " ! ")
        .replace(" and ", " && ")
}
