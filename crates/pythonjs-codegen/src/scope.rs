//! Per-pass translation state and the guards that scope it.
//!
//! Nested constructs take a [`Scope`] guard instead of adjusting the state by
//! hand. The guard derefs to the [`Translator`] and puts indentation, the
//! function stack and the handler depth back when it drops, so an error that
//! unwinds through `?` leaves the translator where the caller had it.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::ops::{Deref, DerefMut};

/// Output formatting options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslateOptions {
    /// Spaces per indentation level.
    pub indent_width: usize,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self { indent_width: 2 }
    }
}

/// An open function definition.
#[derive(Debug, Default)]
pub(crate) struct FunctionContext {
    pub name: String,
    /// Names already declared with `var(...)` in this function.
    pub locals: HashSet<String>,
}

/// Translates one module tree into JavaScript.
///
/// Per-pass state is reset at the start of every [`Translator::translate`]
/// call. The registry of top-level functions from the last pass stays
/// readable through [`Translator::functions`].
#[derive(Debug, Default)]
pub struct Translator {
    pub(crate) options: TranslateOptions,
    pub(crate) indent: usize,
    pub(crate) functions: Vec<FunctionContext>,
    /// Number of enclosing `except` handlers; a bare `raise` needs one.
    pub(crate) handler_depth: usize,
    pub(crate) iter_id: usize,
    pub(crate) registry: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy)]
struct Saved {
    indent: usize,
    functions: usize,
    handler_depth: usize,
}

impl Translator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: TranslateOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> TranslateOptions {
        self.options
    }

    /// Generated text of every top-level function, by name.
    pub fn functions(&self) -> &BTreeMap<String, String> {
        &self.registry
    }

    pub(crate) fn reset(&mut self) {
        self.indent = 0;
        self.functions.clear();
        self.handler_depth = 0;
        self.iter_id = 0;
        self.registry.clear();
    }

    /// Leading whitespace for the current depth.
    pub(crate) fn indent_str(&self) -> String {
        " ".repeat(self.indent * self.options.indent_width)
    }

    /// Mint the next `__iterN`/`__idxN` suffix.
    pub(crate) fn next_iter_id(&mut self) -> usize {
        self.iter_id += 1;
        self.iter_id
    }

    pub(crate) fn current_function(&mut self) -> Option<&mut FunctionContext> {
        self.functions.last_mut()
    }

    fn save(&self) -> Saved {
        Saved {
            indent: self.indent,
            functions: self.functions.len(),
            handler_depth: self.handler_depth,
        }
    }

    fn restore(&mut self, saved: Saved) {
        self.indent = saved.indent;
        self.functions.truncate(saved.functions);
        self.handler_depth = saved.handler_depth;
    }

    /// One level deeper.
    pub(crate) fn nested(&mut self) -> Scope<'_> {
        let saved = self.save();
        self.indent += 1;
        Scope {
            translator: self,
            saved,
        }
    }

    /// Open a function body: push its context and indent one level.
    pub(crate) fn enter_function(&mut self, name: &str) -> Scope<'_> {
        let saved = self.save();
        self.functions.push(FunctionContext {
            name: name.to_string(),
            locals: HashSet::new(),
        });
        self.indent += 1;
        Scope {
            translator: self,
            saved,
        }
    }

    /// Open an `except` handler body, `levels` deeper than the current depth.
    pub(crate) fn enter_handler(&mut self, levels: usize) -> Scope<'_> {
        let saved = self.save();
        self.handler_depth += 1;
        self.indent += levels;
        Scope {
            translator: self,
            saved,
        }
    }
}

/// Restores the translator state captured when it was created.
pub(crate) struct Scope<'t> {
    translator: &'t mut Translator,
    saved: Saved,
}

impl Deref for Scope<'_> {
    type Target = Translator;

    fn deref(&self) -> &Translator {
        self.translator
    }
}

impl DerefMut for Scope<'_> {
    fn deref_mut(&mut self) -> &mut Translator {
        self.translator
    }
}

impl Drop for Scope<'_> {
    fn drop(&mut self) {
        self.translator.restore(self.saved);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guards_restore_on_drop() {
        let mut tr = Translator::new();
        {
            let mut f = tr.enter_function("outer");
            assert_eq!(f.indent, 1);
            let mut inner = f.nested();
            let handler = inner.enter_handler(1);
            assert_eq!(handler.indent, 3);
            assert_eq!(handler.handler_depth, 1);
            assert_eq!(handler.functions.len(), 1);
        }
        assert_eq!(tr.indent, 0);
        assert!(tr.functions.is_empty());
        assert_eq!(tr.handler_depth, 0);
    }

    #[test]
    fn indent_width_is_configurable() {
        let mut tr = Translator::with_options(TranslateOptions { indent_width: 4 });
        let scope = tr.nested();
        assert_eq!(scope.indent_str(), "    ");
    }

    #[test]
    fn current_function_is_innermost() {
        let mut tr = Translator::new();
        let mut outer = tr.enter_function("outer");
        let mut inner = outer.enter_function("inner");
        let ctx = inner.current_function().map(|f| f.name.clone());
        assert_eq!(ctx.as_deref(), Some("inner"));
    }

    #[test]
    fn options_fill_missing_fields() {
        let opts: TranslateOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts, TranslateOptions::default());
        let opts: TranslateOptions = serde_json::from_str(r#"{"indent_width": 3}"#).unwrap();
        assert_eq!(opts.indent_width, 3);
    }
}
