//! The `Writer` interface over the translator.

use crate::error::TranslateError;
use crate::scope::{TranslateOptions, Translator};
use pythonjs_syntax::Module;

/// Static instance of the JavaScript writer with default options.
pub static JAVASCRIPT_WRITER: JavaScriptWriter = JavaScriptWriter {
    options: TranslateOptions { indent_width: 2 },
};

/// Something that turns a module tree into target source text.
pub trait Writer: Send + Sync {
    /// Target language identifier (e.g., "javascript").
    fn language(&self) -> &'static str;

    /// File extension for output (e.g., "js").
    fn extension(&self) -> &'static str;

    /// Emit the module as source code.
    fn write(&self, module: &Module) -> Result<String, TranslateError>;
}

/// JavaScript writer implementing the Writer trait.
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaScriptWriter {
    options: TranslateOptions,
}

impl JavaScriptWriter {
    pub fn new(options: TranslateOptions) -> Self {
        Self { options }
    }
}

impl Writer for JavaScriptWriter {
    fn language(&self) -> &'static str {
        "javascript"
    }

    fn extension(&self) -> &'static str {
        "js"
    }

    fn write(&self, module: &Module) -> Result<String, TranslateError> {
        Translator::with_options(self.options).translate(module)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pythonjs_syntax::{Expr, Stmt};

    #[test]
    fn writes_with_its_options() {
        let module = Module::new(vec![Stmt::while_loop(
            Expr::name("x"),
            vec![Stmt::Break],
        )]);
        let wide = JavaScriptWriter::new(TranslateOptions { indent_width: 4 });
        assert_eq!(wide.write(&module).unwrap(), "while (x) {\n    break;\n}");
        assert_eq!(
            JAVASCRIPT_WRITER.write(&module).unwrap(),
            "while (x) {\n  break;\n}"
        );
        assert_eq!(JAVASCRIPT_WRITER.extension(), "js");
    }
}
