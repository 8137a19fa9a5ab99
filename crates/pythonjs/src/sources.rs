//! Gathering inputs and turning them into module trees.

use anyhow::{Context, bail};
use pythonjs_codegen::{TranslateOptions, Translator, Writer};
use pythonjs_syntax::registry::{reader_for_extension, reader_for_language};
use pythonjs_syntax::{Module, Reader};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

/// One source text and the reader that parses it.
pub struct Input {
    /// File path, or `<stdin>`.
    pub origin: String,
    pub text: String,
    pub reader: &'static dyn Reader,
}

impl Input {
    /// Read a file, picking the reader from its extension and falling back
    /// to `language` for unknown extensions.
    pub fn from_path(path: &Path, language: &str) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;

        let by_extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(reader_for_extension);
        let reader = match by_extension {
            Some(reader) => reader,
            None => lookup_language(language)?,
        };

        Ok(Self::from_text(path.display().to_string(), text, reader))
    }

    pub fn from_stdin(language: &str) -> anyhow::Result<Self> {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading stdin")?;
        Ok(Self::from_text("<stdin>".into(), text, lookup_language(language)?))
    }

    pub fn from_text(origin: String, text: String, reader: &'static dyn Reader) -> Self {
        tracing::debug!(
            origin = %origin,
            reader = reader.language(),
            bytes = text.len(),
            "read input"
        );
        Self {
            origin,
            text,
            reader,
        }
    }
}

/// Find a reader by language name.
pub fn lookup_language(language: &str) -> anyhow::Result<&'static dyn Reader> {
    match reader_for_language(language) {
        Some(reader) => Ok(reader),
        None => bail!("no reader for language `{language}`"),
    }
}

/// Parse inputs into modules.
///
/// Runs of consecutive Python sources are joined with a newline and parsed as
/// one program, so functions defined in one script are globals in the next.
/// Every other input becomes a module of its own.
pub fn parse_inputs(inputs: &[Input]) -> anyhow::Result<Vec<Module>> {
    let mut modules = Vec::new();
    let mut i = 0;

    while i < inputs.len() {
        let reader = inputs[i].reader;
        let run = if reader.language() == "python" {
            inputs[i..]
                .iter()
                .take_while(|input| input.reader.language() == "python")
                .count()
        } else {
            1
        };
        let group = &inputs[i..i + run];

        let text = group
            .iter()
            .map(|input| input.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let origins = group
            .iter()
            .map(|input| input.origin.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        let module = reader
            .read(&text)
            .with_context(|| format!("parsing {origins}"))?;
        tracing::info!(origin = %origins, statements = module.body.len(), "parsed");
        modules.push(module);

        i += run;
    }

    Ok(modules)
}

/// Emit every module through `writer`, joined by newlines.
pub fn write_modules(modules: &[Module], writer: &dyn Writer) -> anyhow::Result<String> {
    let texts = modules
        .iter()
        .map(|module| writer.write(module))
        .collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(language = writer.language(), modules = texts.len(), "written");
    Ok(texts.join("\n"))
}

/// Top-level functions across all modules; later definitions win.
pub fn collect_functions(
    modules: &[Module],
    options: TranslateOptions,
) -> anyhow::Result<BTreeMap<String, String>> {
    let mut translator = Translator::with_options(options);
    let mut functions = BTreeMap::new();

    for module in modules {
        translator.translate(module)?;
        functions.extend(
            translator
                .functions()
                .iter()
                .map(|(name, text)| (name.clone(), text.clone())),
        );
    }

    Ok(functions)
}

#[cfg(all(test, feature = "read-python"))]
mod tests {
    use super::*;
    use pythonjs_codegen::{JAVASCRIPT_WRITER, JavaScriptWriter};
    use pythonjs_syntax::input::{JSON_READER, PYTHON_READER};

    fn python(origin: &str, text: &str) -> Input {
        Input::from_text(origin.into(), text.into(), &PYTHON_READER)
    }

    #[test]
    fn python_inputs_are_concatenated() {
        let inputs = [python("a.py", "x = 1"), python("b.py", "y = 2")];
        let modules = parse_inputs(&inputs).unwrap();
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].body.len(), 2);
    }

    #[test]
    fn json_inputs_stay_separate() {
        let tree = r#"{"body": [{"kind": "Pass"}]}"#;
        let inputs = [
            python("a.py", "x = 1"),
            Input::from_text("t.json".into(), tree.into(), &JSON_READER),
            Input::from_text("u.json".into(), tree.into(), &JSON_READER),
        ];
        let modules = parse_inputs(&inputs).unwrap();
        assert_eq!(modules.len(), 3);

        let text = write_modules(&modules, &JAVASCRIPT_WRITER).unwrap();
        assert_eq!(text, "x = 1;\n/*pass*/\n/*pass*/");
    }

    #[test]
    fn parse_errors_name_the_input() {
        let inputs = [python("bad.py", "class A:\n    pass\n")];
        let err = parse_inputs(&inputs).unwrap_err();
        assert!(format!("{err:#}").starts_with("parsing bad.py: unsupported syntax"));
    }

    #[test]
    fn functions_collected_across_modules() {
        let inputs = [
            python("a.py", "def f():\n    pass\n"),
            Input::from_text(
                "g.json".into(),
                r#"{"body": [{"kind": "FunctionDef", "name": "g", "body": [{"kind": "Break"}]}]}"#
                    .into(),
                &JSON_READER,
            ),
        ];
        let modules = parse_inputs(&inputs).unwrap();
        let functions = collect_functions(&modules, TranslateOptions::default()).unwrap();
        assert_eq!(functions.keys().collect::<Vec<_>>(), vec!["f", "g"]);
    }

    #[test]
    fn writer_options_apply_to_every_module() {
        let inputs = [python("a.py", "while x:\n    break\n")];
        let modules = parse_inputs(&inputs).unwrap();
        let writer = JavaScriptWriter::new(TranslateOptions { indent_width: 4 });
        let text = write_modules(&modules, &writer).unwrap();
        assert_eq!(text, "while (x) {\n    break;\n}");
    }

    #[test]
    fn unknown_language() {
        assert!(lookup_language("cobol").is_err());
    }
}
