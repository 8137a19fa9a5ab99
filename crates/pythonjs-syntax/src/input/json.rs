//! Reader for syntax trees serialized by an external parser.
//!
//! The expected encoding is the serde form of [`Module`]: objects tagged with
//! a `"kind"` field, see [`crate::tree`].

use crate::traits::{ReadError, Reader};
use crate::tree::Module;

/// Static instance of the JSON reader for registry.
pub static JSON_READER: JsonReader = JsonReader;

/// Reads a JSON-encoded module tree.
pub struct JsonReader;

impl Reader for JsonReader {
    fn language(&self) -> &'static str {
        "json"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["json"]
    }

    fn read(&self, source: &str) -> Result<Module, ReadError> {
        read_json(source)
    }
}

/// Decode a JSON-encoded module tree.
pub fn read_json(source: &str) -> Result<Module, ReadError> {
    Ok(serde_json::from_str(source)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Expr, Stmt};

    #[test]
    fn reads_module() {
        let module = read_json(
            r#"{"body": [{"kind": "Expr", "value": {"kind": "Name", "id": "x"}}]}"#,
        )
        .unwrap();
        assert_eq!(module.body, vec![Stmt::expr(Expr::name("x"))]);
    }

    #[test]
    fn unknown_kind_is_an_error() {
        let err = read_json(r#"{"body": [{"kind": "ClassDef"}]}"#).unwrap_err();
        assert!(matches!(err, ReadError::Json(_)));
        assert!(err.to_string().starts_with("invalid syntax tree"));
    }
}
