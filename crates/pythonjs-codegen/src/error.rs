//! Translation errors.

/// Error raised while translating a syntax tree.
///
/// Every error is fatal for the whole pass: no partial output is produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslateError {
    /// A node that can be represented in the tree but has no JavaScript form.
    #[error("unsupported {construct}: {detail}")]
    UnsupportedConstruct {
        construct: &'static str,
        detail: String,
    },

    #[error("unsupported operator `{0}`")]
    UnsupportedOperator(&'static str),

    /// A reserved call form was used with the wrong arguments.
    #[error("invalid call to `{name}`: {reason}")]
    MacroArgument { name: &'static str, reason: String },

    #[error("{0} statement produced no output")]
    EmptyStatement(&'static str),
}

impl TranslateError {
    pub(crate) fn unsupported(construct: &'static str, detail: impl Into<String>) -> Self {
        TranslateError::UnsupportedConstruct {
            construct,
            detail: detail.into(),
        }
    }
}

pub type Result<T, E = TranslateError> = std::result::Result<T, E>;
