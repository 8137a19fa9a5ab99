//! Python syntax tree for the pythonjs translator.
//!
//! The translator works on a closed tree of Python statements and
//! expressions ([`tree`]). Trees come from a [`Reader`]:
//!
//! ```text
//! Source                Tree                 Output
//! ──────────────     ──────────────     ──────────────────
//! Python (.py)   ─┐                  ┌─> JavaScript
//!                 ├─> Module ────────┤    (pythonjs-codegen)
//! JSON (.json)   ─┘   (tree.rs)      └─> JSON (serde)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use pythonjs_syntax::input;
//!
//! let module = input::read_python("x = 1")?;
//! let json = serde_json::to_string(&module)?;
//! let back = input::read_json(&json)?;
//! ```
//!
//! The JSON form tags every node with its kind (`{"kind": "Name", "id": "x"}`)
//! so trees dumped by an external Python `ast` walker can be fed in directly.

pub mod input;
pub mod registry;
pub mod traits;
pub mod tree;

// Re-exports: tree types
pub use tree::{
    Alias, BoolOperator, CmpOp, ExceptHandler, Expr, FunctionDef, Keyword, Module, Number,
    Operator, Slice, Stmt, UnaryOperator,
};

// Re-exports: traits
pub use traits::{ReadError, Reader};
