//! Python to JavaScript code generation.
//!
//! Walks a [`pythonjs_syntax::Module`] once, top to bottom, and returns
//! JavaScript source text. The translation is syntax directed: names map
//! through, operators map onto their JavaScript tokens, and the constructs
//! JavaScript lacks are lowered:
//!
//! - `for x in xs` becomes an index loop over an array (object keys for
//!   anything else);
//! - `try`/`except` becomes one `catch` whose body branches on the caught
//!   value;
//! - calls to a few reserved names (`var`, `JS`, `JSObject`, `new`, ...) are
//!   rewritten into JavaScript forms, see [`macros`].
//!
//! # Example
//!
//! ```
//! use pythonjs_syntax::{Expr, Module, Operator, Stmt};
//!
//! let module = Module::new(vec![Stmt::assign(
//!     Expr::name("x"),
//!     Expr::binop(Expr::int(1), Operator::Add, Expr::int(2)),
//! )]);
//! assert_eq!(pythonjs_codegen::translate(&module).unwrap(), "x = (1 + 2);");
//! ```

mod control;
pub mod error;
mod exceptions;
mod expr;
mod function;
pub mod macros;
pub mod ops;
mod scope;
mod translate;
pub mod writer;

pub use error::TranslateError;
pub use macros::Macro;
pub use scope::{TranslateOptions, Translator};
pub use translate::translate;
pub use writer::{JAVASCRIPT_WRITER, JavaScriptWriter, Writer};
