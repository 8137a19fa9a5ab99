//! Library side of the `pythonjs` command: configuration and input handling.

pub mod config;
pub mod sources;

pub use config::PythonjsConfig;
pub use sources::{Input, collect_functions, parse_inputs, write_modules};
