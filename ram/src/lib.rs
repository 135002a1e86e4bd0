//! nuPython RAM
//!
//! Fixed-identity variable store for the nuPython interpreter: variables
//! are assigned permanent memory cells and resolved through a sorted name
//! map. A small assignment-script front-end drives it from the command line.

pub mod ast;
pub mod error;
pub mod interp;
pub mod lexer;
pub mod memory;
pub mod parser;
pub mod repl;

pub use error::{RamError, Result, ScriptError};
pub use memory::{Ram, Value};
