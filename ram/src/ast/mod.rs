//! Syntax of assignment scripts
//!
//! A script is a sequence of lines, each either an assignment or a bare
//! expression:
//!
//! ```text
//! x = 123          # int
//! s = 'apple'      # str
//! p = &x           # ptr to x's cell
//! *p = 4.5         # write through p
//! y = *p           # read through p
//! ```

mod span;

pub use span::{Span, Spanned};

use crate::memory::Value;
use serde::Serialize;

/// A script: one statement per non-empty line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    pub statements: Vec<Spanned<Stmt>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Stmt {
    /// `name = expr`
    Assign {
        name: Spanned<String>,
        value: Spanned<Expr>,
    },
    /// `*name = expr`
    AssignThrough {
        pointer: Spanned<String>,
        value: Spanned<Expr>,
    },
    /// A bare expression
    Expr(Spanned<Expr>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    /// A literal value
    Literal(Value),
    /// Current value of a variable
    Var(String),
    /// `&name`: address of a variable
    AddrOf(String),
    /// `*name`: value the pointer variable refers to
    Deref(String),
}
