//! Interpreter for assignment scripts
//!
//! Every assignment goes through the memory unit's write-by-name entry
//! point, and every variable reference is a read-by-name copy.

use crate::ast::{Expr, Program, Span, Spanned, Stmt};
use crate::error::{RamError, ScriptError};
use crate::lexer::tokenize;
use crate::memory::{Ram, Value};
use crate::parser::parse;
use std::path::Path;

type Result<T> = std::result::Result<T, ScriptError>;

/// Read a script file; failures surface as [`ScriptError::Io`]
pub fn read_source(path: &Path) -> Result<String> {
    Ok(std::fs::read_to_string(path)?)
}

/// Executes statements against a single memory unit
#[derive(Debug, Default)]
pub struct Interpreter {
    memory: Ram,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interpreter whose memory starts with `capacity` cells
    pub fn with_capacity(capacity: usize) -> Self {
        Interpreter {
            memory: Ram::with_capacity(capacity),
        }
    }

    pub fn memory(&self) -> &Ram {
        &self.memory
    }

    pub fn into_memory(self) -> Ram {
        self.memory
    }

    /// Tokenize, parse and run `source`
    pub fn exec_source(&mut self, source: &str) -> Result<Option<Value>> {
        let tokens = tokenize(source)?;
        let program = parse(source, tokens)?;
        self.run(&program)
    }

    /// Run every statement in order.
    ///
    /// Returns the value of the last statement when it is a bare expression.
    #[tracing::instrument(level = "debug", skip_all, fields(statements = program.statements.len()))]
    pub fn run(&mut self, program: &Program) -> Result<Option<Value>> {
        let mut last = None;
        for stmt in &program.statements {
            last = self.exec(stmt)?;
        }
        Ok(last)
    }

    fn exec(&mut self, stmt: &Spanned<Stmt>) -> Result<Option<Value>> {
        match &stmt.node {
            Stmt::Assign { name, value } => {
                let value = self.eval(value)?;
                self.memory.write_cell_by_name(&value, &name.node);
                Ok(None)
            }
            Stmt::AssignThrough { pointer, value } => {
                let ptr = self.pointer(&pointer.node, pointer.span)?;
                let value = self.eval(value)?;
                self.memory
                    .store(&value, ptr)
                    .map_err(|e| ScriptError::memory(e, stmt.span))?;
                Ok(None)
            }
            Stmt::Expr(expr) => self.eval(expr).map(Some),
        }
    }

    fn eval(&self, expr: &Spanned<Expr>) -> Result<Value> {
        match &expr.node {
            Expr::Literal(value) => Ok(value.clone()),
            Expr::Var(name) => self
                .memory
                .lookup(name)
                .map_err(|e| ScriptError::memory(e, expr.span)),
            Expr::AddrOf(name) => {
                let address = self.memory.get_addr(name).ok_or_else(|| {
                    ScriptError::memory(RamError::NotFound { name: name.clone() }, expr.span)
                })?;
                i64::try_from(address).map(Value::Ptr).map_err(|_| {
                    ScriptError::type_error(
                        format!("address {address} of `{name}` does not fit in a ptr"),
                        expr.span,
                    )
                })
            }
            Expr::Deref(name) => {
                let ptr = self.pointer(name, expr.span)?;
                self.memory
                    .load(ptr)
                    .map_err(|e| ScriptError::memory(e, expr.span))
            }
        }
    }

    /// Payload of a variable that must hold a pointer
    fn pointer(&self, name: &str, span: Span) -> Result<i64> {
        let value = self
            .memory
            .lookup(name)
            .map_err(|e| ScriptError::memory(e, span))?;
        value.as_ptr().ok_or_else(|| {
            ScriptError::type_error(
                format!("`{name}` holds a {}, not a ptr", value.type_name()),
                span,
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(source: &str) -> (Interpreter, Result<Option<Value>>) {
        let mut interp = Interpreter::new();
        let result = interp.exec_source(source);
        (interp, result)
    }

    #[test]
    fn test_assignments_land_in_memory() {
        let (interp, result) = run("x = 123\ns = 'apple'\nr = 1.5");
        assert_eq!(result.unwrap(), None);
        let memory = interp.memory();
        assert_eq!(memory.size(), 3);
        assert_eq!(memory.read_cell_by_name("x"), Some(Value::Int(123)));
        assert_eq!(memory.read_cell_by_name("s"), Some(Value::from("apple")));
        assert_eq!(memory.read_cell_by_name("r"), Some(Value::Real(1.5)));
    }

    #[test]
    fn test_bare_expression_value() {
        let (_, result) = run("x = 4\nx");
        assert_eq!(result.unwrap(), Some(Value::Int(4)));
    }

    #[test]
    fn test_copy_between_variables() {
        let (interp, result) = run("a = 'one'\nb = a\na = 'two'");
        result.unwrap();
        assert_eq!(interp.memory().read_cell_by_name("a"), Some(Value::from("two")));
        assert_eq!(interp.memory().read_cell_by_name("b"), Some(Value::from("one")));
    }

    #[test]
    fn test_address_of_and_deref() {
        let (interp, result) = run("z = 1\na = 2\np = &a\nq = *p");
        result.unwrap();
        let memory = interp.memory();
        assert_eq!(memory.read_cell_by_name("p"), Some(Value::Ptr(1)));
        assert_eq!(memory.read_cell_by_name("q"), Some(Value::Int(2)));
    }

    #[test]
    fn test_address_of_after_growth() {
        let (interp, result) = run("e = 1\nd = 2\nc = 3\nb = 4\na = 5\nq = &a\nr = &e");
        result.unwrap();
        let memory = interp.memory();
        assert_eq!(memory.capacity(), 8);
        assert_eq!(memory.read_cell_by_name("q"), Some(Value::Ptr(4)));
        assert_eq!(memory.read_cell_by_name("r"), Some(Value::Ptr(0)));
    }

    #[test]
    fn test_read_source_missing_file() {
        let err = read_source(Path::new("no/such/script.ram")).unwrap_err();
        assert!(matches!(err, ScriptError::Io { .. }));
        assert_eq!(err.span(), None);
    }

    #[test]
    fn test_write_through_pointer() {
        let (interp, result) = run("a = 2\np = &a\n*p = 'via ptr'");
        result.unwrap();
        assert_eq!(
            interp.memory().read_cell_by_name("a"),
            Some(Value::from("via ptr"))
        );
        assert_eq!(interp.memory().size(), 2);
    }

    #[test]
    fn test_undefined_variable() {
        let (_, result) = run("x = y");
        let err = result.unwrap_err();
        assert!(matches!(
            err,
            ScriptError::Memory { error: RamError::NotFound { ref name }, span } if name == "y" && span == Span::new(4, 5)
        ));
    }

    #[test]
    fn test_deref_non_pointer() {
        let (_, result) = run("x = 1\ny = *x");
        assert!(matches!(result.unwrap_err(), ScriptError::Type { .. }));
    }

    #[test]
    fn test_write_through_out_of_capacity() {
        let mut interp = Interpreter::with_capacity(2);
        interp.exec_source("a = 1\nb = 2").unwrap();
        interp
            .exec_source("p = &b")
            .expect("third variable grows memory");
        assert_eq!(interp.memory().capacity(), 4);

        let mut memory = interp.into_memory();
        memory.write_cell_by_name(&Value::Ptr(40), "far");
        let mut interp = Interpreter { memory };
        let err = interp.exec_source("*far = 1").unwrap_err();
        assert!(matches!(
            err,
            ScriptError::Memory {
                error: RamError::InvalidAddress { address: 40, capacity: 4 },
                ..
            }
        ));
    }

    #[test]
    fn test_load_unassigned_cell() {
        let mut memory = Ram::new();
        memory.write_cell_by_name(&Value::Ptr(3), "p");
        let mut interp = Interpreter { memory };
        let err = interp.exec_source("x = *p").unwrap_err();
        assert!(matches!(
            err,
            ScriptError::Memory {
                error: RamError::UnknownAddress { address: 3 },
                ..
            }
        ));
    }

    #[test]
    fn test_failed_statement_stops_run() {
        let mut interp = Interpreter::new();
        assert!(interp.exec_source("a = 1\nb = nope\nc = 3").is_err());
        assert_eq!(interp.memory().size(), 1);
    }
}
