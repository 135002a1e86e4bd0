//! Error types and reporting

use crate::ast::Span;
use thiserror::Error;

/// Result type alias for memory operations
pub type Result<T> = std::result::Result<T, RamError>;

/// Memory error
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RamError {
    #[error("variable not found: {name:?}")]
    NotFound { name: String },

    #[error("no variable stored at address {address}")]
    UnknownAddress { address: i64 },

    #[error("address {address} is outside memory capacity {capacity}")]
    InvalidAddress { address: i64, capacity: usize },
}

/// Error raised while lexing, parsing or running an assignment script
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Lexer error at {span:?}: {message}")]
    Lexer { message: String, span: Span },

    #[error("Parser error at {span:?}: {message}")]
    Parser { message: String, span: Span },

    #[error("Type error at {span:?}: {message}")]
    Type { message: String, span: Span },

    #[error("Memory error at {span:?}: {error}")]
    Memory {
        #[source]
        error: RamError,
        span: Span,
    },

    #[error("IO error: {message}")]
    Io { message: String },
}

impl ScriptError {
    pub fn lexer(message: impl Into<String>, span: Span) -> Self {
        Self::Lexer {
            message: message.into(),
            span,
        }
    }

    pub fn parser(message: impl Into<String>, span: Span) -> Self {
        Self::Parser {
            message: message.into(),
            span,
        }
    }

    pub fn type_error(message: impl Into<String>, span: Span) -> Self {
        Self::Type {
            message: message.into(),
            span,
        }
    }

    pub fn memory(error: RamError, span: Span) -> Self {
        Self::Memory { error, span }
    }

    pub fn io_error(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            Self::Lexer { span, .. }
            | Self::Parser { span, .. }
            | Self::Type { span, .. }
            | Self::Memory { span, .. } => Some(*span),
            Self::Io { .. } => None,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Lexer { message, .. }
            | Self::Parser { message, .. }
            | Self::Type { message, .. }
            | Self::Io { message } => message.clone(),
            Self::Memory { error, .. } => error.to_string(),
        }
    }
}

impl From<std::io::Error> for ScriptError {
    fn from(err: std::io::Error) -> Self {
        Self::io_error(err.to_string())
    }
}

/// Report error with ariadne
pub fn report_error(filename: &str, source: &str, error: &ScriptError) -> std::io::Result<()> {
    use ariadne::{Color, Label, Report, ReportKind, Source};

    let kind = match error {
        ScriptError::Lexer { .. } => "Lexer",
        ScriptError::Parser { .. } => "Parser",
        ScriptError::Type { .. } => "Type",
        ScriptError::Memory { .. } => "Memory",
        ScriptError::Io { .. } => "IO",
    };

    if let Some(span) = error.span() {
        Report::build(ReportKind::Error, (filename, span.start..span.end))
            .with_message(format!("{kind} error"))
            .with_label(
                Label::new((filename, span.start..span.end))
                    .with_message(error.message())
                    .with_color(Color::Red),
            )
            .finish()
            .eprint((filename, Source::from(source)))
    } else {
        Report::build(ReportKind::Error, (filename, 0..0))
            .with_message(format!("{kind} error: {}", error.message()))
            .finish()
            .eprint((filename, Source::from(source)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ram_error_display() {
        let err = RamError::NotFound {
            name: "x".to_string(),
        };
        assert_eq!(err.to_string(), "variable not found: \"x\"");

        let err = RamError::InvalidAddress {
            address: 9,
            capacity: 8,
        };
        assert_eq!(err.to_string(), "address 9 is outside memory capacity 8");

        let err = RamError::UnknownAddress { address: -1 };
        assert_eq!(err.to_string(), "no variable stored at address -1");
    }

    #[test]
    fn test_script_error_span() {
        let err = ScriptError::parser("expected '='", Span::new(2, 3));
        assert_eq!(err.span(), Some(Span::new(2, 3)));
        assert_eq!(err.message(), "expected '='");

        let err = ScriptError::io_error("missing file");
        assert_eq!(err.span(), None);
    }

    #[test]
    fn test_memory_error_keeps_source() {
        use std::error::Error;

        let err = ScriptError::memory(
            RamError::NotFound {
                name: "y".to_string(),
            },
            Span::new(0, 1),
        );
        assert!(err.source().is_some());
        assert_eq!(err.message(), "variable not found: \"y\"");
        assert!(err.to_string().starts_with("Memory error at"));
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ScriptError = io.into();
        assert!(matches!(err, ScriptError::Io { .. }));
    }
}
