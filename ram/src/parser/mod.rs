//! Recursive-descent parser for assignment scripts

use crate::ast::{Expr, Program, Span, Spanned, Stmt};
use crate::error::ScriptError;
use crate::lexer::Token;
use crate::memory::Value;

type Result<T> = std::result::Result<T, ScriptError>;

/// Parse tokens into a program
pub fn parse(source: &str, tokens: Vec<(Token, Span)>) -> Result<Program> {
    Parser::new(source, tokens).program()
}

struct Parser {
    tokens: Vec<(Token, Span)>,
    pos: usize,
    eof: Span,
}

impl Parser {
    fn new(source: &str, tokens: Vec<(Token, Span)>) -> Self {
        Parser {
            tokens,
            pos: 0,
            eof: Span::new(source.len(), source.len()),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(t, _)| t)
    }

    fn peek_at(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset).map(|(t, _)| t)
    }

    fn span(&self) -> Span {
        self.tokens.get(self.pos).map(|(_, s)| *s).unwrap_or(self.eof)
    }

    fn bump(&mut self) -> Option<(Token, Span)> {
        let next = self.tokens.get(self.pos).cloned();
        if next.is_some() {
            self.pos += 1;
        }
        next
    }

    fn at_line_end(&self) -> bool {
        matches!(self.peek(), None | Some(Token::Newline))
    }

    fn program(mut self) -> Result<Program> {
        let mut statements = Vec::new();
        loop {
            while self.peek() == Some(&Token::Newline) {
                self.pos += 1;
            }
            if self.peek().is_none() {
                break;
            }
            statements.push(self.statement()?);
            if !self.at_line_end() {
                return Err(ScriptError::parser(
                    format!("expected end of line, found {}", self.tokens[self.pos].0),
                    self.span(),
                ));
            }
        }
        Ok(Program { statements })
    }

    fn statement(&mut self) -> Result<Spanned<Stmt>> {
        match (self.peek(), self.peek_at(1), self.peek_at(2)) {
            (Some(Token::Ident(_)), Some(Token::Eq), _) => {
                let name = self.ident()?;
                self.pos += 1;
                let value = self.expr()?;
                let span = name.span.merge(value.span);
                Ok(Spanned::new(Stmt::Assign { name, value }, span))
            }
            (Some(Token::Star), Some(Token::Ident(_)), Some(Token::Eq)) => {
                let star = self.span();
                self.pos += 1;
                let pointer = self.ident()?;
                self.pos += 1;
                let value = self.expr()?;
                let span = star.merge(value.span);
                Ok(Spanned::new(Stmt::AssignThrough { pointer, value }, span))
            }
            _ => {
                let expr = self.expr()?;
                let span = expr.span;
                Ok(Spanned::new(Stmt::Expr(expr), span))
            }
        }
    }

    fn ident(&mut self) -> Result<Spanned<String>> {
        match self.bump() {
            Some((Token::Ident(name), span)) => Ok(Spanned::new(name, span)),
            Some((token, span)) => Err(ScriptError::parser(
                format!("expected variable name, found {token}"),
                span,
            )),
            None => Err(ScriptError::parser(
                "expected variable name, found end of input",
                self.eof,
            )),
        }
    }

    fn expr(&mut self) -> Result<Spanned<Expr>> {
        let span = self.span();
        let Some((token, span)) = self.bump() else {
            return Err(ScriptError::parser(
                "expected expression, found end of input",
                span,
            ));
        };
        let literal = |value| Ok(Spanned::new(Expr::Literal(value), span));
        match token {
            Token::IntLit(n) => literal(Value::Int(n)),
            Token::RealLit(x) => literal(Value::Real(x)),
            Token::StrLit(s) => literal(Value::Str(s)),
            Token::True => literal(Value::Boolean(1)),
            Token::False => literal(Value::Boolean(0)),
            Token::NoneLit => literal(Value::None),
            Token::Ident(name) => Ok(Spanned::new(Expr::Var(name), span)),
            Token::Amp => {
                let name = self.ident()?;
                Ok(Spanned::new(Expr::AddrOf(name.node), span.merge(name.span)))
            }
            Token::Star => {
                let name = self.ident()?;
                Ok(Spanned::new(Expr::Deref(name.node), span.merge(name.span)))
            }
            Token::Eq | Token::Newline => Err(ScriptError::parser(
                format!("expected expression, found {token}"),
                span,
            )),
        }
    }
}
