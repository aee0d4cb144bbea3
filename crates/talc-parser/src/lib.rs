//! The Talc expression parser.
//!
//! Turns text into expression trees against a grammar's operator table:
//! `parse(text, &grammar)` is the single entry point. Both user input and
//! rule-definition text go through it.

mod lexer;
mod parser;

pub use lexer::{Lexer, Token, TokenKind};
pub use parser::parse;

use talc_common::Span;
use talc_diagnostic::{Diagnostic, DiagnosticKind, ErrorCode, Label};
use thiserror::Error;

/// A parse failure with its source location.
///
/// Parse errors on user input are recoverable: the caller reports them and
/// retries or drops that one input. Malformed *rule* text is a
/// configuration defect and is escalated by the engine instead.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct SyntaxError {
    pub span: Span,
    pub code: ErrorCode,
    pub message: String,
}

impl SyntaxError {
    pub fn new(span: Span, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            span,
            code,
            message: message.into(),
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(DiagnosticKind::Parser, self.span, self.message.clone())
            .with_code(self.code)
            .with_label(Label::new(self.span, "here"))
    }
}
