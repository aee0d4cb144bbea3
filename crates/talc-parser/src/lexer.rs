//! The Talc lexer.

use crate::SyntaxError;
use talc_common::Span;
use talc_diagnostic::ErrorCode;
use talc_syntax::Grammar;

/// A token with its kind and span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// The kind of a token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Numeric literal, kept as raw text; the parser runs it through the
    /// grammar's payload type.
    Number(String),
    /// Identifier: a function name, a variable, or a sequence-variable
    /// name with its leading `[`.
    Ident(String),
    /// An operator glyph from the grammar (`+`, `%%`, ...).
    Symbol(String),
    LParen,
    RParen,
    Comma,
    Eof,
}

/// The Talc lexer.
///
/// Operator glyphs are not hardcoded: runs of symbol characters are
/// matched longest-first against the grammar's symbolic operator names, so
/// `%%` lexes as one token while `--` stays two prefix minuses.
pub struct Lexer<'s, 'g> {
    src: &'s str,
    pos: usize,
    grammar: &'g Grammar,
}

impl<'s, 'g> Lexer<'s, 'g> {
    pub fn new(src: &'s str, grammar: &'g Grammar) -> Self {
        Self {
            src,
            pos: 0,
            grammar,
        }
    }

    /// Tokenize the entire source. Stops at the first bad character.
    pub fn tokenize(mut self) -> Result<Vec<Token>, SyntaxError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }

    fn peek_char(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn char_at(&self, pos: usize) -> Option<char> {
        self.src[pos..].chars().next()
    }

    fn bump(&mut self, c: char) {
        self.pos += c.len_utf8();
    }

    fn next_token(&mut self) -> Result<Token, SyntaxError> {
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.bump(c);
            } else {
                break;
            }
        }

        let start = self.pos;
        let Some(c) = self.peek_char() else {
            return Ok(Token::new(TokenKind::Eof, Span::from_usize(start, start)));
        };

        match c {
            '(' => {
                self.bump(c);
                Ok(Token::new(TokenKind::LParen, Span::from_usize(start, self.pos)))
            }
            ')' => {
                self.bump(c);
                Ok(Token::new(TokenKind::RParen, Span::from_usize(start, self.pos)))
            }
            ',' => {
                self.bump(c);
                Ok(Token::new(TokenKind::Comma, Span::from_usize(start, self.pos)))
            }
            c if c.is_ascii_digit() => Ok(self.lex_number(start)),
            '[' => {
                // `[` only introduces a sequence-variable name like `[xs`
                match self.char_at(start + 1) {
                    Some(n) if n.is_alphabetic() || n == '_' => {
                        self.bump('[');
                        Ok(self.lex_ident(start))
                    }
                    _ => Err(self.unexpected(start, c)),
                }
            }
            c if c.is_alphabetic() || c == '_' => Ok(self.lex_ident(start)),
            _ => self.lex_symbol(start, c),
        }
    }

    fn lex_ident(&mut self, start: usize) -> Token {
        while let Some(c) = self.peek_char() {
            if c.is_alphanumeric() || c == '_' {
                self.bump(c);
            } else {
                break;
            }
        }
        let text = self.src[start..self.pos].to_string();
        Token::new(TokenKind::Ident(text), Span::from_usize(start, self.pos))
    }

    fn eat_digits(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_ascii_digit() {
                self.bump(c);
            } else {
                break;
            }
        }
    }

    fn lex_number(&mut self, start: usize) -> Token {
        self.eat_digits();

        // Fraction only when a digit follows the dot, so `5.x` lexes as
        // `5` `.`-error rather than a malformed number.
        if self.peek_char() == Some('.')
            && self.char_at(self.pos + 1).is_some_and(|c| c.is_ascii_digit())
        {
            self.bump('.');
            self.eat_digits();
        }

        // Exponent only when digits follow; `2e` stays `2` then ident `e`.
        if matches!(self.peek_char(), Some('e' | 'E')) {
            let mark = self.pos;
            self.bump('e');
            if matches!(self.peek_char(), Some('+' | '-')) {
                self.bump('+');
            }
            if self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
                self.eat_digits();
            } else {
                self.pos = mark;
            }
        }

        let text = self.src[start..self.pos].to_string();
        Token::new(TokenKind::Number(text), Span::from_usize(start, self.pos))
    }

    fn lex_symbol(&mut self, start: usize, c: char) -> Result<Token, SyntaxError> {
        let rest = &self.src[start..];
        let mut best: Option<&str> = None;
        for (_, op) in self.grammar.iter() {
            if op.is_symbolic() && rest.starts_with(op.name())
                && best.is_none_or(|b| op.name().len() > b.len())
            {
                best = Some(op.name());
            }
        }
        match best {
            Some(name) => {
                let text = name.to_string();
                self.pos += text.len();
                Ok(Token::new(
                    TokenKind::Symbol(text),
                    Span::from_usize(start, self.pos),
                ))
            }
            None => Err(self.unexpected(start, c)),
        }
    }

    fn unexpected(&self, start: usize, c: char) -> SyntaxError {
        SyntaxError::new(
            Span::from_usize(start, start + c.len_utf8()),
            ErrorCode::UnexpectedCharacter,
            format!("unexpected character `{c}`"),
        )
    }
}
