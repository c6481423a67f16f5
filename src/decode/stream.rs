use crate::decode::lexer::{Lexer, Token};
use crate::error::JsonOutcome;

/// Single-lookahead cursor over the token sequence.
///
/// The underlying lexer is only advanced on demand and never more than one
/// token ahead. `position` counts consumed tokens and is what syntax errors
/// report.
pub struct TokenStream<'a> {
    lexer: Lexer<'a>,
    lookahead: Option<Token>,
    position: usize,
}

impl<'a> TokenStream<'a> {
    pub fn new(lexer: Lexer<'a>) -> Self {
        Self {
            lexer,
            lookahead: None,
            position: 0,
        }
    }

    /// Index of the last consumed token, starting at 1 for the first.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Look at the next token without consuming it. Idempotent until
    /// `advance` is called.
    pub fn peek(&mut self) -> JsonOutcome<Option<&Token>> {
        if self.lookahead.is_none() {
            self.lookahead = self.lexer.next().transpose()?;
        }
        Ok(self.lookahead.as_ref())
    }

    pub fn advance(&mut self) -> JsonOutcome<Option<Token>> {
        self.peek()?;
        let token = self.lookahead.take();
        if token.is_some() {
            self.position += 1;
        }
        Ok(token)
    }

    pub fn has_next(&mut self) -> JsonOutcome<bool> {
        Ok(self.peek()?.is_some())
    }
}
