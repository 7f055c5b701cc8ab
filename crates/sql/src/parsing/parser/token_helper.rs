//! Token helper module
//!
//! Provides common token manipulation methods used across all parser modules.

use super::super::Token;
use crate::error::{Error, Position, Result};

/// Maximum nesting of expressions and subqueries in one statement.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Base trait for token navigation and manipulation.
/// All other parser traits extend this trait. Implementors only supply raw
/// access to the token stream; everything else is provided.
pub trait TokenHelper {
    /// Consumes the next raw lexer item, if any.
    fn next_token(&mut self) -> Option<Result<(Position, Token)>>;

    /// Peeks the next lexer token if any, without consuming it.
    fn peek(&mut self) -> Result<Option<&Token>>;

    /// The position of the next token, or of the end of input.
    fn position(&mut self) -> Position;

    /// The current nesting depth of expressions and subqueries.
    fn depth_mut(&mut self) -> &mut usize;

    /// Enters one nesting level, or errors once MAX_NESTING_DEPTH is reached.
    /// Every successful call must be paired with [`TokenHelper::leave_nested`].
    fn enter_nested(&mut self) -> Result<()> {
        if *self.depth_mut() >= MAX_NESTING_DEPTH {
            return self.unexpected("expression nesting within limit");
        }
        *self.depth_mut() += 1;
        Ok(())
    }

    /// Leaves a nesting level entered with [`TokenHelper::enter_nested`].
    fn leave_nested(&mut self) {
        *self.depth_mut() -= 1;
    }

    /// Fetches the next token and its position, or errors naming `expected`
    /// if the input is exhausted.
    fn next_for(&mut self, expected: &str) -> Result<(Position, Token)> {
        match self.next_token() {
            Some(result) => result,
            None => self.unexpected(expected),
        }
    }

    /// Returns the next identifier, or errors if not found.
    fn next_ident(&mut self) -> Result<String> {
        match self.next_if_map(|token| match token {
            Token::Ident(ident) => Some(ident.clone()),
            _ => None,
        }) {
            Some(ident) => Ok(ident),
            None => self.unexpected("identifier"),
        }
    }

    /// Returns the next lexer token if it satisfies the predicate.
    fn next_if(&mut self, predicate: impl Fn(&Token) -> bool) -> Option<Token> {
        self.peek().ok()?.filter(|&t| predicate(t))?;
        self.next_token()?.ok().map(|(_, token)| token)
    }

    /// Passes the next lexer token through the closure, consuming it if the
    /// closure returns Some. Returns the result of the closure.
    fn next_if_map<T>(&mut self, f: impl Fn(&Token) -> Option<T>) -> Option<T> {
        let value = f(self.peek().ok()??)?;
        self.next_token()?.ok()?;
        Some(value)
    }

    /// Consumes the next lexer token if it is the given token, returning true.
    fn next_is(&mut self, token: Token) -> bool {
        self.next_if(|t| t == &token).is_some()
    }

    /// Consumes the next lexer token if it's the expected token, or errors.
    fn expect(&mut self, expect: Token) -> Result<()> {
        if self.next_is(expect.clone()) {
            return Ok(());
        }
        self.unexpected(&expect.to_string())
    }

    /// Builds a parse error at the next token (or a lex error, if the next
    /// token could not be read).
    fn unexpected<T>(&mut self, expected: &str) -> Result<T> {
        let position = self.position();
        let found = match self.peek()? {
            Some(token) => token.to_string(),
            None => "end of input".to_string(),
        };
        Err(Error::Parse {
            position,
            expected: expected.to_string(),
            found,
        })
    }
}
