//! A minimal standalone tokenizer for the core statement vocabulary.
//!
//! It covers `select`, `true`, `false`, `as`, identifiers and the statement
//! terminator only, and checks the lexical layer on its own. The parser does
//! its own lexing through [`super::Lexer`] and accepts the full grammar.

use crate::error::{Error, Position, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Select,
    True,
    False,
    /// `;`
    StatementEnd,
    /// The `as` keyword
    Rename,
    Identifier(String),
}

/// Keywords in the order they are tried.
static KEYWORDS: [(&str, Token); 4] = [
    ("select", Token::Select),
    ("true", Token::True),
    ("false", Token::False),
    ("as", Token::Rename),
];

/// Splits text into tokens. At each position the statement terminator is
/// tried first, then every keyword, then a generic identifier. Keywords must
/// end at a word boundary, so `selected` is an identifier.
pub fn tokenize(text: &str) -> Result<Vec<Token>> {
    let mut cursor = Cursor::new(text);
    let mut tokens = Vec::new();

    loop {
        cursor.skip_whitespace();
        let Some(c) = cursor.peek() else {
            return Ok(tokens);
        };

        if c == ';' {
            cursor.advance(1);
            tokens.push(Token::StatementEnd);
        } else if let Some((keyword, token)) = KEYWORDS
            .iter()
            .find(|(keyword, _)| cursor.at_keyword(keyword))
        {
            cursor.advance(keyword.len());
            tokens.push(token.clone());
        } else if c.is_alphabetic() {
            let ident = cursor.take_while(|c| c.is_alphanumeric() || c == '_');
            tokens.push(Token::Identifier(ident.to_string()));
        } else {
            return Err(Error::Lex {
                position: cursor.position(),
                found: c,
            });
        }
    }
}

/// Walks the input by character, tracking the byte offset, line and column.
struct Cursor<'a> {
    text: &'a str,
    offset: usize,
    line: usize,
    column: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    fn rest(&self) -> &'a str {
        &self.text[self.offset..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn position(&self) -> Position {
        Position::new(self.offset, self.line, self.column)
    }

    /// Moves past `count` characters.
    fn advance(&mut self, count: usize) {
        for c in self.rest().chars().take(count).collect::<Vec<_>>() {
            self.offset += c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    fn skip_whitespace(&mut self) {
        self.take_while(char::is_whitespace);
    }

    fn take_while(&mut self, predicate: impl Fn(char) -> bool) -> &'a str {
        let start = self.offset;
        let count = self.rest().chars().take_while(|&c| predicate(c)).count();
        self.advance(count);
        &self.text[start..self.offset]
    }

    /// Whether the input continues with `keyword` followed by a word boundary.
    fn at_keyword(&self, keyword: &str) -> bool {
        let rest = self.rest();
        let Some(prefix) = rest.get(..keyword.len()) else {
            return false;
        };
        prefix.eq_ignore_ascii_case(keyword)
            && !rest[keyword.len()..]
                .chars()
                .next()
                .is_some_and(|c| c.is_alphanumeric() || c == '_')
    }
}
