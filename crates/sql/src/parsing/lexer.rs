use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

use crate::error::{Error, Position, Result};

/// The lexer (lexical analyzer) preprocesses raw statement text into a
/// sequence of lexical tokens (e.g. keyword, number, operator) tagged with
/// their source position, which are passed on to the parser.
pub struct Lexer<'a> {
    chars: Peekable<CharIndices<'a>>,
    len: usize,
    line: usize,
    column: usize,
}

/// A lexical token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    /// A numeric string, with digits only.
    Number(String),
    /// An identifier: a column, table or function name, or a cross-join
    /// column reference such as `$0.x`.
    Ident(String),
    /// A reserved keyword.
    Keyword(Keyword),
    Asterisk,           // *
    Slash,              // /
    Plus,               // +
    Minus,              // -
    Equal,              // =
    NotEqual,           // <>
    LessThan,           // <
    LessThanOrEqual,    // <=
    GreaterThan,        // >
    GreaterThanOrEqual, // >=
    OpenParen,          // (
    CloseParen,         // )
    Comma,              // ,
    Semicolon,          // ;
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Number(n) => n,
            Self::Ident(s) => s,
            Self::Keyword(k) => return k.fmt(f),
            Self::Asterisk => "*",
            Self::Slash => "/",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Equal => "=",
            Self::NotEqual => "<>",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::OpenParen => "(",
            Self::CloseParen => ")",
            Self::Comma => ",",
            Self::Semicolon => ";",
        })
    }
}

impl From<Keyword> for Token {
    fn from(keyword: Keyword) -> Self {
        Self::Keyword(keyword)
    }
}

/// Reserved keywords. Matched case-insensitively.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Keyword {
    All,
    As,
    Asc,
    Ascending,
    Bool,
    By,
    Case,
    Create,
    Desc,
    Descending,
    Else,
    End,
    False,
    From,
    Group,
    Int,
    Not,
    Null,
    Order,
    Select,
    Table,
    Then,
    True,
    Union,
    When,
    Where,
}

impl TryFrom<&str> for Keyword {
    // Use a cheap static error string. This just indicates it's not a keyword.
    type Error = &'static str;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        Ok(match value.to_lowercase().as_str() {
            "all" => Self::All,
            "as" => Self::As,
            "asc" => Self::Asc,
            "ascending" => Self::Ascending,
            "bool" => Self::Bool,
            "by" => Self::By,
            "case" => Self::Case,
            "create" => Self::Create,
            "desc" => Self::Desc,
            "descending" => Self::Descending,
            "else" => Self::Else,
            "end" => Self::End,
            "false" => Self::False,
            "from" => Self::From,
            "group" => Self::Group,
            "int" => Self::Int,
            "not" => Self::Not,
            "null" => Self::Null,
            "order" => Self::Order,
            "select" => Self::Select,
            "table" => Self::Table,
            "then" => Self::Then,
            "true" => Self::True,
            "union" => Self::Union,
            "when" => Self::When,
            "where" => Self::Where,
            _ => return Err("not a keyword"),
        })
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Display keywords as uppercase.
        f.write_str(match self {
            Self::All => "ALL",
            Self::As => "AS",
            Self::Asc => "ASC",
            Self::Ascending => "ASCENDING",
            Self::Bool => "BOOL",
            Self::By => "BY",
            Self::Case => "CASE",
            Self::Create => "CREATE",
            Self::Desc => "DESC",
            Self::Descending => "DESCENDING",
            Self::Else => "ELSE",
            Self::End => "END",
            Self::False => "FALSE",
            Self::From => "FROM",
            Self::Group => "GROUP",
            Self::Int => "INT",
            Self::Not => "NOT",
            Self::Null => "NULL",
            Self::Order => "ORDER",
            Self::Select => "SELECT",
            Self::Table => "TABLE",
            Self::Then => "THEN",
            Self::True => "TRUE",
            Self::Union => "UNION",
            Self::When => "WHEN",
            Self::Where => "WHERE",
        })
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<(Position, Token)>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.scan() {
            Ok(Some(token)) => Some(Ok(token)),
            // If there's any remaining chars, the lexer didn't recognize them.
            // Otherwise, we're done lexing.
            Ok(None) => {
                let position = self.position();
                self.chars
                    .peek()
                    .map(|&(_, found)| Err(Error::Lex { position, found }))
            }
            Err(err) => Some(Err(err)),
        }
    }
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given string.
    pub fn new(input: &'a str) -> Lexer<'a> {
        Lexer {
            chars: input.char_indices().peekable(),
            len: input.len(),
            line: 1,
            column: 1,
        }
    }

    /// The position of the next unconsumed character, or of the end of input.
    pub fn position(&mut self) -> Position {
        let offset = self.chars.peek().map_or(self.len, |&(offset, _)| offset);
        Position::new(offset, self.line, self.column)
    }

    /// Consumes the next character, keeping line and column up to date.
    fn bump(&mut self) -> Option<char> {
        let (_, c) = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Returns the next character if it satisfies the predicate.
    fn next_if(&mut self, predicate: impl Fn(char) -> bool) -> Option<char> {
        self.chars.peek().filter(|&&(_, c)| predicate(c))?;
        self.bump()
    }

    /// Consumes the next character if it's the given character.
    fn next_is(&mut self, c: char) -> bool {
        self.next_if(|n| n == c).is_some()
    }

    /// Grabs the next single-character token if the tokenizer function returns
    /// one.
    fn next_if_token(&mut self, tokenizer: impl Fn(char) -> Option<Token>) -> Option<Token> {
        let &(_, c) = self.chars.peek()?;
        let token = tokenizer(c)?;
        self.bump();
        Some(token)
    }

    /// Returns the next characters as long as they satisfy the predicate.
    fn next_while(&mut self, predicate: impl Fn(char) -> bool) -> Option<String> {
        let mut value = String::new();
        while let Some(c) = self.next_if(&predicate) {
            value.push(c);
        }
        Some(value).filter(|v| !v.is_empty())
    }

    /// Scans the next token, if any.
    fn scan(&mut self) -> Result<Option<(Position, Token)>> {
        // Ignore whitespace.
        self.skip_whitespace();
        let position = self.position();
        // The first character tells us the token type.
        let token = match self.chars.peek() {
            Some(&(_, '$')) => Some(self.scan_column_reference()?),
            Some(&(_, c)) if c.is_ascii_digit() => self.scan_number(),
            Some(&(_, c)) if c.is_alphabetic() => self.scan_ident_or_keyword(),
            Some(_) => self.scan_symbol(),
            None => None,
        };
        Ok(token.map(|token| (position, token)))
    }

    /// Scans a cross-join column reference `$<index>.<name>`.
    fn scan_column_reference(&mut self) -> Result<Token> {
        let mut name = String::new();
        if self.next_is('$') {
            name.push('$');
        }
        let index = self
            .next_while(|c| c.is_ascii_digit())
            .ok_or_else(|| self.unexpected("stream index after $"))?;
        name.push_str(&index);
        if !self.next_is('.') {
            return Err(self.unexpected("'.' after stream index"));
        }
        name.push('.');
        let column = self
            .next_if(|c| c.is_alphabetic())
            .ok_or_else(|| self.unexpected("column name"))?;
        name.push(column);
        while let Some(c) = self.next_if(|c| c.is_alphanumeric() || c == '_') {
            name.push(c);
        }
        Ok(Token::Ident(name))
    }

    /// Builds an error for the character under the cursor.
    fn unexpected(&mut self, expected: &str) -> Error {
        let position = self.position();
        match self.chars.peek() {
            Some(&(_, found)) => Error::Lex { position, found },
            None => Error::Parse {
                position,
                expected: expected.to_string(),
                found: "end of input".to_string(),
            },
        }
    }

    /// Scans the next identifier or keyword, if any.
    fn scan_ident_or_keyword(&mut self) -> Option<Token> {
        // The first character must be alphabetic. The rest can be numeric.
        let mut name = self.next_if(|c| c.is_alphabetic())?.to_string();
        while let Some(c) = self.next_if(|c| c.is_alphanumeric() || c == '_') {
            name.push(c);
        }
        // Check if the identifier matches a keyword.
        match Keyword::try_from(name.as_str()) {
            Ok(keyword) => Some(Token::Keyword(keyword)),
            Err(_) => Some(Token::Ident(name)),
        }
    }

    /// Scans the next number, if any.
    fn scan_number(&mut self) -> Option<Token> {
        self.next_while(|c| c.is_ascii_digit()).map(Token::Number)
    }

    /// Scans the next symbol token, if any.
    fn scan_symbol(&mut self) -> Option<Token> {
        let mut token = self.next_if_token(|c| {
            Some(match c {
                '*' => Token::Asterisk,
                '/' => Token::Slash,
                '+' => Token::Plus,
                '-' => Token::Minus,
                '=' => Token::Equal,
                '<' => Token::LessThan,
                '>' => Token::GreaterThan,
                '(' => Token::OpenParen,
                ')' => Token::CloseParen,
                ',' => Token::Comma,
                ';' => Token::Semicolon,
                _ => return None,
            })
        })?;
        // Handle two-character tokens, e.g. <=.
        token = match token {
            Token::LessThan if self.next_is('=') => Token::LessThanOrEqual,
            Token::LessThan if self.next_is('>') => Token::NotEqual,
            Token::GreaterThan if self.next_is('=') => Token::GreaterThanOrEqual,
            token => token,
        };
        Some(token)
    }

    /// Skips any whitespace.
    fn skip_whitespace(&mut self) {
        while self.next_if(|c| c.is_whitespace()).is_some() {}
    }
}
