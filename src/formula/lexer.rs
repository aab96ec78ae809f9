//! Lexer (tokenizer) for chemical formulas.

use super::elements::is_element;
use crate::error::{BalanceError, Result};

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The token's text
    pub text: String,
    /// Character offset of the token (0-indexed)
    pub position: usize,
}

/// Grouping symbol families. Open and close symbols must agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    /// `( ... )`
    Paren,
    /// `[ ... ]`
    Bracket,
    /// `{ ... }`
    Brace,
}

impl GroupKind {
    /// Opening character of this group kind.
    pub fn open(self) -> char {
        match self {
            Self::Paren => '(',
            Self::Bracket => '[',
            Self::Brace => '{',
        }
    }

    /// Closing character of this group kind.
    pub fn close(self) -> char {
        match self {
            Self::Paren => ')',
            Self::Bracket => ']',
            Self::Brace => '}',
        }
    }
}

/// Token types in a formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// An element symbol such as `Na`
    Element,
    /// A run of decimal digits
    Number,
    /// Group opening symbol
    Open(GroupKind),
    /// Group closing symbol
    Close(GroupKind),
    /// Hydrate separator (`.`, `·`, `•`, `*`)
    HydrateSeparator,
    /// End of input
    Eof,
}

/// Lexer for tokenizing a single compound formula.
pub struct Lexer<'a> {
    input: &'a str,
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    position: usize,
    strict_elements: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given formula.
    ///
    /// With `strict_elements`, element tokens are checked against the
    /// periodic table; otherwise any `[A-Z][a-z]*` run is accepted.
    pub fn new(input: &'a str, strict_elements: bool) -> Self {
        Self {
            input,
            chars: input.chars().peekable(),
            position: 0,
            strict_elements,
        }
    }

    /// The formula being tokenized.
    pub fn input(&self) -> &'a str {
        self.input
    }

    /// Get the next token.
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace();

        let ch = match self.chars.peek().copied() {
            Some(ch) => ch,
            None => {
                return Ok(Token {
                    kind: TokenKind::Eof,
                    text: String::new(),
                    position: self.position,
                });
            }
        };

        let start = self.position;

        let kind = match ch {
            '(' => TokenKind::Open(GroupKind::Paren),
            '[' => TokenKind::Open(GroupKind::Bracket),
            '{' => TokenKind::Open(GroupKind::Brace),
            ')' => TokenKind::Close(GroupKind::Paren),
            ']' => TokenKind::Close(GroupKind::Bracket),
            '}' => TokenKind::Close(GroupKind::Brace),
            '.' | '·' | '•' | '*' => TokenKind::HydrateSeparator,
            '0'..='9' => {
                let text = self.read_digits();
                return Ok(Token {
                    kind: TokenKind::Number,
                    text,
                    position: start,
                });
            }
            _ if ch.is_ascii_uppercase() => {
                let text = self.read_element(start)?;
                return Ok(Token {
                    kind: TokenKind::Element,
                    text,
                    position: start,
                });
            }
            _ if ch.is_ascii_lowercase() => {
                return Err(self.error(
                    start,
                    format!(
                        "unexpected lowercase '{}'; element symbols start with an uppercase letter",
                        ch
                    ),
                ));
            }
            _ => {
                return Err(self.error(start, format!("unexpected character '{}'", ch)));
            }
        };

        self.advance();
        Ok(Token {
            kind,
            text: ch.to_string(),
            position: start,
        })
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        self.position += 1;
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(&ch) = self.chars.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_digits(&mut self) -> String {
        let mut text = String::new();
        while let Some(&ch) = self.chars.peek() {
            if ch.is_ascii_digit() {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        text
    }

    /// Read an element symbol starting at an uppercase letter.
    ///
    /// In strict mode a two-letter symbol wins whenever the pair is a real
    /// element; a trailing lowercase letter that does not complete a valid
    /// symbol is rejected rather than split off.
    fn read_element(&mut self, start: usize) -> Result<String> {
        let mut text = String::new();
        if let Some(first) = self.advance() {
            text.push(first);
        }

        if !self.strict_elements {
            while let Some(&ch) = self.chars.peek() {
                if ch.is_ascii_lowercase() {
                    text.push(ch);
                    self.advance();
                } else {
                    break;
                }
            }
            return Ok(text);
        }

        if let Some(&next) = self.chars.peek() {
            if next.is_ascii_lowercase() {
                text.push(next);
                if is_element(&text) {
                    self.advance();
                    return Ok(text);
                }
                return Err(self.error(start, format!("unknown element '{}'", text)));
            }
        }

        if is_element(&text) {
            Ok(text)
        } else {
            Err(self.error(start, format!("unknown element '{}'", text)))
        }
    }

    fn error(&self, position: usize, message: String) -> BalanceError {
        BalanceError::parse(self.input, position, message)
    }
}
