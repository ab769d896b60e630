//! Lexer (tokenizer) for the circuit netlist.

use crate::error::{KirchhoffError, Result};

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The token's text
    pub text: String,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

/// Token types in the netlist.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// An identifier (component name, keyword) or terminal reference (`L1.a`)
    Identifier,
    /// A number (integer or floating point, possibly with suffix)
    Number,
    /// A directive (starts with '.')
    Directive,
    /// Equals sign '='
    Equals,
    /// Newline
    Newline,
    /// End of file
    Eof,
}

/// Lexer for tokenizing netlist input.
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.char_indices().peekable(),
            line: 1,
            column: 1,
        }
    }

    /// Get the next token.
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace_and_comments();

        let ch = match self.chars.peek() {
            Some(&(_, ch)) => ch,
            None => return Ok(self.token(TokenKind::Eof, String::new(), self.line, self.column)),
        };

        let start_column = self.column;
        let start_line = self.line;

        let (kind, text) = match ch {
            '\n' => {
                self.advance();
                (TokenKind::Newline, "\n".to_string())
            }
            '.' => {
                self.advance();
                let name = self.read_word();
                if name.is_empty() {
                    return Err(KirchhoffError::lexer(start_line, start_column, "empty directive"));
                }
                (TokenKind::Directive, format!(".{}", name))
            }
            '=' => {
                self.advance();
                (TokenKind::Equals, "=".to_string())
            }
            '-' | '+' | '0'..='9' => (TokenKind::Number, self.read_number()),
            _ if ch.is_alphabetic() || ch == '_' => (TokenKind::Identifier, self.read_reference()),
            _ => {
                return Err(KirchhoffError::lexer(
                    start_line,
                    start_column,
                    format!("unexpected character '{}'", ch),
                ));
            }
        };

        Ok(self.token(kind, text, start_line, start_column))
    }

    fn token(&self, kind: TokenKind, text: String, line: usize, column: usize) -> Token {
        Token {
            kind,
            text,
            line,
            column,
        }
    }

    fn advance(&mut self) -> Option<char> {
        let (_, ch) = self.chars.next()?;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    /// The character after the one `peek` would return.
    fn peek_second(&self) -> Option<char> {
        let mut ahead = self.chars.clone();
        ahead.next();
        ahead.next().map(|(_, ch)| ch)
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(&(_, ch)) = self.chars.peek() {
            if ch == ' ' || ch == '\t' || ch == '\r' || ch == ',' {
                self.advance();
            } else if ch == '#' || ch == ';' {
                // Skip comment until end of line
                while let Some(&(_, c)) = self.chars.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.advance();
                }
            } else {
                break;
            }
        }
    }

    fn read_word(&mut self) -> String {
        let mut text = String::new();
        while let Some(&(_, ch)) = self.chars.peek() {
            if ch.is_alphanumeric() || ch == '_' {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        text
    }

    /// An identifier, continued across '.' when a word follows (`L1.a`).
    fn read_reference(&mut self) -> String {
        let mut text = self.read_word();
        while matches!(self.chars.peek(), Some(&(_, '.')))
            && self.peek_second().is_some_and(|c| c.is_alphanumeric() || c == '_')
        {
            self.advance();
            text.push('.');
            text.push_str(&self.read_word());
        }
        text
    }

    fn read_digits(&mut self, text: &mut String) {
        while let Some(&(_, ch)) = self.chars.peek() {
            if ch.is_ascii_digit() {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_number(&mut self) -> String {
        let mut text = String::new();

        // Optional sign
        if let Some(&(_, ch)) = self.chars.peek() {
            if ch == '-' || ch == '+' {
                text.push(ch);
                self.advance();
            }
        }

        self.read_digits(&mut text);

        if let Some(&(_, '.')) = self.chars.peek() {
            text.push('.');
            self.advance();
            self.read_digits(&mut text);
        }

        // Exponent part, only when digits follow so "2e" stays invalid rather
        // than swallowing the next word
        if let Some(&(_, ch)) = self.chars.peek() {
            if (ch == 'e' || ch == 'E')
                && self
                    .peek_second()
                    .is_some_and(|c| c.is_ascii_digit() || c == '-' || c == '+')
            {
                text.push(ch);
                self.advance();
                if let Some(&(_, sign)) = self.chars.peek() {
                    if sign == '-' || sign == '+' {
                        text.push(sign);
                        self.advance();
                    }
                }
                self.read_digits(&mut text);
            }
        }

        // Unit suffix
        if let Some(&(_, ch)) = self.chars.peek() {
            if matches!(ch, 'p' | 'n' | 'u' | 'µ' | 'm' | 'k' | 'K' | 'M' | 'G') {
                text.push(ch);
                self.advance();
            }
        }

        text
    }
}

/// Parse a number string with optional unit suffix.
pub fn parse_value(text: &str) -> Option<f64> {
    let text = text.trim();
    let last = text.chars().last()?;

    let multiplier = match last {
        'p' => 1e-12,
        'n' => 1e-9,
        'u' | 'µ' => 1e-6,
        'm' => 1e-3,
        'k' | 'K' => 1e3,
        'M' => 1e6,
        'G' => 1e9,
        _ => 1.0,
    };
    let num_str = if multiplier != 1.0 {
        &text[..text.len() - last.len_utf8()]
    } else {
        text
    };

    num_str
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v * multiplier)
}
