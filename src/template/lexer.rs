//! Lexer for the rename template language
//!
//! Text outside `{...}` is passed through verbatim. Only inside braces do
//! `: . [ ] ( ) ,` and quotes become structural tokens. Brace depth is
//! tracked incrementally while scanning, so tokenizing is linear in the
//! input length.

use super::token::{Token, TokenKind};
use crate::error::SyntaxError;

/// Lexer state for a single template string
pub struct Lexer<'a> {
    source: &'a str,
    /// Current byte position in source
    pos: usize,
    /// Number of unmatched `{` before `pos`
    depth: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            depth: 0,
        }
    }

    /// Tokenize the whole input. The last token is always `Eof`.
    pub fn tokenize(mut self) -> Result<Vec<Token>, SyntaxError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        tokens.push(Token::new(TokenKind::Eof, "", self.pos));
        Ok(tokens)
    }

    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn inside_braces(&self) -> bool {
        self.depth > 0
    }

    fn next_token(&mut self) -> Result<Option<Token>, SyntaxError> {
        let Some(c) = self.peek() else {
            return Ok(None);
        };
        let start = self.pos;

        match c {
            '{' => {
                self.advance();
                self.depth += 1;
                Ok(Some(Token::new(TokenKind::LeftBrace, "{", start)))
            }
            '}' => {
                self.advance();
                self.depth = self.depth.saturating_sub(1);
                Ok(Some(Token::new(TokenKind::RightBrace, "}", start)))
            }
            _ if !self.inside_braces() => Ok(Some(self.lex_text())),
            _ => {
                if let Some(kind) = TokenKind::from_operator(c) {
                    self.advance();
                    Ok(Some(Token::new(kind, c.to_string(), start)))
                } else if c == '\'' || c == '"' {
                    self.lex_string(c).map(Some)
                } else if is_identifier_start(c) {
                    Ok(Some(self.lex_identifier()))
                } else {
                    Ok(Some(self.lex_text()))
                }
            }
        }
    }

    /// Read a text run. Outside braces it stops only at a brace; inside
    /// braces it also stops before anything that starts another token.
    fn lex_text(&mut self) -> Token {
        let start = self.pos;
        let in_code = self.inside_braces();

        while let Some(c) = self.peek() {
            if c == '{' || c == '}' {
                break;
            }
            if in_code
                && (TokenKind::from_operator(c).is_some()
                    || c == '\''
                    || c == '"'
                    || is_identifier_start(c))
            {
                break;
            }
            self.advance();
        }

        Token::new(TokenKind::Text, &self.source[start..self.pos], start)
    }

    fn lex_string(&mut self, quote: char) -> Result<Token, SyntaxError> {
        let start = self.pos;
        self.advance(); // opening quote

        let mut value = String::new();
        while let Some(c) = self.advance() {
            if c == quote {
                return Ok(Token::new(TokenKind::StringLiteral, value, start));
            }
            if c == '\\' {
                match self.advance() {
                    Some('n') => value.push('\n'),
                    Some('r') => value.push('\r'),
                    Some('t') => value.push('\t'),
                    // \\ \" \' and unknown escapes keep the escaped character
                    Some(other) => value.push(other),
                    None => break,
                }
            } else {
                value.push(c);
            }
        }

        Err(SyntaxError::UnterminatedString { position: start })
    }

    fn lex_identifier(&mut self) -> Token {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if is_identifier_char(c) {
                self.advance();
            } else {
                break;
            }
        }
        Token::new(TokenKind::Identifier, &self.source[start..self.pos], start)
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Tokenize a template string
pub fn tokenize(input: &str) -> Result<Vec<Token>, SyntaxError> {
    Lexer::new(input).tokenize()
}
