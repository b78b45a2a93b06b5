//! Token types produced by the template lexer.

use serde::{Deserialize, Serialize};

/// Token kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Literal text (outside braces, or non-structural runs inside them)
    Text,
    /// {
    LeftBrace,
    /// }
    RightBrace,
    /// :
    Colon,
    /// .
    Dot,
    /// [
    LeftBracket,
    /// ]
    RightBracket,
    /// (
    LeftParen,
    /// )
    RightParen,
    /// ,
    Comma,
    /// 'text' or "text" (escapes already resolved)
    StringLiteral,
    /// Variable name, method name, bare argument
    Identifier,
    Eof,
}

impl TokenKind {
    /// Human-readable name used in error messages
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Text => "text",
            TokenKind::LeftBrace => "'{'",
            TokenKind::RightBrace => "'}'",
            TokenKind::Colon => "':'",
            TokenKind::Dot => "'.'",
            TokenKind::LeftBracket => "'['",
            TokenKind::RightBracket => "']'",
            TokenKind::LeftParen => "'('",
            TokenKind::RightParen => "')'",
            TokenKind::Comma => "','",
            TokenKind::StringLiteral => "string literal",
            TokenKind::Identifier => "identifier",
            TokenKind::Eof => "end of template",
        }
    }

    /// The structural token for a single character inside braces
    pub fn from_operator(c: char) -> Option<Self> {
        match c {
            ':' => Some(TokenKind::Colon),
            '.' => Some(TokenKind::Dot),
            '[' => Some(TokenKind::LeftBracket),
            ']' => Some(TokenKind::RightBracket),
            '(' => Some(TokenKind::LeftParen),
            ')' => Some(TokenKind::RightParen),
            ',' => Some(TokenKind::Comma),
            _ => None,
        }
    }
}

/// A token with its source text and byte offset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub position: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, position: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            position,
        }
    }

    /// Text token consisting only of whitespace
    pub fn is_blank(&self) -> bool {
        self.kind == TokenKind::Text && self.text.trim().is_empty()
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}({})", self.kind, self.text)
    }
}
