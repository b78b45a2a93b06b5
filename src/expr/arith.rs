//! Infix arithmetic over numbers and the index variable `i`.
//!
//! Grammar:
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-')* primary
//! primary := number | 'i' | '(' expr ')'
//! ```

use crate::error::ArithError;

#[derive(Debug, Clone, PartialEq)]
enum ArithToken {
    Number(f64),
    Var,
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

impl std::fmt::Display for ArithToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArithToken::Number(n) => write!(f, "{}", n),
            ArithToken::Var => write!(f, "i"),
            ArithToken::Plus => write!(f, "+"),
            ArithToken::Minus => write!(f, "-"),
            ArithToken::Star => write!(f, "*"),
            ArithToken::Slash => write!(f, "/"),
            ArithToken::LParen => write!(f, "("),
            ArithToken::RParen => write!(f, ")"),
        }
    }
}

fn tokenize(input: &str, allow_var: bool) -> Result<Vec<ArithToken>, ArithError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '+' | '-' | '*' | '/' | '(' | ')' => {
                chars.next();
                tokens.push(match c {
                    '+' => ArithToken::Plus,
                    '-' => ArithToken::Minus,
                    '*' => ArithToken::Star,
                    '/' => ArithToken::Slash,
                    '(' => ArithToken::LParen,
                    _ => ArithToken::RParen,
                });
            }
            c if c.is_ascii_digit() || c == '.' => {
                let mut end = start;
                while let Some(&(i, d)) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        end = i + d.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                let text = &input[start..end];
                let value = text
                    .parse::<f64>()
                    .map_err(|_| ArithError::UnexpectedToken(text.to_string()))?;
                tokens.push(ArithToken::Number(value));
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut end = start;
                while let Some(&(i, d)) = chars.peek() {
                    if d.is_ascii_alphanumeric() || d == '_' {
                        end = i + d.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                let word = &input[start..end];
                if allow_var && word.eq_ignore_ascii_case("i") {
                    tokens.push(ArithToken::Var);
                } else {
                    return Err(ArithError::UnexpectedToken(word.to_string()));
                }
            }
            other => return Err(ArithError::InvalidCharacter(other)),
        }
    }

    Ok(tokens)
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// A parsed arithmetic expression
#[derive(Debug, Clone, PartialEq)]
pub enum ArithExpr {
    Number(f64),
    /// The index variable
    Var,
    Neg(Box<ArithExpr>),
    Binary(BinaryOp, Box<ArithExpr>, Box<ArithExpr>),
}

impl ArithExpr {
    /// Parse an expression that may reference `i`
    pub fn parse(input: &str) -> Result<Self, ArithError> {
        Self::parse_with(input, true)
    }

    fn parse_with(input: &str, allow_var: bool) -> Result<Self, ArithError> {
        let tokens = tokenize(input, allow_var)?;
        let mut parser = ArithParser { tokens, pos: 0 };
        let expr = parser.parse_expression()?;
        match parser.current() {
            None => Ok(expr),
            Some(token) => Err(ArithError::UnexpectedToken(token.to_string())),
        }
    }

    /// Evaluate with `i` bound to `var`
    pub fn eval(&self, var: f64) -> Result<f64, ArithError> {
        let value = match self {
            ArithExpr::Number(n) => *n,
            ArithExpr::Var => var,
            ArithExpr::Neg(inner) => -inner.eval(var)?,
            ArithExpr::Binary(op, lhs, rhs) => {
                let lhs = lhs.eval(var)?;
                let rhs = rhs.eval(var)?;
                match op {
                    BinaryOp::Add => lhs + rhs,
                    BinaryOp::Sub => lhs - rhs,
                    BinaryOp::Mul => lhs * rhs,
                    BinaryOp::Div => {
                        if rhs == 0.0 {
                            return Err(ArithError::DivisionByZero);
                        }
                        lhs / rhs
                    }
                }
            }
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(ArithError::NonFinite)
        }
    }
}

struct ArithParser {
    tokens: Vec<ArithToken>,
    pos: usize,
}

impl ArithParser {
    fn current(&self) -> Option<&ArithToken> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<ArithToken> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn parse_expression(&mut self) -> Result<ArithExpr, ArithError> {
        let mut lhs = self.parse_term()?;
        loop {
            let op = match self.current() {
                Some(ArithToken::Plus) => BinaryOp::Add,
                Some(ArithToken::Minus) => BinaryOp::Sub,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_term()?;
            lhs = ArithExpr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_term(&mut self) -> Result<ArithExpr, ArithError> {
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.current() {
                Some(ArithToken::Star) => BinaryOp::Mul,
                Some(ArithToken::Slash) => BinaryOp::Div,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_unary()?;
            lhs = ArithExpr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<ArithExpr, ArithError> {
        // A run of signs folds to a single negation or none
        let mut negate = false;
        loop {
            match self.current() {
                Some(ArithToken::Minus) => negate = !negate,
                Some(ArithToken::Plus) => {}
                _ => break,
            }
            self.advance();
        }

        let operand = self.parse_primary()?;
        if negate {
            Ok(ArithExpr::Neg(Box::new(operand)))
        } else {
            Ok(operand)
        }
    }

    fn parse_primary(&mut self) -> Result<ArithExpr, ArithError> {
        match self.advance() {
            Some(ArithToken::Number(n)) => Ok(ArithExpr::Number(n)),
            Some(ArithToken::Var) => Ok(ArithExpr::Var),
            Some(ArithToken::LParen) => {
                let inner = self.parse_expression()?;
                match self.advance() {
                    Some(ArithToken::RParen) => Ok(inner),
                    Some(other) => Err(ArithError::UnexpectedToken(other.to_string())),
                    None => Err(ArithError::UnexpectedEnd),
                }
            }
            Some(other) => Err(ArithError::UnexpectedToken(other.to_string())),
            None => Err(ArithError::UnexpectedEnd),
        }
    }
}

/// Evaluate a variable-free arithmetic expression
pub fn eval_arithmetic(input: &str) -> Result<f64, ArithError> {
    ArithExpr::parse_with(input, false)?.eval(0.0)
}
