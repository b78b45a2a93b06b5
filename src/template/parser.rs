//! Recursive-descent parser for rename templates
//!
//! ```text
//! template    := (Text | expression)*
//! expression  := '{' (indexExpr | variable format? chain) '}'
//! indexExpr   := formula (':' formatSpec)?
//! format      := ':' formatSpec
//! chain       := ('.' Identifier ('(' args? ')')? | '[' bound? (':' bound?)? ']')*
//! ```
//!
//! Format specs are taken verbatim from the source, so a date pattern like
//! `yyyy.MM.dd` survives even though the lexer splits it into tokens.

use super::ast::{Literal, Node, Template};
use super::lexer::tokenize;
use super::methods::Method;
use super::token::{Token, TokenKind};
use crate::error::{SliceBound, SyntaxError};

/// Parser over the token stream of one template
pub struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> Parser<'a> {
    /// Tokenize `source` and prepare to parse it
    pub fn new(source: &'a str) -> Result<Self, SyntaxError> {
        let tokens = tokenize(source)?;
        Ok(Self::with_tokens(source, tokens))
    }

    /// Parse an existing token stream produced from `source`
    pub fn with_tokens(source: &'a str, mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            tokens.push(Token::new(TokenKind::Eof, "", source.len()));
        }
        Self {
            source,
            tokens,
            pos: 0,
        }
    }

    fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn peek_kind(&self, offset: usize) -> TokenKind {
        self.tokens
            .get(self.pos + offset)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn skip_blank(&mut self) {
        while self.current().is_blank() {
            self.advance();
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token, SyntaxError> {
        if self.current().kind == kind {
            Ok(self.advance())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn unexpected(&self, expected: &str) -> SyntaxError {
        let token = self.current();
        let found = match token.kind {
            TokenKind::Text | TokenKind::Identifier | TokenKind::StringLiteral => {
                format!("{} '{}'", token.kind.describe(), token.text)
            }
            other => other.describe().to_string(),
        };
        SyntaxError::UnexpectedToken {
            expected: expected.to_string(),
            found,
            position: token.position,
        }
    }

    /// Parse the whole token stream
    pub fn parse(mut self) -> Result<Template, SyntaxError> {
        let mut nodes = Vec::new();

        while self.current().kind != TokenKind::Eof {
            if self.current().kind == TokenKind::LeftBrace {
                nodes.push(self.parse_expression()?);
            } else {
                // text, or a stray '}' outside braces
                let token = self.advance();
                nodes.push(Node::text(token.text));
            }
        }

        Ok(Template::new(nodes))
    }

    fn parse_expression(&mut self) -> Result<Node, SyntaxError> {
        self.advance(); // '{'

        let mut colon = None;
        let mut close = None;
        for (offset, token) in self.tokens[self.pos..].iter().enumerate() {
            match token.kind {
                TokenKind::RightBrace => {
                    close = Some(self.pos + offset);
                    break;
                }
                TokenKind::Colon if colon.is_none() => colon = Some(self.pos + offset),
                _ => {}
            }
        }

        let eof = self.tokens.len() - 1;
        let content_end = colon.or(close).unwrap_or(eof);
        if is_index_expression(&self.tokens[self.pos..content_end]) {
            return self.parse_index_expression(content_end, colon.is_some());
        }

        self.skip_blank();
        let name = self.expect(TokenKind::Identifier, "variable name")?;
        let mut node = Node::variable(name.text);

        self.skip_blank();
        if self.current().kind == TokenKind::Colon {
            self.advance();
            let spec = self.read_format_spec();
            node = Node::format(node, spec, None);
        }

        let node = self.parse_chain(node)?;
        self.skip_blank();
        self.expect(TokenKind::RightBrace, "'}'")?;
        Ok(node)
    }

    /// `{2i+1:000}` or `{i*2}`: the formula becomes a `Format` over `i`
    fn parse_index_expression(
        &mut self,
        content_end: usize,
        has_colon: bool,
    ) -> Result<Node, SyntaxError> {
        let start = self.current().position;
        let end = self.tokens[content_end].position;
        let formula = self.source[start..end].trim().to_string();
        self.pos = content_end;

        let spec = if has_colon {
            self.advance(); // ':'
            self.read_format_spec()
        } else {
            String::new()
        };

        let node = Node::format(Node::variable("i"), spec, Some(formula));
        let node = self.parse_chain(node)?;
        self.skip_blank();
        self.expect(TokenKind::RightBrace, "'}'")?;
        Ok(node)
    }

    /// Raw source text up to `}`, `[`, or a `.` that starts a built-in method call
    fn read_format_spec(&mut self) -> String {
        let start = self.current().position;

        loop {
            match self.current().kind {
                TokenKind::RightBrace | TokenKind::LeftBracket | TokenKind::Eof => break,
                TokenKind::Dot if self.starts_method_call() => break,
                _ => {
                    self.advance();
                }
            }
        }

        let end = self.current().position;
        self.source[start..end].to_string()
    }

    fn starts_method_call(&self) -> bool {
        self.peek_kind(1) == TokenKind::Identifier
            && Method::from_str(&self.tokens[self.pos + 1].text).is_some()
    }

    fn parse_chain(&mut self, mut node: Node) -> Result<Node, SyntaxError> {
        loop {
            self.skip_blank();
            node = match self.current().kind {
                TokenKind::Dot => self.parse_method(node)?,
                TokenKind::LeftBracket => self.parse_slice(node)?,
                _ => return Ok(node),
            };
        }
    }

    fn parse_method(&mut self, target: Node) -> Result<Node, SyntaxError> {
        self.advance(); // '.'
        let name = self.expect(TokenKind::Identifier, "method name")?;

        let mut args = Vec::new();
        if self.current().kind == TokenKind::LeftParen {
            self.advance();
            loop {
                let (kind, blank) = (self.current().kind, self.current().is_blank());
                match kind {
                    TokenKind::RightParen => {
                        self.advance();
                        break;
                    }
                    TokenKind::Comma => {
                        self.advance();
                    }
                    TokenKind::Text if blank => {
                        self.advance();
                    }
                    TokenKind::StringLiteral => {
                        let token = self.advance();
                        args.push(Node::literal(token.text));
                    }
                    TokenKind::Identifier | TokenKind::Text => {
                        let token = self.advance();
                        args.push(Node::literal(bare_literal(&token.text)));
                    }
                    _ => return Err(self.unexpected("')'")),
                }
            }
        }

        Ok(Node::method(target, name.text, args))
    }

    fn parse_slice(&mut self, target: Node) -> Result<Node, SyntaxError> {
        self.advance(); // '['
        self.skip_blank();

        let start = self.parse_slice_bound(SliceBound::Start)?;
        self.skip_blank();

        let mut end = None;
        if self.current().kind == TokenKind::Colon {
            self.advance();
            self.skip_blank();
            end = self.parse_slice_bound(SliceBound::End)?;
            self.skip_blank();
        }

        self.expect(TokenKind::RightBracket, "']'")?;
        Ok(Node::slice(target, start, end))
    }

    fn parse_slice_bound(&mut self, bound: SliceBound) -> Result<Option<i64>, SyntaxError> {
        match self.current().kind {
            TokenKind::StringLiteral => {
                let token = self.advance();
                Err(SyntaxError::InvalidSliceIndex {
                    bound,
                    value: token.text.clone(),
                    position: token.position,
                })
            }
            TokenKind::Text | TokenKind::Identifier => {
                let token = self.advance();
                token
                    .text
                    .trim()
                    .parse::<i64>()
                    .map(Some)
                    .map_err(|_| SyntaxError::InvalidSliceIndex {
                        bound,
                        value: token.text.clone(),
                        position: token.position,
                    })
            }
            _ => Ok(None),
        }
    }
}

/// An unquoted argument: integers become `Int`, anything else `Str`
fn bare_literal(text: &str) -> Literal {
    let trimmed = text.trim();
    match trimmed.parse::<i64>() {
        Ok(n) => Literal::Int(n),
        Err(_) => Literal::Str(trimmed.to_string()),
    }
}

/// Whether the tokens between `{` and the first `:` (or `}`) form an
/// arithmetic formula over `i` rather than a variable reference.
fn is_index_expression(tokens: &[Token]) -> bool {
    let has_chain = tokens.iter().any(|t| {
        matches!(
            t.kind,
            TokenKind::Dot | TokenKind::LeftParen | TokenKind::LeftBracket
        )
    });
    if has_chain {
        return false;
    }

    let content: String = tokens.iter().map(|t| t.text.as_str()).collect();
    let content = content.trim();
    if content.is_empty() {
        return false;
    }

    if content.starts_with(|c: char| c.is_ascii_digit()) {
        return true;
    }
    content.contains(['+', '-', '*', '/']) && !content.eq_ignore_ascii_case("i")
}

/// Parse a template string into an AST
pub fn parse(input: &str) -> Result<Template, SyntaxError> {
    let tokens = tokenize(input)?;
    let token_count = tokens.len();
    let template = Parser::with_tokens(input, tokens).parse()?;
    tracing::debug!(
        "Parsed template: {} tokens, {} nodes",
        token_count,
        template.nodes.len()
    );
    Ok(template)
}

/// Parse tokens previously produced by [`tokenize`] for `source`
pub fn parse_tokens(source: &str, tokens: Vec<Token>) -> Result<Template, SyntaxError> {
    Parser::with_tokens(source, tokens).parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nodes(input: &str) -> Vec<Node> {
        parse(input).unwrap().nodes
    }

    fn single(input: &str) -> Node {
        let mut nodes = nodes(input);
        assert_eq!(nodes.len(), 1, "expected one node for {}", input);
        nodes.remove(0)
    }

    #[test]
    fn test_text_only() {
        assert_eq!(nodes("a.b:c,d(e)"), vec![Node::text("a.b:c,d(e)")]);
        assert!(parse("plain name").unwrap().is_text_only());
        assert!(nodes("").is_empty());
    }

    #[test]
    fn test_variables_and_text() {
        assert_eq!(
            nodes("{name}.{ext}"),
            vec![Node::variable("name"), Node::text("."), Node::variable("ext")]
        );
        assert_eq!(single("{ name }"), Node::variable("name"));
        assert_eq!(single("{NAME}"), Node::variable("NAME"));
    }

    #[test]
    fn test_format_suffix() {
        assert_eq!(single("{i:001}"), Node::format(Node::variable("i"), "001", None));
        assert_eq!(single("{iv:00}"), Node::format(Node::variable("iv"), "00", None));
        assert_eq!(single("{i:}"), Node::format(Node::variable("i"), "", None));
        assert_eq!(single("{size:.2f}"), Node::format(Node::variable("size"), ".2f", None));
        assert_eq!(
            single("{today:yyyy-MM-dd}"),
            Node::format(Node::variable("today"), "yyyy-MM-dd", None)
        );
    }

    #[test]
    fn test_format_spec_keeps_dots_and_quotes() {
        assert_eq!(
            single("{today:yyyy.MM.dd}"),
            Node::format(Node::variable("today"), "yyyy.MM.dd", None)
        );
        assert_eq!(
            single("{now:HH'h'mm}"),
            Node::format(Node::variable("now"), "HH'h'mm", None)
        );
    }

    #[test]
    fn test_method_after_format() {
        assert_eq!(
            single("{today:MMM.upper()}"),
            Node::method(Node::format(Node::variable("today"), "MMM", None), "upper", vec![])
        );
        assert_eq!(
            single("{i:00[1:]}"),
            Node::slice(Node::format(Node::variable("i"), "00", None), Some(1), None)
        );
    }

    #[test]
    fn test_index_expression() {
        assert_eq!(
            single("{2i+1:000}"),
            Node::format(Node::variable("i"), "000", Some("2i+1".to_string()))
        );
        assert_eq!(
            single("{i2+1}"),
            Node::format(Node::variable("i"), "", Some("i2+1".to_string()))
        );
        assert_eq!(
            single("{ 2 * i : 00 }"),
            Node::format(Node::variable("i"), " 00 ", Some("2 * i".to_string()))
        );
        assert_eq!(
            single("{i-1}"),
            Node::format(Node::variable("i"), "", Some("i-1".to_string()))
        );
    }

    #[test]
    fn test_method_chain() {
        let expected = Node::method(
            Node::method(
                Node::variable("name"),
                "replace",
                vec![Node::literal("_"), Node::literal("-")],
            ),
            "upper",
            vec![],
        );
        assert_eq!(single("{name.replace('_','-').upper()}"), expected);
        assert_eq!(
            single("{name.upper}"),
            Node::method(Node::variable("name"), "upper", vec![])
        );
    }

    #[test]
    fn test_method_arguments() {
        assert_eq!(
            single("{name.sub(1, 3)}"),
            Node::method(
                Node::variable("name"),
                "sub",
                vec![Node::literal(1i64), Node::literal(3i64)]
            )
        );
        assert_eq!(
            single("{name.padLeft(10, '0')}"),
            Node::method(
                Node::variable("name"),
                "padLeft",
                vec![Node::literal(10i64), Node::literal("0")]
            )
        );
        assert_eq!(
            single("{name.sub(-2)}"),
            Node::method(Node::variable("name"), "sub", vec![Node::literal(-2i64)])
        );
        assert_eq!(
            single("{name.replace(a, b)}"),
            Node::method(
                Node::variable("name"),
                "replace",
                vec![Node::literal("a"), Node::literal("b")]
            )
        );
    }

    #[test]
    fn test_slices() {
        let name = || Node::variable("name");
        assert_eq!(single("{name[1:3]}"), Node::slice(name(), Some(1), Some(3)));
        assert_eq!(single("{name[-3:]}"), Node::slice(name(), Some(-3), None));
        assert_eq!(single("{name[:2]}"), Node::slice(name(), None, Some(2)));
        assert_eq!(single("{name[2]}"), Node::slice(name(), Some(2), None));
        assert_eq!(single("{name[:]}"), Node::slice(name(), None, None));
        assert_eq!(single("{name[ 1 : 3 ]}"), Node::slice(name(), Some(1), Some(3)));
    }

    #[test]
    fn test_stray_right_brace() {
        assert_eq!(
            nodes("a}b"),
            vec![Node::text("a"), Node::text("}"), Node::text("b")]
        );
    }

    #[test]
    fn test_missing_closing_brace() {
        let err = parse("{name").unwrap_err();
        assert!(matches!(err, SyntaxError::UnexpectedToken { ref expected, .. } if expected == "'}'"));
        assert_eq!(err.position(), 5);
    }

    #[test]
    fn test_missing_paren_and_bracket() {
        let err = parse("{name.upper(}").unwrap_err();
        assert!(matches!(err, SyntaxError::UnexpectedToken { ref expected, .. } if expected == "')'"));
        assert_eq!(err.position(), 12);

        let err = parse("{name[1:3}").unwrap_err();
        assert!(matches!(err, SyntaxError::UnexpectedToken { ref expected, .. } if expected == "']'"));
    }

    #[test]
    fn test_non_identifier_names() {
        let err = parse("{.upper()}").unwrap_err();
        assert!(matches!(err, SyntaxError::UnexpectedToken { ref expected, .. } if expected == "variable name"));
        assert_eq!(err.position(), 1);

        let err = parse("{name.'x'}").unwrap_err();
        assert!(matches!(err, SyntaxError::UnexpectedToken { ref expected, .. } if expected == "method name"));

        assert!(parse("{}").is_err());
    }

    #[test]
    fn test_invalid_slice_bound() {
        let err = parse("{name[a:]}").unwrap_err();
        assert_eq!(
            err,
            SyntaxError::InvalidSliceIndex {
                bound: SliceBound::Start,
                value: "a".to_string(),
                position: 6,
            }
        );

        let err = parse("{name[1:x]}").unwrap_err();
        assert!(matches!(err, SyntaxError::InvalidSliceIndex { bound: SliceBound::End, .. }));

        let err = parse("{name['2']}").unwrap_err();
        assert!(matches!(err, SyntaxError::InvalidSliceIndex { bound: SliceBound::Start, .. }));
        let err = parse("{name[0:'3']}").unwrap_err();
        assert!(matches!(err, SyntaxError::InvalidSliceIndex { bound: SliceBound::End, .. }));
    }

    #[test]
    fn test_lex_errors_propagate() {
        assert_eq!(
            parse("{name.replace('a)}").unwrap_err(),
            SyntaxError::UnterminatedString { position: 14 }
        );
    }

    #[test]
    fn test_parse_is_deterministic() {
        let source = "pre_{name.replace('_','-').padLeft(8, '0')[1:5]}_{2i+1:000}_{today:yyyy.MM.dd}";
        let first = parse(source).unwrap();
        let second = parse(source).unwrap();
        assert_eq!(first, second);
        assert_eq!(parse_tokens(source, tokenize(source).unwrap()).unwrap(), first);
    }

    #[test]
    fn test_parse_tokens() {
        let source = "{name}_{i:00}";
        let tokens = tokenize(source).unwrap();
        assert_eq!(parse_tokens(source, tokens).unwrap(), parse(source).unwrap());
        assert_eq!(Parser::new(source).unwrap().parse().unwrap(), parse(source).unwrap());
    }
}
