//! AST nodes for the rename template language
//!
//! The AST is built once per template string and is immutable afterwards,
//! so it can be evaluated against any number of file contexts.

use serde::{Deserialize, Serialize};

/// A parsed template: literal text and expressions in source order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Template {
    pub nodes: Vec<Node>,
}

impl Template {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// True when the template contains no `{...}` expression
    pub fn is_text_only(&self) -> bool {
        self.nodes.iter().all(|n| matches!(n, Node::Text { .. }))
    }
}

/// A node in the template AST
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum Node {
    /// Literal text, emitted unchanged
    Text { text: String },
    /// Variable reference: {name}. Resolved case-insensitively.
    Variable { name: String },
    /// Formatted value: {i:001}, {today:yyyyMMdd}, {2i+1:00}
    Format {
        inner: Box<Node>,
        spec: String,
        /// Arithmetic index formula, set only for `{2*i+1:...}` forms
        expression: Option<String>,
    },
    /// Method call: target.name(args)
    Method {
        target: Box<Node>,
        name: String,
        args: Vec<Node>,
    },
    /// Slice: target[start:end], bounds are integer literals
    Slice {
        target: Box<Node>,
        start: Option<i64>,
        end: Option<i64>,
    },
    /// Literal method argument
    Literal { value: Literal },
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text { text: text.into() }
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Node::Variable { name: name.into() }
    }

    pub fn format(inner: Node, spec: impl Into<String>, expression: Option<String>) -> Self {
        Node::Format {
            inner: Box::new(inner),
            spec: spec.into(),
            expression,
        }
    }

    pub fn method(target: Node, name: impl Into<String>, args: Vec<Node>) -> Self {
        Node::Method {
            target: Box::new(target),
            name: name.into(),
            args,
        }
    }

    pub fn slice(target: Node, start: Option<i64>, end: Option<i64>) -> Self {
        Node::Slice {
            target: Box::new(target),
            start,
            end,
        }
    }

    pub fn literal(value: impl Into<Literal>) -> Self {
        Node::Literal {
            value: value.into(),
        }
    }
}

/// Literal values usable as method arguments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Int(i64),
    Str(String),
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Int(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::Str(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::Str(value)
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Int(n) => write!(f, "{}", n),
            Literal::Str(s) => write!(f, "{}", s),
        }
    }
}
