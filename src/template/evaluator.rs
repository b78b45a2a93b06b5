//! Tree-walking evaluator
//!
//! Walks the AST afresh for every context. It is the reference semantics
//! for the compiler and never fails: unknown names and methods render as
//! inline placeholders.

use super::ast::{Literal, Node, Template};
use super::methods::{slice_bounds, unknown_method_placeholder, Method};
use super::values::{index_value, render_formatted, render_variable, unknown_variable_placeholder};
use super::variables::Variable;
use crate::context::EvaluationContext;
use crate::expr::evaluate_index_expression;
use crate::format::format_index;

/// Render a template for one context
pub fn evaluate(template: &Template, ctx: &dyn EvaluationContext) -> String {
    template
        .nodes
        .iter()
        .map(|node| evaluate_node(node, ctx))
        .collect()
}

/// Render a single node
pub fn evaluate_node(node: &Node, ctx: &dyn EvaluationContext) -> String {
    match node {
        Node::Text { text } => text.clone(),
        Node::Variable { name } => match Variable::from_str(name) {
            Some(variable) => render_variable(variable, ctx),
            None => unknown_variable_placeholder(name),
        },
        Node::Format {
            inner,
            spec,
            expression,
        } => evaluate_format(inner, spec, expression.as_deref(), ctx),
        Node::Method { target, name, args } => {
            let Some(method) = Method::from_str(name) else {
                tracing::trace!("Unknown method '{}'", name);
                return unknown_method_placeholder(name);
            };
            let target = evaluate_node(target, ctx);
            let args: Vec<Literal> = args.iter().map(|arg| evaluate_argument(arg, ctx)).collect();
            method.apply(&target, &args)
        }
        Node::Slice { target, start, end } => {
            slice_bounds(&evaluate_node(target, ctx), *start, *end)
        }
        Node::Literal { value } => value.to_string(),
    }
}

fn evaluate_format(
    inner: &Node,
    spec: &str,
    expression: Option<&str>,
    ctx: &dyn EvaluationContext,
) -> String {
    if let Some(formula) = expression.filter(|f| !f.is_empty()) {
        let value = evaluate_index_expression(formula, index_value(ctx));
        return format_index(value, spec);
    }

    match inner {
        Node::Variable { name } => match Variable::from_str(name) {
            Some(variable) => render_formatted(variable, spec, ctx),
            None => unknown_variable_placeholder(name),
        },
        other => evaluate_node(other, ctx),
    }
}

fn evaluate_argument(arg: &Node, ctx: &dyn EvaluationContext) -> Literal {
    match arg {
        Node::Literal { value } => value.clone(),
        other => Literal::Str(evaluate_node(other, ctx)),
    }
}
