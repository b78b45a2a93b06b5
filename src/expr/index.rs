//! Index expressions such as `2*i+1`, `2i+1` or `i2`.
//!
//! Formulas are fail-soft: anything that cannot be parsed or evaluated
//! yields the raw index.

use super::arith::ArithExpr;
use crate::error::ArithError;
use regex::Regex;
use std::sync::LazyLock;

static DIGITS_BEFORE_I: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d)([iI])").expect("static regex"));
static DIGITS_AFTER_I: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([iI])(\d)").expect("static regex"));

/// Strip whitespace and make implicit multiplication explicit
/// (`2i` -> `2*i`, `i2` -> `i*2`).
pub fn normalize(formula: &str) -> String {
    let compact: String = formula.chars().filter(|c| !c.is_whitespace()).collect();
    let step = DIGITS_BEFORE_I.replace_all(&compact, "$1*$2");
    DIGITS_AFTER_I.replace_all(&step, "$1*$2").into_owned()
}

/// An index transform compiled once from a formula
#[derive(Debug, Clone, PartialEq)]
pub struct IndexExpr {
    source: String,
    expr: Option<ArithExpr>,
}

impl IndexExpr {
    /// Compile a formula. Invalid formulas compile to the identity transform.
    pub fn compile(formula: &str) -> Self {
        let normalized = normalize(formula);
        let expr = if normalized.is_empty() {
            None
        } else {
            match ArithExpr::parse(&normalized) {
                Ok(expr) => Some(expr),
                Err(e) => {
                    tracing::trace!("Index expression '{}' is invalid: {}", formula, e);
                    None
                }
            }
        };

        Self {
            source: formula.to_string(),
            expr,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether the formula parsed; `apply` is the identity otherwise
    pub fn is_valid(&self) -> bool {
        self.expr.is_some()
    }

    /// Evaluate for one index, rounding half to even
    pub fn apply(&self, index: i64) -> i64 {
        let Some(expr) = &self.expr else {
            return index;
        };

        match expr.eval(index as f64) {
            Ok(value) => {
                let rounded = value.round_ties_even();
                if rounded >= i64::MIN as f64 && rounded <= i64::MAX as f64 {
                    rounded as i64
                } else {
                    let err = ArithError::OutOfRange(rounded);
                    tracing::trace!("Index expression '{}' failed for i={}: {}", self.source, index, err);
                    index
                }
            }
            Err(e) => {
                tracing::trace!("Index expression '{}' failed for i={}: {}", self.source, index, e);
                index
            }
        }
    }
}

/// Derive and evaluate a formula in one step
pub fn evaluate_index_expression(formula: &str, index: i64) -> i64 {
    IndexExpr::compile(formula).apply(index)
}
