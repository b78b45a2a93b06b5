//! Arithmetic Index Expressions
//!
//! A small infix evaluator for formulas over the loop variable `i`, used by
//! templates like `{2*i+1:000}` to derive a transformed sequence number.
//!
//! ## Modules
//! - `arith` - tokenizer, parser and evaluator for `+ - * / ( )`
//! - `index` - implicit multiplication, compile-once transforms, fail-soft fallback

pub mod arith;
pub mod index;

pub use arith::{eval_arithmetic, ArithExpr, BinaryOp};
pub use index::{evaluate_index_expression, normalize, IndexExpr};
