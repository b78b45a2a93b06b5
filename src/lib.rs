//! Rename templates
//!
//! A small template language for computing new file names in batch
//! renames, e.g. `{name.upper()}_{i:001}.{ext}`. Templates are parsed once
//! and rendered per file, either by walking the AST or through closures
//! compiled once.
//!
//! ```
//! use rename_template::{compile, parse, FileContext};
//!
//! let template = parse("{name}_{i:001}.{ext}").unwrap();
//! let compiled = compile(&template);
//! let ctx = FileContext::new("/music/track.flac", 4, 10);
//! assert_eq!(compiled.render(&ctx), "track_005.flac");
//! ```

pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod expr;
pub mod format;
pub mod logging;
pub mod template;

pub use config::{Backend, EngineConfig};
pub use context::{EvaluationContext, FileContext, FileInfo, ImageInfo};
pub use engine::{Engine, PreparedTemplate};
pub use error::{ArithError, ConfigError, SliceBound, SyntaxError};
pub use expr::{eval_arithmetic, evaluate_index_expression};
pub use template::{
    all_variables, compile, evaluate, parse, parse_tokens, tokenize, CompiledTemplate, Literal,
    Method, Node, Template, Token, TokenKind, Variable, VariableInfo,
};
