//! Rendering of variables against a context.
//!
//! Both backends resolve names to [`Variable`] and then call into here, so
//! interpreted and compiled templates produce identical output.

use super::variables::Variable;
use crate::context::EvaluationContext;
use crate::format::{
    default_date_string, format_date_value, format_file, format_image, format_index, format_size,
};

/// Inline marker emitted for a name outside the canonical variable set
pub fn unknown_variable_placeholder(name: &str) -> String {
    format!("{{{}}}", name)
}

/// The context's index as a signed value for arithmetic
pub fn index_value(ctx: &dyn EvaluationContext) -> i64 {
    i64::try_from(ctx.index()).unwrap_or(i64::MAX)
}

fn reverse_index_value(ctx: &dyn EvaluationContext) -> i64 {
    i64::try_from(ctx.reverse_index()).unwrap_or(i64::MAX)
}

/// Render a bare `{variable}`
pub fn render_variable(variable: Variable, ctx: &dyn EvaluationContext) -> String {
    match variable {
        Variable::Name => ctx.name().to_string(),
        Variable::Ext => ctx.ext().to_string(),
        Variable::FullName => ctx.full_name().to_string(),
        Variable::DirName => ctx.dir_name().to_string(),
        Variable::Index => ctx.index().to_string(),
        Variable::ReverseIndex => ctx.reverse_index().to_string(),
        Variable::Today => default_date_string(&ctx.today()),
        Variable::Now => default_date_string(&ctx.now()),
        Variable::Image => format_image(ctx.image(), ""),
        Variable::File => ctx.full_path().to_string(),
        Variable::Size => format_size(ctx.size(), ""),
    }
}

/// Render `{variable:spec}`. Text variables ignore the spec.
pub fn render_formatted(variable: Variable, spec: &str, ctx: &dyn EvaluationContext) -> String {
    match variable {
        Variable::Index => format_index(index_value(ctx), spec),
        Variable::ReverseIndex => format_index(reverse_index_value(ctx), spec),
        Variable::Today => format_date_value(&ctx.today(), spec),
        Variable::Now => format_date_value(&ctx.now(), spec),
        Variable::Image => format_image(ctx.image(), spec),
        Variable::File => format_file(ctx.full_path(), ctx.file(), spec),
        Variable::Size => format_size(ctx.size(), spec),
        Variable::Name | Variable::Ext | Variable::FullName | Variable::DirName => {
            render_variable(variable, ctx)
        }
    }
}
