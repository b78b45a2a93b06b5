//! Closure compiler
//!
//! Turns an AST into a tree of boxed closures once, so rendering a
//! template for thousands of files skips name lookup, method dispatch and
//! formula parsing. Output is identical to the tree-walking evaluator.

use super::ast::{Literal, Node, Template};
use super::methods::{slice_bounds, unknown_method_placeholder, Method};
use super::values::{index_value, render_formatted, render_variable, unknown_variable_placeholder};
use super::variables::Variable;
use crate::context::EvaluationContext;
use crate::expr::IndexExpr;
use crate::format::format_index;

/// A compiled render function
pub type RenderFn = Box<dyn Fn(&dyn EvaluationContext) -> String + Send + Sync>;

/// A template compiled into closures
pub struct CompiledTemplate {
    render: RenderFn,
}

impl CompiledTemplate {
    /// Render for one context
    pub fn render(&self, ctx: &dyn EvaluationContext) -> String {
        (self.render)(ctx)
    }
}

impl std::fmt::Debug for CompiledTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledTemplate").finish_non_exhaustive()
    }
}

/// Compile a parsed template
pub fn compile(template: &Template) -> CompiledTemplate {
    let render: RenderFn = match template.nodes.as_slice() {
        [] => constant(String::new()),
        [only] => compile_node(only),
        nodes => {
            let parts: Vec<RenderFn> = nodes.iter().map(compile_node).collect();
            Box::new(move |ctx: &dyn EvaluationContext| {
                let mut out = String::new();
                for part in &parts {
                    out.push_str(&part(ctx));
                }
                out
            })
        }
    };

    CompiledTemplate { render }
}

fn constant(value: String) -> RenderFn {
    Box::new(move |_: &dyn EvaluationContext| value.clone())
}

fn compile_node(node: &Node) -> RenderFn {
    match node {
        Node::Text { text } => constant(text.clone()),
        Node::Variable { name } => compile_variable(name),
        Node::Format {
            inner,
            spec,
            expression,
        } => compile_format(inner, spec, expression.as_deref()),
        Node::Method { target, name, args } => compile_method(target, name, args),
        Node::Slice { target, start, end } => {
            let target = compile_node(target);
            let (start, end) = (*start, *end);
            Box::new(move |ctx: &dyn EvaluationContext| slice_bounds(&target(ctx), start, end))
        }
        Node::Literal { value } => constant(value.to_string()),
    }
}

fn compile_variable(name: &str) -> RenderFn {
    match Variable::from_str(name) {
        Some(variable) => {
            Box::new(move |ctx: &dyn EvaluationContext| render_variable(variable, ctx))
        }
        None => {
            tracing::debug!("Unknown variable '{}' compiled to placeholder", name);
            constant(unknown_variable_placeholder(name))
        }
    }
}

fn compile_format(inner: &Node, spec: &str, expression: Option<&str>) -> RenderFn {
    let spec = spec.to_string();

    if let Some(formula) = expression.filter(|f| !f.is_empty()) {
        let transform = IndexExpr::compile(formula);
        if !transform.is_valid() {
            tracing::debug!("Index expression '{}' falls back to the raw index", formula);
        }
        return Box::new(move |ctx: &dyn EvaluationContext| {
            format_index(transform.apply(index_value(ctx)), &spec)
        });
    }

    match inner {
        Node::Variable { name } => match Variable::from_str(name) {
            Some(variable) => Box::new(move |ctx: &dyn EvaluationContext| {
                render_formatted(variable, &spec, ctx)
            }),
            None => constant(unknown_variable_placeholder(name)),
        },
        other => compile_node(other),
    }
}

enum CompiledArg {
    Const(Literal),
    Dynamic(RenderFn),
}

impl CompiledArg {
    fn resolve(&self, ctx: &dyn EvaluationContext) -> Literal {
        match self {
            CompiledArg::Const(value) => value.clone(),
            CompiledArg::Dynamic(render) => Literal::Str(render(ctx)),
        }
    }
}

fn compile_method(target: &Node, name: &str, args: &[Node]) -> RenderFn {
    let Some(method) = Method::from_str(name) else {
        tracing::debug!("Unknown method '{}' compiled to placeholder", name);
        return constant(unknown_method_placeholder(name));
    };

    let target = compile_node(target);

    let literals: Option<Vec<Literal>> = args
        .iter()
        .map(|arg| match arg {
            Node::Literal { value } => Some(value.clone()),
            _ => None,
        })
        .collect();
    if let Some(values) = literals {
        return Box::new(move |ctx: &dyn EvaluationContext| method.apply(&target(ctx), &values));
    }

    let args: Vec<CompiledArg> = args
        .iter()
        .map(|arg| match arg {
            Node::Literal { value } => CompiledArg::Const(value.clone()),
            other => CompiledArg::Dynamic(compile_node(other)),
        })
        .collect();

    Box::new(move |ctx: &dyn EvaluationContext| {
        let values: Vec<Literal> = args.iter().map(|a| a.resolve(ctx)).collect();
        method.apply(&target(ctx), &values)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{FileContext, FileInfo, ImageInfo};
    use crate::template::evaluator::evaluate;
    use crate::template::parser::parse;
    use chrono::NaiveDate;

    fn ctx(path: &str, index: usize, total: usize) -> FileContext {
        let now = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 30, 15)
            .unwrap();
        FileContext::with_clock(path, index, total, now)
            .with_file_info(FileInfo::with_len(2048))
            .with_image_info(ImageInfo::new(800, 600))
    }

    fn render(template: &str, ctx: &FileContext) -> String {
        compile(&parse(template).unwrap()).render(ctx)
    }

    #[test]
    fn test_single_and_multiple_children() {
        let c = ctx("/x/song.mp3", 0, 1);
        assert_eq!(render("{name}", &c), "song");
        assert_eq!(render("{name}.{ext}", &c), "song.mp3");
        assert_eq!(render("", &c), "");
    }

    #[test]
    fn test_end_to_end() {
        assert_eq!(render("{name}_{i:001}.{ext}", &ctx("/m/track.flac", 4, 10)), "track_005.flac");
        assert_eq!(render("{name.upper()}_{i:00}.{ext}", &ctx("/m/demo.wav", 2, 10)), "DEMO_02.wav");
        assert_eq!(
            render(
                "prefix_{name.replace('_','-').upper()}_{2i+1:000}.{ext}",
                &ctx("/m/my_file.dat", 3, 10)
            ),
            "prefix_MY-FILE_007.dat"
        );
    }

    #[test]
    fn test_reverse_index() {
        assert_eq!(render("{iv}", &ctx("/x/a.txt", 0, 10)), "9");
        assert_eq!(render("{iv}", &ctx("/x/a.txt", 9, 10)), "0");
        assert_eq!(render("{iv:001}", &ctx("/x/a.txt", 9, 10)), "001");
    }

    #[test]
    fn test_placeholders() {
        let c = ctx("/x/a.txt", 0, 1);
        assert_eq!(render("{foo}", &c), "{foo}");
        assert_eq!(render("{name.frobnicate(1)}", &c), "[Unknown method: frobnicate]");
    }

    #[test]
    fn test_compiled_template_is_reusable_across_threads() {
        let compiled = std::sync::Arc::new(compile(&parse("{name}_{i:000}").unwrap()));
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let compiled = compiled.clone();
                std::thread::spawn(move || compiled.render(&ctx("/x/f.txt", i, 4)))
            })
            .collect();
        let results: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results, vec!["f_000", "f_001", "f_002", "f_003"]);
    }

    #[test]
    fn test_compiler_matches_evaluator() {
        let templates = [
            "plain",
            "a.b:c,d(e)",
            "{name}.{ext}",
            "{NAME}-{FullName}-{dirname}",
            "{i}",
            "{i:001}",
            "{i:1}",
            "{iv:00}",
            "{i:一}",
            "{i:壹}",
            "{i:十}",
            "{2i+1:000}",
            "{i2+1}",
            "{i*3-1}",
            "{i/0}",
            "{today}",
            "{now:yyyy-MM-dd HH:mm}",
            "{today:yyyy.MM.dd}",
            "{today:MMM.upper()}",
            "{image}_{image:w}_{image:h}",
            "{size}|{size:1kb}|{size:.1f}",
            "{file:createtime}",
            "{name.sub(1)}",
            "{name.slice(1, -1)}",
            "{name[1:3]}",
            "{name[-2:]}",
            "{name.padLeft(12, '*')}",
            "{name.padRight(12)}|",
            "{name.trim().lower()}",
            "{name.replace('_', ' ')}",
            "{foo}",
            "{name.nope()}",
            "a}b",
        ];

        for (index, total) in [(0, 1), (3, 10), (9, 10)] {
            let c = ctx("/photos/trip/My_Photo.jpg", index, total);
            for source in templates {
                let template = parse(source).unwrap();
                assert_eq!(
                    compile(&template).render(&c),
                    evaluate(&template, &c),
                    "backends disagree on {} at index {}",
                    source,
                    index
                );
            }
        }
    }
}
