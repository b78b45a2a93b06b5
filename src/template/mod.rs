//! Rename template language
//!
//! Templates mix literal text with `{...}` expressions and are parsed once
//! into an immutable AST. The AST can then be rendered per file either by
//! walking it ([`evaluate`]) or through closures built once ([`compile`]).
//!
//! Example templates:
//! - `{name}.{ext}`
//! - `{name}_{i:001}.{ext}`
//! - `{name.upper()}_{today:yyyyMMdd}.{ext}`
//! - `prefix_{name.replace('_','-')}_{2i+1:000}.{ext}`
//! - `{name[:8]}_{image:wxh}.{ext}`

#![allow(dead_code)]

pub mod ast;
pub mod compiler;
pub mod evaluator;
pub mod lexer;
pub mod methods;
pub mod parser;
pub mod token;
pub mod values;
pub mod variables;

pub use ast::{Literal, Node, Template};
pub use compiler::{compile, CompiledTemplate, RenderFn};
pub use evaluator::{evaluate, evaluate_node};
pub use lexer::{tokenize, Lexer};
pub use methods::Method;
pub use parser::{parse, parse_tokens, Parser};
pub use token::{Token, TokenKind};
pub use variables::{all_variables, FormatOption, Variable, VariableInfo, VariableKind};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::FileContext;
    use chrono::NaiveDate;

    fn ctx(path: &str, index: usize, total: usize) -> FileContext {
        let now = NaiveDate::from_ymd_opt(2025, 2, 14)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        FileContext::with_clock(path, index, total, now)
    }

    /// Render with both backends and require identical output
    fn render(template: &str, ctx: &FileContext) -> String {
        let ast = parse(template).unwrap();
        let interpreted = evaluate(&ast, ctx);
        let compiled = compile(&ast).render(ctx);
        assert_eq!(interpreted, compiled, "backends disagree on {}", template);
        compiled
    }

    #[test]
    fn test_rename_scenarios() {
        assert_eq!(render("{name}.{ext}", &ctx("/music/song.mp3", 0, 1)), "song.mp3");
        assert_eq!(
            render("{name}_{i:001}.{ext}", &ctx("/music/track.flac", 4, 10)),
            "track_005.flac"
        );
        assert_eq!(
            render("{name.upper()}_{i:00}.{ext}", &ctx("/audio/demo.wav", 2, 10)),
            "DEMO_02.wav"
        );
        assert_eq!(
            render(
                "prefix_{name.replace('_','-').upper()}_{2i+1:000}.{ext}",
                &ctx("/data/my_file.dat", 3, 10)
            ),
            "prefix_MY-FILE_007.dat"
        );
    }

    #[test]
    fn test_sequence_numbering() {
        let names: Vec<String> = (0..3)
            .map(|i| render("{i:001}", &ctx("/x/a.txt", i, 3)))
            .collect();
        assert_eq!(names, vec!["001", "002", "003"]);

        let names: Vec<String> = (0..3)
            .map(|i| render("第{i:一}集", &ctx("/x/a.mp4", i, 3)))
            .collect();
        assert_eq!(names, vec!["第一集", "第二集", "第三集"]);
    }

    #[test]
    fn test_dates_in_names() {
        let c = ctx("/x/report.pdf", 0, 1);
        assert_eq!(render("{name}_{today}.{ext}", &c), "report_2025-02-14.pdf");
        assert_eq!(render("{today:yyyy.MM.dd}_{name}", &c), "2025.02.14_report");
        assert_eq!(render("{now:yyyyMMdd_HHmm}", &c), "20250214_0800");
    }

    #[test]
    fn test_literal_text_is_preserved() {
        let c = ctx("/x/a.txt", 0, 1);
        assert_eq!(render("a.b:c,d(e)", &c), "a.b:c,d(e)");
        assert_eq!(render("(copy) {name} [1]", &c), "(copy) a [1]");
        assert_eq!(render("'quoted' \"text\"", &c), "'quoted' \"text\"");
        assert_eq!(render("}{name}", &c), "}a");
    }

    #[test]
    fn test_fail_soft_rendering() {
        let c = ctx("/x/a.txt", 5, 10);
        assert_eq!(render("{foo}_{name}", &c), "{foo}_a");
        assert_eq!(render("{name.shout()}", &c), "[Unknown method: shout]");
        assert_eq!(render("{i+x:00}", &c), "05");
    }

    #[test]
    fn test_syntax_errors_surface_once() {
        assert!(parse("{name").is_err());
        assert!(parse("{name.sub(1}").is_err());
        assert!(parse("{name[1:}").is_err());
        assert!(parse("{name['a']}").is_err());
        assert!(parse("{name.replace('a, 'b')}").is_err());
    }

    #[test]
    fn test_file_metadata_loaded_on_demand() {
        let dir = tempfile::tempdir().unwrap();
        let photo = dir.path().join("photo.png");
        image::RgbImage::new(4, 3).save(&photo).unwrap();
        let notes = dir.path().join("notes.txt");
        std::fs::write(&notes, b"0123456789").unwrap();
        let mtime = filetime::FileTime::from_unix_time(1_700_000_000, 0);
        filetime::set_file_mtime(&notes, mtime).unwrap();

        let c = FileContext::new(&photo, 0, 2);
        assert_eq!(render("{name}_{image}", &c), "photo_4x3");
        assert!(c.is_image_loaded());
        assert!(!c.is_file_loaded());

        let c = FileContext::new(&notes, 1, 2);
        assert_eq!(render("{name}_{size:1b}", &c), "notes_10 B");
        let expected = chrono::DateTime::<chrono::Local>::from(
            std::time::UNIX_EPOCH + std::time::Duration::from_secs(1_700_000_000),
        )
        .naive_local()
        .format("%Y-%m-%d %H:%M:%S")
        .to_string();
        assert_eq!(render("{file:edittime}", &c), expected);
        assert!(!c.is_image_loaded());
    }

    #[test]
    fn test_ast_reused_across_contexts() {
        let ast = parse("{name}-{iv}").unwrap();
        let compiled = compile(&ast);
        let outputs: Vec<String> = ["/x/a.txt", "/x/b.txt", "/x/c.txt"]
            .iter()
            .enumerate()
            .map(|(i, path)| compiled.render(&ctx(path, i, 3)))
            .collect();
        assert_eq!(outputs, vec!["a-2", "b-1", "c-0"]);
    }
}
