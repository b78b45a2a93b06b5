use clap::Parser;
use rename_template::logging::init_logging;
use rename_template::{Backend, Engine, EngineConfig, EvaluationContext, FileContext};
use std::path::PathBuf;
use std::process::ExitCode;

/// Preview the names a rename template produces. Nothing is renamed.
#[derive(Parser)]
#[command(name = "rename-template")]
#[command(about = "Preview batch rename templates")]
#[command(version)]
struct Cli {
    /// Template, e.g. "{name}_{i:001}.{ext}"
    template: String,

    /// Files to preview, in batch order
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Walk the AST per file instead of compiling the template
    #[arg(long)]
    interpreted: bool,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let mut config = match EngineConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if cli.interpreted {
        config.backend = Backend::Interpreted;
    }

    let engine = Engine::new(config);
    let total = cli.files.len();
    let contexts: Vec<FileContext> = cli
        .files
        .iter()
        .enumerate()
        .map(|(index, path)| FileContext::new(path, index, total))
        .collect();

    match engine.render_batch(&cli.template, &contexts) {
        Ok(names) => {
            for (ctx, name) in contexts.iter().zip(names) {
                println!("{} -> {}", ctx.full_name(), name);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Template error: {}", e);
            ExitCode::FAILURE
        }
    }
}
