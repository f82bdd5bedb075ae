mod registry;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use quickcart_clean::{CleanError, CleanOptions, CleaningEngine};
use quickcart_core::{Error as CoreError, Settings};
use quickcart_generate::{GenerateOptions, GenerationEngine, GenerationError};
use registry::{RunContext, RunPaths, init_logging, start_run, write_report};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
enum CliError {
    #[error("registry error: {0}")]
    Registry(#[from] registry::RegistryError),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Clean(#[from] CleanError),
}

#[derive(Parser, Debug)]
#[command(name = "quickcart", version, about = "Synthetic quick-commerce data generator and cleaner")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the raw customer, product, sales and delivery tables.
    Generate(GenerateArgs),
    /// Clean the raw tables into processed tables and the master table.
    Clean(CommonArgs),
    /// Generate, then clean.
    Pipeline(GenerateArgs),
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Self::Generate(_) => "generate",
            Self::Clean(_) => "clean",
            Self::Pipeline(_) => "pipeline",
        }
    }
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Settings file; defaults to ./quickcart.toml when present.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Directory holding the raw tables.
    #[arg(long, value_name = "DIR")]
    raw_dir: Option<PathBuf>,
    /// Directory receiving processed tables.
    #[arg(long, value_name = "DIR")]
    processed_dir: Option<PathBuf>,
    /// Output directory for runs.
    #[arg(long, value_name = "DIR")]
    run_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[command(flatten)]
    common: CommonArgs,
    /// Seed for every table's RNG.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), CliError> {
    let name = command.name();
    let (common, seed) = match &command {
        Command::Generate(args) | Command::Pipeline(args) => (&args.common, args.seed),
        Command::Clean(args) => (args, None),
    };
    let settings = resolve_settings(common, seed)?;

    let run_id = Uuid::new_v4().to_string();
    let ctx = RunContext {
        run_id: run_id.clone(),
        started_at: chrono::Utc::now(),
        command: name.to_string(),
        settings,
    };
    let paths = start_run(&ctx)?;
    init_logging(&ctx.settings.logging, paths.logs_path.as_deref())?;

    tracing::info!(event = "run_started", run_id = %run_id, command = name, run_dir = %paths.root.display());
    let timer = Instant::now();

    let outcome = match command {
        Command::Generate(_) => run_generate(&ctx, &paths),
        Command::Clean(_) => run_clean(&ctx, &paths),
        Command::Pipeline(_) => run_generate(&ctx, &paths).and_then(|()| run_clean(&ctx, &paths)),
    };

    let duration_ms = timer.elapsed().as_millis();
    match &outcome {
        Ok(()) => tracing::info!(event = "run_finished", status = "success", duration_ms = duration_ms),
        Err(err) => tracing::warn!(event = "run_finished", status = "failed", error = %err, duration_ms = duration_ms),
    }
    outcome
}

fn resolve_settings(args: &CommonArgs, seed: Option<u64>) -> Result<Settings, CliError> {
    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(seed) = seed {
        settings.generator.seed = seed;
    }
    if let Some(raw_dir) = &args.raw_dir {
        settings.paths.raw_dir = raw_dir.clone();
    }
    if let Some(processed_dir) = &args.processed_dir {
        settings.paths.processed_dir = processed_dir.clone();
    }
    if let Some(run_dir) = &args.run_dir {
        settings.paths.runs_dir = run_dir.clone();
    }
    Ok(settings)
}

fn run_generate(ctx: &RunContext, paths: &RunPaths) -> Result<(), CliError> {
    let options = GenerateOptions {
        raw_dir: ctx.settings.paths.raw_dir.clone(),
        processed_dir: ctx.settings.paths.processed_dir.clone(),
        write_consolidated: true,
        run_id: Some(ctx.run_id.clone()),
        report_path: Some(paths.root.join("generation_report.json")),
    };
    let result = GenerationEngine::new(ctx.settings.generator.clone(), options).run()?;
    println!("{}", quickcart_generate::render_summary(&result.report));
    Ok(())
}

fn run_clean(ctx: &RunContext, paths: &RunPaths) -> Result<(), CliError> {
    let options = CleanOptions {
        raw_dir: ctx.settings.paths.raw_dir.clone(),
        processed_dir: ctx.settings.paths.processed_dir.clone(),
        run_id: Some(ctx.run_id.clone()),
    };
    let result = CleaningEngine::new(options).run()?;
    let report_path = write_report(paths, "cleaning_report.json", &result.report)?;
    tracing::info!(event = "report_written", path = %report_path.display());
    println!("{}", quickcart_clean::render_summary(&result.report));
    Ok(())
}
