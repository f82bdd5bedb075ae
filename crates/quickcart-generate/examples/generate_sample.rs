use std::env;
use std::path::PathBuf;

use quickcart_core::GeneratorSettings;
use quickcart_generate::{GenerateOptions, GenerationEngine, render_summary};
use tracing_subscriber::EnvFilter;

/// Writes a small dataset: `cargo run --example generate_sample -- --out /tmp/qc --seed 7`.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = env::args().skip(1);
    let mut out_dir = PathBuf::from("sample");
    let mut seed = 42_u64;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--out" => out_dir = args.next().map(PathBuf::from).ok_or("missing --out value")?,
            "--seed" => seed = args.next().ok_or("missing --seed value")?.parse()?,
            other => return Err(format!("unexpected argument '{other}'").into()),
        }
    }

    let settings = GeneratorSettings {
        seed,
        customers: 500,
        products: 60,
        orders: 2000,
        ..GeneratorSettings::default()
    };
    let options = GenerateOptions {
        raw_dir: out_dir.join("raw"),
        processed_dir: out_dir.join("processed"),
        ..GenerateOptions::default()
    };

    let result = GenerationEngine::new(settings, options).run()?;
    println!("{}", render_summary(&result.report));
    Ok(())
}
