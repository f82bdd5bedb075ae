use std::fs;
use std::path::PathBuf;

use quickcart_core::{GeneratorSettings, Product, RawTable, read_table};
use quickcart_generate::{GenerateOptions, GenerationEngine};

fn small_settings(seed: u64) -> GeneratorSettings {
    GeneratorSettings {
        seed,
        customers: 120,
        products: 60,
        orders: 800,
        ..GeneratorSettings::default()
    }
}

fn options_in(dir: &PathBuf) -> GenerateOptions {
    GenerateOptions {
        raw_dir: dir.join("raw"),
        processed_dir: dir.join("processed"),
        report_path: Some(dir.join("generation_report.json")),
        ..GenerateOptions::default()
    }
}

#[test]
fn generate_is_deterministic() {
    let out_dir_a = temp_out_dir("run_a");
    let out_dir_b = temp_out_dir("run_b");

    let result_a = GenerationEngine::new(small_settings(42), options_in(&out_dir_a))
        .run()
        .expect("run generation A");
    let result_b = GenerationEngine::new(small_settings(42), options_in(&out_dir_b))
        .run()
        .expect("run generation B");

    for table in RawTable::ALL {
        let a = result_a.report.table(table.name()).expect("table A");
        let b = result_b.report.table(table.name()).expect("table B");
        assert_eq!(a.fingerprint, b.fingerprint, "{} should be deterministic", table.name());
    }

    let sales_a = fs::read_to_string(RawTable::Sales.path_in(&out_dir_a.join("raw")))
        .expect("read sales A");
    let sales_b = fs::read_to_string(RawTable::Sales.path_in(&out_dir_b.join("raw")))
        .expect("read sales B");
    assert_eq!(sales_a, sales_b);
}

#[test]
fn different_seeds_change_the_data() {
    let out_dir_a = temp_out_dir("seed_a");
    let out_dir_b = temp_out_dir("seed_b");

    let result_a = GenerationEngine::new(small_settings(1), options_in(&out_dir_a))
        .run()
        .expect("run generation A");
    let result_b = GenerationEngine::new(small_settings(2), options_in(&out_dir_b))
        .run()
        .expect("run generation B");

    let a = result_a.report.table("sales").expect("sales A");
    let b = result_b.report.table("sales").expect("sales B");
    assert_ne!(a.fingerprint, b.fingerprint);
}

#[test]
fn generate_respects_row_counts() {
    let out_dir = temp_out_dir("run_rows");
    let result = GenerationEngine::new(small_settings(7), options_in(&out_dir))
        .run()
        .expect("run generation");

    let report_path = out_dir.join("generation_report.json");
    let report: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(&report_path).expect("read generation_report.json"),
    )
    .expect("parse report");

    let tables = report
        .get("tables")
        .and_then(|value| value.as_array())
        .expect("tables array");
    let rows_for = |name: &str| {
        tables
            .iter()
            .find(|table| table.get("table") == Some(&serde_json::Value::String(name.to_string())))
            .and_then(|table| table.get("rows_generated"))
            .and_then(|value| value.as_u64())
            .expect("rows_generated")
    };

    assert_eq!(rows_for("customers"), 120);
    assert_eq!(rows_for("products"), 60);
    let sales = rows_for("sales");
    assert_eq!(sales + result.report.weekend_orders_skipped, 800);
    assert_eq!(rows_for("consolidated"), sales);

    let completed = result
        .dataset
        .orders
        .iter()
        .filter(|order| order.order_status.is_completed())
        .count() as u64;
    assert_eq!(rows_for("deliveries"), completed);
}

#[test]
fn written_products_keep_margin_invariant() {
    let out_dir = temp_out_dir("products");
    GenerationEngine::new(small_settings(3), options_in(&out_dir))
        .run()
        .expect("run generation");

    let read = read_table::<Product>(&RawTable::Products.path_in(&out_dir.join("raw")))
        .expect("read products");
    assert_eq!(read.malformed, 0);
    assert_eq!(read.rows.len(), 60);
    for product in read.rows {
        assert!(product.cost_price < product.price);
        let margin = (product.price - product.cost_price) / product.price * 100.0;
        assert!((margin - product.profit_margin).abs() < 0.05, "{product:?}");
    }
}

#[test]
fn invalid_settings_are_rejected_before_writing() {
    let out_dir = temp_out_dir("invalid");
    let mut settings = small_settings(1);
    settings.weekend_skip_probability = 2.0;

    let result = GenerationEngine::new(settings, options_in(&out_dir)).run();
    assert!(result.is_err());
    assert!(!out_dir.join("raw").exists());
}

fn temp_out_dir(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!(
        "quickcart_generate_{label}_{}",
        uuid::Uuid::new_v4()
    ));
    fs::create_dir_all(&dir).expect("create temp out dir");
    dir
}
