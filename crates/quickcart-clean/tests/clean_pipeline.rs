use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Datelike, Timelike};
use quickcart_clean::{CleanError, CleanOptions, CleanOrder, CleaningEngine, MasterRecord};
use quickcart_core::{GeneratorSettings, ProcessedTable, RawTable, read_table};
use quickcart_generate::{GenerateOptions, GenerationEngine};

fn generate_raw(dir: &Path, seed: u64) {
    let settings = GeneratorSettings {
        seed,
        customers: 150,
        products: 60,
        orders: 900,
        ..GeneratorSettings::default()
    };
    let options = GenerateOptions {
        raw_dir: dir.join("raw"),
        processed_dir: dir.join("processed"),
        write_consolidated: false,
        ..GenerateOptions::default()
    };
    GenerationEngine::new(settings, options)
        .run()
        .expect("generate raw tables");
}

fn options_in(dir: &Path) -> CleanOptions {
    CleanOptions {
        raw_dir: dir.join("raw"),
        processed_dir: dir.join("processed"),
        run_id: Some("test-run".to_string()),
    }
}

#[test]
fn missing_input_aborts_before_writing() {
    let dir = temp_dir("missing");
    generate_raw(&dir, 5);
    let missing = RawTable::Deliveries.path_in(&dir.join("raw"));
    fs::remove_file(&missing).expect("remove deliveries");
    let options = CleanOptions {
        processed_dir: dir.join("processed_out"),
        ..options_in(&dir)
    };

    let err = CleaningEngine::new(options).run().expect_err("missing input");
    match err {
        CleanError::MissingInput { path } => assert_eq!(path, missing),
        other => panic!("unexpected error: {other}"),
    }
    assert!(!dir.join("processed_out").exists());
}

#[test]
fn missing_input_message_names_the_path() {
    let dir = temp_dir("message");
    let err = CleaningEngine::new(options_in(&dir))
        .run()
        .expect_err("empty raw dir");
    let message = err.to_string();
    assert!(message.starts_with("raw input not found: "), "{message}");
    assert!(message.ends_with("customer_data.csv"), "{message}");
}

#[test]
fn cleaned_orders_keep_calendar_consistency() {
    let dir = temp_dir("calendar");
    generate_raw(&dir, 11);
    let result = CleaningEngine::new(options_in(&dir)).run().expect("clean");

    let read = read_table::<CleanOrder>(&ProcessedTable::Sales.path_in(&dir.join("processed")))
        .expect("read sales_clean");
    assert_eq!(read.malformed, 0);
    assert_eq!(read.rows.len(), result.dataset.orders.len());
    for order in read.rows {
        assert!(order.total_amount > 0.0);
        let at = order.order_date_time;
        assert_eq!(order.year, at.year());
        assert_eq!(order.month, at.month());
        assert_eq!(order.quarter, (at.month() + 2) / 3);
        assert_eq!(order.week_of_year, at.iso_week().week());
        assert_eq!(order.order_hour, at.hour());
    }
}

#[test]
fn master_deliveries_have_parent_orders() {
    let dir = temp_dir("master");
    generate_raw(&dir, 13);
    let result = CleaningEngine::new(options_in(&dir)).run().expect("clean");

    let processed = dir.join("processed");
    let orders = read_table::<CleanOrder>(&ProcessedTable::Sales.path_in(&processed))
        .expect("read sales_clean");
    let order_ids: HashSet<String> = orders.rows.into_iter().map(|row| row.order_id).collect();

    let master = read_table::<MasterRecord>(&ProcessedTable::Master.path_in(&processed))
        .expect("read master");
    assert_eq!(master.malformed, 0);
    assert_eq!(master.rows.len(), order_ids.len());

    let mut with_delivery = 0;
    for row in &master.rows {
        assert!(order_ids.contains(&row.order_id));
        if row.delivery_time_minutes.is_some() {
            with_delivery += 1;
            assert!(row.order_status.is_completed());
        }
        assert!(row.city_customer.is_some());
    }
    assert_eq!(with_delivery, result.dataset.deliveries.len());
}

#[test]
fn recleaning_processed_tables_is_stable() {
    let dir = temp_dir("idempotent");
    generate_raw(&dir, 17);
    let first = CleaningEngine::new(options_in(&dir)).run().expect("first clean");

    let second_dir = temp_dir("idempotent_second");
    let second_raw = second_dir.join("raw");
    fs::create_dir_all(&second_raw).expect("create second raw");
    let processed = dir.join("processed");
    for (raw, cleaned) in [
        (RawTable::Customers, ProcessedTable::Customers),
        (RawTable::Products, ProcessedTable::Products),
        (RawTable::Sales, ProcessedTable::Sales),
        (RawTable::Deliveries, ProcessedTable::Deliveries),
    ] {
        fs::copy(cleaned.path_in(&processed), raw.path_in(&second_raw)).expect("copy table");
    }

    let second = CleaningEngine::new(options_in(&second_dir))
        .run()
        .expect("second clean");

    for table in ["customers", "products", "sales", "deliveries", "master"] {
        let a = first.report.table(table).expect("first table");
        let b = second.report.table(table).expect("second table");
        assert_eq!(a.stats.rows_out, b.stats.rows_out, "{table}");
        assert_eq!(b.stats.duplicates, 0, "{table}");
        assert_eq!(b.stats.invalid, 0, "{table}");
        assert_eq!(b.stats.malformed, 0, "{table}");
    }
    assert_eq!(first.report.summary, second.report.summary);
}

#[test]
fn duplicates_and_malformed_rows_are_counted() {
    let dir = temp_dir("dirty");
    generate_raw(&dir, 19);

    let sales_path = RawTable::Sales.path_in(&dir.join("raw"));
    let contents = fs::read_to_string(&sales_path).expect("read sales");
    let first_row = contents.lines().nth(1).expect("first data row").to_string();
    let rows_before = contents.lines().count() as u64 - 1;
    let mut file = fs::OpenOptions::new()
        .append(true)
        .open(&sales_path)
        .expect("open sales");
    writeln!(file, "{first_row}").expect("append duplicate");
    writeln!(file, "ORD999999,broken").expect("append malformed");
    drop(file);

    let result = CleaningEngine::new(options_in(&dir)).run().expect("clean");
    let sales = result.report.table("sales").expect("sales report");
    assert_eq!(sales.stats.rows_in, rows_before + 1);
    assert_eq!(sales.stats.duplicates, 1);
    assert_eq!(sales.stats.malformed, 1);
    assert_eq!(sales.stats.rows_out, rows_before);

    let report: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(&result.report_path).expect("read cleaning_report.json"),
    )
    .expect("parse report");
    assert_eq!(report["run_id"], "test-run");
    assert_eq!(report["tables"].as_array().map(Vec::len), Some(5));
}

fn temp_dir(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("quickcart_clean_{label}_{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}
