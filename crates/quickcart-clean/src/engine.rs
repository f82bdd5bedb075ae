use std::path::Path;
use std::time::Instant;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use quickcart_core::{ProcessedTable, RawTable, TableRead, read_table, write_table};

use crate::errors::CleanError;
use crate::master::build_master;
use crate::model::{
    CleanOptions, CleanedDataset, CleaningReport, CleaningResult, StepStats, TableReport,
};
use crate::steps::{clean_customers, clean_deliveries, clean_orders, clean_products};
use crate::summary::summarize;

pub const REPORT_FILE: &str = "cleaning_report.json";

/// Turns the raw tables into processed tables and a master table.
#[derive(Debug, Clone)]
pub struct CleaningEngine {
    options: CleanOptions,
}

impl CleaningEngine {
    pub fn new(options: CleanOptions) -> Self {
        Self { options }
    }

    pub fn run(&self) -> Result<CleaningResult, CleanError> {
        let start = Instant::now();
        let run_id = self
            .options
            .run_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let raw = self.options.raw_dir.as_path();
        let processed = self.options.processed_dir.as_path();

        info!(
            run_id = %run_id,
            raw_dir = %raw.display(),
            processed_dir = %processed.display(),
            "cleaning started"
        );

        // Nothing is read or written unless every input is present.
        for table in RawTable::ALL {
            let path = table.path_in(raw);
            if !path.is_file() {
                warn!(run_id = %run_id, table = table.name(), path = %path.display(), "raw input missing");
                return Err(CleanError::MissingInput { path });
            }
        }

        let customers = load(raw, RawTable::Customers)?;
        let products = load(raw, RawTable::Products)?;
        let orders = load(raw, RawTable::Sales)?;
        let deliveries = load(raw, RawTable::Deliveries)?;

        let mut customers_clean = clean_customers(customers.rows);
        customers_clean.stats.malformed = customers.malformed;
        log_step(RawTable::Customers, &customers_clean.stats);

        let mut products_clean = clean_products(products.rows);
        products_clean.stats.malformed = products.malformed;
        log_step(RawTable::Products, &products_clean.stats);

        let mut orders_clean = clean_orders(orders.rows);
        orders_clean.stats.malformed = orders.malformed;
        log_step(RawTable::Sales, &orders_clean.stats);

        let mut deliveries_clean = clean_deliveries(deliveries.rows);
        deliveries_clean.stats.malformed = deliveries.malformed;
        log_step(RawTable::Deliveries, &deliveries_clean.stats);

        let master = build_master(
            &orders_clean.rows,
            &deliveries_clean.rows,
            &customers_clean.rows,
        );
        let master_stats = StepStats {
            rows_in: orders_clean.rows.len() as u64,
            rows_out: master.len() as u64,
            ..StepStats::default()
        };

        let mut report = CleaningReport::new(run_id.clone(), raw.to_path_buf(), processed.to_path_buf());
        std::fs::create_dir_all(processed)?;
        report.record_table(save(
            processed,
            ProcessedTable::Customers,
            &customers_clean.rows,
            customers_clean.stats,
        )?);
        report.record_table(save(
            processed,
            ProcessedTable::Products,
            &products_clean.rows,
            products_clean.stats,
        )?);
        report.record_table(save(
            processed,
            ProcessedTable::Sales,
            &orders_clean.rows,
            orders_clean.stats,
        )?);
        report.record_table(save(
            processed,
            ProcessedTable::Deliveries,
            &deliveries_clean.rows,
            deliveries_clean.stats,
        )?);
        report.record_table(save(processed, ProcessedTable::Master, &master, master_stats)?);

        report.summary = summarize(
            &customers_clean.rows,
            &products_clean.rows,
            &orders_clean.rows,
            &deliveries_clean.rows,
        );
        report.duration_ms = start.elapsed().as_millis() as u64;

        let report_path = processed.join(REPORT_FILE);
        std::fs::write(&report_path, serde_json::to_vec_pretty(&report)?)?;

        info!(
            run_id = %run_id,
            tables = report.tables.len(),
            master_rows = master.len(),
            duration_ms = report.duration_ms,
            bytes_written = report.bytes_written,
            "cleaning completed"
        );

        Ok(CleaningResult {
            report,
            dataset: CleanedDataset {
                customers: customers_clean.rows,
                products: products_clean.rows,
                orders: orders_clean.rows,
                deliveries: deliveries_clean.rows,
                master,
            },
            report_path,
        })
    }
}

fn load<T: DeserializeOwned>(raw: &Path, table: RawTable) -> Result<TableRead<T>, CleanError> {
    let path = table.path_in(raw);
    info!(table = table.name(), path = %path.display(), "loading raw table");
    let read = read_table(&path)?;
    if read.malformed > 0 {
        warn!(table = table.name(), malformed = read.malformed, "skipped malformed rows");
    }
    Ok(read)
}

fn log_step(table: RawTable, stats: &StepStats) {
    info!(
        table = table.name(),
        rows_in = stats.rows_in,
        duplicates = stats.duplicates,
        invalid = stats.invalid,
        malformed = stats.malformed,
        rows_out = stats.rows_out,
        "table cleaned"
    );
}

fn save<T: Serialize>(
    dir: &Path,
    table: ProcessedTable,
    rows: &[T],
    stats: StepStats,
) -> Result<TableReport, CleanError> {
    let path = table.path_in(dir);
    let bytes_written = write_table(&path, rows)?;
    info!(table = table.name(), path = %path.display(), rows = rows.len(), bytes = bytes_written, "table written");
    Ok(TableReport {
        table: table.name().to_string(),
        path,
        stats,
        bytes_written,
    })
}
