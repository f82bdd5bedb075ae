use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use quickcart_core::{Customer, Delivery, Order, PathSettings, Product};

/// Options for the generation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Directory receiving the four raw tables.
    pub raw_dir: PathBuf,
    /// Directory receiving the consolidated table.
    pub processed_dir: PathBuf,
    /// Write `blinkit_consolidated.csv` next to the processed tables.
    pub write_consolidated: bool,
    /// Run identifier recorded in the report; generated when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
    /// Where to write `generation_report.json`, if anywhere.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_path: Option<PathBuf>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        let paths = PathSettings::default();
        Self {
            raw_dir: paths.raw_dir,
            processed_dir: paths.processed_dir,
            write_consolidated: true,
            run_id: None,
            report_path: None,
        }
    }
}

/// In-memory tables produced by one generation.
#[derive(Debug, Clone)]
pub struct GeneratedDataset {
    pub customers: Vec<Customer>,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub deliveries: Vec<Delivery>,
    pub orders_attempted: u64,
    pub weekend_skipped: u64,
}

/// Summary of a written table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableReport {
    pub table: String,
    pub path: PathBuf,
    pub rows_generated: u64,
    pub bytes_written: u64,
    /// SHA-256 of the written file.
    pub fingerprint: String,
}

/// Report for a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub run_id: String,
    pub seed: u64,
    pub tables: Vec<TableReport>,
    pub orders_attempted: u64,
    pub weekend_orders_skipped: u64,
    pub total_revenue: f64,
    pub average_order_value: f64,
    pub on_time_rate: f64,
    pub average_delivery_minutes: f64,
    pub first_order_date: Option<NaiveDate>,
    pub last_order_date: Option<NaiveDate>,
    pub bytes_written: u64,
    pub duration_ms: u64,
}

impl GenerationReport {
    pub fn new(run_id: String, seed: u64) -> Self {
        Self {
            run_id,
            seed,
            tables: Vec::new(),
            orders_attempted: 0,
            weekend_orders_skipped: 0,
            total_revenue: 0.0,
            average_order_value: 0.0,
            on_time_rate: 0.0,
            average_delivery_minutes: 0.0,
            first_order_date: None,
            last_order_date: None,
            bytes_written: 0,
            duration_ms: 0,
        }
    }

    pub fn record_table(&mut self, table: TableReport) {
        self.bytes_written += table.bytes_written;
        self.tables.push(table);
    }

    pub fn table(&self, name: &str) -> Option<&TableReport> {
        self.tables.iter().find(|table| table.table == name)
    }

    /// Aggregate order and delivery statistics from the dataset.
    pub fn record_dataset(&mut self, dataset: &GeneratedDataset) {
        self.orders_attempted = dataset.orders_attempted;
        self.weekend_orders_skipped = dataset.weekend_skipped;
        self.total_revenue = dataset.orders.iter().map(|order| order.total_amount).sum();
        self.average_order_value = mean(dataset.orders.iter().map(|order| order.total_amount));
        self.on_time_rate = mean(
            dataset
                .deliveries
                .iter()
                .map(|delivery| if delivery.is_on_time { 1.0 } else { 0.0 }),
        );
        self.average_delivery_minutes = mean(
            dataset
                .deliveries
                .iter()
                .map(|delivery| delivery.delivery_time_minutes as f64),
        );
        self.first_order_date = dataset.orders.iter().map(|order| order.order_date).min();
        self.last_order_date = dataset.orders.iter().map(|order| order.order_date).max();
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0_u64), |(sum, count), value| (sum + value, count + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}
