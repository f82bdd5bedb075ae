use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use quickcart_core::{Customer, PathSettings};

use crate::records::{CleanDelivery, CleanOrder, CleanProduct, MasterRecord};

/// Options for the cleaning engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanOptions {
    /// Directory holding the four raw tables.
    pub raw_dir: PathBuf,
    /// Directory receiving the processed tables and `cleaning_report.json`.
    pub processed_dir: PathBuf,
    /// Run identifier recorded in the report; generated when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
}

impl Default for CleanOptions {
    fn default() -> Self {
        let paths = PathSettings::default();
        Self {
            raw_dir: paths.raw_dir,
            processed_dir: paths.processed_dir,
            run_id: None,
        }
    }
}

/// Row accounting for one cleaning step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepStats {
    /// Rows decoded from the input file.
    pub rows_in: u64,
    pub duplicates: u64,
    /// Rows dropped by a validity predicate.
    pub invalid: u64,
    /// Rows that could not be decoded at all.
    pub malformed: u64,
    pub rows_out: u64,
}

/// Output of a cleaning step.
#[derive(Debug, Clone)]
pub struct Cleaned<T> {
    pub rows: Vec<T>,
    pub stats: StepStats,
}

/// Summary of a written processed table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableReport {
    pub table: String,
    pub path: PathBuf,
    pub stats: StepStats,
    pub bytes_written: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerSummary {
    pub total: u64,
    pub active: u64,
    pub unique_cities: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub total: u64,
    pub active: u64,
    pub categories: u64,
    pub out_of_stock: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesSummary {
    pub total: u64,
    pub completed: u64,
    pub revenue: f64,
    pub average_order_value: f64,
    pub first_order_date: Option<NaiveDate>,
    pub last_order_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeliverySummary {
    pub total: u64,
    pub on_time: u64,
    pub on_time_rate: f64,
    pub average_minutes: f64,
    pub average_rating: f64,
}

/// Data quality figures computed over the cleaned tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleaningSummary {
    pub customers: CustomerSummary,
    pub products: ProductSummary,
    pub sales: SalesSummary,
    pub deliveries: DeliverySummary,
}

/// Report for a cleaning run, written to `cleaning_report.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningReport {
    pub run_id: String,
    pub raw_dir: PathBuf,
    pub processed_dir: PathBuf,
    pub tables: Vec<TableReport>,
    pub summary: CleaningSummary,
    pub bytes_written: u64,
    pub duration_ms: u64,
}

impl CleaningReport {
    pub fn new(run_id: String, raw_dir: PathBuf, processed_dir: PathBuf) -> Self {
        Self {
            run_id,
            raw_dir,
            processed_dir,
            tables: Vec::new(),
            summary: CleaningSummary::default(),
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
}

/// Cleaned tables held in memory after a run.
#[derive(Debug, Clone)]
pub struct CleanedDataset {
    pub customers: Vec<Customer>,
    pub products: Vec<CleanProduct>,
    pub orders: Vec<CleanOrder>,
    pub deliveries: Vec<CleanDelivery>,
    pub master: Vec<MasterRecord>,
}

/// Result of a cleaning run.
#[derive(Debug, Clone)]
pub struct CleaningResult {
    pub report: CleaningReport,
    pub dataset: CleanedDataset,
    pub report_path: PathBuf,
}
