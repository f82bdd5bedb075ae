//! Cleaning pipeline for quickcart raw tables.
//!
//! Deduplicates and validates each raw table, adds derived segment columns,
//! and joins orders, deliveries and customers into the master table.

pub mod dedup;
pub mod engine;
pub mod errors;
pub mod master;
pub mod model;
pub mod records;
pub mod report;
pub mod steps;
pub mod summary;

pub use dedup::dedup_by_key;
pub use engine::CleaningEngine;
pub use errors::CleanError;
pub use master::build_master;
pub use model::{
    CleanOptions, Cleaned, CleanedDataset, CleaningReport, CleaningResult, CleaningSummary,
    StepStats, TableReport,
};
pub use records::{CleanDelivery, CleanOrder, CleanProduct, MasterRecord};
pub use report::render_summary;
pub use steps::{clean_customers, clean_deliveries, clean_orders, clean_products};
pub use summary::summarize;
