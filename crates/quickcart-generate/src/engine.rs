use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use quickcart_core::{GeneratorSettings, ProcessedTable, RawTable};

use crate::consolidated::consolidate;
use crate::customers::generate_customers;
use crate::deliveries::generate_deliveries;
use crate::errors::GenerationError;
use crate::model::{GenerateOptions, GeneratedDataset, GenerationReport};
use crate::orders::generate_orders;
use crate::output::csv::write_table_csv;
use crate::products::generate_products;
use crate::sampling::Distributions;

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub report: GenerationReport,
    pub dataset: GeneratedDataset,
}

/// Entry point for generating the synthetic raw tables.
#[derive(Debug, Clone)]
pub struct GenerationEngine {
    settings: GeneratorSettings,
    options: GenerateOptions,
}

impl GenerationEngine {
    pub fn new(settings: GeneratorSettings, options: GenerateOptions) -> Self {
        Self { settings, options }
    }

    /// Sample every table in memory without touching the filesystem.
    ///
    /// Each table draws from its own RNG derived from the seed and the table
    /// name, so one table's size does not shift another table's values.
    pub fn generate(&self) -> Result<GeneratedDataset, GenerationError> {
        self.settings.validate()?;
        let seed = self.settings.seed;
        let distributions = Distributions::standard()?;

        let mut rng = table_rng(seed, RawTable::Customers);
        let customers = generate_customers(&self.settings, &mut rng);
        info!(table = "customers", rows = customers.len(), "table generated");

        let mut rng = table_rng(seed, RawTable::Products);
        let products = generate_products(&self.settings, &mut rng);
        info!(table = "products", rows = products.len(), "table generated");

        let mut rng = table_rng(seed, RawTable::Sales);
        let batch = generate_orders(
            &self.settings,
            &customers,
            &products,
            &distributions,
            &mut rng,
        )?;
        info!(
            table = "sales",
            rows = batch.orders.len(),
            weekend_skipped = batch.weekend_skipped,
            "table generated"
        );

        let mut rng = table_rng(seed, RawTable::Deliveries);
        let deliveries =
            generate_deliveries(&self.settings, &batch.orders, &distributions, &mut rng);
        info!(table = "deliveries", rows = deliveries.len(), "table generated");

        Ok(GeneratedDataset {
            customers,
            products,
            orders: batch.orders,
            deliveries,
            orders_attempted: batch.attempted,
            weekend_skipped: batch.weekend_skipped,
        })
    }

    /// Generate all tables and write them to the configured directories.
    pub fn run(&self) -> Result<GenerationResult, GenerationError> {
        let start = Instant::now();
        let run_id = self
            .options
            .run_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        info!(
            run_id = %run_id,
            seed = self.settings.seed,
            customers = self.settings.customers,
            products = self.settings.products,
            orders = self.settings.orders,
            "generation started"
        );

        let dataset = match self.generate() {
            Ok(dataset) => dataset,
            Err(err) => {
                warn!(run_id = %run_id, error = %err, "generation failed");
                return Err(err);
            }
        };

        let mut report = GenerationReport::new(run_id.clone(), self.settings.seed);
        std::fs::create_dir_all(&self.options.raw_dir)?;

        let raw = &self.options.raw_dir;
        report.record_table(write_table_csv(
            &RawTable::Customers.path_in(raw),
            RawTable::Customers.name(),
            &dataset.customers,
        )?);
        report.record_table(write_table_csv(
            &RawTable::Products.path_in(raw),
            RawTable::Products.name(),
            &dataset.products,
        )?);
        report.record_table(write_table_csv(
            &RawTable::Sales.path_in(raw),
            RawTable::Sales.name(),
            &dataset.orders,
        )?);
        report.record_table(write_table_csv(
            &RawTable::Deliveries.path_in(raw),
            RawTable::Deliveries.name(),
            &dataset.deliveries,
        )?);

        if self.options.write_consolidated {
            std::fs::create_dir_all(&self.options.processed_dir)?;
            let consolidated = consolidate(&dataset.orders, &dataset.deliveries);
            report.record_table(write_table_csv(
                &ProcessedTable::Consolidated.path_in(&self.options.processed_dir),
                ProcessedTable::Consolidated.name(),
                &consolidated,
            )?);
        }

        for table in &report.tables {
            info!(
                table = %table.table,
                path = %table.path.display(),
                rows = table.rows_generated,
                bytes = table.bytes_written,
                "table written"
            );
        }

        report.record_dataset(&dataset);
        report.duration_ms = start.elapsed().as_millis() as u64;

        if let Some(path) = &self.options.report_path {
            std::fs::write(path, serde_json::to_vec_pretty(&report)?)?;
        }

        info!(
            run_id = %run_id,
            tables = report.tables.len(),
            duration_ms = report.duration_ms,
            bytes_written = report.bytes_written,
            "generation completed"
        );

        Ok(GenerationResult { report, dataset })
    }
}

fn table_rng(seed: u64, table: RawTable) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(hash_seed(seed, table.name()))
}

fn hash_seed(seed: u64, key: &str) -> u64 {
    let mut hash = seed ^ 0xcbf29ce484222325;
    for byte in key.as_bytes() {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}
