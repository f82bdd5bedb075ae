//! Synthetic data generator for quickcart.
//!
//! Samples customers, products, orders and deliveries from fixed
//! distributions with a seeded RNG per table, and writes them as raw CSV
//! tables.

pub mod consolidated;
pub mod customers;
pub mod deliveries;
pub mod engine;
pub mod errors;
pub mod model;
pub mod orders;
pub mod output;
pub mod products;
pub mod report;
pub mod sampling;

pub use engine::{GenerationEngine, GenerationResult};
pub use errors::GenerationError;
pub use model::{GenerateOptions, GeneratedDataset, GenerationReport, TableReport};
pub use orders::{Pricing, PricingRules, price_basket};
pub use report::render_summary;
