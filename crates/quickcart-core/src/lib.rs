//! Core contracts and helpers for quickcart.
//!
//! This crate defines the entity records shared by the generator and the
//! cleaner, the derived segment types, CSV table I/O and settings.

pub mod config;
pub mod error;
pub mod fields;
pub mod records;
pub mod segments;
pub mod table;

pub use config::{GeneratorSettings, LoggingSettings, PathSettings, Settings};
pub use error::{Error, Result};
pub use records::{
    Customer, CustomerSegment, Delivery, Order, OrderStatus, PaymentMethod, Product,
    profit_margin_pct, round_currency,
};
pub use segments::{DeliveryTimeSegment, OrderValueSegment, RatingCategory, StockStatus, TimeSegment};
pub use table::{ProcessedTable, RawTable, TableRead, read_table, write_table};
