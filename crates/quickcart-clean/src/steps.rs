//! Per-table cleaning steps.
//!
//! Every step deduplicates on the primary key first, then drops rows failing
//! the table's validity predicate, then fills and derives columns.

use chrono::{Datelike, Timelike};
use tracing::debug;

use quickcart_core::{
    Customer, Delivery, DeliveryTimeSegment, Order, OrderValueSegment, Product, RatingCategory,
    StockStatus, TimeSegment, profit_margin_pct,
};

use crate::dedup::dedup_by_key;
use crate::model::{Cleaned, StepStats};
use crate::records::{CleanDelivery, CleanOrder, CleanProduct};

pub const UNKNOWN_EMAIL: &str = "unknown@email.com";
pub const UNKNOWN_PHONE: &str = "0000000000";
pub const DEFAULT_STOCK_QUANTITY: i64 = 0;
pub const DEFAULT_MIN_STOCK_LEVEL: i64 = 20;

pub fn clean_customers(rows: Vec<Customer>) -> Cleaned<Customer> {
    let rows_in = rows.len() as u64;
    let (rows, duplicates) = dedup_by_key(rows, |row| row.customer_id.clone());

    let rows: Vec<Customer> = rows
        .into_iter()
        .map(|mut row| {
            row.email = Some(filled(row.email, UNKNOWN_EMAIL));
            row.phone = Some(filled(row.phone, UNKNOWN_PHONE));
            row.city = title_case(&row.city);
            row
        })
        .collect();

    Cleaned {
        stats: StepStats {
            rows_in,
            duplicates,
            rows_out: rows.len() as u64,
            ..StepStats::default()
        },
        rows,
    }
}

pub fn clean_products(rows: Vec<Product>) -> Cleaned<CleanProduct> {
    let rows_in = rows.len() as u64;
    let (rows, duplicates) = dedup_by_key(rows, |row| row.product_id.clone());

    let mut invalid = 0_u64;
    let mut cleaned = Vec::with_capacity(rows.len());
    for row in rows {
        if !(row.price > 0.0 && row.cost_price > 0.0) {
            debug!(product_id = %row.product_id, price = row.price, cost_price = row.cost_price, "dropping product with non-positive price");
            invalid += 1;
            continue;
        }

        let stock_quantity = row.stock_quantity.unwrap_or(DEFAULT_STOCK_QUANTITY);
        let min_stock_level = row.min_stock_level.unwrap_or(DEFAULT_MIN_STOCK_LEVEL);
        cleaned.push(CleanProduct {
            profit_margin: profit_margin_pct(row.price, row.cost_price),
            stock_status: StockStatus::from_levels(stock_quantity, min_stock_level),
            product_id: row.product_id,
            product_name: row.product_name,
            category: row.category,
            sub_category: row.sub_category,
            brand: row.brand,
            price: row.price,
            cost_price: row.cost_price,
            stock_quantity,
            min_stock_level,
            is_active: row.is_active,
        });
    }

    Cleaned {
        stats: StepStats {
            rows_in,
            duplicates,
            invalid,
            rows_out: cleaned.len() as u64,
            ..StepStats::default()
        },
        rows: cleaned,
    }
}

pub fn clean_orders(rows: Vec<Order>) -> Cleaned<CleanOrder> {
    let rows_in = rows.len() as u64;
    let (rows, duplicates) = dedup_by_key(rows, |row| row.order_id.clone());

    let mut invalid = 0_u64;
    let mut cleaned = Vec::with_capacity(rows.len());
    for row in rows {
        let Some(order_value_segment) = OrderValueSegment::from_total(row.total_amount) else {
            debug!(order_id = %row.order_id, total_amount = row.total_amount, "dropping order with non-positive total");
            invalid += 1;
            continue;
        };

        let timestamp = row.order_date_time;
        cleaned.push(CleanOrder {
            year: timestamp.year(),
            month: timestamp.month(),
            month_name: timestamp.format("%B").to_string(),
            quarter: (timestamp.month() - 1) / 3 + 1,
            week_of_year: timestamp.iso_week().week(),
            time_segment: TimeSegment::from_hour(timestamp.hour()),
            order_value_segment,
            order_id: row.order_id,
            customer_id: row.customer_id,
            order_date_time: row.order_date_time,
            order_date: row.order_date,
            order_time: row.order_time,
            order_hour: row.order_hour,
            day_of_week: row.day_of_week,
            is_weekend: row.is_weekend,
            num_items: row.num_items,
            subtotal: row.subtotal,
            delivery_fee: row.delivery_fee,
            discount: row.discount,
            total_amount: row.total_amount,
            payment_method: row.payment_method,
            order_status: row.order_status,
            city: row.city,
            area: row.area,
            is_repeat_customer: row.is_repeat_customer,
        });
    }

    Cleaned {
        stats: StepStats {
            rows_in,
            duplicates,
            invalid,
            rows_out: cleaned.len() as u64,
            ..StepStats::default()
        },
        rows: cleaned,
    }
}

pub fn clean_deliveries(rows: Vec<Delivery>) -> Cleaned<CleanDelivery> {
    let rows_in = rows.len() as u64;
    let (rows, duplicates) = dedup_by_key(rows, |row| row.delivery_id.clone());

    let mut invalid = 0_u64;
    let mut cleaned = Vec::with_capacity(rows.len());
    for row in rows {
        let Some(delivery_time_segment) = DeliveryTimeSegment::from_minutes(row.delivery_time_minutes)
        else {
            debug!(delivery_id = %row.delivery_id, minutes = row.delivery_time_minutes, "dropping delivery with non-positive duration");
            invalid += 1;
            continue;
        };

        cleaned.push(CleanDelivery {
            delivery_time_segment,
            rating_category: RatingCategory::from_rating(row.delivery_rating),
            delivery_id: row.delivery_id,
            order_id: row.order_id,
            customer_id: row.customer_id,
            order_date_time: row.order_date_time,
            delivery_date_time: row.delivery_date_time,
            delivery_time_minutes: row.delivery_time_minutes,
            is_on_time: row.is_on_time,
            delivery_partner_id: row.delivery_partner_id,
            delivery_rating: row.delivery_rating,
            city: row.city,
            area: row.area,
            delivery_status: row.delivery_status,
        });
    }

    Cleaned {
        stats: StepStats {
            rows_in,
            duplicates,
            invalid,
            rows_out: cleaned.len() as u64,
            ..StepStats::default()
        },
        rows: cleaned,
    }
}

fn filled(value: Option<String>, sentinel: &str) -> String {
    match value {
        Some(value) if !value.trim().is_empty() => value,
        _ => sentinel.to_string(),
    }
}

/// Upper-case the first letter of every alphabetic run and lower-case the rest.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_word = false;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}
