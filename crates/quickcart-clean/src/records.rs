//! Processed row shapes.
//!
//! Each cleaned table keeps every raw column in its raw order and appends the
//! derived columns, so a processed file can be fed back to the cleaner.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use quickcart_core::fields;
use quickcart_core::{
    CustomerSegment, DeliveryTimeSegment, OrderStatus, OrderValueSegment, PaymentMethod,
    RatingCategory, StockStatus, TimeSegment,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CleanProduct {
    #[serde(rename = "ProductID")]
    pub product_id: String,
    pub product_name: String,
    pub category: String,
    pub sub_category: String,
    pub brand: String,
    pub price: f64,
    pub cost_price: f64,
    pub profit_margin: f64,
    pub stock_quantity: i64,
    pub min_stock_level: i64,
    #[serde(deserialize_with = "fields::flexible_bool")]
    pub is_active: bool,
    pub stock_status: StockStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CleanOrder {
    #[serde(rename = "OrderID")]
    pub order_id: String,
    #[serde(rename = "CustomerID")]
    pub customer_id: String,
    #[serde(with = "fields::timestamp")]
    pub order_date_time: NaiveDateTime,
    #[serde(with = "fields::date")]
    pub order_date: NaiveDate,
    #[serde(with = "fields::time")]
    pub order_time: NaiveTime,
    pub order_hour: u32,
    pub day_of_week: String,
    #[serde(deserialize_with = "fields::flexible_bool")]
    pub is_weekend: bool,
    pub num_items: u32,
    pub subtotal: f64,
    pub delivery_fee: f64,
    pub discount: f64,
    pub total_amount: f64,
    pub payment_method: PaymentMethod,
    pub order_status: OrderStatus,
    pub city: String,
    pub area: String,
    #[serde(deserialize_with = "fields::flexible_bool")]
    pub is_repeat_customer: bool,
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub quarter: u32,
    /// ISO 8601 week number.
    pub week_of_year: u32,
    pub time_segment: TimeSegment,
    pub order_value_segment: OrderValueSegment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CleanDelivery {
    #[serde(rename = "DeliveryID")]
    pub delivery_id: String,
    #[serde(rename = "OrderID")]
    pub order_id: String,
    #[serde(rename = "CustomerID")]
    pub customer_id: String,
    #[serde(with = "fields::timestamp")]
    pub order_date_time: NaiveDateTime,
    #[serde(with = "fields::timestamp")]
    pub delivery_date_time: NaiveDateTime,
    pub delivery_time_minutes: i64,
    #[serde(deserialize_with = "fields::flexible_bool")]
    pub is_on_time: bool,
    #[serde(rename = "DeliveryPartnerID")]
    pub delivery_partner_id: String,
    pub delivery_rating: i64,
    pub city: String,
    pub area: String,
    pub delivery_status: String,
    pub delivery_time_segment: DeliveryTimeSegment,
    /// Missing when the rating is outside 1..=5.
    pub rating_category: Option<RatingCategory>,
}

/// One row of `master_dataset.csv`: a cleaned order with its delivery and
/// customer attributes. Orders without a delivery or a known customer keep
/// those columns empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MasterRecord {
    #[serde(rename = "OrderID")]
    pub order_id: String,
    #[serde(rename = "CustomerID")]
    pub customer_id: String,
    #[serde(with = "fields::timestamp")]
    pub order_date_time: NaiveDateTime,
    #[serde(with = "fields::date")]
    pub order_date: NaiveDate,
    #[serde(with = "fields::time")]
    pub order_time: NaiveTime,
    pub order_hour: u32,
    pub day_of_week: String,
    #[serde(deserialize_with = "fields::flexible_bool")]
    pub is_weekend: bool,
    pub num_items: u32,
    pub subtotal: f64,
    pub delivery_fee: f64,
    pub discount: f64,
    pub total_amount: f64,
    pub payment_method: PaymentMethod,
    pub order_status: OrderStatus,
    pub city: String,
    pub area: String,
    #[serde(deserialize_with = "fields::flexible_bool")]
    pub is_repeat_customer: bool,
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub quarter: u32,
    pub week_of_year: u32,
    pub time_segment: TimeSegment,
    pub order_value_segment: OrderValueSegment,
    pub delivery_time_minutes: Option<i64>,
    pub is_on_time: Option<bool>,
    pub delivery_rating: Option<i64>,
    #[serde(rename = "DeliveryPartnerID")]
    pub delivery_partner_id: Option<String>,
    pub delivery_time_segment: Option<DeliveryTimeSegment>,
    pub rating_category: Option<RatingCategory>,
    pub name: Option<String>,
    #[serde(rename = "City_customer")]
    pub city_customer: Option<String>,
    pub customer_segment: Option<CustomerSegment>,
    #[serde(default, with = "fields::option_date")]
    pub registration_date: Option<NaiveDate>,
}
