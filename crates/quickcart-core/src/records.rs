use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::fields;

/// Marketing segment assigned to a customer at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CustomerSegment {
    Premium,
    Regular,
    Occasional,
    New,
}

impl CustomerSegment {
    pub const ALL: [CustomerSegment; 4] = [
        CustomerSegment::Premium,
        CustomerSegment::Regular,
        CustomerSegment::Occasional,
        CustomerSegment::New,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Premium => "Premium",
            Self::Regular => "Regular",
            Self::Occasional => "Occasional",
            Self::New => "New",
        }
    }
}

impl fmt::Display for CustomerSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "UPI")]
    Upi,
    Card,
    Wallet,
    Cash,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Upi,
        PaymentMethod::Card,
        PaymentMethod::Wallet,
        PaymentMethod::Cash,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upi => "UPI",
            Self::Card => "Card",
            Self::Wallet => "Wallet",
            Self::Cash => "Cash",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn is_completed(self) -> bool {
        matches!(self, OrderStatus::Completed)
    }
}

/// Customer row as generated and as read back from `customer_data.csv`.
///
/// Contact fields may be missing in externally sourced files; the cleaner
/// fills them with sentinels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Customer {
    #[serde(rename = "CustomerID")]
    pub customer_id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub city: String,
    pub area: String,
    pub pincode: String,
    #[serde(with = "fields::date")]
    pub registration_date: NaiveDate,
    pub customer_segment: CustomerSegment,
    pub preferred_payment_method: PaymentMethod,
    #[serde(deserialize_with = "fields::flexible_bool")]
    pub is_active: bool,
}

/// Catalog row. `ProfitMargin` is a percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Product {
    #[serde(rename = "ProductID")]
    pub product_id: String,
    pub product_name: String,
    pub category: String,
    pub sub_category: String,
    pub brand: String,
    pub price: f64,
    pub cost_price: f64,
    pub profit_margin: f64,
    pub stock_quantity: Option<i64>,
    pub min_stock_level: Option<i64>,
    #[serde(deserialize_with = "fields::flexible_bool")]
    pub is_active: bool,
}

/// Sales row (`sales_data.csv`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Order {
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
}

/// Delivery row (`delivery_data.csv`), one per completed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Delivery {
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
}

/// Rounds a currency amount to cents.
pub fn round_currency(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `(price - cost) / price` as a percentage rounded to two decimals.
pub fn profit_margin_pct(price: f64, cost_price: f64) -> f64 {
    round_currency((price - cost_price) / price * 100.0)
}
