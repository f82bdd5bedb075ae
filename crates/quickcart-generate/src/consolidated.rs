use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use quickcart_core::fields;
use quickcart_core::{Delivery, Order, OrderStatus, PaymentMethod};

/// Order row left-joined with its delivery.
///
/// Delivery columns that collide with order columns carry a `_delivery`
/// suffix and are empty for orders without a delivery.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConsolidatedRecord {
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
    pub is_repeat_customer: bool,
    #[serde(rename = "DeliveryID")]
    pub delivery_id: Option<String>,
    #[serde(rename = "CustomerID_delivery")]
    pub customer_id_delivery: Option<String>,
    #[serde(rename = "OrderDateTime_delivery", with = "fields::option_timestamp")]
    pub order_date_time_delivery: Option<NaiveDateTime>,
    #[serde(with = "fields::option_timestamp")]
    pub delivery_date_time: Option<NaiveDateTime>,
    pub delivery_time_minutes: Option<i64>,
    pub is_on_time: Option<bool>,
    #[serde(rename = "DeliveryPartnerID")]
    pub delivery_partner_id: Option<String>,
    pub delivery_rating: Option<i64>,
    #[serde(rename = "City_delivery")]
    pub city_delivery: Option<String>,
    #[serde(rename = "Area_delivery")]
    pub area_delivery: Option<String>,
    pub delivery_status: Option<String>,
}

pub fn consolidate(orders: &[Order], deliveries: &[Delivery]) -> Vec<ConsolidatedRecord> {
    let by_order: HashMap<&str, &Delivery> = deliveries
        .iter()
        .map(|delivery| (delivery.order_id.as_str(), delivery))
        .collect();

    orders
        .iter()
        .map(|order| {
            let delivery = by_order.get(order.order_id.as_str()).copied();
            ConsolidatedRecord {
                order_id: order.order_id.clone(),
                customer_id: order.customer_id.clone(),
                order_date_time: order.order_date_time,
                order_date: order.order_date,
                order_time: order.order_time,
                order_hour: order.order_hour,
                day_of_week: order.day_of_week.clone(),
                is_weekend: order.is_weekend,
                num_items: order.num_items,
                subtotal: order.subtotal,
                delivery_fee: order.delivery_fee,
                discount: order.discount,
                total_amount: order.total_amount,
                payment_method: order.payment_method,
                order_status: order.order_status,
                city: order.city.clone(),
                area: order.area.clone(),
                is_repeat_customer: order.is_repeat_customer,
                delivery_id: delivery.map(|d| d.delivery_id.clone()),
                customer_id_delivery: delivery.map(|d| d.customer_id.clone()),
                order_date_time_delivery: delivery.map(|d| d.order_date_time),
                delivery_date_time: delivery.map(|d| d.delivery_date_time),
                delivery_time_minutes: delivery.map(|d| d.delivery_time_minutes),
                is_on_time: delivery.map(|d| d.is_on_time),
                delivery_partner_id: delivery.map(|d| d.delivery_partner_id.clone()),
                delivery_rating: delivery.map(|d| d.delivery_rating),
                city_delivery: delivery.map(|d| d.city.clone()),
                area_delivery: delivery.map(|d| d.area.clone()),
                delivery_status: delivery.map(|d| d.delivery_status.clone()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::customers::generate_customers;
    use crate::deliveries::generate_deliveries;
    use crate::orders::generate_orders;
    use crate::products::generate_products;
    use crate::sampling::Distributions;
    use quickcart_core::GeneratorSettings;

    #[test]
    fn every_order_appears_once_with_its_delivery() {
        let mut settings = GeneratorSettings::default();
        settings.customers = 20;
        settings.products = 12;
        settings.orders = 200;
        let distributions = Distributions::standard().expect("distributions");
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let customers = generate_customers(&settings, &mut rng);
        let products = generate_products(&settings, &mut rng);
        let orders = generate_orders(&settings, &customers, &products, &distributions, &mut rng)
            .expect("orders")
            .orders;
        let deliveries = generate_deliveries(&settings, &orders, &distributions, &mut rng);

        let rows = consolidate(&orders, &deliveries);
        assert_eq!(rows.len(), orders.len());
        for row in &rows {
            if row.order_status.is_completed() {
                let delivery_id = row.delivery_id.as_deref().expect("completed order delivered");
                assert_eq!(delivery_id, row.order_id.replacen("ORD", "DEL", 1));
                assert_eq!(row.customer_id_delivery.as_deref(), Some(row.customer_id.as_str()));
                assert_eq!(row.order_date_time_delivery, Some(row.order_date_time));
            } else {
                assert!(row.delivery_id.is_none());
                assert!(row.delivery_time_minutes.is_none());
            }
        }
    }
}
