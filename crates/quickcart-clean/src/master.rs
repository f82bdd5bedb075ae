use std::collections::HashMap;

use quickcart_core::Customer;

use crate::records::{CleanDelivery, CleanOrder, MasterRecord};

/// Left-join cleaned orders with their delivery (on `OrderID`) and their
/// customer (on `CustomerID`). Every order yields exactly one row.
pub fn build_master(
    orders: &[CleanOrder],
    deliveries: &[CleanDelivery],
    customers: &[Customer],
) -> Vec<MasterRecord> {
    // Reversed so the first delivery for an order wins.
    let deliveries_by_order: HashMap<&str, &CleanDelivery> = deliveries
        .iter()
        .rev()
        .map(|delivery| (delivery.order_id.as_str(), delivery))
        .collect();
    let customers_by_id: HashMap<&str, &Customer> = customers
        .iter()
        .map(|customer| (customer.customer_id.as_str(), customer))
        .collect();

    orders
        .iter()
        .map(|order| {
            let delivery = deliveries_by_order.get(order.order_id.as_str()).copied();
            let customer = customers_by_id.get(order.customer_id.as_str()).copied();
            MasterRecord {
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
                year: order.year,
                month: order.month,
                month_name: order.month_name.clone(),
                quarter: order.quarter,
                week_of_year: order.week_of_year,
                time_segment: order.time_segment,
                order_value_segment: order.order_value_segment,
                delivery_time_minutes: delivery.map(|d| d.delivery_time_minutes),
                is_on_time: delivery.map(|d| d.is_on_time),
                delivery_rating: delivery.map(|d| d.delivery_rating),
                delivery_partner_id: delivery.map(|d| d.delivery_partner_id.clone()),
                delivery_time_segment: delivery.map(|d| d.delivery_time_segment),
                rating_category: delivery.and_then(|d| d.rating_category),
                name: customer.map(|c| c.name.clone()),
                city_customer: customer.map(|c| c.city.clone()),
                customer_segment: customer.map(|c| c.customer_segment),
                registration_date: customer.map(|c| c.registration_date),
            }
        })
        .collect()
}
