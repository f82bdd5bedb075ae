use std::collections::HashSet;

use quickcart_core::{Customer, StockStatus};

use crate::model::{
    CleaningSummary, CustomerSummary, DeliverySummary, ProductSummary, SalesSummary,
};
use crate::records::{CleanDelivery, CleanOrder, CleanProduct};

/// Compute the data quality figures over the cleaned tables.
pub fn summarize(
    customers: &[Customer],
    products: &[CleanProduct],
    orders: &[CleanOrder],
    deliveries: &[CleanDelivery],
) -> CleaningSummary {
    let unique_cities: HashSet<&str> = customers.iter().map(|row| row.city.as_str()).collect();
    let categories: HashSet<&str> = products.iter().map(|row| row.category.as_str()).collect();
    let on_time = deliveries.iter().filter(|row| row.is_on_time).count() as u64;

    CleaningSummary {
        customers: CustomerSummary {
            total: customers.len() as u64,
            active: customers.iter().filter(|row| row.is_active).count() as u64,
            unique_cities: unique_cities.len() as u64,
        },
        products: ProductSummary {
            total: products.len() as u64,
            active: products.iter().filter(|row| row.is_active).count() as u64,
            categories: categories.len() as u64,
            out_of_stock: products
                .iter()
                .filter(|row| row.stock_status == StockStatus::OutOfStock)
                .count() as u64,
        },
        sales: SalesSummary {
            total: orders.len() as u64,
            completed: orders
                .iter()
                .filter(|row| row.order_status.is_completed())
                .count() as u64,
            revenue: orders.iter().map(|row| row.total_amount).sum(),
            average_order_value: mean(orders.iter().map(|row| row.total_amount)),
            first_order_date: orders.iter().map(|row| row.order_date).min(),
            last_order_date: orders.iter().map(|row| row.order_date).max(),
        },
        deliveries: DeliverySummary {
            total: deliveries.len() as u64,
            on_time,
            on_time_rate: ratio(on_time, deliveries.len() as u64),
            average_minutes: mean(
                deliveries
                    .iter()
                    .map(|row| row.delivery_time_minutes as f64),
            ),
            average_rating: mean(deliveries.iter().map(|row| row.delivery_rating as f64)),
        },
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0_u64), |(sum, count), value| (sum + value, count + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}

fn ratio(part: u64, total: u64) -> f64 {
    if total == 0 { 0.0 } else { part as f64 / total as f64 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tables_summarize_to_zero() {
        let summary = summarize(&[], &[], &[], &[]);
        assert_eq!(summary, CleaningSummary::default());
    }

    #[test]
    fn ratio_and_mean_handle_counts() {
        assert_eq!(ratio(93, 100), 0.93);
        assert_eq!(mean([1.0, 2.0, 6.0].into_iter()), 3.0);
    }
}
