use std::collections::HashMap;

use chrono::{Datelike, Timelike};
use rand::Rng;
use rand::seq::IndexedRandom;

use quickcart_core::{Customer, GeneratorSettings, Order, OrderStatus, Product, round_currency};

use crate::errors::GenerationError;
use crate::sampling::{
    DISCOUNT_RATES, Distributions, QUANTITY_RANGE, is_weekend, pick, sample_order_timestamp,
};

const COMPLETED_PROBABILITY: f64 = 0.75;

/// Delivery fee rule applied to every basket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingRules {
    /// Subtotals strictly above this ship for free.
    pub free_delivery_threshold: f64,
    pub delivery_fee: f64,
}

impl From<&GeneratorSettings> for PricingRules {
    fn from(settings: &GeneratorSettings) -> Self {
        Self {
            free_delivery_threshold: settings.free_delivery_threshold,
            delivery_fee: settings.delivery_fee,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pricing {
    pub subtotal: f64,
    pub delivery_fee: f64,
    pub discount: f64,
    pub total_amount: f64,
}

/// Apply the delivery fee and discount to a basket subtotal.
pub fn price_basket(subtotal: f64, discount_rate: f64, rules: &PricingRules) -> Pricing {
    let subtotal = round_currency(subtotal);
    let delivery_fee = if subtotal > rules.free_delivery_threshold {
        0.0
    } else {
        rules.delivery_fee
    };
    let discount = round_currency(subtotal * discount_rate);
    Pricing {
        subtotal,
        delivery_fee,
        discount,
        total_amount: round_currency(subtotal + delivery_fee - discount),
    }
}

/// Orders kept after weekend downsampling.
#[derive(Debug, Clone)]
pub struct OrderBatch {
    pub orders: Vec<Order>,
    pub attempted: u64,
    pub weekend_skipped: u64,
}

pub fn generate_orders<R: Rng + ?Sized>(
    settings: &GeneratorSettings,
    customers: &[Customer],
    products: &[Product],
    distributions: &Distributions,
    rng: &mut R,
) -> Result<OrderBatch, GenerationError> {
    if customers.is_empty() || products.is_empty() {
        return Err(GenerationError::InvalidConfig(
            "orders need at least one customer and one product".to_string(),
        ));
    }

    let rules = PricingRules::from(settings);
    let mut orders = Vec::with_capacity(settings.orders as usize);
    let mut weekend_skipped = 0_u64;

    for index in 0..settings.orders {
        let Some(moment) = sample_order_timestamp(settings, rng) else {
            weekend_skipped += 1;
            continue;
        };

        let customer = pick(customers, rng);
        let wanted = distributions.item_count.sample(rng) as usize;
        let basket: Vec<&Product> = products
            .choose_multiple(rng, wanted.min(products.len()))
            .collect();
        let subtotal: f64 = basket
            .iter()
            .map(|product| product.price * f64::from(rng.random_range(QUANTITY_RANGE)))
            .sum();
        let pricing = price_basket(subtotal, *pick(&DISCOUNT_RATES, rng), &rules);
        let order_status = if rng.random_bool(COMPLETED_PROBABILITY) {
            OrderStatus::Completed
        } else {
            OrderStatus::Cancelled
        };

        orders.push(Order {
            order_id: format!("ORD{:06}", index + 1),
            customer_id: customer.customer_id.clone(),
            order_date_time: moment,
            order_date: moment.date(),
            order_time: moment.time(),
            order_hour: moment.hour(),
            day_of_week: moment.format("%A").to_string(),
            is_weekend: is_weekend(moment.weekday()),
            num_items: basket.len() as u32,
            subtotal: pricing.subtotal,
            delivery_fee: pricing.delivery_fee,
            discount: pricing.discount,
            total_amount: pricing.total_amount,
            payment_method: customer.preferred_payment_method,
            order_status,
            city: customer.city.clone(),
            area: customer.area.clone(),
            is_repeat_customer: false,
        });
    }

    mark_repeat_customers(&mut orders);

    Ok(OrderBatch {
        orders,
        attempted: u64::from(settings.orders),
        weekend_skipped,
    })
}

/// Flag orders whose customer placed more than one order.
pub fn mark_repeat_customers(orders: &mut [Order]) {
    let mut counts: HashMap<String, u32> = HashMap::new();
    for order in orders.iter() {
        *counts.entry(order.customer_id.clone()).or_insert(0) += 1;
    }
    for order in orders.iter_mut() {
        order.is_repeat_customer = counts.get(&order.customer_id).copied().unwrap_or(0) > 1;
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::customers::generate_customers;
    use crate::products::generate_products;

    fn rules() -> PricingRules {
        PricingRules::from(&GeneratorSettings::default())
    }

    #[test]
    fn small_basket_pays_delivery() {
        let pricing = price_basket(150.0, 0.0, &rules());
        assert_eq!(pricing.delivery_fee, 20.0);
        assert_eq!(pricing.discount, 0.0);
        assert_eq!(pricing.total_amount, 170.0);
    }

    #[test]
    fn large_basket_ships_free_with_discount() {
        let pricing = price_basket(250.0, 0.10, &rules());
        assert_eq!(pricing.delivery_fee, 0.0);
        assert_eq!(pricing.discount, 25.0);
        assert_eq!(pricing.total_amount, 225.0);
    }

    #[test]
    fn threshold_itself_still_pays_delivery() {
        let pricing = price_basket(200.0, 0.0, &rules());
        assert_eq!(pricing.delivery_fee, 20.0);
        assert_eq!(pricing.total_amount, 220.0);
    }

    #[test]
    fn orders_are_consistent_with_their_inputs() {
        let mut settings = GeneratorSettings::default();
        settings.customers = 40;
        settings.orders = 500;
        let distributions = Distributions::standard().expect("distributions");
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let customers = generate_customers(&settings, &mut rng);
        let products = generate_products(&settings, &mut rng);

        let batch = generate_orders(&settings, &customers, &products, &distributions, &mut rng)
            .expect("generate orders");
        assert_eq!(
            batch.orders.len() as u64 + batch.weekend_skipped,
            batch.attempted
        );

        for order in &batch.orders {
            assert!(order.total_amount > 0.0);
            assert!((1..=8).contains(&order.num_items));
            assert_eq!(order.order_date, order.order_date_time.date());
            assert_eq!(order.order_hour, order.order_date_time.hour());
            let customer = customers
                .iter()
                .find(|customer| customer.customer_id == order.customer_id)
                .expect("customer exists");
            assert_eq!(order.payment_method, customer.preferred_payment_method);
            assert_eq!(order.city, customer.city);
            let expected_fee = if order.subtotal > 200.0 { 0.0 } else { 20.0 };
            assert_eq!(order.delivery_fee, expected_fee);
        }
        // 40 customers sharing ~450 orders always repeat
        assert!(batch.orders.iter().all(|order| order.is_repeat_customer));
    }

    #[test]
    fn repeat_flag_requires_two_orders() {
        let mut settings = GeneratorSettings::default();
        settings.customers = 3;
        settings.orders = 1;
        settings.weekend_skip_probability = 0.0;
        let distributions = Distributions::standard().expect("distributions");
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let customers = generate_customers(&settings, &mut rng);
        let products = generate_products(&settings, &mut rng);

        let batch = generate_orders(&settings, &customers, &products, &distributions, &mut rng)
            .expect("generate orders");
        assert_eq!(batch.orders.len(), 1);
        assert!(!batch.orders[0].is_repeat_customer);
    }
}
