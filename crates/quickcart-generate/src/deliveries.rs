use chrono::Duration;
use rand::Rng;

use quickcart_core::{Delivery, GeneratorSettings, Order};

use crate::sampling::{Distributions, LATE_RATINGS, ON_TIME_RATINGS, pick};

pub const DELIVERED: &str = "Delivered";

/// One delivery per completed order, in order sequence.
pub fn generate_deliveries<R: Rng + ?Sized>(
    settings: &GeneratorSettings,
    orders: &[Order],
    distributions: &Distributions,
    rng: &mut R,
) -> Vec<Delivery> {
    orders
        .iter()
        .filter(|order| order.order_status.is_completed())
        .map(|order| {
            let minutes = distributions.delivery_minutes.sample(rng);
            let is_on_time = minutes <= settings.on_time_minutes;
            let partner = rng.random_range(1..=settings.delivery_partners);
            let rating = if is_on_time {
                *pick(&ON_TIME_RATINGS, rng)
            } else {
                *pick(&LATE_RATINGS, rng)
            };

            Delivery {
                delivery_id: delivery_id_for(&order.order_id),
                order_id: order.order_id.clone(),
                customer_id: order.customer_id.clone(),
                order_date_time: order.order_date_time,
                delivery_date_time: order.order_date_time + Duration::minutes(minutes),
                delivery_time_minutes: minutes,
                is_on_time,
                delivery_partner_id: format!("DP{partner:03}"),
                delivery_rating: rating,
                city: order.city.clone(),
                area: order.area.clone(),
                delivery_status: DELIVERED.to_string(),
            }
        })
        .collect()
}

/// `ORD000123` becomes `DEL000123`.
pub fn delivery_id_for(order_id: &str) -> String {
    let digits = order_id.strip_prefix("ORD").unwrap_or(order_id);
    format!("DEL{digits}")
}
