use fake::Fake;
use fake::faker::address::en::{CitySuffix, PostCode};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;
use rand::Rng;

use quickcart_core::{Customer, CustomerSegment, GeneratorSettings, PaymentMethod};

use crate::sampling::{pick, sample_date};

pub const CITIES: [&str; 10] = [
    "Delhi",
    "Mumbai",
    "Bangalore",
    "Hyderabad",
    "Pune",
    "Chennai",
    "Kolkata",
    "Ahmedabad",
    "Jaipur",
    "Lucknow",
];

const ACTIVE_PROBABILITY: f64 = 0.75;

pub fn generate_customers<R: Rng + ?Sized>(
    settings: &GeneratorSettings,
    rng: &mut R,
) -> Vec<Customer> {
    (0..settings.customers)
        .map(|index| {
            let name: String = Name().fake_with_rng(rng);
            let email: String = SafeEmail().fake_with_rng(rng);
            let phone: String = PhoneNumber().fake_with_rng(rng);
            let area: String = CitySuffix().fake_with_rng(rng);
            let pincode: String = PostCode().fake_with_rng(rng);
            Customer {
                customer_id: format!("CUST{:05}", index + 1),
                name,
                email: Some(email),
                phone: Some(phone),
                city: pick(&CITIES, rng).to_string(),
                area,
                pincode,
                registration_date: sample_date(settings.start_date, settings.end_date, rng),
                customer_segment: *pick(&CustomerSegment::ALL, rng),
                preferred_payment_method: *pick(&PaymentMethod::ALL, rng),
                is_active: rng.random_bool(ACTIVE_PROBABILITY),
            }
        })
        .collect()
}
