use fake::Fake;
use fake::faker::company::en::CompanyName;
use rand::Rng;

use quickcart_core::{GeneratorSettings, Product, round_currency};

use crate::sampling::pick;

/// A catalog category with its item names and price/margin bands.
#[derive(Debug, Clone, Copy)]
pub struct Category {
    pub name: &'static str,
    pub items: &'static [&'static str],
    pub price: (f64, f64),
    /// Margin as a fraction of price.
    pub margin: (f64, f64),
}

pub const CATEGORIES: [Category; 6] = [
    Category {
        name: "Dairy & Breakfast",
        items: &["Milk", "Bread", "Butter", "Cheese", "Eggs", "Yogurt"],
        price: (20.0, 200.0),
        margin: (0.15, 0.25),
    },
    Category {
        name: "Fruits & Vegetables",
        items: &["Apple", "Banana", "Tomato", "Onion", "Potato", "Carrot"],
        price: (30.0, 300.0),
        margin: (0.20, 0.35),
    },
    Category {
        name: "Snacks & Beverages",
        items: &["Chips", "Biscuits", "Soft Drink", "Juice", "Coffee", "Tea"],
        price: (30.0, 300.0),
        margin: (0.20, 0.35),
    },
    Category {
        name: "Personal Care",
        items: &["Shampoo", "Soap", "Toothpaste", "Face Wash", "Lotion"],
        price: (50.0, 500.0),
        margin: (0.25, 0.40),
    },
    Category {
        name: "Household",
        items: &["Detergent", "Cleaner", "Tissue", "Garbage Bags", "Dishwash"],
        price: (30.0, 300.0),
        margin: (0.20, 0.35),
    },
    Category {
        name: "Packaged Food",
        items: &["Rice", "Atta", "Dal", "Oil", "Spices", "Noodles"],
        price: (30.0, 300.0),
        margin: (0.20, 0.35),
    },
];

const STOCK_RANGE: std::ops::RangeInclusive<i64> = 50..=1000;
const MIN_STOCK_RANGE: std::ops::RangeInclusive<i64> = 20..=100;
const ACTIVE_PROBABILITY: f64 = 0.8;

/// Generate `products / 6` products for each category, in category order.
pub fn generate_products<R: Rng + ?Sized>(
    settings: &GeneratorSettings,
    rng: &mut R,
) -> Vec<Product> {
    let per_category = settings.products_per_category(CATEGORIES.len());
    let mut products = Vec::with_capacity(per_category * CATEGORIES.len());

    for category in &CATEGORIES {
        for _ in 0..per_category {
            let item = *pick(category.items, rng);
            let brand = brand_name(rng);
            let price = round_currency(rng.random_range(category.price.0..=category.price.1));
            let margin = rng.random_range(category.margin.0..=category.margin.1);

            products.push(Product {
                product_id: format!("PROD{:04}", products.len() + 1),
                product_name: format!("{brand} {item}"),
                category: category.name.to_string(),
                sub_category: item.to_string(),
                brand,
                price,
                cost_price: round_currency(price * (1.0 - margin)),
                profit_margin: round_currency(margin * 100.0),
                stock_quantity: Some(rng.random_range(STOCK_RANGE)),
                min_stock_level: Some(rng.random_range(MIN_STOCK_RANGE)),
                is_active: rng.random_bool(ACTIVE_PROBABILITY),
            });
        }
    }

    products
}

/// First word of a company name, without trailing punctuation.
fn brand_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let company: String = CompanyName().fake_with_rng(rng);
    company
        .split_whitespace()
        .next()
        .map(|word| word.trim_end_matches(|ch: char| !ch.is_alphanumeric()))
        .filter(|word| !word.is_empty())
        .unwrap_or("Generic")
        .to_string()
}
