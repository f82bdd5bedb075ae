//! Derived categorical columns and their fixed bin boundaries.
//!
//! Numeric bins are right-inclusive: a value on an edge belongs to the lower
//! bucket, and values at or below zero fall outside every bucket.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! label_enum {
    ($name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

label_enum!(OrderValueSegment {
    Small => "Small",
    Medium => "Medium",
    Large => "Large",
    ExtraLarge => "Extra Large",
});

label_enum!(DeliveryTimeSegment {
    VeryFast => "Very Fast",
    Fast => "Fast",
    Normal => "Normal",
    Slow => "Slow",
});

label_enum!(RatingCategory {
    Poor => "Poor",
    Average => "Average",
    Good => "Good",
    Excellent => "Excellent",
});

label_enum!(StockStatus {
    OutOfStock => "Out of Stock",
    LowStock => "Low Stock",
    InStock => "In Stock",
});

label_enum!(TimeSegment {
    Morning => "Morning",
    Afternoon => "Afternoon",
    Evening => "Evening",
    Night => "Night",
});

impl OrderValueSegment {
    pub fn from_total(total: f64) -> Option<Self> {
        if total.is_nan() || total <= 0.0 {
            None
        } else if total <= 200.0 {
            Some(Self::Small)
        } else if total <= 500.0 {
            Some(Self::Medium)
        } else if total <= 1000.0 {
            Some(Self::Large)
        } else {
            Some(Self::ExtraLarge)
        }
    }
}

impl DeliveryTimeSegment {
    pub fn from_minutes(minutes: i64) -> Option<Self> {
        match minutes {
            i64::MIN..=0 => None,
            1..=10 => Some(Self::VeryFast),
            11..=15 => Some(Self::Fast),
            16..=20 => Some(Self::Normal),
            _ => Some(Self::Slow),
        }
    }
}

impl RatingCategory {
    /// Ratings outside 1..=5 have no category.
    pub fn from_rating(rating: i64) -> Option<Self> {
        match rating {
            1..=2 => Some(Self::Poor),
            3 => Some(Self::Average),
            4 => Some(Self::Good),
            5 => Some(Self::Excellent),
            _ => None,
        }
    }
}

impl StockStatus {
    pub fn from_levels(quantity: i64, min_level: i64) -> Self {
        if quantity == 0 {
            Self::OutOfStock
        } else if quantity < min_level {
            Self::LowStock
        } else {
            Self::InStock
        }
    }
}

impl TimeSegment {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..=11 => Self::Morning,
            12..=16 => Self::Afternoon,
            17..=20 => Self::Evening,
            _ => Self::Night,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_value_edges_are_right_inclusive() {
        assert_eq!(OrderValueSegment::from_total(0.0), None);
        assert_eq!(OrderValueSegment::from_total(0.01), Some(OrderValueSegment::Small));
        assert_eq!(OrderValueSegment::from_total(200.0), Some(OrderValueSegment::Small));
        assert_eq!(OrderValueSegment::from_total(200.01), Some(OrderValueSegment::Medium));
        assert_eq!(OrderValueSegment::from_total(1000.0), Some(OrderValueSegment::Large));
        assert_eq!(
            OrderValueSegment::from_total(1000.5),
            Some(OrderValueSegment::ExtraLarge)
        );
    }

    #[test]
    fn delivery_time_buckets() {
        assert_eq!(DeliveryTimeSegment::from_minutes(0), None);
        assert_eq!(DeliveryTimeSegment::from_minutes(10), Some(DeliveryTimeSegment::VeryFast));
        assert_eq!(DeliveryTimeSegment::from_minutes(15), Some(DeliveryTimeSegment::Fast));
        assert_eq!(DeliveryTimeSegment::from_minutes(20), Some(DeliveryTimeSegment::Normal));
        assert_eq!(DeliveryTimeSegment::from_minutes(21), Some(DeliveryTimeSegment::Slow));
    }

    #[test]
    fn rating_outside_scale_has_no_category() {
        assert_eq!(RatingCategory::from_rating(0), None);
        assert_eq!(RatingCategory::from_rating(1), Some(RatingCategory::Poor));
        assert_eq!(RatingCategory::from_rating(3), Some(RatingCategory::Average));
        assert_eq!(RatingCategory::from_rating(5), Some(RatingCategory::Excellent));
        assert_eq!(RatingCategory::from_rating(6), None);
    }

    #[test]
    fn stock_status_prefers_out_of_stock() {
        assert_eq!(StockStatus::from_levels(0, 0), StockStatus::OutOfStock);
        assert_eq!(StockStatus::from_levels(19, 20), StockStatus::LowStock);
        assert_eq!(StockStatus::from_levels(20, 20), StockStatus::InStock);
    }

    #[test]
    fn time_segments_cover_the_day() {
        assert_eq!(TimeSegment::from_hour(5), TimeSegment::Night);
        assert_eq!(TimeSegment::from_hour(6), TimeSegment::Morning);
        assert_eq!(TimeSegment::from_hour(12), TimeSegment::Afternoon);
        assert_eq!(TimeSegment::from_hour(17), TimeSegment::Evening);
        assert_eq!(TimeSegment::from_hour(21), TimeSegment::Night);
        assert_eq!(StockStatus::LowStock.to_string(), "Low Stock");
    }
}
