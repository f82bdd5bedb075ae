//! Weighted sampling used by the order and delivery generators.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike, Weekday};
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;

use quickcart_core::GeneratorSettings;

use crate::errors::GenerationError;

/// Items per basket and their weights.
pub const ITEM_COUNT_WEIGHTS: [(u32, f64); 8] = [
    (1, 0.30),
    (2, 0.25),
    (3, 0.20),
    (4, 0.12),
    (5, 0.08),
    (6, 0.03),
    (7, 0.01),
    (8, 0.01),
];

/// Delivery duration in minutes and its weight; 19..=25 never occur.
pub const DELIVERY_MINUTE_WEIGHTS: [(i64, f64); 18] = [
    (8, 0.05),
    (9, 0.08),
    (10, 0.12),
    (11, 0.15),
    (12, 0.18),
    (13, 0.15),
    (14, 0.12),
    (15, 0.08),
    (16, 0.04),
    (17, 0.02),
    (18, 0.01),
    (19, 0.0),
    (20, 0.0),
    (21, 0.0),
    (22, 0.0),
    (23, 0.0),
    (24, 0.0),
    (25, 0.0),
];

/// Discount rates, drawn uniformly (so no discount 40% of the time).
pub const DISCOUNT_RATES: [f64; 5] = [0.0, 0.0, 0.05, 0.10, 0.15];

pub const QUANTITY_RANGE: std::ops::RangeInclusive<u32> = 1..=3;

/// First hour of the non-peak uniform fallback.
pub const OPEN_HOUR: u32 = 6;
pub const CLOSE_HOUR: u32 = 23;

pub const ON_TIME_RATINGS: [i64; 6] = [4, 4, 5, 5, 5, 3];
pub const LATE_RATINGS: [i64; 4] = [2, 3, 3, 4];

/// Discrete distribution over a fixed set of outcomes.
#[derive(Debug, Clone)]
pub struct Discrete<T> {
    outcomes: Vec<T>,
    weights: Vec<f64>,
    index: WeightedIndex<f64>,
}

impl<T: Copy> Discrete<T> {
    pub fn new(pairs: &[(T, f64)]) -> Result<Self, GenerationError> {
        let outcomes: Vec<T> = pairs.iter().map(|(outcome, _)| *outcome).collect();
        let weights: Vec<f64> = pairs.iter().map(|(_, weight)| *weight).collect();
        let index = WeightedIndex::new(&weights)
            .map_err(|err| GenerationError::InvalidConfig(format!("invalid weights: {err}")))?;
        Ok(Self {
            outcomes,
            weights,
            index,
        })
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        self.outcomes[self.index.sample(rng)]
    }

    /// Total probability of the outcomes matching `predicate`.
    pub fn probability(&self, predicate: impl Fn(T) -> bool) -> f64 {
        let total: f64 = self.weights.iter().sum();
        let matched: f64 = self
            .outcomes
            .iter()
            .zip(&self.weights)
            .filter(|(outcome, _)| predicate(**outcome))
            .map(|(_, weight)| *weight)
            .sum();
        matched / total
    }

    pub fn outcomes(&self) -> &[T] {
        &self.outcomes
    }
}

/// Distributions shared by one generation run.
#[derive(Debug, Clone)]
pub struct Distributions {
    pub item_count: Discrete<u32>,
    pub delivery_minutes: Discrete<i64>,
}

impl Distributions {
    pub fn standard() -> Result<Self, GenerationError> {
        Ok(Self {
            item_count: Discrete::new(&ITEM_COUNT_WEIGHTS)?,
            delivery_minutes: Discrete::new(&DELIVERY_MINUTE_WEIGHTS)?,
        })
    }
}

pub fn pick<'a, T, R: Rng + ?Sized>(values: &'a [T], rng: &mut R) -> &'a T {
    &values[rng.random_range(0..values.len())]
}

/// Uniform date in `[start, end]`.
pub fn sample_date<R: Rng + ?Sized>(start: NaiveDate, end: NaiveDate, rng: &mut R) -> NaiveDate {
    let span = (end - start).num_days().max(0);
    start + Duration::days(rng.random_range(0..=span))
}

/// Hour of day: a peak hour with the configured probability, otherwise
/// uniform over opening hours.
pub fn sample_hour<R: Rng + ?Sized>(settings: &GeneratorSettings, rng: &mut R) -> u32 {
    if rng.random_bool(settings.peak_hour_probability) {
        *pick(&settings.peak_hours, rng)
    } else {
        rng.random_range(OPEN_HOUR..=CLOSE_HOUR)
    }
}

/// Order timestamp within the configured date range.
///
/// Returns `None` when the sampled moment falls on a weekend and is dropped
/// by weekend downsampling.
pub fn sample_order_timestamp<R: Rng + ?Sized>(
    settings: &GeneratorSettings,
    rng: &mut R,
) -> Option<NaiveDateTime> {
    let start = settings.start_date.and_time(chrono::NaiveTime::MIN);
    let span_secs = ((settings.end_date - settings.start_date).num_days() + 1) * 86_400;
    let moment = start + Duration::seconds(rng.random_range(0..span_secs));

    if is_weekend(moment.weekday()) && rng.random_bool(settings.weekend_skip_probability) {
        return None;
    }

    let hour = sample_hour(settings, rng);
    let minute = rng.random_range(0..60);
    moment.with_hour(hour).and_then(|moment| moment.with_minute(minute))
}

pub fn is_weekend(day: Weekday) -> bool {
    matches!(day, Weekday::Sat | Weekday::Sun)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn standard_weights_are_valid() {
        let dist = Distributions::standard().expect("distributions");
        let on_time = dist.delivery_minutes.probability(|minutes| minutes <= 15);
        assert!((on_time - 0.93).abs() < 1e-9);
        assert_eq!(dist.item_count.outcomes().len(), 8);
    }

    #[test]
    fn samples_stay_within_bounds() {
        let dist = Distributions::standard().expect("distributions");
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..5000 {
            let items = dist.item_count.sample(&mut rng);
            assert!((1..=8).contains(&items));
            let minutes = dist.delivery_minutes.sample(&mut rng);
            assert!((8..=18).contains(&minutes), "zero-weight minute {minutes}");
        }
    }

    #[test]
    fn on_time_rate_approximates_distribution() {
        let dist = Distributions::standard().expect("distributions");
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let draws = 50_000;
        let on_time = (0..draws)
            .filter(|_| dist.delivery_minutes.sample(&mut rng) <= 15)
            .count();
        let rate = on_time as f64 / draws as f64;
        assert!((rate - 0.93).abs() < 0.01, "on-time rate {rate}");
    }

    #[test]
    fn timestamps_respect_range_and_hours() {
        let settings = GeneratorSettings::default();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut kept = 0;
        for _ in 0..5000 {
            let Some(moment) = sample_order_timestamp(&settings, &mut rng) else {
                continue;
            };
            kept += 1;
            assert!(moment.date() >= settings.start_date);
            assert!(moment.date() <= settings.end_date);
            assert!(moment.hour() >= OPEN_HOUR && moment.hour() <= CLOSE_HOUR);
        }
        assert!(kept > 4000 && kept < 5000, "kept {kept}");
    }

    #[test]
    fn peak_hours_dominate() {
        let settings = GeneratorSettings::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let draws = 20_000;
        let peak = (0..draws)
            .filter(|_| settings.peak_hours.contains(&sample_hour(&settings, &mut rng)))
            .count();
        // 0.6 + 0.4 * 7/18
        let rate = peak as f64 / draws as f64;
        assert!((rate - 0.7556).abs() < 0.02, "peak rate {rate}");
    }

    #[test]
    fn weekend_downsampling_can_be_disabled() {
        let mut settings = GeneratorSettings::default();
        settings.weekend_skip_probability = 0.0;
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        assert!((0..1000).all(|_| sample_order_timestamp(&settings, &mut rng).is_some()));
    }
}
