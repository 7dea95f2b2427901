//! Read Queries and Cache Keys
//!
//! Each read endpoint maps to a [`ReadQuery`], which fixes its descriptor,
//! cache key, and ttl. The filtered query's parameters are sampled by the
//! server on every request.

use std::ops::RangeInclusive;

use rand::Rng;

use crate::store::{Comparator, Field, QueryDescriptor, Table};

/// Cache key for the top plants by production.
pub const HIGHEST_PRODUCTION_KEY: &str = "highest-production";
/// Cache key for the top products by purchases.
pub const MOST_PURCHASED_KEY: &str = "most-purchased-products";

/// TTL in seconds of the unfiltered top-N results.
pub const TOP_N_TTL_SECS: u64 = 5;
/// TTL in seconds of sampled-filter results.
pub const FILTER_TTL_SECS: u64 = 10;

/// Range the minimum `kw` is sampled from.
pub const KW_RANGE: RangeInclusive<i64> = 1..=10;
/// Baseline temperature the maximum `temp` is sampled around.
pub const TEMP_BASELINE: i64 = 25;
/// Maximum distance of the sampled `temp` from [`TEMP_BASELINE`].
pub const TEMP_SPREAD: i64 = 5;

// == Filter Sample ==
/// Filter parameters drawn by the server for one `/filter` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FilterSample {
    /// Minimum production
    pub kw: i64,
    /// Maximum temperature
    pub temp: i64,
}

impl FilterSample {
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            kw: rng.random_range(KW_RANGE),
            temp: rng.random_range(TEMP_BASELINE - TEMP_SPREAD..=TEMP_BASELINE + TEMP_SPREAD),
        }
    }

    /// Samples using the thread-local generator.
    pub fn random() -> Self {
        Self::sample(&mut rand::rng())
    }
}

// == Read Query ==
/// A logical read, independent of whether the cache is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadQuery {
    /// Top plants by `kw`
    HighestProduction,
    /// Top products by `purchases`
    MostPurchased,
    /// Plants with at least the sampled `kw` and at most the sampled `temp`,
    /// top by `kw`
    Filtered(FilterSample),
}

impl ReadQuery {
    pub fn descriptor(&self) -> QueryDescriptor {
        match *self {
            ReadQuery::HighestProduction => QueryDescriptor::new(Table::SolarPlants, Field::Kw),
            ReadQuery::MostPurchased => QueryDescriptor::new(Table::Products, Field::Purchases),
            ReadQuery::Filtered(FilterSample { kw, temp }) => {
                QueryDescriptor::new(Table::SolarPlants, Field::Kw)
                    .filter(Field::Kw, Comparator::Gte, kw as f64)
                    .filter(Field::Temp, Comparator::Lte, temp as f64)
            }
        }
    }

    /// Derives the cache key from the query's variable parts only.
    ///
    /// Unrelated queries with the same variable parts share a key.
    pub fn cache_key(&self) -> String {
        match self {
            ReadQuery::HighestProduction => HIGHEST_PRODUCTION_KEY.to_string(),
            ReadQuery::MostPurchased => MOST_PURCHASED_KEY.to_string(),
            ReadQuery::Filtered(FilterSample { kw, temp }) => format!("{}-{}", kw, temp),
        }
    }

    pub fn ttl_secs(&self) -> u64 {
        match self {
            ReadQuery::HighestProduction | ReadQuery::MostPurchased => TOP_N_TTL_SECS,
            ReadQuery::Filtered(_) => FILTER_TTL_SECS,
        }
    }
}
