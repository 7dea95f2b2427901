//! Service Module
//!
//! Read-through orchestration, cache key derivation, and the write path.

mod keys;
mod read_through;
mod writer;


pub use keys::{
    FilterSample, ReadQuery, FILTER_TTL_SECS, HIGHEST_PRODUCTION_KEY, MOST_PURCHASED_KEY,
    TOP_N_TTL_SECS,
};
pub use read_through::ReadThrough;
pub use writer::Writer;
