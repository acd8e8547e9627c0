//! # Report Handlers
//!
//! One handler per dashboard view. Handlers take the shared state and already
//! validated parameters, and return the payload together with whether every query
//! behind it was served from the cache.

pub mod catalog;
pub mod compare;
pub mod match_report;
pub mod player_profile;
pub mod rankings;
pub mod summary;

use crate::queries::CacheTrace;

/// Handler output before it is wrapped in the response envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply<T> {
    pub data:   T,
    pub cached: bool,
}

impl<T> Reply<T> {
    pub fn new(data: T, trace: &CacheTrace) -> Self {
        Self {
            data,
            cached: trace.all_hits(),
        }
    }
}
