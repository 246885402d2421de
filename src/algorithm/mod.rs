use super::prelude::*;
use std::fmt::Debug;
use std::hash::Hash;

pub mod algo_cumulative;
pub mod algo_rejection;

/// Draw-without-replacement primitive.
///
/// An implementation picks one key of `pool` with probability proportional
/// to its weight, removes it from the pool and returns it. An empty pool
/// yields `None` and consumes no randomness.
pub trait DrawStrategy: Default {
    fn draw_one<K, S>(&self, pool: &mut WeightedPool<K>, source: &mut S) -> Option<K>
    where
        K: Clone + Eq + Hash + Debug,
        S: UniformSource + ?Sized;
}
