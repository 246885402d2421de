use crate::prelude::*;
use crate::algorithm::algo_cumulative::AlgoCumulative;
use crate::algorithm::DrawStrategy;
use fxhash::FxHashSet;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::{debug, error};

/// Repeated weighted draws without replacement from a [`WeightedPool`].
#[derive(Debug, Default)]
pub struct SamplingEngine<D: DrawStrategy = AlgoCumulative> {
    strategy: D,
}

impl<D: DrawStrategy> SamplingEngine<D> {
    pub fn new(strategy: D) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> &D {
        &self.strategy
    }

    pub fn sample_one<K, S>(&self, pool: &mut WeightedPool<K>, source: &mut S) -> Option<K>
    where
        K: Clone + Eq + Hash + Debug,
        S: UniformSource + ?Sized,
    {
        self.strategy.draw_one(pool, source)
    }

    /// Draws up to `n` distinct winners, in the order they were drawn.
    ///
    /// At most `pool.len()` winners are returned; asking for more simply
    /// drains the pool. A negative `n` is rejected before anything is drawn.
    pub fn sample_n<K, S>(
        &self,
        pool: &mut WeightedPool<K>,
        n: isize,
        source: &mut S,
    ) -> Result<Vec<K>>
    where
        K: Clone + Eq + Hash + Debug,
        S: UniformSource + ?Sized,
    {
        let requested =
            usize::try_from(n).map_err(|_| Error::InvalidArgument { requested: n })?;
        let effective = requested.min(pool.len());

        let mut winners = Vec::with_capacity(effective);
        if effective == 0 {
            return Ok(winners);
        }

        let mut seen = FxHashSet::default();
        for _ in 0..effective {
            let winner = match self.sample_one(pool, source) {
                Some(winner) => winner,
                None => {
                    error!(
                        drawn = winners.len(),
                        effective, "pool exhausted before all winners were drawn"
                    );
                    break;
                }
            };

            let fresh = seen.insert(winner.clone());
            debug_assert!(fresh, "{:?} drawn twice from the same pool", winner);
            if !fresh {
                error!(?winner, "duplicate winner skipped");
                continue;
            }

            debug!(?winner, remaining = pool.len(), "drew winner");
            winners.push(winner);
        }

        Ok(winners)
    }
}
