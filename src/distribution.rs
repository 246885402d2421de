use crate::prelude::*;

/// Tolerance for the final threshold of a cumulative distribution.
pub const EPSILON: f64 = 1e-9;

/// Cumulative distribution over the current content of a [`WeightedPool`].
///
/// Thresholds are the running sums of the normalized weights in pool order,
/// so entry `i` covers `[threshold[i-1], threshold[i])`. Rounding may leave
/// the final threshold slightly below 1.0; [`CumulativeDistribution::resolve`]
/// assigns the gap to the last entry.
///
/// Weights are scaled by the largest weight before summing, so the total
/// stays finite for any valid pool, including weights close to `f64::MAX`.
#[derive(Clone, Debug)]
pub struct CumulativeDistribution<'a, K> {
    thresholds: Vec<(f64, &'a K)>,
}

impl<'a, K: PartialEq> CumulativeDistribution<'a, K> {
    pub fn build(pool: &'a WeightedPool<K>) -> Self {
        debug_assert!(!pool.is_empty());

        let wmax = pool.max_weight().unwrap_or(1.0);
        let total: f64 = pool.iter().map(|(_, weight)| weight / wmax).sum();
        let mut running = 0.0;
        let thresholds = pool
            .iter()
            .map(|(key, weight)| {
                running += weight / wmax / total;
                (running, key)
            })
            .collect();

        Self { thresholds }
    }

    /// Returns the first key whose threshold is strictly greater than `u`,
    /// or the last key if rounding left every threshold at or below `u`.
    pub fn resolve(&self, u: f64) -> &'a K {
        // thresholds are non-decreasing, hence partitioned by `t <= u`
        let idx = self.thresholds.partition_point(|&(t, _)| t <= u);
        let idx = idx.min(self.thresholds.len() - 1);
        self.thresholds[idx].1
    }

    pub fn len(&self) -> usize {
        self.thresholds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }

    pub fn final_threshold(&self) -> f64 {
        self.thresholds.last().map_or(0.0, |&(t, _)| t)
    }

    pub fn thresholds(&self) -> impl Iterator<Item = (f64, &'a K)> + '_ {
        self.thresholds.iter().copied()
    }

    /// Probability of each key, i.e. the width of its interval.
    pub fn probabilities(&self) -> impl Iterator<Item = (&'a K, f64)> + '_ {
        let mut previous = 0.0;
        self.thresholds.iter().map(move |&(t, key)| {
            let p = t - previous;
            previous = t;
            (key, p)
        })
    }
}
