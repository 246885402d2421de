use super::*;
use crate::distribution::CumulativeDistribution;

/// Inverse transform sampling over the cumulative distribution of the pool,
/// rebuilt for every draw.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlgoCumulative;

impl DrawStrategy for AlgoCumulative {
    fn draw_one<K, S>(&self, pool: &mut WeightedPool<K>, source: &mut S) -> Option<K>
    where
        K: Clone + Eq + Hash + Debug,
        S: UniformSource + ?Sized,
    {
        if pool.is_empty() {
            return None;
        }

        let winner = {
            let dist = CumulativeDistribution::build(pool);
            let u = source.next_uniform();
            dist.resolve(u).clone()
        };

        pool.remove(&winner);
        Some(winner)
    }
}
