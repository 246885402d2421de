use super::*;
use crate::distribution::CumulativeDistribution;
use std::cell::Cell;

const MAX_PROPOSALS: usize = 1 << 16;

/// Rejection sampling: propose a remaining entry uniformly at random and
/// accept it with probability `weight / max_weight`.
///
/// Each draw consumes two uniforms per proposal. If `MAX_PROPOSALS`
/// proposals in a row are rejected, which can only happen for extremely
/// skewed weights or a scripted source, the draw is completed by inverse
/// transform sampling instead.
#[derive(Debug, Default)]
pub struct AlgoRejection {
    num_draws: Cell<usize>,
    num_proposals: Cell<usize>,
}

impl DrawStrategy for AlgoRejection {
    fn draw_one<K, S>(&self, pool: &mut WeightedPool<K>, source: &mut S) -> Option<K>
    where
        K: Clone + Eq + Hash + Debug,
        S: UniformSource + ?Sized,
    {
        let wmax = pool.max_weight()?;
        let len = pool.len();

        self.num_draws.set(self.num_draws.get() + 1);

        let mut winner = None;
        for _ in 0..MAX_PROPOSALS {
            self.num_proposals.set(self.num_proposals.get() + 1);

            let idx = ((source.next_uniform() * len as f64) as usize).min(len - 1);
            let (key, weight) = pool.entry(idx);

            if source.next_uniform() * wmax < weight {
                winner = Some(key.clone());
                break;
            }
        }

        let winner = match winner {
            Some(w) => w,
            None => {
                tracing::debug!("rejection sampling exhausted, falling back to cumulative draw");
                CumulativeDistribution::build(pool)
                    .resolve(source.next_uniform())
                    .clone()
            }
        };

        pool.remove(&winner);
        Some(winner)
    }
}

impl AlgoRejection {
    /// Average number of proposals needed per draw so far.
    pub fn proposals_per_draw(&self) -> f64 {
        self.num_proposals.get() as f64 / self.num_draws.get().max(1) as f64
    }
}
