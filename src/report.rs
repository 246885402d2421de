use crate::prelude::*;
use crate::distribution::CumulativeDistribution;
use itertools::Itertools;
use std::fmt::Display;
use std::hash::Hash;
use std::io::Write;

/// Number of times each key was drawn, sorted by key.
pub fn selection_frequencies<K: Ord + Hash + Eq>(
    winners: impl Iterator<Item = K>,
) -> Vec<(K, usize)> {
    let mut counts = winners.counts().into_iter().collect_vec();
    counts.sort_unstable();
    counts
}

/// Writes the probability of every key in `pool` for its next draw.
///
/// Write failures surface as [`Error::Report`].
pub fn report_distribution<K: PartialEq + Display>(
    pool: &WeightedPool<K>,
    writer: &mut impl Write,
) -> Result<()> {
    if pool.is_empty() {
        return Ok(());
    }

    let dist = CumulativeDistribution::build(pool);
    writer.write_all(
        dist.probabilities()
            .map(|(k, p)| format!("#P {:>10}, {:>10.6}\n", k, p))
            .join("")
            .as_bytes(),
    )?;
    Ok(())
}
