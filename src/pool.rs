use crate::prelude::*;
use fxhash::FxHashMap;
use std::hash::Hash;

/// Candidates that have not been drawn yet, kept in insertion order.
///
/// Every weight is finite and strictly positive. The order never changes
/// except for removals, which makes the cumulative distribution built over
/// a pool reproducible for a fixed source of randomness. `index` maps each
/// key to its position in `entries`.
#[derive(Clone, Debug)]
pub struct WeightedPool<K> {
    entries: Vec<(K, Weight)>,
    index: FxHashMap<K, usize>,
}

impl<K> Default for WeightedPool<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: FxHashMap::default(),
        }
    }
}

impl<K: PartialEq> PartialEq for WeightedPool<K> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Clone + Eq + Hash> WeightedPool<K> {
    /// Builds a pool from `(key, weight)` pairs.
    ///
    /// A key supplied more than once keeps its first position and takes the
    /// last weight given for it.
    ///
    /// # Example
    /// ```
    /// use lunch_lottery::pool::WeightedPool;
    /// let pool = WeightedPool::new([("a", 1.0), ("b", 3.0), ("a", 2.0)]).unwrap();
    ///
    /// assert_eq!(pool.keys().copied().collect::<Vec<_>>(), vec!["a", "b"]);
    /// assert_eq!(pool.weight(&"a"), Some(2.0));
    /// assert!(WeightedPool::new([("a", 0.0)]).is_err());
    /// ```
    pub fn new(weights: impl IntoIterator<Item = (K, Weight)>) -> Result<Self> {
        let mut pool = Self::default();

        for (position, (key, weight)) in weights.into_iter().enumerate() {
            if !(weight > 0.0 && weight.is_finite()) {
                return Err(Error::InvalidWeight { position, weight });
            }

            match pool.index.get(&key) {
                Some(&i) => pool.entries[i].1 = weight,
                None => {
                    pool.index.insert(key.clone(), pool.entries.len());
                    pool.entries.push((key, weight));
                }
            }
        }

        Ok(pool)
    }

    /// Removes `key` if it is still in the pool; absent keys are ignored.
    pub fn remove(&mut self, key: &K) {
        let i = match self.index.remove(key) {
            Some(i) => i,
            None => return,
        };

        self.entries.remove(i);
        for (k, _) in &self.entries[i..] {
            if let Some(pos) = self.index.get_mut(k) {
                *pos -= 1;
            }
        }
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    pub fn weight(&self, key: &K) -> Option<Weight> {
        self.index.get(key).map(|&i| self.entries[i].1)
    }
}

impl<K> WeightedPool<K> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all weights; may overflow to infinity for weights near `f64::MAX`.
    pub fn total_weight(&self) -> Weight {
        self.entries.iter().map(|&(_, w)| w).sum()
    }

    pub fn max_weight(&self) -> Option<Weight> {
        self.entries.iter().map(|&(_, w)| w).reduce(Weight::max)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, Weight)> + '_ {
        self.entries.iter().map(|(k, w)| (k, *w))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries.iter().map(|(k, _)| k)
    }

    pub(crate) fn entry(&self, index: usize) -> (&K, Weight) {
        let (k, w) = &self.entries[index];
        (k, *w)
    }
}
