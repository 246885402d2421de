use crate::prelude::*;

/// Maps a participant's karma and wager to a selection weight.
///
/// Implementations must return finite, strictly positive weights for every
/// input they are fed, since the result goes straight into a
/// [`WeightedPool`].
pub trait WeightRule {
    fn weight(&self, karma: Karma, wager: Karma) -> Weight;
}

impl<F: Fn(Karma, Karma) -> Weight> WeightRule for F {
    fn weight(&self, karma: Karma, wager: Karma) -> Weight {
        self(karma, wager)
    }
}

/// Implements the function `f(k) = max(slope * k + offset, floor)`, ignoring the wager.
///
/// # Example
/// ```
/// use lunch_lottery::weight_function::{KarmaWeight, WeightRule};
/// let wf = KarmaWeight::default();
///
/// assert_eq!(wf.weight(10.0, 1.0), 21.0);
/// assert_eq!(wf.weight(-10.0, 1.0), 1.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KarmaWeight {
    slope: f64,
    offset: f64,
    floor: f64,
}

impl Default for KarmaWeight {
    fn default() -> Self {
        Self::new(2.0, 1.0, 1.0)
    }
}

impl KarmaWeight {
    pub fn new(slope: f64, offset: f64, floor: f64) -> Self {
        assert!(slope >= 0.0);
        assert!(floor > 0.0 && floor.is_finite());
        Self {
            slope,
            offset,
            floor,
        }
    }

    pub fn slope(&self) -> f64 {
        self.slope
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn floor(&self) -> f64 {
        self.floor
    }
}

impl WeightRule for KarmaWeight {
    #[inline]
    fn weight(&self, karma: Karma, _wager: Karma) -> Weight {
        // f64::max ignores NaN, so undefined karma floors as well
        (self.slope * karma + self.offset).max(self.floor)
    }
}
