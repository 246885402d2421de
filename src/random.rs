use crate::prelude::*;
use rand::{Rng, RngCore};

/// Source of uniform values in `[0, 1)` consumed by the draw strategies.
///
/// Any `rand` generator is a source; [`ScriptedUniform`] replays a fixed
/// sequence for reproducible runs.
pub trait UniformSource {
    fn next_uniform(&mut self) -> f64;
}

impl<R: RngCore> UniformSource for R {
    #[inline]
    fn next_uniform(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Replays the given values in order, starting over once they are used up.
#[derive(Clone, Debug)]
pub struct ScriptedUniform {
    values: Vec<f64>,
    next: usize,
}

impl ScriptedUniform {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Result<Self> {
        let values: Vec<f64> = values.into_iter().collect();

        if let Some(&value) = values.iter().find(|&&u| !(0.0..1.0).contains(&u)) {
            return Err(Error::InvalidUniform { value });
        }

        // an empty script would have nothing to cycle through
        if values.is_empty() {
            return Err(Error::InvalidUniform { value: f64::NAN });
        }

        Ok(Self { values, next: 0 })
    }

    /// Number of values handed out so far.
    pub fn consumed(&self) -> usize {
        self.next
    }
}

impl UniformSource for ScriptedUniform {
    fn next_uniform(&mut self) -> f64 {
        let u = self.values[self.next % self.values.len()];
        self.next += 1;
        u
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pcg_rand::Pcg64;
    use rand::SeedableRng;

    #[test]
    fn scripted_replays_and_cycles() {
        let mut src = ScriptedUniform::new([0.6, 0.1]).unwrap();
        let got: Vec<f64> = (0..5).map(|_| src.next_uniform()).collect();
        assert_eq!(got, vec![0.6, 0.1, 0.6, 0.1, 0.6]);
        assert_eq!(src.consumed(), 5);
    }

    #[test]
    fn scripted_rejects_out_of_range() {
        assert!(matches!(
            ScriptedUniform::new([0.5, 1.0]),
            Err(Error::InvalidUniform { value }) if value == 1.0
        ));
        assert!(ScriptedUniform::new([-0.1]).is_err());
        assert!(ScriptedUniform::new([f64::NAN]).is_err());
        assert!(ScriptedUniform::new([]).is_err());
    }

    #[test]
    fn rng_values_in_unit_interval() {
        let mut rng = Pcg64::seed_from_u64(1234);
        for _ in 0..10_000 {
            let u = rng.next_uniform();
            assert!((0.0..1.0).contains(&u));
        }
    }
}
