pub mod algorithm;
pub mod distribution;
pub mod engine;
pub mod error;
pub mod karma;
pub mod parameters;
pub mod pool;
pub mod random;
pub mod report;
pub mod weight_function;

pub type Weight = f64;
pub type Karma = f64;

pub use error::{Error, Result};

pub mod prelude {
    use super::*;

    pub use super::{Error, Karma, Result, Weight};
    pub use engine::SamplingEngine;
    pub use pool::WeightedPool;
    pub use random::{ScriptedUniform, UniformSource};
    pub use weight_function::{KarmaWeight, WeightRule};
}
