use crate::prelude::*;
use crate::karma;
use std::str::FromStr;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "lunch_lottery",
    about = "Draws winners without replacement, proportional to their weight"
)]
pub struct Parameters {
    /// Candidates as name=weight (or name=karma with --karma)
    #[structopt(required = true)]
    pub candidates: Vec<Candidate>,

    #[structopt(short = "a", long, default_value = "cumulative")]
    pub algorithm: SamplingAlgorithm,

    #[structopt(short = "n", long, default_value = "1", allow_hyphen_values = true)]
    pub winners: isize,

    #[structopt(short = "s", long)]
    pub seed_value: Option<u64>,

    /// Interpret the candidate values as karma
    #[structopt(short = "k", long)]
    pub karma: bool,

    #[structopt(long, default_value = "2.0")]
    pub karma_slope: f64,

    #[structopt(long, default_value = "1.0")]
    pub karma_offset: f64,

    #[structopt(long, default_value = "1.0")]
    pub karma_floor: f64,

    #[structopt(short = "r", long)]
    pub report_distribution: bool,

    /// Repeat to increase logging verbosity
    #[structopt(short = "v", long, parse(from_occurrences))]
    pub verbose: u8,
}

#[derive(Eq, Clone, Copy, PartialEq, Debug)]
pub enum SamplingAlgorithm {
    Cumulative,
    Rejection,
}

impl FromStr for SamplingAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cumulative" | "cdf" => Ok(SamplingAlgorithm::Cumulative),
            "rejection" => Ok(SamplingAlgorithm::Rejection),
            _ => Err(format!("Unknown algorithm type: {}", s)),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Candidate {
    pub name: String,
    pub value: f64,
}

impl FromStr for Candidate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidCandidate(s.to_owned());

        let (name, value) = s.rsplit_once('=').ok_or_else(invalid)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(invalid());
        }

        let value = value.trim().parse::<f64>().map_err(|_| invalid())?;
        Ok(Self {
            name: name.to_owned(),
            value,
        })
    }
}

impl Parameters {
    pub fn weight_function(&self) -> KarmaWeight {
        KarmaWeight::new(self.karma_slope, self.karma_offset, self.karma_floor)
    }

    /// Candidate weights in command line order.
    pub fn weights(&self) -> Vec<(String, Weight)> {
        let wf = self.weight_function();
        self.candidates
            .iter()
            .map(|c| {
                let weight = if self.karma {
                    wf.weight(c.value, karma::DEFAULT_WAGER)
                } else {
                    c.value
                };
                (c.name.clone(), weight)
            })
            .collect()
    }
}

pub fn get_and_check_options() -> Parameters {
    let opt = Parameters::from_args();

    assert!(opt.karma_slope >= 0.0);
    assert!(opt.karma_floor > 0.0);

    opt
}
