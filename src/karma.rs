//! Karma bookkeeping around a lunch round.
//!
//! Participants join a [`Round`]; their karma, read from a [`KarmaLedger`],
//! is turned into a selection weight by a [`WeightRule`] and winners are
//! drawn by a [`SamplingEngine`]. Every winner pays their wager out of
//! their karma.

use crate::prelude::*;
use crate::algorithm::DrawStrategy;
use fxhash::FxHashMap;
use tracing::{info, warn};

pub type Participant = String;

pub const DEFAULT_KARMA: Karma = 0.0;
pub const DEFAULT_WAGER: Karma = 1.0;

/// Storage of karma balances and wagers.
///
/// Unknown participants have [`DEFAULT_KARMA`] and [`DEFAULT_WAGER`].
pub trait KarmaLedger {
    fn karma(&self, name: &str) -> Karma;
    fn set_karma(&mut self, name: &str, karma: Karma);

    fn wager(&self, name: &str) -> Karma;
    fn store_wager(&mut self, name: &str, wager: Karma);
    fn clear_wager(&mut self, name: &str);
    fn reset_wagers(&mut self);
}

#[derive(Clone, Debug, Default)]
pub struct MemoryLedger {
    karma: FxHashMap<Participant, Karma>,
    wagers: FxHashMap<Participant, Karma>,
}

impl KarmaLedger for MemoryLedger {
    fn karma(&self, name: &str) -> Karma {
        self.karma.get(name).copied().unwrap_or(DEFAULT_KARMA)
    }

    fn set_karma(&mut self, name: &str, karma: Karma) {
        self.karma.insert(name.to_owned(), karma);
    }

    fn wager(&self, name: &str) -> Karma {
        self.wagers.get(name).copied().unwrap_or(DEFAULT_WAGER)
    }

    fn store_wager(&mut self, name: &str, wager: Karma) {
        self.wagers.insert(name.to_owned(), wager);
    }

    fn clear_wager(&mut self, name: &str) {
        self.wagers.remove(name);
    }

    fn reset_wagers(&mut self) {
        self.wagers.clear();
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WagerOutcome {
    Accepted(Karma),
    Clamped { requested: Karma, allowance: Karma },
}

/// Largest wager a participant may place: half of their karma's magnitude.
pub fn wager_allowance(karma: Karma) -> Karma {
    karma.abs() / 2.0
}

/// Stores `amount` as the wager of `name` if their karma allows it;
/// otherwise the wager falls back to [`DEFAULT_WAGER`].
pub fn place_wager(ledger: &mut impl KarmaLedger, name: &str, amount: Karma) -> WagerOutcome {
    let allowance = wager_allowance(ledger.karma(name));

    if amount > 0.0 && amount <= allowance {
        ledger.store_wager(name, amount);
        WagerOutcome::Accepted(amount)
    } else {
        warn!(name, amount, allowance, "wager rejected");
        ledger.clear_wager(name);
        WagerOutcome::Clamped {
            requested: amount,
            allowance,
        }
    }
}

/// A single lunch round: who takes part and who won.
///
/// There is one roster per round. Joining registers a participant for the
/// round and leaving drops them before the draw; winners are always drawn
/// from the roster as it stands when [`Round::pick_winners`] is called.
#[derive(Clone, Debug, Default)]
pub struct Round {
    participants: Vec<Participant>,
    winners: Vec<Participant>,
    already_assigned: bool,
}

impl Round {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `name` to the round; joining twice has no effect.
    pub fn join(&mut self, name: &str) -> bool {
        if self.participants.iter().any(|p| p == name) {
            return false;
        }
        self.participants.push(name.to_owned());
        true
    }

    pub fn leave(&mut self, name: &str) -> bool {
        let before = self.participants.len();
        self.participants.retain(|p| p != name);
        before != self.participants.len()
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn winners(&self) -> &[Participant] {
        &self.winners
    }

    pub fn already_assigned(&self) -> bool {
        self.already_assigned
    }

    /// Selection weight of every participant, in joining order.
    pub fn weights(
        &self,
        ledger: &impl KarmaLedger,
        rule: &impl WeightRule,
    ) -> Vec<(Participant, Weight)> {
        self.participants
            .iter()
            .map(|p| (p.clone(), rule.weight(ledger.karma(p), ledger.wager(p))))
            .collect()
    }

    /// Draws `count` winners and charges each of them their wager.
    pub fn pick_winners<D, S>(
        &mut self,
        ledger: &mut impl KarmaLedger,
        rule: &impl WeightRule,
        engine: &SamplingEngine<D>,
        count: isize,
        source: &mut S,
    ) -> Result<&[Participant]>
    where
        D: DrawStrategy,
        S: UniformSource + ?Sized,
    {
        let mut pool = WeightedPool::new(self.weights(&*ledger, rule))?;
        let winners = engine.sample_n(&mut pool, count, source)?;

        for winner in &winners {
            let karma = ledger.karma(winner) - ledger.wager(winner);
            info!(%winner, karma, "winner charged");
            ledger.set_karma(winner, karma);
        }

        self.winners = winners;
        self.already_assigned = true;
        Ok(&self.winners)
    }

    pub fn reset(&mut self, ledger: &mut impl KarmaLedger) {
        self.participants.clear();
        self.winners.clear();
        self.already_assigned = false;
        ledger.reset_wagers();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::algorithm::algo_cumulative::AlgoCumulative;
    use crate::weight_function::KarmaWeight;
    use pcg_rand::Pcg64;
    use rand::SeedableRng;

    fn engine() -> SamplingEngine<AlgoCumulative> {
        SamplingEngine::default()
    }

    #[test]
    fn ledger_defaults() {
        let mut ledger = MemoryLedger::default();
        assert_eq!(ledger.karma("agustin"), 0.0);
        assert_eq!(ledger.wager("agustin"), 1.0);

        ledger.set_karma("agustin", 1000.0);
        assert_eq!(ledger.karma("agustin"), 1000.0);
    }

    #[test]
    fn join_and_leave() {
        let mut round = Round::new();
        assert!(round.join("alfred"));
        assert!(!round.join("alfred"));
        assert_eq!(round.participants(), ["alfred"]);

        assert!(round.leave("alfred"));
        assert!(!round.leave("alfred"));
        assert!(round.participants().is_empty());
    }

    #[test]
    fn departed_participants_are_not_drawn() {
        let mut ledger = MemoryLedger::default();
        let mut round = Round::new();
        for name in ["alfred", "peter", "john"] {
            round.join(name);
        }
        round.leave("peter");

        let mut rng = Pcg64::seed_from_u64(4);
        let winners = round
            .pick_winners(&mut ledger, &KarmaWeight::default(), &engine(), 3, &mut rng)
            .unwrap()
            .to_vec();

        assert_eq!(winners.len(), 2);
        assert!(!winners.iter().any(|w| w == "peter"));
        assert_eq!(ledger.karma("peter"), 0.0);
    }

    #[test]
    fn weights_handle_negative_karma() {
        let mut ledger = MemoryLedger::default();
        let mut round = Round::new();
        round.join("alfred");
        ledger.set_karma("alfred", 10.0);
        round.join("peter");
        ledger.set_karma("peter", -10.0);

        let weights = round.weights(&ledger, &KarmaWeight::default());
        assert_eq!(
            weights,
            vec![("alfred".to_owned(), 21.0), ("peter".to_owned(), 1.0)]
        );
    }

    #[test]
    fn single_participant_without_karma_wins() {
        let mut ledger = MemoryLedger::default();
        let mut round = Round::new();
        ledger.set_karma("alfred", 0.0);
        round.join("alfred");

        let mut rng = Pcg64::seed_from_u64(1);
        let winners = round
            .pick_winners(&mut ledger, &KarmaWeight::default(), &engine(), 1, &mut rng)
            .unwrap();

        assert_eq!(winners, ["alfred"]);
        assert!(round.already_assigned());
    }

    #[test]
    fn winner_pays_default_wager() {
        let mut ledger = MemoryLedger::default();
        let mut round = Round::new();
        round.join("alfred");
        ledger.set_karma("alfred", 0.0);
        round.join("peter");
        ledger.set_karma("peter", -100.0);

        let mut src = ScriptedUniform::new([0.2]).unwrap();
        round
            .pick_winners(&mut ledger, &KarmaWeight::default(), &engine(), 1, &mut src)
            .unwrap();

        assert_eq!(round.winners(), ["alfred"]);
        assert_eq!(ledger.karma("alfred"), -1.0);
        assert_eq!(ledger.karma("peter"), -100.0);
    }

    #[test]
    fn every_spot_is_assigned() {
        let mut ledger = MemoryLedger::default();
        let mut round = Round::new();
        for (name, karma) in [
            ("alfred", 0.1),
            ("peter", 100.0),
            ("john", 1.0),
            ("john", 2.0),
            ("john", 6.0),
        ] {
            round.join(name);
            ledger.set_karma(name, karma);
        }

        let mut src = ScriptedUniform::new([0.5, 0.5]).unwrap();
        let winners = round
            .pick_winners(&mut ledger, &KarmaWeight::default(), &engine(), 2, &mut src)
            .unwrap();

        assert_eq!(winners, ["peter", "john"]);
    }

    #[test]
    fn wager_limited_by_karma() {
        let mut ledger = MemoryLedger::default();
        ledger.set_karma("agustin", -100.0);

        assert_eq!(
            place_wager(&mut ledger, "agustin", 50.0),
            WagerOutcome::Accepted(50.0)
        );
        assert_eq!(ledger.wager("agustin"), 50.0);

        assert_eq!(
            place_wager(&mut ledger, "agustin", 51.0),
            WagerOutcome::Clamped {
                requested: 51.0,
                allowance: 50.0
            }
        );
        assert_eq!(ledger.wager("agustin"), 1.0);

        assert!(matches!(
            place_wager(&mut ledger, "agustin", -3.0),
            WagerOutcome::Clamped { .. }
        ));
    }

    #[test]
    fn winners_lose_wagered_points() {
        let mut ledger = MemoryLedger::default();
        let mut round = Round::new();
        round.join("jaime");
        ledger.set_karma("jaime", -10.0);
        assert_eq!(
            place_wager(&mut ledger, "jaime", 5.0),
            WagerOutcome::Accepted(5.0)
        );

        let mut rng = Pcg64::seed_from_u64(5);
        round
            .pick_winners(&mut ledger, &KarmaWeight::default(), &engine(), 1, &mut rng)
            .unwrap();

        assert_eq!(ledger.karma("jaime"), -15.0);
    }

    #[test]
    fn custom_rule_sees_wager() {
        let mut ledger = MemoryLedger::default();
        let mut round = Round::new();
        for (name, karma, wager) in [("jaime", -20.0, 10.0), ("agustin", -15.0, 5.0)] {
            round.join(name);
            ledger.set_karma(name, karma);
            place_wager(&mut ledger, name, wager);
        }
        round.join("ignacio");

        let rule = |_karma: Karma, wager: Karma| wager;
        let weights = round.weights(&ledger, &rule);
        assert_eq!(
            weights,
            vec![
                ("jaime".to_owned(), 10.0),
                ("agustin".to_owned(), 5.0),
                ("ignacio".to_owned(), 1.0)
            ]
        );
    }

    #[test]
    fn invalid_rule_output_is_reported() {
        let mut ledger = MemoryLedger::default();
        let mut round = Round::new();
        round.join("alfred");

        let rule = |karma: Karma, _wager: Karma| karma;
        let mut rng = Pcg64::seed_from_u64(5);
        let res = round.pick_winners(&mut ledger, &rule, &engine(), 1, &mut rng);

        assert!(matches!(res, Err(Error::InvalidWeight { position: 0, .. })));
        assert!(!round.already_assigned());
        assert_eq!(ledger.karma("alfred"), 0.0);
    }

    #[test]
    fn reset_clears_round() {
        let mut ledger = MemoryLedger::default();
        let mut round = Round::new();
        for name in ["ignacio", "agustin", "jaime"] {
            round.join(name);
        }
        ledger.set_karma("jaime", -20.0);
        place_wager(&mut ledger, "jaime", 10.0);

        let mut rng = Pcg64::seed_from_u64(9);
        round
            .pick_winners(&mut ledger, &KarmaWeight::default(), &engine(), 1, &mut rng)
            .unwrap();
        assert!(round.already_assigned());

        round.reset(&mut ledger);
        assert!(round.winners().is_empty());
        assert!(round.participants().is_empty());
        assert!(!round.already_assigned());
        assert_eq!(ledger.wager("jaime"), 1.0);
    }
}
