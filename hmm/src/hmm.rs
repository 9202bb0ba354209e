use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{HmmError, Result, Topology};

/// Discrete hidden Markov model.
///
/// Probabilities are stored as `initial[state]`,
/// `transition[from][to]` and `emission[state][symbol]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hmm {
    states: usize,
    observations: usize,
    topology: Topology,
    initial: Vec<f64>,
    transition: Vec<Vec<f64>>,
    emission: Vec<Vec<f64>>,
}

/// Per-sequence quantities shared by the re-estimation formulas.
struct Pass<'a> {
    seq: &'a [usize],
    fwd: Vec<Vec<f64>>,
    bwd: Vec<Vec<f64>>,
    weight: f64,
}

impl Hmm {
    /// Creates a model with the default banded topology.
    pub fn new(states: usize, observations: usize) -> Result<Self> {
        Self::with_topology(states, observations, Topology::default())
    }

    pub fn with_topology(states: usize, observations: usize, topology: Topology) -> Result<Self> {
        if states == 0 || observations == 0 {
            return Err(HmmError::ZeroSize);
        }
        let mut hmm = Self {
            states,
            observations,
            topology,
            initial: Vec::new(),
            transition: Vec::new(),
            emission: Vec::new(),
        };
        hmm.reset();
        Ok(hmm)
    }

    /// Restores the initial left-to-right parameters: start in state 0,
    /// topology transitions, uniform emissions.
    pub fn reset(&mut self) {
        self.initial = vec![0.0; self.states];
        self.initial[0] = 1.0;
        self.transition = self.topology.transitions(self.states);
        self.emission = vec![vec![1.0 / self.observations as f64; self.observations]; self.states];
    }

    pub fn states(&self) -> usize {
        self.states
    }

    pub fn observations(&self) -> usize {
        self.observations
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Probability of starting in `state`.
    ///
    /// # Panics
    /// If `state` is out of range.
    pub fn initial(&self, state: usize) -> f64 {
        self.initial[state]
    }

    /// Probability of moving from `from` to `to`.
    ///
    /// # Panics
    /// If either state is out of range.
    pub fn transition(&self, from: usize, to: usize) -> f64 {
        self.transition[from][to]
    }

    /// Probability of `state` emitting `symbol`.
    ///
    /// # Panics
    /// If `state` or `symbol` is out of range.
    pub fn emission(&self, state: usize, symbol: usize) -> f64 {
        self.emission[state][symbol]
    }

    pub fn set_initial(&mut self, state: usize, p: f64) {
        self.initial[state] = p;
    }

    pub fn set_transition(&mut self, from: usize, to: usize, p: f64) {
        self.transition[from][to] = p;
    }

    pub fn set_emission(&mut self, state: usize, symbol: usize, p: f64) {
        self.emission[state][symbol] = p;
    }

    /// Checks that the tables match the declared sizes and hold
    /// probabilities. Deserialized models should pass this before use.
    pub fn validate(&self) -> Result<()> {
        if self.states == 0 || self.observations == 0 {
            return Err(HmmError::ZeroSize);
        }
        let shape = |table, expected, got| {
            if expected == got {
                Ok(())
            } else {
                Err(HmmError::Shape { table, expected, got })
            }
        };
        shape("initial", self.states, self.initial.len())?;
        shape("transition", self.states, self.transition.len())?;
        shape("emission", self.states, self.emission.len())?;
        for row in &self.transition {
            shape("transition row", self.states, row.len())?;
        }
        for row in &self.emission {
            shape("emission row", self.observations, row.len())?;
        }

        let valid = |p: &f64| (0.0..=1.0).contains(p);
        if !self.initial.iter().all(valid) {
            return Err(HmmError::BadProbability { table: "initial" });
        }
        if !self.transition.iter().flatten().all(valid) {
            return Err(HmmError::BadProbability { table: "transition" });
        }
        if !self.emission.iter().flatten().all(valid) {
            return Err(HmmError::BadProbability { table: "emission" });
        }
        Ok(())
    }

    fn check(&self, seq: &[usize]) -> Result<()> {
        if seq.is_empty() {
            return Err(HmmError::EmptySequence);
        }
        if let Some(&symbol) = seq.iter().find(|&&s| s >= self.observations) {
            return Err(HmmError::SymbolOutOfRange {
                symbol,
                observations: self.observations,
            });
        }
        Ok(())
    }

    /// Forward variables, indexed `[state][t]`.
    pub fn forward(&self, seq: &[usize]) -> Result<Vec<Vec<f64>>> {
        self.check(seq)?;
        Ok(self.forward_unchecked(seq))
    }

    /// Backward variables, indexed `[state][t]`.
    pub fn backward(&self, seq: &[usize]) -> Result<Vec<Vec<f64>>> {
        self.check(seq)?;
        Ok(self.backward_unchecked(seq))
    }

    /// Probability that this model produced `seq`.
    pub fn probability(&self, seq: &[usize]) -> Result<f64> {
        self.check(seq)?;
        let fwd = self.forward_unchecked(seq);
        Ok(last_column_sum(&fwd))
    }

    fn forward_unchecked(&self, seq: &[usize]) -> Vec<Vec<f64>> {
        let n = self.states;
        let len = seq.len();
        let mut f = vec![vec![0.0; len]; n];

        for (s, row) in f.iter_mut().enumerate() {
            row[0] = self.initial[s] * self.emission[s][seq[0]];
        }
        for t in 1..len {
            for k in 0..n {
                let sum: f64 = (0..n).map(|l| f[l][t - 1] * self.transition[l][k]).sum();
                f[k][t] = sum * self.emission[k][seq[t]];
            }
        }
        f
    }

    fn backward_unchecked(&self, seq: &[usize]) -> Vec<Vec<f64>> {
        let n = self.states;
        let len = seq.len();
        let mut b = vec![vec![0.0; len]; n];

        for row in b.iter_mut() {
            row[len - 1] = 1.0;
        }
        for t in (0..len - 1).rev() {
            for i in 0..n {
                b[i][t] = (0..n)
                    .map(|j| b[j][t + 1] * self.transition[i][j] * self.emission[j][seq[t + 1]])
                    .sum();
            }
        }
        b
    }

    /// Re-estimates transitions and emissions from several observation
    /// sequences (one Baum-Welch step, each sequence weighted by the
    /// inverse of its probability).
    ///
    /// The initial distribution is left untouched. Sequences the current
    /// model cannot produce are skipped; rows of states that are never
    /// visited keep their previous values. Returns the number of sequences
    /// that contributed.
    pub fn train<S: AsRef<[usize]>>(&mut self, sequences: &[S]) -> Result<usize> {
        for s in sequences {
            self.check(s.as_ref())?;
        }

        let mut passes = Vec::with_capacity(sequences.len());
        for (k, s) in sequences.iter().enumerate() {
            let seq = s.as_ref();
            let fwd = self.forward_unchecked(seq);
            let prob = last_column_sum(&fwd);
            if !(prob > 0.0 && prob.is_finite()) {
                warn!(sequence = k, prob, "hmm: skipping sequence the model cannot produce");
                continue;
            }
            passes.push(Pass {
                seq,
                bwd: self.backward_unchecked(seq),
                fwd,
                weight: 1.0 / prob,
            });
        }
        if passes.is_empty() {
            return Err(HmmError::NoUsableSequence);
        }

        let n = self.states;
        let m = self.observations;
        let mut transition = self.transition.clone();
        let mut emission = self.emission.clone();

        for i in 0..n {
            // Expected number of transitions out of state i.
            let leave: f64 = passes
                .iter()
                .map(|p| {
                    let inner: f64 = (0..p.seq.len() - 1).map(|t| p.fwd[i][t] * p.bwd[i][t]).sum();
                    p.weight * inner
                })
                .sum();
            if leave > 0.0 {
                for j in 0..n {
                    let a = self.transition[i][j];
                    let moved: f64 = passes
                        .iter()
                        .map(|p| {
                            let inner: f64 = (0..p.seq.len() - 1)
                                .map(|t| {
                                    p.fwd[i][t]
                                        * a
                                        * self.emission[j][p.seq[t + 1]]
                                        * p.bwd[j][t + 1]
                                })
                                .sum();
                            p.weight * inner
                        })
                        .sum();
                    transition[i][j] = moved / leave;
                }
                normalize(&mut transition[i]);
            }

            // Expected number of visits to state i, in total and per symbol.
            let mut per_symbol = vec![0.0; m];
            let mut visits = 0.0;
            for p in &passes {
                for (t, &o) in p.seq.iter().enumerate() {
                    let g = p.weight * p.fwd[i][t] * p.bwd[i][t];
                    per_symbol[o] += g;
                    visits += g;
                }
            }
            if visits > 0.0 {
                for (o, v) in per_symbol.into_iter().enumerate() {
                    emission[i][o] = v / visits;
                }
                normalize(&mut emission[i]);
            }
        }

        self.transition = transition;
        self.emission = emission;
        debug!(sequences = passes.len(), "hmm: re-estimated");
        Ok(passes.len())
    }

    /// Renders the model tables as text.
    pub fn dump(&self) -> String {
        self.to_string()
    }
}

fn last_column_sum(fwd: &[Vec<f64>]) -> f64 {
    fwd.iter().map(|row| row[row.len() - 1]).sum()
}

fn normalize(row: &mut [f64]) {
    let total: f64 = row.iter().sum();
    if total > 0.0 {
        row.iter_mut().for_each(|v| *v /= total);
    }
}

impl fmt::Display for Hmm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "states={}, observations={}, topology={}",
            self.states, self.observations, self.topology
        )?;

        let initial: Vec<String> = self.initial.iter().map(|p| format!("{p:1.3}")).collect();
        writeln!(f, "Initial probabilities: [ {} ]", initial.join(", "))?;

        writeln!(f, "Transition probabilities:")?;
        for (i, row) in self.transition.iter().enumerate() {
            write!(f, "{i}:")?;
            for p in row {
                write!(f, "\t{p:1.3}")?;
            }
            writeln!(f)?;
        }

        writeln!(f, "Emission probabilities:")?;
        for (i, row) in self.emission.iter().enumerate() {
            write!(f, "state{i}:")?;
            for p in row {
                write!(f, "\t{p:1.3}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-12_f64.max(b.abs() * 1e-9)
    }

    #[test]
    fn new_rejects_zero_size() {
        assert!(matches!(Hmm::new(0, 3), Err(HmmError::ZeroSize)));
        assert!(matches!(Hmm::new(3, 0), Err(HmmError::ZeroSize)));
    }

    #[test]
    fn initial_parameters() {
        let hmm = Hmm::new(5, 10).unwrap();
        assert_eq!(hmm.initial(0), 1.0);
        for s in 1..5 {
            assert_eq!(hmm.initial(s), 0.0);
        }
        for s in 0..5 {
            for o in 0..10 {
                assert!(approx(hmm.emission(s, o), 0.1));
            }
        }
        assert_eq!(hmm.transition(4, 4), 1.0);
        assert_eq!(hmm.transition(3, 2), 0.0);
    }

    #[test]
    fn uniform_emissions_give_closed_form() {
        // Transitions are stochastic, so with uniform emissions every
        // sequence of length T has probability (1/M)^T.
        let hmm = Hmm::new(5, 10).unwrap();
        let seq = [0, 1, 1, 0, 0];
        assert!(approx(hmm.probability(&seq).unwrap(), 1e-5));

        let bwd = hmm.backward(&seq).unwrap();
        assert_eq!(bwd.len(), 5);
        for row in &bwd {
            assert_eq!(row.len(), 5);
            assert_eq!(row[4], 1.0);
            assert!(approx(row[0], 1e-4));
            assert!(approx(row[3], 0.1));
        }
    }

    #[test]
    fn forward_backward_agree_at_every_step() {
        let mut hmm = Hmm::with_topology(4, 3, Topology::LeftRight).unwrap();
        hmm.set_emission(0, 0, 0.8);
        hmm.set_emission(0, 1, 0.1);
        hmm.set_emission(0, 2, 0.1);
        let seq = [0, 2, 1, 1, 0, 2];

        let p = hmm.probability(&seq).unwrap();
        let fwd = hmm.forward(&seq).unwrap();
        let bwd = hmm.backward(&seq).unwrap();
        for t in 0..seq.len() {
            let s: f64 = (0..4).map(|i| fwd[i][t] * bwd[i][t]).sum();
            assert!(approx(s, p), "t={t}: {s} != {p}");
        }
    }

    #[test]
    fn rejects_bad_sequences() {
        let hmm = Hmm::new(3, 4).unwrap();
        assert!(matches!(hmm.probability(&[]), Err(HmmError::EmptySequence)));
        assert!(matches!(
            hmm.forward(&[0, 4]),
            Err(HmmError::SymbolOutOfRange { symbol: 4, observations: 4 })
        ));
    }

    #[test]
    fn training_raises_likelihood_and_keeps_rows_stochastic() {
        let mut hmm = Hmm::new(4, 5).unwrap();
        let seq = vec![0, 0, 1, 1, 2, 2, 3, 3];
        let before = hmm.probability(&seq).unwrap();

        let used = hmm.train(&[seq.clone()]).unwrap();
        assert_eq!(used, 1);
        let after = hmm.probability(&seq).unwrap();
        assert!(after > before, "{after} should exceed {before}");

        for i in 0..4 {
            let a: f64 = (0..4).map(|j| hmm.transition(i, j)).sum();
            let b: f64 = (0..5).map(|o| hmm.emission(i, o)).sum();
            assert!(approx(a, 1.0));
            assert!(approx(b, 1.0));
            // Symbol 4 never appears in the training data.
            assert_eq!(hmm.emission(i, 4), 0.0);
            // Left-to-right structure survives training.
            for j in 0..i {
                assert_eq!(hmm.transition(i, j), 0.0);
            }
        }
        assert_eq!(hmm.initial(0), 1.0);
    }

    #[test]
    fn training_skips_impossible_sequences() {
        let mut hmm = Hmm::new(3, 3).unwrap();
        hmm.train(&[vec![0, 0, 1, 1]]).unwrap();
        // Symbol 2 now has zero emission probability everywhere.
        assert_eq!(hmm.probability(&[2, 2, 2]).unwrap(), 0.0);

        let used = hmm.train(&[vec![2, 2, 2], vec![0, 1, 1, 1]]).unwrap();
        assert_eq!(used, 1);

        assert!(matches!(hmm.train(&[vec![2, 2, 2]]), Err(HmmError::NoUsableSequence)));
        let none: [Vec<usize>; 0] = [];
        assert!(matches!(hmm.train(&none), Err(HmmError::NoUsableSequence)));
    }

    #[test]
    fn reset_restores_topology() {
        let mut hmm = Hmm::new(3, 2).unwrap();
        let fresh = hmm.clone();
        hmm.train(&[vec![0, 1, 1]]).unwrap();
        assert_ne!(hmm, fresh);
        hmm.reset();
        assert_eq!(hmm, fresh);
    }

    #[test]
    fn dump_lists_tables() {
        let hmm = Hmm::new(2, 3).unwrap();
        let out = hmm.dump();
        assert!(out.contains("states=2, observations=3"));
        assert!(out.contains("Initial probabilities: [ 1.000, 0.000 ]"));
        assert!(out.contains("0:\t0.500\t0.500"));
        assert!(out.contains("state1:\t0.333\t0.333\t0.333"));
    }

    #[test]
    fn validate_catches_bad_tables() {
        let hmm = Hmm::new(3, 4).unwrap();
        hmm.validate().unwrap();

        let mut short = hmm.clone();
        short.emission[1].truncate(2);
        assert!(matches!(
            short.validate(),
            Err(HmmError::Shape { table: "emission row", expected: 4, got: 2 })
        ));

        let mut missing = hmm.clone();
        missing.transition.pop();
        assert!(matches!(
            missing.validate(),
            Err(HmmError::Shape { table: "transition", expected: 3, got: 2 })
        ));

        let mut nan = hmm.clone();
        nan.set_initial(0, f64::NAN);
        assert!(matches!(nan.validate(), Err(HmmError::BadProbability { table: "initial" })));
    }

    #[test]
    fn huge_jump_limit_is_usable() {
        let hmm = Hmm::with_topology(5, 10, Topology::Banded { jump_limit: usize::MAX }).unwrap();
        assert!(approx(hmm.transition(0, 4), 0.2));
        assert!(approx(hmm.probability(&[0, 1, 1, 0, 0]).unwrap(), 1e-5));
    }

    #[test]
    fn serde_round_trip() {
        let hmm = Hmm::with_topology(3, 2, Topology::Banded { jump_limit: 1 }).unwrap();
        let json = serde_json::to_string(&hmm).unwrap();
        assert!(json.contains("\"kind\":\"banded\""));
        let back: Hmm = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hmm);
    }
}
