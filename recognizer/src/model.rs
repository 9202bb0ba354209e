use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;
use wiigee_gesture::Gesture;
use wiigee_hmm::Hmm;
use wiigee_quantizer::{Quantizer, CENTROIDS};

use crate::{RecognizerError, Result};

/// HMM state count of a gesture model.
pub const DEFAULT_STATES: usize = 8;

/// Observation alphabet size; one symbol per quantizer centroid.
pub const DEFAULT_OBSERVATIONS: usize = CENTROIDS;

/// One gesture class: a quantizer plus the HMM trained on its output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureModel {
    id: u32,
    quantizer: Quantizer,
    hmm: Hmm,

    /// Mean match probability over the training set, used as the prior by
    /// the classifier.
    default_probability: f64,
}

impl GestureModel {
    /// Creates an untrained model with [`DEFAULT_STATES`] states.
    pub fn new(id: u32) -> Self {
        Self::with_states(id, DEFAULT_STATES)
    }

    /// Creates an untrained model with a custom HMM state count.
    ///
    /// A state count of 0 is raised to 1.
    pub fn with_states(id: u32, states: usize) -> Self {
        let states = states.max(1);
        let hmm = match Hmm::new(states, DEFAULT_OBSERVATIONS) {
            Ok(hmm) => hmm,
            Err(_) => unreachable!("states and observations are non-zero"),
        };
        Self {
            id,
            quantizer: Quantizer::new(states),
            hmm,
            default_probability: 0.0,
        }
    }

    /// Trains the model on examples of its gesture.
    ///
    /// All samples are merged into one summary gesture whose bounds are the
    /// averages of the examples' bounds. The quantizer learns its centroids
    /// from the summary, each example is quantized, and the HMM is trained
    /// on the resulting sequences. Finally the default probability is set
    /// to the mean [`GestureModel::matches`] score over the examples.
    pub fn train(&mut self, gestures: &[Gesture]) -> Result<()> {
        if gestures.is_empty() {
            return Err(RecognizerError::NoGestures);
        }
        if let Some(index) = gestures.iter().position(Gesture::is_empty) {
            return Err(RecognizerError::EmptyGesture { index });
        }

        let mut summary = Gesture::new();
        let (mut min_acc, mut max_acc) = (0.0, 0.0);
        for g in gestures {
            min_acc += g.min_acc();
            max_acc += g.max_acc();
            summary.extend(g.samples().iter().copied());
        }
        let n = gestures.len() as f64;
        summary.set_bounds(min_acc / n, max_acc / n);

        // Work on a copy so a failed step leaves the model as it was.
        let mut staged = self.clone();
        let rounds = staged.quantizer.train(&summary)?;
        debug!(id = self.id, samples = summary.len(), rounds, "model: quantizer trained");

        let sequences = gestures
            .iter()
            .map(|g| staged.quantizer.observation_sequence(g))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let used = staged.hmm.train(&sequences)?;
        debug!(id = self.id, sequences = used, "model: hmm trained");

        let mut total = 0.0;
        for g in gestures {
            total += staged.matches(g)?;
        }
        staged.default_probability = total / n;

        *self = staged;
        debug!(id = self.id, default_probability = self.default_probability, "model: trained");
        Ok(())
    }

    /// Probability that `gesture` belongs to this model.
    pub fn matches(&self, gesture: &Gesture) -> Result<f64> {
        if !self.quantizer.is_trained() {
            return Err(RecognizerError::NotTrained { id: self.id });
        }
        let seq = self.quantizer.observation_sequence(gesture)?;
        Ok(self.hmm.probability(&seq)?)
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn states(&self) -> usize {
        self.hmm.states()
    }

    pub fn observations(&self) -> usize {
        self.hmm.observations()
    }

    pub fn default_probability(&self) -> f64 {
        self.default_probability
    }

    pub fn quantizer(&self) -> &Quantizer {
        &self.quantizer
    }

    pub fn hmm(&self) -> &Hmm {
        &self.hmm
    }

    pub fn is_trained(&self) -> bool {
        self.quantizer.is_trained()
    }

    /// Writes the model as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Reads a model written by [`GestureModel::save`] and checks that its
    /// tables fit together.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = fs::read(path)?;
        let model: Self = serde_json::from_slice(&data)?;
        model.validate()?;
        Ok(model)
    }

    /// Checks that the quantizer and HMM agree on sizes and that each
    /// table has the shape it declares.
    pub fn validate(&self) -> Result<()> {
        self.quantizer.validate()?;
        self.hmm.validate()?;
        if self.hmm.observations() != DEFAULT_OBSERVATIONS {
            return Err(RecognizerError::Inconsistent {
                id: self.id,
                what: "hmm observation count",
                expected: DEFAULT_OBSERVATIONS,
                got: self.hmm.observations(),
            });
        }
        if self.quantizer.states() != self.hmm.states() {
            return Err(RecognizerError::Inconsistent {
                id: self.id,
                what: "quantizer state count",
                expected: self.hmm.states(),
                got: self.quantizer.states(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swipe(scale: f64) -> Gesture {
        Gesture::from_samples([
            [scale, 0.0, 1.0],
            [scale, 0.5, 1.0],
            [0.0, scale, 1.0],
            [-scale, 0.5, 1.0],
            [-scale, 0.0, 1.0],
        ])
    }

    #[test]
    fn new_model_is_untrained() {
        let m = GestureModel::new(3);
        assert_eq!(m.id(), 3);
        assert_eq!(m.states(), 8);
        assert_eq!(m.observations(), 14);
        assert!(!m.is_trained());
        assert_eq!(m.default_probability(), 0.0);
        assert!(matches!(
            m.matches(&swipe(10.0)),
            Err(RecognizerError::NotTrained { id: 3 })
        ));
    }

    #[test]
    fn train_sets_default_probability() {
        let examples = [swipe(10.0), swipe(11.0), swipe(9.0)];
        let mut m = GestureModel::new(1);
        m.train(&examples).unwrap();

        assert!(m.is_trained());
        let mean: f64 = examples.iter().map(|g| m.matches(g).unwrap()).sum::<f64>() / 3.0;
        assert!(m.default_probability() > 0.0);
        assert!((m.default_probability() - mean).abs() < 1e-15);
    }

    #[test]
    fn summary_radius_uses_averaged_bounds() {
        // Bounds: (0, 10) and (0, 20); averaged radius (0 + 15) / 2.
        let a = Gesture::from_samples([[10.0, 0.0, 0.0], [0.0, 0.0, 10.0]]);
        let b = Gesture::from_samples([[20.0, 0.0, 0.0], [0.0, 0.0, 20.0]]);
        let mut m = GestureModel::new(0);
        m.train(&[a, b]).unwrap();
        assert_eq!(m.quantizer().radius(), 7.5);
    }

    #[test]
    fn rejects_bad_training_sets() {
        let mut m = GestureModel::new(0);
        assert!(matches!(m.train(&[]), Err(RecognizerError::NoGestures)));
        assert!(matches!(
            m.train(&[swipe(1.0), Gesture::new()]),
            Err(RecognizerError::EmptyGesture { index: 1 })
        ));
        assert!(!m.is_trained());
    }

    #[test]
    fn validate_checks_parts_agree() {
        let mut m = GestureModel::new(5);
        m.train(&[swipe(10.0), swipe(11.0)]).unwrap();
        m.validate().unwrap();

        let mut other = m.clone();
        other.quantizer = Quantizer::new(4);
        assert!(matches!(
            other.validate(),
            Err(RecognizerError::Inconsistent { id: 5, expected: 8, got: 4, .. })
        ));

        let mut other = m.clone();
        other.hmm = Hmm::new(8, 10).unwrap();
        assert!(matches!(
            other.validate(),
            Err(RecognizerError::Inconsistent { expected: 14, got: 10, .. })
        ));
    }

    #[test]
    fn custom_state_count() {
        let m = GestureModel::with_states(2, 5);
        assert_eq!(m.states(), 5);
        assert_eq!(m.quantizer().states(), 5);
        assert_eq!(GestureModel::with_states(2, 0).states(), 1);
    }
}
