use serde::{Deserialize, Serialize};
use tracing::debug;
use wiigee_gesture::Gesture;

use crate::{GestureModel, Result};

/// Result of a classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Match {
    /// Id of the winning model.
    pub id: u32,

    /// Posterior probability of the winning model among all models.
    pub probability: f64,
}

/// Bayes classifier over a set of trained gesture models.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    models: Vec<GestureModel>,
}

impl Classifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, model: GestureModel) {
        self.models.push(model);
    }

    pub fn models(&self) -> &[GestureModel] {
        &self.models
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Picks the model with the highest posterior for `gesture`.
    ///
    /// Each model scores `default_probability * matches(gesture)`; the
    /// posterior is its score over the sum of all scores. Returns `None`
    /// when there are no models or every score is zero. Ties go to the
    /// model added first.
    pub fn classify(&self, gesture: &Gesture) -> Result<Option<Match>> {
        let mut scores = Vec::with_capacity(self.models.len());
        for m in &self.models {
            scores.push(m.default_probability() * m.matches(gesture)?);
        }

        let sum: f64 = scores.iter().sum();
        if !(sum > 0.0 && sum.is_finite()) {
            debug!(models = self.models.len(), "classifier: no model matches");
            return Ok(None);
        }

        let mut best: Option<Match> = None;
        for (m, score) in self.models.iter().zip(&scores) {
            let probability = score / sum;
            debug!(id = m.id(), probability, "classifier: score");
            if best.is_none_or(|b| probability > b.probability) {
                best = Some(Match { id: m.id(), probability });
            }
        }
        Ok(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_classifier_matches_nothing() {
        let c = Classifier::new();
        assert!(c.is_empty());
        let g = Gesture::from_samples([[1.0, 2.0, 3.0]]);
        assert_eq!(c.classify(&g).unwrap(), None);
    }

    #[test]
    fn untrained_model_is_an_error() {
        let mut c = Classifier::new();
        c.add(GestureModel::new(0));
        let g = Gesture::from_samples([[1.0, 2.0, 3.0]]);
        assert!(c.classify(&g).is_err());
    }
}
