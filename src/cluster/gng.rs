//! Clustering by the connected components of a growing neural gas.
//!
//! Trains a fresh graph on the data, then gives each point the component
//! label of its nearest node. The number of clusters is discovered, not
//! requested: components appear as edges between regions age out.

use super::traits::Clustering;
use crate::error::{Error, Result};
use crate::gng::{GngConfig, GrowingNeuralGas, StdNormalSampler};

/// Fit/predict front end over [`GrowingNeuralGas`].
#[derive(Debug, Clone)]
pub struct GngClustering {
    config: GngConfig,
    /// Passes over the data.
    epochs: usize,
    /// Random seed for lazy seeding.
    seed: Option<u64>,
}

impl GngClustering {
    /// Create a clusterer from an engine configuration.
    pub fn new(config: GngConfig) -> Self {
        Self {
            config,
            epochs: 1,
            seed: None,
        }
    }

    /// Set the number of passes over the data.
    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    /// Set random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Train an engine on `data` and label its components.
    pub fn fit(&self, data: &[Vec<f64>]) -> Result<GrowingNeuralGas> {
        if data.is_empty() {
            return Err(Error::EmptyInput);
        }
        if self.epochs == 0 {
            return Err(Error::InvalidConfiguration {
                name: "epochs",
                message: "must be at least 1",
            });
        }

        let sampler = match self.seed {
            Some(s) => StdNormalSampler::seeded(s),
            None => StdNormalSampler::new(),
        };
        let mut gng = GrowingNeuralGas::with_sampler(data[0].len(), self.config.clone(), sampler)?;

        for _ in 0..self.epochs {
            gng.train(data)?;
        }
        let _ = gng.label_components();
        Ok(gng)
    }
}

impl Default for GngClustering {
    fn default() -> Self {
        Self::new(GngConfig::default())
    }
}

impl Clustering for GngClustering {
    fn fit_predict(&self, data: &[Vec<f64>]) -> Result<Vec<usize>> {
        let gng = self.fit(data)?;
        let (nodes, _) = gng.nearest_batch(data)?;
        Ok(nodes
            .into_iter()
            .map(|id| gng.node(id).and_then(|n| n.label()).unwrap_or(0))
            .collect())
    }

    /// Components are only known after fitting.
    fn n_clusters(&self) -> usize {
        0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn two_blobs() -> Vec<Vec<f64>> {
        let mut data = Vec::new();
        for i in 0..200 {
            let t = i as f64 * 0.618_033_988_75;
            let (dx, dy) = ((t * 7.0).sin() * 0.5, (t * 11.0).cos() * 0.5);
            data.push(vec![dx, dy]);
            data.push(vec![20.0 + dx, dy]);
        }
        data
    }

    #[test]
    fn separates_distant_blobs() {
        let config = GngConfig::new()
            .with_initial_positions(vec![0.0, 0.0], vec![20.0, 0.0])
            .with_insertion_interval(10)
            .with_max_nodes(12);
        let labels = GngClustering::new(config)
            .with_epochs(10)
            .with_seed(42)
            .fit_predict(&two_blobs())
            .unwrap();

        assert_eq!(labels.len(), 400);
        let left = labels[0];
        let right = labels[1];
        assert_ne!(left, right);
        for (i, &label) in labels.iter().enumerate() {
            let expected = if i % 2 == 0 { left } else { right };
            assert_eq!(label, expected, "point {i} mislabelled");
        }
    }

    #[test]
    fn deterministic_with_seed() {
        let config = GngConfig::new().with_insertion_interval(10);
        let a = GngClustering::new(config.clone())
            .with_seed(3)
            .fit_predict(&two_blobs())
            .unwrap();
        let b = GngClustering::new(config)
            .with_seed(3)
            .fit_predict(&two_blobs())
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_input_error() {
        let data: Vec<Vec<f64>> = vec![];
        assert_eq!(
            GngClustering::default().fit_predict(&data),
            Err(Error::EmptyInput)
        );
    }

    #[test]
    fn ragged_input_error() {
        let data = vec![vec![0.0, 0.0], vec![1.0]];
        assert!(matches!(
            GngClustering::default().fit_predict(&data),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn zero_epochs_error() {
        let data = vec![vec![0.0, 0.0]];
        assert!(GngClustering::default()
            .with_epochs(0)
            .fit_predict(&data)
            .is_err());
    }

    #[test]
    fn cluster_count_is_unknown_before_fit() {
        assert_eq!(GngClustering::default().n_clusters(), 0);
    }
}
