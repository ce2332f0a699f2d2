//! Engine configuration.

use crate::error::{Error, Result};

/// Parameters of the growing neural gas update rule.
///
/// Real-valued rates outside their typical ranges are accepted; they only
/// make the learned graph degenerate. [`GngConfig::validate`] rejects
/// structurally invalid values (zero ages or intervals, fewer than two nodes).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GngConfig {
    /// Movement of the winner toward the sample, `0 < eps_b < 1`.
    pub eps_b: f64,
    /// Movement of the winner's neighbours, `0 < eps_n < eps_b`.
    pub eps_n: f64,
    /// Edges older than this are removed.
    pub max_age: u32,
    /// Insert one node every this many samples ("lambda").
    pub insertion_interval: usize,
    /// Error scaling of the two nodes a new node is inserted between.
    pub alpha: f64,
    /// Per-sample multiplicative decay of every node's error.
    pub error_decay: f64,
    /// Hard cap on the node count.
    pub max_nodes: usize,
    /// Positions of the two starting nodes. Drawn from a standard normal
    /// on first use when absent.
    pub initial_positions: Option<[Vec<f64>; 2]>,
}

impl Default for GngConfig {
    fn default() -> Self {
        Self {
            eps_b: 0.2,
            eps_n: 0.006,
            max_age: 50,
            insertion_interval: 100,
            alpha: 0.5,
            error_decay: 0.995,
            max_nodes: i32::MAX as usize,
            initial_positions: None,
        }
    }
}

impl GngConfig {
    /// Configuration with the reference defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the winner's movement rate.
    pub fn with_eps_b(mut self, eps_b: f64) -> Self {
        self.eps_b = eps_b;
        self
    }

    /// Set the neighbours' movement rate.
    pub fn with_eps_n(mut self, eps_n: f64) -> Self {
        self.eps_n = eps_n;
        self
    }

    /// Set the maximum edge age.
    pub fn with_max_age(mut self, max_age: u32) -> Self {
        self.max_age = max_age;
        self
    }

    /// Set the node insertion interval.
    pub fn with_insertion_interval(mut self, insertion_interval: usize) -> Self {
        self.insertion_interval = insertion_interval;
        self
    }

    /// Set the error scaling applied on insertion.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the global per-sample error decay.
    pub fn with_error_decay(mut self, error_decay: f64) -> Self {
        self.error_decay = error_decay;
        self
    }

    /// Set the maximum node count.
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// Start from two explicit, connected nodes.
    pub fn with_initial_positions(mut self, first: Vec<f64>, second: Vec<f64>) -> Self {
        self.initial_positions = Some([first, second]);
        self
    }

    /// Check the structural constraints.
    pub fn validate(&self) -> Result<()> {
        if self.max_age == 0 {
            return Err(Error::InvalidConfiguration {
                name: "max_age",
                message: "must be positive",
            });
        }
        if self.insertion_interval == 0 {
            return Err(Error::InvalidConfiguration {
                name: "insertion_interval",
                message: "must be positive",
            });
        }
        if self.max_nodes < 2 {
            return Err(Error::InvalidConfiguration {
                name: "max_nodes",
                message: "must be at least 2",
            });
        }
        Ok(())
    }
}
