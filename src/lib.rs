//! # gng
//!
//! Growing Neural Gas: an online algorithm that learns the topology of a data
//! distribution as a graph of reference vectors, one sample at a time.
//!
//! The engine ([`GrowingNeuralGas`]) is strictly sequential and holds no
//! locks; callers with several producers must serialise samples themselves.
//! Read-only queries (`nearest`, `snapshot_positions`) take `&self`.

pub mod cluster;
/// Error types used across `gng`.
pub mod error;
pub mod gng;

pub use crate::gng::{
    Edge, EdgeId, GaussianSampler, GngConfig, GrowingNeuralGas, HealthCheck, Node, NodeId,
    SequenceSampler, StdNormalSampler, Topology, TopologyReport, Violation,
};
pub use cluster::{Clustering, GngClustering};
pub use error::{Error, Result};
