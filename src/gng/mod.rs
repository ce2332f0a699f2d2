//! Growing Neural Gas (Fritzke, 1995).
//!
//! Learns the topology of a data distribution online: a graph of reference
//! vectors whose edges connect nodes with adjacent Voronoi regions. The graph
//! grows where the quantisation error is largest and sheds edges that stop
//! being supported by the data.
//!
//! # The Update Step
//!
//! For each sample `x`, in order:
//!
//! 1. Seed two connected random nodes if the graph is empty
//! 2. Find the nearest node `s1` and second-nearest `s2`
//! 3. Age every edge of `s1` by one
//! 4. Add `||x - s1||` to the error of `s1`
//! 5. Move `s1` by `eps_b · (x - s1)` and each neighbour `n` by `eps_n · (x - n)`
//! 6. Reset the `s1`–`s2` edge to age 0, creating it if missing
//! 7. Remove edges of `s1` older than `max_age`, then nodes left without edges
//! 8. Every `λ` samples, insert a node (below) unless `max_nodes` is reached
//! 9. Multiply every node's error by `d`
//!
//! **Insertion**: take `q`, the node with the largest error, and `f`, its
//! neighbour with the largest error. Put `r` at `(q + f) / 2`, replace the
//! edge `q`–`f` with `q`–`r` and `r`–`f`, scale the errors of `q` and `f` by
//! `α`, and give `r` the mean of their scaled errors.
//!
//! Ties in every argmin/argmax go to the earliest-created node, so a run is
//! fully determined by its configuration, sampler and input order.
//!
//! # Competitive Hebbian Learning
//!
//! Step 6 is the part that learns topology: connecting the two nearest nodes
//! of every sample builds, over time, the subgraph of the Delaunay
//! triangulation restricted to where data actually lives. Aging (steps 3 and
//! 7) forgets edges whose supporting region has moved.
//!
//! # Example
//!
//! ```rust
//! use gng::{GngConfig, GrowingNeuralGas};
//!
//! let config = GngConfig::default()
//!     .with_initial_positions(vec![0.0, 0.0], vec![1.0, 1.0])
//!     .with_insertion_interval(10);
//! let mut gng = GrowingNeuralGas::new(2, config).unwrap();
//!
//! for i in 0..100 {
//!     let t = i as f64 * 0.1;
//!     gng.process_sample(&[t.cos(), t.sin()]).unwrap();
//! }
//! assert!(gng.node_count() > 2);
//!
//! let (_, dist) = gng.nearest(&[1.0, 0.0]).unwrap();
//! assert!(dist.is_finite());
//! ```
//!
//! # References
//!
//! Fritzke (1995). "A Growing Neural Gas Network Learns Topologies."
//! NIPS 7, pp. 625-632.

mod components;
mod config;
mod engine;
mod sampler;
mod topology;
mod validate;

pub use config::GngConfig;
pub use engine::GrowingNeuralGas;
pub use sampler::{GaussianSampler, SequenceSampler, StdNormalSampler};
pub use topology::{Edge, EdgeId, Node, NodeId, Topology};
pub use validate::{validate_topology, HealthCheck, TopologyReport, Violation};
