//! The growing neural gas update loop.

use ndarray::{Array1, Array2, ArrayView1};
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::config::GngConfig;
use super::sampler::{GaussianSampler, StdNormalSampler};
use super::topology::{Edge, EdgeId, Node, NodeId, Topology};
use crate::error::{Error, Result};

/// Growing neural gas over a fixed feature dimension.
///
/// Samples must be fed one at a time, in order: each step depends on the
/// graph left by the previous one. Queries take `&self` and may run
/// concurrently with each other, never with [`process_sample`].
///
/// [`process_sample`]: GrowingNeuralGas::process_sample
#[derive(Debug, Clone)]
pub struct GrowingNeuralGas<S = StdNormalSampler> {
    dim: usize,
    config: GngConfig,
    pub(crate) topology: Topology,
    sampler: S,
    samples_seen: u64,
}

impl GrowingNeuralGas<StdNormalSampler> {
    /// Create an engine that seeds from an entropy-initialised sampler.
    pub fn new(dim: usize, config: GngConfig) -> Result<Self> {
        Self::with_sampler(dim, config, StdNormalSampler::new())
    }

    /// Create an engine whose lazy seeding is reproducible.
    pub fn with_seed(dim: usize, config: GngConfig, seed: u64) -> Result<Self> {
        Self::with_sampler(dim, config, StdNormalSampler::seeded(seed))
    }
}

impl<S: GaussianSampler> GrowingNeuralGas<S> {
    /// Create an engine with an explicit Gaussian source.
    ///
    /// With `initial_positions` set, the two nodes and their edge exist
    /// immediately; otherwise the graph is seeded on the first sample.
    pub fn with_sampler(dim: usize, config: GngConfig, sampler: S) -> Result<Self> {
        config.validate()?;
        if dim == 0 {
            return Err(Error::InvalidConfiguration {
                name: "dim",
                message: "must be positive",
            });
        }

        let mut topology = Topology::new();
        if let Some(positions) = &config.initial_positions {
            if let Some(bad) = positions.iter().find(|p| p.len() != dim) {
                return Err(Error::DimensionMismatch {
                    expected: dim,
                    found: bad.len(),
                });
            }
            let [first, second] = positions;
            let a = topology.add_node(Array1::from(first.clone()));
            let b = topology.add_node(Array1::from(second.clone()));
            let _ = topology.add_edge(a, b);
        }

        Ok(Self {
            dim,
            config,
            topology,
            sampler,
            samples_seen: 0,
        })
    }

    /// Learn from one sample.
    pub fn process_sample(&mut self, x: &[f64]) -> Result<()> {
        self.check_dim(x)?;
        let x = ArrayView1::from(x);

        if self.topology.is_empty() {
            self.seed();
        }

        let ((winner, dist_sq), (runner_up, _)) = self.nearest_two(&x)?;
        self.samples_seen += 1;

        self.topology.age_edges_of(winner);

        if let Some(node) = self.topology.node_mut(winner) {
            node.error += dist_sq.sqrt();
            node.hits += 1;
        }

        let neighbors: Vec<NodeId> = self.topology.neighbors(winner).collect();
        self.move_toward(winner, &x, self.config.eps_b);
        for n in neighbors {
            self.move_toward(n, &x, self.config.eps_n);
        }

        match self.topology.edge_between(winner, runner_up) {
            Some(e) => {
                if let Some(edge) = self.topology.edge_mut(e) {
                    edge.age = 0;
                }
            }
            None => {
                let _ = self.topology.add_edge(winner, runner_up);
            }
        }

        self.prune_old_edges(winner);

        if self.samples_seen % self.config.insertion_interval as u64 == 0 {
            if self.topology.node_count() < self.config.max_nodes {
                self.insert_node();
            } else {
                debug!(
                    max_nodes = self.config.max_nodes,
                    "node cap reached; skipping insertion"
                );
            }
        }

        let decay = self.config.error_decay;
        for node in self.topology.nodes_mut() {
            node.error *= decay;
        }

        Ok(())
    }

    /// Learn from every row of `data`, in order.
    ///
    /// All rows are checked before the first one is processed.
    pub fn train(&mut self, data: &[Vec<f64>]) -> Result<()> {
        for x in data {
            self.check_dim(x)?;
        }
        for x in data {
            self.process_sample(x)?;
        }
        Ok(())
    }

    fn seed(&mut self) {
        let first = self.sampler.sample_gaussian(self.dim);
        let second = self.sampler.sample_gaussian(self.dim);
        let a = self.topology.add_node(first);
        let b = self.topology.add_node(second);
        let _ = self.topology.add_edge(a, b);
        debug!(dim = self.dim, "seeded empty graph with two random nodes");
    }

    fn move_toward(&mut self, id: NodeId, x: &ArrayView1<'_, f64>, eps: f64) {
        if let Some(node) = self.topology.node_mut(id) {
            let delta = x - &node.position;
            node.position.scaled_add(eps, &delta);
        }
    }

    /// Drop edges of `winner` older than `max_age`, then any endpoint left without edges.
    fn prune_old_edges(&mut self, winner: NodeId) {
        let max_age = self.config.max_age;
        let stale: Vec<EdgeId> = self
            .topology
            .incident_edges(winner)
            .filter(|&e| self.topology.edge(e).is_some_and(|edge| edge.age > max_age))
            .collect();

        for e in stale {
            let Some(edge) = self.topology.remove_edge(e) else {
                continue;
            };
            trace!(edge = %e, age = edge.age(), "edge aged out");
            let (a, b) = edge.endpoints();
            for end in [a, b] {
                if self.topology.degree(end) == Some(0) {
                    let _ = self.topology.remove_node(end);
                    trace!(node = %end, "removed isolated node");
                }
            }
        }
    }

    /// Insert a node halfway between the max-error node and its max-error neighbour.
    fn insert_node(&mut self) {
        let Some(q) = max_error(self.topology.nodes()) else {
            return;
        };
        let f = max_error(
            self.topology
                .neighbors(q)
                .filter_map(|n| self.topology.node(n).map(|node| (n, node))),
        );
        let Some(f) = f else {
            debug!(node = %q, "max-error node has no neighbours; skipping insertion");
            return;
        };

        let (Some(q_node), Some(f_node)) = (self.topology.node(q), self.topology.node(f)) else {
            return;
        };
        let position = (&q_node.position + &f_node.position) * 0.5;

        let r = self.topology.add_node(position);
        if let Some(e) = self.topology.edge_between(q, f) {
            let _ = self.topology.remove_edge(e);
        }
        let _ = self.topology.add_edge(q, r);
        let _ = self.topology.add_edge(f, r);

        let alpha = self.config.alpha;
        let mut scaled_sum = 0.0;
        for id in [q, f] {
            if let Some(node) = self.topology.node_mut(id) {
                node.error *= alpha;
                scaled_sum += node.error;
            }
        }
        if let Some(node) = self.topology.node_mut(r) {
            node.error = 0.5 * scaled_sum;
        }

        debug!(
            nodes = self.topology.node_count(),
            samples = self.samples_seen,
            "inserted node"
        );
    }
}

impl<S> GrowingNeuralGas<S> {
    /// Nearest node to `x` and its Euclidean distance.
    pub fn nearest(&self, x: &[f64]) -> Result<(NodeId, f64)> {
        self.check_dim(x)?;
        let x = ArrayView1::from(x);
        self.topology
            .nodes()
            .map(|(id, node)| (id, node.creation_order(), squared_distance(&x, node)))
            .min_by(|a, b| a.2.total_cmp(&b.2).then(a.1.cmp(&b.1)))
            .map(|(id, _, d)| (id, d.sqrt()))
            .ok_or(Error::InsufficientNodes {
                required: 1,
                found: 0,
            })
    }

    /// Winner and runner-up with their squared distances.
    ///
    /// Ties go to the earlier-created node.
    fn nearest_two(&self, x: &ArrayView1<'_, f64>) -> Result<((NodeId, f64), (NodeId, f64))> {
        let mut best: Option<(NodeId, u64, f64)> = None;
        let mut second: Option<(NodeId, u64, f64)> = None;
        let closer = |a: &(NodeId, u64, f64), b: &(NodeId, u64, f64)| {
            a.2.total_cmp(&b.2).then(a.1.cmp(&b.1)).is_lt()
        };

        for (id, node) in self.topology.nodes() {
            let cand = (id, node.creation_order(), squared_distance(x, node));
            if best.as_ref().map_or(true, |b| closer(&cand, b)) {
                second = best;
                best = Some(cand);
            } else if second.as_ref().map_or(true, |s| closer(&cand, s)) {
                second = Some(cand);
            }
        }

        match (best, second) {
            (Some((w, _, dw)), Some((r, _, dr))) => Ok(((w, dw), (r, dr))),
            _ => Err(Error::InsufficientNodes {
                required: 2,
                found: self.topology.node_count(),
            }),
        }
    }

    /// Positions of all nodes in creation order, one row per node.
    pub fn snapshot_positions(&self) -> Array2<f64> {
        let ids = self.topology.node_ids_by_creation();
        let mut out = Array2::zeros((ids.len(), self.dim));
        for (row, id) in ids.iter().enumerate() {
            if let Some(node) = self.topology.node(*id) {
                out.row_mut(row).assign(&node.position);
            }
        }
        out
    }

    fn check_dim(&self, x: &[f64]) -> Result<()> {
        if x.len() != self.dim {
            return Err(Error::DimensionMismatch {
                expected: self.dim,
                found: x.len(),
            });
        }
        Ok(())
    }

    fn check_batch(&self, data: &[Vec<f64>]) -> Result<()> {
        for x in data {
            self.check_dim(x)?;
        }
        if !data.is_empty() && self.topology.is_empty() {
            return Err(Error::InsufficientNodes {
                required: 1,
                found: 0,
            });
        }
        Ok(())
    }

    /// Feature dimension.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Configuration the engine was built with.
    pub fn config(&self) -> &GngConfig {
        &self.config
    }

    /// Total samples processed.
    pub fn samples_seen(&self) -> u64 {
        self.samples_seen
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.topology.node_count()
    }

    /// Number of live edges.
    pub fn edge_count(&self) -> usize {
        self.topology.edge_count()
    }

    /// Read-only view of the graph.
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Look up a node.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.topology.node(id)
    }

    /// Direct neighbours of a node.
    pub fn neighbors(&self, id: NodeId) -> Vec<NodeId> {
        self.topology.neighbors(id).collect()
    }

    /// Edge between two nodes, if present.
    pub fn edge_between(&self, a: NodeId, b: NodeId) -> Option<&Edge> {
        self.topology
            .edge_between(a, b)
            .and_then(|e| self.topology.edge(e))
    }

    /// Live node handles in creation order.
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.topology.node_ids_by_creation()
    }

    /// Live edges.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.topology.edges().map(|(_, e)| e)
    }
}

#[cfg(not(feature = "parallel"))]
impl<S> GrowingNeuralGas<S> {
    /// Nearest node and Euclidean distance for every row of `data`.
    pub fn nearest_batch(&self, data: &[Vec<f64>]) -> Result<(Vec<NodeId>, Vec<f64>)> {
        self.check_batch(data)?;
        let hits = data
            .iter()
            .map(|x| self.nearest(x))
            .collect::<Result<Vec<_>>>()?;
        Ok(hits.into_iter().unzip())
    }
}

#[cfg(feature = "parallel")]
impl<S: Sync> GrowingNeuralGas<S> {
    /// Nearest node and Euclidean distance for every row of `data`.
    pub fn nearest_batch(&self, data: &[Vec<f64>]) -> Result<(Vec<NodeId>, Vec<f64>)> {
        self.check_batch(data)?;
        let hits = data
            .par_iter()
            .map(|x| self.nearest(x))
            .collect::<Result<Vec<_>>>()?;
        Ok(hits.into_iter().unzip())
    }
}

#[inline]
fn squared_distance(x: &ArrayView1<'_, f64>, node: &Node) -> f64 {
    x.iter()
        .zip(node.position.iter())
        .map(|(a, b)| (a - b).powi(2))
        .sum()
}

/// Highest-error candidate; ties go to the earlier-created node.
fn max_error<'a>(candidates: impl Iterator<Item = (NodeId, &'a Node)>) -> Option<NodeId> {
    candidates
        .min_by(|(_, a), (_, b)| {
            b.error
                .total_cmp(&a.error)
                .then(a.creation_order().cmp(&b.creation_order()))
        })
        .map(|(id, _)| id)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, unused_results)]
mod tests {
    use super::*;
    use crate::gng::sampler::SequenceSampler;
    use crate::gng::validate::HealthCheck;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn bootstrap_config() -> GngConfig {
        GngConfig::new()
            .with_initial_positions(vec![0.0, 0.0], vec![1.0, 1.0])
            .with_max_age(50)
            .with_insertion_interval(100)
            .with_eps_b(0.2)
            .with_eps_n(0.006)
            .with_alpha(0.5)
            .with_error_decay(0.995)
            .with_max_nodes(1000)
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    fn noisy_stream(n: usize, seed: u64) -> Vec<Vec<f64>> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n)
            .map(|_| {
                let centre = if rng.random::<bool>() { 3.0 } else { -3.0 };
                vec![
                    centre + rng.random_range(-1.0..1.0),
                    rng.random_range(-1.0..1.0),
                ]
            })
            .collect()
    }

    #[test]
    fn two_point_bootstrap() {
        let mut gng = GrowingNeuralGas::new(2, bootstrap_config()).unwrap();
        let [a, b]: [NodeId; 2] = gng.node_ids().try_into().unwrap();
        assert_eq!(gng.edge_count(), 1);

        gng.process_sample(&[0.1, 0.1]).unwrap();

        let p = gng.snapshot_positions();
        assert!(close(p[[0, 0]], 0.02) && close(p[[0, 1]], 0.02));
        assert!(close(p[[1, 0]], 0.9946) && close(p[[1, 1]], 0.9946));

        assert_eq!(gng.node_count(), 2);
        assert_eq!(gng.edge_between(a, b).unwrap().age(), 0);

        let winner = gng.node(a).unwrap();
        assert_eq!(winner.hits(), 1);
        assert!(close(winner.error(), 0.02f64.sqrt() * 0.995));
        assert_eq!(gng.node(b).unwrap().error(), 0.0);
    }

    #[test]
    fn explicit_start_is_connected_at_construction() {
        let gng = GrowingNeuralGas::new(2, bootstrap_config()).unwrap();
        assert_eq!(gng.node_count(), 2);
        assert_eq!(gng.edge_count(), 1);
        assert_eq!(gng.samples_seen(), 0);
    }

    #[test]
    fn lazy_seed_uses_sampler_once() {
        let sampler = SequenceSampler::new(vec![0.0, 0.0, 1.0, 1.0]);
        let mut gng =
            GrowingNeuralGas::with_sampler(2, GngConfig::new().with_max_nodes(1000), sampler)
                .unwrap();
        assert_eq!(gng.node_count(), 0);

        gng.process_sample(&[0.1, 0.1]).unwrap();
        let mut explicit = GrowingNeuralGas::new(2, bootstrap_config()).unwrap();
        explicit.process_sample(&[0.1, 0.1]).unwrap();
        assert_eq!(gng.snapshot_positions(), explicit.snapshot_positions());
        assert_eq!(gng.edge_count(), 1);

        // A second sample must not reseed.
        gng.process_sample(&[0.5, 0.5]).unwrap();
        assert_eq!(gng.node_count(), 2);
    }

    #[test]
    fn insertion_triggers_on_the_interval() {
        let mut gng = GrowingNeuralGas::new(2, bootstrap_config()).unwrap();
        let samples = [[0.1, 0.1], [0.9, 0.8]];
        for i in 0..99 {
            gng.process_sample(&samples[i % 2]).unwrap();
            assert_eq!(gng.node_count(), 2, "grew early at sample {}", i + 1);
        }

        let before = gng.snapshot_positions();
        gng.process_sample(&samples[1]).unwrap();
        assert_eq!(gng.node_count(), 3);

        let after = gng.snapshot_positions();
        let midpoint = (&after.row(0) + &after.row(1)) * 0.5;
        assert_eq!(after.row(2), midpoint);
        // The inserting step still moved the winner, so the rows differ from before.
        assert_ne!(before.row(1), after.row(1));

        let [a, b, r]: [NodeId; 3] = gng.node_ids().try_into().unwrap();
        assert!(gng.edge_between(a, b).is_none());
        assert!(gng.edge_between(a, r).is_some());
        assert!(gng.edge_between(b, r).is_some());
    }

    #[test]
    fn insertion_scales_errors_then_decay_applies_to_all_three() {
        let config = GngConfig::new()
            .with_initial_positions(vec![0.0, 0.0], vec![1.0, 1.0])
            .with_insertion_interval(1)
            .with_alpha(0.5)
            .with_error_decay(0.9);
        let mut gng = GrowingNeuralGas::new(2, config).unwrap();
        gng.process_sample(&[0.3, 0.4]).unwrap();

        let [q, f, r]: [NodeId; 3] = gng.node_ids().try_into().unwrap();
        let won = (0.3f64.powi(2) + 0.4f64.powi(2)).sqrt();
        let q_scaled = won * 0.5;
        // f had not won anything, so scaling leaves it at zero.
        let f_scaled = 0.0;
        let r_mean = 0.5 * (0.0 + q_scaled + f_scaled);
        let bits = |id| gng.node(id).unwrap().error().to_bits();
        assert_eq!(bits(q), (q_scaled * 0.9).to_bits());
        assert_eq!(bits(f), (f_scaled * 0.9).to_bits());
        assert_eq!(bits(r), (r_mean * 0.9).to_bits());
    }

    #[test]
    fn stale_edge_is_removed_with_its_isolated_endpoint() {
        let config = GngConfig::new()
            .with_initial_positions(vec![0.0, 0.0], vec![10.0, 0.0])
            .with_max_age(2)
            .with_insertion_interval(1000);
        let mut gng = GrowingNeuralGas::new(2, config).unwrap();
        let [a, b]: [NodeId; 2] = gng.node_ids().try_into().unwrap();
        let c = gng.topology.add_node(ndarray::array![0.0, 1.0]);
        gng.topology.add_edge(a, c).unwrap();

        for _ in 0..2 {
            gng.process_sample(&[0.0, 0.4]).unwrap();
        }
        assert_eq!(gng.edge_between(a, b).unwrap().age(), 2);
        assert_eq!(gng.node_count(), 3);

        gng.process_sample(&[0.0, 0.4]).unwrap();
        assert!(gng.node(b).is_none());
        assert_eq!(gng.node_count(), 2);
        assert_eq!(gng.edge_count(), 1);
        assert_eq!(gng.edge_between(a, c).unwrap().age(), 0);
        assert!(gng.is_healthy());
    }

    #[test]
    fn node_cap_is_reached_then_held() {
        let config = bootstrap_config()
            .with_insertion_interval(1)
            .with_max_nodes(4);
        let mut gng = GrowingNeuralGas::new(2, config).unwrap();
        let stream = noisy_stream(200, 3);

        gng.process_sample(&stream[0]).unwrap();
        assert_eq!(gng.node_count(), 3);
        gng.process_sample(&stream[1]).unwrap();
        assert_eq!(gng.node_count(), 4);

        for (i, x) in stream.iter().enumerate().skip(2) {
            gng.process_sample(x).unwrap();
            assert_eq!(gng.node_count(), 4, "count left the cap at sample {}", i + 1);
        }
        assert_eq!(gng.node_count(), 4);
        assert!(gng.is_healthy());
    }

    #[test]
    fn wrong_dimension_is_rejected_before_any_mutation() {
        let mut gng = GrowingNeuralGas::with_seed(2, GngConfig::new(), 1).unwrap();
        let err = gng.process_sample(&[1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(
            err,
            Error::DimensionMismatch {
                expected: 2,
                found: 3
            }
        );
        assert_eq!(gng.node_count(), 0);
        assert_eq!(gng.samples_seen(), 0);
        assert!(gng.nearest(&[1.0]).is_err());
    }

    #[test]
    fn batch_training_validates_every_row_first() {
        let mut gng = GrowingNeuralGas::new(2, bootstrap_config()).unwrap();
        let data = vec![vec![0.1, 0.1], vec![0.2, 0.2], vec![0.3]];
        assert!(gng.train(&data).is_err());
        assert_eq!(gng.samples_seen(), 0);
        assert_eq!(gng.snapshot_positions()[[0, 0]], 0.0);
    }

    #[test]
    fn nearest_on_unseeded_graph_fails() {
        let gng = GrowingNeuralGas::with_seed(2, GngConfig::new(), 1).unwrap();
        assert_eq!(
            gng.nearest(&[0.0, 0.0]).unwrap_err(),
            Error::InsufficientNodes {
                required: 1,
                found: 0
            }
        );
        assert!(gng.nearest_batch(&[vec![0.0, 0.0]]).is_err());
        assert!(gng.nearest_batch(&[]).unwrap().0.is_empty());
    }

    #[test]
    fn nearest_reports_euclidean_distance_and_breaks_ties_by_age() {
        let config = GngConfig::new().with_initial_positions(vec![0.0, 0.0], vec![2.0, 0.0]);
        let gng = GrowingNeuralGas::new(2, config).unwrap();
        let [a, b]: [NodeId; 2] = gng.node_ids().try_into().unwrap();

        let (id, d) = gng.nearest(&[0.0, 3.0]).unwrap();
        assert_eq!(id, a);
        assert!(close(d, 3.0));

        let (id, _) = gng.nearest(&[1.0, 0.0]).unwrap();
        assert_eq!(id, a);
        let (id, _) = gng.nearest(&[1.5, 0.0]).unwrap();
        assert_eq!(id, b);
    }

    #[test]
    fn nearest_batch_matches_single_queries() {
        let mut gng = GrowingNeuralGas::with_seed(2, GngConfig::new().with_insertion_interval(10), 9)
            .unwrap();
        gng.train(&noisy_stream(300, 4)).unwrap();
        let queries = noisy_stream(20, 5);
        let (ids, dists) = gng.nearest_batch(&queries).unwrap();
        for (i, q) in queries.iter().enumerate() {
            let (id, d) = gng.nearest(q).unwrap();
            assert_eq!(ids[i], id);
            assert_eq!(dists[i], d);
        }
    }

    #[test]
    fn identical_runs_are_bit_identical() {
        let config = GngConfig::new()
            .with_insertion_interval(7)
            .with_max_age(10)
            .with_max_nodes(25);
        let data = noisy_stream(1000, 11);

        let mut first = GrowingNeuralGas::with_seed(2, config.clone(), 42).unwrap();
        let mut second = GrowingNeuralGas::with_seed(2, config, 42).unwrap();
        first.train(&data).unwrap();
        second.train(&data).unwrap();

        assert_eq!(first.snapshot_positions(), second.snapshot_positions());
        let edges = |g: &GrowingNeuralGas| {
            g.topology()
                .edges()
                .map(|(id, e)| (id, e.clone()))
                .collect::<Vec<_>>()
        };
        assert_eq!(edges(&first), edges(&second));
        let errors = |g: &GrowingNeuralGas| {
            g.node_ids()
                .iter()
                .map(|&id| g.node(id).unwrap().error().to_bits())
                .collect::<Vec<_>>()
        };
        assert_eq!(errors(&first), errors(&second));
    }

    #[test]
    fn construction_rejects_bad_inputs() {
        assert!(matches!(
            GrowingNeuralGas::new(0, GngConfig::new()),
            Err(Error::InvalidConfiguration { name: "dim", .. })
        ));
        assert!(matches!(
            GrowingNeuralGas::new(3, bootstrap_config()),
            Err(Error::DimensionMismatch {
                expected: 3,
                found: 2
            })
        ));
        assert!(GrowingNeuralGas::new(2, GngConfig::new().with_max_age(0)).is_err());
    }

    #[test]
    fn learns_two_separated_blobs() {
        let config = GngConfig::new()
            .with_insertion_interval(20)
            .with_max_age(30)
            .with_max_nodes(20);
        let mut gng = GrowingNeuralGas::with_seed(2, config, 7).unwrap();
        for _ in 0..5 {
            gng.train(&noisy_stream(1000, 12)).unwrap();
        }
        assert!(gng.node_count() > 2);
        let (_, d_left) = gng.nearest(&[-3.0, 0.0]).unwrap();
        let (_, d_right) = gng.nearest(&[3.0, 0.0]).unwrap();
        assert!(d_left < 1.0, "left blob not covered: {d_left}");
        assert!(d_right < 1.0, "right blob not covered: {d_right}");
    }

    proptest! {
        #[test]
        fn invariants_hold_after_every_sample(
            points in proptest::collection::vec((-5.0f64..5.0, -5.0f64..5.0), 1..300),
            max_age in 1u32..20,
            interval in 1usize..15,
            max_nodes in 2usize..30,
            seed in any::<u64>(),
        ) {
            let config = GngConfig::new()
                .with_max_age(max_age)
                .with_insertion_interval(interval)
                .with_max_nodes(max_nodes);
            let mut gng = GrowingNeuralGas::with_seed(2, config, seed).unwrap();

            for (x, y) in points {
                let before = gng.node_count();
                gng.process_sample(&[x, y]).unwrap();
                let after = gng.node_count();

                let report = gng.health_check();
                prop_assert!(report.is_healthy(), "{}", report);
                prop_assert!(after <= max_nodes);
                prop_assert!(after >= 2);
                if before > 0 {
                    if gng.samples_seen() % interval as u64 == 0 {
                        prop_assert!(after <= before + 1);
                    } else {
                        prop_assert!(after <= before);
                    }
                }
            }
        }

        #[test]
        fn nearest_agrees_with_brute_force(
            points in proptest::collection::vec((-5.0f64..5.0, -5.0f64..5.0), 1..200),
            queries in proptest::collection::vec((-6.0f64..6.0, -6.0f64..6.0), 1..20),
            seed in any::<u64>(),
        ) {
            let config = GngConfig::new().with_insertion_interval(5).with_max_age(8);
            let mut gng = GrowingNeuralGas::with_seed(2, config, seed).unwrap();
            for (x, y) in points {
                gng.process_sample(&[x, y]).unwrap();
            }

            let positions = gng.snapshot_positions();
            for (qx, qy) in queries {
                let (id, d) = gng.nearest(&[qx, qy]).unwrap();
                let best = positions
                    .rows()
                    .into_iter()
                    .map(|r| (r[0] - qx).powi(2) + (r[1] - qy).powi(2))
                    .fold(f64::INFINITY, f64::min);
                prop_assert!((d * d - best).abs() < 1e-9);

                let p = gng.node(id).unwrap().position();
                let own = (p[0] - qx).powi(2) + (p[1] - qy).powi(2);
                prop_assert_eq!(own, best);
            }
        }
    }
}
