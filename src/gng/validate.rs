//! Structural health checks for the learned graph.
//!
//! Verifies the invariants every processed sample must leave intact:
//! - no self-edges
//! - at most one edge per unordered node pair
//! - no edge pointing at a removed node
//! - no node without edges
//! - node count within the configured cap
//!
//! plus agreement between the endpoints an edge records and the nodes the
//! underlying graph actually links it to.
//!
//! # Example
//!
//! ```rust
//! use gng::{GngConfig, GrowingNeuralGas, HealthCheck};
//!
//! let mut gng = GrowingNeuralGas::with_seed(2, GngConfig::default(), 1).unwrap();
//! gng.process_sample(&[0.5, -0.5]).unwrap();
//!
//! let report = gng.health_check();
//! assert!(report.is_healthy(), "{}", report);
//! ```

use std::collections::HashSet;
use std::fmt;

use super::engine::GrowingNeuralGas;
use super::topology::{EdgeId, NodeId, Topology};

/// A graph property found broken by a health check.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// Edge whose two endpoints are the same node.
    SelfEdge { edge: EdgeId, node: NodeId },
    /// Edge with an endpoint that no longer resolves.
    DanglingEdge { edge: EdgeId, node: NodeId },
    /// Edge whose recorded endpoints differ from the nodes it links.
    EndpointMismatch { edge: EdgeId },
    /// Second edge between an already connected pair.
    DuplicateEdge { a: NodeId, b: NodeId },
    /// Node without edges.
    IsolatedNode { node: NodeId },
    /// Cumulative error that is negative or NaN.
    InvalidError { node: NodeId, error: f64 },
    /// Position with an infinite or NaN coordinate.
    NonFinitePosition { node: NodeId },
    /// Position whose length differs from the engine dimension.
    WrongDimension {
        node: NodeId,
        expected: usize,
        found: usize,
    },
    /// More nodes than `max_nodes`.
    OverCapacity { nodes: usize, max_nodes: usize },
}

impl Violation {
    /// Node involved, if the violation is tied to one.
    pub fn node(&self) -> Option<NodeId> {
        match *self {
            Violation::SelfEdge { node, .. }
            | Violation::DanglingEdge { node, .. }
            | Violation::IsolatedNode { node }
            | Violation::InvalidError { node, .. }
            | Violation::NonFinitePosition { node }
            | Violation::WrongDimension { node, .. } => Some(node),
            Violation::DuplicateEdge { a, .. } => Some(a),
            Violation::EndpointMismatch { .. } | Violation::OverCapacity { .. } => None,
        }
    }

    /// Whether further updates on the graph are meaningless.
    ///
    /// Only a non-finite position is tolerated: it is reachable from
    /// non-finite input without any bookkeeping being wrong.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Violation::NonFinitePosition { .. })
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::SelfEdge { edge, node } => write!(f, "self-edge {edge} on node {node}"),
            Violation::DanglingEdge { edge, node } => {
                write!(f, "edge {edge} references removed node {node}")
            }
            Violation::EndpointMismatch { edge } => {
                write!(f, "edge {edge} records endpoints it does not link")
            }
            Violation::DuplicateEdge { a, b } => write!(f, "duplicate edge between {a} and {b}"),
            Violation::IsolatedNode { node } => write!(f, "isolated node {node}"),
            Violation::InvalidError { node, error } => {
                write!(f, "node {node} has invalid cumulative error {error}")
            }
            Violation::NonFinitePosition { node } => {
                write!(f, "node {node} has a non-finite position")
            }
            Violation::WrongDimension {
                node,
                expected,
                found,
            } => write!(
                f,
                "node {node} position has dimension {found}, expected {expected}"
            ),
            Violation::OverCapacity { nodes, max_nodes } => {
                write!(f, "node count {nodes} exceeds max_nodes {max_nodes}")
            }
        }
    }
}

/// Health report with graph statistics.
#[derive(Debug, Clone)]
pub struct TopologyReport {
    /// Everything found broken, in discovery order.
    pub violations: Vec<Violation>,
    /// Live nodes.
    pub node_count: usize,
    /// Live edges.
    pub edge_count: usize,
    /// Nodes without edges.
    pub isolated_count: usize,
    /// Average node degree.
    pub mean_degree: f64,
}

impl TopologyReport {
    /// No fatal violations.
    pub fn is_healthy(&self) -> bool {
        !self.violations.iter().any(Violation::is_fatal)
    }
}

impl fmt::Display for TopologyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Topology Health Report")?;
        writeln!(f, "======================")?;
        writeln!(f, "Nodes: {} ({} isolated)", self.node_count, self.isolated_count)?;
        writeln!(f, "Edges: {}", self.edge_count)?;
        writeln!(f, "Mean degree: {:.2}", self.mean_degree)?;
        if self.violations.is_empty() {
            return write!(f, "No violations");
        }
        writeln!(f, "Violations: {}", self.violations.len())?;
        for v in &self.violations {
            writeln!(f, "  {v}")?;
        }
        Ok(())
    }
}

/// Types that can be health-checked.
pub trait HealthCheck {
    /// Perform a health check and return a report.
    fn health_check(&self) -> TopologyReport;

    /// Quick check: returns true if healthy.
    fn is_healthy(&self) -> bool {
        self.health_check().is_healthy()
    }
}

impl<S> HealthCheck for GrowingNeuralGas<S> {
    fn health_check(&self) -> TopologyReport {
        let topology = self.topology();
        let mut violations = validate_topology(topology);

        let node_count = topology.node_count();
        let max_nodes = self.config().max_nodes;
        if node_count > max_nodes {
            violations.push(Violation::OverCapacity {
                nodes: node_count,
                max_nodes,
            });
        }
        for (id, node) in topology.nodes() {
            if node.position().len() != self.dim() {
                violations.push(Violation::WrongDimension {
                    node: id,
                    expected: self.dim(),
                    found: node.position().len(),
                });
            }
        }

        let isolated_count = topology
            .nodes()
            .filter(|&(id, _)| topology.degree(id) == Some(0))
            .count();
        let mean_degree = if node_count == 0 {
            0.0
        } else {
            2.0 * topology.edge_count() as f64 / node_count as f64
        };

        TopologyReport {
            violations,
            node_count,
            edge_count: topology.edge_count(),
            isolated_count,
            mean_degree,
        }
    }
}

/// Check the edge set and per-node invariants of a graph.
///
/// An unseeded graph has nothing to violate and yields no violations.
pub fn validate_topology(topology: &Topology) -> Vec<Violation> {
    let mut violations = Vec::new();

    let mut pairs = HashSet::new();
    for (edge_id, edge) in topology.edges() {
        let (a, b) = edge.endpoints();
        if a == b {
            violations.push(Violation::SelfEdge {
                edge: edge_id,
                node: a,
            });
        }
        for end in [a, b] {
            if !topology.contains_node(end) {
                violations.push(Violation::DanglingEdge {
                    edge: edge_id,
                    node: end,
                });
            }
        }
        let linked = topology.linked_endpoints(edge_id);
        if linked != Some((a, b)) && linked != Some((b, a)) {
            violations.push(Violation::EndpointMismatch { edge: edge_id });
        }
        if !pairs.insert((a.min(b), a.max(b))) {
            violations.push(Violation::DuplicateEdge { a, b });
        }
    }

    for (id, node) in topology.nodes() {
        if topology.degree(id) == Some(0) {
            violations.push(Violation::IsolatedNode { node: id });
        }
        if node.error().is_nan() || node.error() < 0.0 {
            violations.push(Violation::InvalidError {
                node: id,
                error: node.error(),
            });
        }
        if node.position().iter().any(|v| !v.is_finite()) {
            violations.push(Violation::NonFinitePosition { node: id });
        }
    }

    violations
}
