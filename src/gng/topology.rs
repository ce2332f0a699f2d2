//! Node/edge storage for the learned graph.
//!
//! The graph lives in a petgraph [`StableUnGraph`], whose indices stay valid
//! across removals and whose vacated slots are reused by later insertions.
//! Handles pair a slot index with the slot's generation at insertion time;
//! the generation is stored in the node or edge weight and compared on every
//! lookup, so a handle to a removed element never resolves to whatever later
//! reuses the slot.

use core::fmt;

use ndarray::Array1;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableUnGraph};
use petgraph::visit::EdgeRef;

/// Stable handle to a node.
///
/// Generations are `u32` and wrap, so a handle could resolve again after
/// 2^32 removals from the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

/// Stable handle to an edge. Same wrap-around limit as [`NodeId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    fn new(ix: NodeIndex, generation: u32) -> Self {
        Self {
            index: ix.index() as u32,
            generation,
        }
    }

    fn graph_index(self) -> NodeIndex {
        NodeIndex::new(self.index as usize)
    }

    /// Storage slot of this node. Slots are reused after removal.
    pub fn index(&self) -> usize {
        self.index as usize
    }

    /// Generation of the slot when this node was created.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl EdgeId {
    fn new(ix: EdgeIndex, generation: u32) -> Self {
        Self {
            index: ix.index() as u32,
            generation,
        }
    }

    fn graph_index(self) -> EdgeIndex {
        EdgeIndex::new(self.index as usize)
    }

    /// Storage slot of this edge. Slots are reused after removal.
    pub fn index(&self) -> usize {
        self.index as usize
    }

    /// Generation of the slot when this edge was created.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}v{}", self.index, self.generation)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}v{}", self.index, self.generation)
    }
}

/// A reference vector of the graph.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) position: Array1<f64>,
    pub(crate) error: f64,
    pub(crate) hits: u64,
    pub(crate) label: Option<usize>,
    order: u64,
    generation: u32,
}

impl Node {
    fn new(position: Array1<f64>, order: u64, generation: u32) -> Self {
        Self {
            position,
            error: 0.0,
            hits: 0,
            label: None,
            order,
            generation,
        }
    }

    /// Position in feature space.
    pub fn position(&self) -> &Array1<f64> {
        &self.position
    }

    /// Cumulative (decayed) error.
    pub fn error(&self) -> f64 {
        self.error
    }

    /// Number of samples this node has won.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Connected-component label, if labelling has been run.
    pub fn label(&self) -> Option<usize> {
        self.label
    }

    /// Creation rank: lower means created earlier. Never reused.
    pub fn creation_order(&self) -> u64 {
        self.order
    }
}

/// Undirected connection between two distinct nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    a: NodeId,
    b: NodeId,
    pub(crate) age: u32,
    generation: u32,
}

impl Edge {
    /// Both endpoints, in insertion order.
    pub fn endpoints(&self) -> (NodeId, NodeId) {
        (self.a, self.b)
    }

    /// Steps since this edge was last refreshed.
    pub fn age(&self) -> u32 {
        self.age
    }

    /// The endpoint opposite `node`, or `None` if `node` is not an endpoint.
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if node == self.a {
            Some(self.b)
        } else if node == self.b {
            Some(self.a)
        } else {
            None
        }
    }

    /// Whether `node` is one of the endpoints.
    pub fn touches(&self, node: NodeId) -> bool {
        node == self.a || node == self.b
    }
}

/// Current generation of `slot`, growing the table for never-used slots.
fn slot_generation(generations: &mut Vec<u32>, slot: usize) -> u32 {
    if slot >= generations.len() {
        generations.resize(slot + 1, 0);
    }
    generations[slot]
}

fn retire_slot(generations: &mut [u32], slot: usize) {
    if let Some(g) = generations.get_mut(slot) {
        *g = g.wrapping_add(1);
    }
}

/// Undirected graph of [`Node`]s and [`Edge`]s addressed by generational handles.
///
/// `add_edge` refuses self-loops, dangling endpoints and parallel edges, and
/// `remove_node` drops every incident edge, so the graph never holds an edge
/// whose endpoints are not both live.
#[derive(Debug, Clone)]
pub struct Topology {
    graph: StableUnGraph<Node, Edge>,
    node_generations: Vec<u32>,
    edge_generations: Vec<u32>,
    next_order: u64,
}

impl Default for Topology {
    fn default() -> Self {
        Self::new()
    }
}

impl Topology {
    /// Empty graph.
    pub fn new() -> Self {
        Self {
            graph: StableUnGraph::default(),
            node_generations: Vec::new(),
            edge_generations: Vec::new(),
            next_order: 0,
        }
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of live edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// True when there are no nodes.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Underlying petgraph index of a live node.
    fn node_index(&self, id: NodeId) -> Option<NodeIndex> {
        let ix = id.graph_index();
        self.graph
            .node_weight(ix)
            .filter(|node| node.generation == id.generation)
            .map(|_| ix)
    }

    fn edge_index(&self, id: EdgeId) -> Option<EdgeIndex> {
        let ix = id.graph_index();
        self.graph
            .edge_weight(ix)
            .filter(|edge| edge.generation == id.generation)
            .map(|_| ix)
    }

    fn edge_id(&self, ix: EdgeIndex) -> Option<EdgeId> {
        self.graph
            .edge_weight(ix)
            .map(|edge| EdgeId::new(ix, edge.generation))
    }

    /// Insert an unconnected node.
    pub fn add_node(&mut self, position: Array1<f64>) -> NodeId {
        let order = self.next_order;
        self.next_order += 1;
        let ix = self.graph.add_node(Node::new(position, order, 0));
        let generation = slot_generation(&mut self.node_generations, ix.index());
        if let Some(node) = self.graph.node_weight_mut(ix) {
            node.generation = generation;
        }
        NodeId::new(ix, generation)
    }

    /// Remove a node together with all of its edges.
    pub fn remove_node(&mut self, id: NodeId) -> Option<Node> {
        let ix = self.node_index(id)?;
        let incident: Vec<EdgeIndex> = self.graph.edges(ix).map(|e| e.id()).collect();
        for e in incident {
            retire_slot(&mut self.edge_generations, e.index());
        }
        let node = self.graph.remove_node(ix)?;
        retire_slot(&mut self.node_generations, ix.index());
        Some(node)
    }

    /// Connect two nodes with a fresh edge of age 0.
    ///
    /// Returns `None` for a self-loop, a dead endpoint, or an already
    /// connected pair.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) -> Option<EdgeId> {
        if a == b {
            return None;
        }
        let (ia, ib) = (self.node_index(a)?, self.node_index(b)?);
        if self.graph.find_edge(ia, ib).is_some() {
            return None;
        }
        let ix = self.graph.add_edge(
            ia,
            ib,
            Edge {
                a,
                b,
                age: 0,
                generation: 0,
            },
        );
        let generation = slot_generation(&mut self.edge_generations, ix.index());
        if let Some(edge) = self.graph.edge_weight_mut(ix) {
            edge.generation = generation;
        }
        Some(EdgeId::new(ix, generation))
    }

    /// Remove an edge.
    pub fn remove_edge(&mut self, id: EdgeId) -> Option<Edge> {
        let ix = self.edge_index(id)?;
        let edge = self.graph.remove_edge(ix)?;
        retire_slot(&mut self.edge_generations, ix.index());
        Some(edge)
    }

    /// Whether `id` refers to a live node.
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node_index(id).is_some()
    }

    /// Look up a node.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.graph
            .node_weight(id.graph_index())
            .filter(|node| node.generation == id.generation)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.graph
            .node_weight_mut(id.graph_index())
            .filter(|node| node.generation == id.generation)
    }

    /// Look up an edge.
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.graph
            .edge_weight(id.graph_index())
            .filter(|edge| edge.generation == id.generation)
    }

    pub(crate) fn edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
        self.graph
            .edge_weight_mut(id.graph_index())
            .filter(|edge| edge.generation == id.generation)
    }

    /// The edge joining `a` and `b`, if any.
    pub fn edge_between(&self, a: NodeId, b: NodeId) -> Option<EdgeId> {
        let ix = self
            .graph
            .find_edge(self.node_index(a)?, self.node_index(b)?)?;
        self.edge_id(ix)
    }

    /// Incident edges of `id` (none for a dead handle).
    pub fn incident_edges(&self, id: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        self.node_index(id)
            .into_iter()
            .flat_map(move |ix| self.graph.edges(ix))
            .map(|e| EdgeId::new(e.id(), e.weight().generation))
    }

    /// Direct neighbours of `id`.
    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.node_index(id)
            .into_iter()
            .flat_map(move |ix| self.graph.neighbors(ix))
            .filter_map(move |n| {
                self.graph
                    .node_weight(n)
                    .map(|node| NodeId::new(n, node.generation))
            })
    }

    /// Degree of `id`, or `None` for a dead handle.
    pub fn degree(&self, id: NodeId) -> Option<usize> {
        self.node_index(id).map(|ix| self.graph.edges(ix).count())
    }

    /// Add one to the age of every edge incident to `id`.
    pub(crate) fn age_edges_of(&mut self, id: NodeId) {
        let Some(ix) = self.node_index(id) else {
            return;
        };
        let incident: Vec<EdgeIndex> = self.graph.edges(ix).map(|e| e.id()).collect();
        for e in incident {
            if let Some(edge) = self.graph.edge_weight_mut(e) {
                edge.age = edge.age.saturating_add(1);
            }
        }
    }

    /// Petgraph endpoints of a live edge, as handles.
    ///
    /// These come from the graph structure itself, independent of the
    /// endpoints recorded in the edge weight.
    pub(crate) fn linked_endpoints(&self, id: EdgeId) -> Option<(NodeId, NodeId)> {
        let (ia, ib) = self.graph.edge_endpoints(self.edge_index(id)?)?;
        let a = self.graph.node_weight(ia)?;
        let b = self.graph.node_weight(ib)?;
        Some((NodeId::new(ia, a.generation), NodeId::new(ib, b.generation)))
    }

    /// Live nodes in storage order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.graph.node_indices().filter_map(move |ix| {
            self.graph
                .node_weight(ix)
                .map(|node| (NodeId::new(ix, node.generation), node))
        })
    }

    pub(crate) fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> + '_ {
        self.graph.node_weights_mut()
    }

    /// Live edges in storage order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> + '_ {
        self.graph.edge_indices().filter_map(move |ix| {
            self.graph
                .edge_weight(ix)
                .map(|edge| (EdgeId::new(ix, edge.generation), edge))
        })
    }

    /// Live node handles sorted by creation order.
    pub fn node_ids_by_creation(&self) -> Vec<NodeId> {
        let mut ids: Vec<(u64, NodeId)> = self.nodes().map(|(id, n)| (n.order, id)).collect();
        ids.sort_unstable_by_key(|&(order, _)| order);
        ids.into_iter().map(|(_, id)| id).collect()
    }
}
