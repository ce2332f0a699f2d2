//! Connected components of the learned graph.
//!
//! After training, each connected component of a growing neural gas graph
//! approximates one connected region of the input distribution, so component
//! labels double as cluster labels.

use std::collections::HashMap;

use petgraph::graph::UnGraph;
use petgraph::unionfind::UnionFind;

use super::engine::GrowingNeuralGas;
use super::topology::NodeId;

impl<S> GrowingNeuralGas<S> {
    /// Label every node with the index of its connected component.
    ///
    /// Components are numbered by the creation order of their oldest node.
    /// Returns the number of components.
    pub fn label_components(&mut self) -> usize {
        let ids = self.topology.node_ids_by_creation();
        let index: HashMap<NodeId, usize> =
            ids.iter().enumerate().map(|(i, &id)| (id, i)).collect();

        let mut sets = UnionFind::<usize>::new(ids.len());
        for (_, edge) in self.topology.edges() {
            let (a, b) = edge.endpoints();
            if let (Some(&i), Some(&j)) = (index.get(&a), index.get(&b)) {
                let _ = sets.union(i, j);
            }
        }

        let mut label_of_root: HashMap<usize, usize> = HashMap::new();
        for (i, &id) in ids.iter().enumerate() {
            let next = label_of_root.len();
            let label = *label_of_root.entry(sets.find(i)).or_insert(next);
            if let Some(node) = self.topology.node_mut(id) {
                node.label = Some(label);
            }
        }
        label_of_root.len()
    }

    /// Copy the graph into a petgraph `UnGraph`.
    ///
    /// Node weights are the engine's handles in creation order; edge weights
    /// are edge ages.
    pub fn to_petgraph(&self) -> UnGraph<NodeId, u32> {
        let ids = self.topology.node_ids_by_creation();
        let mut graph = UnGraph::with_capacity(ids.len(), self.topology.edge_count());
        let index: HashMap<NodeId, _> = ids.iter().map(|&id| (id, graph.add_node(id))).collect();

        for (_, edge) in self.topology.edges() {
            let (a, b) = edge.endpoints();
            if let (Some(&i), Some(&j)) = (index.get(&a), index.get(&b)) {
                let _ = graph.add_edge(i, j, edge.age());
            }
        }
        graph
    }
}
