//! The layered antibody graph.
//!
//! [`AntibodyGraph`] stores one [`GraphNode`] per drawable sequence and one
//! [`GraphEdge`] per connection or backbone link on top of a petgraph
//! [`StableDiGraph`], so node indices survive interactive removals.
//!
//! Besides the graph itself it tracks:
//! - the *render order* of nodes, which satellite alignment rearranges,
//! - the per-peptide [`PeptideGroup`]s,
//! - the sorted peptide order used to rank satellites.

mod edge;
mod group;
mod node;

pub use edge::{EdgeKind, GraphEdge};
pub use group::PeptideGroup;
pub use node::{GraphNode, NodeKind, SequenceKey, SwimlaneKey};

use indexmap::IndexMap;
use log::{debug, trace};
use petgraph::{
    Direction,
    stable_graph::{EdgeIndex, NodeIndex, StableDiGraph},
    visit::EdgeRef,
};

use abgraph_core::{
    antibody::{ConnectionId, DomainKey, SequenceRef},
    identifier::Id,
};

/// Node/edge graph of an antibody with layer and swimlane hints.
#[derive(Debug, Clone, Default)]
pub struct AntibodyGraph {
    graph: StableDiGraph<GraphNode, GraphEdge>,
    node_indices: IndexMap<SequenceKey, NodeIndex>,
    render_order: Vec<NodeIndex>,
    groups: IndexMap<Id, PeptideGroup>,
    peptide_order: Vec<Id>,
}

impl AntibodyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, key: SequenceKey) -> bool {
        self.node_indices.contains_key(&key)
    }

    pub fn node(&self, key: SequenceKey) -> Option<&GraphNode> {
        self.node_indices
            .get(&key)
            .and_then(|index| self.graph.node_weight(*index))
    }

    /// Layer of the node drawing `key`, if the node exists and is positioned.
    pub fn layer(&self, key: SequenceKey) -> Option<i32> {
        self.node(key).and_then(GraphNode::layer)
    }

    /// Nodes in render order.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.render_order
            .iter()
            .filter_map(|index| self.graph.node_weight(*index))
    }

    /// Edges in creation order as `(source, target, edge)`.
    pub fn edges(&self) -> impl Iterator<Item = (SequenceKey, SequenceKey, &GraphEdge)> {
        self.graph.edge_indices().filter_map(|index| {
            let (source, target) = self.graph.edge_endpoints(index)?;
            Some((
                self.graph[source].key(),
                self.graph[target].key(),
                &self.graph[index],
            ))
        })
    }

    /// Backbone edges between domains of `peptide`.
    pub fn backbone_edges(&self, peptide: Id) -> impl Iterator<Item = &GraphEdge> {
        self.edges().filter_map(move |(source, target, edge)| {
            let on_peptide = |key: SequenceKey| key.domain().map(|d| d.peptide()) == Some(peptide);
            (edge.is_backbone() && on_peptide(source) && on_peptide(target)).then_some(edge)
        })
    }

    /// Resolves a sequence reference to its node.
    ///
    /// A whole peptide resolves to the node of its first domain.
    pub fn find_node(&self, sequence: SequenceRef) -> Option<&GraphNode> {
        let key = match sequence {
            SequenceRef::Peptide(id) => SequenceKey::Domain(DomainKey::new(id, 0)),
            other => SequenceKey::from_ref(other)?,
        };
        self.node(key)
    }

    pub fn find_edge(&self, id: ConnectionId) -> Option<&GraphEdge> {
        self.edge_index(id).map(|index| &self.graph[index])
    }

    pub fn groups(&self) -> impl Iterator<Item = &PeptideGroup> {
        self.groups.values()
    }

    pub fn group(&self, peptide: Id) -> Option<&PeptideGroup> {
        self.groups.get(&peptide)
    }

    /// Peptide ids in the order produced by the chain sorter.
    pub fn peptide_order(&self) -> &[Id] {
        &self.peptide_order
    }

    /// Position of `peptide` in the sorted peptide order.
    pub fn peptide_rank(&self, peptide: Id) -> Option<usize> {
        self.peptide_order.iter().position(|id| *id == peptide)
    }

    /// Removes the node drawing `key` together with its edges.
    pub fn remove_sequence(&mut self, key: SequenceKey) -> Option<GraphNode> {
        let index = self.node_indices.shift_remove(&key)?;
        self.render_order.retain(|candidate| *candidate != index);
        let node = self.graph.remove_node(index)?;
        if let Some(group) = node.group().and_then(|id| self.groups.get_mut(&id)) {
            group.remove_member(key);
        }
        debug!(node = key.to_string(); "Removed node");
        Some(node)
    }

    /// Removes the edge of connection `id`. Returns false if no such edge exists.
    pub fn remove_connection(&mut self, id: ConnectionId) -> bool {
        match self.edge_index(id) {
            Some(index) => {
                self.graph.remove_edge(index);
                debug!(connection = id.to_string(); "Removed connection edge");
                true
            }
            None => false,
        }
    }

    /// Drops groups without members and returns how many were dropped.
    pub fn remove_empty_groups(&mut self) -> usize {
        let before = self.groups.len();
        self.groups.retain(|_, group| !group.is_empty());
        let removed = before - self.groups.len();
        if removed > 0 {
            debug!(removed; "Removed empty groups");
        }
        removed
    }

    pub(crate) fn set_peptide_order(&mut self, order: Vec<Id>) {
        self.peptide_order = order;
    }

    /// Appends `peptide` to the peptide order unless it is already ranked.
    pub(crate) fn push_peptide(&mut self, peptide: Id) {
        if !self.peptide_order.contains(&peptide) {
            self.peptide_order.push(peptide);
        }
    }

    /// Adds `node` unless a node with the same key exists; returns the node index.
    pub(crate) fn add_node(&mut self, node: GraphNode) -> NodeIndex {
        if let Some(index) = self.node_indices.get(&node.key()) {
            return *index;
        }
        let key = node.key();
        let index = self.graph.add_node(node);
        self.node_indices.insert(key, index);
        self.render_order.push(index);
        trace!(node = key.to_string(); "Added node");
        index
    }

    pub(crate) fn add_edge(
        &mut self,
        source: NodeIndex,
        target: NodeIndex,
        edge: GraphEdge,
    ) -> EdgeIndex {
        self.graph.add_edge(source, target, edge)
    }

    pub(crate) fn index_of(&self, key: SequenceKey) -> Option<NodeIndex> {
        self.node_indices.get(&key).copied()
    }

    pub(crate) fn node_at(&self, index: NodeIndex) -> &GraphNode {
        &self.graph[index]
    }

    pub(crate) fn node_mut(&mut self, key: SequenceKey) -> Option<&mut GraphNode> {
        let index = self.index_of(key)?;
        self.graph.node_weight_mut(index)
    }

    pub(crate) fn render_indices(&self) -> Vec<NodeIndex> {
        self.render_order.clone()
    }

    pub(crate) fn set_layer_at(&mut self, index: NodeIndex, layer: i32) {
        if let Some(node) = self.graph.node_weight_mut(index) {
            trace!(node = node.key().to_string(), layer; "Set layer");
            node.set_layer(layer);
        }
    }

    pub(crate) fn set_swimlane_at(&mut self, index: NodeIndex, swimlane: Option<SwimlaneKey>) {
        if let Some(node) = self.graph.node_weight_mut(index) {
            node.set_swimlane(swimlane);
        }
    }

    /// Moves the node to the end of the render order.
    pub(crate) fn move_to_end(&mut self, index: NodeIndex) {
        self.render_order.retain(|candidate| *candidate != index);
        self.render_order.push(index);
    }

    /// Edges touching `index` in either direction, as `(other end, edge)`.
    ///
    /// Self-loops are skipped.
    pub(crate) fn neighbours(&self, index: NodeIndex) -> Vec<(NodeIndex, &GraphEdge)> {
        let outgoing = self
            .graph
            .edges_directed(index, Direction::Outgoing)
            .map(|edge| (edge.target(), edge.weight()));
        let incoming = self
            .graph
            .edges_directed(index, Direction::Incoming)
            .map(|edge| (edge.source(), edge.weight()));
        outgoing
            .chain(incoming)
            .filter(|(other, _)| *other != index)
            .collect()
    }

    pub(crate) fn edge_index(&self, id: ConnectionId) -> Option<EdgeIndex> {
        self.graph
            .edge_indices()
            .find(|index| self.graph[*index].connection_id() == Some(id))
    }

    pub(crate) fn edge_indices(&self) -> Vec<EdgeIndex> {
        self.graph.edge_indices().collect()
    }

    pub(crate) fn edge_at(&self, index: EdgeIndex) -> Option<(&GraphNode, &GraphNode, &GraphEdge)> {
        let (source, target) = self.graph.edge_endpoints(index)?;
        Some((&self.graph[source], &self.graph[target], &self.graph[index]))
    }

    pub(crate) fn remove_edge_at(&mut self, index: EdgeIndex) {
        self.graph.remove_edge(index);
    }

    /// Returns the group of `peptide`, creating it with `make` if missing.
    pub(crate) fn group_or_insert_with(
        &mut self,
        peptide: Id,
        make: impl FnOnce() -> PeptideGroup,
    ) -> &mut PeptideGroup {
        self.groups.entry(peptide).or_insert_with(make)
    }

    /// Puts `key` in the group of `peptide` and records the group on the node.
    pub(crate) fn join_group(&mut self, key: SequenceKey, peptide: Id) {
        let Some(group) = self.groups.get_mut(&peptide) else {
            return;
        };
        group.add_member(key);
        if let Some(node) = self.node_mut(key) {
            node.set_group(Some(peptide));
        }
    }

    pub(crate) fn group_count(&self) -> usize {
        self.groups.len()
    }
}
