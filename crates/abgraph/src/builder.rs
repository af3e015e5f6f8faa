//! Turns the antibody model into an [`AntibodyGraph`].
//!
//! Nodes are created domain by domain in sorted peptide order, then for RNA
//! elements, then for chem elements. Consecutive domains of a peptide are linked
//! by backbone edges that share the critical-path weight of their peptide. Each
//! model connection becomes one edge; a connection whose endpoint cannot be
//! resolved is skipped with a warning.
//!
//! The same builder serves interactive edits: [`GraphBuilder::add_sequence`]
//! and [`GraphBuilder::add_connection`] extend an existing graph without
//! touching the layers of unrelated nodes.

use log::{debug, info, warn};
use petgraph::stable_graph::NodeIndex;

use abgraph_core::{
    antibody::{
        Antibody, Connection, ConnectionId, Domain, DomainKey, Endpoint, Peptide, Sequence,
        SequenceRef,
    },
    identifier::Id,
};

use crate::{
    config::LayeringConfig,
    graph::{AntibodyGraph, GraphEdge, GraphNode, NodeKind, PeptideGroup, SequenceKey, SwimlaneKey},
};

/// Builds graphs and applies single-element edits.
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    group_label_max_len: usize,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new(&LayeringConfig::default())
    }
}

impl GraphBuilder {
    pub fn new(config: &LayeringConfig) -> Self {
        Self {
            group_label_max_len: config.group_label_max_len(),
        }
    }

    /// Builds the graph of `antibody` with peptides in the given drawing order.
    ///
    /// No layers are assigned here.
    pub fn build(&self, antibody: &Antibody, peptides: &[&Peptide]) -> AntibodyGraph {
        info!(antibody = antibody.name(), peptides = peptides.len(); "Building antibody graph");

        let mut graph = AntibodyGraph::new();
        graph.set_peptide_order(peptides.iter().map(|peptide| peptide.id()).collect());

        for (rank, peptide) in peptides.iter().enumerate() {
            self.add_chain(&mut graph, peptide, (rank + 1) as f64);
        }
        for rna in antibody.rna_elements() {
            add_satellite(&mut graph, rna, NodeKind::Rna);
        }
        for chem in antibody.chem_elements() {
            add_satellite(&mut graph, chem, NodeKind::Chem);
        }

        let mut skipped = 0usize;
        for (id, _) in antibody.connections() {
            if !self.add_connection(&mut graph, antibody, id) {
                skipped += 1;
            }
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            skipped;
            "Antibody graph built"
        );
        graph
    }

    /// Adds the node of `sequence`, or returns the existing one.
    ///
    /// - A whole peptide adds all its domains, its group and backbone, without
    ///   layers.
    /// - A domain at the start (end) of a multi-domain peptide is linked to its
    ///   neighbour and placed one layer before (after) it.
    ///
    /// Returns `None` if the model has no such sequence.
    pub fn add_sequence(
        &self,
        graph: &mut AntibodyGraph,
        antibody: &Antibody,
        sequence: SequenceRef,
    ) -> Option<SequenceKey> {
        match sequence {
            SequenceRef::Peptide(id) => {
                let peptide = antibody.peptide(id)?;
                let first = peptide.domain(0)?.key();
                graph.push_peptide(id);
                let weight = self.group_weight(graph, id);
                self.add_chain(graph, peptide, weight);
                Some(SequenceKey::Domain(first))
            }
            SequenceRef::Domain(key) => self.add_domain(graph, antibody, key),
            SequenceRef::Chem(id) => add_satellite(graph, antibody.chem(id)?, NodeKind::Chem),
            SequenceRef::Rna(id) => add_satellite(graph, antibody.rna(id)?, NodeKind::Rna),
        }
    }

    /// Adds the edge of connection `id`.
    ///
    /// Returns false, after logging a warning, when the connection does not exist
    /// or one of its endpoints has no node. Adding an existing edge is a no-op.
    pub fn add_connection(
        &self,
        graph: &mut AntibodyGraph,
        antibody: &Antibody,
        id: ConnectionId,
    ) -> bool {
        let Some(connection) = antibody.connection(id) else {
            warn!(connection = id.to_string(); "Unknown connection");
            return false;
        };
        if graph.find_edge(id).is_some() {
            return true;
        }

        let source = endpoint_node(graph, antibody, connection.source());
        let target = endpoint_node(graph, antibody, connection.target());
        let (Some(source), Some(target)) = (source, target) else {
            warn!(
                connection = id.to_string(),
                source = connection.source().sequence().to_string(),
                target = connection.target().sequence().to_string();
                "Skipping connection with unresolvable endpoint"
            );
            return false;
        };

        let edge = GraphEdge::connection(id, connection.kind(), edge_label(antibody, connection));
        graph.add_edge(source, target, edge);
        true
    }

    /// Removes cystein edges that start and end in the same domain.
    ///
    /// Bridges inside a hinge or up-hinge domain are kept. Returns the number of
    /// removed edges.
    pub fn reset_cystein_bridges(&self, graph: &mut AntibodyGraph) -> usize {
        let intra_domain: Vec<_> = graph
            .edge_indices()
            .into_iter()
            .filter(|index| {
                graph.edge_at(*index).is_some_and(|(source, target, edge)| {
                    edge.is_cystein()
                        && source.key() == target.key()
                        && matches!(source.kind(), NodeKind::Domain(domain_type) if !domain_type.is_hinge_like())
                })
            })
            .collect();

        for index in &intra_domain {
            graph.remove_edge_at(*index);
        }
        debug!(removed = intra_domain.len(); "Reset intra-domain cystein bridges");
        intra_domain.len()
    }

    /// Label shown above the group of `peptide`.
    pub fn group_label(&self, peptide: &Peptide) -> String {
        let label = peptide.display_label();
        if label.chars().count() > self.group_label_max_len {
            let cut: String = label.chars().take(self.group_label_max_len).collect();
            format!("{cut}(..)")
        } else {
            label.to_string()
        }
    }

    fn add_chain(&self, graph: &mut AntibodyGraph, peptide: &Peptide, weight: f64) {
        let id = peptide.id();
        graph.group_or_insert_with(id, || PeptideGroup::new(id, self.group_label(peptide), weight));

        let mut previous = None;
        for domain in peptide.domains() {
            let key = SequenceKey::Domain(domain.key());
            let created = !graph.contains(key);
            let index = graph.add_node(domain_node(domain));
            graph.join_group(key, id);
            if let Some((previous_index, previous_created)) = previous {
                if created || previous_created {
                    graph.add_edge(previous_index, index, GraphEdge::backbone(weight));
                }
            }
            previous = Some((index, created));
        }
    }

    fn add_domain(
        &self,
        graph: &mut AntibodyGraph,
        antibody: &Antibody,
        key: DomainKey,
    ) -> Option<SequenceKey> {
        let peptide = antibody.peptide(key.peptide())?;
        let domain = peptide.domain(key.index())?;
        let node_key = SequenceKey::Domain(key);
        if graph.contains(node_key) {
            return Some(node_key);
        }

        let id = peptide.id();
        graph.push_peptide(id);
        let weight = self.group_weight(graph, id);
        graph.group_or_insert_with(id, || PeptideGroup::new(id, self.group_label(peptide), weight));
        let index = graph.add_node(domain_node(domain));
        graph.join_group(node_key, id);

        let count = peptide.domains().len();
        let neighbour = match key.index() {
            _ if count <= 1 => None,
            0 => Some((1, -1)),
            last if last + 1 == count => Some((last - 1, 1)),
            _ => None,
        };
        let reference = neighbour.and_then(|(neighbour, step)| {
            graph
                .index_of(SequenceKey::Domain(DomainKey::new(id, neighbour)))
                .map(|reference| (reference, step))
        });
        if let Some((reference, step)) = reference {
            if let Some(layer) = graph.node_at(reference).layer() {
                graph.set_layer_at(index, layer + step);
            }
            let (source, target) = if step < 0 {
                (index, reference)
            } else {
                (reference, index)
            };
            graph.add_edge(source, target, GraphEdge::backbone(weight));
        }

        debug!(domain = key.to_string(), linked = reference.is_some(); "Added domain node");
        Some(node_key)
    }

    /// Weight of the existing group of `peptide`, or the next free weight.
    fn group_weight(&self, graph: &AntibodyGraph, peptide: Id) -> f64 {
        graph
            .group(peptide)
            .map_or((graph.group_count() + 1) as f64, PeptideGroup::weight)
    }
}

fn domain_node(domain: &Domain) -> GraphNode {
    let mut node = GraphNode::new(
        SequenceKey::Domain(domain.key()),
        domain.display_name(),
        NodeKind::Domain(domain.domain_type()),
    );
    node.set_swimlane(Some(SwimlaneKey::new(domain.peptide())));
    node
}

fn add_satellite(
    graph: &mut AntibodyGraph,
    sequence: &dyn Sequence,
    kind: NodeKind,
) -> Option<SequenceKey> {
    let key = SequenceKey::from_ref(sequence.sequence_ref())?;
    graph.add_node(GraphNode::new(key, sequence.display_name(), kind));
    Some(key)
}

fn endpoint_node(
    graph: &AntibodyGraph,
    antibody: &Antibody,
    endpoint: &Endpoint,
) -> Option<NodeIndex> {
    let key = match endpoint.sequence() {
        SequenceRef::Peptide(_) | SequenceRef::Domain(_) => {
            SequenceKey::Domain(antibody.resolve_domain(endpoint)?.key())
        }
        other => SequenceKey::from_ref(other)?,
    };
    graph.index_of(key)
}

/// Text drawn along a connection edge.
pub fn edge_label(antibody: &Antibody, connection: &Connection) -> String {
    let source = connection.source();
    let target = connection.target();
    let position = |endpoint: &Endpoint| {
        antibody
            .absolute_position(endpoint)
            .unwrap_or(endpoint.position())
    };

    match connection {
        Connection::Cystein(_) => {
            format!("Cys:Cys : {}:{}", position(source), position(target))
        }
        Connection::General(general) => {
            let residue = |endpoint: &Endpoint| {
                antibody
                    .residue_at(endpoint)
                    .map(|aa| format!("({aa})"))
                    .unwrap_or_default()
            };
            format!(
                "{}{}:{}-{}{}:{}",
                position(source),
                residue(source),
                general.source_rest(),
                position(target),
                residue(target),
                general.target_rest()
            )
        }
        Connection::Statistical(statistical) => {
            let amino_acid = antibody
                .residue_at(source)
                .or_else(|| antibody.residue_at(target))
                .map(String::from)
                .unwrap_or_default();
            format!(
                "{amino_acid}:{}-{}:{}({:.2})",
                statistical.source_rest(),
                position(target),
                statistical.target_rest(),
                statistical.equivalents()
            )
        }
    }
}
