//! Gap filling: a heuristic that positions nodes the earlier passes missed.
//!
//! A node qualifies when it has no layer, or when it is a satellite sitting on
//! the hinge line. Core hinges go to layer 0. Every other node takes the largest
//! layer among its positioned neighbours, pushed one step away from the hinge
//! line: `max + 1` when `max > 1`, `max - 1` otherwise. Backbone neighbours are
//! consulted first; without any, all other edges except cystein bridges.

use log::debug;
use petgraph::stable_graph::NodeIndex;

use crate::graph::{AntibodyGraph, SwimlaneKey};

/// Fills gaps in render order. Returns the number of nodes positioned.
pub(crate) fn fill_gaps(graph: &mut AntibodyGraph) -> usize {
    let mut filled = 0;
    for index in graph.render_indices() {
        let node = graph.node_at(index);
        let needs_layer = match node.layer() {
            None => true,
            Some(0) => node.is_satellite(),
            Some(_) => false,
        };
        if !needs_layer {
            continue;
        }
        if node.is_core_hinge() {
            graph.set_layer_at(index, 0);
            filled += 1;
            continue;
        }

        let Some((max, swimlane)) = highest_neighbour(graph, index) else {
            debug!(node = node.key().to_string(); "No positioned neighbour, left as is");
            continue;
        };
        let layer = if max > 1 { max + 1 } else { max - 1 };
        debug!(node = node.key().to_string(), layer; "Filled layer gap");
        graph.set_layer_at(index, layer);
        graph.set_swimlane_at(index, swimlane);
        filled += 1;
    }
    filled
}

/// Highest neighbour layer and the swimlane of the neighbour holding it.
///
/// On ties the first neighbour found wins.
fn highest_neighbour(graph: &AntibodyGraph, index: NodeIndex) -> Option<(i32, Option<SwimlaneKey>)> {
    let neighbours = graph.neighbours(index);
    let highest = |backbone: bool| {
        neighbours
            .iter()
            .filter(|(_, edge)| {
                if backbone {
                    edge.is_backbone()
                } else {
                    !edge.is_backbone() && !edge.is_cystein()
                }
            })
            .filter_map(|(other, _)| {
                let node = graph.node_at(*other);
                node.layer().map(|layer| (layer, node.swimlane()))
            })
            .reduce(|best, candidate| if candidate.0 > best.0 { candidate } else { best })
    };
    highest(true).or_else(|| highest(false))
}

#[cfg(test)]
mod tests {
    use abgraph_core::{
        antibody::{ConnectionId, ConnectionKind, DomainKey, DomainType},
        identifier::Id,
    };

    use super::*;
    use crate::graph::{GraphEdge, GraphNode, NodeKind, SequenceKey};

    fn domain(graph: &mut AntibodyGraph, peptide: &str, i: usize, kind: DomainType) -> NodeIndex {
        let key = SequenceKey::Domain(DomainKey::new(Id::new(peptide), i));
        let mut node = GraphNode::new(key, format!("{peptide}{i}"), NodeKind::Domain(kind));
        node.set_swimlane(Some(SwimlaneKey::new(Id::new(peptide))));
        graph.add_node(node)
    }

    fn chem(graph: &mut AntibodyGraph, name: &str) -> NodeIndex {
        graph.add_node(GraphNode::new(SequenceKey::Chem(Id::new(name)), name, NodeKind::Chem))
    }

    fn link(graph: &mut AntibodyGraph, a: NodeIndex, b: NodeIndex, kind: ConnectionKind) {
        graph.add_edge(a, b, GraphEdge::connection(ConnectionId::new(0), kind, ""));
    }

    #[test]
    fn test_core_hinge_goes_to_zero() {
        let mut graph = AntibodyGraph::new();
        let hinge = domain(&mut graph, "GA", 0, DomainType::Hinge);

        assert_eq!(fill_gaps(&mut graph), 1);
        assert_eq!(graph.node_at(hinge).layer(), Some(0));
    }

    #[test]
    fn test_push_away_from_hinge_line() {
        let mut graph = AntibodyGraph::new();
        let low = domain(&mut graph, "GB", 0, DomainType::Constant);
        let high = domain(&mut graph, "GC", 0, DomainType::Constant);
        let below = chem(&mut graph, "GB-drug");
        let above = chem(&mut graph, "GC-drug");
        graph.set_layer_at(low, 1);
        graph.set_layer_at(high, 3);
        link(&mut graph, low, below, ConnectionKind::General);
        link(&mut graph, high, above, ConnectionKind::Statistical);

        assert_eq!(fill_gaps(&mut graph), 2);
        assert_eq!(graph.node_at(below).layer(), Some(0));
        assert_eq!(graph.node_at(above).layer(), Some(4));
        assert_eq!(
            graph.node_at(above).swimlane(),
            Some(SwimlaneKey::new(Id::new("GC")))
        );
    }

    #[test]
    fn test_backbone_neighbours_first() {
        let mut graph = AntibodyGraph::new();
        let a = domain(&mut graph, "GD", 0, DomainType::Variable);
        let b = domain(&mut graph, "GD", 1, DomainType::Constant);
        let other = domain(&mut graph, "GE", 0, DomainType::Constant);
        graph.set_layer_at(a, -1);
        graph.set_layer_at(other, 7);
        graph.add_edge(a, b, GraphEdge::backbone(1.0));
        link(&mut graph, other, b, ConnectionKind::General);

        fill_gaps(&mut graph);

        assert_eq!(graph.node_at(b).layer(), Some(-2));
    }

    #[test]
    fn test_cystein_neighbours_are_ignored() {
        let mut graph = AntibodyGraph::new();
        let a = domain(&mut graph, "GF", 0, DomainType::Constant);
        let b = domain(&mut graph, "GG", 0, DomainType::Constant);
        graph.set_layer_at(a, 4);
        link(&mut graph, a, b, ConnectionKind::Cystein);

        assert_eq!(fill_gaps(&mut graph), 0);
        assert_eq!(graph.node_at(b).layer(), None);
    }

    #[test]
    fn test_positioned_domain_at_zero_is_kept() {
        let mut graph = AntibodyGraph::new();
        let a = domain(&mut graph, "GH", 0, DomainType::Variable);
        let b = domain(&mut graph, "GH", 1, DomainType::Constant);
        graph.set_layer_at(a, 0);
        graph.set_layer_at(b, 5);
        graph.add_edge(a, b, GraphEdge::backbone(1.0));

        assert_eq!(fill_gaps(&mut graph), 0);
        assert_eq!(graph.node_at(a).layer(), Some(0));
    }
}
