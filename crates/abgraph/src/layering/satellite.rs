//! Satellite alignment: chem and RNA nodes next to their nearest domain.

use std::collections::{HashSet, VecDeque};

use log::{debug, trace};

use abgraph_core::antibody::{Antibody, DomainKey, SequenceRef};

use crate::graph::{AntibodyGraph, SequenceKey};

/// Places a satellite node `depth` layers away from a domain node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeAlignmentRecord {
    node: SequenceKey,
    domain: DomainKey,
    depth: usize,
    rank: usize,
}

impl NodeAlignmentRecord {
    /// The satellite being placed.
    pub fn node(&self) -> SequenceKey {
        self.node
    }

    /// The nearest domain.
    pub fn domain(&self) -> DomainKey {
        self.domain
    }

    /// Number of connection hops between the satellite and the domain.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Sorted index of the domain's peptide; records are applied in this order.
    pub fn rank(&self) -> usize {
        self.rank
    }
}

/// Aligns every unpositioned chem, then RNA, node. Returns the number aligned.
pub(crate) fn align_satellites(
    graph: &mut AntibodyGraph,
    antibody: &Antibody,
    max_depth: usize,
) -> usize {
    let mut records = alignment_records(graph, antibody, max_depth);
    records.sort_by_key(NodeAlignmentRecord::rank);

    let mut aligned = 0;
    for record in &records {
        if apply_record(graph, antibody, record) {
            aligned += 1;
        }
    }
    aligned
}

fn alignment_records(
    graph: &AntibodyGraph,
    antibody: &Antibody,
    max_depth: usize,
) -> Vec<NodeAlignmentRecord> {
    let satellites = antibody
        .chem_elements()
        .iter()
        .map(|chem| SequenceKey::Chem(chem.id()))
        .chain(
            antibody
                .rna_elements()
                .iter()
                .map(|rna| SequenceKey::Rna(rna.id())),
        );

    satellites
        .filter(|key| graph.node(*key).is_some_and(|node| node.layer().is_none()))
        .filter_map(|node| {
            let Some((domain, depth)) = nearest_domain(antibody, node.to_ref(), max_depth) else {
                debug!(node = node.to_string(), max_depth; "No domain within search depth");
                return None;
            };
            Some(NodeAlignmentRecord {
                node,
                domain,
                depth,
                rank: graph.peptide_rank(domain.peptide()).unwrap_or(usize::MAX),
            })
        })
        .collect()
}

/// Breadth-first search from `start` to the nearest domain.
///
/// Direct connections have depth 1. Only chem and RNA endpoints are expanded;
/// the first peptide or domain endpoint reached wins. Returns `None` if no
/// domain lies within `max_depth` hops.
pub(crate) fn nearest_domain(
    antibody: &Antibody,
    start: SequenceRef,
    max_depth: usize,
) -> Option<(DomainKey, usize)> {
    let mut queue = VecDeque::from([(start, 0usize)]);
    let mut visited = HashSet::from([start]);

    while let Some((current, depth)) = queue.pop_front() {
        if depth >= max_depth {
            continue;
        }
        for (_, connection) in antibody.connections_of(current) {
            if connection.is_self_connection() {
                continue;
            }
            let Some(far) = connection.opposite(current) else {
                continue;
            };
            let next = far.sequence();
            if next.is_satellite() {
                if visited.insert(next) {
                    queue.push_back((next, depth + 1));
                }
            } else if let Some(domain) = antibody.resolve_domain(far) {
                return Some((domain.key(), depth + 1));
            }
        }
    }
    None
}

fn apply_record(graph: &mut AntibodyGraph, antibody: &Antibody, record: &NodeAlignmentRecord) -> bool {
    let (Some(index), Some(domain_node)) = (
        graph.index_of(record.node),
        graph.node(SequenceKey::Domain(record.domain)),
    ) else {
        return false;
    };
    let Some(domain_layer) = domain_node.layer() else {
        return false;
    };
    let swimlane = domain_node.swimlane();
    let group = domain_node.group();

    let at_chain_end = antibody
        .peptide(record.domain.peptide())
        .is_some_and(|peptide| peptide.is_last_domain(record.domain.index()));
    let depth = record.depth as i32;
    let layer = if at_chain_end {
        domain_layer + depth
    } else {
        domain_layer - depth
    };

    graph.move_to_end(index);
    graph.set_layer_at(index, layer);
    graph.set_swimlane_at(index, swimlane);
    if let Some(group) = group {
        graph.join_group(record.node, group);
    }
    trace!(
        node = record.node.to_string(),
        domain = record.domain.to_string(),
        depth = record.depth,
        layer;
        "Aligned satellite"
    );
    true
}

#[cfg(test)]
mod tests {
    use abgraph_core::{
        antibody::{ChemElement, Connection, DomainType, Endpoint, Peptide, Rna},
        identifier::Id,
    };

    use super::*;

    /// A chain `chem - r1 - ... - rN - peptide` with `hops` RNA links in between.
    fn chain(prefix: &str, hops: usize) -> Antibody {
        let name = |i: usize| format!("{prefix}{i}");
        let mut antibody = Antibody::new("chain")
            .with_peptide(
                Peptide::new(&format!("{prefix}P"))
                    .with_domain("V", DomainType::Variable, 10)
                    .with_domain("C", DomainType::Constant, 10),
            )
            .with_chem(ChemElement::new(&format!("{prefix}X")));
        let mut previous = Endpoint::chem(Id::new(&format!("{prefix}X")));
        for i in 0..hops {
            antibody.add_rna(Rna::new(&name(i)));
            let next = Endpoint::rna(Id::new(&name(i)));
            antibody.add_connection(Connection::general(previous, next, "R1", "R2"));
            previous = next;
        }
        antibody.add_connection(Connection::general(
            previous,
            Endpoint::peptide(Id::new(&format!("{prefix}P")), 15),
            "R2",
            "R3",
        ));
        antibody
    }

    #[test]
    fn test_direct_connection_has_depth_one() {
        let antibody = chain("SA", 0);

        let found = nearest_domain(&antibody, SequenceRef::Chem(Id::new("SAX")), 5);
        assert_eq!(found, Some((DomainKey::new(Id::new("SAP"), 1), 1)));
    }

    #[test]
    fn test_search_reaches_max_depth() {
        let antibody = chain("SB", 4);

        let found = nearest_domain(&antibody, SequenceRef::Chem(Id::new("SBX")), 5);
        assert_eq!(found, Some((DomainKey::new(Id::new("SBP"), 1), 5)));
    }

    #[test]
    fn test_search_stops_past_max_depth() {
        let antibody = chain("SC", 5);

        assert_eq!(
            nearest_domain(&antibody, SequenceRef::Chem(Id::new("SCX")), 5),
            None
        );
        assert!(nearest_domain(&antibody, SequenceRef::Chem(Id::new("SCX")), 6).is_some());
    }

    #[test]
    fn test_zero_depth_finds_nothing() {
        let antibody = chain("SD", 0);

        assert_eq!(
            nearest_domain(&antibody, SequenceRef::Chem(Id::new("SDX")), 0),
            None
        );
    }

    #[test]
    fn test_direct_domain_beats_hop() {
        let mut antibody = chain("SE", 1);
        antibody.add_connection(Connection::general(
            Endpoint::chem(Id::new("SEX")),
            Endpoint::peptide(Id::new("SEP"), 2),
            "R1",
            "R3",
        ));

        let found = nearest_domain(&antibody, SequenceRef::Chem(Id::new("SEX")), 5);
        assert_eq!(found, Some((DomainKey::new(Id::new("SEP"), 0), 1)));
    }
}
