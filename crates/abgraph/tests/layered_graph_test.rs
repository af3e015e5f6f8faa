//! Integration tests for the LayeredGraphBuilder API
//!
//! These tests drive the whole pipeline through the public API: chain sorting,
//! graph building, the layering passes and the layout hand-off.

use abgraph::{
    AbGraphError, LayeredGraphBuilder,
    antibody::{
        Antibody, ChemElement, Connection, ConnectionId, DomainKey, DomainType, Endpoint, Peptide,
        Rna, SequenceRef,
    },
    config::{AppConfig, LayeringConfig, LayoutConfig},
    geometry::Point,
    graph::{AntibodyGraph, NodeKind, SequenceKey, SwimlaneKey},
    identifier::Id,
    layering,
    layout::{Geometry, LayoutEngine},
};

fn heavy(name: &str) -> Peptide {
    Peptide::new(name)
        .with_domain("VH", DomainType::Variable, 10)
        .with_domain("CH1", DomainType::Constant, 10)
        .with_domain("Hinge", DomainType::Hinge, 10)
        .with_domain("CH2", DomainType::Constant, 10)
        .with_domain("CH3", DomainType::Constant, 10)
}

fn light(name: &str) -> Peptide {
    Peptide::new(name)
        .with_domain("VL", DomainType::Variable, 10)
        .with_domain("CL", DomainType::Constant, 10)
}

fn domain(peptide: &str, index: usize) -> SequenceKey {
    SequenceKey::Domain(DomainKey::new(Id::new(peptide), index))
}

fn layers(graph: &AntibodyGraph, peptide: &str, count: usize) -> Vec<Option<i32>> {
    (0..count)
        .map(|index| graph.layer(domain(peptide, index)))
        .collect()
}

/// Two heavy chains bridged at the hinge, each with a light chain on CH1.
fn igg() -> Antibody {
    Antibody::new("IgG1")
        .with_peptide(heavy("IH1"))
        .with_peptide(light("IL1"))
        .with_peptide(heavy("IH2"))
        .with_peptide(light("IL2"))
        .with_connection(Connection::cystein(
            Endpoint::peptide(Id::new("IH1"), 15),
            Endpoint::peptide(Id::new("IL1"), 15),
        ))
        .with_connection(Connection::cystein(
            Endpoint::peptide(Id::new("IH1"), 25),
            Endpoint::peptide(Id::new("IH2"), 25),
        ))
        .with_connection(Connection::cystein(
            Endpoint::peptide(Id::new("IH2"), 15),
            Endpoint::peptide(Id::new("IL2"), 15),
        ))
}

/// The heavy chain `H = [V, C, Hinge, C, C]` bound to `L = [V, C]` at `H[0]-L[0]`.
fn mirrored_pair(prefix: &str) -> Antibody {
    let h = format!("{prefix}H");
    let l = format!("{prefix}L");
    Antibody::new("pair")
        .with_peptide(heavy(&h))
        .with_peptide(light(&l))
        .with_connection(Connection::general(
            Endpoint::peptide(Id::new(&h), 5),
            Endpoint::peptide(Id::new(&l), 5),
            "R1",
            "R2",
        ))
}

/// A heavy chain with a chem reached through `hops` RNA elements.
///
/// The last RNA attaches to the C-terminal domain of the chain.
fn conjugate(prefix: &str, hops: usize) -> Antibody {
    let chain = format!("{prefix}H");
    let chem = format!("{prefix}X");
    let mut antibody = Antibody::new("conjugate")
        .with_peptide(heavy(&chain))
        .with_chem(ChemElement::new(&chem));

    let mut previous = Endpoint::chem(Id::new(&chem));
    for i in 0..hops {
        let rna = format!("{prefix}R{i}");
        antibody.add_rna(Rna::new(&rna).with_bases("ACGU"));
        let next = Endpoint::rna(Id::new(&rna));
        antibody.add_connection(Connection::general(previous, next, "R1", "R2"));
        previous = next;
    }
    antibody.add_connection(Connection::general(
        previous,
        Endpoint::peptide(Id::new(&chain), 45),
        "R2",
        "R3",
    ));
    antibody
}

#[test]
fn test_builder_api_exists() {
    let _builder = LayeredGraphBuilder::default();
    let _builder = LayeredGraphBuilder::new(AppConfig::default());
}

#[test]
fn test_hinges_on_common_line() {
    let antibody = igg();
    let builder = LayeredGraphBuilder::default();
    let graph = builder
        .build_layered_graph(&antibody)
        .expect("Failed to build graph");

    let hinges: Vec<_> = graph
        .nodes()
        .filter(|node| node.is_core_hinge())
        .collect();
    assert_eq!(hinges.len(), 2);
    for hinge in hinges {
        assert_eq!(hinge.layer(), Some(0), "hinge {} off the line", hinge.key());
    }
}

#[test]
fn test_chain_order_and_backbone() {
    let antibody = igg();
    let graph = LayeredGraphBuilder::default()
        .build_layered_graph(&antibody)
        .expect("Failed to build graph");

    let order: Vec<String> = graph.peptide_order().iter().map(Id::to_string).collect();
    assert_eq!(order, vec!["IL1", "IH1", "IH2", "IL2"]);

    for (rank, peptide) in graph.peptide_order().iter().enumerate() {
        let count = antibody.peptide(*peptide).map_or(0, |p| p.domains().len());
        let backbone: Vec<_> = graph.backbone_edges(*peptide).collect();
        assert_eq!(backbone.len(), count - 1, "backbone of {peptide}");
        for edge in backbone {
            assert_eq!(edge.weight(), Some((rank + 1) as f64));
        }
    }
}

#[test]
fn test_layers_increase_along_every_chain() {
    let antibody = igg();
    let graph = LayeredGraphBuilder::default()
        .build_layered_graph(&antibody)
        .expect("Failed to build graph");

    for peptide in antibody.peptides() {
        let chain = layers(&graph, peptide.name(), peptide.domains().len());
        assert!(chain.iter().all(Option::is_some), "{chain:?}");
        assert!(
            chain.windows(2).all(|pair| pair[0] < pair[1]),
            "layers of {} not increasing: {chain:?}",
            peptide.name()
        );
    }

    // Light chains are mirrored onto the hinge of their heavy chain.
    assert_eq!(layers(&graph, "IL1", 2), vec![Some(-1), Some(0)]);
    assert_eq!(layers(&graph, "IL2", 2), vec![Some(-1), Some(0)]);
}

#[test]
fn test_mirrored_pair_default_offset() {
    let antibody = mirrored_pair("MA");
    let graph = LayeredGraphBuilder::default()
        .build_layered_graph(&antibody)
        .expect("Failed to build graph");

    assert_eq!(
        layers(&graph, "MAH", 5),
        vec![Some(-2), Some(-1), Some(0), Some(1), Some(2)]
    );
    assert_eq!(layers(&graph, "MAL", 2), vec![Some(0), Some(1)]);

    let order: Vec<String> = graph.peptide_order().iter().map(Id::to_string).collect();
    assert_eq!(order, vec!["MAL", "MAH"]);
}

#[test]
fn test_mirrored_pair_with_offset() {
    let antibody = mirrored_pair("MB");
    let config = AppConfig::new(
        LayeringConfig::default().with_light_chain_offset(-1),
        LayoutConfig::default(),
    );
    let graph = LayeredGraphBuilder::new(config)
        .build_layered_graph(&antibody)
        .expect("Failed to build graph");

    assert_eq!(layers(&graph, "MBL", 2), vec![Some(-1), Some(0)]);
    assert_eq!(graph.layer(domain("MBH", 2)), Some(0));
}

#[test]
fn test_chem_through_rna_within_depth() {
    let antibody = conjugate("CA", 4);
    let graph = LayeredGraphBuilder::default()
        .build_layered_graph(&antibody)
        .expect("Failed to build graph");

    let chem = graph
        .node(SequenceKey::Chem(Id::new("CAX")))
        .expect("chem node");
    // CH3 is the last domain at layer 2; the chem sits five hops past it.
    assert_eq!(chem.layer(), Some(7));
    assert_eq!(chem.group(), Some(Id::new("CAH")));
    assert_eq!(chem.swimlane(), Some(SwimlaneKey::new(Id::new("CAH"))));

    // Aligned satellites are drawn after the chains.
    let last = graph.nodes().last().map(|node| node.kind());
    assert!(matches!(last, Some(NodeKind::Chem | NodeKind::Rna)));
}

#[test]
fn test_satellites_follow_sorted_peptide_order() {
    // The light chain is sorted before its heavy chain, while the chem bound
    // to the heavy chain comes first in the model.
    let antibody = Antibody::new("ranked")
        .with_peptide(
            Peptide::new("RH")
                .with_domain("VH", DomainType::Variable, 10)
                .with_domain("CH1", DomainType::Constant, 10)
                .with_domain("Hinge", DomainType::Hinge, 10),
        )
        .with_peptide(light("RL"))
        .with_chem(ChemElement::new("RA"))
        .with_chem(ChemElement::new("RB"))
        .with_connection(Connection::cystein(
            Endpoint::peptide(Id::new("RH"), 15),
            Endpoint::peptide(Id::new("RL"), 15),
        ))
        .with_connection(Connection::general(
            Endpoint::chem(Id::new("RA")),
            Endpoint::peptide(Id::new("RH"), 25),
            "R1",
            "R3",
        ))
        .with_connection(Connection::general(
            Endpoint::chem(Id::new("RB")),
            Endpoint::peptide(Id::new("RL"), 5),
            "R1",
            "R3",
        ));
    let mut graph = LayeredGraphBuilder::default()
        .build_layered_graph(&antibody)
        .expect("Failed to build graph");

    let order: Vec<_> = graph.nodes().map(|node| node.key().to_string()).collect();
    assert_eq!(
        order,
        ["RL[0]", "RL[1]", "RH[0]", "RH[1]", "RH[2]", "RB", "RA"]
    );

    // RA hangs off the C-terminal hinge, RB off the light chain's VL.
    assert_eq!(layers(&graph, "RL", 2), vec![Some(-1), Some(0)]);
    assert_eq!(graph.layer(SequenceKey::Chem(Id::new("RA"))), Some(1));
    assert_eq!(graph.layer(SequenceKey::Chem(Id::new("RB"))), Some(-2));

    // Nothing is left for gap filling.
    assert_eq!(layering::fill_gaps(&mut graph), 0);
}

#[test]
fn test_chem_beyond_depth_is_gap_filled() {
    let antibody = conjugate("CB", 5);
    let graph = LayeredGraphBuilder::default()
        .build_layered_graph(&antibody)
        .expect("Failed to build graph");

    // The outermost RNA is aligned at depth 5, the chem is filled next to it.
    assert_eq!(graph.layer(SequenceKey::Rna(Id::new("CBR0"))), Some(7));
    let chem = graph
        .node(SequenceKey::Chem(Id::new("CBX")))
        .expect("chem node");
    assert_eq!(chem.layer(), Some(8));
    assert_eq!(chem.group(), None);
    assert_eq!(chem.swimlane(), Some(SwimlaneKey::new(Id::new("CBH"))));
}

#[test]
fn test_satellite_depth_is_configurable() {
    let antibody = conjugate("CC", 5);
    let config = AppConfig::new(
        LayeringConfig::default().with_satellite_max_depth(6),
        LayoutConfig::default(),
    );
    let graph = LayeredGraphBuilder::new(config)
        .build_layered_graph(&antibody)
        .expect("Failed to build graph");

    let chem = graph
        .node(SequenceKey::Chem(Id::new("CCX")))
        .expect("chem node");
    assert_eq!(chem.layer(), Some(8));
    assert_eq!(chem.group(), Some(Id::new("CCH")));
}

#[test]
fn test_build_is_idempotent() {
    let antibody = igg()
        .with_chem(ChemElement::new("IX"))
        .with_connection(Connection::statistical(
            Endpoint::chem(Id::new("IX")),
            Endpoint::peptide(Id::new("IH1"), 42),
            "R1",
            "R2",
            3.5,
        ));
    let builder = LayeredGraphBuilder::default();

    let snapshot = |graph: &AntibodyGraph| -> Vec<_> {
        graph
            .nodes()
            .map(|node| (node.key(), node.layer(), node.swimlane(), node.group()))
            .collect()
    };
    let first = builder.build_layered_graph(&antibody).expect("first build");
    let second = builder.build_layered_graph(&antibody).expect("second build");

    assert_eq!(snapshot(&first), snapshot(&second));
    assert_eq!(first.edge_count(), second.edge_count());
}

#[test]
fn test_invalid_model_returns_error() {
    let antibody = Antibody::new("duplicate")
        .with_peptide(light("DL"))
        .with_peptide(light("DL"));

    let result = LayeredGraphBuilder::default().build_layered_graph(&antibody);
    assert!(
        matches!(result, Err(AbGraphError::Model(_))),
        "Should reject duplicate sequence ids"
    );
}

#[test]
fn test_unresolvable_connection_is_skipped() {
    let antibody = mirrored_pair("UA").with_connection(Connection::cystein(
        Endpoint::peptide(Id::new("UAH"), 999),
        Endpoint::peptide(Id::new("UAL"), 5),
    ));

    let graph = LayeredGraphBuilder::default()
        .build_layered_graph(&antibody)
        .expect("Broken connectivity is not an error");

    assert!(graph.find_edge(ConnectionId::new(0)).is_some());
    assert!(graph.find_edge(ConnectionId::new(1)).is_none());
}

#[test]
fn test_interactive_edits() {
    let antibody = mirrored_pair("EA")
        .with_chem(ChemElement::new("EX"))
        .with_connection(Connection::general(
            Endpoint::chem(Id::new("EX")),
            Endpoint::peptide(Id::new("EAH"), 15),
            "R1",
            "R2",
        ));
    let builder = LayeredGraphBuilder::default();
    let edits = builder.graph_builder();
    let mut graph = builder
        .build_layered_graph(&antibody)
        .expect("Failed to build graph");
    let chem = SequenceKey::Chem(Id::new("EX"));
    let ch3_key = || DomainKey::new(Id::new("EAH"), 4);
    assert_eq!(graph.layer(chem), Some(-2));

    // Remove and re-add the C-terminal domain: it is linked and placed again.
    let ch3 = domain("EAH", 4);
    assert!(graph.remove_sequence(ch3).is_some());
    assert_eq!(graph.backbone_edges(Id::new("EAH")).count(), 3);
    let added = edits.add_sequence(&mut graph, &antibody, SequenceRef::Domain(ch3_key()));
    assert_eq!(added, Some(ch3));
    assert_eq!(graph.layer(ch3), Some(2));
    assert_eq!(graph.backbone_edges(Id::new("EAH")).count(), 4);

    // Re-adding is a no-op.
    let nodes = graph.node_count();
    edits.add_sequence(&mut graph, &antibody, SequenceRef::Domain(ch3_key()));
    assert_eq!(graph.node_count(), nodes);

    // A re-added satellite is positioned by the hints alone.
    assert!(graph.remove_sequence(chem).is_some());
    assert!(graph.find_edge(ConnectionId::new(1)).is_none());
    assert_eq!(
        edits.add_sequence(&mut graph, &antibody, SequenceRef::Chem(Id::new("EX"))),
        Some(chem)
    );
    assert!(edits.add_connection(&mut graph, &antibody, ConnectionId::new(1)));
    assert_eq!(graph.layer(chem), None);

    assert_eq!(builder.recompute_hints(&mut graph), 1);
    assert_eq!(graph.layer(chem), Some(-2));
    assert_eq!(graph.layer(domain("EAL", 0)), Some(0));

    assert!(graph.remove_connection(ConnectionId::new(1)));
    assert!(!graph.remove_connection(ConnectionId::new(1)));
}

#[test]
fn test_layout_drops_empty_groups() {
    let antibody = mirrored_pair("GA");
    let builder = LayeredGraphBuilder::default();
    let mut graph = builder
        .build_layered_graph(&antibody)
        .expect("Failed to build graph");

    graph.remove_sequence(domain("GAL", 0));
    graph.remove_sequence(domain("GAL", 1));
    assert!(graph.group(Id::new("GAL")).is_some());

    let geometry = builder.layout(&mut graph);

    assert!(graph.group(Id::new("GAL")).is_none());
    assert!(graph.group(Id::new("GAH")).is_some());
    assert_eq!(geometry.len(), graph.node_count());
}

/// Stacks every node on one column, one row per layer.
struct ColumnEngine;

impl LayoutEngine for ColumnEngine {
    fn layout(&self, graph: &AntibodyGraph) -> Geometry {
        let mut geometry = Geometry::new();
        for node in graph.nodes() {
            let y = node.layer().unwrap_or_default() as f32;
            geometry.insert(node.key(), Point::new(0.0, y));
        }
        geometry
    }
}

#[test]
fn test_custom_layout_engine() {
    let antibody = mirrored_pair("LA");
    let builder = LayeredGraphBuilder::default().with_engine(ColumnEngine);
    let mut graph = builder
        .build_layered_graph(&antibody)
        .expect("Failed to build graph");

    let geometry = builder.layout(&mut graph);

    assert_eq!(geometry.len(), 7);
    assert_eq!(
        geometry.position(domain("LAH", 0)),
        Some(Point::new(0.0, -2.0))
    );
}
