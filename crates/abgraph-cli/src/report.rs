//! Plain-text layer report.
//!
//! One tab-separated row per node in render order, then one row per edge:
//!
//! ```text
//! # nodes: position layer swimlane group kind name x y
//! # edges: source target kind label
//! ```
//!
//! Unset layers, swimlanes and groups print as `-`.

use std::io::Write;

use abgraph::{
    AbGraphError,
    graph::{AntibodyGraph, EdgeKind},
    layout::Geometry,
};

/// Writes the report of `graph` laid out as `geometry`.
///
/// # Errors
///
/// Returns [`AbGraphError::Layout`] if a node has no position and
/// [`AbGraphError::Io`] if writing fails.
pub fn write_report(
    out: &mut impl Write,
    graph: &AntibodyGraph,
    geometry: &Geometry,
) -> Result<(), AbGraphError> {
    fn or_dash(value: Option<impl ToString>) -> String {
        value.map_or_else(|| "-".to_string(), |value| value.to_string())
    }

    writeln!(out, "# nodes: position layer swimlane group kind name x y")?;
    for (position, node) in graph.nodes().enumerate() {
        let point = geometry.position(node.key()).ok_or_else(|| {
            AbGraphError::Layout(format!("layout engine left node {} unplaced", node.key()))
        })?;
        writeln!(
            out,
            "{position}\t{}\t{}\t{}\t{}\t{}\t{:.1}\t{:.1}",
            or_dash(node.layer()),
            or_dash(node.swimlane()),
            or_dash(node.group()),
            node.kind(),
            node.name(),
            point.x(),
            point.y(),
        )?;
    }

    writeln!(out, "# edges: source target kind label")?;
    for (source, target, edge) in graph.edges() {
        let kind = match edge.kind() {
            EdgeKind::Backbone { .. } => "backbone".to_string(),
            EdgeKind::Connection { kind, .. } => format!("{kind:?}").to_lowercase(),
        };
        writeln!(out, "{source}\t{target}\t{kind}\t{}", edge.label())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use abgraph::{
        LayeredGraphBuilder,
        antibody::{Antibody, ChemElement, Connection, DomainType, Endpoint, Peptide},
        identifier::Id,
    };

    use super::*;

    #[test]
    fn test_report_rows() {
        let antibody = Antibody::new("report")
            .with_peptide(
                Peptide::new("RH")
                    .with_domain("VH", DomainType::Variable, 10)
                    .with_domain("Hinge", DomainType::Hinge, 10),
            )
            .with_chem(ChemElement::new("RX"))
            .with_connection(Connection::cystein(
                Endpoint::peptide(Id::new("RH"), 3),
                Endpoint::peptide(Id::new("RH"), 13),
            ));
        let builder = LayeredGraphBuilder::default();
        let mut graph = builder.build_layered_graph(&antibody).unwrap();
        let geometry = builder.layout(&mut graph);

        let mut out = Vec::new();
        write_report(&mut out, &graph, &geometry).unwrap();
        let report = String::from_utf8(out).unwrap();
        let lines: Vec<_> = report.lines().collect();

        assert_eq!(lines.len(), 7);
        assert!(lines[1].starts_with("0\t-1\tRH\tRH\tvariable\tVH\t"));
        assert!(lines[3].starts_with("2\t-\t-\t-\tchem\tRX\t"));
        assert_eq!(lines[4], "# edges: source target kind label");
        assert!(lines[5].ends_with("\tbackbone\t"));
        assert!(lines[6].contains("\tcystein\tCys:Cys : 3:13"));
    }

    #[test]
    fn test_missing_position_is_an_error() {
        let antibody = Antibody::new("empty")
            .with_peptide(Peptide::new("MH").with_domain("VH", DomainType::Variable, 10));
        let graph = LayeredGraphBuilder::default()
            .build_layered_graph(&antibody)
            .unwrap();

        let result = write_report(&mut Vec::new(), &graph, &Geometry::new());

        assert!(matches!(result, Err(AbGraphError::Layout(_))));
    }
}
