//! Reference grid layout.
//!
//! Every swimlane becomes a column, in order of first appearance in the render
//! order; a node without a swimlane gets a column of its own. Layers map to rows
//! with the smallest layer on top. Nodes that share a cell are nudged right by a
//! quarter column each. Unpositioned nodes go to one extra row below the rest.

use std::collections::HashMap;

use indexmap::IndexMap;
use log::debug;

use abgraph_core::geometry::Point;

use crate::{
    config::LayoutConfig,
    graph::{AntibodyGraph, SequenceKey, SwimlaneKey},
    layout::{Geometry, LayoutEngine},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Column {
    Lane(SwimlaneKey),
    Single(SequenceKey),
}

/// Places nodes on a regular grid of swimlane columns and layer rows.
#[derive(Debug, Clone)]
pub struct GridEngine {
    horizontal_spacing: f32,
    vertical_spacing: f32,
}

impl GridEngine {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            horizontal_spacing: config.horizontal_spacing(),
            vertical_spacing: config.vertical_spacing(),
        }
    }
}

impl Default for GridEngine {
    fn default() -> Self {
        Self::new(&LayoutConfig::default())
    }
}

impl LayoutEngine for GridEngine {
    fn layout(&self, graph: &AntibodyGraph) -> Geometry {
        let layers = graph.nodes().filter_map(|node| node.layer());
        let (min_layer, max_layer) = layers.fold((i32::MAX, i32::MIN), |(min, max), layer| {
            (min.min(layer), max.max(layer))
        });
        let (min_layer, max_layer) = if min_layer > max_layer {
            (0, 0)
        } else {
            (min_layer, max_layer)
        };

        let mut columns: IndexMap<Column, usize> = IndexMap::new();
        let mut cells: HashMap<(usize, i32), usize> = HashMap::new();
        let mut geometry = Geometry::new();

        for node in graph.nodes() {
            let column = match node.swimlane() {
                Some(lane) => Column::Lane(lane),
                None => Column::Single(node.key()),
            };
            let next = columns.len();
            let column = *columns.entry(column).or_insert(next);
            let layer = node.layer().unwrap_or(max_layer + 1);

            let slot = cells.entry((column, layer)).or_insert(0);
            let nudge = *slot as f32 * self.horizontal_spacing / 4.0;
            *slot += 1;

            let x = column as f32 * self.horizontal_spacing + nudge;
            let y = (layer - min_layer) as f32 * self.vertical_spacing;
            geometry.insert(node.key(), Point::new(x, y));
        }

        debug!(nodes = geometry.len(), columns = columns.len(); "Grid layout computed");
        geometry
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use abgraph_core::{
        antibody::{Antibody, ChemElement, Connection, DomainKey, DomainType, Endpoint, Peptide},
        identifier::Id,
    };

    use super::*;
    use crate::LayeredGraphBuilder;

    #[test]
    fn test_grid_positions() {
        let antibody = Antibody::new("grid")
            .with_peptide(
                Peptide::new("QH")
                    .with_domain("VH", DomainType::Variable, 10)
                    .with_domain("Hinge", DomainType::Hinge, 10),
            )
            .with_peptide(Peptide::new("QL").with_domain("VL", DomainType::Variable, 10))
            .with_chem(ChemElement::new("QX"))
            .with_connection(Connection::cystein(
                Endpoint::peptide(Id::new("QH"), 3),
                Endpoint::peptide(Id::new("QL"), 3),
            ));
        let builder = LayeredGraphBuilder::default();
        let mut graph = builder.build_layered_graph(&antibody).unwrap();

        let geometry = GridEngine::new(&LayoutConfig::new(100.0, 50.0)).layout(&graph);

        // QL sorts first and takes column 0; its VL is aligned to the hinge (layer 0).
        let vl = geometry
            .position(SequenceKey::Domain(DomainKey::new(Id::new("QL"), 0)))
            .unwrap();
        assert!(approx_eq!(f32, vl.x(), 0.0));
        assert!(approx_eq!(f32, vl.y(), 50.0));

        let vh = geometry
            .position(SequenceKey::Domain(DomainKey::new(Id::new("QH"), 0)))
            .unwrap();
        assert!(approx_eq!(f32, vh.x(), 100.0));
        assert!(approx_eq!(f32, vh.y(), 0.0));

        // The unconnected chem has no swimlane and no layer.
        let chem = geometry.position(SequenceKey::Chem(Id::new("QX"))).unwrap();
        assert!(approx_eq!(f32, chem.x(), 200.0));
        assert!(approx_eq!(f32, chem.y(), 100.0));

        assert_eq!(builder.layout(&mut graph).len(), 4);
    }

    #[test]
    fn test_empty_graph() {
        let geometry = GridEngine::default().layout(&AntibodyGraph::new());

        assert!(geometry.is_empty());
        assert_eq!(geometry.extent(), Point::default());
    }
}
