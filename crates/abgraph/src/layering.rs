//! Layer and swimlane assignment.
//!
//! [`LayeringEngine::assign_layers`] runs four passes in a fixed order; a later
//! pass overwrites the layers written by an earlier one:
//!
//! 1. **Hinge alignment** puts one reference domain per peptide on layer 0
//!    (the hinge line) and offsets the others by their sequence distance.
//! 2. **Light/heavy mirroring** re-anchors light chains on the heavy chain they
//!    are bound to, once from each side of the sorted peptide order.
//! 3. **Satellite alignment** places chem and RNA nodes next to the nearest
//!    domain reachable through connections.
//! 4. **Gap filling** positions whatever is still missing from its neighbours.
//!
//! None of the passes fails: missing anchors and unreachable satellites only
//! leave nodes for the next pass.

mod gap_fill;
mod hinge;
mod mirror;
mod satellite;

pub use satellite::NodeAlignmentRecord;

use log::info;

use abgraph_core::antibody::{Antibody, Peptide};

use crate::{config::LayeringConfig, graph::AntibodyGraph};

/// Runs the layering passes over a built graph.
#[derive(Debug, Clone, Copy)]
pub struct LayeringEngine<'a> {
    config: &'a LayeringConfig,
}

impl<'a> LayeringEngine<'a> {
    pub fn new(config: &'a LayeringConfig) -> Self {
        Self { config }
    }

    /// Assigns layers and swimlanes to every node it can place.
    ///
    /// `peptides` is the sorted peptide order the graph was built with. It is
    /// reversed during mirroring and restored before this returns.
    pub fn assign_layers(
        &self,
        graph: &mut AntibodyGraph,
        antibody: &Antibody,
        peptides: &mut [&Peptide],
    ) {
        info!(peptides = peptides.len(); "Assigning layers");

        hinge::align_hinges(graph, peptides);
        mirror::mirror_light_chains(graph, antibody, peptides, self.config.light_chain_offset());
        let aligned =
            satellite::align_satellites(graph, antibody, self.config.satellite_max_depth());
        let filled = gap_fill::fill_gaps(graph);

        info!(aligned_satellites = aligned, filled_gaps = filled; "Layers assigned");
    }
}

/// Runs gap filling alone. Returns the number of nodes it positioned.
///
/// Gap filling reads no configuration, so it needs no [`LayeringEngine`].
pub fn fill_gaps(graph: &mut AntibodyGraph) -> usize {
    gap_fill::fill_gaps(graph)
}
