//! abgraph - Layered graphs for schematic antibody diagrams.
//!
//! Turns a typed antibody model into a node/edge graph whose nodes carry an
//! integer layer and a swimlane, ready for a hierarchical drawing backend. The
//! pipeline is chain sorting, graph building and four layering passes (hinge
//! alignment, light/heavy mirroring, satellite alignment, gap filling).

pub mod builder;
pub mod config;
pub mod graph;
pub mod layering;
pub mod layout;
pub mod sorter;

mod error;

pub use abgraph_core::{antibody, geometry, identifier};

pub use error::AbGraphError;

use log::{debug, info, trace};

use abgraph_core::antibody::Antibody;

use builder::GraphBuilder;
use config::AppConfig;
use graph::AntibodyGraph;
use layering::LayeringEngine;
use layout::{Geometry, GridEngine, LayoutEngine};

/// Entry point for building layered antibody graphs.
///
/// The builder is owned by its caller; it holds the configuration and the
/// layout backend and no other state.
///
/// # Examples
///
/// ```
/// use abgraph::{LayeredGraphBuilder, config::AppConfig};
/// use abgraph::antibody::{Antibody, Connection, DomainType, Endpoint, Peptide};
/// use abgraph::identifier::Id;
///
/// let antibody = Antibody::new("mAb")
///     .with_peptide(
///         Peptide::new("H")
///             .with_domain("VH", DomainType::Variable, 10)
///             .with_domain("CH1", DomainType::Constant, 10)
///             .with_domain("Hinge", DomainType::Hinge, 10),
///     )
///     .with_peptide(Peptide::new("L").with_domain("VL", DomainType::Variable, 10))
///     .with_connection(Connection::cystein(
///         Endpoint::peptide(Id::new("H"), 15),
///         Endpoint::peptide(Id::new("L"), 5),
///     ));
///
/// let builder = LayeredGraphBuilder::new(AppConfig::default());
/// let mut graph = builder.build_layered_graph(&antibody).expect("valid model");
/// let geometry = builder.layout(&mut graph);
///
/// assert_eq!(geometry.len(), 4);
/// ```
pub struct LayeredGraphBuilder {
    config: AppConfig,
    engine: Box<dyn LayoutEngine>,
}

impl Default for LayeredGraphBuilder {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl LayeredGraphBuilder {
    /// Creates a builder using the reference [`GridEngine`] for layout.
    ///
    /// # Arguments
    ///
    /// * `config` - Layering and layout configuration
    pub fn new(config: AppConfig) -> Self {
        let engine = Box::new(GridEngine::new(config.layout()));
        Self { config, engine }
    }

    /// Replaces the layout backend.
    pub fn with_engine(mut self, engine: impl LayoutEngine + 'static) -> Self {
        self.engine = Box::new(engine);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// A graph builder configured like this one, for interactive edits.
    pub fn graph_builder(&self) -> GraphBuilder {
        GraphBuilder::new(self.config.layering())
    }

    /// Sorts chains, builds the graph and runs all layering passes.
    ///
    /// The graph is rebuilt from scratch on every call, so calling this twice on
    /// an unchanged model gives identical layers and swimlanes.
    ///
    /// # Errors
    ///
    /// Returns [`AbGraphError::Model`] if the model fails validation. Broken
    /// connectivity is not an error; it only degrades the layout.
    pub fn build_layered_graph(&self, antibody: &Antibody) -> Result<AntibodyGraph, AbGraphError> {
        info!(antibody = antibody.name(); "Building layered graph");
        antibody.validate()?;

        let mut peptides = sorter::sort_peptides(antibody);
        let mut graph = self.graph_builder().build(antibody, &peptides);
        LayeringEngine::new(self.config.layering()).assign_layers(
            &mut graph,
            antibody,
            &mut peptides,
        );

        debug!(nodes = graph.node_count(), edges = graph.edge_count(); "Layered graph ready");
        trace!(graph:?; "Layered graph");
        Ok(graph)
    }

    /// Re-runs gap filling alone, for graphs edited after layering.
    ///
    /// Returns the number of nodes that received a layer.
    pub fn recompute_hints(&self, graph: &mut AntibodyGraph) -> usize {
        let filled = layering::fill_gaps(graph);
        debug!(filled; "Recomputed layout hints");
        filled
    }

    /// Drops empty groups and hands the graph to the layout backend.
    pub fn layout(&self, graph: &mut AntibodyGraph) -> Geometry {
        graph.remove_empty_groups();
        let geometry = self.engine.layout(graph);
        info!(nodes = geometry.len(); "Layout calculated");
        geometry
    }
}
