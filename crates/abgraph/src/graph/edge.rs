//! Graph edges: chemical connections and synthetic backbone links.

use abgraph_core::antibody::{ConnectionId, ConnectionKind};

/// What an edge stands for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeKind {
    /// Link between consecutive domains of one peptide.
    ///
    /// `weight` is the critical-path priority of the peptide: 1.0 for the first
    /// peptide in sorted order, 2.0 for the next, and so on.
    Backbone { weight: f64 },

    /// One connection of the antibody model.
    Connection { id: ConnectionId, kind: ConnectionKind },
}

/// An edge of the layered graph.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphEdge {
    kind: EdgeKind,
    label: String,
}

impl GraphEdge {
    pub fn backbone(weight: f64) -> Self {
        Self {
            kind: EdgeKind::Backbone { weight },
            label: String::new(),
        }
    }

    pub fn connection(id: ConnectionId, kind: ConnectionKind, label: impl Into<String>) -> Self {
        Self {
            kind: EdgeKind::Connection { id, kind },
            label: label.into(),
        }
    }

    pub fn kind(&self) -> EdgeKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_backbone(&self) -> bool {
        matches!(self.kind, EdgeKind::Backbone { .. })
    }

    pub fn is_cystein(&self) -> bool {
        matches!(
            self.kind,
            EdgeKind::Connection {
                kind: ConnectionKind::Cystein,
                ..
            }
        )
    }

    pub fn connection_id(&self) -> Option<ConnectionId> {
        match self.kind {
            EdgeKind::Connection { id, .. } => Some(id),
            EdgeKind::Backbone { .. } => None,
        }
    }

    /// Critical-path weight; `None` for connection edges.
    pub fn weight(&self) -> Option<f64> {
        match self.kind {
            EdgeKind::Backbone { weight } => Some(weight),
            EdgeKind::Connection { .. } => None,
        }
    }
}
