//! Graph nodes and the keys that identify them.

use std::fmt;

use abgraph_core::{
    antibody::{DomainKey, DomainType, SequenceRef},
    identifier::Id,
};

/// Identity of a node: the sequence it draws.
///
/// Peptides are never nodes themselves; each of their domains is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceKey {
    Domain(DomainKey),
    Chem(Id),
    Rna(Id),
}

impl SequenceKey {
    /// Converts a sequence reference that names a node directly.
    ///
    /// Returns `None` for a whole peptide, which needs the model (or the graph,
    /// see [`crate::graph::AntibodyGraph::find_node`]) to pick a domain.
    pub fn from_ref(sequence: SequenceRef) -> Option<Self> {
        match sequence {
            SequenceRef::Domain(key) => Some(Self::Domain(key)),
            SequenceRef::Chem(id) => Some(Self::Chem(id)),
            SequenceRef::Rna(id) => Some(Self::Rna(id)),
            SequenceRef::Peptide(_) => None,
        }
    }

    pub fn to_ref(self) -> SequenceRef {
        match self {
            Self::Domain(key) => SequenceRef::Domain(key),
            Self::Chem(id) => SequenceRef::Chem(id),
            Self::Rna(id) => SequenceRef::Rna(id),
        }
    }

    pub fn domain(self) -> Option<DomainKey> {
        match self {
            Self::Domain(key) => Some(key),
            _ => None,
        }
    }
}

impl fmt::Display for SequenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(key) => write!(f, "{key}"),
            Self::Chem(id) | Self::Rna(id) => write!(f, "{id}"),
        }
    }
}

/// Column-sharing key. Nodes with the same swimlane render in the same column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwimlaneKey(Id);

impl SwimlaneKey {
    pub fn new(id: Id) -> Self {
        Self(id)
    }

    pub fn id(self) -> Id {
        self.0
    }
}

impl fmt::Display for SwimlaneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a node draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Domain(DomainType),
    Chem,
    Rna,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(DomainType::Variable) => write!(f, "variable"),
            Self::Domain(DomainType::Constant) => write!(f, "constant"),
            Self::Domain(DomainType::UpHinge) => write!(f, "up_hinge"),
            Self::Domain(DomainType::Hinge) => write!(f, "hinge"),
            Self::Domain(DomainType::LowHinge) => write!(f, "low_hinge"),
            Self::Domain(DomainType::Linker) => write!(f, "linker"),
            Self::Domain(DomainType::Other) => write!(f, "other"),
            Self::Chem => write!(f, "chem"),
            Self::Rna => write!(f, "rna"),
        }
    }
}

/// A node of the layered graph together with its layout hints.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    key: SequenceKey,
    name: String,
    kind: NodeKind,
    layer: Option<i32>,
    swimlane: Option<SwimlaneKey>,
    group: Option<Id>,
}

impl GraphNode {
    pub fn new(key: SequenceKey, name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            key,
            name: name.into(),
            kind,
            layer: None,
            swimlane: None,
            group: None,
        }
    }

    pub fn key(&self) -> SequenceKey {
        self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Layer id; 0 is the hinge line and smaller ids are drawn higher up.
    pub fn layer(&self) -> Option<i32> {
        self.layer
    }

    pub fn swimlane(&self) -> Option<SwimlaneKey> {
        self.swimlane
    }

    /// The peptide group this node is drawn in.
    pub fn group(&self) -> Option<Id> {
        self.group
    }

    /// True for chem and RNA nodes.
    pub fn is_satellite(&self) -> bool {
        matches!(self.kind, NodeKind::Chem | NodeKind::Rna)
    }

    pub fn is_core_hinge(&self) -> bool {
        self.kind == NodeKind::Domain(DomainType::Hinge)
    }

    pub(crate) fn set_layer(&mut self, layer: i32) {
        self.layer = Some(layer);
    }

    pub(crate) fn set_swimlane(&mut self, swimlane: Option<SwimlaneKey>) {
        self.swimlane = swimlane;
    }

    pub(crate) fn set_group(&mut self, group: Option<Id>) {
        self.group = group;
    }
}
