//! Chemical connections between sequences.
//!
//! A [`Connection`] is one of three payload shapes:
//!
//! - [`CysteinBridge`]: a disulfide bridge between two cysteine residues.
//! - [`GeneralConnection`]: any covalent link, with the R-groups used on both sides.
//! - [`StatisticalConnection`]: a general connection with a fractional loading,
//!   e.g. a drug-to-antibody ratio spread over several attachment sites.
//!
//! Endpoints are addressed through [`SequenceRef`]; a [`SequenceRef::Domain`]
//! endpoint carries a position relative to the domain start, every other kind an
//! absolute 1-based position.

use std::fmt;

use crate::{antibody::DomainKey, identifier::Id};

/// Index of a connection in its antibody.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(usize);

impl ConnectionId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Reference to any drawable sequence of an antibody.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceRef {
    /// A whole peptide, standing in for the domain at the endpoint position.
    Peptide(Id),
    Domain(DomainKey),
    Chem(Id),
    Rna(Id),
}

impl SequenceRef {
    /// Collapses a domain reference onto its peptide.
    ///
    /// Two references with the same owner belong to the same chain or element.
    pub fn owner(self) -> SequenceRef {
        match self {
            Self::Domain(key) => Self::Peptide(key.peptide()),
            other => other,
        }
    }

    /// Returns the peptide for peptide and domain references.
    pub fn peptide(self) -> Option<Id> {
        match self {
            Self::Peptide(id) => Some(id),
            Self::Domain(key) => Some(key.peptide()),
            Self::Chem(_) | Self::Rna(_) => None,
        }
    }

    /// True for chem elements and RNA.
    pub fn is_satellite(self) -> bool {
        matches!(self, Self::Chem(_) | Self::Rna(_))
    }
}

impl fmt::Display for SequenceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Peptide(id) => write!(f, "peptide {id}"),
            Self::Domain(key) => write!(f, "domain {key}"),
            Self::Chem(id) => write!(f, "chem {id}"),
            Self::Rna(id) => write!(f, "rna {id}"),
        }
    }
}

/// One side of a connection: a sequence and a 1-based position in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Endpoint {
    sequence: SequenceRef,
    position: usize,
}

impl Endpoint {
    pub fn new(sequence: SequenceRef, position: usize) -> Self {
        Self { sequence, position }
    }

    /// Absolute residue `position` on peptide `id`.
    pub fn peptide(id: Id, position: usize) -> Self {
        Self::new(SequenceRef::Peptide(id), position)
    }

    /// `position` relative to the first residue of the domain.
    pub fn domain(key: DomainKey, position: usize) -> Self {
        Self::new(SequenceRef::Domain(key), position)
    }

    pub fn chem(id: Id) -> Self {
        Self::new(SequenceRef::Chem(id), 1)
    }

    pub fn rna(id: Id) -> Self {
        Self::new(SequenceRef::Rna(id), 1)
    }

    pub fn sequence(&self) -> SequenceRef {
        self.sequence
    }

    pub fn position(&self) -> usize {
        self.position
    }
}

/// Discriminant of a [`Connection`], used for edge styling and layering rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionKind {
    Cystein,
    General,
    Statistical,
}

/// Disulfide bridge between two cysteine residues.
#[derive(Debug, Clone, PartialEq)]
pub struct CysteinBridge {
    source: Endpoint,
    target: Endpoint,
}

/// Covalent link between any two sequences.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneralConnection {
    source: Endpoint,
    target: Endpoint,
    source_rest: String,
    target_rest: String,
}

impl GeneralConnection {
    pub fn source_rest(&self) -> &str {
        &self.source_rest
    }

    pub fn target_rest(&self) -> &str {
        &self.target_rest
    }
}

/// General connection with a fractional number of equivalents.
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticalConnection {
    source: Endpoint,
    target: Endpoint,
    source_rest: String,
    target_rest: String,
    equivalents: f64,
}

impl StatisticalConnection {
    pub fn source_rest(&self) -> &str {
        &self.source_rest
    }

    pub fn target_rest(&self) -> &str {
        &self.target_rest
    }

    pub fn equivalents(&self) -> f64 {
        self.equivalents
    }
}

/// A chemical connection between two sequences.
#[derive(Debug, Clone, PartialEq)]
pub enum Connection {
    Cystein(CysteinBridge),
    General(GeneralConnection),
    Statistical(StatisticalConnection),
}

impl Connection {
    pub fn cystein(source: Endpoint, target: Endpoint) -> Self {
        Self::Cystein(CysteinBridge { source, target })
    }

    pub fn general(
        source: Endpoint,
        target: Endpoint,
        source_rest: impl Into<String>,
        target_rest: impl Into<String>,
    ) -> Self {
        Self::General(GeneralConnection {
            source,
            target,
            source_rest: source_rest.into(),
            target_rest: target_rest.into(),
        })
    }

    pub fn statistical(
        source: Endpoint,
        target: Endpoint,
        source_rest: impl Into<String>,
        target_rest: impl Into<String>,
        equivalents: f64,
    ) -> Self {
        Self::Statistical(StatisticalConnection {
            source,
            target,
            source_rest: source_rest.into(),
            target_rest: target_rest.into(),
            equivalents,
        })
    }

    pub fn kind(&self) -> ConnectionKind {
        match self {
            Self::Cystein(_) => ConnectionKind::Cystein,
            Self::General(_) => ConnectionKind::General,
            Self::Statistical(_) => ConnectionKind::Statistical,
        }
    }

    pub fn source(&self) -> &Endpoint {
        match self {
            Self::Cystein(bridge) => &bridge.source,
            Self::General(conn) => &conn.source,
            Self::Statistical(conn) => &conn.source,
        }
    }

    pub fn target(&self) -> &Endpoint {
        match self {
            Self::Cystein(bridge) => &bridge.target,
            Self::General(conn) => &conn.target,
            Self::Statistical(conn) => &conn.target,
        }
    }

    /// True if both ends belong to the same peptide or element.
    pub fn is_self_connection(&self) -> bool {
        self.source().sequence().owner() == self.target().sequence().owner()
    }

    /// True if one end belongs to `sequence` (compared by owner).
    pub fn touches(&self, sequence: SequenceRef) -> bool {
        let owner = sequence.owner();
        self.source().sequence().owner() == owner || self.target().sequence().owner() == owner
    }

    /// Returns the endpoint on the far side of `sequence`.
    ///
    /// For a self-connection the target is returned.
    pub fn opposite(&self, sequence: SequenceRef) -> Option<&Endpoint> {
        let owner = sequence.owner();
        if self.source().sequence().owner() == owner {
            Some(self.target())
        } else if self.target().sequence().owner() == owner {
            Some(self.source())
        } else {
            None
        }
    }

    /// Returns the endpoint on the side of `sequence`.
    pub fn near(&self, sequence: SequenceRef) -> Option<&Endpoint> {
        let owner = sequence.owner();
        if self.source().sequence().owner() == owner {
            Some(self.source())
        } else if self.target().sequence().owner() == owner {
            Some(self.target())
        } else {
            None
        }
    }
}
