//! The antibody domain model.
//!
//! An [`Antibody`] owns its peptide chains, the satellite molecules conjugated to
//! them and the chemical connections between all of these. The model supplies
//! iteration and lookup only; layering never mutates it.
//!
//! # Positions
//!
//! Residue positions are 1-based. A connection endpoint on a [`Peptide`] uses an
//! absolute position, an endpoint on a [`Domain`] a position relative to the
//! first residue of that domain. [`Antibody::absolute_position`] converts the
//! latter into the former.

mod connection;
mod element;
mod peptide;

pub use connection::{
    Connection, ConnectionId, ConnectionKind, CysteinBridge, Endpoint, GeneralConnection,
    SequenceRef, StatisticalConnection,
};
pub use element::{ChemElement, Rna};
pub use peptide::{ChainKind, Domain, DomainKey, DomainType, Peptide};

use std::collections::HashSet;

use log::debug;

use crate::{error::ModelError, identifier::Id};

/// Any drawable element of an antibody.
pub trait Sequence {
    /// Reference used to address this element in connections and graphs.
    fn sequence_ref(&self) -> SequenceRef;

    /// Name shown on the node.
    fn display_name(&self) -> &str;
}

impl Sequence for Domain {
    fn sequence_ref(&self) -> SequenceRef {
        SequenceRef::Domain(self.key())
    }

    fn display_name(&self) -> &str {
        self.name()
    }
}

impl Sequence for Peptide {
    fn sequence_ref(&self) -> SequenceRef {
        SequenceRef::Peptide(self.id())
    }

    fn display_name(&self) -> &str {
        self.name()
    }
}

impl Sequence for ChemElement {
    fn sequence_ref(&self) -> SequenceRef {
        SequenceRef::Chem(self.id())
    }

    fn display_name(&self) -> &str {
        self.name()
    }
}

impl Sequence for Rna {
    fn sequence_ref(&self) -> SequenceRef {
        SequenceRef::Rna(self.id())
    }

    fn display_name(&self) -> &str {
        self.name()
    }
}

/// A complete antibody: chains, satellites and connections.
///
/// # Examples
///
/// ```
/// use abgraph_core::antibody::{Antibody, Connection, DomainType, Endpoint, Peptide};
/// use abgraph_core::identifier::Id;
///
/// let antibody = Antibody::new("mAb")
///     .with_peptide(
///         Peptide::new("H")
///             .with_domain("VH", DomainType::Variable, 110)
///             .with_domain("Hinge", DomainType::Hinge, 15),
///     )
///     .with_peptide(Peptide::new("L").with_domain("VL", DomainType::Variable, 107))
///     .with_connection(Connection::cystein(
///         Endpoint::peptide(Id::new("H"), 120),
///         Endpoint::peptide(Id::new("L"), 100),
///     ));
///
/// assert!(antibody.validate().is_ok());
/// assert_eq!(antibody.heavy_peptides().count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Antibody {
    name: String,
    peptides: Vec<Peptide>,
    chem_elements: Vec<ChemElement>,
    rna_elements: Vec<Rna>,
    connections: Vec<Connection>,
}

impl Antibody {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_peptide(mut self, peptide: Peptide) -> Self {
        self.add_peptide(peptide);
        self
    }

    pub fn with_chem(mut self, chem: ChemElement) -> Self {
        self.add_chem(chem);
        self
    }

    pub fn with_rna(mut self, rna: Rna) -> Self {
        self.add_rna(rna);
        self
    }

    pub fn with_connection(mut self, connection: Connection) -> Self {
        self.add_connection(connection);
        self
    }

    pub fn add_peptide(&mut self, peptide: Peptide) {
        self.peptides.push(peptide);
    }

    pub fn add_chem(&mut self, chem: ChemElement) {
        self.chem_elements.push(chem);
    }

    pub fn add_rna(&mut self, rna: Rna) {
        self.rna_elements.push(rna);
    }

    /// Appends a connection and returns its id.
    pub fn add_connection(&mut self, connection: Connection) -> ConnectionId {
        self.connections.push(connection);
        ConnectionId::new(self.connections.len() - 1)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn peptides(&self) -> &[Peptide] {
        &self.peptides
    }

    pub fn chem_elements(&self) -> &[ChemElement] {
        &self.chem_elements
    }

    pub fn rna_elements(&self) -> &[Rna] {
        &self.rna_elements
    }

    pub fn peptide(&self, id: Id) -> Option<&Peptide> {
        self.peptides.iter().find(|peptide| peptide.id() == id)
    }

    pub fn chem(&self, id: Id) -> Option<&ChemElement> {
        self.chem_elements.iter().find(|chem| chem.id() == id)
    }

    pub fn rna(&self, id: Id) -> Option<&Rna> {
        self.rna_elements.iter().find(|rna| rna.id() == id)
    }

    pub fn domain(&self, key: DomainKey) -> Option<&Domain> {
        self.peptide(key.peptide())
            .and_then(|peptide| peptide.domain(key.index()))
    }

    /// Peptides carrying a hinge or up-hinge domain, in model order.
    pub fn heavy_peptides(&self) -> impl Iterator<Item = &Peptide> {
        self.peptides.iter().filter(|peptide| peptide.is_heavy())
    }

    /// Looks up any drawable element.
    pub fn sequence(&self, sequence: SequenceRef) -> Option<&dyn Sequence> {
        match sequence {
            SequenceRef::Peptide(id) => self.peptide(id).map(|p| p as &dyn Sequence),
            SequenceRef::Domain(key) => self.domain(key).map(|d| d as &dyn Sequence),
            SequenceRef::Chem(id) => self.chem(id).map(|c| c as &dyn Sequence),
            SequenceRef::Rna(id) => self.rna(id).map(|r| r as &dyn Sequence),
        }
    }

    pub fn contains(&self, sequence: SequenceRef) -> bool {
        self.sequence(sequence).is_some()
    }

    pub fn connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.get(id.index())
    }

    /// All connections with their ids, in model order.
    pub fn connections(&self) -> impl Iterator<Item = (ConnectionId, &Connection)> {
        self.connections
            .iter()
            .enumerate()
            .map(|(index, connection)| (ConnectionId::new(index), connection))
    }

    /// Connections with at least one end on `sequence`.
    ///
    /// Peptide and domain references are matched by their owning peptide, so a
    /// domain sees every connection of its chain.
    pub fn connections_of(
        &self,
        sequence: SequenceRef,
    ) -> impl Iterator<Item = (ConnectionId, &Connection)> {
        self.connections()
            .filter(move |(_, connection)| connection.touches(sequence))
    }

    /// Resolves an endpoint to the domain it lands on.
    ///
    /// Peptide endpoints resolve to the domain covering the stated residue; chem
    /// and RNA endpoints never resolve.
    pub fn resolve_domain(&self, endpoint: &Endpoint) -> Option<&Domain> {
        match endpoint.sequence() {
            SequenceRef::Peptide(id) => self.peptide(id)?.domain_at(endpoint.position()),
            SequenceRef::Domain(key) => self.domain(key),
            SequenceRef::Chem(_) | SequenceRef::Rna(_) => None,
        }
    }

    /// Converts an endpoint position into an absolute residue position.
    pub fn absolute_position(&self, endpoint: &Endpoint) -> Option<usize> {
        match endpoint.sequence() {
            SequenceRef::Domain(key) => {
                let domain = self.domain(key)?;
                (domain.start() + endpoint.position()).checked_sub(1)
            }
            _ => Some(endpoint.position()),
        }
    }

    /// Returns the amino acid at a peptide or domain endpoint, if known.
    pub fn residue_at(&self, endpoint: &Endpoint) -> Option<char> {
        let peptide = self.peptide(endpoint.sequence().peptide()?)?;
        peptide.residue_at(self.absolute_position(endpoint)?)
    }

    /// Checks the structural invariants of the model.
    ///
    /// # Errors
    ///
    /// Returns the first [`ModelError`] found:
    /// - two sequences share an id,
    /// - a domain range is empty, inverted or starts at 0,
    /// - consecutive domains overlap,
    /// - a domain ends past the residue string (when residues are known).
    pub fn validate(&self) -> Result<(), ModelError> {
        debug!(antibody = self.name.as_str(), peptides = self.peptides.len(); "Validating model");

        let mut seen = HashSet::new();
        let ids = self
            .peptides
            .iter()
            .map(Peptide::id)
            .chain(self.chem_elements.iter().map(ChemElement::id))
            .chain(self.rna_elements.iter().map(Rna::id));
        for id in ids {
            if !seen.insert(id) {
                return Err(ModelError::DuplicateSequence { id: id.to_string() });
            }
        }

        for peptide in &self.peptides {
            validate_peptide(peptide)?;
        }

        Ok(())
    }
}

fn validate_peptide(peptide: &Peptide) -> Result<(), ModelError> {
    let length = peptide.residues().chars().count();

    for domain in peptide.domains() {
        if domain.start() == 0 || domain.end() < domain.start() {
            return Err(ModelError::InvalidRange {
                domain: domain.id().to_string(),
                start: domain.start(),
                end: domain.end(),
            });
        }
        if length > 0 && domain.end() > length {
            return Err(ModelError::DomainOutOfBounds {
                peptide: peptide.name().to_string(),
                domain: domain.name().to_string(),
                end: domain.end(),
                length,
            });
        }
    }

    for pair in peptide.domains().windows(2) {
        if pair[1].start() <= pair[0].end() {
            return Err(ModelError::OverlappingDomains {
                peptide: peptide.name().to_string(),
                first: pair[0].name().to_string(),
                second: pair[1].name().to_string(),
            });
        }
    }

    Ok(())
}
