//! Peptide chains and the domains they fold into.

use std::fmt;

use serde::Deserialize;

use crate::identifier::Id;

/// Structural classification of a domain.
///
/// Only [`DomainType::Hinge`] is the core hinge; [`DomainType::UpHinge`] sits
/// structurally above it. Both mark a peptide as a heavy chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainType {
    Variable,
    Constant,
    UpHinge,
    Hinge,
    LowHinge,
    Linker,
    Other,
}

impl DomainType {
    /// Returns true for the core hinge and the up-hinge.
    pub fn is_hinge_like(self) -> bool {
        matches!(self, Self::Hinge | Self::UpHinge)
    }
}

/// Heavy/light classification of a peptide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainKind {
    Heavy,
    Light,
}

/// Identity of a domain: the owning peptide plus the domain's index in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DomainKey {
    peptide: Id,
    index: usize,
}

impl DomainKey {
    pub fn new(peptide: Id, index: usize) -> Self {
        Self { peptide, index }
    }

    pub fn peptide(&self) -> Id {
        self.peptide
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for DomainKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.peptide, self.index)
    }
}

/// A folded segment of a peptide covering an inclusive, 1-based residue range.
#[derive(Debug, Clone, PartialEq)]
pub struct Domain {
    id: Id,
    name: String,
    domain_type: DomainType,
    key: DomainKey,
    start: usize,
    end: usize,
}

impl Domain {
    pub fn id(&self) -> Id {
        self.id
    }

    pub fn key(&self) -> DomainKey {
        self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domain_type(&self) -> DomainType {
        self.domain_type
    }

    /// True only for the core hinge.
    pub fn is_hinge(&self) -> bool {
        self.domain_type == DomainType::Hinge
    }

    pub fn is_up_hinge(&self) -> bool {
        self.domain_type == DomainType::UpHinge
    }

    pub fn is_variable(&self) -> bool {
        self.domain_type == DomainType::Variable
    }

    pub fn peptide(&self) -> Id {
        self.key.peptide
    }

    pub fn index(&self) -> usize {
        self.key.index
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// Returns true when the absolute residue `position` falls in this domain.
    pub fn contains(&self, position: usize) -> bool {
        (self.start..=self.end).contains(&position)
    }
}

/// A peptide chain: an ordered list of domains from N- to C-terminus.
///
/// # Examples
///
/// ```
/// use abgraph_core::antibody::{ChainKind, DomainType, Peptide};
///
/// let heavy = Peptide::new("HC1")
///     .with_domain("VH", DomainType::Variable, 120)
///     .with_domain("CH1", DomainType::Constant, 100)
///     .with_domain("Hinge", DomainType::Hinge, 15);
///
/// assert_eq!(heavy.chain_kind(), ChainKind::Heavy);
/// assert_eq!(heavy.domain_at(121).map(|d| d.name()), Some("CH1"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Peptide {
    id: Id,
    name: String,
    label: String,
    uid: Option<String>,
    residues: String,
    domains: Vec<Domain>,
}

impl Peptide {
    /// Creates an empty peptide named `name`.
    pub fn new(name: &str) -> Self {
        Self {
            id: Id::new(name),
            name: name.to_string(),
            label: String::new(),
            uid: None,
            residues: String::new(),
            domains: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = Some(uid.into());
        self
    }

    /// Sets the one-letter amino-acid string of the chain.
    pub fn with_residues(mut self, residues: impl Into<String>) -> Self {
        self.residues = residues.into();
        self
    }

    /// Appends a domain of `length` residues right after the previous one.
    pub fn with_domain(self, name: &str, domain_type: DomainType, length: usize) -> Self {
        let start = self.domains.last().map_or(1, |last| last.end + 1);
        let end = (start + length).saturating_sub(1);
        self.with_domain_range(name, domain_type, start, end)
    }

    /// Appends a domain covering the explicit residue range `start..=end`.
    ///
    /// Ranges are not checked here; [`crate::antibody::Antibody::validate`] reports
    /// inverted or overlapping ranges.
    pub fn with_domain_range(
        mut self,
        name: &str,
        domain_type: DomainType,
        start: usize,
        end: usize,
    ) -> Self {
        let index = self.domains.len();
        self.domains.push(Domain {
            id: self.id.create_nested(Id::new(name)),
            name: name.to_string(),
            domain_type,
            key: DomainKey::new(self.id, index),
            start,
            end,
        });
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn uid(&self) -> Option<&str> {
        self.uid.as_deref()
    }

    pub fn residues(&self) -> &str {
        &self.residues
    }

    /// Returns the one-letter residue at the 1-based `position`, if known.
    pub fn residue_at(&self, position: usize) -> Option<char> {
        position
            .checked_sub(1)
            .and_then(|offset| self.residues.chars().nth(offset))
    }

    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }

    pub fn domain(&self, index: usize) -> Option<&Domain> {
        self.domains.get(index)
    }

    /// Returns the domain covering the absolute residue `position`.
    pub fn domain_at(&self, position: usize) -> Option<&Domain> {
        self.domains.iter().find(|domain| domain.contains(position))
    }

    /// Returns true if `index` is the C-terminal domain of this chain.
    pub fn is_last_domain(&self, index: usize) -> bool {
        index + 1 >= self.domains.len()
    }

    /// True when any domain is a core hinge or an up-hinge.
    pub fn has_hinge(&self) -> bool {
        self.domains
            .iter()
            .any(|domain| domain.domain_type.is_hinge_like())
    }

    pub fn chain_kind(&self) -> ChainKind {
        if self.has_hinge() {
            ChainKind::Heavy
        } else {
            ChainKind::Light
        }
    }

    pub fn is_heavy(&self) -> bool {
        self.chain_kind() == ChainKind::Heavy
    }

    /// Text shown above the chain: label, else uid, else name.
    pub fn display_label(&self) -> &str {
        if !self.label.is_empty() {
            &self.label
        } else if let Some(uid) = self.uid.as_deref() {
            uid
        } else {
            &self.name
        }
    }
}
