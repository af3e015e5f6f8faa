use abgraph_core::identifier::Id;

use super::SequenceKey;

/// The per-peptide container drawn around a chain.
#[derive(Debug, Clone, PartialEq)]
pub struct PeptideGroup {
    peptide: Id,
    label: String,
    weight: f64,
    members: Vec<SequenceKey>,
}

impl PeptideGroup {
    pub fn new(peptide: Id, label: impl Into<String>, weight: f64) -> Self {
        Self {
            peptide,
            label: label.into(),
            weight,
            members: Vec::new(),
        }
    }

    pub fn peptide(&self) -> Id {
        self.peptide
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Critical-path weight shared by the backbone edges of this peptide.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn members(&self) -> &[SequenceKey] {
        &self.members
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub(crate) fn add_member(&mut self, key: SequenceKey) {
        if !self.members.contains(&key) {
            self.members.push(key);
        }
    }

    pub(crate) fn remove_member(&mut self, key: SequenceKey) {
        self.members.retain(|member| *member != key);
    }
}
