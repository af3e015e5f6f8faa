//! Satellite molecules: conjugated chemistries and nucleotide chains.

use crate::identifier::Id;

/// A small-molecule conjugate (linker, payload, PEG, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct ChemElement {
    id: Id,
    name: String,
    smiles: Option<String>,
}

impl ChemElement {
    pub fn new(name: &str) -> Self {
        Self {
            id: Id::new(name),
            name: name.to_string(),
            smiles: None,
        }
    }

    /// Attaches the structure as a SMILES string, kept for the chemistry toolkit.
    pub fn with_smiles(mut self, smiles: impl Into<String>) -> Self {
        self.smiles = Some(smiles.into());
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn smiles(&self) -> Option<&str> {
        self.smiles.as_deref()
    }
}

/// A nucleotide chain conjugated to the antibody.
#[derive(Debug, Clone, PartialEq)]
pub struct Rna {
    id: Id,
    name: String,
    bases: String,
}

impl Rna {
    pub fn new(name: &str) -> Self {
        Self {
            id: Id::new(name),
            name: name.to_string(),
            bases: String::new(),
        }
    }

    pub fn with_bases(mut self, bases: impl Into<String>) -> Self {
        self.bases = bases.into();
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bases(&self) -> &str {
        &self.bases
    }
}
