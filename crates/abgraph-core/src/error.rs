//! Errors raised when an antibody model is structurally invalid.

use thiserror::Error;

/// Invalid model state detected by [`crate::antibody::Antibody::validate`].
///
/// Connections that cannot be resolved are not model errors; the graph builder
/// skips them with a warning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("Duplicate sequence id `{id}`")]
    DuplicateSequence { id: String },

    #[error("Domain `{domain}` has an empty or inverted residue range {start}..={end}")]
    InvalidRange {
        domain: String,
        start: usize,
        end: usize,
    },

    #[error("Domains `{first}` and `{second}` of peptide `{peptide}` overlap")]
    OverlappingDomains {
        peptide: String,
        first: String,
        second: String,
    },

    #[error("Domain `{domain}` ends at residue {end} but peptide `{peptide}` has {length} residues")]
    DomainOutOfBounds {
        peptide: String,
        domain: String,
        end: usize,
        length: usize,
    },
}
