use log::debug;

use abgraph_core::antibody::{Domain, Peptide};

use crate::graph::{AntibodyGraph, SequenceKey};

/// Index of the domain that sits on the hinge line.
///
/// First core hinge, else first up-hinge, else first variable domain.
pub(crate) fn reference_index(peptide: &Peptide) -> Option<usize> {
    let domains = peptide.domains();
    domains
        .iter()
        .position(Domain::is_hinge)
        .or_else(|| domains.iter().position(Domain::is_up_hinge))
        .or_else(|| domains.iter().position(Domain::is_variable))
}

/// Gives domain `i` of every peptide the layer `i - reference`.
///
/// Peptides without a reference domain are numbered from 0.
pub(crate) fn align_hinges(graph: &mut AntibodyGraph, peptides: &[&Peptide]) {
    for peptide in peptides {
        let reference = reference_index(peptide);
        let offset = reference.unwrap_or(0) as i32;
        for domain in peptide.domains() {
            if let Some(index) = graph.index_of(SequenceKey::Domain(domain.key())) {
                graph.set_layer_at(index, domain.index() as i32 - offset);
            }
        }
        debug!(peptide = peptide.name(), reference:?; "Aligned peptide on hinge line");
    }
}

#[cfg(test)]
mod tests {
    use abgraph_core::antibody::DomainType;

    use super::*;

    #[test]
    fn test_reference_priority() {
        let with_hinge = Peptide::new("RH")
            .with_domain("V", DomainType::Variable, 5)
            .with_domain("U", DomainType::UpHinge, 5)
            .with_domain("H", DomainType::Hinge, 5);
        assert_eq!(reference_index(&with_hinge), Some(2));

        let up_hinge_only = Peptide::new("RU")
            .with_domain("V", DomainType::Variable, 5)
            .with_domain("U", DomainType::UpHinge, 5);
        assert_eq!(reference_index(&up_hinge_only), Some(1));

        let variable_only = Peptide::new("RV")
            .with_domain("C", DomainType::Constant, 5)
            .with_domain("V", DomainType::Variable, 5);
        assert_eq!(reference_index(&variable_only), Some(1));

        let none = Peptide::new("RN")
            .with_domain("C", DomainType::Constant, 5)
            .with_domain("L", DomainType::LowHinge, 5);
        assert_eq!(reference_index(&none), None);
    }
}
