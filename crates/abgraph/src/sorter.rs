//! Chain sorting: interleaves heavy chains with the light chains bound to them.
//!
//! Heavy chains keep their relative order. Light chains directly connected to a
//! heavy chain are spliced next to it, alternating sides (before the 1st, 3rd,
//! ... heavy chain, after the 2nd, 4th, ...) so the drawing stays laterally
//! balanced. Peptides never reached are appended in model order.

use std::collections::HashSet;

use indexmap::IndexMap;
use log::{debug, trace};

use abgraph_core::{
    antibody::{Antibody, Peptide},
    identifier::Id,
};

/// Returns the peptides of `antibody` in drawing order.
///
/// # Examples
///
/// ```
/// use abgraph::sorter::sort_peptides;
/// use abgraph_core::antibody::{Antibody, Connection, DomainType, Endpoint, Peptide};
/// use abgraph_core::identifier::Id;
///
/// let antibody = Antibody::new("mAb")
///     .with_peptide(Peptide::new("H1").with_domain("Hinge", DomainType::Hinge, 10))
///     .with_peptide(Peptide::new("H2").with_domain("Hinge", DomainType::Hinge, 10))
///     .with_peptide(Peptide::new("L1").with_domain("VL", DomainType::Variable, 10))
///     .with_peptide(Peptide::new("L2").with_domain("VL", DomainType::Variable, 10))
///     .with_connection(Connection::cystein(
///         Endpoint::peptide(Id::new("H1"), 2),
///         Endpoint::peptide(Id::new("L1"), 2),
///     ))
///     .with_connection(Connection::cystein(
///         Endpoint::peptide(Id::new("H2"), 2),
///         Endpoint::peptide(Id::new("L2"), 2),
///     ));
///
/// let names: Vec<_> = sort_peptides(&antibody).iter().map(|p| p.name()).collect();
/// assert_eq!(names, ["L1", "H1", "H2", "L2"]);
/// ```
pub fn sort_peptides(antibody: &Antibody) -> Vec<&Peptide> {
    let peptides = antibody.peptides();
    let adjacency = peptide_adjacency(antibody);
    let is_heavy = |id: Id| antibody.peptide(id).is_some_and(Peptide::is_heavy);

    let mut sorted: Vec<Id> = Vec::with_capacity(peptides.len());
    let mut placed: HashSet<Id> = HashSet::new();
    let mut processed: HashSet<Id> = HashSet::new();
    let mut heavy_count = 0usize;
    let mut next: Option<Id> = None;

    loop {
        let current = match next.take() {
            Some(id) => id,
            None => match antibody
                .heavy_peptides()
                .map(Peptide::id)
                .find(|id| !processed.contains(id))
            {
                Some(id) => id,
                None => break,
            },
        };
        processed.insert(current);

        let mut lights = Vec::new();
        for neighbour in adjacency.get(&current).into_iter().flatten().copied() {
            if is_heavy(neighbour) {
                if next.is_none() && !processed.contains(&neighbour) {
                    next = Some(neighbour);
                }
            } else if placed.insert(neighbour) {
                lights.push(neighbour);
            }
        }

        heavy_count += 1;
        placed.insert(current);
        trace!(heavy = current.to_string(), lights = lights.len(); "Placing heavy chain");
        if heavy_count % 2 == 1 {
            sorted.extend(lights);
            sorted.push(current);
        } else {
            sorted.push(current);
            sorted.extend(lights);
        }
    }

    for peptide in peptides {
        if placed.insert(peptide.id()) {
            sorted.push(peptide.id());
        }
    }

    debug!(heavy_chains = heavy_count, peptides = sorted.len(); "Sorted peptide chains");

    sorted
        .into_iter()
        .filter_map(|id| antibody.peptide(id))
        .collect()
}

/// Peptide-to-peptide adjacency in connection order, without self-connections.
fn peptide_adjacency(antibody: &Antibody) -> IndexMap<Id, Vec<Id>> {
    let mut adjacency: IndexMap<Id, Vec<Id>> = IndexMap::new();
    for (_, connection) in antibody.connections() {
        if connection.is_self_connection() {
            continue;
        }
        let (Some(source), Some(target)) = (
            connection.source().sequence().peptide(),
            connection.target().sequence().peptide(),
        ) else {
            continue;
        };
        for (from, to) in [(source, target), (target, source)] {
            let neighbours = adjacency.entry(from).or_default();
            if !neighbours.contains(&to) {
                neighbours.push(to);
            }
        }
    }
    adjacency
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use abgraph_core::antibody::{Connection, DomainType, Endpoint};

    use super::*;

    // ===================
    // Strategies
    // ===================

    /// Heavy/light flags for each peptide plus random peptide pairs to connect.
    fn antibody_strategy() -> impl Strategy<Value = (Vec<bool>, Vec<(usize, usize)>)> {
        prop::collection::vec(any::<bool>(), 1..8).prop_flat_map(|flags| {
            let n = flags.len();
            (
                Just(flags),
                prop::collection::vec((0..n, 0..n), 0..12),
            )
        })
    }

    fn build_antibody(flags: &[bool], pairs: &[(usize, usize)]) -> Antibody {
        let name = |i: usize| format!("prop{i}");
        let mut antibody = Antibody::new("prop");
        for (i, heavy) in flags.iter().enumerate() {
            let domain_type = if *heavy {
                DomainType::Hinge
            } else {
                DomainType::Variable
            };
            antibody.add_peptide(Peptide::new(&name(i)).with_domain("D", domain_type, 10));
        }
        for (a, b) in pairs {
            antibody.add_connection(Connection::general(
                Endpoint::peptide(Id::new(&name(*a)), 1),
                Endpoint::peptide(Id::new(&name(*b)), 1),
                "R1",
                "R1",
            ));
        }
        antibody
    }

    // ===================
    // Property Test Functions
    // ===================

    /// The output holds every input peptide exactly once.
    fn check_sort_is_permutation(
        flags: &[bool],
        pairs: &[(usize, usize)],
    ) -> Result<(), TestCaseError> {
        let antibody = build_antibody(flags, pairs);
        let sorted = sort_peptides(&antibody);

        let mut input: Vec<String> = antibody.peptides().iter().map(|p| p.name().to_string()).collect();
        let mut output: Vec<String> = sorted.iter().map(|p| p.name().to_string()).collect();
        input.sort();
        output.sort();
        prop_assert_eq!(input, output);
        Ok(())
    }

    /// A light chain bound to a heavy chain sits in the run of light chains next
    /// to one of the heavy chains it is bound to.
    fn check_lights_next_to_their_heavy(
        flags: &[bool],
        pairs: &[(usize, usize)],
    ) -> Result<(), TestCaseError> {
        let antibody = build_antibody(flags, pairs);
        let sorted = sort_peptides(&antibody);
        let adjacency = peptide_adjacency(&antibody);

        for (position, peptide) in sorted.iter().enumerate() {
            if peptide.is_heavy() {
                continue;
            }
            let bound: Vec<Id> = adjacency
                .get(&peptide.id())
                .into_iter()
                .flatten()
                .copied()
                .filter(|id| antibody.peptide(*id).is_some_and(Peptide::is_heavy))
                .collect();
            if bound.is_empty() {
                continue;
            }

            let left = sorted[..position].iter().rev().find(|p| p.is_heavy());
            let right = sorted[position + 1..].iter().find(|p| p.is_heavy());
            let reaches = |candidate: Option<&&Peptide>| {
                candidate.is_some_and(|p| bound.contains(&p.id()))
            };
            prop_assert!(
                reaches(left) || reaches(right),
                "light chain {} is not next to a bound heavy chain in {:?}",
                peptide.name(),
                sorted.iter().map(|p| p.name()).collect::<Vec<_>>()
            );
        }
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn sort_is_permutation((flags, pairs) in antibody_strategy()) {
            check_sort_is_permutation(&flags, &pairs)?;
        }

        #[test]
        fn lights_next_to_their_heavy((flags, pairs) in antibody_strategy()) {
            check_lights_next_to_their_heavy(&flags, &pairs)?;
        }
    }
}
