//! Light/heavy mirroring.
//!
//! Light chains placed before the first heavy chain of the order are re-anchored
//! on that heavy chain. Running the same pass over the reversed order handles
//! the light chains on the other side.

use log::debug;

use abgraph_core::antibody::{Antibody, Domain, DomainKey, Endpoint, Peptide, SequenceRef};

use crate::graph::{AntibodyGraph, SequenceKey};

/// Mirrors light chains on both sides of the heavy-chain backbone.
///
/// `peptides` is reversed for the second pass and restored afterwards.
pub(crate) fn mirror_light_chains(
    graph: &mut AntibodyGraph,
    antibody: &Antibody,
    peptides: &mut [&Peptide],
    offset: i32,
) {
    align_to_first_heavy(graph, antibody, peptides, offset);
    peptides.reverse();
    align_to_first_heavy(graph, antibody, peptides, offset);
    peptides.reverse();
}

fn align_to_first_heavy(
    graph: &mut AntibodyGraph,
    antibody: &Antibody,
    peptides: &[&Peptide],
    offset: i32,
) {
    let Some(heavy_position) = peptides.iter().position(|peptide| peptide.has_hinge()) else {
        return;
    };
    let heavy = peptides[heavy_position];
    for light in &peptides[..heavy_position] {
        align_light_chain(graph, antibody, light, heavy, offset);
    }
}

fn align_light_chain(
    graph: &mut AntibodyGraph,
    antibody: &Antibody,
    light: &Peptide,
    heavy: &Peptide,
    offset: i32,
) {
    let Some((near, far)) = heavy_connection(antibody, light, heavy) else {
        debug!(light = light.name(), heavy = heavy.name(); "No connection to heavy chain");
        return;
    };
    let (Some(light_domain), Some(heavy_domain)) =
        (antibody.resolve_domain(near), antibody.resolve_domain(far))
    else {
        debug!(light = light.name(); "Heavy-chain connection does not resolve to domains");
        return;
    };

    let anchor = heavy_anchor(heavy, heavy_domain.index());
    let Some(anchor_layer) = graph.layer(SequenceKey::Domain(DomainKey::new(heavy.id(), anchor)))
    else {
        debug!(light = light.name(), anchor; "Heavy-chain anchor has no layer");
        return;
    };
    let aligned = light_aligned(light, light_domain.index()) as i32;

    for domain in light.domains() {
        if let Some(index) = graph.index_of(SequenceKey::Domain(domain.key())) {
            let layer = anchor_layer + offset + (domain.index() as i32 - aligned);
            graph.set_layer_at(index, layer);
        }
    }
    debug!(
        light = light.name(),
        heavy = heavy.name(),
        anchor,
        anchor_layer,
        aligned;
        "Mirrored light chain"
    );
}

/// First inter-peptide connection of `light` whose other end is on `heavy`,
/// as `(light end, heavy end)`.
fn heavy_connection<'a>(
    antibody: &'a Antibody,
    light: &Peptide,
    heavy: &Peptide,
) -> Option<(&'a Endpoint, &'a Endpoint)> {
    let light_ref = SequenceRef::Peptide(light.id());
    antibody
        .connections_of(light_ref)
        .filter(|(_, connection)| !connection.is_self_connection())
        .find_map(|(_, connection)| {
            let near = connection.near(light_ref)?;
            let far = connection.opposite(light_ref)?;
            (far.sequence().peptide() == Some(heavy.id())).then_some((near, far))
        })
}

/// Nearest hinge or up-hinge domain, scanning towards the N-terminus first.
///
/// Falls back to the connection domain itself.
fn heavy_anchor(heavy: &Peptide, from: usize) -> usize {
    let hinge_like = |domain: &&Domain| domain.domain_type().is_hinge_like();
    let domains = heavy.domains();
    domains
        .iter()
        .take(from + 1)
        .rev()
        .find(hinge_like)
        .or_else(|| domains.iter().skip(from).find(hinge_like))
        .map_or(from, Domain::index)
}

/// Nearest domain at or before `from` that is not a hinge or up-hinge.
fn light_aligned(light: &Peptide, from: usize) -> usize {
    light
        .domains()
        .iter()
        .take(from + 1)
        .rev()
        .find(|domain| !domain.domain_type().is_hinge_like())
        .map_or(from, Domain::index)
}

#[cfg(test)]
mod tests {
    use abgraph_core::{
        antibody::{Connection, DomainType},
        identifier::Id,
    };

    use super::*;
    use crate::{builder::GraphBuilder, layering::hinge};

    fn heavy() -> Peptide {
        Peptide::new("MH")
            .with_domain("VH", DomainType::Variable, 10)
            .with_domain("CH1", DomainType::Constant, 10)
            .with_domain("Hinge", DomainType::Hinge, 10)
            .with_domain("CH2", DomainType::Constant, 10)
            .with_domain("CH3", DomainType::Constant, 10)
    }

    fn light() -> Peptide {
        Peptide::new("ML")
            .with_domain("VL", DomainType::Variable, 10)
            .with_domain("CL", DomainType::Constant, 10)
    }

    fn antibody() -> Antibody {
        Antibody::new("mirror")
            .with_peptide(heavy())
            .with_peptide(light())
            .with_connection(Connection::general(
                Endpoint::peptide(Id::new("MH"), 5),
                Endpoint::peptide(Id::new("ML"), 5),
                "R3",
                "R3",
            ))
    }

    fn layers(graph: &AntibodyGraph, peptide: &str, count: usize) -> Vec<Option<i32>> {
        (0..count)
            .map(|i| graph.layer(SequenceKey::Domain(DomainKey::new(Id::new(peptide), i))))
            .collect()
    }

    fn run(offset: i32) -> (AntibodyGraph, Vec<String>) {
        let antibody = antibody();
        let mut peptides: Vec<&Peptide> = vec![&antibody.peptides()[1], &antibody.peptides()[0]];
        let mut graph = GraphBuilder::default().build(&antibody, &peptides);
        hinge::align_hinges(&mut graph, &peptides);
        mirror_light_chains(&mut graph, &antibody, &mut peptides, offset);
        let order = peptides.iter().map(|p| p.name().to_string()).collect();
        (graph, order)
    }

    #[test]
    fn test_light_aligned_to_hinge_anchor() {
        let (graph, _) = run(0);

        assert_eq!(
            layers(&graph, "MH", 5),
            vec![Some(-2), Some(-1), Some(0), Some(1), Some(2)]
        );
        assert_eq!(layers(&graph, "ML", 2), vec![Some(0), Some(1)]);
    }

    #[test]
    fn test_light_chain_offset() {
        let (graph, _) = run(-1);

        assert_eq!(layers(&graph, "ML", 2), vec![Some(-1), Some(0)]);
    }

    #[test]
    fn test_order_is_restored() {
        let (_, order) = run(0);

        assert_eq!(order, vec!["ML", "MH"]);
    }

    #[test]
    fn test_anchor_scan() {
        let heavy = heavy();
        assert_eq!(heavy_anchor(&heavy, 0), 2);
        assert_eq!(heavy_anchor(&heavy, 4), 2);

        let no_hinge = light();
        assert_eq!(heavy_anchor(&no_hinge, 1), 1);

        let hinge_first = Peptide::new("MX")
            .with_domain("Hinge", DomainType::Hinge, 5)
            .with_domain("CH2", DomainType::Constant, 5);
        assert_eq!(light_aligned(&hinge_first, 0), 0);
        assert_eq!(light_aligned(&hinge_first, 1), 1);
    }
}
