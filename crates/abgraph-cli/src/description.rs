//! Antibody descriptions read by the CLI.
//!
//! A description is a read-only TOML file listing peptides with their domains,
//! chem and RNA elements and the connections between them. It is turned into
//! an [`Antibody`]; nothing is ever written back.
//!
//! ```toml
//! name = "IgG1"
//!
//! [[peptides]]
//! name = "HC"
//! domains = [
//!     { name = "VH", type = "variable", length = 118 },
//!     { name = "Hinge", type = "hinge", start = 216, end = 230 },
//! ]
//!
//! [[chem]]
//! name = "MMAE"
//!
//! [[connections]]
//! kind = "general"
//! source = { chem = "MMAE" }
//! target = { peptide = "HC", domain = "Hinge", position = 5 }
//! ```
//!
//! Every reference problem found is reported, not just the first one.

use std::{fmt, ops::Range};

use serde::Deserialize;
use thiserror::Error;
use toml::Spanned;

use abgraph_core::{
    antibody::{Antibody, ChemElement, Connection, DomainKey, DomainType, Endpoint, Peptide, Rna},
    identifier::Id,
};

/// A single problem in a description, with the span it refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    message: String,
    span: Option<Range<usize>>,
    help: Option<&'static str>,
}

impl Problem {
    fn new(message: impl Into<String>, span: Option<Range<usize>>) -> Self {
        Self {
            message: message.into(),
            span,
            help: None,
        }
    }

    fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Byte range of the offending text in the description source.
    pub fn span(&self) -> Option<Range<usize>> {
        self.span.clone()
    }

    pub fn help(&self) -> Option<&'static str> {
        self.help
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// All problems found while loading a description.
#[derive(Debug, Clone, Error)]
#[error("Invalid antibody description ({} problem(s))", problems.len())]
pub struct DescriptionError {
    problems: Vec<Problem>,
}

impl DescriptionError {
    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }
}

impl From<toml::de::Error> for DescriptionError {
    fn from(err: toml::de::Error) -> Self {
        let problem = Problem::new(err.message(), err.span())
            .with_help("see the description format in the abgraph-cli documentation");
        Self {
            problems: vec![problem],
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AntibodyDescription {
    name: String,
    #[serde(default)]
    peptides: Vec<PeptideDescription>,
    #[serde(default)]
    chem: Vec<ChemDescription>,
    #[serde(default)]
    rna: Vec<RnaDescription>,
    #[serde(default)]
    connections: Vec<ConnectionDescription>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PeptideDescription {
    name: String,
    label: Option<String>,
    uid: Option<String>,
    residues: Option<String>,
    #[serde(default)]
    domains: Vec<DomainDescription>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DomainDescription {
    name: Spanned<String>,
    #[serde(rename = "type")]
    domain_type: DomainType,
    length: Option<usize>,
    start: Option<usize>,
    end: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ChemDescription {
    name: String,
    smiles: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RnaDescription {
    name: String,
    #[serde(default)]
    bases: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ConnectionKindDescription {
    Cystein,
    General,
    Statistical,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConnectionDescription {
    kind: Spanned<ConnectionKindDescription>,
    source: Spanned<EndpointDescription>,
    target: Spanned<EndpointDescription>,
    #[serde(default)]
    source_rest: String,
    #[serde(default)]
    target_rest: String,
    equivalents: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EndpointDescription {
    peptide: Option<Spanned<String>>,
    domain: Option<Spanned<String>>,
    chem: Option<Spanned<String>>,
    rna: Option<Spanned<String>>,
    position: Option<usize>,
}

/// Parses a TOML description into an antibody model.
///
/// # Errors
///
/// Returns a [`DescriptionError`] for TOML syntax and schema errors, domains
/// without a residue range, and endpoints naming unknown sequences.
pub fn parse_description(source: &str) -> Result<Antibody, DescriptionError> {
    let description: AntibodyDescription = toml::from_str(source)?;
    description.into_antibody()
}

impl AntibodyDescription {
    fn into_antibody(self) -> Result<Antibody, DescriptionError> {
        let mut problems = Vec::new();
        let mut antibody = Antibody::new(self.name);

        for peptide in self.peptides {
            antibody.add_peptide(peptide.into_peptide(&mut problems));
        }
        for chem in self.chem {
            let element = ChemElement::new(&chem.name);
            antibody.add_chem(match chem.smiles {
                Some(smiles) => element.with_smiles(smiles),
                None => element,
            });
        }
        for rna in self.rna {
            antibody.add_rna(Rna::new(&rna.name).with_bases(rna.bases));
        }

        for connection in self.connections {
            if let Some(connection) = connection.into_connection(&antibody, &mut problems) {
                antibody.add_connection(connection);
            }
        }

        if problems.is_empty() {
            Ok(antibody)
        } else {
            Err(DescriptionError { problems })
        }
    }
}

impl PeptideDescription {
    fn into_peptide(self, problems: &mut Vec<Problem>) -> Peptide {
        let mut peptide = Peptide::new(&self.name);
        if let Some(label) = self.label {
            peptide = peptide.with_label(label);
        }
        if let Some(uid) = self.uid {
            peptide = peptide.with_uid(uid);
        }
        if let Some(residues) = self.residues {
            peptide = peptide.with_residues(residues);
        }

        for domain in self.domains {
            let name = domain.name.get_ref();
            peptide = match (domain.start, domain.end, domain.length) {
                (Some(start), Some(end), None) => {
                    peptide.with_domain_range(name, domain.domain_type, start, end)
                }
                (None, None, Some(length)) => peptide.with_domain(name, domain.domain_type, length),
                _ => {
                    problems.push(
                        Problem::new(
                            format!("domain `{name}` of `{}` has no residue range", self.name),
                            Some(domain.name.span()),
                        )
                        .with_help("give either `length` or both `start` and `end`"),
                    );
                    peptide
                }
            };
        }
        peptide
    }
}

impl ConnectionDescription {
    fn into_connection(self, antibody: &Antibody, problems: &mut Vec<Problem>) -> Option<Connection> {
        let kind_span = self.kind.span();
        let kind = *self.kind.get_ref();
        let (source, target) = resolve_pair(antibody, &self.source, &self.target, problems)?;

        match kind {
            ConnectionKindDescription::Cystein => Some(Connection::cystein(source, target)),
            ConnectionKindDescription::General => Some(Connection::general(
                source,
                target,
                self.source_rest,
                self.target_rest,
            )),
            ConnectionKindDescription::Statistical => {
                let Some(equivalents) = self.equivalents else {
                    problems.push(
                        Problem::new("statistical connection without `equivalents`", Some(kind_span))
                            .with_help("set `equivalents` to the mean number of attached molecules"),
                    );
                    return None;
                };
                Some(Connection::statistical(
                    source,
                    target,
                    self.source_rest,
                    self.target_rest,
                    equivalents,
                ))
            }
        }
    }
}

/// Resolves both ends, recording problems for each of them.
fn resolve_pair(
    antibody: &Antibody,
    source: &Spanned<EndpointDescription>,
    target: &Spanned<EndpointDescription>,
    problems: &mut Vec<Problem>,
) -> Option<(Endpoint, Endpoint)> {
    let source = resolve_endpoint(antibody, source).map_err(|p| problems.push(p));
    let target = resolve_endpoint(antibody, target).map_err(|p| problems.push(p));
    Some((source.ok()?, target.ok()?))
}

fn resolve_endpoint(
    antibody: &Antibody,
    endpoint: &Spanned<EndpointDescription>,
) -> Result<Endpoint, Problem> {
    let span = endpoint.span();
    let description = endpoint.get_ref();
    let unknown = |kind: &str, name: &Spanned<String>| {
        Problem::new(
            format!("unknown {kind} `{}`", name.get_ref()),
            Some(name.span()),
        )
        .with_help("declare the sequence before referencing it")
    };

    match (
        &description.peptide,
        &description.domain,
        &description.chem,
        &description.rna,
    ) {
        (Some(peptide), domain, None, None) => {
            let Some(model) = antibody.peptide(Id::new(peptide.get_ref())) else {
                return Err(unknown("peptide", peptide));
            };
            match domain {
                Some(domain) => {
                    let Some(index) = model
                        .domains()
                        .iter()
                        .position(|candidate| candidate.name() == domain.get_ref())
                    else {
                        return Err(unknown("domain", domain));
                    };
                    let key = DomainKey::new(model.id(), index);
                    Ok(Endpoint::domain(key, description.position.unwrap_or(1)))
                }
                None => match description.position {
                    Some(position) => Ok(Endpoint::peptide(model.id(), position)),
                    None => Err(Problem::new(
                        format!("peptide endpoint `{}` has no position", peptide.get_ref()),
                        Some(span),
                    )
                    .with_help("peptide endpoints need the residue `position` they attach to")),
                },
            }
        }
        (None, None, Some(chem), None) => match antibody.chem(Id::new(chem.get_ref())) {
            Some(chem) => Ok(Endpoint::chem(chem.id())),
            None => Err(unknown("chem", chem)),
        },
        (None, None, None, Some(rna)) => match antibody.rna(Id::new(rna.get_ref())) {
            Some(rna) => Ok(Endpoint::rna(rna.id())),
            None => Err(unknown("rna", rna)),
        },
        _ => Err(Problem::new("endpoint must name exactly one sequence", Some(span))
            .with_help("use one of `peptide` (optionally with `domain`), `chem` or `rna`")),
    }
}
