//! Error adapter for converting CLI errors to miette diagnostics.
//!
//! Bridges the library's plain error types and miette's graphical reports.
//! A description error carrying several problems is rendered as one report per
//! problem, each with a snippet of the description around its span.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use abgraph::AbGraphError;

use crate::{description::Problem, error::CliError};

/// Adapter for a single description [`Problem`].
pub struct ProblemAdapter<'a> {
    problem: &'a Problem,
    /// Description text for displaying snippets
    src: &'a str,
}

impl<'a> ProblemAdapter<'a> {
    pub fn new(problem: &'a Problem, src: &'a str) -> Self {
        Self { problem, src }
    }
}

impl fmt::Debug for ProblemAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProblemAdapter")
            .field("problem", &self.problem)
            .finish()
    }
}

impl fmt::Display for ProblemAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.problem.message())
    }
}

impl std::error::Error for ProblemAdapter<'_> {}

impl MietteDiagnostic for ProblemAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("abgraph::description"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.problem
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.problem
            .span()
            .map(|_| &self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = SourceSpan::from(self.problem.span()?);
        let label = LabeledSpan::new_primary_with_span(Some("here".to_string()), span);
        Some(Box::new(std::iter::once(label)))
    }
}

/// Adapter for [`AbGraphError`], which carries no source location.
pub struct ErrorAdapter<'a>(pub &'a AbGraphError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            AbGraphError::Model(_) => "abgraph::model",
            AbGraphError::Io(_) => "abgraph::io",
            AbGraphError::Config(_) => "abgraph::config",
            AbGraphError::Layout(_) => "abgraph::layout",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            AbGraphError::Model(_) => {
                "sequence names must be unique and domain ranges must be increasing and disjoint"
            }
            AbGraphError::Config(_) => "check the [layering] and [layout] tables of the config file",
            AbGraphError::Io(_) | AbGraphError::Layout(_) => return None,
        };
        Some(Box::new(help))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A description problem with source location information.
    Problem(ProblemAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Problem(p) => fmt::Display::fmt(p, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Problem(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Problem(p) => p.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Problem(p) => p.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Problem(p) => p.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Problem(p) => p.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`CliError`] into a list of reportable errors.
///
/// A description error yields one [`Reportable`] per problem; every other
/// error yields a single one.
pub fn to_reportables(err: &CliError) -> Vec<Reportable<'_>> {
    match err {
        CliError::Description { err, src } => err
            .problems()
            .iter()
            .map(|problem| Reportable::Problem(ProblemAdapter::new(problem, src)))
            .collect(),
        CliError::App(err) => vec![Reportable::Error(ErrorAdapter(err))],
    }
}
