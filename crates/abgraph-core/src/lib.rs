//! abgraph Core Types and Definitions
//!
//! This crate provides the foundational types shared by the abgraph layering
//! engine and its command-line surface. It includes:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Antibody model**: Peptides, domains, satellites and connections ([`antibody`] module)
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Errors**: Structural model errors ([`error::ModelError`])

pub mod antibody;
pub mod error;
pub mod geometry;
pub mod identifier;
