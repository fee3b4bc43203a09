//! # yamled-core — Document Model for yamled
//!
//! Everything in this crate is a pure function of its inputs: no file
//! system, no clocks, no global state. The store and the HTTP layer build
//! on top of it.
//!
//! ## Pipeline
//!
//! ```text
//! text ──parse_document──▶ Value ──render_preview──▶ indented JSON
//!                            │
//!                            └──validate(profile)──▶ Vec<String>
//! ```
//!
//! - [`document`] — YAML text to a generic document tree (`serde_json::Value`
//!   with insertion-ordered mappings), syntax errors with 1-based positions,
//!   and the deterministic JSON preview.
//! - [`validation`] — the structural validator for the two document kinds
//!   recognised by marker key ([`DocumentKind::PathwayConfig`] and
//!   [`DocumentKind::Ruleset`]) and the per-request [`ValidationReport`].
//!
//! ## Crate Policy
//!
//! - No dependencies on other `yamled-*` crates (leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod document;
pub mod error;
pub mod validation;

pub use document::{
    check_syntax, parse_and_preview, parse_document, render_preview, to_pretty_json,
};
pub use error::{DocumentError, Location};
pub use validation::{
    validate, validate_content, DocumentKind, ValidationProfile, ValidationReport,
};
