//! # spdxv-schema: Manifest Loading & Schema Checking
//!
//! The two leaf collaborators of the cross-document validator.
//!
//! ## Manifest Loader (`load`)
//!
//! [`load_document`] reads a file and parses it by extension: `.json` as
//! JSON, `.yaml`/`.yml` as YAML (converted to the JSON value model), any
//! other extension is rejected before the file is opened. [`decode_document`]
//! turns a schema-checked tree into the typed [`spdxv_core::SpdxDocument`].
//!
//! ## Schema Checker (`validate`)
//!
//! [`SchemaChecker`] compiles a JSON Schema once (the built-in SPDX 2.2
//! schema, or one loaded from a file) and checks documents against it. The
//! [`ViolationPolicy`] selects between reporting every violation and
//! stopping at the first.
//!
//! ## Crate Policy
//!
//! - Depends only on `spdxv-core` internally.
//! - Schema checking is a trust boundary: nothing downstream reads a
//!   document that has not passed it.
//! - Parse failures surface the parser's message; they are never swallowed.

pub mod error;
pub mod load;
pub mod validate;

pub use error::SchemaError;
pub use load::{decode_document, load_document, DocumentFormat};
pub use validate::{
    SchemaChecker, SchemaSource, ValidationViolations, Violation, ViolationPolicy,
    BUILTIN_SPDX_2_2_SCHEMA,
};
