//! # spdxv-core: Foundational Types for the SPDX Validator
//!
//! This crate is the leaf of the validator workspace. It defines the
//! vocabulary every other crate speaks:
//!
//! 1. **`SpdxVersion`.** The only SPDX version the validator accepts is 2.2.
//!    Any other version is rejected at construction time, never mid-walk.
//!
//! 2. **`ElementId` grammar.** Cross-document references are strings of the
//!    form `[DocumentRef-]<package>[-<version>]:<SPDXID>`. They are parsed
//!    once into an `ElementId` with explicit failure for malformed input,
//!    instead of ad hoc colon/hyphen splitting at every call site.
//!
//! 3. **Typed document model.** `SpdxDocument` and its parts decode only the
//!    fields the cross-document protocol needs. Everything else stays in the
//!    raw JSON tree carried by the loader.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `spdxv-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod document;
pub mod error;
pub mod identity;
pub mod version;

// Re-export primary types for ergonomic imports.
pub use document::{
    Checksum, ExternalDocumentRef, Package, Relationship, RelationshipType, SpdxDocument,
};
pub use error::{IdentifierError, UnsupportedSpdxVersion};
pub use identity::{
    strip_document_ref, DocumentRefId, ElementId, PackageVersion, DOCUMENT_REF_PREFIX,
};
pub use version::SpdxVersion;
