//! # Error Types
//!
//! Errors raised while parsing the leaf vocabulary of the validator.
//! Both carry the offending input verbatim so the message is actionable
//! without re-running in debug mode.

use thiserror::Error;

/// An element identifier that does not follow the
/// `[DocumentRef-]<document>:<SPDXID>` grammar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// No colon separates the document part from the SPDX id.
    #[error("malformed element id '{0}': expected '<document>:<SPDXID>'")]
    MissingSeparator(String),

    /// Nothing precedes the colon.
    #[error("malformed element id '{0}': empty document part")]
    EmptyDocument(String),

    /// Nothing follows the colon.
    #[error("malformed element id '{0}': empty SPDX id")]
    EmptyElement(String),
}

/// The requested SPDX version is not one the validator ships a schema for.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported SPDX version ({0})")]
pub struct UnsupportedSpdxVersion(pub String);
