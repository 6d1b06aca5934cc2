//! # Element Identifiers
//!
//! Newtypes for the identifiers that tie SPDX documents together.
//!
//! ## Grammar
//!
//! ```text
//! element-id   = [ "DocumentRef-" ] document ":" spdx-id
//! document     = package [ "-" version ]
//! external-ref = [ "DocumentRef-" ] document [ ":" anything ]
//! ```
//!
//! The `document` part names the manifest file to locate; the `spdx-id`
//! part names a package inside it. The full reference of a package owned
//! by a manifest is `<manifest name>:<SPDXID>`, so a relationship's element
//! id is satisfied when it equals one of the referenced manifest's full
//! references.
//!
//! ## Package/version split
//!
//! `document` is split at the first hyphen that is immediately followed by
//! an ASCII digit, so `some-pkg-name-1.2` yields `some-pkg-name` / `1.2` and
//! `libfoo-1.2-rc1` yields `libfoo` / `1.2-rc1`. When no hyphen precedes a
//! digit the split falls back to the first hyphen, and a document without
//! any hyphen has no version at all.

use std::fmt;
use std::str::FromStr;

use crate::error::IdentifierError;

/// Marker that may prefix an element id or external document id.
pub const DOCUMENT_REF_PREFIX: &str = "DocumentRef-";

/// Strip a single leading `DocumentRef-` marker, if present.
pub fn strip_document_ref(s: &str) -> &str {
    s.strip_prefix(DOCUMENT_REF_PREFIX).unwrap_or(s)
}

/// A parsed cross-document element identifier, `DocumentRef-` stripped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId {
    raw: String,
    /// Byte offset of the separating colon within `raw`.
    colon: usize,
}

impl ElementId {
    /// Parse an `spdxElementId` value.
    ///
    /// # Errors
    ///
    /// Returns an [`IdentifierError`] when the colon is missing or either
    /// side of it is empty.
    pub fn parse(input: &str) -> Result<Self, IdentifierError> {
        let stripped = strip_document_ref(input);
        let colon = stripped
            .find(':')
            .ok_or_else(|| IdentifierError::MissingSeparator(input.to_string()))?;
        if colon == 0 {
            return Err(IdentifierError::EmptyDocument(input.to_string()));
        }
        if colon + 1 == stripped.len() {
            return Err(IdentifierError::EmptyElement(input.to_string()));
        }
        Ok(Self {
            raw: stripped.to_string(),
            colon,
        })
    }

    /// The full identifier without the `DocumentRef-` marker.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The document part, e.g. `libfoo-1.2`.
    pub fn document(&self) -> &str {
        &self.raw[..self.colon]
    }

    /// The SPDX id part, e.g. `SPDXRef-Package`.
    pub fn spdx_id(&self) -> &str {
        &self.raw[self.colon + 1..]
    }

    /// The document part as a reference id, for matching against
    /// `externalDocumentRefs`.
    pub fn document_ref(&self) -> DocumentRefId {
        DocumentRefId(self.document().to_string())
    }

    /// Split the document part into package name and version.
    pub fn package_version(&self) -> PackageVersion {
        PackageVersion::parse(self.document())
    }
}

impl FromStr for ElementId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// The local id an external document reference is known by, e.g.
/// `libfoo-1.2` for `DocumentRef-libfoo-1.2`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentRefId(String);

impl DocumentRefId {
    /// Derive the local id from an `externalDocumentId` value: the part
    /// before the first colon with any `DocumentRef-` marker stripped.
    pub fn from_external_document_id(external_document_id: &str) -> Self {
        let head = external_document_id
            .split(':')
            .next()
            .unwrap_or(external_document_id);
        Self(strip_document_ref(head).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentRefId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Package name and optional version derived from a document part.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageVersion {
    /// Package name; also the subdirectory searched for its manifest.
    pub name: String,
    /// Version, when the document part carries one.
    pub version: Option<String>,
}

impl PackageVersion {
    /// Split `libfoo-1.2` style strings. See the module docs for the rule.
    pub fn parse(document: &str) -> Self {
        let bytes = document.as_bytes();
        let versioned = bytes
            .windows(2)
            .position(|w| w[0] == b'-' && w[1].is_ascii_digit())
            .or_else(|| document.find('-'));

        match versioned {
            Some(idx) => Self {
                name: document[..idx].to_string(),
                version: Some(document[idx + 1..].to_string()),
            },
            None => Self {
                name: document.to_string(),
                version: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_strips_document_ref_marker() {
        let id = ElementId::parse("DocumentRef-libfoo-1.2:SPDXRef-Package").unwrap();
        assert_eq!(id.as_str(), "libfoo-1.2:SPDXRef-Package");
        assert_eq!(id.document(), "libfoo-1.2");
        assert_eq!(id.spdx_id(), "SPDXRef-Package");
    }

    #[test]
    fn parse_without_marker() {
        let id = ElementId::parse("libfoo:SPDXID-Package").unwrap();
        assert_eq!(id.document(), "libfoo");
        assert_eq!(id.spdx_id(), "SPDXID-Package");
    }

    #[test]
    fn parse_splits_on_first_colon_only() {
        let id = ElementId::parse("libfoo-1.2:SPDXRef-a:b").unwrap();
        assert_eq!(id.document(), "libfoo-1.2");
        assert_eq!(id.spdx_id(), "SPDXRef-a:b");
    }

    #[test]
    fn parse_only_strips_leading_marker() {
        let id = ElementId::parse("libfoo-1.2:DocumentRef-x").unwrap();
        assert_eq!(id.spdx_id(), "DocumentRef-x");
    }

    #[test]
    fn parse_rejects_missing_colon() {
        assert_eq!(
            ElementId::parse("DocumentRef-libfoo-1.2"),
            Err(IdentifierError::MissingSeparator(
                "DocumentRef-libfoo-1.2".to_string()
            ))
        );
    }

    #[test]
    fn parse_rejects_empty_sides() {
        assert!(matches!(
            ElementId::parse(":SPDXRef-Package"),
            Err(IdentifierError::EmptyDocument(_))
        ));
        assert!(matches!(
            ElementId::parse("DocumentRef-:SPDXRef-Package"),
            Err(IdentifierError::EmptyDocument(_))
        ));
        assert!(matches!(
            ElementId::parse("libfoo-1.2:"),
            Err(IdentifierError::EmptyElement(_))
        ));
    }

    #[test]
    fn package_version_simple() {
        let pv = PackageVersion::parse("libfoo-1.2");
        assert_eq!(pv.name, "libfoo");
        assert_eq!(pv.version.as_deref(), Some("1.2"));
    }

    #[test]
    fn package_version_hyphenated_name() {
        let pv = PackageVersion::parse("some-pkg-name-1.2");
        assert_eq!(pv.name, "some-pkg-name");
        assert_eq!(pv.version.as_deref(), Some("1.2"));
    }

    #[test]
    fn package_version_hyphenated_version() {
        let pv = PackageVersion::parse("libfoo-1.2-rc1");
        assert_eq!(pv.name, "libfoo");
        assert_eq!(pv.version.as_deref(), Some("1.2-rc1"));
    }

    #[test]
    fn package_version_non_numeric_version_falls_back_to_first_hyphen() {
        let pv = PackageVersion::parse("libfoo-latest");
        assert_eq!(pv.name, "libfoo");
        assert_eq!(pv.version.as_deref(), Some("latest"));
    }

    #[test]
    fn package_version_without_hyphen() {
        let pv = PackageVersion::parse("libfoo");
        assert_eq!(pv.name, "libfoo");
        assert_eq!(pv.version, None);
    }

    #[test]
    fn document_ref_from_external_id() {
        assert_eq!(
            DocumentRefId::from_external_document_id("DocumentRef-libfoo-1.2").as_str(),
            "libfoo-1.2"
        );
        assert_eq!(
            DocumentRefId::from_external_document_id("DocumentRef-libfoo-1.2:extra").as_str(),
            "libfoo-1.2"
        );
        assert_eq!(
            DocumentRefId::from_external_document_id("libbar-2.0").as_str(),
            "libbar-2.0"
        );
    }

    #[test]
    fn element_document_ref_matches_external_id() {
        let id = ElementId::parse("DocumentRef-libfoo-1.2:SPDXRef-Package").unwrap();
        assert_eq!(
            id.document_ref(),
            DocumentRefId::from_external_document_id("DocumentRef-libfoo-1.2")
        );
    }

    #[test]
    fn display_renders_stripped_form() {
        let id: ElementId = "DocumentRef-a-1:SPDXRef-X".parse().unwrap();
        assert_eq!(id.to_string(), "a-1:SPDXRef-X");
    }
}
