//! # SPDX Document Model
//!
//! Typed view of the parts of an SPDX 2.2 document that cross-document
//! validation reads: the document name, its packages, its relationships,
//! and its external document references.
//!
//! Decoding is lenient about fields it does not model (they are ignored)
//! and strict about the ones it does. Documents are schema-checked before
//! they are decoded, so a decode failure means the schema in use is looser
//! than this model.

use serde::{Deserialize, Serialize};

use crate::identity::DocumentRefId;

/// One SPDX document (a manifest), root or externally referenced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpdxDocument {
    /// Document name; owner prefix of every package's full reference.
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spdx_version: Option<String>,

    #[serde(rename = "SPDXID", default, skip_serializing_if = "Option::is_none")]
    pub spdx_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_namespace: Option<String>,

    /// Packages in declaration order.
    #[serde(default)]
    pub packages: Vec<Package>,

    /// Relationships in declaration order. `None` when the field is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<Vec<Relationship>>,

    /// External document references. `None` when the field is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_document_refs: Option<Vec<ExternalDocumentRef>>,
}

impl SpdxDocument {
    /// Returns true if a package with this exact `SPDXID` exists.
    pub fn has_package(&self, spdx_id: &str) -> bool {
        self.packages.iter().any(|p| p.spdx_id == spdx_id)
    }

    /// Full references (`<name>:<SPDXID>`) of every package in the document.
    pub fn full_references(&self) -> impl Iterator<Item = String> + '_ {
        self.packages.iter().map(|p| p.full_reference(&self.name))
    }

    /// Returns true if any package's full reference equals `reference`.
    pub fn defines_reference(&self, reference: &str) -> bool {
        self.full_references().any(|r| r == reference)
    }

    /// Relationships of type `DYNAMIC_LINK`, in declaration order.
    pub fn dynamic_links(&self) -> impl Iterator<Item = &Relationship> {
        self.relationships
            .iter()
            .flatten()
            .filter(|r| r.relationship_type == RelationshipType::DynamicLink)
    }

    /// External document references whose local id equals `id`.
    ///
    /// Returns `None` when the document has no `externalDocumentRefs` field,
    /// which callers treat the same as an empty match.
    pub fn external_refs_for<'a>(
        &'a self,
        id: &'a DocumentRefId,
    ) -> Option<impl Iterator<Item = &'a ExternalDocumentRef> + 'a> {
        self.external_document_refs
            .as_ref()
            .map(move |refs| refs.iter().filter(move |r| &r.local_id() == id))
    }
}

/// A package inside a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    /// Identifier, unique within the owning document.
    #[serde(rename = "SPDXID")]
    pub spdx_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_info: Option<String>,
}

impl Package {
    /// The externally visible reference `<owner>:<SPDXID>`.
    pub fn full_reference(&self, owner: &str) -> String {
        format!("{owner}:{}", self.spdx_id)
    }
}

/// A declared relationship between two elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub relationship_type: RelationshipType,
    /// Possibly `DocumentRef-` prefixed element id.
    pub spdx_element_id: String,
    /// SPDXID expected among the current document's packages.
    pub related_spdx_element: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// SPDX 2.2 relationship types. Only [`RelationshipType::DynamicLink`]
/// drives cross-document validation.
///
/// Names outside SPDX 2.2 decode as [`RelationshipType::Unrecognized`], so
/// a document accepted by a looser or newer schema still decodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationshipType {
    Describes,
    DescribedBy,
    Contains,
    ContainedBy,
    DependsOn,
    DependencyOf,
    DependencyManifestOf,
    BuildDependencyOf,
    DevDependencyOf,
    OptionalDependencyOf,
    ProvidedDependencyOf,
    TestDependencyOf,
    RuntimeDependencyOf,
    ExampleOf,
    Generates,
    GeneratedFrom,
    AncestorOf,
    DescendantOf,
    VariantOf,
    DistributionArtifact,
    PatchFor,
    PatchApplied,
    CopyOf,
    FileAdded,
    FileDeleted,
    FileModified,
    ExpandedFromArchive,
    DynamicLink,
    StaticLink,
    DataFileOf,
    TestCaseOf,
    BuildToolOf,
    DevToolOf,
    TestOf,
    TestToolOf,
    DocumentationOf,
    OptionalComponentOf,
    MetafileOf,
    PackageOf,
    Amends,
    PrerequisiteFor,
    HasPrerequisite,
    Other,
    /// Any type name this model does not know. Inert.
    #[serde(other)]
    Unrecognized,
}

/// Binding of a local document id to an external document and the
/// checksum its content must have.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalDocumentRef {
    pub external_document_id: String,
    pub checksum: Checksum,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spdx_document: Option<String>,
}

impl ExternalDocumentRef {
    /// Local id with the colon suffix and `DocumentRef-` marker removed.
    pub fn local_id(&self) -> DocumentRefId {
        DocumentRefId::from_external_document_id(&self.external_document_id)
    }
}

/// Declared checksum of a referenced document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checksum {
    /// Algorithm name as written in the document, e.g. `SHA1`.
    pub algorithm: String,
    /// Hex digest.
    pub checksum_value: String,
}
