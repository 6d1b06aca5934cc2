//! # Validation Session
//!
//! State for one top-level validation request. A session remembers which
//! cross-document element ids are fully checked so that each is verified
//! at most once, and keeps the first manifest it read, whether or not
//! that manifest then passes its schema check.
//!
//! ## Per-link protocol
//!
//! For every `DYNAMIC_LINK` relationship of a manifest, in declaration
//! order:
//!
//! 1. Parse the element id (`DocumentRef-` stripped). Skip it if it is
//!    already checked or currently being recursed into.
//! 2. The related element must be a package of the current manifest.
//! 3. Resolve the element id to exactly one file on the search path.
//! 4. Every `externalDocumentRefs` entry for the element's document must
//!    carry the resolved file's digest.
//! 5. Validate the resolved file recursively.
//! 6. The resolved manifest must define the element id as one of its full
//!    package references.
//! 7. Record the element id as checked.
//!
//! The first failure anywhere in the tree aborts the whole walk.

use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use spdxv_core::{ElementId, Relationship, SpdxDocument};

use crate::error::ValidationError;
use crate::manifest::Manifest;
use crate::validator::SpdxValidator;

/// One validation walk over a manifest and everything it links to.
///
/// Sessions are cheap; create one per request with
/// [`SpdxValidator::session`]. The checked set is never reset, so calling
/// [`validate_file`](Self::validate_file) again on the same session does no
/// repeated work for elements already verified.
#[derive(Debug)]
pub struct ValidationSession<'v> {
    validator: &'v SpdxValidator,
    checked_elements: BTreeSet<ElementId>,
    in_flight: HashSet<ElementId>,
    primary: Option<Manifest>,
}

impl<'v> ValidationSession<'v> {
    pub(crate) fn new(validator: &'v SpdxValidator) -> Self {
        Self {
            validator,
            checked_elements: BTreeSet::new(),
            in_flight: HashSet::new(),
            primary: None,
        }
    }

    /// Load and schema-check `path`, then, when `recursive` is set, verify
    /// every dynamic link it declares.
    ///
    /// # Errors
    ///
    /// The first [`ValidationError`] raised anywhere in the walk.
    pub fn validate_file(
        &mut self,
        path: &Path,
        recursive: bool,
    ) -> Result<Manifest, ValidationError> {
        let manifest = self.validator.read_manifest(path)?;
        if self.primary.is_none() {
            self.primary = Some(manifest.clone());
        }
        self.validator.check_manifest(&manifest)?;

        if !recursive {
            return Ok(manifest);
        }
        let document = manifest.document()?;
        if document.relationships.is_none() {
            return Ok(manifest);
        }

        for relationship in document.dynamic_links() {
            self.check_link(&manifest, document, relationship)?;
        }
        Ok(manifest)
    }

    /// The first manifest loaded in this session, if any. It is kept as
    /// soon as it parses, even when it then fails its schema check.
    pub fn data(&self) -> Option<&Manifest> {
        self.primary.as_ref()
    }

    pub fn into_data(self) -> Option<Manifest> {
        self.primary
    }

    /// Element ids verified so far, in sorted order.
    pub fn checked_elements(&self) -> &BTreeSet<ElementId> {
        &self.checked_elements
    }

    fn check_link(
        &mut self,
        manifest: &Manifest,
        document: &SpdxDocument,
        relationship: &Relationship,
    ) -> Result<(), ValidationError> {
        let element = ElementId::parse(&relationship.spdx_element_id)?;
        if self.checked_elements.contains(&element) {
            tracing::debug!(element = %element, "already checked, skipping");
            return Ok(());
        }
        if self.in_flight.contains(&element) {
            tracing::debug!(element = %element, "cycle detected, skipping");
            return Ok(());
        }

        let related = &relationship.related_spdx_element;
        if !document.has_package(related) {
            return Err(ValidationError::DanglingRelatedElement {
                element: related.clone(),
                path: manifest.path().to_path_buf(),
            });
        }

        let target = self.validator.resolver().resolve(&element)?;
        self.verify_checksums(manifest, document, &element, &target)?;

        tracing::debug!(element = %element, file = %target.display(), "validating linked manifest");
        self.in_flight.insert(element.clone());
        let inner = self.validate_file(&target, true);
        self.in_flight.remove(&element);
        let inner = inner?;

        if !inner.document()?.defines_reference(element.as_str()) {
            return Err(ValidationError::UnresolvedBackReference {
                element_id: element.to_string(),
                file: target,
            });
        }

        tracing::debug!(element = %element, "element checked");
        self.checked_elements.insert(element);
        Ok(())
    }

    fn verify_checksums(
        &self,
        manifest: &Manifest,
        document: &SpdxDocument,
        element: &ElementId,
        target: &Path,
    ) -> Result<(), ValidationError> {
        let doc_ref = element.document_ref();
        let missing = || ValidationError::MissingExternalDocRef {
            doc_ref: doc_ref.to_string(),
            path: manifest.path().to_path_buf(),
        };

        let refs: Vec<_> = document
            .external_refs_for(&doc_ref)
            .ok_or_else(missing)?
            .collect();
        if refs.is_empty() {
            return Err(missing());
        }

        for external in refs {
            let expected = &external.checksum.checksum_value;
            let actual = self
                .validator
                .digester()
                .digest(target, &external.checksum.algorithm)?;
            if &actual != expected {
                return Err(ValidationError::ChecksumMismatch {
                    file: target.to_path_buf(),
                    expected: expected.clone(),
                    actual,
                    referenced_from: manifest.path().to_path_buf(),
                });
            }
            tracing::debug!(
                file = %target.display(),
                algorithm = %external.checksum.algorithm,
                "checksum verified"
            );
        }
        Ok(())
    }
}
