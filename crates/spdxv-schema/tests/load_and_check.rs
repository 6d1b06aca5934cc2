//! Integration test: load SPDX documents from disk in both encodings, check
//! them against the built-in SPDX 2.2 schema, and decode the typed model.

use std::path::{Path, PathBuf};

use spdxv_core::{RelationshipType, SpdxVersion};
use spdxv_schema::{decode_document, load_document, SchemaChecker, SchemaError};

const APP_YAML: &str = r#"
spdxVersion: SPDX-2.2
dataLicense: CC0-1.0
SPDXID: SPDXRef-DOCUMENT
name: app-1.0
documentNamespace: https://example.org/app-1.0
creationInfo:
  created: "2021-05-01T10:00:00Z"
  creators:
    - "Tool: spdx-validator-tests"
packages:
  - SPDXID: SPDXRef-App
    name: app
    versionInfo: "1.0"
    downloadLocation: NOASSERTION
    licenseConcluded: GPL-3.0-or-later
    licenseDeclared: GPL-3.0-or-later
    copyrightText: NOASSERTION
externalDocumentRefs:
  - externalDocumentId: DocumentRef-libfoo-1.2
    spdxDocument: https://example.org/libfoo-1.2
    checksum:
      algorithm: SHA1
      checksumValue: d6a770ba38583ed4bb4525bd96e50461655d2759
relationships:
  - spdxElementId: SPDXRef-DOCUMENT
    relationshipType: DESCRIBES
    relatedSpdxElement: SPDXRef-App
  - spdxElementId: DocumentRef-libfoo-1.2:SPDXRef-Package
    relationshipType: DYNAMIC_LINK
    relatedSpdxElement: SPDXRef-App
"#;

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let p = dir.join(name);
    std::fs::write(&p, content).unwrap();
    p
}

#[test]
fn yaml_document_loads_checks_and_decodes() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "app-1.0.yaml", APP_YAML);

    let raw = load_document(&path).unwrap();
    SchemaChecker::builtin(SpdxVersion::V2_2)
        .unwrap()
        .check(&raw)
        .unwrap();

    let doc = decode_document(&raw, &path).unwrap();
    assert_eq!(doc.name, "app-1.0");
    assert_eq!(doc.packages[0].spdx_id, "SPDXRef-App");
    let rels = doc.relationships.as_ref().unwrap();
    assert_eq!(rels[0].relationship_type, RelationshipType::Describes);
    assert_eq!(rels[1].relationship_type, RelationshipType::DynamicLink);
    let refs = doc.external_document_refs.as_ref().unwrap();
    assert_eq!(refs[0].local_id().as_str(), "libfoo-1.2");
}

#[test]
fn json_rendering_of_same_document_is_equivalent() {
    let dir = tempfile::tempdir().unwrap();
    let yaml_path = write(dir.path(), "app-1.0.yml", APP_YAML);
    let yaml_value = load_document(&yaml_path).unwrap();

    let json_path = write(
        dir.path(),
        "app-1.0.json",
        &serde_json::to_string_pretty(&yaml_value).unwrap(),
    );
    assert_eq!(load_document(&json_path).unwrap(), yaml_value);
}

#[test]
fn schema_violation_is_reported_after_successful_load() {
    let dir = tempfile::tempdir().unwrap();
    let broken = APP_YAML.replace("    downloadLocation: NOASSERTION\n", "");
    let path = write(dir.path(), "app-1.0.yaml", &broken);

    let raw = load_document(&path).unwrap();
    let err = SchemaChecker::builtin(SpdxVersion::V2_2)
        .unwrap()
        .check(&raw)
        .unwrap_err();
    match err {
        SchemaError::ValidationFailed { violations } => {
            assert_eq!(violations.len(), 1);
            let v = &violations.violations()[0];
            assert_eq!(v.instance_path, "/packages/0");
            assert!(v.message.contains("downloadLocation"), "{}", v.message);
        }
        other => panic!("expected ValidationFailed, got {other}"),
    }
}

#[test]
fn custom_schema_file_replaces_builtin() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write(
        dir.path(),
        "strict.json",
        r#"{"type": "object", "required": ["name", "comment"]}"#,
    );
    let doc = write(dir.path(), "app-1.0.yaml", APP_YAML);

    let checker = SchemaChecker::from_file(&schema).unwrap();
    let err = checker.check(&load_document(&doc).unwrap()).unwrap_err();
    assert!(err.to_string().contains("comment"), "{err}");
}
