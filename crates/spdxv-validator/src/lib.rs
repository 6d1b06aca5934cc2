//! # spdxv-validator
//!
//! Cross-document validation of SPDX 2.2 manifests.
//!
//! A manifest declares what it dynamically links against with
//! `DYNAMIC_LINK` relationships, and pins each linked document by checksum
//! in `externalDocumentRefs`. With recursion enabled the validator follows
//! every link: it finds the linked manifest on the search path, checks its
//! digest against the pin, validates it the same way, and confirms it
//! actually defines the linked element.
//!
//! ```no_run
//! use std::path::Path;
//! use spdxv_validator::{SpdxValidator, ValidatorConfig};
//!
//! let validator = SpdxValidator::new(&ValidatorConfig::default())?;
//! let manifest = validator.validate_file(Path::new("app-1.0.json"), true)?;
//! println!("{} ok", manifest.name());
//! # Ok::<(), spdxv_validator::ValidationError>(())
//! ```

pub mod config;
pub mod error;
pub mod manifest;
pub mod resolver;
pub mod session;
pub mod validator;

pub use config::{ConfigError, ValidatorConfig, ENV_SCHEMA_FILE, ENV_SPDX_DIRS};
pub use error::ValidationError;
pub use manifest::Manifest;
pub use resolver::{ManifestResolver, MANIFEST_SUFFIXES};
pub use session::ValidationSession;
pub use validator::SpdxValidator;

pub use spdxv_schema::ViolationPolicy;
