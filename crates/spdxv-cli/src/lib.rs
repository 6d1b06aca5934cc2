//! # spdxv-cli
//!
//! The `spdx-validator` command. Argument parsing and output live here;
//! all validation logic is in `spdxv-validator`.
//!
//! ```bash
//! spdx-validator app-1.0.json
//! spdx-validator --recursive --dir deps --dir vendor/spdx app-1.0.json
//! spdx-validator -r --config spdx-validator.yaml --print app-1.0.yaml
//! ```
//!
//! Exit status is 0 when every file passes, 1 when any file fails
//! validation, and 2 when the validator itself cannot be set up.

pub mod validate;
