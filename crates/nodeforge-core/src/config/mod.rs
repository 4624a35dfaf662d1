//! Generated project configuration (package manifest)

pub mod manifest;

pub use manifest::{compose_scripts, generate_manifest, update_manifest, PACKAGE_JSON};
