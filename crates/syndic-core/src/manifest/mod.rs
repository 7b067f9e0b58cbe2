//! Manifest loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use crate::error::{Result, SyndicError};

pub use schema::{Grant, KvPair, Manifest, NodeDecl, ServiceDecl, TokenDecl};

pub fn load_from_file(path: &Path) -> Result<Manifest> {
    let s = fs::read_to_string(path)
        .map_err(|e| SyndicError::ManifestRead(format!("{}: {e}", path.display())))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<Manifest> {
    let manifest: Manifest = serde_yaml::from_str(s)
        .map_err(|e| SyndicError::ManifestParse(format!("invalid yaml: {e}")))?;
    manifest.validate()?;
    tracing::debug!(
        tokens = manifest.tokens.len(),
        nodes = manifest.nodes.len(),
        keys = manifest.keys.len(),
        "manifest loaded"
    );
    Ok(manifest)
}
