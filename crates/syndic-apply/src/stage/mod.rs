//! Reconciliation stages.
//!
//! Each stage applies one slice of the manifest (tokens, nodes, or
//! key-values) against the cluster, item by item, in manifest order.

pub mod acl;
pub mod catalog;
pub mod kv;

use async_trait::async_trait;

use syndic_core::manifest::Manifest;
use syndic_core::SyndicError;

use crate::cluster::AdminClient;

pub use acl::AclStage;
pub use catalog::CatalogStage;
pub use kv::KvStage;

/// Outcome of one stage of a run.
#[derive(Debug)]
pub enum StageOutcome {
    /// Every item processed without a fatal error.
    Completed,
    /// Stage disabled by its manifest flag.
    Skipped,
    /// Fatal error at `item` (zero-based manifest order); later items in
    /// this stage were not attempted.
    Aborted { item: usize, error: SyndicError },
}

impl StageOutcome {
    pub fn is_aborted(&self) -> bool {
        matches!(self, StageOutcome::Aborted { .. })
    }
}

/// One reconciliation stage. Stages receive the whole manifest and pick
/// their own slice; the driver decides ordering and whether a stage runs.
#[async_trait]
pub trait Stage: Send + Sync {
    fn name(&self) -> &'static str;
    /// The manifest flag gating this stage.
    fn enabled(&self, manifest: &Manifest) -> bool;
    async fn apply(&self, client: &AdminClient, manifest: &Manifest) -> StageOutcome;
}
