//! Reconciliation driver.
//!
//! Runs the stages in a fixed order (ACLs, then nodes, then key-values),
//! each gated on its manifest flag. A stage abort is logged and reported
//! but does not block later stages. Inside a stage, abort granularity is
//! the stage's own business: token destroys warn and continue, everything
//! else stops the stage at the failing item.

use syndic_core::manifest::Manifest;

use crate::cluster::AdminClient;
use crate::stage::{AclStage, CatalogStage, KvStage, Stage, StageOutcome};

/// Aggregated outcome of one reconciliation run.
#[derive(Debug)]
pub struct RunReport {
    pub acl: StageOutcome,
    pub nodes: StageOutcome,
    pub keys: StageOutcome,
}

impl RunReport {
    /// True when no attempted stage aborted (skipped stages are clean).
    pub fn all_clean(&self) -> bool {
        !(self.acl.is_aborted() || self.nodes.is_aborted() || self.keys.is_aborted())
    }
}

pub struct Driver {
    client: AdminClient,
}

impl Driver {
    pub fn new(client: AdminClient) -> Self {
        Self { client }
    }

    /// Apply the whole manifest. Always returns a report; per-stage
    /// failures surface there and in the log, never as an early return.
    pub async fn run(&self, manifest: &Manifest) -> RunReport {
        let acl = self.run_stage(&AclStage, manifest).await;
        let nodes = self.run_stage(&CatalogStage, manifest).await;
        let keys = self.run_stage(&KvStage, manifest).await;

        let report = RunReport { acl, nodes, keys };
        if report.all_clean() {
            tracing::info!(cluster = %manifest.cluster, "reconciliation run complete");
        }
        report
    }

    async fn run_stage(&self, stage: &dyn Stage, manifest: &Manifest) -> StageOutcome {
        if !stage.enabled(manifest) {
            tracing::debug!(stage = stage.name(), "stage disabled, skipping");
            return StageOutcome::Skipped;
        }
        tracing::debug!(stage = stage.name(), "stage starting");
        let outcome = stage.apply(&self.client, manifest).await;
        if let StageOutcome::Aborted { item, error } = &outcome {
            tracing::error!(stage = stage.name(), item, error = %error, "stage aborted");
        }
        outcome
    }
}
