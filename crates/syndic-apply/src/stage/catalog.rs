//! Catalog node registration stage.
//!
//! Upserts each declared node (with its single nested service) into the
//! cluster catalog. Registration is idempotent on the cluster side by
//! node+service identity; the first failure aborts the stage.

use async_trait::async_trait;

use syndic_core::manifest::Manifest;

use super::{Stage, StageOutcome};
use crate::cluster::{AdminClient, NodeRecord};

pub struct CatalogStage;

#[async_trait]
impl Stage for CatalogStage {
    fn name(&self) -> &'static str {
        "catalog"
    }

    fn enabled(&self, manifest: &Manifest) -> bool {
        manifest.apply_nodes
    }

    async fn apply(&self, client: &AdminClient, manifest: &Manifest) -> StageOutcome {
        for (i, node) in manifest.nodes.iter().enumerate() {
            // Effective record, not in-place mutation: the global
            // datacenter wins over whatever the declaration carried.
            let record = NodeRecord::effective(node, &manifest.datacenter);
            if let Err(error) = client.register_node(&record).await {
                return StageOutcome::Aborted { item: i, error };
            }
            tracing::info!(node = %node.node, service = %node.service.service, "node registered");
        }
        StageOutcome::Completed
    }
}
