//! Key-value sync stage.
//!
//! Upserts each declared pair at its cluster KV path, value sent verbatim.
//! The first failure aborts the stage.

use async_trait::async_trait;

use syndic_core::manifest::Manifest;

use super::{Stage, StageOutcome};
use crate::cluster::AdminClient;

pub struct KvStage;

#[async_trait]
impl Stage for KvStage {
    fn name(&self) -> &'static str {
        "kv"
    }

    fn enabled(&self, manifest: &Manifest) -> bool {
        manifest.apply_keys
    }

    async fn apply(&self, client: &AdminClient, manifest: &Manifest) -> StageOutcome {
        for (i, pair) in manifest.keys.iter().enumerate() {
            if let Err(error) = client.put_kv(&pair.name, &pair.value).await {
                return StageOutcome::Aborted { item: i, error };
            }
            tracing::info!(key = %pair.name, "key written");
        }
        StageOutcome::Completed
    }
}
