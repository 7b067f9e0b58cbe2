//! Token lifecycle stage.
//!
//! Brings each cluster-side access token to match its declaration. A
//! declaration marked `remove` gets a single destroy; everything else gets
//! destroy-then-create, so the operator-assigned id lands idempotently
//! even when a stale token already holds it. The destroy runs on
//! first-ever creation too.

use async_trait::async_trait;

use syndic_core::manifest::{Manifest, TokenDecl};

use super::{Stage, StageOutcome};
use crate::cluster::{AdminClient, TokenRecord};

pub struct AclStage;

#[async_trait]
impl Stage for AclStage {
    fn name(&self) -> &'static str {
        "acl"
    }

    fn enabled(&self, manifest: &Manifest) -> bool {
        manifest.apply_acls
    }

    async fn apply(&self, client: &AdminClient, manifest: &Manifest) -> StageOutcome {
        for (i, token) in manifest.tokens.iter().enumerate() {
            if let Err(error) = reconcile_token(client, token).await {
                return StageOutcome::Aborted { item: i, error };
            }
        }
        StageOutcome::Completed
    }
}

/// Destroy failures are warnings only: removing an already-absent token is
/// routine, and before a create the destroy is just a best-effort clear of
/// a stale holder of the id. Create failures are fatal to the stage.
async fn reconcile_token(client: &AdminClient, token: &TokenDecl) -> syndic_core::Result<()> {
    if let Err(e) = client.destroy_token(&token.id).await {
        tracing::warn!(id = %token.id, error = %e, "token destroy failed");
    }
    if token.remove {
        tracing::info!(id = %token.id, "token removal applied");
        return Ok(());
    }

    let record = TokenRecord::compiled(token)?;
    client.create_token(&record).await?;
    tracing::info!(id = %token.id, name = %token.name, "token created");
    Ok(())
}
