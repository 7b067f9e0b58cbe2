use serde::Deserialize;

use crate::error::{Result, SyndicError};

/// Root of the declarative manifest. Immutable once loaded; one
/// reconciliation run consumes exactly one of these.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Cluster address, `host[:port]`, no scheme.
    pub cluster: String,

    /// Administrative credential, sent as the `token` query parameter.
    /// May be empty on clusters without ACLs bootstrapped.
    #[serde(default)]
    pub admin_token: String,

    /// Global datacenter, stamped onto every node registration.
    #[serde(default)]
    pub datacenter: String,

    #[serde(default)]
    pub apply_acls: bool,
    #[serde(default)]
    pub apply_nodes: bool,
    #[serde(default)]
    pub apply_keys: bool,

    #[serde(default)]
    pub tokens: Vec<TokenDecl>,
    #[serde(default)]
    pub nodes: Vec<NodeDecl>,
    #[serde(default)]
    pub keys: Vec<KvPair>,
}

impl Manifest {
    pub fn validate(&self) -> Result<()> {
        if self.cluster.is_empty() {
            return Err(SyndicError::ManifestInvalid(
                "cluster address must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// One declared access token. `department` and `team` are operator
/// bookkeeping only and are never sent to the cluster.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TokenDecl {
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub team: String,

    /// Stable operator-assigned identifier; doubles as the cluster-side
    /// resource id for both destroy and create.
    pub id: String,

    #[serde(default)]
    pub name: String,
    /// Token type (field name is `type` in YAML).
    #[serde(rename = "type", default)]
    pub token_type: String,

    /// When true the token is destroyed and the grant lists are ignored.
    #[serde(default)]
    pub remove: bool,

    #[serde(default)]
    pub keys: Vec<Grant>,
    #[serde(default)]
    pub services: Vec<Grant>,
}

/// A (name, policy-value) grant pair. An empty name is the
/// default/catch-all rule and must survive compilation as a literal
/// empty-string key.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Grant {
    #[serde(default)]
    pub name: String,
    pub value: String,
}

/// A catalog node and the single service registered on it. The declared
/// datacenter is advisory only; the manifest's global datacenter wins at
/// serialization time.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeDecl {
    pub node: String,
    pub address: String,
    #[serde(default)]
    pub datacenter: String,
    pub service: ServiceDecl,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceDecl {
    #[serde(default)]
    pub id: String,
    pub service: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub port: u64,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A raw key-value entry: `name` is the cluster KV path, `value` the
/// opaque payload PUT verbatim (not JSON-wrapped).
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KvPair {
    pub name: String,
    pub value: String,
}
