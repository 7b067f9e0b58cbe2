//! Cluster admin client.
//!
//! Thin PUT-only client for the coordination service's administrative HTTP
//! API. All three endpoint families carry the admin credential as a `token`
//! query parameter, and any response status other than 200 is a failure
//! regardless of body. Requests are issued strictly one at a time; no
//! retries, no explicit timeout beyond the transport's own defaults.

pub mod records;

use url::Url;

use syndic_core::error::{Result, SyndicError};

pub use records::{NodeRecord, ServiceRecord, TokenRecord};

pub struct AdminClient {
    http: reqwest::Client,
    /// `http://<cluster>/v1/`, the root all endpoints join against.
    base: Url,
    admin_token: String,
}

impl AdminClient {
    /// `cluster` is `host[:port]` without a scheme, as declared in the
    /// manifest.
    pub fn new(cluster: &str, admin_token: &str) -> Result<Self> {
        let base = Url::parse(&format!("http://{cluster}/v1/"))
            .map_err(|e| SyndicError::RequestBuild(format!("cluster address {cluster}: {e}")))?;
        Ok(Self {
            http: reqwest::Client::new(),
            base,
            admin_token: admin_token.to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let mut url = self
            .base
            .join(path)
            .map_err(|e| SyndicError::RequestBuild(format!("endpoint {path}: {e}")))?;
        url.query_pairs_mut().append_pair("token", &self.admin_token);
        Ok(url)
    }

    async fn put(&self, url: Url, body: Option<String>) -> Result<()> {
        tracing::debug!(%url, "PUT");
        let mut req = self.http.put(url.clone());
        if let Some(body) = body {
            tracing::debug!(%body, "request body");
            req = req.body(body);
        }
        let resp = req
            .send()
            .await
            .map_err(|e| SyndicError::Transport(e.to_string()))?;

        let status = resp.status().as_u16();
        if status != 200 {
            return Err(SyndicError::ClusterStatus {
                status,
                url: url.to_string(),
            });
        }
        Ok(())
    }

    /// `PUT /v1/acl/destroy/<id>` (no body). Destroying an absent token is
    /// a cluster-side no-op that still returns 200.
    pub async fn destroy_token(&self, id: &str) -> Result<()> {
        self.put(self.endpoint(&format!("acl/destroy/{id}"))?, None)
            .await
    }

    /// `PUT /v1/acl/create` with the full token record as JSON.
    pub async fn create_token(&self, record: &TokenRecord) -> Result<()> {
        let body =
            serde_json::to_string_pretty(record).map_err(|e| SyndicError::Encode(e.to_string()))?;
        self.put(self.endpoint("acl/create")?, Some(body)).await
    }

    /// `PUT /v1/catalog/register` with the node record as JSON. Idempotent
    /// on the cluster side by node+service identity.
    pub async fn register_node(&self, record: &NodeRecord) -> Result<()> {
        let body =
            serde_json::to_string(record).map_err(|e| SyndicError::Encode(e.to_string()))?;
        self.put(self.endpoint("catalog/register")?, Some(body))
            .await
    }

    /// `PUT /v1/kv/<path>` with the raw value as the body, not JSON-wrapped.
    pub async fn put_kv(&self, path: &str, value: &str) -> Result<()> {
        self.put(self.endpoint(&format!("kv/{path}"))?, Some(value.to_string()))
            .await
    }
}
