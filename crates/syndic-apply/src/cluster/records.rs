//! Wire-facing records for the admin API.
//!
//! Field names are capitalized on the wire; the token record carries its
//! rules as string-encoded JSON, which is how the cluster API wants them.

use serde::Serialize;

use syndic_core::error::Result;
use syndic_core::manifest::{NodeDecl, TokenDecl};
use syndic_core::policy::PolicyRules;

/// Body of `PUT /v1/acl/create`.
#[derive(Debug, Serialize)]
pub struct TokenRecord {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type")]
    pub token_type: String,
    /// Compiled policy document, string-encoded JSON.
    #[serde(rename = "Rules")]
    pub rules: String,
}

impl TokenRecord {
    /// Compile the declaration's grant lists and assemble the record that
    /// carries the operator-assigned id.
    pub fn compiled(decl: &TokenDecl) -> Result<Self> {
        let rules = PolicyRules::compile(&decl.keys, &decl.services).to_json()?;
        Ok(Self {
            id: decl.id.clone(),
            name: decl.name.clone(),
            token_type: decl.token_type.clone(),
            rules,
        })
    }
}

/// Body of `PUT /v1/catalog/register`.
#[derive(Debug, Serialize)]
pub struct NodeRecord {
    #[serde(rename = "Node")]
    pub node: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "Datacenter")]
    pub datacenter: String,
    #[serde(rename = "Service")]
    pub service: ServiceRecord,
}

impl NodeRecord {
    /// Effective registration record: the declaration combined with the
    /// manifest's global datacenter. The declaration itself is never
    /// mutated; its own datacenter field is advisory and loses here.
    pub fn effective(decl: &NodeDecl, datacenter: &str) -> Self {
        Self {
            node: decl.node.clone(),
            address: decl.address.clone(),
            datacenter: datacenter.to_string(),
            service: ServiceRecord {
                id: decl.service.id.clone(),
                service: decl.service.service.clone(),
                address: decl.service.address.clone(),
                port: decl.service.port,
                tags: decl.service.tags.clone(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ServiceRecord {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Service")]
    pub service: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "Port")]
    pub port: u64,
    #[serde(rename = "Tags")]
    pub tags: Vec<String>,
}
