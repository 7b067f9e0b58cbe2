//! Policy Rule Compiler.
//!
//! Compiles a token's ordered grant lists into the cluster's nested
//! policy-document format, e.g. `{"key":{"some/key":{"policy":"write"}}}`.
//! The cluster API expects the document embedded in the token record as a
//! JSON *string*, so the compiled form is rendered immediately before
//! transmission and never persisted.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{Result, SyndicError};
use crate::manifest::Grant;

/// One compiled rule: `{"policy": "<value>"}`.
///
/// Values are passed through verbatim; nothing here checks for
/// "read"/"write"/"deny" — an unknown value is the cluster's to reject.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct RulePolicy {
    pub policy: String,
}

/// Compiled policy document for one token: key-prefix and service-name
/// mappings. `BTreeMap` keeps the rendered JSON deterministic.
#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct PolicyRules {
    pub key: BTreeMap<String, RulePolicy>,
    pub service: BTreeMap<String, RulePolicy>,
}

impl PolicyRules {
    /// Compile grant lists in manifest order. A later grant with the same
    /// name silently overwrites an earlier one (last-write-wins); an empty
    /// name becomes a literal empty-string key, the default/catch-all rule.
    pub fn compile(keys: &[Grant], services: &[Grant]) -> Self {
        let mut rules = PolicyRules::default();
        for pair in keys {
            rules.key.insert(
                pair.name.clone(),
                RulePolicy {
                    policy: pair.value.clone(),
                },
            );
        }
        for pair in services {
            rules.service.insert(
                pair.name.clone(),
                RulePolicy {
                    policy: pair.value.clone(),
                },
            );
        }
        rules
    }

    /// Render to the JSON string carried in the token record's rules field.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| SyndicError::Encode(e.to_string()))
    }
}
