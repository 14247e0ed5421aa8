use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

use super::CredentialId;
use crate::core::{
    claim_path::ClaimPathElement,
    credential_format::{ClaimFormatDesignation, CredentialType},
};

/// Depth of an mdoc claim path, `[namespace, element_identifier]`.
const MDOC_PATH_DEPTH: usize = 2;

/// The declared type and format of a stored credential.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct CredentialDescriptor {
    #[serde(rename = "type")]
    credential_type: CredentialType,
    format: ClaimFormatDesignation,
}

impl CredentialDescriptor {
    pub fn new(credential_type: impl Into<CredentialType>, format: ClaimFormatDesignation) -> Self {
        Self {
            credential_type: credential_type.into(),
            format,
        }
    }

    pub fn credential_type(&self) -> &str {
        &self.credential_type
    }

    pub fn format(&self) -> &ClaimFormatDesignation {
        &self.format
    }
}

/// Values held by a credential at a given claim path.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ClaimValueEntry {
    pub path: Vec<ClaimPathElement>,
    #[serde(default)]
    pub values: Vec<String>,
}

/// Owned input a [CredentialRegistry](super::registry::CredentialRegistry) is built from.
///
/// Claim paths are kept as raw element lists so that a malformed snapshot is
/// reported when the registry is built, with the offending credential id.
///
/// ```json
/// {
///   "credentials": { "doc1": { "type": "eu.europa.ec.eudi.pid.1", "format": "mso_mdoc" } },
///   "claim_paths": { "doc1": [["family_name"], ["address", "city"]] },
///   "claim_values": { "doc1": [{ "path": ["address", "city"], "values": ["Athens"] }] }
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct RegistrySnapshot {
    #[serde(default)]
    credentials: BTreeMap<CredentialId, CredentialDescriptor>,
    #[serde(default)]
    claim_paths: BTreeMap<CredentialId, Vec<Vec<ClaimPathElement>>>,
    #[serde(default)]
    claim_values: BTreeMap<CredentialId, Vec<ClaimValueEntry>>,
}

impl RegistrySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credential(
        mut self,
        id: impl Into<CredentialId>,
        credential_type: impl Into<CredentialType>,
        format: ClaimFormatDesignation,
    ) -> Self {
        self.credentials
            .insert(id.into(), CredentialDescriptor::new(credential_type, format));
        self
    }

    pub fn with_claim_path(
        mut self,
        id: impl Into<CredentialId>,
        path: impl Into<Vec<ClaimPathElement>>,
    ) -> Self {
        self.claim_paths
            .entry(id.into())
            .or_default()
            .push(path.into());
        self
    }

    pub fn with_claim_values(
        mut self,
        id: impl Into<CredentialId>,
        path: impl Into<Vec<ClaimPathElement>>,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.claim_values
            .entry(id.into())
            .or_default()
            .push(ClaimValueEntry {
                path: path.into(),
                values: values.into_iter().map(Into::into).collect(),
            });
        self
    }

    /// Records the claims of a decoded credential.
    ///
    /// Every leaf of `claims` (a scalar, `null` or an empty container) becomes
    /// a claim path, and every scalar leaf other than `null` also records its
    /// textual value. Credentials already registered as `mso_mdoc` are only
    /// walked down to `[namespace, element_identifier]`.
    pub fn with_claim_tree(mut self, id: impl Into<CredentialId>, claims: &Json) -> Self {
        let id = id.into();
        let max_depth = match self.credentials.get(&id) {
            Some(descriptor) if descriptor.format == ClaimFormatDesignation::MsoMDoc => {
                Some(MDOC_PATH_DEPTH)
            }
            _ => None,
        };

        let mut leaves = ClaimLeaves::default();
        leaves.collect(claims, &mut Vec::new(), max_depth);

        if !leaves.paths.is_empty() {
            self.claim_paths
                .entry(id.clone())
                .or_default()
                .extend(leaves.paths);
        }
        if !leaves.values.is_empty() {
            self.claim_values
                .entry(id)
                .or_default()
                .extend(leaves.values);
        }
        self
    }

    pub fn credentials(&self) -> &BTreeMap<CredentialId, CredentialDescriptor> {
        &self.credentials
    }

    pub(crate) fn into_parts(
        self,
    ) -> (
        BTreeMap<CredentialId, CredentialDescriptor>,
        BTreeMap<CredentialId, Vec<Vec<ClaimPathElement>>>,
        BTreeMap<CredentialId, Vec<ClaimValueEntry>>,
    ) {
        (self.credentials, self.claim_paths, self.claim_values)
    }
}

#[derive(Default)]
struct ClaimLeaves {
    paths: Vec<Vec<ClaimPathElement>>,
    values: Vec<ClaimValueEntry>,
}

impl ClaimLeaves {
    fn collect(&mut self, node: &Json, prefix: &mut Vec<ClaimPathElement>, max_depth: Option<usize>) {
        let at_max_depth = max_depth.is_some_and(|depth| prefix.len() >= depth);
        if !prefix.is_empty() && (at_max_depth || is_leaf(node)) {
            self.paths.push(prefix.clone());
            if let Some(value) = scalar_text(node) {
                self.values.push(ClaimValueEntry {
                    path: prefix.clone(),
                    values: vec![value],
                });
            }
            return;
        }

        match node {
            Json::Object(map) => {
                for (key, child) in map {
                    prefix.push(ClaimPathElement::Claim(key.clone()));
                    self.collect(child, prefix, max_depth);
                    prefix.pop();
                }
            }
            Json::Array(items) => {
                for (index, child) in items.iter().enumerate() {
                    prefix.push(ClaimPathElement::ArrayElement(index));
                    self.collect(child, prefix, max_depth);
                    prefix.pop();
                }
            }
            // a scalar root carries no addressable claim
            _ => {}
        }
    }
}

fn is_leaf(node: &Json) -> bool {
    match node {
        Json::Object(map) => map.is_empty(),
        Json::Array(items) => items.is_empty(),
        _ => true,
    }
}

fn scalar_text(node: &Json) -> Option<String> {
    match node {
        Json::String(s) => Some(s.clone()),
        Json::Number(n) => Some(n.to_string()),
        Json::Bool(b) => Some(b.to_string()),
        Json::Null | Json::Array(_) | Json::Object(_) => None,
    }
}
