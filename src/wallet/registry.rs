use std::collections::{BTreeMap, HashMap};

use tracing::{debug, warn};

use super::{
    snapshot::{CredentialDescriptor, RegistrySnapshot},
    CredentialId, DcqlQueryable,
};
use crate::core::{
    claim_path::{ClaimPath, ClaimPathError},
    credential_format::ClaimFormatDesignation,
};

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// A claim path of the snapshot could not be parsed.
    #[error("invalid claim path for credential `{credential_id}`: {source}")]
    InvalidClaimPath {
        credential_id: CredentialId,
        #[source]
        source: ClaimPathError,
    },
}

impl RegistryError {
    fn invalid_claim_path(credential_id: &str) -> impl FnOnce(ClaimPathError) -> Self + '_ {
        move |source| Self::InvalidClaimPath {
            credential_id: credential_id.to_owned(),
            source,
        }
    }
}

/// Result of looking up the value index of a [CredentialRegistry].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimValues<'a> {
    /// No values were recorded for the credential and path.
    Absent,
    /// Values recorded for the credential and path. May be empty.
    Present(&'a [String]),
}

/// Read-only index over a snapshot of the holder's credentials.
///
/// The registry is never updated in place; build a new one from a fresh
/// [RegistrySnapshot] when the stored credentials change (see
/// [SharedRegistry](super::shared::SharedRegistry)).
#[derive(Debug, Clone, Default)]
pub struct CredentialRegistry {
    credentials: BTreeMap<CredentialId, CredentialDescriptor>,
    claim_paths: HashMap<CredentialId, Vec<ClaimPath>>,
    claim_values: HashMap<CredentialId, HashMap<ClaimPath, Vec<String>>>,
}

impl CredentialRegistry {
    /// Builds the registry indices from `snapshot`.
    ///
    /// # Errors
    /// Returns [RegistryError::InvalidClaimPath] if any claim path of the
    /// snapshot is empty.
    pub fn new(snapshot: RegistrySnapshot) -> Result<Self, RegistryError> {
        let (credentials, raw_claim_paths, raw_claim_values) = snapshot.into_parts();

        let mut claim_paths = HashMap::with_capacity(raw_claim_paths.len());
        for (credential_id, raw_paths) in raw_claim_paths {
            let paths = raw_paths
                .into_iter()
                .map(ClaimPath::new)
                .collect::<Result<Vec<_>, _>>()
                .map_err(RegistryError::invalid_claim_path(&credential_id))?;

            for path in paths.iter().filter(|path| !path.is_concrete()) {
                warn!(
                    %credential_id,
                    %path,
                    "stored claim path contains a wildcard, it is compared structurally"
                );
            }

            claim_paths.insert(credential_id, paths);
        }

        let mut claim_values = HashMap::with_capacity(raw_claim_values.len());
        for (credential_id, entries) in raw_claim_values {
            let mut by_path: HashMap<ClaimPath, Vec<String>> = HashMap::new();
            for entry in entries {
                let path = ClaimPath::new(entry.path)
                    .map_err(RegistryError::invalid_claim_path(&credential_id))?;
                by_path.entry(path).or_default().extend(entry.values);
            }
            claim_values.insert(credential_id, by_path);
        }

        debug!(
            credentials = credentials.len(),
            claim_paths = claim_paths.values().map(Vec::len).sum::<usize>(),
            claim_values = claim_values.values().map(HashMap::len).sum::<usize>(),
            "built credential registry"
        );

        Ok(Self {
            credentials,
            claim_paths,
            claim_values,
        })
    }

    pub fn descriptor(&self, id: &str) -> Option<&CredentialDescriptor> {
        self.credentials.get(id)
    }

    /// Identifiers of every credential with a descriptor, in ascending order.
    pub fn credential_ids(&self) -> impl Iterator<Item = &str> {
        self.credentials.keys().map(String::as_str)
    }

    /// Looks up the values recorded for exactly `claim_path`.
    ///
    /// Unlike [DcqlQueryable::has_claim_with_value] this tells an absent entry
    /// apart from an entry without values.
    pub fn claim_values(&self, id: &str, claim_path: &ClaimPath) -> ClaimValues<'_> {
        match self
            .claim_values
            .get(id)
            .and_then(|by_path| by_path.get(claim_path))
        {
            Some(values) => ClaimValues::Present(values),
            None => ClaimValues::Absent,
        }
    }

    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }
}

impl TryFrom<RegistrySnapshot> for CredentialRegistry {
    type Error = RegistryError;

    fn try_from(snapshot: RegistrySnapshot) -> Result<Self, Self::Error> {
        Self::new(snapshot)
    }
}

impl DcqlQueryable for CredentialRegistry {
    fn get_credentials(&self, credential_type: &str, format: &ClaimFormatDesignation) -> Vec<&str> {
        self.credentials
            .iter()
            .filter(|(_, descriptor)| {
                descriptor.credential_type() == credential_type && descriptor.format() == format
            })
            .map(|(id, _)| id.as_str())
            .collect()
    }

    fn get_all_claim_paths(&self, id: &str) -> &[ClaimPath] {
        self.claim_paths
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn has_claim(&self, id: &str, claim_path: &ClaimPath) -> bool {
        self.get_all_claim_paths(id)
            .iter()
            .any(|stored| stored == claim_path || claim_path.matches(stored))
    }

    fn has_claim_with_value(&self, id: &str, claim_path: &ClaimPath, values: &[String]) -> bool {
        match self.claim_values(id, claim_path) {
            ClaimValues::Present(available) => values.iter().any(|value| available.contains(value)),
            ClaimValues::Absent => false,
        }
    }
}
