//! Wallet side of credential selection: indexes the holder's credentials and
//! answers the claim queries a verifier's request is resolved into.

use crate::core::{claim_path::ClaimPath, credential_format::ClaimFormatDesignation};

pub mod registry;
pub mod shared;
pub mod snapshot;

pub use registry::{ClaimValues, CredentialRegistry, RegistryError};
pub use shared::SharedRegistry;
pub use snapshot::{ClaimValueEntry, CredentialDescriptor, RegistrySnapshot};

/// Opaque identifier of a credential in the wallet's credential store.
pub type CredentialId = String;

/// Queries the presentation layer runs against the holder's credentials while
/// resolving a DCQL request.
///
/// None of the operations fail: unknown credentials and absent claims are
/// reported as empty results or `false`.
pub trait DcqlQueryable {
    /// Identifiers of the credentials declared with `credential_type` (doctype
    /// or vct) and `format`.
    fn get_credentials(&self, credential_type: &str, format: &ClaimFormatDesignation) -> Vec<&str>;

    /// Every claim path registered for the credential `id`.
    fn get_all_claim_paths(&self, id: &str) -> &[ClaimPath];

    /// Returns `true` if the credential `id` holds a claim reachable through
    /// `claim_path`, see [ClaimPath::matches].
    fn has_claim(&self, id: &str, claim_path: &ClaimPath) -> bool;

    /// Returns `true` if the value recorded for exactly `claim_path` is one of
    /// `values`.
    fn has_claim_with_value(&self, id: &str, claim_path: &ClaimPath, values: &[String]) -> bool;
}
