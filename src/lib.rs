//! Wallet-side claim queries for [OID4VP 1.0] presentations.
//!
//! [OID4VP 1.0]: <https://openid.net/specs/openid-4-verifiable-presentations-1_0.html>
//!
//! When a verifier sends a DCQL query, the wallet has to find out which of the
//! holder's credentials can satisfy each credential query and which of their
//! claims can be disclosed. This library answers those questions over an
//! in-memory snapshot of the credential store. It does not parse DCQL, verify
//! credentials or build presentations.
//!
//! # Usage
//!
//! ```
//! use dcql_queryable::core::{claim_path::ClaimPath, credential_format::ClaimFormatDesignation};
//! use dcql_queryable::wallet::{CredentialRegistry, DcqlQueryable, RegistrySnapshot};
//!
//! // Snapshot the credential store.
//! let snapshot: RegistrySnapshot = serde_json::from_value(serde_json::json!({
//!     "credentials": {
//!         "doc1": { "type": "eu.europa.ec.eudi.pid.1", "format": "mso_mdoc" }
//!     },
//!     "claim_paths": {
//!         "doc1": [["family_name"], ["address", "city"]]
//!     },
//!     "claim_values": {
//!         "doc1": [{ "path": ["address", "city"], "values": ["Athens", "Heraklion"] }]
//!     }
//! }))
//! .unwrap();
//!
//! // Build the registry once per query session.
//! let registry = CredentialRegistry::new(snapshot)?;
//!
//! // Resolve the candidates of a credential query...
//! let candidates =
//!     registry.get_credentials("eu.europa.ec.eudi.pid.1", &ClaimFormatDesignation::MsoMDoc);
//! assert_eq!(candidates, vec!["doc1"]);
//!
//! // ...and test their claims. A parent path selects the whole nested claim.
//! assert!(registry.has_claim("doc1", &ClaimPath::claim("address")));
//!
//! let city = ClaimPath::claim("address").child("city");
//! assert!(registry.has_claim_with_value("doc1", &city, &["Athens".to_string()]));
//! # Ok::<(), dcql_queryable::wallet::RegistryError>(())
//! ```
//!
//! # Claim Paths
//!
//! Claims are addressed with DCQL claims path pointers, see
//! [`core::claim_path`]. A `null` element is a wildcard and a shorter path
//! matches everything nested below it.
//!
//! [`core::claim_path`]: crate::core::claim_path
//!
//! # Registries
//!
//! A [`CredentialRegistry`] is immutable. When the credential store changes,
//! build a new one from a fresh [`RegistrySnapshot`]; [`SharedRegistry`] holds
//! the current registry for long-lived wallets.
//!
//! [`CredentialRegistry`]: crate::wallet::CredentialRegistry
//! [`RegistrySnapshot`]: crate::wallet::RegistrySnapshot
//! [`SharedRegistry`]: crate::wallet::SharedRegistry

pub mod core;
pub mod wallet;
