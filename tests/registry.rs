use std::fs::File;

use dcql_queryable::{
    core::{
        claim_path::{ClaimPath, ClaimPathElement},
        credential_format::ClaimFormatDesignation,
    },
    wallet::{CredentialRegistry, DcqlQueryable, RegistryError, RegistrySnapshot, SharedRegistry},
};
use serde_json::json;

const PID_MDOC: &str = "eu.europa.ec.eudi.pid.1";

fn path(value: serde_json::Value) -> ClaimPath {
    serde_json::from_value(value).unwrap()
}

fn values(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn wallet_snapshot() -> RegistrySnapshot {
    let file = File::open("tests/fixtures/wallet_snapshot.json").unwrap();
    let jd = &mut serde_json::Deserializer::from_reader(file);
    serde_path_to_error::deserialize(jd)
        .map_err(|e| e.path().to_string())
        .unwrap()
}

fn wallet_registry() -> CredentialRegistry {
    CredentialRegistry::new(wallet_snapshot()).unwrap()
}

#[test]
fn pid_scenario() {
    let snapshot = RegistrySnapshot::new()
        .with_credential("doc1", PID_MDOC, ClaimFormatDesignation::MsoMDoc)
        .with_claim_path("doc1", ClaimPath::claim("family_name"))
        .with_claim_path("doc1", ClaimPath::claim("address").child("city"))
        .with_claim_values(
            "doc1",
            ClaimPath::claim("address").child("city"),
            ["Athens", "Heraklion"],
        );
    let registry = CredentialRegistry::new(snapshot).unwrap();

    assert_eq!(
        registry.get_credentials(PID_MDOC, &ClaimFormatDesignation::MsoMDoc),
        vec!["doc1"]
    );
    assert!(registry.has_claim("doc1", &path(json!(["address"]))));
    assert!(!registry.has_claim("doc1", &path(json!(["address", "street"]))));
    assert!(registry.has_claim_with_value(
        "doc1",
        &path(json!(["address", "city"])),
        &values(&["Athens"])
    ));
    assert!(!registry.has_claim_with_value(
        "doc1",
        &path(json!(["address", "city"])),
        &values(&["Patras"])
    ));
}

#[test]
fn get_credentials_returns_exactly_the_matching_descriptors() {
    let registry = wallet_registry();
    let cases = [
        (PID_MDOC, ClaimFormatDesignation::MsoMDoc, vec!["doc1"]),
        ("urn:eudi:pid:1", ClaimFormatDesignation::DcSdJwt, vec!["pid-sd-jwt"]),
        ("urn:eudi:pid:1", ClaimFormatDesignation::VcSdJwt, vec![]),
        ("org.iso.18013.5.1.mDL", ClaimFormatDesignation::MsoMDoc, vec!["mdl"]),
        ("UniversityDegreeCredential", ClaimFormatDesignation::LdpVc, vec!["diploma"]),
        (PID_MDOC, ClaimFormatDesignation::DcSdJwt, vec![]),
    ];
    for (credential_type, format, expected) in cases {
        assert_eq!(
            registry.get_credentials(credential_type, &format),
            expected,
            "{credential_type} / {format}"
        );
    }
}

#[test]
fn registry_through_trait_object() {
    let registry = wallet_registry();
    let queryable: &dyn DcqlQueryable = &registry;

    assert_eq!(queryable.get_all_claim_paths("mdl").len(), 3);
    assert!(queryable.has_claim("mdl", &path(json!(["org.iso.18013.5.1", null]))));
    assert!(queryable.has_claim("mdl", &path(json!(["org.iso.18013.5.1"]))));
    assert!(!queryable.has_claim("mdl", &path(json!(["org.iso.18013.5.1", "portrait"]))));
    assert!(queryable.has_claim_with_value(
        "mdl",
        &path(json!(["org.iso.18013.5.1", "age_over_21"])),
        &values(&["true"])
    ));
}

#[test]
fn array_claims_with_wildcards() {
    let registry = wallet_registry();
    let any_nationality = path(json!(["nationalities", null]));

    assert!(registry.has_claim("pid-sd-jwt", &any_nationality));
    assert!(registry.has_claim("pid-sd-jwt", &path(json!(["nationalities", 1]))));
    assert!(!registry.has_claim("pid-sd-jwt", &path(json!(["nationalities", 2]))));
    // the value index is keyed by exact paths only
    assert!(!registry.has_claim_with_value("pid-sd-jwt", &any_nationality, &values(&["GR"])));
    assert!(registry.has_claim_with_value(
        "pid-sd-jwt",
        &path(json!(["nationalities", 0])),
        &values(&["FR", "GR"])
    ));
}

#[test]
fn nested_claims_in_linked_data_credentials() {
    let registry = wallet_registry();

    assert!(registry.has_claim("diploma", &path(json!(["credentialSubject"]))));
    assert!(registry.has_claim("diploma", &path(json!(["credentialSubject", "degree"]))));
    assert!(registry.has_claim("diploma", &path(json!(["credentialSubject", null, "name"]))));
    assert!(!registry.has_claim("diploma", &path(json!(["credentialSubject", "degree", "level"]))));
}

#[test]
fn unknown_credentials_never_match() {
    let registry = wallet_registry();
    let query = path(json!(["family_name"]));

    assert!(registry.get_all_claim_paths("unknown").is_empty());
    assert!(!registry.has_claim("unknown", &query));
    assert!(!registry.has_claim_with_value("unknown", &query, &values(&["Doe"])));
    // credentials without value entries
    assert!(!registry.has_claim_with_value("diploma", &query, &values(&["Doe"])));
    assert!(!registry.has_claim_with_value("doc1", &path(json!(["address", "city"])), &[]));
}

#[test]
fn empty_claim_path_in_snapshot_aborts_construction() {
    let mut snapshot = serde_json::to_value(wallet_snapshot()).unwrap();
    snapshot["claim_paths"]["mdl"]
        .as_array_mut()
        .unwrap()
        .push(json!([]));
    let snapshot: RegistrySnapshot = serde_json::from_value(snapshot).unwrap();

    let err = CredentialRegistry::new(snapshot).unwrap_err();
    assert!(matches!(
        err,
        RegistryError::InvalidClaimPath { ref credential_id, .. } if credential_id == "mdl"
    ));
}

#[test]
fn snapshot_built_from_decoded_claims() {
    let snapshot = RegistrySnapshot::new()
        .with_credential("pid", "urn:eudi:pid:1", ClaimFormatDesignation::DcSdJwt)
        .with_claim_tree(
            "pid",
            &json!({
                "given_name": "Erika",
                "address": { "locality": "Berlin", "country": "DE" },
                "nationalities": ["DE"]
            }),
        )
        .with_credential("mdl", "org.iso.18013.5.1.mDL", ClaimFormatDesignation::MsoMDoc)
        .with_claim_tree(
            "mdl",
            &json!({
                "org.iso.18013.5.1": {
                    "age_over_18": true,
                    "driving_privileges": [{ "vehicle_category_code": "B" }]
                }
            }),
        );
    let registry = CredentialRegistry::new(snapshot).unwrap();

    assert!(registry.has_claim("pid", &path(json!(["address"]))));
    assert!(registry.has_claim("pid", &path(json!(["nationalities", null]))));
    assert!(registry.has_claim_with_value(
        "pid",
        &path(json!(["address", "locality"])),
        &values(&["Berlin"])
    ));
    assert!(registry.has_claim_with_value(
        "mdl",
        &path(json!(["org.iso.18013.5.1", "age_over_18"])),
        &values(&["true"])
    ));
    assert!(registry.has_claim("mdl", &path(json!(["org.iso.18013.5.1", "driving_privileges"]))));
    // mdoc claims are not addressable below the element identifier
    assert!(!registry.has_claim(
        "mdl",
        &path(json!(["org.iso.18013.5.1", "driving_privileges", 0]))
    ));
    assert!(registry
        .get_all_claim_paths("mdl")
        .iter()
        .all(ClaimPath::is_mdoc_path));
}

#[test]
fn shared_registry_follows_the_credential_store() {
    let shared = SharedRegistry::new(wallet_registry());
    let session = shared.load();

    let next = wallet_snapshot()
        .with_credential("doc2", PID_MDOC, ClaimFormatDesignation::MsoMDoc)
        .with_claim_path("doc2", vec![ClaimPathElement::Claim("family_name".into())]);
    shared.replace(next).unwrap();

    // a running session keeps its snapshot
    assert_eq!(
        session.get_credentials(PID_MDOC, &ClaimFormatDesignation::MsoMDoc),
        vec!["doc1"]
    );
    assert_eq!(
        shared
            .load()
            .get_credentials(PID_MDOC, &ClaimFormatDesignation::MsoMDoc),
        vec!["doc1", "doc2"]
    );
}
