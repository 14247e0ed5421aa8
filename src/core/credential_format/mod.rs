use core::fmt;
use std::{borrow::Cow, str::FromStr};

use serde::{Deserialize, Serialize};

const FORMAT_MSO_MDOC: &str = "mso_mdoc";
const FORMAT_DC_SD_JWT: &str = "dc+sd-jwt";
const FORMAT_VC_SD_JWT: &str = "vc+sd-jwt";
const FORMAT_JWT_VC_JSON: &str = "jwt_vc_json";
const FORMAT_LDP_VC: &str = "ldp_vc";

/// The declared type of a stored credential.
///
/// This is the ISO mdoc `doctype` for `mso_mdoc` credentials and the `vct`
/// for SD-JWT VCs, e.g. `eu.europa.ec.eudi.pid.1`.
// NOTE: the wallet compares types verbatim, so a plain String is enough for now.
pub type CredentialType = String;

/// The data format a stored credential is encoded in.
///
/// Names follow the OID4VP credential format identifiers.
/// See: <https://openid.net/specs/openid-4-verifiable-presentations-1_0.html#appendix-B>
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ClaimFormatDesignation {
    /// ISO/IEC 18013-5 mobile document, addressed by `[namespace, element_identifier]`
    /// claim paths.
    MsoMDoc,

    /// IETF SD-JWT VC.
    DcSdJwt,

    /// SD-JWT VC under the media type used before `dc+sd-jwt` was registered.
    /// Some issuers still produce it.
    VcSdJwt,

    /// W3C Verifiable Credential secured as a JWT, without JSON-LD processing.
    JwtVcJson,

    /// W3C Verifiable Credential secured with a Data Integrity proof.
    LdpVc,

    /// Any other format identifier, kept verbatim.
    Other(String),
}

impl ClaimFormatDesignation {
    pub fn from_name(name: Cow<str>) -> Self {
        match name.as_ref() {
            FORMAT_MSO_MDOC => Self::MsoMDoc,
            FORMAT_DC_SD_JWT => Self::DcSdJwt,
            FORMAT_VC_SD_JWT => Self::VcSdJwt,
            FORMAT_JWT_VC_JSON => Self::JwtVcJson,
            FORMAT_LDP_VC => Self::LdpVc,
            _ => Self::Other(name.into_owned()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::MsoMDoc => FORMAT_MSO_MDOC,
            Self::DcSdJwt => FORMAT_DC_SD_JWT,
            Self::VcSdJwt => FORMAT_VC_SD_JWT,
            Self::JwtVcJson => FORMAT_JWT_VC_JSON,
            Self::LdpVc => FORMAT_LDP_VC,
            Self::Other(other) => other,
        }
    }

    fn into_name(self) -> Cow<'static, str> {
        match self {
            Self::MsoMDoc => Cow::Borrowed(FORMAT_MSO_MDOC),
            Self::DcSdJwt => Cow::Borrowed(FORMAT_DC_SD_JWT),
            Self::VcSdJwt => Cow::Borrowed(FORMAT_VC_SD_JWT),
            Self::JwtVcJson => Cow::Borrowed(FORMAT_JWT_VC_JSON),
            Self::LdpVc => Cow::Borrowed(FORMAT_LDP_VC),
            Self::Other(other) => Cow::Owned(other),
        }
    }

    /// Returns `true` for both SD-JWT VC media types.
    pub fn is_sd_jwt(&self) -> bool {
        matches!(self, Self::DcSdJwt | Self::VcSdJwt)
    }
}

impl From<&str> for ClaimFormatDesignation {
    fn from(s: &str) -> Self {
        Self::from_name(Cow::Borrowed(s))
    }
}

impl From<String> for ClaimFormatDesignation {
    fn from(value: String) -> Self {
        Self::from_name(Cow::Owned(value))
    }
}

impl FromStr for ClaimFormatDesignation {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.into())
    }
}

impl From<ClaimFormatDesignation> for String {
    fn from(format: ClaimFormatDesignation) -> Self {
        format.into_name().into_owned()
    }
}

impl fmt::Display for ClaimFormatDesignation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for ClaimFormatDesignation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.name().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ClaimFormatDesignation {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Into::into)
    }
}
