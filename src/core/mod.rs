pub mod claim_path;
pub mod credential_format;
