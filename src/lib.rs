pub mod base62;
pub mod compose;
pub mod config;
pub mod entity;
pub mod error;
pub mod hashid;
pub mod resolve;

pub use error::{PublicIdError, ConfigError, Result};
pub use config::CodecConfig;
pub use compose::{PublicId, compose, decompose};
pub use entity::{EntityConfig, KeyMode};
pub use hashid::HashidCodec;
pub use resolve::{Directory, InternalKey, ResolutionPlan, plan};

/// Encode a UUID as a base62 string over `alphabet`.
pub fn encode_uuid(uuid: uuid::Uuid, alphabet: &str) -> String {
    base62::encode_uuid(uuid, alphabet)
}

/// Decode a base62 string back to a UUID.
///
/// # Errors
///
/// See [`base62::decode_uuid`].
pub fn decode_uuid(input: &str, alphabet: &str) -> Result<uuid::Uuid> {
    base62::decode_uuid(input, alphabet)
}
