use std::collections::BTreeMap;
use std::fmt;

use uuid::Uuid;

use crate::base62;
use crate::compose;
use crate::config::CodecConfig;
use crate::entity::{EntityConfig, KeyMode};
use crate::error::{ConfigError, PublicIdError, Result};
use crate::hashid::HashidCodec;

/// A record store's native primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InternalKey {
    Integer(u64),
    Uuid(Uuid),
}

impl fmt::Display for InternalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Uuid(uuid) => write!(f, "{uuid}"),
        }
    }
}

impl From<u64> for InternalKey {
    fn from(value: u64) -> Self {
        Self::Integer(value)
    }
}

impl From<Uuid> for InternalKey {
    fn from(uuid: Uuid) -> Self {
        Self::Uuid(uuid)
    }
}

/// Which of the three input shapes a lookup string holds.
///
/// The three formats share character sets, so classification is by shape
/// alone: a separator means a full public ID, the canonical hyphenated UUID
/// layout means a raw key (UUID mode only), anything else is treated as a
/// bare encoded key first with a raw-key fallback during resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionPlan {
    FullPublicId { prefix: String, hash: String },
    BareEncodedKey(String),
    RawInternalKey(String),
}

/// Classifies an input string for an entity of the given key mode.
///
/// # Errors
///
/// Returns `MalformedInput` for an empty input or for a separator-carrying
/// input with an empty hash segment.
pub fn plan(input: &str, mode: KeyMode, separator: &str) -> Result<ResolutionPlan> {
    if input.is_empty() {
        return Err(PublicIdError::MalformedInput {
            input: String::new(),
        });
    }

    if input.contains(separator) {
        let parsed = compose::decompose(input, separator)?;
        return Ok(ResolutionPlan::FullPublicId {
            prefix: parsed.prefix,
            hash: parsed.hash,
        });
    }

    if mode == KeyMode::Uuid && is_canonical_uuid(input) {
        return Ok(ResolutionPlan::RawInternalKey(input.to_string()));
    }

    Ok(ResolutionPlan::BareEncodedKey(input.to_string()))
}

/// The canonical hyphenated `8-4-4-4-12` layout, case-insensitive. The
/// 32-hex "simple" form is deliberately not recognized here: without
/// hyphens it is indistinguishable from an encoded hash.
fn is_canonical_uuid(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() == 36
        && bytes.iter().enumerate().all(|(i, b)| match i {
            8 | 13 | 18 | 23 => *b == b'-',
            _ => b.is_ascii_hexdigit(),
        })
}

enum EntityCodec {
    Integer(HashidCodec),
    Uuid,
}

struct Registered {
    config: EntityConfig,
    prefix: String,
    codec: EntityCodec,
}

/// Registry of entity types plus the lookup surface consumed by the
/// record-access layer.
///
/// Holds only immutable configuration once registration is done, so a
/// `Directory` can be shared freely across threads; every operation is a
/// pure transform over in-memory strings and integers.
pub struct Directory {
    config: CodecConfig,
    entities: BTreeMap<String, Registered>,
}

impl Directory {
    /// Creates a directory over a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns the `ConfigError` from `CodecConfig::validate`.
    pub fn new(config: CodecConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            entities: BTreeMap::new(),
        })
    }

    /// Registers an entity type under a name.
    ///
    /// Misconfiguration fails here, loudly, rather than surfacing later on
    /// a per-call basis.
    ///
    /// # Errors
    ///
    /// Returns `MissingPrefix`/`InvalidSegment` for bad segment lists and
    /// `DuplicatePrefix` when another entity already owns the same prefix.
    pub fn register(
        &mut self,
        entity: impl Into<String>,
        config: EntityConfig,
    ) -> std::result::Result<(), ConfigError> {
        let entity = entity.into();
        config.validate(&entity, &self.config.separator)?;

        let prefix = config.prefix(&self.config.separator);
        if self
            .entities
            .iter()
            .any(|(name, registered)| registered.prefix == prefix && *name != entity)
        {
            return Err(ConfigError::DuplicatePrefix { prefix });
        }

        let codec = match config.key_mode() {
            KeyMode::Integer => EntityCodec::Integer(HashidCodec::new(
                &self.config.hashid_alphabet,
                config.salt.as_deref().unwrap_or(&self.config.salt),
                config.min_hash_length.unwrap_or(self.config.min_hash_length),
            )),
            KeyMode::Uuid => EntityCodec::Uuid,
        };

        self.entities.insert(
            entity,
            Registered {
                config,
                prefix,
                codec,
            },
        );
        Ok(())
    }

    /// Resolves any of the three input shapes to the internal key.
    ///
    /// Bad input of every kind — unknown characters, overflow, a mismatched
    /// prefix, malformed structure — is a normal miss reported uniformly as
    /// `NotFound`, never a panic. Only an unregistered entity type escapes
    /// the fold, as a `Config` error.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no interpretation of the input resolves, or
    /// `Config` for an unregistered entity type.
    pub fn lookup_any(&self, entity: &str, input: &str) -> Result<InternalKey> {
        let registered = self.entry(entity)?;
        self.resolve(registered, input).map_err(|err| match err {
            PublicIdError::Config(_) => err,
            _ => PublicIdError::NotFound {
                input: input.to_string(),
            },
        })
    }

    /// The full public identifier, `prefix{separator}hash`.
    ///
    /// # Errors
    ///
    /// Returns `Config` for an unregistered entity type and
    /// `KeyModeMismatch` when the key variant does not match the entity's
    /// registered key mode.
    pub fn to_public_id(&self, entity: &str, key: InternalKey) -> Result<String> {
        let registered = self.entry(entity)?;
        let hash = self.encode_key(registered, entity, key)?;
        Ok(compose::compose(
            &registered.config.segments,
            &hash,
            &self.config.separator,
        ))
    }

    /// The bare encoded hash, without prefix.
    ///
    /// # Errors
    ///
    /// Same conditions as `to_public_id`.
    pub fn encoded_id(&self, entity: &str, key: InternalKey) -> Result<String> {
        let registered = self.entry(entity)?;
        self.encode_key(registered, entity, key)
    }

    /// The route-facing form: the full public ID or the bare hash,
    /// per the entity's `prefix_in_routes` override falling back to the
    /// directory-wide default.
    ///
    /// # Errors
    ///
    /// Same conditions as `to_public_id`.
    pub fn route_param(&self, entity: &str, key: InternalKey) -> Result<String> {
        let registered = self.entry(entity)?;
        let use_prefix = registered
            .config
            .prefix_in_routes
            .unwrap_or(self.config.prefix_in_routes);
        if use_prefix {
            self.to_public_id(entity, key)
        } else {
            self.encoded_id(entity, key)
        }
    }

    /// Whether the input is a well-formed full public identifier for this
    /// entity: prefixed with its prefix and carrying a decodable hash.
    pub fn is_valid_public_id(&self, entity: &str, input: &str) -> bool {
        let Ok(registered) = self.entry(entity) else {
            return false;
        };
        match plan(input, registered.config.key_mode(), &self.config.separator) {
            Ok(ResolutionPlan::FullPublicId { prefix, hash }) => {
                prefix == registered.prefix && self.decode_hash(registered, &hash).is_ok()
            }
            _ => false,
        }
    }

    fn entry(&self, entity: &str) -> Result<&Registered> {
        self.entities
            .get(entity)
            .ok_or_else(|| ConfigError::UnknownEntity {
                entity: entity.to_string(),
            })
            .map_err(PublicIdError::from)
    }

    /// The dispatch state machine over a classified input.
    fn resolve(&self, registered: &Registered, input: &str) -> Result<InternalKey> {
        match plan(
            input,
            registered.config.key_mode(),
            &self.config.separator,
        )? {
            ResolutionPlan::FullPublicId { prefix, hash } => {
                // A mismatched prefix never resolves, even if the hash part
                // would decode under another entity's config.
                if prefix != registered.prefix {
                    return Err(PublicIdError::PrefixMismatch {
                        expected: registered.prefix.clone(),
                        found: prefix,
                    });
                }
                self.decode_hash(registered, &hash)
            }
            ResolutionPlan::BareEncodedKey(bare) => match self.decode_hash(registered, &bare) {
                Ok(key) => Ok(key),
                Err(err) => {
                    raw_fallback(registered.config.key_mode(), &bare).ok_or(err)
                }
            },
            ResolutionPlan::RawInternalKey(raw) => parse_raw(registered.config.key_mode(), &raw),
        }
    }

    fn decode_hash(&self, registered: &Registered, hash: &str) -> Result<InternalKey> {
        match &registered.codec {
            EntityCodec::Integer(codec) => codec.decode(hash).map(InternalKey::Integer),
            EntityCodec::Uuid => {
                base62::decode_uuid(hash, &self.config.base62_alphabet).map(InternalKey::Uuid)
            }
        }
    }

    fn encode_key(
        &self,
        registered: &Registered,
        entity: &str,
        key: InternalKey,
    ) -> Result<String> {
        match (&registered.codec, key) {
            (EntityCodec::Integer(codec), InternalKey::Integer(value)) => Ok(codec.encode(value)),
            (EntityCodec::Uuid, InternalKey::Uuid(uuid)) => {
                Ok(base62::encode_uuid(uuid, &self.config.base62_alphabet))
            }
            _ => Err(PublicIdError::KeyModeMismatch {
                entity: entity.to_string(),
            }),
        }
    }
}

/// Last-resort interpretation of a bare string that failed hash decoding:
/// in an integer-key context a pure base-10 digit string is the raw key
/// itself. UUID raw keys were already recognized by shape during planning.
fn raw_fallback(mode: KeyMode, input: &str) -> Option<InternalKey> {
    match mode {
        KeyMode::Integer => {
            if input.bytes().all(|b| b.is_ascii_digit()) {
                input.parse::<u64>().ok().map(InternalKey::Integer)
            } else {
                None
            }
        }
        KeyMode::Uuid => None,
    }
}

fn parse_raw(mode: KeyMode, input: &str) -> Result<InternalKey> {
    match mode {
        KeyMode::Uuid => Uuid::parse_str(input)
            .map(InternalKey::Uuid)
            .map_err(|_| PublicIdError::MalformedInput {
                input: input.to_string(),
            }),
        KeyMode::Integer => {
            input
                .parse::<u64>()
                .map(InternalKey::Integer)
                .map_err(|_| PublicIdError::MalformedInput {
                    input: input.to_string(),
                })
        }
    }
}
