use crate::error::ConfigError;

/// Which primary-key representation an entity type uses. Selected once at
/// registration; codecs and the dispatcher branch on this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMode {
    Integer,
    Uuid,
}

/// Per-entity public-ID configuration: key mode, prefix segments, and
/// optional overrides of the directory-wide settings.
///
/// Prefix segments are normalized to lowercase on construction. Overrides
/// left unset fall back to the `CodecConfig` values at resolution time.
#[derive(Debug, Clone)]
pub struct EntityConfig {
    pub(crate) key_mode: KeyMode,
    pub(crate) segments: Vec<String>,
    pub(crate) salt: Option<String>,
    pub(crate) min_hash_length: Option<usize>,
    pub(crate) prefix_in_routes: Option<bool>,
}

impl EntityConfig {
    /// An integer-keyed entity with a single prefix token.
    pub fn integer(prefix: impl Into<String>) -> Self {
        Self::with_mode(KeyMode::Integer, prefix.into())
    }

    /// A UUID-keyed entity with a single prefix token.
    pub fn uuid(prefix: impl Into<String>) -> Self {
        Self::with_mode(KeyMode::Uuid, prefix.into())
    }

    fn with_mode(key_mode: KeyMode, prefix: String) -> Self {
        Self {
            key_mode,
            segments: vec![prefix.to_lowercase()],
            salt: None,
            min_hash_length: None,
            prefix_in_routes: None,
        }
    }

    /// Appends a prefix segment, for compositional prefixes like
    /// `int_tool_phn`.
    pub fn add_segment(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into().to_lowercase());
        self
    }

    /// Overrides the global salt for this entity (integer mode).
    pub fn salt(mut self, salt: impl Into<String>) -> Self {
        self.salt = Some(salt.into());
        self
    }

    /// Overrides the global minimum hash length for this entity (integer
    /// mode), e.g. a longer hash for a high-volume table.
    pub fn min_hash_length(mut self, len: usize) -> Self {
        self.min_hash_length = Some(len);
        self
    }

    /// Overrides whether the route-facing short form carries the prefix.
    pub fn prefix_in_routes(mut self, flag: bool) -> Self {
        self.prefix_in_routes = Some(flag);
        self
    }

    pub fn key_mode(&self) -> KeyMode {
        self.key_mode
    }

    /// The full prefix, segments joined with the separator.
    pub fn prefix(&self, separator: &str) -> String {
        self.segments.join(separator)
    }

    /// Registration-time validation: segments must exist, be non-empty, and
    /// be free of the separator.
    pub(crate) fn validate(&self, entity: &str, separator: &str) -> Result<(), ConfigError> {
        if self.segments.is_empty() {
            return Err(ConfigError::MissingPrefix {
                entity: entity.to_string(),
            });
        }
        for segment in &self.segments {
            if segment.is_empty() || segment.contains(separator) {
                return Err(ConfigError::InvalidSegment {
                    segment: segment.clone(),
                });
            }
        }
        Ok(())
    }
}
