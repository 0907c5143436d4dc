/// Runtime failures while encoding, decoding, or resolving public IDs.
///
/// Everything driven by user input (`InvalidCharacter`, `Overflow`,
/// `PrefixMismatch`, `MalformedInput`) is folded into `NotFound` at the
/// lookup boundary; the specific variants stay visible on the codec
/// functions themselves. `Config` wraps setup mistakes that surface at a
/// call site (an unregistered entity type) and is never folded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PublicIdError {
    #[error("invalid character in encoded ID: '{ch}'")]
    InvalidCharacter { ch: char },

    #[error("encoded value overflows the key type: {input}")]
    Overflow { input: String },

    #[error("prefix mismatch: expected '{expected}', found '{found}'")]
    PrefixMismatch { expected: String, found: String },

    #[error("malformed public ID: '{input}'")]
    MalformedInput { input: String },

    #[error("key does not match the key mode of entity '{entity}'")]
    KeyModeMismatch { entity: String },

    #[error("ID not found: {input}")]
    NotFound { input: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Setup-time failures. These are programming errors, raised when a config
/// or entity registration is first validated rather than on every call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("separator must not be empty")]
    EmptySeparator,

    #[error("alphabet contains the separator character '{ch}'")]
    SeparatorInAlphabet { ch: char },

    #[error("alphabet contains duplicate character '{ch}'")]
    DuplicateAlphabetChar { ch: char },

    #[error("base62 alphabet must contain exactly {expected} characters, found {found}")]
    WrongAlphabetSize { expected: usize, found: usize },

    #[error("hashid alphabet needs at least {minimum} characters, found {found}")]
    AlphabetTooSmall { minimum: usize, found: usize },

    #[error("no prefix configured for entity '{entity}'")]
    MissingPrefix { entity: String },

    #[error("invalid prefix segment '{segment}'")]
    InvalidSegment { segment: String },

    #[error("prefix '{prefix}' is already registered")]
    DuplicatePrefix { prefix: String },

    #[error("entity type is not registered: '{entity}'")]
    UnknownEntity { entity: String },
}

pub type Result<T> = std::result::Result<T, PublicIdError>;
