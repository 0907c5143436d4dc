use crate::error::{PublicIdError, Result};

/// A public identifier split into its prefix and encoded hash.
///
/// Format: `seg1{separator}seg2{separator}...{separator}hash` — the hash is
/// always the final separator-delimited component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicId {
    pub prefix: String,
    pub hash: String,
}

impl PublicId {
    /// Re-joins prefix and hash with the separator they were split on.
    pub fn join(&self, separator: &str) -> String {
        format!("{}{}{}", self.prefix, separator, self.hash)
    }
}

/// Joins prefix segments and the encoded hash into a public identifier.
pub fn compose<S: AsRef<str>>(segments: &[S], hash: &str, separator: &str) -> String {
    let mut out = String::new();
    for segment in segments {
        out.push_str(segment.as_ref());
        out.push_str(separator);
    }
    out.push_str(hash);
    out
}

/// Splits a public identifier into `(prefix, hash)` on the **last**
/// occurrence of the separator.
///
/// Prefixes may themselves be multi-segment, so the separator can appear
/// many times; only the final segment is guaranteed to be the hash.
///
/// # Errors
///
/// Returns `MalformedInput` when the separator is absent or the hash
/// segment is empty.
pub fn decompose(public_id: &str, separator: &str) -> Result<PublicId> {
    let (prefix, hash) =
        public_id
            .rsplit_once(separator)
            .ok_or_else(|| PublicIdError::MalformedInput {
                input: public_id.to_string(),
            })?;

    if hash.is_empty() {
        return Err(PublicIdError::MalformedInput {
            input: public_id.to_string(),
        });
    }

    Ok(PublicId {
        prefix: prefix.to_string(),
        hash: hash.to_string(),
    })
}
