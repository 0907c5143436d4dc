use crate::error::{PublicIdError, Result};

/// Characters preferred as inter-number separators; whichever of these the
/// configured alphabet contains are carved out of it during setup.
const SEPARATOR_CANDIDATES: &str = "cfhistuCFHISTU";

/// Target ratio of digit alphabet to separators.
const SEPARATOR_RATIO: f64 = 3.5;

/// One guard character is carved per this many alphabet characters.
const GUARD_DENOMINATOR: usize = 12;

/// Reversible, salt-parameterized obfuscation of a single non-negative
/// integer (the classic hashids transform).
///
/// The salt drives a deterministic shuffle of the digit alphabet, so the
/// same `(value, salt)` always yields the same output while distinct salts
/// yield unrelated outputs. A configured minimum length is reached through
/// guard characters and alphabet padding, never by zero-padding the digits,
/// so the output length does not reveal the magnitude of the value.
///
/// This is an enumeration deterrent, not an authorization mechanism.
#[derive(Debug, Clone)]
pub struct HashidCodec {
    alphabet: Vec<char>,
    separators: Vec<char>,
    guards: Vec<char>,
    salt: Vec<char>,
    min_length: usize,
}

impl HashidCodec {
    /// Builds a codec from an alphabet, salt, and minimum output length.
    ///
    /// The alphabet is expected to be pre-validated (distinct characters,
    /// at least 16 of them); `CodecConfig::validate` enforces this before a
    /// codec is ever constructed.
    pub fn new(alphabet: &str, salt: &str, min_length: usize) -> Self {
        let salt: Vec<char> = salt.chars().collect();
        let mut alphabet: Vec<char> = alphabet.chars().collect();

        let mut separators: Vec<char> = SEPARATOR_CANDIDATES
            .chars()
            .filter(|c| alphabet.contains(c))
            .collect();
        alphabet.retain(|c| !separators.contains(c));
        consistent_shuffle(&mut separators, &salt);

        if separators.is_empty()
            || alphabet.len() as f64 / separators.len() as f64 > SEPARATOR_RATIO
        {
            let mut needed = (alphabet.len() as f64 / SEPARATOR_RATIO).ceil() as usize;
            if needed == 1 {
                needed = 2;
            }
            if needed > separators.len() {
                let take = needed - separators.len();
                separators.extend_from_slice(&alphabet[..take]);
                alphabet.drain(..take);
            } else {
                separators.truncate(needed);
            }
        }

        consistent_shuffle(&mut alphabet, &salt);

        let guard_count = alphabet.len().div_ceil(GUARD_DENOMINATOR);
        let guards;
        if alphabet.len() < 3 {
            guards = separators[..guard_count].to_vec();
            separators.drain(..guard_count);
        } else {
            guards = alphabet[..guard_count].to_vec();
            alphabet.drain(..guard_count);
        }

        Self {
            alphabet,
            separators,
            guards,
            salt,
            min_length,
        }
    }

    /// Encodes a value into an obfuscated string of at least the configured
    /// minimum length. Zero encodes to a non-empty string like any other
    /// value.
    pub fn encode(&self, value: u64) -> String {
        let value_hash = (value % 100) as usize;

        let mut alphabet = self.alphabet.clone();
        let lottery = alphabet[value_hash % alphabet.len()];
        let mut result = vec![lottery];

        shuffle_for_value(&mut alphabet, lottery, &self.salt);
        result.extend(to_digits(value, &alphabet));

        if result.len() < self.min_length {
            let index = (value_hash + result[0] as usize) % self.guards.len();
            result.insert(0, self.guards[index]);

            if result.len() < self.min_length {
                let index = (value_hash + result[2] as usize) % self.guards.len();
                result.push(self.guards[index]);
            }
        }

        let half = alphabet.len() / 2;
        while result.len() < self.min_length {
            let key = alphabet.clone();
            consistent_shuffle(&mut alphabet, &key);

            let mut padded = alphabet[half..].to_vec();
            padded.extend_from_slice(&result);
            padded.extend_from_slice(&alphabet[..half]);
            result = padded;

            if result.len() > self.min_length {
                let excess = result.len() - self.min_length;
                let start = excess / 2;
                result = result[start..start + self.min_length].to_vec();
            }
        }

        result.into_iter().collect()
    }

    /// Decodes an obfuscated string back to its value.
    ///
    /// The decoded value is re-encoded and compared against the input, so a
    /// string produced under a different salt (or otherwise inconsistent)
    /// fails instead of yielding a wrong-but-plausible integer.
    ///
    /// # Errors
    ///
    /// Returns `MalformedInput` for empty or structurally inconsistent
    /// input, `InvalidCharacter` for characters outside the codec's symbol
    /// set, and `Overflow` when the digits exceed `u64::MAX`.
    pub fn decode(&self, input: &str) -> Result<u64> {
        if input.is_empty() {
            return Err(PublicIdError::MalformedInput {
                input: String::new(),
            });
        }

        for ch in input.chars() {
            if !self.alphabet.contains(&ch)
                && !self.separators.contains(&ch)
                && !self.guards.contains(&ch)
            {
                return Err(PublicIdError::InvalidCharacter { ch });
            }
        }

        let chars: Vec<char> = input.chars().collect();
        let outer: Vec<&[char]> = chars.split(|c| self.guards.contains(c)).collect();

        // Guards, when present, bracket the payload: take the middle part.
        let core = match outer.len() {
            2 | 3 => outer[1],
            _ => outer[0],
        };
        let (&lottery, digits) = core.split_first().ok_or_else(|| {
            PublicIdError::MalformedInput {
                input: input.to_string(),
            }
        })?;

        // A hash carrying inter-number separators encodes more than one
        // value, which a single-key codec never produces.
        if digits.iter().any(|c| self.separators.contains(c)) {
            return Err(PublicIdError::MalformedInput {
                input: input.to_string(),
            });
        }

        let mut alphabet = self.alphabet.clone();
        shuffle_for_value(&mut alphabet, lottery, &self.salt);
        let value = from_digits(digits, &alphabet, input)?;

        if self.encode(value) != input {
            return Err(PublicIdError::MalformedInput {
                input: input.to_string(),
            });
        }
        Ok(value)
    }

    /// Minimum output length this codec was built with.
    pub fn min_length(&self) -> usize {
        self.min_length
    }
}

/// Re-shuffles the digit alphabet for one value, keyed by the lottery
/// character, the salt, and the alphabet itself (truncated to alphabet
/// length, as the reference transform does).
fn shuffle_for_value(alphabet: &mut Vec<char>, lottery: char, salt: &[char]) {
    let mut key = Vec::with_capacity(alphabet.len());
    key.push(lottery);
    key.extend_from_slice(salt);
    key.extend_from_slice(alphabet);
    key.truncate(alphabet.len());
    consistent_shuffle(alphabet, &key);
}

/// Salt-driven deterministic shuffle. An empty salt leaves the order as-is.
fn consistent_shuffle(chars: &mut [char], salt: &[char]) {
    if salt.is_empty() {
        return;
    }
    let mut v = 0usize;
    let mut p = 0usize;
    for i in (1..chars.len()).rev() {
        v %= salt.len();
        let n = salt[v] as usize;
        p += n;
        let j = (n + v + p) % i;
        chars.swap(i, j);
        v += 1;
    }
}

fn to_digits(mut value: u64, alphabet: &[char]) -> Vec<char> {
    let base = alphabet.len() as u64;
    let mut digits = Vec::new();
    loop {
        digits.push(alphabet[(value % base) as usize]);
        value /= base;
        if value == 0 {
            break;
        }
    }
    digits.reverse();
    digits
}

fn from_digits(digits: &[char], alphabet: &[char], input: &str) -> Result<u64> {
    if digits.is_empty() {
        return Err(PublicIdError::MalformedInput {
            input: input.to_string(),
        });
    }
    let base = alphabet.len() as u64;
    let mut value: u64 = 0;
    for &ch in digits {
        let index = alphabet
            .iter()
            .position(|&a| a == ch)
            .ok_or(PublicIdError::InvalidCharacter { ch })? as u64;
        value = value
            .checked_mul(base)
            .and_then(|v| v.checked_add(index))
            .ok_or_else(|| PublicIdError::Overflow {
                input: input.to_string(),
            })?;
    }
    Ok(value)
}
