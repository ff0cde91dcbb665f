//! Core types for shallow-update negotiation.

use crate::error::FormatError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Width of a binary commit identifier (SHA-1)
pub const COMMIT_ID_LEN: usize = 20;

/// Width of the hex text form of a commit identifier
pub const COMMIT_ID_HEX_LEN: usize = COMMIT_ID_LEN * 2;

/// CommitId: 20-byte object name of a commit
///
/// Compared by byte equality. The canonical text form is 40 lowercase hex
/// characters.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommitId([u8; COMMIT_ID_LEN]);

impl CommitId {
    /// The "no identifier" value. Never produced by decoding a real line.
    pub const ZERO: CommitId = CommitId([0u8; COMMIT_ID_LEN]);

    pub const fn from_bytes(bytes: [u8; COMMIT_ID_LEN]) -> Self {
        Self(bytes)
    }

    /// Decode exactly 40 hex characters (either case) into an identifier.
    pub fn decode_hex(input: &[u8]) -> Result<Self, FormatError> {
        if input.len() != COMMIT_ID_HEX_LEN {
            return Err(FormatError::InvalidLength {
                expected: COMMIT_ID_HEX_LEN,
                got: input.len(),
            });
        }

        let mut bytes = [0u8; COMMIT_ID_LEN];
        hex::decode_to_slice(input, &mut bytes).map_err(|e| match e {
            hex::FromHexError::InvalidHexCharacter { c, index } => {
                FormatError::InvalidCharacter { character: c, index }
            }
            _ => FormatError::InvalidLength {
                expected: COMMIT_ID_HEX_LEN,
                got: input.len(),
            },
        })?;
        Ok(Self(bytes))
    }

    /// Lowercase hex text form
    pub fn encode_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; COMMIT_ID_LEN] {
        &self.0
    }

    /// First four bytes in hex, used for log output
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl Default for CommitId {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Debug for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CommitId({})", self.short())
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode_hex())
    }
}

impl FromStr for CommitId {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode_hex(s.as_bytes())
    }
}

impl AsRef<[u8]> for CommitId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for CommitId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode_hex())
    }
}

impl<'de> Deserialize<'de> for CommitId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
