//! Shallow Update
//!
//! Decodes the `shallow`/`unshallow` section a server sends during fetch
//! negotiation of a shallow clone or deepen request.

pub mod decoder;
pub mod verb;

pub use decoder::{DecoderState, ShallowDecoder};
pub use verb::{classify, Verb, SHALLOW_LINE_LEN, UNSHALLOW_LINE_LEN};

use crate::error::DecodeError;
use crate::frame::{FrameSource, PktLineReader};
use crate::types::CommitId;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Decoded shallow-update section
///
/// Both lists keep the server's order. They are independent: nothing is
/// deduplicated and an identifier may appear in both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShallowUpdate {
    /// Newly announced shallow boundaries
    #[serde(rename = "shallow")]
    pub shallows: Vec<CommitId>,
    /// Boundaries removed by a deepen
    #[serde(rename = "unshallow")]
    pub unshallows: Vec<CommitId>,
}

impl ShallowUpdate {
    /// Decode from any frame source with default options
    pub fn decode<S: FrameSource>(source: S) -> Result<Self, DecodeError> {
        ShallowDecoder::new().decode(source)
    }

    pub fn decode_with<S: FrameSource>(
        source: S,
        options: DecodeOptions,
    ) -> Result<Self, DecodeError> {
        ShallowDecoder::with_options(options).decode(source)
    }

    /// Decode from a raw pkt-line byte stream
    pub fn decode_reader<R: Read>(reader: R) -> Result<Self, DecodeError> {
        Self::decode(PktLineReader::new(reader))
    }

    pub fn decode_reader_with<R: Read>(
        reader: R,
        options: DecodeOptions,
    ) -> Result<Self, DecodeError> {
        Self::decode_with(PktLineReader::new(reader), options)
    }

    pub fn is_empty(&self) -> bool {
        self.shallows.is_empty() && self.unshallows.is_empty()
    }
}

/// Per-call decoder options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeOptions {
    /// Treat end of stream before a flush as an error (default: false)
    #[serde(default)]
    pub require_flush: bool,
}
