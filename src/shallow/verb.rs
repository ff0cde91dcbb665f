//! Frame classification for the shallow-update section.

use crate::frame::Frame;
use crate::types::COMMIT_ID_HEX_LEN;

pub const SHALLOW_TOKEN: &[u8] = b"shallow ";
pub const UNSHALLOW_TOKEN: &[u8] = b"unshallow ";

/// `"shallow "` + 40 hex characters
pub const SHALLOW_LINE_LEN: usize = SHALLOW_TOKEN.len() + COMMIT_ID_HEX_LEN;

/// `"unshallow "` + 40 hex characters
pub const UNSHALLOW_LINE_LEN: usize = UNSHALLOW_TOKEN.len() + COMMIT_ID_HEX_LEN;

/// What a frame means to the decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb<'a> {
    /// Line starting with `"shallow "`; carries the whole line
    Shallow(&'a [u8]),
    /// Line starting with `"unshallow "`; carries the whole line
    Unshallow(&'a [u8]),
    Flush,
    /// Anything else, including delim and response-end frames
    Other,
}

pub fn classify(frame: &Frame) -> Verb<'_> {
    match frame {
        Frame::Flush => Verb::Flush,
        Frame::Data(line) if line.starts_with(SHALLOW_TOKEN) => Verb::Shallow(&line[..]),
        Frame::Data(line) if line.starts_with(UNSHALLOW_TOKEN) => Verb::Unshallow(&line[..]),
        Frame::Data(_) | Frame::Delim | Frame::ResponseEnd => Verb::Other,
    }
}
