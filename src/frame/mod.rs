//! Protocol Frames
//!
//! Discrete pkt-line units handed to the shallow-update decoder. A frame
//! source owns physical framing; consumers only pull whole frames from it.

pub mod pktline;

pub use pktline::PktLineReader;

use crate::error::FrameSourceError;
use bytes::Bytes;

/// A single protocol frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// Line payload with framing (length prefix, trailing newline) removed
    Data(Bytes),
    /// Zero-length section terminator (`0000`)
    Flush,
    /// Protocol v2 section delimiter (`0001`)
    Delim,
    /// Protocol v2 end of response (`0002`)
    ResponseEnd,
}

impl Frame {
    pub fn data(data: impl Into<Bytes>) -> Self {
        Frame::Data(data.into())
    }

    pub fn is_flush(&self) -> bool {
        matches!(self, Frame::Flush)
    }

    pub fn as_data(&self) -> Option<&[u8]> {
        match self {
            Frame::Data(d) => Some(d),
            _ => None,
        }
    }
}

/// Pull-based sequence of frames
///
/// `Ok(None)` is a clean end of stream. An `Err` is terminal: callers must not
/// pull again after receiving one.
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<Option<Frame>, FrameSourceError>;
}

impl<S: FrameSource + ?Sized> FrameSource for &mut S {
    fn next_frame(&mut self) -> Result<Option<Frame>, FrameSourceError> {
        (**self).next_frame()
    }
}

/// In-memory frame source
///
/// Yields the frames it was built from, then either a clean end of stream or
/// the terminal error set with [`VecFrameSource::with_terminal_error`].
pub struct VecFrameSource {
    frames: std::vec::IntoIter<Frame>,
    terminal_error: Option<FrameSourceError>,
    pulled: usize,
}

impl VecFrameSource {
    pub fn new(frames: impl IntoIterator<Item = Frame>) -> Self {
        Self {
            frames: frames.into_iter().collect::<Vec<_>>().into_iter(),
            terminal_error: None,
            pulled: 0,
        }
    }

    /// Report `error` once the frames are exhausted
    pub fn with_terminal_error(mut self, error: FrameSourceError) -> Self {
        self.terminal_error = Some(error);
        self
    }

    /// Number of frames handed out so far
    pub fn pulled(&self) -> usize {
        self.pulled
    }

    /// Frames not yet pulled
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl FrameSource for VecFrameSource {
    fn next_frame(&mut self) -> Result<Option<Frame>, FrameSourceError> {
        match self.frames.next() {
            Some(frame) => {
                self.pulled += 1;
                Ok(Some(frame))
            }
            None => match self.terminal_error.take() {
                Some(err) => Err(err),
                None => Ok(None),
            },
        }
    }
}
