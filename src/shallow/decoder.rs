//! Shallow/unshallow decoder state machine
//!
//! Pulls frames one at a time until a flush. Recognized verb lines are length
//! checked and their trailing 40 hex characters decoded; any other line is
//! skipped.

use super::verb::{classify, Verb, SHALLOW_LINE_LEN, UNSHALLOW_LINE_LEN};
use super::{DecodeOptions, ShallowUpdate};
use crate::error::{DecodeError, FrameSourceError};
use crate::frame::{Frame, FrameSource};
use crate::types::{CommitId, COMMIT_ID_HEX_LEN};
use tracing::{debug, trace};

/// Decoder lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderState {
    Reading,
    /// Flush seen, or the stream ended cleanly
    Done,
    Failed,
}

/// Single-use decoder for one shallow-update section
#[derive(Debug)]
pub struct ShallowDecoder {
    options: DecodeOptions,
    state: DecoderState,
    update: ShallowUpdate,
}

impl Default for ShallowDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ShallowDecoder {
    pub fn new() -> Self {
        Self::with_options(DecodeOptions::default())
    }

    pub fn with_options(options: DecodeOptions) -> Self {
        Self {
            options,
            state: DecoderState::Reading,
            update: ShallowUpdate::default(),
        }
    }

    pub fn state(&self) -> DecoderState {
        self.state
    }

    /// Drive the decoder over `source` until it terminates.
    ///
    /// Stops pulling as soon as a flush frame arrives. On failure the
    /// accumulated identifiers are discarded.
    pub fn decode<S: FrameSource>(mut self, mut source: S) -> Result<ShallowUpdate, DecodeError> {
        while self.state == DecoderState::Reading {
            let pulled = source.next_frame();
            self.advance(pulled)?;
        }
        Ok(self.update)
    }

    /// Apply one pull result to the state machine.
    ///
    /// A decoder in a terminal state ignores further input.
    pub fn advance(
        &mut self,
        pulled: Result<Option<Frame>, FrameSourceError>,
    ) -> Result<DecoderState, DecodeError> {
        if self.state != DecoderState::Reading {
            return Ok(self.state);
        }

        match self.transition(pulled) {
            Ok(state) => {
                self.state = state;
                Ok(state)
            }
            Err(err) => {
                self.state = DecoderState::Failed;
                self.update = ShallowUpdate::default();
                Err(err)
            }
        }
    }

    fn transition(
        &mut self,
        pulled: Result<Option<Frame>, FrameSourceError>,
    ) -> Result<DecoderState, DecodeError> {
        let frame = match pulled? {
            Some(frame) => frame,
            None => return self.end_of_stream(),
        };

        match classify(&frame) {
            Verb::Shallow(line) => {
                let id = decode_line(line, "shallow", SHALLOW_LINE_LEN)?;
                trace!(commit = %id, "shallow");
                self.update.shallows.push(id);
            }
            Verb::Unshallow(line) => {
                let id = decode_line(line, "unshallow", UNSHALLOW_LINE_LEN)?;
                trace!(commit = %id, "unshallow");
                self.update.unshallows.push(id);
            }
            Verb::Flush => {
                debug!(
                    shallows = self.update.shallows.len(),
                    unshallows = self.update.unshallows.len(),
                    "shallow-update section complete"
                );
                return Ok(DecoderState::Done);
            }
            Verb::Other => {
                trace!(frame = ?frame, "skipping unrecognized frame");
            }
        }
        Ok(DecoderState::Reading)
    }

    // A stream that ends cleanly without a flush still counts as success
    // unless the caller opted into `require_flush`.
    fn end_of_stream(&self) -> Result<DecoderState, DecodeError> {
        let shallows = self.update.shallows.len();
        let unshallows = self.update.unshallows.len();
        if self.options.require_flush {
            return Err(DecodeError::MissingFlush {
                shallows,
                unshallows,
            });
        }
        debug!(shallows, unshallows, "stream ended without flush");
        Ok(DecoderState::Done)
    }
}

fn decode_line(
    line: &[u8],
    verb: &'static str,
    expected_len: usize,
) -> Result<CommitId, DecodeError> {
    if line.len() != expected_len {
        return Err(DecodeError::MalformedLine {
            verb,
            line: line.to_vec(),
            expected_len,
        });
    }

    CommitId::decode_hex(&line[expected_len - COMMIT_ID_HEX_LEN..]).map_err(|source| {
        DecodeError::InvalidIdentifier {
            verb,
            line: line.to_vec(),
            source,
        }
    })
}
