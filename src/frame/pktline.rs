//! pkt-line demultiplexer over a blocking byte stream.

use super::{Frame, FrameSource};
use crate::error::FrameSourceError;
use bytes::Bytes;
use std::io::{ErrorKind, Read};
use tracing::trace;

pub const FLUSH_PKT: &[u8; 4] = b"0000";
pub const DELIM_PKT: &[u8; 4] = b"0001";
pub const RESPONSE_END_PKT: &[u8; 4] = b"0002";

/// Size of the hex length prefix
pub const PKT_LEN_SIZE: usize = 4;

/// Largest encoded pkt-line, prefix included
pub const MAX_PKT_LEN: usize = 65520;

/// Reads length-prefixed frames from `R`
///
/// A clean end of input at a frame boundary ends the stream. End of input in
/// the middle of a prefix or payload is reported as [`FrameSourceError::Truncated`].
pub struct PktLineReader<R> {
    reader: R,
}

impl<R: Read> PktLineReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    pub fn read_pkt(&mut self) -> Result<Option<Frame>, FrameSourceError> {
        let mut len_buf = [0u8; PKT_LEN_SIZE];
        let got = self.read_full(&mut len_buf)?;
        if got == 0 {
            return Ok(None);
        }
        if got < PKT_LEN_SIZE {
            return Err(FrameSourceError::Truncated {
                expected: PKT_LEN_SIZE,
                got,
            });
        }

        if &len_buf == FLUSH_PKT {
            return Ok(Some(Frame::Flush));
        }
        if &len_buf == DELIM_PKT {
            return Ok(Some(Frame::Delim));
        }
        if &len_buf == RESPONSE_END_PKT {
            return Ok(Some(Frame::ResponseEnd));
        }

        let len = parse_len(&len_buf)?;
        if len < PKT_LEN_SIZE {
            return Err(FrameSourceError::InvalidLength(format!(
                "pkt-line length too small: {}",
                len
            )));
        }
        if len > MAX_PKT_LEN {
            return Err(FrameSourceError::InvalidLength(format!(
                "pkt-line length {} exceeds maximum {}",
                len, MAX_PKT_LEN
            )));
        }

        let data_len = len - PKT_LEN_SIZE;
        let mut data = vec![0u8; data_len];
        let got = self.read_full(&mut data)?;
        if got < data_len {
            return Err(FrameSourceError::Truncated {
                expected: data_len,
                got,
            });
        }

        if data.last() == Some(&b'\n') {
            data.pop();
        }
        trace!(len, "read pkt-line");
        Ok(Some(Frame::Data(Bytes::from(data))))
    }

    /// Read until `buf` is full or input ends; returns bytes read.
    fn read_full(&mut self, buf: &mut [u8]) -> Result<usize, FrameSourceError> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(filled)
    }
}

impl<R: Read> FrameSource for PktLineReader<R> {
    fn next_frame(&mut self) -> Result<Option<Frame>, FrameSourceError> {
        self.read_pkt()
    }
}

fn parse_len(len_buf: &[u8; PKT_LEN_SIZE]) -> Result<usize, FrameSourceError> {
    let mut raw = [0u8; 2];
    hex::decode_to_slice(len_buf, &mut raw).map_err(|e| {
        FrameSourceError::InvalidLength(format!(
            "{:?}: {}",
            String::from_utf8_lossy(len_buf),
            e
        ))
    })?;
    Ok(u16::from_be_bytes(raw) as usize)
}
