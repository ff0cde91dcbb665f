//! Shallow Update: decoder for git shallow-clone negotiation
//!
//! Reads the `shallow <id>` / `unshallow <id>` lines a server sends during
//! fetch negotiation and returns them as two ordered lists of commit
//! identifiers.

pub mod config;
pub mod error;
pub mod frame;
pub mod logging;
pub mod shallow;
pub mod tooling;
pub mod types;

pub use error::{DecodeError, FormatError, FrameSourceError};
pub use frame::{Frame, FrameSource, PktLineReader, VecFrameSource};
pub use shallow::{DecodeOptions, ShallowDecoder, ShallowUpdate};
pub use types::CommitId;
