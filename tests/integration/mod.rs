//! Integration tests for the shallow-update decoder

mod cli_output;
mod pktline_stream;
mod support;
