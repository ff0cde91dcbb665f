use shallow_update::{DecodeError, FrameSourceError, PktLineReader, ShallowUpdate};
use std::io::{Cursor, Read};

use crate::integration::support::{commit, pkt_line, FLUSH};

#[test]
fn decodes_shallow_section_from_byte_stream() {
    let (a, b, c) = (commit(1), commit(2), commit(3));
    let mut stream = Vec::new();
    stream.extend(pkt_line(&format!("shallow {}", a)));
    stream.extend(pkt_line(&format!("unshallow {}", b)));
    stream.extend(pkt_line(&format!("shallow {}", c)));
    stream.extend_from_slice(FLUSH);

    let update = ShallowUpdate::decode_reader(Cursor::new(stream)).unwrap();
    assert_eq!(update.shallows, vec![a, c]);
    assert_eq!(update.unshallows, vec![b]);
}

#[test]
fn stops_reading_at_flush_and_leaves_rest_of_stream() {
    let a = commit(1);
    let mut stream = Vec::new();
    stream.extend(pkt_line(&format!("shallow {}", a)));
    stream.extend_from_slice(FLUSH);
    stream.extend(pkt_line("packfile"));

    let mut reader = PktLineReader::new(Cursor::new(stream));
    let update = ShallowUpdate::decode(&mut reader).unwrap();
    assert_eq!(update.shallows, vec![a]);

    let mut rest = Vec::new();
    reader.into_inner().read_to_end(&mut rest).unwrap();
    assert_eq!(rest, pkt_line("packfile"));
}

#[test]
fn skips_acknowledgements_and_delimiters() {
    let a = commit(5);
    let mut stream = Vec::new();
    stream.extend(pkt_line(&format!("ACK {}", a)));
    stream.extend_from_slice(b"0001");
    stream.extend(pkt_line(&format!("unshallow {}", a)));
    stream.extend_from_slice(FLUSH);

    let update = ShallowUpdate::decode_reader(Cursor::new(stream)).unwrap();
    assert!(update.shallows.is_empty());
    assert_eq!(update.unshallows, vec![a]);
}

#[test]
fn truncated_stream_is_a_frame_source_error() {
    let mut stream = pkt_line(&format!("shallow {}", commit(1)));
    stream.truncate(stream.len() - 10);

    let err = ShallowUpdate::decode_reader(Cursor::new(stream)).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::FrameSource(FrameSourceError::Truncated { .. })
    ));
}

#[test]
fn bad_length_prefix_is_a_frame_source_error() {
    let err = ShallowUpdate::decode_reader(Cursor::new(b"zz10shallow".to_vec())).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::FrameSource(FrameSourceError::InvalidLength(_))
    ));
}

#[test]
fn empty_stream_is_empty_success() {
    let update = ShallowUpdate::decode_reader(Cursor::new(Vec::new())).unwrap();
    assert!(update.is_empty());
}
