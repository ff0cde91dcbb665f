use shallow_update::{CommitId, Frame};

pub fn commit(seed: u8) -> CommitId {
    let mut bytes = [seed; 20];
    bytes[0] = 0xc0;
    CommitId::from_bytes(bytes)
}

pub fn shallow_frame(id: &CommitId) -> Frame {
    Frame::data(format!("shallow {}", id))
}

pub fn unshallow_frame(id: &CommitId) -> Frame {
    Frame::data(format!("unshallow {}", id))
}

/// Encode a data payload as a pkt-line with a trailing newline
pub fn pkt_line(payload: &str) -> Vec<u8> {
    let mut out = format!("{:04x}", payload.len() + 5).into_bytes();
    out.extend_from_slice(payload.as_bytes());
    out.push(b'\n');
    out
}

pub const FLUSH: &[u8] = b"0000";
