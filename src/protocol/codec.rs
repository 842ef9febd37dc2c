//! Protocol codec
//!
//! Framing of outgoing commands and decoding of replies.
//!
//! ## Wire Format
//!
//! ```text
//! wrap off:        *pow=on#
//! wrap on:   <CR>  *pow=on#  <CR>
//! ```
//!
//! Replies carry no framing at all: whatever bytes arrive before the peer
//! goes quiet form the reply.

use bytes::{BufMut, Bytes, BytesMut};

use super::Command;

/// Carriage return byte used in wrap mode
pub const CR: u8 = 0x0D;

/// Substituted for every reply byte outside 7-bit ASCII
pub const REPLACEMENT: char = char::REPLACEMENT_CHARACTER;

/// Encode a command into the bytes written to the socket
pub fn encode_frame(command: &Command, wrap_cr: bool) -> Bytes {
    let body = command.as_str().as_bytes();

    if !wrap_cr {
        return Bytes::copy_from_slice(body);
    }

    let mut frame = BytesMut::with_capacity(body.len() + 2);
    frame.put_u8(CR);
    frame.put_slice(body);
    frame.put_u8(CR);
    frame.freeze()
}

/// Decode reply bytes as ASCII, replacing anything >= 0x80
pub fn decode_reply(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| if b.is_ascii() { b as char } else { REPLACEMENT })
        .collect()
}
