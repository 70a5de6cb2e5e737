//! # noeq wire protocol
//!
//! Three frames travel over a plain byte stream:
//!
//! ```text
//! auth     (client -> server, once per connection, only with a token)
//!   [0x00] [len: u8] [token: len bytes]
//!
//! request  (client -> server, once per generate call)
//!   [count: u8]
//!
//! response (server -> client, once per generate call)
//!   [id: u64 BE] * count
//! ```
//!
//! The auth frame is never acknowledged and the response carries no length
//! prefix; the reader already knows `count` from its own request.
//!
//! Everything here is generic over [`Read`]/[`Write`] so the codec can be
//! exercised against in-memory buffers.

use crate::Token;
use std::io::{self, Read, Write};


/// The identifier type handed out by the server. Its bit layout is defined by
/// the server and is opaque to the client.
pub type Id = u64;

/// Size in bytes of one serialized [`Id`] on the wire.
pub const ID_SIZE: usize = core::mem::size_of::<Id>();

/// Leading byte of the auth frame.
pub const AUTH_MARKER: u8 = 0x00;

/// Encodes the auth frame for `token`, or an empty buffer when the token is
/// empty (no handshake is sent at all).
pub fn encode_auth(token: &Token) -> Vec<u8> {
    if token.is_empty() {
        return Vec::new();
    }
    let bytes = token.as_bytes();
    let mut frame = Vec::with_capacity(2 + bytes.len());
    frame.push(AUTH_MARKER);
    // `Token` caps its length at 255, so this is a lossless binary length byte.
    frame.push(bytes.len() as u8);
    frame.extend_from_slice(bytes);
    frame
}

/// Writes the auth frame for `token` in one `write_all`. A no-op for an empty
/// token.
pub fn write_auth<W: Write + ?Sized>(w: &mut W, token: &Token) -> io::Result<()> {
    let frame = encode_auth(token);
    if frame.is_empty() {
        return Ok(());
    }
    w.write_all(&frame)?;
    w.flush()
}

/// Writes the single-byte request frame asking for `count` IDs.
pub fn write_request<W: Write + ?Sized>(w: &mut W, count: u8) -> io::Result<()> {
    w.write_all(&[count])?;
    w.flush()
}

/// Reads exactly `out.len()` big-endian IDs into `out`.
///
/// A stream that ends before every ID is complete yields
/// [`io::ErrorKind::UnexpectedEof`]; `out` must then be treated as garbage.
pub fn read_ids_into<R: Read + ?Sized>(r: &mut R, out: &mut [Id]) -> io::Result<()> {
    if out.is_empty() {
        return Ok(());
    }
    let mut buf = vec![0u8; out.len() * ID_SIZE];
    r.read_exact(&mut buf)?;
    for (id, chunk) in out.iter_mut().zip(buf.chunks_exact(ID_SIZE)) {
        let mut raw = [0u8; ID_SIZE];
        raw.copy_from_slice(chunk);
        *id = Id::from_be_bytes(raw);
    }
    Ok(())
}

/// Reads a response frame of `count` IDs.
pub fn read_ids<R: Read + ?Sized>(r: &mut R, count: u8) -> io::Result<Vec<Id>> {
    let mut ids = vec![0; count as usize];
    read_ids_into(r, &mut ids)?;
    Ok(ids)
}
