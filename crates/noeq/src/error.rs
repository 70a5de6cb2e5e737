//! Error types for the noeq client.
//!
//! Construction errors (`NoAddresses`, `InvalidToken`) are raised before any
//! network access. Every other variant wraps the [`std::io::Error`] of the step
//! that failed; whenever one of those is returned from a generate call, the
//! client has already dropped its connection and the next call redials.

use std::io;

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors the noeq client can produce.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The client was constructed without any server address.
    #[error("noeq: no addresses provided")]
    NoAddresses,

    /// The auth token does not fit in the single length byte of the auth
    /// frame.
    #[error("noeq: token > 255 bytes in length (got {len})")]
    InvalidToken { len: usize },

    /// A caller-supplied buffer asked for more IDs than one request frame can
    /// carry.
    #[error("noeq: cannot request {count} ids in one call (max 255)")]
    InvalidCount { count: usize },

    /// Dialing the selected server address failed.
    #[error("noeq: failed to connect to {addr}")]
    Connection {
        addr: String,
        #[source]
        source: io::Error,
    },

    /// Writing the auth frame to a freshly dialed connection failed.
    #[error("noeq: failed to write auth frame")]
    AuthWrite(#[source] io::Error),

    /// Writing the count byte failed.
    #[error("noeq: failed to write request")]
    RequestWrite(#[source] io::Error),

    /// Reading the response failed, including the server closing the stream
    /// before all `8 * n` bytes arrived.
    #[error("noeq: failed to read response")]
    ResponseRead(#[source] io::Error),
}

impl Error {
    /// Returns `true` when the error came from the network rather than from
    /// invalid input. These are the errors worth retrying.
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            Self::Connection { .. } | Self::AuthWrite(_) | Self::RequestWrite(_) | Self::ResponseRead(_)
        )
    }
}
