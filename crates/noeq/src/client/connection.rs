use crate::{Addresses, Error, Id, RandSource, Result, Token, protocol};
use std::io;
use std::net::TcpStream;

/// The client's view of its single server connection.
///
/// Transitions:
/// - `Disconnected -> Connected` only through [`Connection::connect`], which
///   dials and authenticates as one step.
/// - `Connected -> Disconnected` through [`Connection::invalidate`], after any
///   I/O failure or an explicit disconnect.
#[derive(Debug, Default)]
pub(crate) enum Connection {
    #[default]
    Disconnected,
    Connected { stream: TcpStream, addr: String },
}

impl Connection {
    pub(crate) fn is_connected(&self) -> bool {
        matches!(self, Self::Connected { .. })
    }

    /// Dials a randomly chosen address and sends the auth frame. Does nothing
    /// if already connected.
    ///
    /// On failure the state stays `Disconnected`; a stream that dialed but
    /// failed auth is dropped here rather than kept.
    pub(crate) fn connect<R>(&mut self, addrs: &Addresses, token: &Token, rand: &R) -> Result<()>
    where
        R: RandSource<u64>,
    {
        if self.is_connected() {
            return Ok(());
        }

        let addr = addrs.pick(rand);
        let mut stream = TcpStream::connect(addr).map_err(|source| Error::Connection {
            addr: addr.to_owned(),
            source,
        })?;
        // One byte out, a few bytes back: don't let Nagle hold the request.
        let _ = stream.set_nodelay(true);

        protocol::write_auth(&mut stream, token).map_err(Error::AuthWrite)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(addr, authenticated = !token.is_empty(), "connected");

        *self = Self::Connected {
            stream,
            addr: addr.to_owned(),
        };
        Ok(())
    }

    /// Sends one request frame for `out.len()` IDs and reads the response into
    /// `out`. The caller guarantees `out.len() <= 255`.
    pub(crate) fn exchange(&mut self, out: &mut [Id]) -> Result<()> {
        let Self::Connected { stream, .. } = self else {
            return Err(Error::RequestWrite(io::ErrorKind::NotConnected.into()));
        };
        let count = out.len() as u8;
        protocol::write_request(stream, count).map_err(Error::RequestWrite)?;
        protocol::read_ids_into(stream, out).map_err(Error::ResponseRead)
    }

    /// Drops the stream, if any. The next call redials.
    pub(crate) fn invalidate(&mut self) {
        if let Self::Connected { addr: _addr, .. } = core::mem::take(self) {
            #[cfg(feature = "tracing")]
            tracing::debug!(addr = %_addr, "connection dropped");
        }
    }
}
