mod connection;
mod mutex;

use crate::{Addresses, Error, Id, RandSource, Result, ThreadRandom, Token};
use connection::Connection;
use core::fmt;
use mutex::{Mutex, MutexGuard};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// A blocking client for a noeq ID server.
///
/// The client holds at most one TCP connection, dialed lazily on the first
/// call and re-dialed (to a freshly, randomly chosen address) after any I/O
/// failure. Every exchange runs under a single [`Mutex`], so a `Client` can be
/// shared across threads: concurrent callers queue up rather than
/// interleaving frames on the wire.
///
/// There is no internal retry and no timeout. A failed call returns one error
/// and leaves the client disconnected; retrying is up to the caller.
///
/// # Example
/// ```no_run
/// use noeq::Client;
///
/// let client = Client::new("", ["127.0.0.1:4444"])?;
/// let ids = client.generate(10)?;
/// assert_eq!(ids.len(), 10);
///
/// let id = client.generate_one()?;
/// # let _ = id;
/// # Ok::<(), noeq::Error>(())
/// ```
pub struct Client<R = ThreadRandom>
where
    R: RandSource<u64>,
{
    state: Mutex<Connection>,
    addrs: Addresses,
    token: Token,
    rand: R,
}

impl Client<ThreadRandom> {
    /// Creates a client for `addrs`, authenticating with `token` on every new
    /// connection. Pass an empty token to skip authentication.
    ///
    /// No network I/O happens here.
    ///
    /// # Errors
    /// - [`Error::NoAddresses`] if `addrs` is empty
    /// - [`Error::InvalidToken`] if `token` is longer than 255 bytes
    pub fn new<I, S>(token: impl AsRef<[u8]>, addrs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_rand(token, addrs, ThreadRandom)
    }
}

impl<R> Client<R>
where
    R: RandSource<u64>,
{
    /// Like [`Client::new`], but draws address picks from `rand`.
    ///
    /// # Errors
    /// Same as [`Client::new`].
    pub fn with_rand<I, S>(token: impl AsRef<[u8]>, addrs: I, rand: R) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let addrs = Addresses::new(addrs)?;
        let token = Token::new(token)?;
        Ok(Self {
            state: Mutex::new(Connection::Disconnected),
            addrs,
            token,
            rand,
        })
    }

    /// Requests `n` IDs from the server and returns them in the order the
    /// server wrote them.
    ///
    /// Connects first if needed. `n == 0` still sends the request byte and
    /// returns an empty vector.
    ///
    /// # Errors
    /// Returns [`Error::Connection`], [`Error::AuthWrite`],
    /// [`Error::RequestWrite`] or [`Error::ResponseRead`] depending on which
    /// step failed. On any error the connection is dropped.
    pub fn generate(&self, n: u8) -> Result<Vec<Id>> {
        let mut ids = vec![0; n as usize];
        self.generate_into(&mut ids)?;
        Ok(ids)
    }

    /// Requests a single ID.
    ///
    /// A zero ID is not an error signal on its own; check the `Result`.
    ///
    /// # Errors
    /// Same as [`Client::generate`].
    pub fn generate_one(&self) -> Result<Id> {
        let ids = self.generate(1)?;
        Ok(ids.first().copied().unwrap_or_default())
    }

    /// Fills `out` with `out.len()` freshly generated IDs.
    ///
    /// On error the contents of `out` are unspecified.
    ///
    /// # Errors
    /// - [`Error::InvalidCount`] if `out` holds more than 255 IDs; nothing is
    ///   sent and the connection is left untouched
    /// - otherwise the same as [`Client::generate`]
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "trace", skip(self, out), fields(count = out.len()))
    )]
    pub fn generate_into(&self, out: &mut [Id]) -> Result<()> {
        if u8::try_from(out.len()).is_err() {
            return Err(Error::InvalidCount { count: out.len() });
        }

        let mut conn = self.lock_state();
        let res = conn
            .connect(&self.addrs, &self.token, &self.rand)
            .and_then(|()| conn.exchange(out));

        if let Err(_e) = &res {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %_e, "generate failed, invalidating connection");
            conn.invalidate();
        }
        res
    }

    /// Whether a connection is currently held.
    pub fn is_connected(&self) -> bool {
        self.lock_state().is_connected()
    }

    /// Closes the current connection, if any. The next call redials.
    pub fn disconnect(&self) {
        self.lock_state().invalidate();
    }

    pub fn addresses(&self) -> &Addresses {
        &self.addrs
    }

    fn lock_state(&self) -> MutexGuard<'_, Connection> {
        #[cfg(feature = "parking-lot")]
        {
            self.state.lock()
        }
        #[cfg(not(feature = "parking-lot"))]
        {
            // A panic mid-exchange leaves the stream at an unknown protocol
            // position; recover the lock but never reuse that stream.
            self.state.lock().unwrap_or_else(|poisoned| {
                self.state.clear_poison();
                let mut conn = poisoned.into_inner();
                conn.invalidate();
                conn
            })
        }
    }
}

impl<R> fmt::Debug for Client<R>
where
    R: RandSource<u64>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("addrs", &self.addrs)
            .field("token", &self.token)
            .finish_non_exhaustive()
    }
}
