//! Validated client configuration.
//!
//! [`Addresses`] and [`Token`] are checked once at construction so the client
//! never has to re-validate them on the hot path.

use crate::{Error, RandSource, Result};
use core::fmt;

/// The longest token the auth frame can carry; its length travels in one byte.
pub const MAX_TOKEN_LEN: usize = u8::MAX as usize;

/// A non-empty, ordered list of `host:port` server addresses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Addresses(Vec<String>);

impl Addresses {
    /// Builds an address list, rejecting an empty one.
    ///
    /// # Errors
    /// Returns [`Error::NoAddresses`] if `addrs` yields nothing.
    pub fn new<I, S>(addrs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let addrs: Vec<String> = addrs.into_iter().map(Into::into).collect();
        if addrs.is_empty() {
            return Err(Error::NoAddresses);
        }
        Ok(Self(addrs))
    }

    /// Picks one address uniformly at random. Every call is independent: a
    /// previously failing address can be chosen again immediately.
    pub fn pick<R: RandSource<u64>>(&self, rand: &R) -> &str {
        let idx = (rand.rand() % self.0.len() as u64) as usize;
        &self.0[idx]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// A shared-secret token of at most [`MAX_TOKEN_LEN`] bytes. An empty token
/// disables the auth handshake.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Token(Vec<u8>);

impl Token {
    /// # Errors
    /// Returns [`Error::InvalidToken`] if `token` is longer than
    /// [`MAX_TOKEN_LEN`] bytes.
    pub fn new(token: impl AsRef<[u8]>) -> Result<Self> {
        let token = token.as_ref();
        if token.len() > MAX_TOKEN_LEN {
            return Err(Error::InvalidToken { len: token.len() });
        }
        Ok(Self(token.to_vec()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Keep the secret out of logs.
impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token").field("len", &self.0.len()).finish()
    }
}
