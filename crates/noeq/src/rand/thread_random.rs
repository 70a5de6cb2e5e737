use crate::RandSource;
use ::rand::{Rng, rng};

/// A `RandSource` backed by the thread-local RNG (`rand::rng()`).
///
/// This type does **not** store the RNG itself; it reaches for the calling
/// thread's generator on each call, so it is `Send + Sync` and can live inside
/// a client shared across threads.
#[derive(Default, Clone, Copy, Debug)]
pub struct ThreadRandom;

impl RandSource<u64> for ThreadRandom {
    fn rand(&self) -> u64 {
        rng().random()
    }
}
