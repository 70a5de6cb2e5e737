#![doc = include_str!("../README.md")]

mod client;
mod config;
mod error;
pub mod protocol;
mod rand;

pub use crate::client::*;
pub use crate::config::*;
pub use crate::error::*;
pub use crate::protocol::{ID_SIZE, Id};
pub use crate::rand::*;
