//! [`Database`]-related implementations.

pub mod memory;

use derive_more::{Display, Error as StdError, From};

pub use self::memory::Memory;

/// Database operation.
pub use common::Handler as Database;

/// [`Database`] error.
#[derive(Clone, Copy, Debug, Display, Eq, From, PartialEq, StdError)]
pub enum Error {
    /// [`Memory`] error.
    #[display("`Memory` error: {_0}")]
    Memory(memory::Error),
}
