//! Core XDK functionality.
//!
//! Provides the linear address type, the [`LinearMemory`] read seam through
//! which architecture decoders fetch raw structures, and the shared error
//! type.

mod address;
mod error;
mod memory;

pub use self::{
    address::Va,
    error::XdkError,
    memory::{LinearMemory, MemorySnapshot},
};
