use crate::Va;

/// An error that can occur when inspecting memory through the toolkit.
#[derive(thiserror::Error, Debug)]
pub enum XdkError {
    /// The requested range is not backed by readable memory.
    #[error("Memory not mapped ({address}, len: {len})")]
    UnmappedMemory {
        /// The first address of the failed access.
        address: Va,

        /// The length of the failed access.
        len: usize,
    },

    /// An architecture-specific error occurred.
    #[error(transparent)]
    Arch(Box<dyn std::error::Error>),

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Other error.
    #[error("{0}")]
    Other(&'static str),
}

impl XdkError {
    /// Creates a new unmapped memory error.
    pub fn unmapped(address: Va, len: usize) -> Self {
        Self::UnmappedMemory { address, len }
    }
}
