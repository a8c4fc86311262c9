use xdk_core::XdkError;

use crate::{Selector, SystemSegmentType};

/// The shape of a descriptor, as required or found by an accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorKind {
    /// A system segment or gate descriptor.
    System,

    /// Either a code or a data segment descriptor.
    CodeOrData,

    /// A code segment descriptor.
    Code,

    /// A data segment descriptor.
    Data,
}

/// Error types for segment operations.
#[derive(thiserror::Error, Debug)]
pub enum SegmentError {
    /// The selector refers to an entry beyond the table limit.
    #[error("Selector {selector:?} out of range (table limit: {limit:#x})")]
    OutOfRangeSelector {
        /// The rejected selector.
        selector: Selector,

        /// The byte limit of the table.
        limit: u32,
    },

    /// A type-specific accessor was called on an incompatible descriptor.
    #[error("Wrong descriptor kind (expected: {expected:?}, actual: {actual:?})")]
    WrongDescriptorKind {
        /// The kind the accessor is defined for.
        expected: DescriptorKind,

        /// The kind of the decoded descriptor.
        actual: DescriptorKind,
    },

    /// A system descriptor of a different type than required was found.
    #[error("Unexpected system segment type (expected: {expected:?}, actual: {actual:?})")]
    UnexpectedSystemType {
        /// The required system segment type.
        expected: SystemSegmentType,

        /// The type of the decoded descriptor.
        actual: SystemSegmentType,
    },

    /// The descriptor has its present flag clear.
    #[error("Segment not present ({selector:?})")]
    NotPresent {
        /// The selector of the descriptor.
        selector: Selector,
    },

    /// Reading the entry from memory failed.
    #[error(transparent)]
    Memory(#[from] XdkError),
}

impl From<SegmentError> for XdkError {
    fn from(value: SegmentError) -> Self {
        match value {
            SegmentError::Memory(err) => err,
            err => XdkError::Arch(err.into()),
        }
    }
}
