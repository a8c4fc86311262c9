mod descriptor;
pub use self::descriptor::{CodeSegment, DataSegment, SegmentDescriptor, SegmentKind};

mod entry;
pub use self::entry::RawDescriptorEntry;

mod selector;
pub use self::selector::{DescriptorTable, Selector};

mod system;
pub use self::system::SystemSegmentType;

mod table;
pub use self::table::SegmentDescriptors;

/// Determines the type of segment descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DescriptorType {
    /// The descriptor is for a system segment.
    System,

    /// The descriptor is for a code or data segment.
    CodeOrData,
}

/// Determines the default length for effective addresses and operands
/// referenced by instructions in the segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationSize {
    /// 16-bit addresses and 16-bit or 8-bit operands are assumed.
    Default,

    /// 32-bit addresses and 32-bit or 8-bit operands are assumed.
    Big,
}

/// Determines the scaling of the segment limit field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    /// The segment limit is interpreted in byte units.
    Byte,

    /// The segment limit is interpreted in 4-KByte units.
    Page4K,
}

impl Granularity {
    /// Scales a raw 20-bit limit into the offset of the last valid byte.
    ///
    /// With 4-KByte granularity the twelve least significant bits of an
    /// offset are not checked against the limit, so the scaled limit
    /// includes the whole final page.
    pub fn scale(self, raw_limit: u32) -> u32 {
        let raw_limit = raw_limit & 0xf_ffff;

        match self {
            Self::Byte => raw_limit,
            Self::Page4K => (raw_limit << 12) | 0xfff,
        }
    }
}
