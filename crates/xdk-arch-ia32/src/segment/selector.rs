use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::Ring;

/// A segment selector is a 16-bit identifier for a segment. It does not point
/// directly to the segment, but instead points to the segment descriptor that
/// defines the segment.
///
/// ```text
///  15                                    3   2   1   0
/// +---------------------------------------+----+-------+
/// |                 Index                 | TI |  RPL  |
/// +---------------------------------------+----+-------+
/// ```
///
/// Every bit pattern is a valid selector.
#[repr(C)]
#[derive(
    Default, Clone, Copy, PartialEq, Eq, Hash, FromBytes, IntoBytes, Immutable, KnownLayout,
)]
pub struct Selector(pub u16);

/// A descriptor table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DescriptorTable {
    /// The Global Descriptor Table.
    Gdt,

    /// The Local Descriptor Table.
    Ldt,
}

impl Selector {
    /// Size of a descriptor table entry in bytes.
    pub const ENTRY_SIZE: u32 = 8;

    /// Highest index a selector can encode.
    pub const MAX_INDEX: u16 = 0x1fff;

    /// Composes a selector from its parts. `index` is truncated to 13 bits.
    pub fn new(index: u16, table: DescriptorTable, rpl: Ring) -> Self {
        let ti = match table {
            DescriptorTable::Gdt => 0,
            DescriptorTable::Ldt => 1,
        };

        Self(((index & Self::MAX_INDEX) << 3) | (ti << 2) | u16::from(rpl.level()))
    }

    /// Specifies the privilege level of the selector. The privilege level can
    /// range from 0 to 3, with 0 being the most privileged level.
    pub fn request_privilege_level(self) -> Ring {
        Ring::from_bits((self.0 & 0b11) as _)
    }

    /// Specifies the descriptor table to use: clearing this flag selects the
    /// GDT; setting this flag selects the current LDT.
    pub fn table(self) -> DescriptorTable {
        if (self.0 >> 2) & 1 == 0 {
            DescriptorTable::Gdt
        }
        else {
            DescriptorTable::Ldt
        }
    }

    /// Returns `true` if the selector refers to the GDT.
    pub fn is_gdt(self) -> bool {
        self.table() == DescriptorTable::Gdt
    }

    /// Selects one of 8192 descriptors in the GDT or LDT. The processor
    /// multiplies the index value by 8 (the number of bytes in a segment
    /// descriptor) and adds the result to the base address of the GDT or
    /// LDT (from the GDTR or LDTR register, respectively).
    pub fn index(self) -> u16 {
        (self.0 >> 3) & Self::MAX_INDEX
    }

    /// Returns the byte offset of the referenced entry within its table.
    pub fn entry_offset(self) -> u32 {
        u32::from(self.index()) * Self::ENTRY_SIZE
    }

    /// Returns the offset of the last byte of the referenced entry.
    pub(crate) fn entry_end(self) -> u32 {
        self.entry_offset() + (Self::ENTRY_SIZE - 1)
    }
}

impl From<u16> for Selector {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl From<Selector> for u16 {
    fn from(value: Selector) -> Self {
        value.0
    }
}

impl From<u32> for Selector {
    fn from(value: u32) -> Self {
        Self(value as u16)
    }
}

impl From<Selector> for u32 {
    fn from(value: Selector) -> Self {
        value.0 as u32
    }
}

impl std::fmt::Debug for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Selector")
            .field("request_privilege_level", &self.request_privilege_level())
            .field("table", &self.table())
            .field("index", &self.index())
            .finish()
    }
}
