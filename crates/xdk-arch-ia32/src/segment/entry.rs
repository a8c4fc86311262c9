use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use super::{DescriptorType, Granularity, OperationSize};
use crate::Ring;

/// A raw 8-byte entry of the GDT or LDT, exactly as stored in memory.
///
/// ```text
///   31          24 23 22 21 20 19   16 15 14 13 12 11    8 7            0
///  +--------------+--+--+--+--+-------+--+-----+--+-------+--------------+
///  | Base 31:24   |G |D |0 |A | Limit |P | DPL |S | Type  | Base 23:16   | +4
///  |              |  |  |  |V | 19:16 |  |     |  |       |              |
///  +--------------+--+--+--+--+-------+--+-----+--+-------+--------------+
///  |          Base 15:00                 |         Limit 15:00           | +0
///  +-------------------------------------+-------------------------------+
/// ```
///
/// Fields are extracted from the little-endian byte sequence with explicit
/// shifts and masks.
#[repr(transparent)]
#[derive(Default, Clone, Copy, PartialEq, Eq, Hash, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct RawDescriptorEntry(pub [u8; 8]);

impl RawDescriptorEntry {
    /// Size of the entry in bytes.
    pub const SIZE: usize = 8;

    /// Bits 0-15 of the segment limit.
    pub fn limit_0_15(self) -> u16 {
        u16::from_le_bytes([self.0[0], self.0[1]])
    }

    /// Bits 0-15 of the segment base.
    pub fn base_0_15(self) -> u16 {
        u16::from_le_bytes([self.0[2], self.0[3]])
    }

    /// Bits 16-23 of the segment base.
    pub fn base_16_23(self) -> u8 {
        self.0[4]
    }

    /// The access byte: type, S, DPL and P.
    pub fn access(self) -> u8 {
        self.0[5]
    }

    /// The flags byte: limit 16-19, AVL, the reserved bit, D/B and G.
    pub fn flags(self) -> u8 {
        self.0[6]
    }

    /// Bits 24-31 of the segment base.
    pub fn base_24_31(self) -> u8 {
        self.0[7]
    }

    /// The 4-bit segment or gate type.
    pub fn typ(self) -> u8 {
        self.access() & 0b1111
    }

    /// The S flag.
    pub fn descriptor_type(self) -> DescriptorType {
        if (self.access() >> 4) & 1 == 0 {
            DescriptorType::System
        }
        else {
            DescriptorType::CodeOrData
        }
    }

    /// The descriptor privilege level.
    pub fn descriptor_privilege_level(self) -> Ring {
        Ring::from_bits(self.access() >> 5)
    }

    /// The P flag.
    pub fn present(self) -> bool {
        (self.access() >> 7) & 1 != 0
    }

    /// Bits 16-19 of the segment limit.
    pub fn limit_16_19(self) -> u8 {
        self.flags() & 0b1111
    }

    /// The AVL bit, available for use by system software.
    pub fn available_bit(self) -> bool {
        (self.flags() >> 4) & 1 != 0
    }

    /// The bit between AVL and D/B. Must be zero for 32-bit descriptors.
    pub fn reserved_bit(self) -> bool {
        (self.flags() >> 5) & 1 != 0
    }

    /// The D/B flag.
    pub fn operation_size(self) -> OperationSize {
        if (self.flags() >> 6) & 1 == 0 {
            OperationSize::Default
        }
        else {
            OperationSize::Big
        }
    }

    /// The G flag.
    pub fn granularity(self) -> Granularity {
        if (self.flags() >> 7) & 1 == 0 {
            Granularity::Byte
        }
        else {
            Granularity::Page4K
        }
    }

    /// The full 32-bit segment base.
    pub fn base(self) -> u32 {
        u32::from(self.base_0_15())
            | (u32::from(self.base_16_23()) << 16)
            | (u32::from(self.base_24_31()) << 24)
    }

    /// The unscaled 20-bit segment limit.
    pub fn raw_limit(self) -> u32 {
        u32::from(self.limit_0_15()) | (u32::from(self.limit_16_19()) << 16)
    }
}

impl From<[u8; 8]> for RawDescriptorEntry {
    fn from(value: [u8; 8]) -> Self {
        Self(value)
    }
}

impl From<u64> for RawDescriptorEntry {
    fn from(value: u64) -> Self {
        Self(value.to_le_bytes())
    }
}

impl From<RawDescriptorEntry> for u64 {
    fn from(value: RawDescriptorEntry) -> Self {
        u64::from_le_bytes(value.0)
    }
}

impl std::fmt::Debug for RawDescriptorEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("RawDescriptorEntry")
            .field("base", &format_args!("0x{:08x}", self.base()))
            .field("raw_limit", &format_args!("0x{:05x}", self.raw_limit()))
            .field("type", &self.typ())
            .field("descriptor_type", &self.descriptor_type())
            .field(
                "descriptor_privilege_level",
                &self.descriptor_privilege_level(),
            )
            .field("present", &self.present())
            .field("available_bit", &self.available_bit())
            .field("operation_size", &self.operation_size())
            .field("granularity", &self.granularity())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_offsets() {
        let entry = RawDescriptorEntry([0x34, 0x12, 0x15, 0x00, 0x34, 0x9a, 0xcf, 0x12]);

        assert_eq!(entry.limit_0_15(), 0x1234);
        assert_eq!(entry.base_0_15(), 0x0015);
        assert_eq!(entry.base_16_23(), 0x34);
        assert_eq!(entry.access(), 0x9a);
        assert_eq!(entry.flags(), 0xcf);
        assert_eq!(entry.base_24_31(), 0x12);

        assert_eq!(entry.base(), 0x1234_0015);
        assert_eq!(entry.raw_limit(), 0xf_1234);
    }

    #[test]
    fn access_byte() {
        // P=1, DPL=3, S=1, type=0b0010
        let entry = RawDescriptorEntry([0, 0, 0, 0, 0, 0xf2, 0, 0]);

        assert!(entry.present());
        assert_eq!(entry.descriptor_privilege_level(), Ring::Ring3);
        assert_eq!(entry.descriptor_type(), DescriptorType::CodeOrData);
        assert_eq!(entry.typ(), 0b0010);

        // P=0, DPL=1, S=0, type=0b1001
        let entry = RawDescriptorEntry([0, 0, 0, 0, 0, 0x29, 0, 0]);

        assert!(!entry.present());
        assert_eq!(entry.descriptor_privilege_level(), Ring::Ring1);
        assert_eq!(entry.descriptor_type(), DescriptorType::System);
        assert_eq!(entry.typ(), 0b1001);
    }

    #[test]
    fn flags_byte() {
        let entry = RawDescriptorEntry([0, 0, 0, 0, 0, 0, 0b0101_1010, 0]);

        assert_eq!(entry.limit_16_19(), 0b1010);
        assert!(entry.available_bit());
        assert!(!entry.reserved_bit());
        assert_eq!(entry.operation_size(), OperationSize::Big);
        assert_eq!(entry.granularity(), Granularity::Byte);

        let entry = RawDescriptorEntry([0, 0, 0, 0, 0, 0, 0b1010_0000, 0]);

        assert!(!entry.available_bit());
        assert!(entry.reserved_bit());
        assert_eq!(entry.operation_size(), OperationSize::Default);
        assert_eq!(entry.granularity(), Granularity::Page4K);
    }

    #[test]
    fn from_u64_is_little_endian() {
        let entry = RawDescriptorEntry::from(0x00cf_9a00_0000_ffff);

        assert_eq!(entry.0, [0xff, 0xff, 0x00, 0x00, 0x00, 0x9a, 0xcf, 0x00]);
        assert_eq!(u64::from(entry), 0x00cf_9a00_0000_ffff);
    }
}
