/// A processor privilege level.
///
/// The requested (RPL), current (CPL) and descriptor (DPL) privilege levels
/// share this 2-bit domain. Rings 1 and 2 are legal but unused by
/// convention.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Ring {
    /// Ring 0, the most privileged level.
    #[default]
    Ring0 = 0,

    /// Ring 1.
    Ring1 = 1,

    /// Ring 2.
    Ring2 = 2,

    /// Ring 3, the least privileged level.
    Ring3 = 3,
}

impl Ring {
    /// Kernel mode.
    pub const KERNEL_MODE: Self = Self::Ring0;

    /// User mode.
    pub const USER_MODE: Self = Self::Ring3;

    /// Decodes a privilege level from the two low bits of `bits`.
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Self::Ring0,
            1 => Self::Ring1,
            2 => Self::Ring2,
            _ => Self::Ring3,
        }
    }

    /// Returns the numeric privilege level (0-3).
    pub fn level(self) -> u8 {
        self as u8
    }
}

impl From<Ring> for u8 {
    fn from(value: Ring) -> Self {
        value.level()
    }
}
