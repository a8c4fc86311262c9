/// The type of a system segment or gate descriptor (S flag clear).
///
/// Covers every value of the 4-bit type field in 32-bit protected mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SystemSegmentType {
    /// Reserved.
    Reserved = 0,

    /// 16-bit TSS (available).
    Tss16Available = 1,

    /// Local Descriptor Table.
    Ldt = 2,

    /// 16-bit TSS (busy).
    Tss16Busy = 3,

    /// 16-bit call gate.
    CallGate16 = 4,

    /// Task gate.
    TaskGate = 5,

    /// 16-bit interrupt gate.
    InterruptGate16 = 6,

    /// 16-bit trap gate.
    TrapGate16 = 7,

    /// Reserved.
    Reserved1 = 8,

    /// 32-bit TSS (available).
    Tss32Available = 9,

    /// Reserved.
    Reserved2 = 10,

    /// 32-bit TSS (busy).
    Tss32Busy = 11,

    /// 32-bit call gate.
    CallGate32 = 12,

    /// Reserved.
    Reserved3 = 13,

    /// 32-bit interrupt gate.
    InterruptGate32 = 14,

    /// 32-bit trap gate.
    TrapGate32 = 15,
}

impl SystemSegmentType {
    /// Decodes the type from the low 4 bits of `typ`.
    pub fn from_bits(typ: u8) -> Self {
        match typ & 0b1111 {
            0 => Self::Reserved,
            1 => Self::Tss16Available,
            2 => Self::Ldt,
            3 => Self::Tss16Busy,
            4 => Self::CallGate16,
            5 => Self::TaskGate,
            6 => Self::InterruptGate16,
            7 => Self::TrapGate16,
            8 => Self::Reserved1,
            9 => Self::Tss32Available,
            10 => Self::Reserved2,
            11 => Self::Tss32Busy,
            12 => Self::CallGate32,
            13 => Self::Reserved3,
            14 => Self::InterruptGate32,
            _ => Self::TrapGate32,
        }
    }

    /// Returns the raw 4-bit type value.
    pub fn bits(self) -> u8 {
        self as u8
    }

    /// Checks if the type is one of the reserved encodings.
    pub fn is_reserved(self) -> bool {
        matches!(
            self,
            Self::Reserved | Self::Reserved1 | Self::Reserved2 | Self::Reserved3
        )
    }

    /// Checks if the type describes a gate rather than a segment.
    pub fn is_gate(self) -> bool {
        matches!(
            self,
            Self::CallGate16
                | Self::TaskGate
                | Self::InterruptGate16
                | Self::TrapGate16
                | Self::CallGate32
                | Self::InterruptGate32
                | Self::TrapGate32
        )
    }

    /// Checks if the type describes a task-state segment.
    pub fn is_tss(self) -> bool {
        matches!(
            self,
            Self::Tss16Available | Self::Tss16Busy | Self::Tss32Available | Self::Tss32Busy
        )
    }
}

impl From<SystemSegmentType> for u8 {
    fn from(value: SystemSegmentType) -> Self {
        value.bits()
    }
}
