use xdk_core::{LinearMemory, XdkError};
use zerocopy::IntoBytes;

use super::{
    DescriptorType, Granularity, OperationSize, RawDescriptorEntry, Selector, SystemSegmentType,
};
use crate::{DescriptorKind, DescriptorTableRegister, Ring, SegmentError};

/// Attributes of a code segment, decoded from the type field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CodeSegment {
    /// The segment can be entered from less privileged rings without a
    /// privilege transition.
    pub conforming: bool,

    /// The segment cannot be read, only executed.
    pub execute_only: bool,

    /// The processor has accessed the segment since software last cleared
    /// the flag.
    pub accessed: bool,
}

/// Attributes of a data segment, decoded from the type field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DataSegment {
    /// Valid offsets lie above the limit rather than below it.
    pub expand_down: bool,

    /// The segment cannot be written.
    pub read_only: bool,

    /// The processor has accessed the segment since software last cleared
    /// the flag.
    pub accessed: bool,
}

/// The shape of a segment descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// A system segment or gate.
    System(SystemSegmentType),

    /// A code segment.
    Code(CodeSegment),

    /// A data segment.
    Data(DataSegment),
}

impl SegmentKind {
    fn decode(entry: RawDescriptorEntry) -> Self {
        let typ = entry.typ();

        if entry.descriptor_type() == DescriptorType::System {
            return Self::System(SystemSegmentType::from_bits(typ));
        }

        let accessed = typ & 0b0001 != 0;
        let bit1 = typ & 0b0010 != 0;
        let bit2 = typ & 0b0100 != 0;

        if typ & 0b1000 != 0 {
            Self::Code(CodeSegment {
                conforming: bit2,
                execute_only: !bit1,
                accessed,
            })
        }
        else {
            Self::Data(DataSegment {
                expand_down: bit2,
                read_only: !bit1,
                accessed,
            })
        }
    }

    fn kind(self) -> DescriptorKind {
        match self {
            Self::System(_) => DescriptorKind::System,
            Self::Code(_) => DescriptorKind::Code,
            Self::Data(_) => DescriptorKind::Data,
        }
    }
}

/// A segment descriptor is a data structure in a GDT or LDT that provides the
/// processor with the size and location of a segment, as well as access control
/// and status information.
///
/// A `SegmentDescriptor` is a decoded snapshot: it is computed once from a
/// single 8-byte read and holds no reference to the table it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentDescriptor {
    selector: Selector,
    entry: RawDescriptorEntry,
    base: u32,
    limit: u32,
    present: bool,
    dpl: Ring,
    kind: SegmentKind,
}

impl SegmentDescriptor {
    /// Reads and decodes the entry referenced by `selector` from the table
    /// described by `dtr`.
    ///
    /// Fails with [`SegmentError::OutOfRangeSelector`] if the entry does not
    /// lie completely within the table limit, in which case no memory is
    /// read. Otherwise exactly 8 bytes are read at
    /// `dtr.base() + selector.index() * 8`.
    ///
    /// The table indicator of `selector` is not consulted; the caller picks
    /// the table.
    pub fn new<M, D>(memory: &M, dtr: &D, selector: Selector) -> Result<Self, SegmentError>
    where
        M: LinearMemory + ?Sized,
        D: DescriptorTableRegister + ?Sized,
    {
        let limit = dtr.limit();
        if !dtr.contains(selector) {
            tracing::debug!(?selector, limit, "selector out of table range");
            return Err(SegmentError::OutOfRangeSelector { selector, limit });
        }

        let address = dtr
            .base()
            .checked_add(u64::from(selector.entry_offset()))
            .ok_or_else(|| XdkError::unmapped(dtr.base(), RawDescriptorEntry::SIZE))?;

        tracing::trace!(?selector, %address, "reading segment descriptor");

        let mut entry = RawDescriptorEntry::default();
        memory.read(address, entry.as_mut_bytes())?;

        Ok(Self::from_entry(selector, entry))
    }

    /// Decodes an entry that was already fetched by the caller.
    ///
    /// No table bounds check takes place: the caller vouches that `entry`
    /// is the in-range entry referenced by `selector`.
    pub fn from_entry(selector: Selector, entry: RawDescriptorEntry) -> Self {
        Self {
            selector,
            entry,
            base: entry.base(),
            limit: entry.granularity().scale(entry.raw_limit()),
            present: entry.present(),
            dpl: entry.descriptor_privilege_level(),
            kind: SegmentKind::decode(entry),
        }
    }

    /// Returns the selector the descriptor was decoded for.
    pub fn selector(&self) -> Selector {
        self.selector
    }

    /// Returns the raw entry the descriptor was decoded from.
    pub fn entry(&self) -> RawDescriptorEntry {
        self.entry
    }

    /// Indicates whether the segment is present in memory.
    pub fn is_present(&self) -> bool {
        self.present
    }

    /// Returns the linear address of byte 0 of the segment.
    pub fn offset(&self) -> u32 {
        self.base
    }

    /// Returns the offset of the last valid byte of the segment, scaled
    /// according to the granularity flag.
    ///
    /// For expand-down data segments the valid range lies above this value.
    pub fn segment_limit(&self) -> u32 {
        self.limit
    }

    /// Returns the unscaled 20-bit limit field.
    pub fn raw_limit(&self) -> u32 {
        self.entry.raw_limit()
    }

    /// Returns the descriptor privilege level.
    pub fn descriptor_privilege_level(&self) -> Ring {
        self.dpl
    }

    /// Returns whether this is a system or a code/data descriptor.
    pub fn descriptor_type(&self) -> DescriptorType {
        match self.kind {
            SegmentKind::System(_) => DescriptorType::System,
            SegmentKind::Code(_) | SegmentKind::Data(_) => DescriptorType::CodeOrData,
        }
    }

    /// Returns `true` for system segment and gate descriptors.
    pub fn is_system(&self) -> bool {
        self.descriptor_type() == DescriptorType::System
    }

    /// Returns the decoded shape of the descriptor.
    pub fn kind(&self) -> SegmentKind {
        self.kind
    }

    /// Returns the type of a system descriptor.
    pub fn system_segment_type(&self) -> Result<SystemSegmentType, SegmentError> {
        match self.kind {
            SegmentKind::System(typ) => Ok(typ),
            _ => Err(self.wrong_kind(DescriptorKind::System)),
        }
    }

    /// Returns `true` for a code segment and `false` for a data segment.
    pub fn is_code(&self) -> Result<bool, SegmentError> {
        match self.kind {
            SegmentKind::Code(_) => Ok(true),
            SegmentKind::Data(_) => Ok(false),
            SegmentKind::System(_) => Err(self.wrong_kind(DescriptorKind::CodeOrData)),
        }
    }

    /// Returns `true` if the data segment expands downward.
    pub fn is_data_expand_down(&self) -> Result<bool, SegmentError> {
        Ok(self.data()?.expand_down)
    }

    /// Returns `true` if the data segment is read-only, `false` if it is
    /// read/write.
    pub fn is_data_read_only(&self) -> Result<bool, SegmentError> {
        Ok(self.data()?.read_only)
    }

    /// Returns `true` if the code segment is conforming.
    pub fn is_code_conforming(&self) -> Result<bool, SegmentError> {
        Ok(self.code()?.conforming)
    }

    /// Returns `true` if the code segment is execute-only, `false` if it is
    /// execute/read.
    pub fn is_code_execute_only(&self) -> Result<bool, SegmentError> {
        Ok(self.code()?.execute_only)
    }

    /// Returns the accessed flag of a code or data segment.
    pub fn is_accessed(&self) -> Result<bool, SegmentError> {
        match self.kind {
            SegmentKind::Code(code) => Ok(code.accessed),
            SegmentKind::Data(data) => Ok(data.accessed),
            SegmentKind::System(_) => Err(self.wrong_kind(DescriptorKind::CodeOrData)),
        }
    }

    /// Returns the AVL bit, available for use by system software.
    pub fn available_bit(&self) -> bool {
        self.entry.available_bit()
    }

    /// Returns the D/B flag.
    pub fn operation_size(&self) -> OperationSize {
        self.entry.operation_size()
    }

    /// Returns the G flag.
    pub fn granularity(&self) -> Granularity {
        self.entry.granularity()
    }

    fn code(&self) -> Result<CodeSegment, SegmentError> {
        match self.kind {
            SegmentKind::Code(code) => Ok(code),
            _ => Err(self.wrong_kind(DescriptorKind::Code)),
        }
    }

    fn data(&self) -> Result<DataSegment, SegmentError> {
        match self.kind {
            SegmentKind::Data(data) => Ok(data),
            _ => Err(self.wrong_kind(DescriptorKind::Data)),
        }
    }

    fn wrong_kind(&self, expected: DescriptorKind) -> SegmentError {
        SegmentError::WrongDescriptorKind {
            expected,
            actual: self.kind.kind(),
        }
    }
}
