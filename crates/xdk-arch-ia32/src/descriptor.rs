use xdk_core::{LinearMemory, Va};

use crate::{
    DescriptorTable, SegmentDescriptor, SegmentDescriptors, SegmentError, Selector,
    SystemSegmentType,
};

/// The location and size of a descriptor table.
///
/// Capturing the register contents (`SGDT`, `SLDT`) is left to the caller;
/// this trait only describes the captured values.
pub trait DescriptorTableRegister {
    /// The linear address of the first byte of the table.
    fn base(&self) -> Va;

    /// The byte limit of the table. The last valid entry starts at
    /// `limit - 7`.
    fn limit(&self) -> u32;

    /// Returns the number of complete 8-byte entries covered by the limit.
    fn entry_count(&self) -> u32 {
        ((u64::from(self.limit()) + 1) / u64::from(Selector::ENTRY_SIZE)) as u32
    }

    /// Checks whether the whole entry referenced by `selector` lies within
    /// the limit.
    fn contains(&self, selector: Selector) -> bool {
        selector.entry_end() <= self.limit()
    }
}

impl<T> DescriptorTableRegister for &T
where
    T: DescriptorTableRegister + ?Sized,
{
    fn base(&self) -> Va {
        (**self).base()
    }

    fn limit(&self) -> u32 {
        (**self).limit()
    }
}

/// Global Descriptor Table Register (GDTR).
///
/// The GDTR is a special register that holds the base address and size of the
/// Global Descriptor Table (GDT). The GDT contains entries telling the CPU
/// about memory segments.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Gdtr {
    /// The linear address of the Global Descriptor Table (GDT).
    pub base: Va,

    /// The byte limit of the GDT.
    pub limit: u32,
}

impl Gdtr {
    /// Returns an iterator over every entry of the GDT.
    pub fn descriptors<'a, M>(&'a self, memory: &'a M) -> SegmentDescriptors<'a, M, Self>
    where
        M: LinearMemory + ?Sized,
    {
        SegmentDescriptors::new(memory, self, DescriptorTable::Gdt)
    }
}

impl DescriptorTableRegister for Gdtr {
    fn base(&self) -> Va {
        self.base
    }

    fn limit(&self) -> u32 {
        self.limit
    }
}

/// Local Descriptor Table Register (LDTR).
///
/// Holds the base address and size of the current Local Descriptor Table,
/// as loaded from an LDT descriptor in the GDT.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Ldtr {
    /// The linear address of the Local Descriptor Table (LDT).
    pub base: Va,

    /// The byte limit of the LDT.
    pub limit: u32,
}

impl Ldtr {
    /// Builds the register contents from a decoded LDT descriptor.
    ///
    /// The descriptor must be a present system descriptor of type
    /// [`SystemSegmentType::Ldt`].
    pub fn from_descriptor(descriptor: &SegmentDescriptor) -> Result<Self, SegmentError> {
        let typ = descriptor.system_segment_type()?;
        if typ != SystemSegmentType::Ldt {
            return Err(SegmentError::UnexpectedSystemType {
                expected: SystemSegmentType::Ldt,
                actual: typ,
            });
        }

        if !descriptor.is_present() {
            return Err(SegmentError::NotPresent {
                selector: descriptor.selector(),
            });
        }

        Ok(Self {
            base: Va(u64::from(descriptor.offset())),
            limit: descriptor.segment_limit(),
        })
    }

    /// Returns an iterator over every entry of the LDT.
    pub fn descriptors<'a, M>(&'a self, memory: &'a M) -> SegmentDescriptors<'a, M, Self>
    where
        M: LinearMemory + ?Sized,
    {
        SegmentDescriptors::new(memory, self, DescriptorTable::Ldt)
    }
}

impl DescriptorTableRegister for Ldtr {
    fn base(&self) -> Va {
        self.base
    }

    fn limit(&self) -> u32 {
        self.limit
    }
}
