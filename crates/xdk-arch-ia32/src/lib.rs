//! IA-32 segmentation definitions.
//!
//! Decodes segment selectors and the 8-byte entries of the Global and Local
//! Descriptor Tables in 32-bit protected mode.
//!
//! ```
//! use xdk_arch_ia32::{Gdtr, SegmentDescriptor, Selector};
//! use xdk_core::{MemorySnapshot, Va};
//!
//! // Null descriptor followed by a flat 4 GiB ring 0 code segment.
//! let mut gdt = vec![0u8; 8];
//! gdt.extend_from_slice(&0x00cf_9a00_0000_ffffu64.to_le_bytes());
//!
//! let memory = MemorySnapshot::new(Va(0x8000), gdt);
//! let gdtr = Gdtr { base: Va(0x8000), limit: 0x0f };
//!
//! let cs = SegmentDescriptor::new(&memory, &gdtr, Selector(0x0008))?;
//! assert_eq!(cs.offset(), 0);
//! assert_eq!(cs.segment_limit(), 0xffff_ffff);
//! assert!(cs.is_code()?);
//! # Ok::<(), xdk_arch_ia32::SegmentError>(())
//! ```

mod descriptor;
mod error;
mod ring;
mod segment;

pub use self::{
    descriptor::{DescriptorTableRegister, Gdtr, Ldtr},
    error::{DescriptorKind, SegmentError},
    ring::Ring,
    segment::{
        CodeSegment, DataSegment, DescriptorTable, DescriptorType, Granularity, OperationSize,
        RawDescriptorEntry, SegmentDescriptor, SegmentDescriptors, SegmentKind, Selector,
        SystemSegmentType,
    },
};
