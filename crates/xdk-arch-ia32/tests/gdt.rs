use tracing_subscriber::filter::LevelFilter;
use xdk_arch_ia32::{
    DescriptorKind, DescriptorTable, DescriptorTableRegister as _, Gdtr, Ldtr, Ring,
    SegmentDescriptor, SegmentError, SegmentKind, Selector, SystemSegmentType,
};
use xdk_core::{MemorySnapshot, Va};

const GDT_BASE: u64 = 0x0080_0000;
const LDT_BASE: u64 = 0x0080_1000;
const TSS_BASE: u64 = 0x0080_2000;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(LevelFilter::TRACE)
        .with_test_writer()
        .try_init();
}

/// A typical 32-bit protected mode layout: flat ring 0 and ring 3
/// code/data, a TSS, and an LDT with two user segments.
fn guest() -> (MemorySnapshot, Gdtr) {
    let gdt: [u64; 7] = [
        0x0000_0000_0000_0000, // null
        0x00cf_9a00_0000_ffff, // 0x08 kernel code
        0x00cf_9200_0000_ffff, // 0x10 kernel data
        0x00cf_fa00_0000_ffff, // 0x18 user code
        0x00cf_f200_0000_ffff, // 0x20 user data
        0x0000_8980_2000_0067, // 0x28 TSS32, base 0x00802000, limit 0x67
        0x0000_8280_1000_000f, // 0x30 LDT, base 0x00801000, limit 0x0f
    ];

    let ldt: [u64; 2] = [
        0x0040_f600_0000_0fff, // 0x04 ring 3 expand-down read/write data
        0x0040_fe40_0000_0fff, // 0x0c ring 3 conforming execute/read code, base 0x00400000
    ];

    let mut memory = vec![0u8; 0x3000];
    for (index, entry) in gdt.iter().enumerate() {
        let offset = index * 8;
        memory[offset..offset + 8].copy_from_slice(&entry.to_le_bytes());
    }
    for (index, entry) in ldt.iter().enumerate() {
        let offset = (LDT_BASE - GDT_BASE) as usize + index * 8;
        memory[offset..offset + 8].copy_from_slice(&entry.to_le_bytes());
    }

    let gdtr = Gdtr {
        base: Va(GDT_BASE),
        limit: (gdt.len() * 8 - 1) as u32,
    };

    (MemorySnapshot::new(Va(GDT_BASE), memory), gdtr)
}

#[test]
fn walk_gdt() -> Result<(), SegmentError> {
    init_tracing();

    let (memory, gdtr) = guest();

    let descriptors = gdtr.descriptors(&memory);
    assert_eq!(descriptors.len(), 7);

    let descriptors = descriptors.collect::<Result<Vec<_>, _>>()?;

    let null = &descriptors[0];
    assert!(!null.is_present());
    assert_eq!(null.selector(), Selector(0x0000));

    for (descriptor, dpl, code) in [
        (&descriptors[1], Ring::KERNEL_MODE, true),
        (&descriptors[2], Ring::KERNEL_MODE, false),
        (&descriptors[3], Ring::USER_MODE, true),
        (&descriptors[4], Ring::USER_MODE, false),
    ] {
        assert!(descriptor.is_present());
        assert_eq!(descriptor.offset(), 0);
        assert_eq!(descriptor.segment_limit(), 0xffff_ffff);
        assert_eq!(descriptor.descriptor_privilege_level(), dpl);
        assert_eq!(descriptor.is_code()?, code);
    }

    let tss = &descriptors[5];
    assert_eq!(tss.selector(), Selector(0x0028));
    assert_eq!(tss.system_segment_type()?, SystemSegmentType::Tss32Available);
    assert_eq!(tss.offset() as u64, TSS_BASE);
    assert_eq!(tss.segment_limit(), 0x67);

    Ok(())
}

#[test]
fn resolve_ldt_selector() -> Result<(), SegmentError> {
    init_tracing();

    let (memory, gdtr) = guest();

    let ldt = SegmentDescriptor::new(&memory, &gdtr, Selector(0x0030))?;
    let ldtr = Ldtr::from_descriptor(&ldt)?;
    assert_eq!(ldtr.base(), Va(LDT_BASE));
    assert_eq!(ldtr.limit(), 0x0f);
    assert_eq!(ldtr.entry_count(), 2);

    let selector = Selector(0x000f);
    assert_eq!(selector.table(), DescriptorTable::Ldt);
    assert_eq!(selector.request_privilege_level(), Ring::USER_MODE);

    let code = SegmentDescriptor::new(&memory, &ldtr, selector)?;
    assert_eq!(code.offset(), 0x0040_0000);
    assert_eq!(code.segment_limit(), 0x0fff);
    assert!(code.is_code()?);
    assert!(code.is_code_conforming()?);
    assert!(!code.is_code_execute_only()?);

    let data = SegmentDescriptor::new(&memory, &ldtr, Selector(0x0007))?;
    assert!(matches!(data.kind(), SegmentKind::Data(_)));
    assert!(data.is_data_expand_down()?);
    assert!(!data.is_data_read_only()?);

    // The LDT holds only two entries.
    assert!(matches!(
        SegmentDescriptor::new(&memory, &ldtr, Selector(0x0017)),
        Err(SegmentError::OutOfRangeSelector { limit: 0x0f, .. })
    ));

    Ok(())
}

#[test]
fn walk_ldt() -> Result<(), SegmentError> {
    init_tracing();

    let (memory, gdtr) = guest();
    let ldt = SegmentDescriptor::new(&memory, &gdtr, Selector(0x0030))?;
    let ldtr = Ldtr::from_descriptor(&ldt)?;

    let selectors = ldtr
        .descriptors(&memory)
        .map(|descriptor| descriptor.map(|descriptor| descriptor.selector()))
        .collect::<Result<Vec<_>, _>>()?;

    assert_eq!(selectors, [Selector(0x0004), Selector(0x000c)]);

    Ok(())
}

#[test]
fn ldtr_requires_ldt_descriptor() -> Result<(), SegmentError> {
    let (memory, gdtr) = guest();

    let tss = SegmentDescriptor::new(&memory, &gdtr, Selector(0x0028))?;
    assert!(matches!(
        Ldtr::from_descriptor(&tss),
        Err(SegmentError::UnexpectedSystemType {
            expected: SystemSegmentType::Ldt,
            actual: SystemSegmentType::Tss32Available,
        })
    ));

    let code = SegmentDescriptor::new(&memory, &gdtr, Selector(0x0008))?;
    assert!(matches!(
        Ldtr::from_descriptor(&code),
        Err(SegmentError::WrongDescriptorKind {
            expected: DescriptorKind::System,
            actual: DescriptorKind::Code,
        })
    ));

    // Clear the present flag of the LDT descriptor.
    let mut entry = SegmentDescriptor::new(&memory, &gdtr, Selector(0x0030))?.entry();
    entry.0[5] &= 0x7f;
    let not_present = SegmentDescriptor::from_entry(Selector(0x0030), entry);
    assert!(matches!(
        Ldtr::from_descriptor(&not_present),
        Err(SegmentError::NotPresent {
            selector: Selector(0x0030)
        })
    ));

    Ok(())
}

#[test]
fn truncated_snapshot() {
    let (memory, _) = guest();

    // A GDTR whose limit reaches past the captured bytes.
    let gdtr = Gdtr {
        base: Va(GDT_BASE + 0x2ff8),
        limit: 0x0f,
    };

    let results = gdtr.descriptors(&memory).collect::<Vec<_>>();
    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    assert!(matches!(results[1], Err(SegmentError::Memory(_))));
}
