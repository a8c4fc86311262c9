//! Segment selector and descriptor table inspection.
//!
//! This crate bundles the XDK building blocks:
//!
//! - [`xdk_core`] for the linear memory read seam and the shared error type
//! - [`arch::ia32`] (feature `arch-ia32`) for decoding IA-32 selectors and
//!   GDT/LDT entries

pub use xdk_core::*;

/// Architecture-specific decoders.
pub mod arch {
    #[cfg(feature = "arch-ia32")]
    pub use xdk_arch_ia32 as ia32;
}
