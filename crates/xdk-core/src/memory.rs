use zerocopy::{FromBytes, IntoBytes};

use crate::{Va, XdkError};

/// Read access to the linear address space being inspected.
///
/// The surrounding framework implements this trait over live memory. Every
/// read is all-or-nothing: either the whole buffer is filled, or an error is
/// returned and the buffer contents are unspecified.
pub trait LinearMemory {
    /// Reads `buffer.len()` bytes starting at `address`.
    fn read(&self, address: Va, buffer: &mut [u8]) -> Result<(), XdkError>;

    /// Reads a single byte.
    fn read_u8(&self, address: Va) -> Result<u8, XdkError> {
        let mut buffer = [0u8; 1];
        self.read(address, &mut buffer)?;
        Ok(buffer[0])
    }

    /// Reads a little-endian 16-bit value.
    fn read_u16(&self, address: Va) -> Result<u16, XdkError> {
        let mut buffer = [0u8; 2];
        self.read(address, &mut buffer)?;
        Ok(u16::from_le_bytes(buffer))
    }

    /// Reads a little-endian 32-bit value.
    fn read_u32(&self, address: Va) -> Result<u32, XdkError> {
        let mut buffer = [0u8; 4];
        self.read(address, &mut buffer)?;
        Ok(u32::from_le_bytes(buffer))
    }

    /// Reads a struct from memory.
    fn read_struct<T>(&self, address: Va) -> Result<T, XdkError>
    where
        T: FromBytes + IntoBytes,
        Self: Sized,
    {
        let mut result = T::new_zeroed();
        self.read(address, result.as_mut_bytes())?;
        Ok(result)
    }
}

impl<T> LinearMemory for &T
where
    T: LinearMemory + ?Sized,
{
    fn read(&self, address: Va, buffer: &mut [u8]) -> Result<(), XdkError> {
        (**self).read(address, buffer)
    }
}

/// A captured copy of a contiguous linear memory range.
///
/// Useful for decoding descriptor tables that were dumped earlier, and as a
/// stand-in for live memory in tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySnapshot {
    base: Va,
    data: Vec<u8>,
}

impl MemorySnapshot {
    /// Creates a snapshot whose first byte lives at `base`.
    pub fn new(base: Va, data: impl Into<Vec<u8>>) -> Self {
        Self {
            base,
            data: data.into(),
        }
    }

    /// Returns the address of the first captured byte.
    pub fn base(&self) -> Va {
        self.base
    }

    /// Returns the captured bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Returns the number of captured bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Checks if the snapshot holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn range(&self, address: Va, len: usize) -> Option<std::ops::Range<usize>> {
        let start = usize::try_from(address.checked_offset_from(self.base)?).ok()?;
        let end = start.checked_add(len)?;
        (end <= self.data.len()).then_some(start..end)
    }
}

impl LinearMemory for MemorySnapshot {
    fn read(&self, address: Va, buffer: &mut [u8]) -> Result<(), XdkError> {
        let Some(range) = self.range(address, buffer.len()) else {
            tracing::debug!(
                %address,
                len = buffer.len(),
                base = %self.base,
                size = self.data.len(),
                "read outside of snapshot"
            );
            return Err(XdkError::unmapped(address, buffer.len()));
        };

        tracing::trace!(%address, len = buffer.len(), "snapshot read");
        buffer.copy_from_slice(&self.data[range]);
        Ok(())
    }
}
