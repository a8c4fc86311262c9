use xdk_core::LinearMemory;

use super::{DescriptorTable, SegmentDescriptor, Selector};
use crate::{DescriptorTableRegister, Ring, SegmentError};

/// An iterator over the entries of a descriptor table.
///
/// Yields one decoded descriptor per complete entry covered by the table
/// limit, in index order, with a ring 0 selector. Each step performs a
/// single 8-byte read; a failed read is yielded as an error and iteration
/// continues with the next entry.
pub struct SegmentDescriptors<'a, M, D>
where
    M: LinearMemory + ?Sized,
    D: DescriptorTableRegister + ?Sized,
{
    memory: &'a M,
    dtr: &'a D,
    table: DescriptorTable,
    next: u16,
    count: u16,
}

impl<'a, M, D> SegmentDescriptors<'a, M, D>
where
    M: LinearMemory + ?Sized,
    D: DescriptorTableRegister + ?Sized,
{
    /// Creates an iterator over the table described by `dtr`.
    ///
    /// `table` is encoded into the selectors of the yielded descriptors.
    pub fn new(memory: &'a M, dtr: &'a D, table: DescriptorTable) -> Self {
        let count = dtr.entry_count().min(u32::from(Selector::MAX_INDEX) + 1) as u16;

        Self {
            memory,
            dtr,
            table,
            next: 0,
            count,
        }
    }
}

impl<M, D> Iterator for SegmentDescriptors<'_, M, D>
where
    M: LinearMemory + ?Sized,
    D: DescriptorTableRegister + ?Sized,
{
    type Item = Result<SegmentDescriptor, SegmentError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.count {
            return None;
        }

        let selector = Selector::new(self.next, self.table, Ring::Ring0);
        self.next += 1;

        Some(SegmentDescriptor::new(self.memory, self.dtr, selector))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::from(self.count - self.next);
        (remaining, Some(remaining))
    }
}

impl<M, D> ExactSizeIterator for SegmentDescriptors<'_, M, D>
where
    M: LinearMemory + ?Sized,
    D: DescriptorTableRegister + ?Sized,
{
}
