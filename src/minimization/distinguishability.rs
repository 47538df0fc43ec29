use bit_set::BitSet;

/// Symmetric relation over the positions `0..size`, recording which pairs have been shown
/// to be distinguishable. Marks are only ever added, never removed. A position is never
/// distinguishable from itself.
#[derive(Debug, Clone)]
pub(crate) struct DistinguishabilityTable {
    size: usize,
    marks: BitSet,
}

impl DistinguishabilityTable {
    pub(crate) fn new(size: usize) -> Self {
        Self {
            size,
            marks: BitSet::with_capacity(size * size),
        }
    }

    fn slot(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.size && j < self.size);
        let (low, high) = if i < j { (i, j) } else { (j, i) };
        low * self.size + high
    }

    pub(crate) fn is_marked(&self, i: usize, j: usize) -> bool {
        i != j && self.marks.contains(self.slot(i, j))
    }

    /// Marks the pair as distinguishable, returns true if it was not marked before.
    pub(crate) fn mark(&mut self, i: usize, j: usize) -> bool {
        assert_ne!(i, j, "a state is never distinguishable from itself");
        let slot = self.slot(i, j);
        self.marks.insert(slot)
    }

    pub(crate) fn marked_pairs(&self) -> usize {
        self.marks.len()
    }
}
