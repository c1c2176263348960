use crate::wave::module::ModuleId;
use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset of candidate modules for one slot
///
/// Bit `i` is set when the module with catalog index `i` is still possible.
/// Iteration always yields modules in ascending catalog order, which is the
/// superposition order the renderer lays out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateSet {
    bits: BitVec,
}

impl CandidateSet {
    /// Create a set with no candidates
    pub fn new(module_count: usize) -> Self {
        Self {
            bits: bitvec![0; module_count],
        }
    }

    /// Create a set containing every module
    pub fn all(module_count: usize) -> Self {
        Self {
            bits: bitvec![1; module_count],
        }
    }

    /// Create a set holding exactly one module
    pub fn single(module_count: usize, module: ModuleId) -> Self {
        let mut set = Self::new(module_count);
        set.insert(module);
        set
    }

    /// Add a module; out-of-range handles are ignored
    pub fn insert(&mut self, module: ModuleId) {
        if module.index() < self.bits.len() {
            self.bits.set(module.index(), true);
        }
    }

    /// Remove a module
    pub fn remove(&mut self, module: ModuleId) {
        if module.index() < self.bits.len() {
            self.bits.set(module.index(), false);
        }
    }

    /// Test membership
    pub fn contains(&self, module: ModuleId) -> bool {
        self.bits.get(module.index()).as_deref() == Some(&true)
    }

    /// Intersect in place, returning whether any candidate was removed
    pub fn intersect_with(&mut self, other: &Self) -> bool {
        let before = self.count();
        self.bits &= &other.bits;
        self.count() != before
    }

    /// Union in place
    pub fn union_with(&mut self, other: &Self) {
        self.bits |= &other.bits;
    }

    /// True when no candidate remains
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Number of remaining candidates
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// The sole remaining candidate, if collapsed
    pub fn collapsed(&self) -> Option<ModuleId> {
        if self.count() == 1 {
            self.bits.first_one().map(ModuleId::new)
        } else {
            None
        }
    }

    /// Candidates in ascending catalog order
    pub fn iter(&self) -> impl Iterator<Item = ModuleId> + '_ {
        self.bits.iter_ones().map(ModuleId::new)
    }

    /// Candidates collected in ascending catalog order
    pub fn to_vec(&self) -> Vec<ModuleId> {
        self.iter().collect()
    }
}

impl fmt::Display for CandidateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let indices: Vec<usize> = self.iter().map(ModuleId::index).collect();
        write!(f, "CandidateSet({} modules: {indices:?})", self.count())
    }
}
