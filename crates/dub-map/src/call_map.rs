//! Caller to callee index with per-pair invocation counts.

use crate::string_map::{Iter, StringMap};

/// Initial callee list capacity of a newly seen caller.
pub const INITIAL_CALLEE_CAPACITY: usize = 16;

/// One distinct callee of a caller, with the number of observed calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalleeRecord {
    name: Box<str>,
    count: u64,
}

impl CalleeRecord {
    fn new(name: &str, count: u64) -> Self {
        Self {
            name: Box::from(name),
            count,
        }
    }

    /// Returns the callee name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns how many times the caller was observed calling this callee.
    #[must_use]
    pub const fn count(&self) -> u64 {
        self.count
    }
}

/// The callees of one caller, deduplicated, in first-seen order.
///
/// Lookups scan the list linearly. A single function rarely calls more
/// than a few dozen distinct functions, so a nested table would cost more
/// in allocations than it saves in comparisons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerRecord {
    callees: Vec<CalleeRecord>,
}

impl CallerRecord {
    fn new() -> Self {
        Self {
            callees: Vec::with_capacity(INITIAL_CALLEE_CAPACITY),
        }
    }

    /// Adds `times` observations of `callee`.
    ///
    /// A full list doubles its capacity before a new callee is appended.
    fn observe(&mut self, callee: &str, times: u64) {
        if let Some(record) = self
            .callees
            .iter_mut()
            .find(|record| *record.name == *callee)
        {
            record.count = record.count.saturating_add(times);
            return;
        }

        if self.callees.len() == self.callees.capacity() {
            let additional = self.callees.capacity().max(1);
            self.callees.reserve_exact(additional);
        }
        self.callees.push(CalleeRecord::new(callee, times));
    }

    /// Returns the callees in the order they were first observed.
    #[must_use]
    pub const fn callees(&self) -> &[CalleeRecord] {
        self.callees.as_slice()
    }

    /// Returns the number of distinct callees.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.callees.len()
    }

    /// Returns whether no callee has been recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.callees.is_empty()
    }

    /// Returns the allocated capacity of the callee list.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.callees.capacity()
    }

    /// Returns the observation count for `callee`, if it was ever called.
    #[must_use]
    pub fn count_of(&self, callee: &str) -> Option<u64> {
        self.callees
            .iter()
            .find(|record| *record.name == *callee)
            .map(CalleeRecord::count)
    }
}

/// Aggregated call graph: for every caller, its distinct callees and how
/// often each was called.
///
/// # Invariants
///
/// - Each caller appears once, keyed by its name.
/// - Within a caller, callee names are pairwise distinct.
/// - A callee's count equals the number of [`CallMap::record`] calls made
///   for that exact pair.
///
/// Dropping the map releases every record together with all owned names.
#[derive(Debug, Default)]
pub struct CallMap {
    callers: StringMap<CallerRecord>,
}

impl CallMap {
    /// Creates an empty call map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one observation of `caller` calling `callee`.
    ///
    /// The caller's record is created on first sight. Afterwards exactly one
    /// entry exists for the pair and its count has grown by one.
    pub fn record(&mut self, caller: &str, callee: &str) {
        self.record_times(caller, callee, 1);
    }

    fn record_times(&mut self, caller: &str, callee: &str, times: u64) {
        self.callers
            .get_or_insert_with(caller, CallerRecord::new)
            .observe(callee, times);
    }

    /// Returns the record of `caller`, if it made any recorded call.
    #[must_use]
    pub fn caller(&self, caller: &str) -> Option<&CallerRecord> {
        self.callers.get(caller)
    }

    /// Visits every caller and its record, in table slot order.
    ///
    /// The order is unspecified; consumers that need a stable order must
    /// sort.
    pub fn for_each_caller<F>(&self, mut visitor: F)
    where
        F: FnMut(&str, &CallerRecord),
    {
        for (name, record) in &self.callers {
            visitor(name, record);
        }
    }

    /// Returns an iterator over callers and their records, in slot order.
    #[must_use]
    pub fn callers(&self) -> Iter<'_, CallerRecord> {
        self.callers.iter()
    }

    /// Returns the number of distinct callers.
    #[must_use]
    pub const fn caller_count(&self) -> usize {
        self.callers.len()
    }

    /// Returns whether nothing has been recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.callers.is_empty()
    }

    /// Returns the number of distinct (caller, callee) pairs.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.callers().map(|(_, record)| record.len()).sum()
    }

    /// Returns the total number of recorded observations.
    #[must_use]
    pub fn observation_count(&self) -> u64 {
        self.callers()
            .flat_map(|(_, record)| record.callees())
            .map(CalleeRecord::count)
            .sum()
    }

    /// Folds another map into this one.
    ///
    /// Counts of shared pairs are added. Callees already known to a caller
    /// keep their position; new ones are appended in `other`'s order.
    pub fn merge(&mut self, other: Self) {
        for (caller, record) in other.callers {
            for callee in record.callees {
                self.record_times(&caller, callee.name(), callee.count());
            }
        }
    }
}
