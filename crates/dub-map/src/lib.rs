//! Aggregation core for the dub call mapper.
//!
//! This crate holds the two data structures every other part of the
//! toolchain builds on:
//!
//! - [`StringMap`] - an open-addressing hash table keyed by owned strings,
//!   using linear probing and doubling growth once the table is completely
//!   full
//! - [`CallMap`] - the caller to callee index layered on a [`StringMap`],
//!   which deduplicates callees per caller and counts how often each pair
//!   was observed
//!
//! [`SignatureMap`] is a plain [`StringMap`] from a short function name to
//! its display signature, kept alongside a [`CallMap`] by producers so
//! renderers can label nodes.
//!
//! # Example
//!
//! ```
//! use dub_map::CallMap;
//!
//! let mut calls = CallMap::new();
//! calls.record("main", "parse");
//! calls.record("main", "render");
//! calls.record("main", "parse");
//!
//! let main = calls.caller("main").map(|record| record.count_of("parse"));
//! assert_eq!(main, Some(Some(2)));
//! ```
//!
//! The core is single threaded and performs no I/O. Allocation failure is
//! left to the global allocator's failure handler, which aborts the
//! process.

mod call_map;
mod hash;
mod string_map;

pub use call_map::{CallMap, CalleeRecord, CallerRecord, INITIAL_CALLEE_CAPACITY};
pub use hash::hash_key;
pub use string_map::{INITIAL_CAPACITY, IntoIter, Iter, StringMap};

/// Map from a function's short name to its display signature.
pub type SignatureMap = StringMap<String>;

#[cfg(test)]
mod tests;
