//! Hash containers keyed with the rustc `FxHasher`. Keys in this crate are
//! handles and short labels, none of them attacker controlled.

pub use rustc_hash::{FxHashMap as FastHashMap, FxHashSet as FastHashSet};
