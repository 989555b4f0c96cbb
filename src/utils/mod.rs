//! Commonly used utilities like handles and hash containers.

#[macro_use]
pub mod handle;
pub mod hash;

pub use self::handle::HandleIndex;
pub use self::hash::{FastHashMap, FastHashSet};
