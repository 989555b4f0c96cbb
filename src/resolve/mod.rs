//! Flattening scene graphs into placed instances.
//!
//! `Resolver` walks downward from a set of nodes and produces every placed
//! terminal instance, while `Locator` walks upward from a single node to find
//! its placement in world space. Both agree on the placement of any node they
//! can both reach.

pub mod bottom_up;
pub mod stop;
pub mod top_down;

pub use self::bottom_up::Locator;
pub use self::top_down::{AncestorPath, ElementInstance, ResolvedInstance, Resolver};
