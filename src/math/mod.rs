//! This module contains the math utils that mainly comes from `cgmath`.

pub use cgmath::*;

pub mod transform;
pub use self::transform::{AxisAngle, Transform};

pub mod prelude {
    pub use super::transform::{AxisAngle, Transform};
    pub use cgmath::{Deg, Euler, InnerSpace, One, Quaternion, Rad, Rotation3, Vector3, Zero};
}
