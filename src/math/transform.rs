use approx::{AbsDiffEq, RelativeEq};
use cgmath::{InnerSpace, One, Quaternion, Rad, Rotation3, Vector3, Zero};
use serde::{Deserialize, Serialize};

/// `Transform` is a rigid placement made of a translation and a rotation.
///
/// Composition is ordered: `parent * local` first applies `local`, then `parent`,
/// so a node placed inside an assembly is written `assembly * node`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f64>,
    pub rotation: Quaternion<f64>,
}

impl Default for Transform {
    fn default() -> Self {
        Transform {
            position: Vector3::zero(),
            rotation: Quaternion::one(),
        }
    }
}

impl ::std::ops::Mul for Transform {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Transform {
            position: self.rotation * rhs.position + self.position,
            rotation: self.rotation * rhs.rotation,
        }
    }
}

/// The external representation of a placement: where the origin lands and
/// how the frame is turned about a single axis.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct AxisAngle {
    pub position: Vector3<f64>,
    pub axis: Vector3<f64>,
    pub angle: Rad<f64>,
}

impl Transform {
    /// The identity placement.
    #[inline]
    pub fn identity() -> Self {
        Transform::default()
    }

    /// A pure translation.
    #[inline]
    pub fn from_position<T>(position: T) -> Self
    where
        T: Into<Vector3<f64>>,
    {
        Transform {
            position: position.into(),
            rotation: Quaternion::one(),
        }
    }

    /// A translation followed by a rotation of `angle` about `axis`.
    pub fn from_axis_angle<T1, T2, A>(position: T1, axis: T2, angle: A) -> Self
    where
        T1: Into<Vector3<f64>>,
        T2: Into<Vector3<f64>>,
        A: Into<Rad<f64>>,
    {
        let axis: Vector3<f64> = axis.into();
        let rotation = if axis.magnitude2() <= ::std::f64::EPSILON {
            Quaternion::one()
        } else {
            Quaternion::from_axis_angle(axis.normalize(), angle)
        };

        Transform {
            position: position.into(),
            rotation,
        }
    }

    /// Returns a transform that "un-does" this one.
    #[inline]
    pub fn inverse(self) -> Self {
        let r = self.rotation.conjugate();
        let d = r * self.position * -1.0;

        Transform {
            position: d,
            rotation: r,
        }
    }

    /// Returns true if this placement neither moves nor turns anything.
    pub fn is_identity(&self) -> bool {
        self.abs_diff_eq(&Transform::identity(), 1e-12)
    }

    /// Decomposes the rotation into a single axis and an angle in `[0, pi]`.
    ///
    /// A rotation-free placement reports the z axis with a zero angle.
    pub fn to_axis_angle(&self) -> AxisAngle {
        let mut q = self.rotation.normalize();
        if q.s < 0.0 {
            q = q * -1.0;
        }

        let sin_half = q.v.magnitude();
        if sin_half <= 1e-12 {
            return AxisAngle {
                position: self.position,
                axis: Vector3::unit_z(),
                angle: Rad(0.0),
            };
        }

        AxisAngle {
            position: self.position,
            axis: q.v / sin_half,
            angle: Rad(2.0 * sin_half.atan2(q.s)),
        }
    }
}

impl From<AxisAngle> for Transform {
    fn from(v: AxisAngle) -> Self {
        Transform::from_axis_angle(v.position, v.axis, v.angle)
    }
}

impl AbsDiffEq for Transform {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    // Unit quaternions `q` and `-q` describe the same rotation.
    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        let position = (0..3).all(|i| self.position[i].abs_diff_eq(&other.position[i], epsilon));
        let same = |sign: f64| {
            self.rotation.s.abs_diff_eq(&(other.rotation.s * sign), epsilon)
                && (0..3).all(|i| {
                    self.rotation.v[i].abs_diff_eq(&(other.rotation.v[i] * sign), epsilon)
                })
        };

        position && (same(1.0) || same(-1.0))
    }
}

impl RelativeEq for Transform {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        let position = (0..3).all(|i| {
            self.position[i].relative_eq(&other.position[i], epsilon, max_relative)
        });
        let same = |sign: f64| {
            self.rotation
                .s
                .relative_eq(&(other.rotation.s * sign), epsilon, max_relative)
                && (0..3).all(|i| {
                    self.rotation.v[i].relative_eq(
                        &(other.rotation.v[i] * sign),
                        epsilon,
                        max_relative,
                    )
                })
        };

        position && (same(1.0) || same(-1.0))
    }
}
