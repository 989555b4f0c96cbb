//! Rest poses of hinged components, as consumed by furl calculations.

use crate::diagnostics::Diagnostics;
use crate::errors::*;
use crate::math::AxisAngle;
use crate::resolve::Locator;
use crate::scene::NodeRef;

/// The world space pose of `node`.
pub fn furl_pose(locator: &Locator, node: NodeRef, diagnostics: &dyn Diagnostics) -> Result<AxisAngle> {
    Ok(locator.global_placement(node, diagnostics)?.to_axis_angle())
}

/// The pose of `hinge` relative to `frame`, e.g. a tail hinge relative to
/// the yaw bearing it turns about.
pub fn hinge_pose(
    locator: &Locator,
    frame: NodeRef,
    hinge: NodeRef,
    diagnostics: &dyn Diagnostics,
) -> Result<AxisAngle> {
    Ok(locator
        .relative_placement(frame, hinge, diagnostics)?
        .to_axis_angle())
}
