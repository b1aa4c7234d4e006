//! Joints connecting body frames.

use tracing::debug;

use symech_expr::Expr;

use crate::body::HasFrame;
use crate::error::KinError;
use crate::mechanism::{Frame, Mechanism};
use crate::vector::Vector;

/// A revolute joint: the child frame rotates relative to the parent frame
/// about a fixed axis, by a time-varying coordinate.
#[derive(Debug, Clone)]
pub struct PinJoint {
    name: String,
    parent_frame: Frame,
    child_frame: Frame,
    coordinate: Expr,
    speed: Expr,
    axis: Vector,
}

impl PinJoint {
    /// Connect `child` to `parent`, orienting the child frame about `axis`
    /// by `coordinate`.
    ///
    /// The coordinate must be time-varying; a constant angle is a fixed
    /// rotation, not a joint. The generalized speed is its time derivative.
    pub fn new(
        mech: &mut Mechanism,
        name: &str,
        parent: impl HasFrame,
        child: impl HasFrame,
        coordinate: Expr,
        axis: Vector,
    ) -> Result<Self, KinError> {
        if !coordinate.contains_time() {
            return Err(KinError::NotTimeVarying {
                symbol: coordinate.to_string(),
            });
        }
        let parent_frame = parent.frame();
        let child_frame = child.frame();
        mech.orient_axis(&child_frame, &parent_frame, &axis, &coordinate)?;
        debug!(joint = name, parent = %parent_frame, child = %child_frame, "connected pin joint");
        let speed = coordinate.diff();
        Ok(Self {
            name: name.to_owned(),
            parent_frame,
            child_frame,
            coordinate,
            speed,
            axis,
        })
    }

    /// The joint's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Frame of the parent side.
    #[must_use]
    pub fn parent_frame(&self) -> &Frame {
        &self.parent_frame
    }

    /// Frame of the child side.
    #[must_use]
    pub fn child_frame(&self) -> &Frame {
        &self.child_frame
    }

    /// The joint coordinate (rotation angle).
    #[must_use]
    pub fn coordinate(&self) -> &Expr {
        &self.coordinate
    }

    /// The generalized speed (time derivative of the coordinate).
    #[must_use]
    pub fn speed(&self) -> &Expr {
        &self.speed
    }

    /// The rotation axis.
    #[must_use]
    pub fn axis(&self) -> &Vector {
        &self.axis
    }
}
