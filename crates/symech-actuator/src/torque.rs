//! Torque actuators acting between frames.

use std::fmt;

use symech_expr::{Expr, TryIntoExpr};
use symech_kinematics::{Frame, HasFrame, Mechanism, PinJoint, Vector};

use crate::error::ActuatorError;
use crate::loads::Load;
use crate::Actuator;

/// An actuator applying a pure torque about an axis.
///
/// The torque acts on the target frame; if a reaction frame is set, the
/// equal-and-opposite torque acts there, as between the two sides of a
/// motor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TorqueActuator {
    torque: Expr,
    axis: Vector,
    target_frame: Frame,
    reaction_frame: Option<Frame>,
}

impl TorqueActuator {
    /// A torque of magnitude `torque` about `axis`, acting on `target`.
    ///
    /// The axis must be nonzero; it is used as given, so a non-unit axis
    /// scales the applied torque.
    pub fn new(
        torque: impl TryIntoExpr,
        axis: Vector,
        target: impl HasFrame,
    ) -> Result<Self, ActuatorError> {
        if axis.is_zero() {
            return Err(ActuatorError::InvalidAxis);
        }
        Ok(Self {
            torque: torque.try_into_expr()?,
            axis,
            target_frame: target.frame(),
            reaction_frame: None,
        })
    }

    /// Apply the opposite torque to `reaction`.
    #[must_use]
    pub fn with_reaction(mut self, reaction: impl HasFrame) -> Self {
        self.reaction_frame = Some(reaction.frame());
        self
    }

    /// A torque acting across `joint`: on the child frame, with the
    /// reaction on the parent frame, about the joint axis.
    pub fn at_pin_joint(
        torque: impl TryIntoExpr,
        joint: &PinJoint,
    ) -> Result<Self, ActuatorError> {
        Ok(Self::new(torque, joint.axis().clone(), joint.child_frame())?
            .with_reaction(joint.parent_frame()))
    }

    /// The torque magnitude.
    #[must_use]
    pub fn torque(&self) -> &Expr {
        &self.torque
    }

    /// The axis the torque acts about.
    #[must_use]
    pub fn axis(&self) -> &Vector {
        &self.axis
    }

    /// The frame the torque acts on.
    #[must_use]
    pub fn target_frame(&self) -> &Frame {
        &self.target_frame
    }

    /// The frame carrying the reaction torque, if any.
    #[must_use]
    pub fn reaction_frame(&self) -> Option<&Frame> {
        self.reaction_frame.as_ref()
    }
}

impl Actuator for TorqueActuator {
    fn to_loads(&self, _mech: &Mechanism) -> Result<Vec<Load>, ActuatorError> {
        let applied = self.torque.clone() * &self.axis;
        let mut loads = vec![Load::torque(self.target_frame.clone(), applied)];
        if let Some(reaction) = &self.reaction_frame {
            loads.push(Load::torque(
                reaction.clone(),
                -(self.torque.clone()) * &self.axis,
            ));
        }
        Ok(loads)
    }
}

impl fmt::Display for TorqueActuator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TorqueActuator({}, axis={}, target_frame={}",
            self.torque, self.axis, self.target_frame
        )?;
        if let Some(reaction) = &self.reaction_frame {
            write!(f, ", reaction_frame={reaction}")?;
        }
        f.write_str(")")
    }
}
