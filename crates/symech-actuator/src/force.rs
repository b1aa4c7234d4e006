//! Actuators that act along a pathway.

use std::fmt;

use symech_expr::{Expr, TryIntoExpr};
use symech_kinematics::Mechanism;

use crate::error::ActuatorError;
use crate::loads::Load;
use crate::pathway::Pathway;
use crate::Actuator;

/// An actuator producing an arbitrary force along a pathway.
///
/// The force follows the pathway's sign convention: positive pushes the
/// attachments apart, negative pulls them together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForceActuator<P> {
    force: Expr,
    pathway: P,
}

impl<P: Pathway> ForceActuator<P> {
    /// An actuator applying `force` along `pathway`.
    pub fn new(force: impl TryIntoExpr, pathway: P) -> Result<Self, ActuatorError> {
        Ok(Self {
            force: force.try_into_expr()?,
            pathway,
        })
    }

    /// The force magnitude.
    #[must_use]
    pub fn force(&self) -> &Expr {
        &self.force
    }

    /// The pathway the force acts along.
    #[must_use]
    pub fn pathway(&self) -> &P {
        &self.pathway
    }
}

impl<P: Pathway> Actuator for ForceActuator<P> {
    fn to_loads(&self, mech: &Mechanism) -> Result<Vec<Load>, ActuatorError> {
        self.pathway.to_loads(&self.force, mech)
    }
}

impl<P: fmt::Display> fmt::Display for ForceActuator<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ForceActuator({}, {})", self.force, self.pathway)
    }
}

/// A linear spring along a pathway.
///
/// The force law is `-stiffness * (length - equilibrium_length)`: a
/// stretched spring pulls its attachments together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearSpring<P> {
    stiffness: Expr,
    pathway: P,
    equilibrium_length: Expr,
}

impl<P: Pathway> LinearSpring<P> {
    /// A spring of natural length zero with the given stiffness.
    pub fn new(stiffness: impl TryIntoExpr, pathway: P) -> Result<Self, ActuatorError> {
        Ok(Self {
            stiffness: stiffness.try_into_expr()?,
            pathway,
            equilibrium_length: Expr::zero(),
        })
    }

    /// Set a nonzero natural length.
    pub fn with_equilibrium_length(
        mut self,
        length: impl TryIntoExpr,
    ) -> Result<Self, ActuatorError> {
        self.equilibrium_length = length.try_into_expr()?;
        Ok(self)
    }

    /// The spring stiffness.
    #[must_use]
    pub fn stiffness(&self) -> &Expr {
        &self.stiffness
    }

    /// The pathway the spring acts along.
    #[must_use]
    pub fn pathway(&self) -> &P {
        &self.pathway
    }

    /// The natural (unstretched) length.
    #[must_use]
    pub fn equilibrium_length(&self) -> &Expr {
        &self.equilibrium_length
    }

    /// The spring's current force magnitude.
    pub fn force(&self, mech: &Mechanism) -> Result<Expr, ActuatorError> {
        let stretch = self.pathway.length(mech)? - self.equilibrium_length.clone();
        Ok(-(self.stiffness.clone()) * stretch)
    }
}

impl<P: Pathway> Actuator for LinearSpring<P> {
    fn to_loads(&self, mech: &Mechanism) -> Result<Vec<Load>, ActuatorError> {
        let force = self.force(mech)?;
        self.pathway.to_loads(&force, mech)
    }
}

impl<P: fmt::Display> fmt::Display for LinearSpring<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LinearSpring({}, {}", self.stiffness, self.pathway)?;
        if !self.equilibrium_length.is_zero() {
            write!(f, ", equilibrium_length={}", self.equilibrium_length)?;
        }
        f.write_str(")")
    }
}

/// A linear damper along a pathway.
///
/// The force law is `-damping * extension_velocity`: the damper always
/// opposes the current motion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearDamper<P> {
    damping: Expr,
    pathway: P,
}

impl<P: Pathway> LinearDamper<P> {
    /// A damper with the given damping coefficient.
    pub fn new(damping: impl TryIntoExpr, pathway: P) -> Result<Self, ActuatorError> {
        Ok(Self {
            damping: damping.try_into_expr()?,
            pathway,
        })
    }

    /// The damping coefficient.
    #[must_use]
    pub fn damping(&self) -> &Expr {
        &self.damping
    }

    /// The pathway the damper acts along.
    #[must_use]
    pub fn pathway(&self) -> &P {
        &self.pathway
    }

    /// The damper's current force magnitude.
    pub fn force(&self, mech: &Mechanism) -> Result<Expr, ActuatorError> {
        Ok(-(self.damping.clone()) * self.pathway.extension_velocity(mech)?)
    }
}

impl<P: Pathway> Actuator for LinearDamper<P> {
    fn to_loads(&self, mech: &Mechanism) -> Result<Vec<Load>, ActuatorError> {
        let force = self.force(mech)?;
        self.pathway.to_loads(&force, mech)
    }
}

impl<P: fmt::Display> fmt::Display for LinearDamper<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LinearDamper({}, {})", self.damping, self.pathway)
    }
}
