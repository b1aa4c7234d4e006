//! Loads: forces at points and torques on frames.

use std::fmt;

use symech_kinematics::{Frame, Point, Vector};

/// A generalized load produced by an actuator.
///
/// Equations-of-motion assembly downstream consumes these pairs; an actuator
/// contributes one entry per point or frame it acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Load {
    /// A force vector applied at a point.
    Force {
        /// Point of application.
        point: Point,
        /// The force vector.
        vector: Vector,
    },
    /// A torque vector acting on a frame.
    Torque {
        /// Frame the torque acts on.
        frame: Frame,
        /// The torque vector.
        vector: Vector,
    },
}

impl Load {
    /// A force `vector` applied at `point`.
    #[must_use]
    pub fn force(point: Point, vector: Vector) -> Self {
        Self::Force { point, vector }
    }

    /// A torque `vector` acting on `frame`.
    #[must_use]
    pub fn torque(frame: Frame, vector: Vector) -> Self {
        Self::Torque { frame, vector }
    }

    /// The load's vector, whichever kind it is.
    #[must_use]
    pub fn vector(&self) -> &Vector {
        match self {
            Self::Force { vector, .. } | Self::Torque { vector, .. } => vector,
        }
    }
}

impl fmt::Display for Load {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Force { point, vector } => write!(f, "({point}, {vector})"),
            Self::Torque { frame, vector } => write!(f, "({frame}, {vector})"),
        }
    }
}
