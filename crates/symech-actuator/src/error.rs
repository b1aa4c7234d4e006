//! Error types for pathways and actuators.

use thiserror::Error;

use symech_expr::ExprError;
use symech_kinematics::KinError;

/// Errors from constructing actuators or deriving their loads.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActuatorError {
    /// Both pathway attachments are the same point.
    #[error("pathway attachments must be distinct, got {point} twice")]
    CoincidentAttachments {
        /// The doubled point.
        point: String,
    },

    /// A torque axis with exactly zero length was supplied.
    #[error("torque axis is identically zero")]
    InvalidAxis,

    /// A scalar conversion or evaluation failed.
    #[error(transparent)]
    Expr(#[from] ExprError),

    /// A geometric query on the mechanism failed.
    #[error(transparent)]
    Kinematics(#[from] KinError),
}
