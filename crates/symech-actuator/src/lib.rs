//! Pathways and actuators for symbolic multibody models.
//!
//! An actuator converts a scalar effort into [`Load`]s: force/point or
//! torque/frame pairs ready for equations-of-motion assembly. Pathway-based
//! actuators ([`ForceActuator`], [`LinearSpring`], [`LinearDamper`]) act
//! along a [`Pathway`] between two attachment points; [`TorqueActuator`]
//! acts between two frames about an axis.
//!
//! ```
//! use symech_expr::Expr;
//! use symech_kinematics::Mechanism;
//! use symech_actuator::{Actuator, LinearPathway, LinearSpring};
//!
//! # fn main() -> Result<(), symech_actuator::ActuatorError> {
//! let mut mech = Mechanism::new();
//! let n = mech.frame("N");
//! let pa = mech.point("pA");
//! let pb = mech.point("pB");
//! let q = Expr::dynamic("q");
//! mech.set_position(&pb, &pa, n.x() * q)?;
//!
//! let pathway = LinearPathway::new(pa, pb)?;
//! let spring = LinearSpring::new(Expr::symbol("k"), pathway)?;
//! let loads = spring.to_loads(&mech)?;
//! assert_eq!(loads.len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! Everything stays exact and symbolic down to the final load vectors; see
//! `symech-expr` for the equality and simplification contract.

#![doc(html_root_url = "https://docs.rs/symech-actuator/0.1.0")]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc
)]

mod error;
mod force;
mod loads;
mod pathway;
mod torque;

pub use error::ActuatorError;
pub use force::{ForceActuator, LinearDamper, LinearSpring};
pub use loads::Load;
pub use pathway::{LinearPathway, Pathway};
pub use torque::TorqueActuator;

use symech_kinematics::Mechanism;

/// Anything that can contribute loads to a model.
pub trait Actuator {
    /// The loads this actuator currently produces.
    fn to_loads(&self, mech: &Mechanism) -> Result<Vec<Load>, ActuatorError>;
}
