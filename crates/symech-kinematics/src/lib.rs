//! Symbolic kinematics: frames, points, vectors, bodies, and joints.
//!
//! This crate layers the geometry of a multibody model on top of the scalar
//! expressions from `symech-expr`. A [`Mechanism`] registry owns every frame
//! and point; callers hold lightweight handles and feed them back to the
//! registry for anything that spans frames.
//!
//! ```
//! use symech_expr::Expr;
//! use symech_kinematics::Mechanism;
//!
//! # fn main() -> Result<(), symech_kinematics::KinError> {
//! let mut mech = Mechanism::new();
//! let n = mech.frame("N");
//! let a = mech.frame("A");
//! let q = Expr::dynamic("q");
//!
//! // A is N rotated by q about the shared z axis.
//! mech.orient_axis(&a, &n, &n.z(), &q)?;
//! assert_eq!(n.x().dot(&a.x(), &mech)?, q.cos());
//! # Ok(())
//! # }
//! ```
//!
//! Positions work the same way: points are chained with relative displacement
//! vectors, and [`Mechanism::position`] sums along the chain. Magnitudes stay
//! exact and symbolic; `sqrt(q**2)` never collapses to `q`.

#![doc(html_root_url = "https://docs.rs/symech-kinematics/0.1.0")]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc
)]

mod body;
mod error;
mod joint;
mod mechanism;
mod rotation;
mod vector;

pub use body::{HasFrame, RigidBody};
pub use error::KinError;
pub use joint::PinJoint;
pub use mechanism::{Frame, Mechanism, Point};
pub use rotation::Rotation;
pub use vector::Vector;
