//! Exact symbolic scalar expressions for multibody dynamics.
//!
//! This crate is the scalar foundation of the symech workspace. Everything a
//! pathway or actuator derives — lengths, extension velocities, force
//! magnitudes — stays an exact algebraic value until the caller explicitly
//! asks for numbers. Nothing here ever rounds.
//!
//! # Expressions
//!
//! [`Expr`] is an immutable, opaque expression value built from:
//!
//! - exact rational constants,
//! - time-independent symbols ([`Expr::symbol`]),
//! - time-varying symbols and their time derivatives ([`Expr::dynamic`]),
//! - sums, products, powers, and the elementary functions sin/cos/ln.
//!
//! Every construction path canonicalizes (flattening, folding of numeric
//! constants, combination of like terms and factors, deterministic ordering),
//! so `==` compares structure after simplification:
//!
//! ```
//! use symech_expr::Expr;
//!
//! let q = Expr::dynamic("q");
//! assert_eq!(q.clone() * q.clone(), q.clone().powi(2));
//! assert_eq!(q.clone() + Expr::zero(), q);
//! ```
//!
//! Canonicalization is deliberately conservative about signs: `sqrt(q**2)`
//! stays `sqrt(q**2)` because nothing is known about the sign of `q`. Exact
//! numeric radicals do evaluate (`sqrt(4) == 2`), and perfect-power numeric
//! coefficients factor out of radicals (`sqrt(4*q**2) == 2*sqrt(q**2)`).
//!
//! # Time differentiation
//!
//! [`Expr::diff`] differentiates with respect to the implicit time variable:
//! plain symbols are constants, while time-varying symbols bump their
//! derivative order (`q` → `q'` → `q''`).
//!
//! ```
//! use symech_expr::Expr;
//!
//! let q = Expr::dynamic("q");
//! let length = q.clone().powi(2).sqrt();
//! let rate = length.diff();
//! assert_eq!(
//!     rate,
//!     q.clone() * q.diff() * q.powi(2).sqrt().powi(-1),
//! );
//! ```
//!
//! # Conversion
//!
//! Constructors downstream accept `impl TryIntoExpr`. Integers and rationals
//! convert exactly; finite floats convert to the nearest exact rational;
//! non-finite floats fail with [`ExprError::NotSymbolic`]. Inputs with no
//! numeric meaning at all cannot be passed in the first place.

#![doc(html_root_url = "https://docs.rs/symech-expr/0.1.0")]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::doc_markdown
)]
#![cfg_attr(test, allow(clippy::float_cmp))]

mod calculus;
mod convert;
mod display;
mod error;
mod eval;
mod expr;
mod ops;

pub use convert::TryIntoExpr;
pub use error::ExprError;
pub use eval::Bindings;
pub use expr::{DynSymbol, Expr, Symbol};
