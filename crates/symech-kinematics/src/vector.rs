//! Symbolic 3-vectors expressed over one or more frames.
//!
//! A [`Vector`] is a sum of per-frame component triples. Pure arithmetic
//! (addition, scaling) never needs a [`Mechanism`]; anything that must relate
//! different frames (dot products, magnitudes, re-expression, time
//! differentiation) takes one, because the relative orientations live there.
//!
//! All-zero component triples are pruned on construction, so the zero vector
//! is always the empty sum and `is_zero` is a cheap structural check.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use symech_expr::{Bindings, Expr};

use crate::error::KinError;
use crate::mechanism::{Frame, Mechanism};

/// A symbolic vector as per-frame components.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Vector {
    components: BTreeMap<Frame, [Expr; 3]>,
}

impl Vector {
    /// The zero vector.
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    /// A vector with fixed components in a single frame.
    #[must_use]
    pub fn fixed(frame: Frame, components: [Expr; 3]) -> Self {
        let mut vector = Self::default();
        vector.insert(frame, components);
        vector
    }

    fn insert(&mut self, frame: Frame, components: [Expr; 3]) {
        if components.iter().all(Expr::is_zero) {
            return;
        }
        match self.components.entry(frame) {
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(components);
            }
            std::collections::btree_map::Entry::Occupied(mut slot) => {
                let merged = slot.get_mut();
                for (m, c) in merged.iter_mut().zip(components) {
                    *m = m.clone() + c;
                }
                if merged.iter().all(Expr::is_zero) {
                    slot.remove();
                }
            }
        }
    }

    /// Whether this is structurally the zero vector.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.components.is_empty()
    }

    /// The frames this vector has components in.
    pub fn frames(&self) -> impl Iterator<Item = (&Frame, &[Expr; 3])> {
        self.components.iter()
    }

    /// The frame and components, if fixed in exactly one frame.
    #[must_use]
    pub fn single_frame(&self) -> Option<(&Frame, &[Expr; 3])> {
        if self.components.len() == 1 {
            self.components.iter().next()
        } else {
            None
        }
    }

    /// Scale by a symbolic factor.
    #[must_use]
    pub fn scale(&self, factor: &Expr) -> Vector {
        let mut out = Self::default();
        for (frame, comps) in &self.components {
            out.insert(
                frame.clone(),
                [
                    comps[0].clone() * factor.clone(),
                    comps[1].clone() * factor.clone(),
                    comps[2].clone() * factor.clone(),
                ],
            );
        }
        out
    }

    /// Re-express every component in `frame`.
    pub fn express(&self, frame: &Frame, mech: &Mechanism) -> Result<Vector, KinError> {
        mech.check_frame(frame)?;
        let mut total = [Expr::zero(), Expr::zero(), Expr::zero()];
        for (f, comps) in &self.components {
            let in_frame = if f == frame {
                comps.clone()
            } else {
                mech.dcm(frame, f)?.apply(comps)
            };
            for (t, c) in total.iter_mut().zip(in_frame) {
                *t = t.clone() + c;
            }
        }
        Ok(Vector::fixed(frame.clone(), total))
    }

    /// Scalar product with another vector.
    pub fn dot(&self, other: &Vector, mech: &Mechanism) -> Result<Expr, KinError> {
        let mut sum = Expr::zero();
        for (fa, ca) in &self.components {
            for (fb, cb) in &other.components {
                let cb_in_a = if fa == fb {
                    cb.clone()
                } else {
                    mech.dcm(fa, fb)?.apply(cb)
                };
                for (a, b) in ca.iter().zip(cb_in_a) {
                    sum = sum + a.clone() * b;
                }
            }
        }
        Ok(sum)
    }

    /// The (non-negative) length of this vector.
    ///
    /// Kept symbolic: for a vector `q*N.x` this is `sqrt(q**2)`, not `q`,
    /// because nothing is known about the sign of `q`.
    pub fn magnitude(&self, mech: &Mechanism) -> Result<Expr, KinError> {
        let Some((lowest, _)) = self.components.iter().next() else {
            return Ok(Expr::zero());
        };
        let resolved = self.express(&lowest.clone(), mech)?;
        let mut sum = Expr::zero();
        for (_, comps) in resolved.frames() {
            for c in comps {
                sum = sum + c.clone() * c.clone();
            }
        }
        Ok(sum.sqrt())
    }

    /// Time derivative as seen from `frame`.
    pub fn dt(&self, frame: &Frame, mech: &Mechanism) -> Result<Vector, KinError> {
        let resolved = self.express(frame, mech)?;
        let mut out = Self::default();
        for (f, comps) in &resolved.components {
            out.insert(
                f.clone(),
                [comps[0].diff(), comps[1].diff(), comps[2].diff()],
            );
        }
        Ok(out)
    }

    /// Numeric components in `frame` under `bindings`.
    pub fn eval(
        &self,
        frame: &Frame,
        mech: &Mechanism,
        bindings: &Bindings,
    ) -> Result<nalgebra::Vector3<f64>, KinError> {
        let resolved = self.express(frame, mech)?;
        let mut out = nalgebra::Vector3::zeros();
        for (_, comps) in resolved.frames() {
            for (i, c) in comps.iter().enumerate() {
                out[i] = c.eval(bindings)?;
            }
        }
        Ok(out)
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        let mut out = self;
        for (frame, comps) in rhs.components {
            out.insert(frame, comps);
        }
        out
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        self + (-rhs)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        self.scale(&Expr::int(-1))
    }
}

impl Neg for &Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        self.scale(&Expr::int(-1))
    }
}

impl Mul<Expr> for Vector {
    type Output = Vector;

    fn mul(self, rhs: Expr) -> Vector {
        self.scale(&rhs)
    }
}

impl Mul<Vector> for Expr {
    type Output = Vector;

    fn mul(self, rhs: Vector) -> Vector {
        rhs.scale(&self)
    }
}

impl Mul<&Vector> for Expr {
    type Output = Vector;

    fn mul(self, rhs: &Vector) -> Vector {
        rhs.scale(&self)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.components.is_empty() {
            return f.write_str("0");
        }
        const AXES: [&str; 3] = ["x", "y", "z"];
        let mut first = true;
        for (frame, comps) in &self.components {
            for (axis, comp) in AXES.iter().zip(comps) {
                if comp.is_zero() {
                    continue;
                }
                let (negated, comp) = if comp.has_negative_sign() {
                    (true, -comp)
                } else {
                    (false, comp.clone())
                };
                if first {
                    if negated {
                        f.write_str("-")?;
                    }
                } else if negated {
                    f.write_str(" - ")?;
                } else {
                    f.write_str(" + ")?;
                }
                if !comp.is_one() {
                    if comp.is_sum() {
                        write!(f, "({comp})*")?;
                    } else {
                        write!(f, "{comp}*")?;
                    }
                }
                write!(f, "{frame}.{axis}")?;
                first = false;
            }
        }
        Ok(())
    }
}
