//! Time differentiation, substitution, and distribution.
//!
//! Differentiation is with respect to time: plain symbols are constants,
//! time-varying symbols differentiate to the next derivative order. Results
//! are rebuilt through the canonicalizing builders, so derivatives compare
//! structurally like any other expression.

use num_rational::Rational64;
use num_traits::One;

use crate::expr::{DynSymbol, Expr, ExprKind, Func};

impl Expr {
    /// The time derivative of this expression.
    #[must_use]
    pub fn diff(&self) -> Expr {
        match &self.kind {
            ExprKind::Num(_) | ExprKind::Sym(_) => Expr::zero(),
            ExprKind::Dyn(d) => Expr::from_kind(ExprKind::Dyn(DynSymbol {
                name: d.name.clone(),
                order: d.order + 1,
            })),
            ExprKind::Add(terms) => {
                Expr::add_all(terms.iter().map(Expr::diff).collect())
            }
            ExprKind::Mul(factors) => {
                let mut terms = Vec::with_capacity(factors.len());
                for (i, factor) in factors.iter().enumerate() {
                    let mut product = Vec::with_capacity(factors.len());
                    for (j, other) in factors.iter().enumerate() {
                        if i == j {
                            product.push(factor.diff());
                        } else {
                            product.push(other.clone());
                        }
                    }
                    terms.push(Expr::mul_all(product));
                }
                Expr::add_all(terms)
            }
            ExprKind::Pow(base, exp) => {
                if let ExprKind::Num(e) = &exp.kind {
                    // Constant exponent: d(b**e) = e * b**(e-1) * b'.
                    let lowered =
                        Expr::pow_make((**base).clone(), Expr::num(e - Rational64::one()));
                    return Expr::mul_all(vec![Expr::num(*e), lowered, base.diff()]);
                }
                // General case via b**e = exp(e ln b):
                // d(b**e) = b**e * (e' ln b + e * b' / b).
                let this = self.clone();
                let inner = exp.diff() * (**base).clone().ln()
                    + (**exp).clone() * base.diff() / (**base).clone();
                this * inner
            }
            ExprKind::Func(func, arg) => {
                let outer = match func {
                    Func::Sin => (**arg).clone().cos(),
                    Func::Cos => -((**arg).clone().sin()),
                    Func::Ln => (**arg).clone().powi(-1),
                };
                outer * arg.diff()
            }
        }
    }

    /// Replace every occurrence of `target` with `replacement`, rebuilding
    /// canonically.
    #[must_use]
    pub fn subs(&self, target: &Expr, replacement: &Expr) -> Expr {
        if self == target {
            return replacement.clone();
        }
        match &self.kind {
            ExprKind::Num(_) | ExprKind::Sym(_) | ExprKind::Dyn(_) => self.clone(),
            ExprKind::Add(terms) => Expr::add_all(
                terms.iter().map(|t| t.subs(target, replacement)).collect(),
            ),
            ExprKind::Mul(factors) => Expr::mul_all(
                factors
                    .iter()
                    .map(|t| t.subs(target, replacement))
                    .collect(),
            ),
            ExprKind::Pow(base, exp) => Expr::pow_make(
                base.subs(target, replacement),
                exp.subs(target, replacement),
            ),
            ExprKind::Func(func, arg) => {
                let arg = arg.subs(target, replacement);
                match func {
                    Func::Sin => arg.sin(),
                    Func::Cos => arg.cos(),
                    Func::Ln => arg.ln(),
                }
            }
        }
    }

    /// Distribute products over sums and expand small integer powers of
    /// sums, flattening to one sum of monomials.
    ///
    /// Canonical form does not distribute on its own, so two expressions can
    /// be equal as functions while differing structurally (a factored vs an
    /// expanded derivative, say). Expanding both sides gives a common shape
    /// to compare.
    #[must_use]
    pub fn expand(&self) -> Expr {
        match &self.kind {
            ExprKind::Num(_) | ExprKind::Sym(_) | ExprKind::Dyn(_) => self.clone(),
            ExprKind::Add(terms) => {
                Expr::add_all(terms.iter().map(Expr::expand).collect())
            }
            ExprKind::Mul(factors) => {
                distribute(factors.iter().map(Expr::expand).collect())
            }
            ExprKind::Pow(base, exp) => {
                let base = base.expand();
                let exp = exp.expand();
                if let ExprKind::Num(e) = &exp.kind {
                    if e.is_integer() {
                        let n = e.to_integer();
                        if (2..=8).contains(&n) && matches!(base.kind, ExprKind::Add(_)) {
                            let copies =
                                (0..n).map(|_| base.clone()).collect::<Vec<_>>();
                            return distribute(copies);
                        }
                    }
                }
                Expr::pow_make(base, exp)
            }
            ExprKind::Func(func, arg) => {
                let arg = arg.expand();
                match func {
                    Func::Sin => arg.sin(),
                    Func::Cos => arg.cos(),
                    Func::Ln => arg.ln(),
                }
            }
        }
    }
}

/// Multiply out a list of factors, distributing over any sums among them.
fn distribute(factors: Vec<Expr>) -> Expr {
    let mut acc: Vec<Expr> = vec![Expr::one()];
    for factor in factors {
        let terms: Vec<Expr> = match factor.kind {
            ExprKind::Add(terms) => terms,
            kind => vec![Expr::from_kind(kind)],
        };
        let mut next = Vec::with_capacity(acc.len() * terms.len());
        for left in &acc {
            for right in &terms {
                next.push(Expr::mul_all(vec![left.clone(), right.clone()]));
            }
        }
        acc = next;
    }
    Expr::add_all(acc)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_differentiate_to_zero() {
        assert_eq!(Expr::int(5).diff(), Expr::zero());
        assert_eq!(Expr::symbol("k").diff(), Expr::zero());
    }

    #[test]
    fn test_coordinate_differentiates_to_speed() {
        let q = Expr::dynamic("q");
        let qd = q.diff();
        assert_eq!(qd.to_string(), "q'");
        assert_eq!(qd.diff().to_string(), "q''");
    }

    #[test]
    fn test_sum_and_product_rules() {
        let q1 = Expr::dynamic("q1");
        let q2 = Expr::dynamic("q2");
        let sum = q1.clone() + q2.clone();
        assert_eq!(sum.diff(), q1.diff() + q2.diff());
        let product = q1.clone() * q2.clone();
        assert_eq!(product.diff(), q1.diff() * q2.clone() + q1 * q2.diff());
    }

    #[test]
    fn test_power_rule() {
        let q = Expr::dynamic("q");
        let square = q.clone().powi(2);
        assert_eq!(square.diff(), Expr::int(2) * q.clone() * q.diff());
    }

    #[test]
    fn test_chain_rule_through_sqrt() {
        let q = Expr::dynamic("q");
        let length = q.clone().powi(2).sqrt();
        let expected = q.clone() * q.diff() * q.powi(2).sqrt().powi(-1);
        assert_eq!(length.diff(), expected);
    }

    #[test]
    fn test_trig_derivatives() {
        let q = Expr::dynamic("q");
        assert_eq!(q.clone().sin().diff(), q.clone().cos() * q.diff());
        assert_eq!(q.clone().cos().diff(), -(q.clone().sin()) * q.diff());
    }

    #[test]
    fn test_subs_replaces_symbols() {
        let q = Expr::dynamic("q");
        let k = Expr::symbol("k");
        let expr = k.clone() * q.clone().powi(2);
        let swapped = expr.subs(&q, &Expr::int(3));
        assert_eq!(swapped, Expr::int(9) * k);
    }

    #[test]
    fn test_subs_rebuilds_canonically() {
        let q = Expr::dynamic("q");
        let expr = q.clone() + Expr::int(1);
        assert_eq!(expr.subs(&q, &Expr::int(-1)), Expr::zero());
    }

    #[test]
    fn test_expand_distributes_products() {
        let a = Expr::symbol("a");
        let b = Expr::symbol("b");
        let c = Expr::symbol("c");
        let product = a.clone() * (b.clone() + c.clone());
        assert_eq!(product.expand(), a.clone() * b + a * c);
    }

    #[test]
    fn test_expand_binomial_square() {
        let a = Expr::symbol("a");
        let b = Expr::symbol("b");
        let square = (a.clone() + b.clone()).powi(2);
        let expected = a.clone().powi(2)
            + Expr::int(2) * a * b.clone()
            + b.powi(2);
        assert_eq!(square.expand(), expected);
    }

    #[test]
    fn test_factored_and_expanded_derivatives_agree() {
        let q1 = Expr::dynamic("q1");
        let q2 = Expr::dynamic("q2");
        let length = (q1.clone().powi(2) + q2.clone().powi(2)).sqrt();
        // d(length)/dt computed directly, vs assembled from expanded parts.
        let direct = length.clone().diff();
        let assembled = (q1.clone() * q1.diff() + q2.clone() * q2.diff())
            * length.powi(-1);
        assert_eq!(direct.expand(), assembled.expand());
    }
}
