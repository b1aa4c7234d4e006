//! Core expression representation and canonicalization.
//!
//! [`Expr`] wraps a private tree. All construction funnels through the
//! canonicalizing builders in this module ([`Expr::add_all`],
//! [`Expr::mul_all`], [`Expr::pow_make`]), which maintain the invariants the
//! rest of the workspace relies on:
//!
//! - sums and products are flat, deterministically ordered, and carry at
//!   most one leading numeric constant;
//! - like terms and like factors are combined;
//! - numeric arithmetic is exact (rational), including exact radicals;
//! - `(x**a)**b` merges only through an integer outer exponent, so
//!   `sqrt(x**2)` never collapses to `x`.
//!
//! Because every value is canonical, derived `Eq`/`Ord` give structural
//! equality after simplification and a stable ordering.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use num_rational::Rational64;
use num_traits::{CheckedAdd, CheckedMul, One, Signed, Zero};

use crate::error::ExprError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A time-independent symbol such as a stiffness `k` or a force `F`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Symbol {
    pub(crate) name: String,
}

impl Symbol {
    /// The symbol's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A time-varying symbol (a generalized coordinate) at some derivative order.
///
/// Order 0 is the quantity itself (`q`), order 1 its time derivative (`q'`),
/// and so on.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DynSymbol {
    pub(crate) name: String,
    pub(crate) order: u32,
}

impl DynSymbol {
    /// The underlying quantity's name, without derivative marks.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The derivative order (0 for the quantity itself).
    #[must_use]
    pub fn order(&self) -> u32 {
        self.order
    }
}

/// Elementary functions understood by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub(crate) enum Func {
    Sin,
    Cos,
    Ln,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub(crate) enum ExprKind {
    Num(Rational64),
    Sym(Symbol),
    Dyn(DynSymbol),
    Add(Vec<Expr>),
    Mul(Vec<Expr>),
    Pow(Box<Expr>, Box<Expr>),
    Func(Func, Box<Expr>),
}

/// An exact, immutable symbolic scalar expression.
///
/// See the crate-level documentation for the canonical-form and equality
/// contract. Values are cheap to compare and hash; cloning is a deep copy of
/// a usually-small tree.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Expr {
    pub(crate) kind: ExprKind,
}

impl Expr {
    pub(crate) fn from_kind(kind: ExprKind) -> Self {
        Self { kind }
    }

    pub(crate) fn num(value: Rational64) -> Self {
        Self::from_kind(ExprKind::Num(value))
    }

    /// The exact number zero.
    #[must_use]
    pub fn zero() -> Self {
        Self::num(Rational64::zero())
    }

    /// The exact number one.
    #[must_use]
    pub fn one() -> Self {
        Self::num(Rational64::one())
    }

    /// An exact integer constant.
    #[must_use]
    pub fn int(value: i64) -> Self {
        Self::num(Rational64::from_integer(value))
    }

    /// An exact rational constant. Fails if `denom` is zero.
    pub fn rational(numer: i64, denom: i64) -> Result<Self, ExprError> {
        if denom == 0 {
            return Err(ExprError::not_symbolic(format!("{numer}/{denom}")));
        }
        Ok(Self::num(Rational64::new(numer, denom)))
    }

    /// A time-independent symbol.
    #[must_use]
    pub fn symbol(name: &str) -> Self {
        Self::from_kind(ExprKind::Sym(Symbol {
            name: name.to_owned(),
        }))
    }

    /// A time-varying symbol (generalized coordinate) at derivative order 0.
    #[must_use]
    pub fn dynamic(name: &str) -> Self {
        Self::from_kind(ExprKind::Dyn(DynSymbol {
            name: name.to_owned(),
            order: 0,
        }))
    }

    /// Raise to a symbolic power.
    #[must_use]
    pub fn pow(self, exp: Expr) -> Self {
        Self::pow_make(self, exp)
    }

    /// Raise to an integer power.
    #[must_use]
    pub fn powi(self, exp: i64) -> Self {
        Self::pow_make(self, Self::int(exp))
    }

    /// The principal square root, kept symbolic unless exactly numeric.
    #[must_use]
    pub fn sqrt(self) -> Self {
        Self::pow_make(self, Self::num(Rational64::new(1, 2)))
    }

    /// The sine of this expression.
    #[must_use]
    pub fn sin(self) -> Self {
        if self.is_zero() {
            return Self::zero();
        }
        Self::from_kind(ExprKind::Func(Func::Sin, Box::new(self)))
    }

    /// The cosine of this expression.
    #[must_use]
    pub fn cos(self) -> Self {
        if self.is_zero() {
            return Self::one();
        }
        Self::from_kind(ExprKind::Func(Func::Cos, Box::new(self)))
    }

    /// The natural logarithm of this expression.
    #[must_use]
    pub fn ln(self) -> Self {
        if self.is_one() {
            return Self::zero();
        }
        Self::from_kind(ExprKind::Func(Func::Ln, Box::new(self)))
    }

    /// Whether this is exactly the number zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        matches!(&self.kind, ExprKind::Num(r) if r.is_zero())
    }

    /// Whether this is exactly the number one.
    #[must_use]
    pub fn is_one(&self) -> bool {
        matches!(&self.kind, ExprKind::Num(r) if r.is_one())
    }

    /// Whether any time-varying symbol occurs in this expression.
    #[must_use]
    pub fn contains_time(&self) -> bool {
        match &self.kind {
            ExprKind::Num(_) | ExprKind::Sym(_) => false,
            ExprKind::Dyn(_) => true,
            ExprKind::Add(terms) | ExprKind::Mul(terms) => {
                terms.iter().any(Self::contains_time)
            }
            ExprKind::Pow(base, exp) => base.contains_time() || exp.contains_time(),
            ExprKind::Func(_, arg) => arg.contains_time(),
        }
    }

    /// Whether this is a single time-varying symbol of derivative order 0.
    #[must_use]
    pub fn is_coordinate(&self) -> bool {
        matches!(&self.kind, ExprKind::Dyn(d) if d.order == 0)
    }

    /// Whether the canonical form is a sum. Display code for composite
    /// structures uses this to decide on parentheses.
    #[must_use]
    pub fn is_sum(&self) -> bool {
        matches!(&self.kind, ExprKind::Add(_))
    }

    /// Whether the canonical form carries a leading negative constant.
    ///
    /// Used by display code to pull signs out of sums and vector components.
    #[must_use]
    pub fn has_negative_sign(&self) -> bool {
        match &self.kind {
            ExprKind::Num(r) => r.is_negative(),
            ExprKind::Mul(factors) => {
                matches!(&factors[0].kind, ExprKind::Num(r) if r.is_negative())
            }
            _ => false,
        }
    }

    // -- canonicalizing builders ------------------------------------------

    /// Canonical n-ary sum.
    pub(crate) fn add_all(terms: Vec<Expr>) -> Expr {
        let mut flat = Vec::with_capacity(terms.len());
        flatten_add(terms, &mut flat);

        let mut constant = Rational64::zero();
        let mut collected: BTreeMap<Expr, Rational64> = BTreeMap::new();
        let mut spilled: Vec<Expr> = Vec::new();
        for term in flat {
            match term.kind {
                ExprKind::Num(r) => match constant.checked_add(&r) {
                    Some(sum) => constant = sum,
                    // The combined constant no longer fits in i64; keep the
                    // term unmerged rather than panic.
                    None => spilled.push(Expr::num(r)),
                },
                ExprKind::Mul(mut factors) => {
                    let leading = match factors[0].kind {
                        ExprKind::Num(c) => Some(c),
                        _ => None,
                    };
                    if let Some(c) = leading {
                        factors.remove(0);
                        let rest = if factors.len() == 1 {
                            factors.pop().unwrap_or_else(Expr::one)
                        } else {
                            Expr::from_kind(ExprKind::Mul(factors))
                        };
                        accumulate(&mut collected, &mut spilled, rest, c);
                    } else {
                        accumulate(
                            &mut collected,
                            &mut spilled,
                            Expr::from_kind(ExprKind::Mul(factors)),
                            Rational64::one(),
                        );
                    }
                }
                kind => {
                    accumulate(
                        &mut collected,
                        &mut spilled,
                        Expr::from_kind(kind),
                        Rational64::one(),
                    );
                }
            }
        }

        let mut out: Vec<Expr> = Vec::new();
        if !constant.is_zero() {
            out.push(Expr::num(constant));
        }
        for (key, coeff) in collected {
            if coeff.is_zero() {
                continue;
            }
            if coeff.is_one() {
                out.push(key);
            } else {
                out.push(coeff_times(coeff, key));
            }
        }
        out.extend(spilled);

        if out.is_empty() {
            Expr::zero()
        } else if out.len() == 1 {
            out.swap_remove(0)
        } else {
            Expr::from_kind(ExprKind::Add(out))
        }
    }

    /// Canonical n-ary product.
    pub(crate) fn mul_all(factors: Vec<Expr>) -> Expr {
        let mut flat = Vec::with_capacity(factors.len());
        flatten_mul(factors, &mut flat);

        let mut coeff = Rational64::one();
        let mut bases: BTreeMap<Expr, Vec<Expr>> = BTreeMap::new();
        let mut spilled: Vec<Expr> = Vec::new();
        for factor in flat {
            match factor.kind {
                ExprKind::Num(r) => {
                    if r.is_zero() {
                        return Expr::zero();
                    }
                    match coeff.checked_mul(&r) {
                        Some(product) => coeff = product,
                        // The combined coefficient no longer fits in i64;
                        // keep the factor unmerged rather than panic.
                        None => spilled.push(Expr::num(r)),
                    }
                }
                ExprKind::Pow(base, exp) => bases.entry(*base).or_default().push(*exp),
                kind => bases
                    .entry(Expr::from_kind(kind))
                    .or_default()
                    .push(Expr::one()),
            }
        }

        let mut built: Vec<Expr> = Vec::new();
        let mut needs_repass = false;
        for (base, exps) in bases {
            let exp = Self::add_all(exps);
            let factor = Self::pow_make(base.clone(), exp);
            match factor.kind {
                ExprKind::Num(r) => {
                    if r.is_zero() {
                        return Expr::zero();
                    }
                    match coeff.checked_mul(&r) {
                        Some(product) => coeff = product,
                        None => spilled.push(Expr::num(r)),
                    }
                }
                ExprKind::Mul(subfactors) => {
                    // pow_make distributed or extracted a root; its pieces may
                    // merge with factors already collected, so fold once more.
                    needs_repass = true;
                    for sub in subfactors {
                        if let ExprKind::Num(r) = sub.kind {
                            if r.is_zero() {
                                return Expr::zero();
                            }
                            match coeff.checked_mul(&r) {
                                Some(product) => coeff = product,
                                None => spilled.push(Expr::num(r)),
                            }
                        } else {
                            built.push(sub);
                        }
                    }
                }
                ExprKind::Pow(new_base, new_exp) => {
                    // A nested power can collapse to a different base, e.g.
                    // (q**2)**(-1) becoming q**(-2); that may merge with a
                    // factor already collected under the new base.
                    if *new_base != base {
                        needs_repass = true;
                    }
                    built.push(Expr::from_kind(ExprKind::Pow(new_base, new_exp)));
                }
                kind => built.push(Expr::from_kind(kind)),
            }
        }

        if needs_repass {
            built.push(Expr::num(coeff));
            built.extend(spilled);
            return Self::mul_all(built);
        }

        built.sort();
        built.extend(spilled);
        if built.is_empty() {
            return Expr::num(coeff);
        }
        if !coeff.is_one() {
            built.insert(0, Expr::num(coeff));
        }
        if built.len() == 1 {
            built.swap_remove(0)
        } else {
            Expr::from_kind(ExprKind::Mul(built))
        }
    }

    /// Canonical power.
    pub(crate) fn pow_make(base: Expr, exp: Expr) -> Expr {
        let numeric_exp = match exp.kind {
            ExprKind::Num(e) => Some(e),
            _ => None,
        };
        let Some(e) = numeric_exp else {
            if base.is_one() {
                return Expr::one();
            }
            return Expr::from_kind(ExprKind::Pow(Box::new(base), Box::new(exp)));
        };

        if e.is_zero() {
            return Expr::one();
        }
        if e.is_one() {
            return base;
        }

        match base.kind {
            ExprKind::Num(b) => {
                if e.is_integer() {
                    if let Ok(k) = i32::try_from(e.to_integer()) {
                        if let Some(folded) = checked_rational_pow(b, k) {
                            return Expr::num(folded);
                        }
                    }
                } else if let Some(root) = rational_root(b, e) {
                    return Expr::num(root);
                }
                Expr::from_kind(ExprKind::Pow(
                    Box::new(Expr::num(b)),
                    Box::new(Expr::num(e)),
                ))
            }
            ExprKind::Pow(inner_base, inner_exp) => {
                if e.is_integer() {
                    // (x**a)**n == x**(a*n) is unconditionally sound for
                    // integer n; fractional outer exponents must not merge
                    // (sqrt(q**2) is not q).
                    let merged = Self::mul_all(vec![*inner_exp, Expr::num(e)]);
                    return Self::pow_make(*inner_base, merged);
                }
                Expr::from_kind(ExprKind::Pow(
                    Box::new(Expr::from_kind(ExprKind::Pow(inner_base, inner_exp))),
                    Box::new(Expr::num(e)),
                ))
            }
            ExprKind::Mul(factors) => {
                if e.is_integer() {
                    let parts = factors
                        .into_iter()
                        .map(|f| Self::pow_make(f, Expr::num(e)))
                        .collect();
                    return Self::mul_all(parts);
                }
                // Fractional exponent: factor an exact root of the numeric
                // coefficient out of the radical, e.g. sqrt(4*q**2) ==
                // 2*sqrt(q**2).
                let leading = match factors[0].kind {
                    ExprKind::Num(c) => Some(c),
                    _ => None,
                };
                if let Some(c) = leading {
                    if let Some(root) = rational_root(c, e) {
                        let mut rest = factors;
                        rest.remove(0);
                        let remainder = if rest.len() == 1 {
                            rest.pop().unwrap_or_else(Expr::one)
                        } else {
                            Expr::from_kind(ExprKind::Mul(rest))
                        };
                        return Self::mul_all(vec![
                            Expr::num(root),
                            Expr::from_kind(ExprKind::Pow(
                                Box::new(remainder),
                                Box::new(Expr::num(e)),
                            )),
                        ]);
                    }
                }
                Expr::from_kind(ExprKind::Pow(
                    Box::new(Expr::from_kind(ExprKind::Mul(factors))),
                    Box::new(Expr::num(e)),
                ))
            }
            kind => {
                let rebuilt = Expr::from_kind(kind);
                if rebuilt.is_one() {
                    return Expr::one();
                }
                Expr::from_kind(ExprKind::Pow(Box::new(rebuilt), Box::new(Expr::num(e))))
            }
        }
    }
}

/// Fold `coeff` into the coefficient collected for `key`, spilling the term
/// unmerged when the addition would overflow i64.
fn accumulate(
    collected: &mut BTreeMap<Expr, Rational64>,
    spilled: &mut Vec<Expr>,
    key: Expr,
    coeff: Rational64,
) {
    match collected.entry(key) {
        Entry::Occupied(mut slot) => match slot.get().checked_add(&coeff) {
            Some(sum) => *slot.get_mut() = sum,
            None => {
                let term = if coeff.is_one() {
                    slot.key().clone()
                } else {
                    coeff_times(coeff, slot.key().clone())
                };
                spilled.push(term);
            }
        },
        Entry::Vacant(slot) => {
            slot.insert(coeff);
        }
    }
}

/// Exact `base**exp`, or `None` when the result overflows i64 or the base is
/// zero with a negative exponent.
fn checked_rational_pow(base: Rational64, exp: i32) -> Option<Rational64> {
    let n = exp.unsigned_abs();
    let numer = base.numer().checked_pow(n)?;
    let denom = base.denom().checked_pow(n)?;
    if exp < 0 {
        if numer == 0 {
            return None;
        }
        Some(Rational64::new(denom, numer))
    } else {
        Some(Rational64::new(numer, denom))
    }
}

/// Attach a rational coefficient to a coefficient-free canonical term.
fn coeff_times(coeff: Rational64, term: Expr) -> Expr {
    match term.kind {
        ExprKind::Mul(factors) => {
            let mut with_coeff = Vec::with_capacity(factors.len() + 1);
            with_coeff.push(Expr::num(coeff));
            with_coeff.extend(factors);
            Expr::from_kind(ExprKind::Mul(with_coeff))
        }
        kind => Expr::from_kind(ExprKind::Mul(vec![
            Expr::num(coeff),
            Expr::from_kind(kind),
        ])),
    }
}

fn flatten_add(terms: Vec<Expr>, out: &mut Vec<Expr>) {
    for term in terms {
        if let ExprKind::Add(inner) = term.kind {
            flatten_add(inner, out);
        } else {
            out.push(term);
        }
    }
}

fn flatten_mul(factors: Vec<Expr>, out: &mut Vec<Expr>) {
    for factor in factors {
        if let ExprKind::Mul(inner) = factor.kind {
            flatten_mul(inner, out);
        } else {
            out.push(factor);
        }
    }
}

/// Exact value of `base**exp` for a non-integer rational exponent, when one
/// exists (both numerator and denominator are perfect powers).
fn rational_root(base: Rational64, exp: Rational64) -> Option<Rational64> {
    let p = *exp.numer();
    let q = u32::try_from(*exp.denom()).ok()?;
    let root_numer = exact_root(*base.numer(), q)?;
    let root_denom = exact_root(*base.denom(), q)?;
    if root_denom == 0 {
        return None;
    }
    let root = Rational64::new(root_numer, root_denom);
    if root.is_zero() && p < 0 {
        return None;
    }
    let pk = i32::try_from(p).ok()?;
    checked_rational_pow(root, pk)
}

/// Exact integer `q`-th root of `n`, if one exists.
fn exact_root(n: i64, q: u32) -> Option<i64> {
    if q == 0 {
        return None;
    }
    if n < 0 {
        if q % 2 == 0 {
            return None;
        }
        return exact_root(n.checked_neg()?, q).map(|r| -r);
    }
    if n <= 1 {
        return Some(n);
    }
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    let guess = (n as f64).powf(1.0 / f64::from(q)).round() as i64;
    for candidate in guess.saturating_sub(1)..=guess.saturating_add(1) {
        if candidate >= 0 && candidate.checked_pow(q) == Some(n) {
            return Some(candidate);
        }
    }
    None
}
