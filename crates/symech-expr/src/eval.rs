//! Numeric evaluation of expressions.
//!
//! [`Bindings`] maps symbol names to `f64` values; [`Expr::eval`] folds an
//! expression to a number, failing with [`ExprError::Unbound`] when a symbol
//! has no binding. Time-varying symbols are keyed by their printed form, so
//! a coordinate and its derivative (`"q"` and `"q'"`) bind independently.

use std::collections::BTreeMap;

use crate::error::ExprError;
use crate::expr::{Expr, ExprKind, Func};

/// Numeric values for the symbols of an expression.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    values: BTreeMap<String, f64>,
}

impl Bindings {
    /// An empty binding set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`, replacing any previous binding.
    pub fn set(&mut self, name: &str, value: f64) -> &mut Self {
        self.values.insert(name.to_owned(), value);
        self
    }

    /// Builder-style [`Bindings::set`].
    #[must_use]
    pub fn with(mut self, name: &str, value: f64) -> Self {
        self.values.insert(name.to_owned(), value);
        self
    }

    /// Look up a binding by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }
}

impl Expr {
    /// Evaluate this expression numerically under `bindings`.
    ///
    /// # Errors
    ///
    /// Returns [`ExprError::Unbound`] if any symbol in the expression has no
    /// binding, or [`ExprError::NotReal`] if a power or logarithm leaves the
    /// real domain for the bound values.
    pub fn eval(&self, bindings: &Bindings) -> Result<f64, ExprError> {
        match &self.kind {
            ExprKind::Num(r) => {
                #[allow(clippy::cast_precision_loss)]
                let value = *r.numer() as f64 / *r.denom() as f64;
                Ok(value)
            }
            ExprKind::Sym(s) => bindings
                .get(&s.name)
                .ok_or_else(|| ExprError::Unbound {
                    symbol: s.name.clone(),
                }),
            ExprKind::Dyn(d) => {
                let key = d.to_string();
                bindings
                    .get(&key)
                    .ok_or(ExprError::Unbound { symbol: key })
            }
            ExprKind::Add(terms) => {
                let mut total = 0.0;
                for term in terms {
                    total += term.eval(bindings)?;
                }
                Ok(total)
            }
            ExprKind::Mul(factors) => {
                let mut total = 1.0;
                for factor in factors {
                    total *= factor.eval(bindings)?;
                }
                Ok(total)
            }
            ExprKind::Pow(base, exp) => {
                let value = base.eval(bindings)?.powf(exp.eval(bindings)?);
                // powf yields NaN for a negative base with a fractional
                // exponent; surface that as an error instead of letting the
                // NaN propagate.
                self.real_or_err(value)
            }
            ExprKind::Func(func, arg) => {
                let a = arg.eval(bindings)?;
                let value = match func {
                    Func::Sin => a.sin(),
                    Func::Cos => a.cos(),
                    Func::Ln => a.ln(),
                };
                self.real_or_err(value)
            }
        }
    }

    fn real_or_err(&self, value: f64) -> Result<f64, ExprError> {
        if value.is_nan() {
            return Err(ExprError::NotReal {
                expr: self.to_string(),
            });
        }
        Ok(value)
    }
}
