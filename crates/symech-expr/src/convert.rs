//! Conversions from host values into [`Expr`].
//!
//! Exact kinds (integers, rationals, existing expressions) convert
//! infallibly; floating-point values convert through an exact rational
//! approximation and fail on non-finite input. Types with no symbolic
//! meaning simply do not implement [`TryIntoExpr`], so the mistake is caught
//! at compile time rather than at run time.

use num_rational::Rational64;

use crate::error::ExprError;
use crate::expr::Expr;

/// Conversion into a symbolic expression, fallible for lossy sources.
pub trait TryIntoExpr {
    /// Convert `self` into an exact symbolic expression.
    fn try_into_expr(self) -> Result<Expr, ExprError>;
}

impl TryIntoExpr for Expr {
    fn try_into_expr(self) -> Result<Expr, ExprError> {
        Ok(self)
    }
}

impl TryIntoExpr for &Expr {
    fn try_into_expr(self) -> Result<Expr, ExprError> {
        Ok(self.clone())
    }
}

impl TryIntoExpr for i64 {
    fn try_into_expr(self) -> Result<Expr, ExprError> {
        Ok(Expr::int(self))
    }
}

impl TryIntoExpr for i32 {
    fn try_into_expr(self) -> Result<Expr, ExprError> {
        Ok(Expr::int(i64::from(self)))
    }
}

impl TryIntoExpr for u32 {
    fn try_into_expr(self) -> Result<Expr, ExprError> {
        Ok(Expr::int(i64::from(self)))
    }
}

impl TryIntoExpr for Rational64 {
    fn try_into_expr(self) -> Result<Expr, ExprError> {
        Ok(Expr::num(self))
    }
}

impl TryIntoExpr for f64 {
    fn try_into_expr(self) -> Result<Expr, ExprError> {
        Rational64::approximate_float(self)
            .map(Expr::num)
            .ok_or_else(|| ExprError::not_symbolic(format!("{self}")))
    }
}

impl TryIntoExpr for f32 {
    fn try_into_expr(self) -> Result<Expr, ExprError> {
        f64::from(self).try_into_expr()
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Expr::int(value)
    }
}

impl From<i32> for Expr {
    fn from(value: i32) -> Self {
        Expr::int(i64::from(value))
    }
}

impl From<Rational64> for Expr {
    fn from(value: Rational64) -> Self {
        Expr::num(value)
    }
}
