//! Human-readable rendering of expressions.
//!
//! Powers print with `**`, half powers print as `sqrt(..)`, and time
//! derivatives print with prime marks (`q'`, `q''`). Parenthesization follows
//! the usual precedence (sum, then product, then power), driven off the
//! canonical form so equal expressions always print identically.

use std::fmt;

use num_rational::Rational64;
use num_traits::{One, Signed};

use crate::expr::{DynSymbol, Expr, ExprKind, Func, Symbol};

const PREC_ADD: u8 = 1;
const PREC_MUL: u8 = 2;
const PREC_POW: u8 = 3;
const PREC_ATOM: u8 = 4;

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Display for DynSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for _ in 0..self.order {
            f.write_str("'")?;
        }
        Ok(())
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_prec(self, 0, f)
    }
}

fn fmt_num(r: Rational64, parent: u8, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let bare = if r.is_integer() {
        !r.is_negative() || parent < PREC_POW
    } else {
        parent < PREC_MUL
    };
    if bare {
        if r.is_integer() {
            write!(f, "{}", r.numer())
        } else {
            write!(f, "{}/{}", r.numer(), r.denom())
        }
    } else if r.is_integer() {
        write!(f, "({})", r.numer())
    } else {
        write!(f, "({}/{})", r.numer(), r.denom())
    }
}

fn fmt_prec(expr: &Expr, parent: u8, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &expr.kind {
        ExprKind::Num(r) => fmt_num(*r, parent, f),
        ExprKind::Sym(s) => write!(f, "{s}"),
        ExprKind::Dyn(d) => write!(f, "{d}"),
        ExprKind::Add(terms) => {
            let wrap = parent > PREC_ADD;
            if wrap {
                f.write_str("(")?;
            }
            for (i, term) in terms.iter().enumerate() {
                if i == 0 {
                    fmt_prec(term, PREC_ADD, f)?;
                } else if term.has_negative_sign() {
                    f.write_str(" - ")?;
                    fmt_prec(&-term, PREC_MUL, f)?;
                } else {
                    f.write_str(" + ")?;
                    fmt_prec(term, PREC_ADD, f)?;
                }
            }
            if wrap {
                f.write_str(")")?;
            }
            Ok(())
        }
        ExprKind::Mul(factors) => {
            let wrap = parent > PREC_MUL;
            if wrap {
                f.write_str("(")?;
            }
            let mut rest = factors.iter();
            let mut wrote_factor = false;
            // The leading numeric coefficient renders without parens; -1
            // renders as a bare sign.
            if let Some(ExprKind::Num(r)) = factors.first().map(|e| &e.kind) {
                rest.next();
                if *r == -Rational64::one() {
                    f.write_str("-")?;
                } else {
                    fmt_num(*r, 0, f)?;
                    wrote_factor = true;
                }
            }
            for factor in rest {
                if wrote_factor {
                    f.write_str("*")?;
                }
                fmt_prec(factor, PREC_MUL + 1, f)?;
                wrote_factor = true;
            }
            if !wrote_factor {
                // A coefficient-only product never survives
                // canonicalization, but keep the printer total.
                f.write_str("1")?;
            }
            if wrap {
                f.write_str(")")?;
            }
            Ok(())
        }
        ExprKind::Pow(base, exp) => {
            if let ExprKind::Num(r) = &exp.kind {
                if *r == Rational64::new(1, 2) {
                    f.write_str("sqrt(")?;
                    fmt_prec(base, 0, f)?;
                    return f.write_str(")");
                }
            }
            let wrap = parent > PREC_POW;
            if wrap {
                f.write_str("(")?;
            }
            fmt_prec(base, PREC_ATOM, f)?;
            f.write_str("**")?;
            fmt_prec(exp, PREC_ATOM, f)?;
            if wrap {
                f.write_str(")")?;
            }
            Ok(())
        }
        ExprKind::Func(func, arg) => {
            let name = match func {
                Func::Sin => "sin",
                Func::Cos => "cos",
                Func::Ln => "ln",
            };
            f.write_str(name)?;
            f.write_str("(")?;
            fmt_prec(arg, 0, f)?;
            f.write_str(")")
        }
    }
}
