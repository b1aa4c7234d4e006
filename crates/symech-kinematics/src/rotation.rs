//! Symbolic direction cosine matrices.
//!
//! A [`Rotation`] maps vector components between two frames. The convention
//! throughout the crate: a link stored on frame `F` toward frame `G` holds
//! the matrix `M` with `components_in_F = M * components_in_G`.

use std::array;

use symech_expr::Expr;

/// A 3x3 direction cosine matrix with exact symbolic entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rotation {
    entries: [[Expr; 3]; 3],
}

impl Rotation {
    /// The identity rotation.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            entries: array::from_fn(|i| {
                array::from_fn(|j| if i == j { Expr::one() } else { Expr::zero() })
            }),
        }
    }

    /// Rodrigues rotation about a unit axis by `angle`.
    ///
    /// `axis` must already be normalized; callers in this crate normalize
    /// symbolically before reaching here. The result maps child components
    /// into parent components for a child rotated by `angle` about the axis.
    #[must_use]
    pub fn from_axis_angle(axis: &[Expr; 3], angle: &Expr) -> Self {
        let c = angle.clone().cos();
        let s = angle.clone().sin();
        let one_minus_c = Expr::one() - c.clone();

        // R = c*I + (1 - c)*a*a^T + s*[a]x
        let mut entries: [[Expr; 3]; 3] = array::from_fn(|i| {
            array::from_fn(|j| {
                let mut value =
                    one_minus_c.clone() * axis[i].clone() * axis[j].clone();
                if i == j {
                    value = value + c.clone();
                }
                value
            })
        });
        entries[0][1] = entries[0][1].clone() - s.clone() * axis[2].clone();
        entries[0][2] = entries[0][2].clone() + s.clone() * axis[1].clone();
        entries[1][0] = entries[1][0].clone() + s.clone() * axis[2].clone();
        entries[1][2] = entries[1][2].clone() - s.clone() * axis[0].clone();
        entries[2][0] = entries[2][0].clone() - s.clone() * axis[1].clone();
        entries[2][1] = entries[2][1].clone() + s * axis[0].clone();
        Self { entries }
    }

    /// The inverse rotation. Rotations are orthogonal, so this is the
    /// transpose.
    #[must_use]
    pub fn transpose(&self) -> Self {
        Self {
            entries: array::from_fn(|i| {
                array::from_fn(|j| self.entries[j][i].clone())
            }),
        }
    }

    /// Matrix product `self * other`.
    #[must_use]
    pub fn compose(&self, other: &Rotation) -> Self {
        Self {
            entries: array::from_fn(|i| {
                array::from_fn(|j| {
                    let mut sum = Expr::zero();
                    for k in 0..3 {
                        sum = sum
                            + self.entries[i][k].clone()
                                * other.entries[k][j].clone();
                    }
                    sum
                })
            }),
        }
    }

    /// Apply to a component triple.
    #[must_use]
    pub fn apply(&self, components: &[Expr; 3]) -> [Expr; 3] {
        array::from_fn(|i| {
            let mut sum = Expr::zero();
            for k in 0..3 {
                sum = sum + self.entries[i][k].clone() * components[k].clone();
            }
            sum
        })
    }

    /// Entry access, row-major.
    #[must_use]
    pub fn entry(&self, row: usize, col: usize) -> &Expr {
        &self.entries[row][col]
    }
}
