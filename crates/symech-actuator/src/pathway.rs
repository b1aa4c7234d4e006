//! Pathways: geometric routes between two attachment points.
//!
//! A pathway turns a scalar force magnitude into equal-and-opposite forces on
//! its attachments. The sign convention follows the length gradient: a
//! positive magnitude pushes the attachments apart, a negative magnitude
//! pulls them together. Springs and dampers get their contracting behavior
//! from the minus sign in their force law, not from the pathway.

use tracing::debug;

use symech_expr::Expr;
use symech_kinematics::{Mechanism, Point};

use crate::error::ActuatorError;
use crate::loads::Load;

/// A geometric route between two attachment points.
pub trait Pathway {
    /// The two attachment points.
    fn attachments(&self) -> (&Point, &Point);

    /// The pathway's current length.
    fn length(&self, mech: &Mechanism) -> Result<Expr, ActuatorError>;

    /// Rate of change of the length; positive while the attachments
    /// separate.
    fn extension_velocity(&self, mech: &Mechanism) -> Result<Expr, ActuatorError>;

    /// Forces on the attachments for a force of `magnitude` acting along
    /// the pathway.
    fn to_loads(
        &self,
        magnitude: &Expr,
        mech: &Mechanism,
    ) -> Result<Vec<Load>, ActuatorError>;
}

/// The straight line between two points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearPathway {
    attachments: [Point; 2],
}

impl LinearPathway {
    /// A straight-line pathway from `first` to `second`.
    ///
    /// The attachments must be distinct: a zero-length pathway has no
    /// direction to act along.
    pub fn new(first: Point, second: Point) -> Result<Self, ActuatorError> {
        if first == second {
            return Err(ActuatorError::CoincidentAttachments {
                point: first.name().to_owned(),
            });
        }
        Ok(Self {
            attachments: [first, second],
        })
    }
}

impl Pathway for LinearPathway {
    fn attachments(&self) -> (&Point, &Point) {
        (&self.attachments[0], &self.attachments[1])
    }

    fn length(&self, mech: &Mechanism) -> Result<Expr, ActuatorError> {
        let relative = mech.position(&self.attachments[1], &self.attachments[0])?;
        Ok(relative.magnitude(mech)?)
    }

    fn extension_velocity(&self, mech: &Mechanism) -> Result<Expr, ActuatorError> {
        Ok(self.length(mech)?.diff())
    }

    fn to_loads(
        &self,
        magnitude: &Expr,
        mech: &Mechanism,
    ) -> Result<Vec<Load>, ActuatorError> {
        let relative = mech.position(&self.attachments[1], &self.attachments[0])?;
        let length = relative.magnitude(mech)?;
        let unit = relative.scale(&length.powi(-1));
        debug!(
            first = %self.attachments[0],
            second = %self.attachments[1],
            magnitude = %magnitude,
            "resolving pathway loads"
        );
        Ok(vec![
            Load::force(self.attachments[0].clone(), -magnitude.clone() * &unit),
            Load::force(self.attachments[1].clone(), magnitude.clone() * unit),
        ])
    }
}

impl std::fmt::Display for LinearPathway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LinearPathway({}, {})",
            self.attachments[0], self.attachments[1]
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn two_points(mech: &mut Mechanism) -> (Point, Point) {
        (mech.point("pA"), mech.point("pB"))
    }

    #[test]
    fn test_coincident_attachments_are_rejected() {
        let mut mech = Mechanism::new();
        let pa = mech.point("pA");
        let err = LinearPathway::new(pa.clone(), pa).unwrap_err();
        assert!(
            matches!(err, ActuatorError::CoincidentAttachments { point } if point == "pA")
        );
    }

    #[test]
    fn test_display() {
        let mut mech = Mechanism::new();
        let (pa, pb) = two_points(&mut mech);
        let pathway = LinearPathway::new(pa, pb).unwrap();
        assert_eq!(pathway.to_string(), "LinearPathway(pA, pB)");
    }

    #[test]
    fn test_static_pathway() {
        let mut mech = Mechanism::new();
        let n = mech.frame("N");
        let (pa, pb) = two_points(&mut mech);

        // Attachments separated by a constant distance.
        let l = Expr::symbol("l");
        mech.set_position(&pb, &pa, n.x() * l.clone()).unwrap();

        let pathway = LinearPathway::new(pa.clone(), pb.clone()).unwrap();
        assert_eq!(pathway.length(&mech).unwrap(), l.clone().powi(2).sqrt());
        assert_eq!(pathway.extension_velocity(&mech).unwrap(), Expr::zero());

        let force = Expr::symbol("F");
        let loads = pathway.to_loads(&force, &mech).unwrap();
        let unit = l.clone() * l.powi(2).sqrt().powi(-1);
        assert_eq!(
            loads,
            vec![
                Load::force(pa, n.x() * (-force.clone() * unit.clone())),
                Load::force(pb, n.x() * (force * unit)),
            ]
        );
    }

    #[test]
    fn test_static_pathway_with_numeric_separation() {
        let mut mech = Mechanism::new();
        let n = mech.frame("N");
        let (pa, pb) = two_points(&mut mech);
        mech.set_position(&pb, &pa, n.x() * Expr::int(2)).unwrap();

        let pathway = LinearPathway::new(pa.clone(), pb.clone()).unwrap();
        // The radical evaluates exactly, so the loads are plain +/- F*N.x.
        assert_eq!(pathway.length(&mech).unwrap(), Expr::int(2));
        assert_eq!(pathway.extension_velocity(&mech).unwrap(), Expr::zero());

        let force = Expr::symbol("F");
        let loads = pathway.to_loads(&force, &mech).unwrap();
        assert_eq!(
            loads,
            vec![
                Load::force(pa, n.x() * -force.clone()),
                Load::force(pb, n.x() * force),
            ]
        );
    }

    #[test]
    fn test_2d_pathway() {
        let mut mech = Mechanism::new();
        let n = mech.frame("N");
        let (pa, pb) = two_points(&mut mech);

        let q = Expr::dynamic("q");
        mech.set_position(&pb, &pa, n.x() * q.clone()).unwrap();

        let pathway = LinearPathway::new(pa.clone(), pb.clone()).unwrap();
        let length = q.clone().powi(2).sqrt();
        assert_eq!(pathway.length(&mech).unwrap(), length.clone());
        assert_eq!(
            pathway.extension_velocity(&mech).unwrap(),
            q.clone() * q.diff() * length.clone().powi(-1)
        );

        let force = Expr::symbol("F");
        let loads = pathway.to_loads(&force, &mech).unwrap();
        let unit = q * length.powi(-1);
        assert_eq!(
            loads[0],
            Load::force(pa, n.x() * (-force.clone() * unit.clone()))
        );
        assert_eq!(loads[1], Load::force(pb, n.x() * (force * unit)));
    }

    #[test]
    fn test_3d_pathway_length_and_velocity() {
        let mut mech = Mechanism::new();
        let n = mech.frame("N");
        let (pa, pb) = two_points(&mut mech);

        let q1 = Expr::dynamic("q1");
        let q2 = Expr::dynamic("q2");
        let q3 = Expr::dynamic("q3");
        let rel = n.x() * q1.clone() - n.y() * q2.clone() + n.z() * q3.clone();
        mech.set_position(&pb, &pa, rel).unwrap();

        let pathway = LinearPathway::new(pa, pb).unwrap();
        let length_sq = q1.clone().powi(2) + q2.clone().powi(2) + q3.clone().powi(2);
        let length = length_sq.sqrt();
        assert_eq!(pathway.length(&mech).unwrap(), length.clone());

        let expected_velocity = (q1.clone() * q1.diff()
            + q2.clone() * q2.diff()
            + q3.clone() * q3.diff())
            * length.powi(-1);
        assert_eq!(
            pathway.extension_velocity(&mech).unwrap().expand(),
            expected_velocity.expand()
        );
    }

    #[test]
    fn test_extension_velocity_matches_dot_product_derivation() {
        let mut mech = Mechanism::new();
        let n = mech.frame("N");
        let (pa, pb) = two_points(&mut mech);

        let q1 = Expr::dynamic("q1");
        let q2 = Expr::dynamic("q2");
        mech.set_position(&pb, &pa, n.x() * q1 + n.y() * q2).unwrap();

        let pathway = LinearPathway::new(pa.clone(), pb.clone()).unwrap();
        // d(length)/dt equals the relative velocity projected onto the unit
        // vector between the attachments.
        let relative = mech.position(&pb, &pa).unwrap();
        let velocity = relative.dt(&n, &mech).unwrap();
        let length = relative.magnitude(&mech).unwrap();
        let unit = relative.scale(&length.powi(-1));
        let projected = velocity.dot(&unit, &mech).unwrap();
        assert_eq!(
            pathway.extension_velocity(&mech).unwrap().expand(),
            projected.expand()
        );
    }

    #[test]
    fn test_loads_are_equal_and_opposite() {
        let mut mech = Mechanism::new();
        let n = mech.frame("N");
        let (pa, pb) = two_points(&mut mech);
        let q = Expr::dynamic("q");
        mech.set_position(&pb, &pa, n.x() * q.clone() + n.y() * q).unwrap();

        let pathway = LinearPathway::new(pa, pb).unwrap();
        let force = Expr::symbol("F");
        let loads = pathway.to_loads(&force, &mech).unwrap();
        let total = loads[0].vector().clone() + loads[1].vector().clone();
        assert!(total.is_zero());
    }
}
