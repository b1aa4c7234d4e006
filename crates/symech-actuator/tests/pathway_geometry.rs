//! Pathway geometry across rotated frames.
//!
//! Attachments fixed in different frames exercise the whole chain: relative
//! orientation, cross-frame resolution, symbolic magnitudes, and the load
//! direction factors.

#![allow(clippy::unwrap_used)]

use approx::assert_relative_eq;
use symech_actuator::{Actuator, LinearPathway, LinearSpring, Load, Pathway, TorqueActuator};
use symech_expr::{Bindings, Expr};
use symech_kinematics::{Mechanism, PinJoint};

#[test]
fn test_pathway_across_pin_joint() {
    let mut mech = Mechanism::new();
    let n = mech.frame("N");
    let a = mech.frame("A");
    let q = Expr::dynamic("q");
    let _joint = PinJoint::new(&mut mech, "pin", &n, &a, q, n.z()).unwrap();

    // One attachment on each side of the joint, both one unit out along the
    // local x axis.
    let pa = mech.point("pA");
    let pb = mech.point("pB");
    let pivot = mech.point("pivot");
    mech.set_position(&pa, &pivot, n.x()).unwrap();
    mech.set_position(&pb, &pivot, a.x()).unwrap();

    let pathway = LinearPathway::new(pa, pb).unwrap();
    let length = pathway.length(&mech).unwrap();

    // |A.x - N.x|^2 = 2 - 2*cos(q).
    let bindings = Bindings::new().with("q", 1.3);
    let expected = (2.0 - 2.0 * 1.3f64.cos()).sqrt();
    assert_relative_eq!(length.eval(&bindings).unwrap(), expected, epsilon = 1e-12);

    // At q = 0 the attachments coincide and at q = pi they are 2 apart.
    let closed = Bindings::new().with("q", 0.0);
    assert_relative_eq!(length.eval(&closed).unwrap(), 0.0, epsilon = 1e-12);
    let open = Bindings::new().with("q", std::f64::consts::PI);
    assert_relative_eq!(length.eval(&open).unwrap(), 2.0, epsilon = 1e-12);
}

#[test]
fn test_extension_velocity_matches_finite_difference() {
    let mut mech = Mechanism::new();
    let n = mech.frame("N");
    let pa = mech.point("pA");
    let pb = mech.point("pB");
    let q1 = Expr::dynamic("q1");
    let q2 = Expr::dynamic("q2");
    mech.set_position(&pb, &pa, n.x() * q1 + n.y() * q2).unwrap();

    let pathway = LinearPathway::new(pa, pb).unwrap();
    let length = pathway.length(&mech).unwrap();
    let velocity = pathway.extension_velocity(&mech).unwrap();

    let at = |q1: f64, q2: f64| {
        Bindings::new()
            .with("q1", q1)
            .with("q2", q2)
            .with("q1'", 0.7)
            .with("q2'", -0.4)
    };
    let h = 1e-6;
    // Advance the coordinates along their rates and difference the length.
    let forward = length.eval(&at(1.0 + 0.7 * h, 2.0 - 0.4 * h)).unwrap();
    let backward = length.eval(&at(1.0 - 0.7 * h, 2.0 + 0.4 * h)).unwrap();
    let numeric = (forward - backward) / (2.0 * h);
    assert_relative_eq!(
        velocity.eval(&at(1.0, 2.0)).unwrap(),
        numeric,
        epsilon = 1e-6
    );
}

#[test]
fn test_non_unit_direction_scales_out_of_loads() {
    let mut mech = Mechanism::new();
    let n = mech.frame("N");
    let pa = mech.point("pA");
    let pb = mech.point("pB");
    let q1 = Expr::dynamic("q1");
    // Displacement 2*q1 along x: the 2 must cancel from the unit vector.
    mech.set_position(&pb, &pa, n.x() * (Expr::int(2) * q1.clone()))
        .unwrap();

    let pathway = LinearPathway::new(pa.clone(), pb).unwrap();
    assert_eq!(
        pathway.length(&mech).unwrap(),
        Expr::int(2) * q1.clone().powi(2).sqrt()
    );

    let force = Expr::symbol("F");
    let loads = pathway.to_loads(&force, &mech).unwrap();
    let direction = q1.clone() * q1.powi(2).sqrt().powi(-1);
    assert_eq!(
        loads[0],
        Load::force(pa, n.x() * (-force * direction))
    );
}

#[test]
fn test_spring_and_torque_across_joint_balance_numerically() {
    let mut mech = Mechanism::new();
    let n = mech.frame("N");
    let a = mech.frame("A");
    let q = Expr::dynamic("q");
    let joint = PinJoint::new(&mut mech, "pin", &n, &a, q, n.z()).unwrap();

    let pa = mech.point("pA");
    let pb = mech.point("pB");
    let pivot = mech.point("pivot");
    mech.set_position(&pa, &pivot, n.x()).unwrap();
    mech.set_position(&pb, &pivot, a.x()).unwrap();

    let spring = LinearSpring::new(Expr::symbol("k"), LinearPathway::new(pa, pb).unwrap())
        .unwrap();
    let torque = TorqueActuator::at_pin_joint(Expr::symbol("T"), &joint).unwrap();

    let bindings = Bindings::new().with("q", 0.9).with("k", 5.0).with("T", 2.0);

    // Pathway loads are equal and opposite.
    let spring_loads = spring.to_loads(&mech).unwrap();
    let total = spring_loads[0].vector().clone() + spring_loads[1].vector().clone();
    assert_relative_eq!(
        total.eval(&n, &mech, &bindings).unwrap(),
        nalgebra::Vector3::zeros(),
        epsilon = 1e-12
    );

    // Torque loads cancel frame against frame.
    let torque_loads = torque.to_loads(&mech).unwrap();
    let total = torque_loads[0].vector().clone() + torque_loads[1].vector().clone();
    assert!(total.is_zero());
}
