//! End-to-end model: a forced mass-spring-damper sliding along one axis.
//!
//! A block attached to the origin through a spring, a damper, and a driving
//! force. The three actuators are assembled over one shared pathway and
//! their loads summed, then checked both symbolically and numerically.

#![allow(clippy::unwrap_used)]

use approx::assert_relative_eq;
use symech_actuator::{
    Actuator, ForceActuator, LinearDamper, LinearPathway, LinearSpring, Load,
};
use symech_expr::{Bindings, Expr};
use symech_kinematics::{Frame, Mechanism, Point, RigidBody, Vector};

struct Model {
    mech: Mechanism,
    n: Frame,
    origin: Point,
    block: RigidBody,
}

fn build_model() -> Model {
    let mut mech = Mechanism::new();
    let n = mech.frame("N");
    let origin = mech.point("origin");
    let block = RigidBody::new(&mut mech, "block");
    let q = Expr::dynamic("q");
    mech.set_position(block.masscenter(), &origin, n.x() * q)
        .unwrap();
    Model {
        mech,
        n,
        origin,
        block,
    }
}

fn net_force_on(point: &Point, loads: &[Load]) -> Vector {
    let mut total = Vector::zero();
    for load in loads {
        if let Load::Force { point: p, vector } = load {
            if p == point {
                total = total + vector.clone();
            }
        }
    }
    total
}

#[test]
fn test_spring_force_on_block_is_linear_in_coordinate() {
    let model = build_model();
    let q = Expr::dynamic("q");
    let k = Expr::symbol("k");

    let pathway =
        LinearPathway::new(model.origin.clone(), model.block.masscenter().clone())
            .unwrap();
    let spring = LinearSpring::new(&k, pathway).unwrap();
    let loads = spring.to_loads(&model.mech).unwrap();

    // The radical in the force magnitude cancels against the unit vector:
    // the load on the block is exactly -k*q along N.x.
    let on_block = net_force_on(model.block.masscenter(), &loads);
    assert_eq!(on_block, model.n.x() * (-(k) * q));
}

#[test]
fn test_damper_force_on_block_is_linear_in_speed() {
    let model = build_model();
    let q = Expr::dynamic("q");
    let c = Expr::symbol("c");

    let pathway =
        LinearPathway::new(model.origin.clone(), model.block.masscenter().clone())
            .unwrap();
    let damper = LinearDamper::new(&c, pathway).unwrap();
    let loads = damper.to_loads(&model.mech).unwrap();

    let on_block = net_force_on(model.block.masscenter(), &loads);
    assert_eq!(on_block, model.n.x() * (-(c) * q.diff()));
}

#[test]
fn test_assembled_loads_sum_symbolically() {
    let model = build_model();
    let q = Expr::dynamic("q");
    let k = Expr::symbol("k");
    let c = Expr::symbol("c");
    let f = Expr::symbol("F");

    let pathway =
        LinearPathway::new(model.origin.clone(), model.block.masscenter().clone())
            .unwrap();
    let actuators: Vec<Box<dyn Actuator>> = vec![
        Box::new(LinearSpring::new(&k, pathway.clone()).unwrap()),
        Box::new(LinearDamper::new(&c, pathway.clone()).unwrap()),
        Box::new(ForceActuator::new(&f, pathway).unwrap()),
    ];

    let mut loads = Vec::new();
    for actuator in &actuators {
        loads.extend(actuator.to_loads(&model.mech).unwrap());
    }
    assert_eq!(loads.len(), 6);

    // Spring and damper contributions are radical-free; the driving force
    // keeps its direction factor q/sqrt(q**2) (its sign depends on which
    // side of the origin the block sits).
    let direction = q.clone() * q.clone().powi(2).sqrt().powi(-1);
    let expected = model.n.x()
        * (f * direction - k * q.clone() - c * q.diff());
    assert_eq!(net_force_on(model.block.masscenter(), &loads), expected);
}

#[test]
fn test_assembled_loads_evaluate_numerically() {
    let model = build_model();
    let k = Expr::symbol("k");
    let c = Expr::symbol("c");
    let f = Expr::symbol("F");

    let pathway =
        LinearPathway::new(model.origin.clone(), model.block.masscenter().clone())
            .unwrap();
    let actuators: Vec<Box<dyn Actuator>> = vec![
        Box::new(LinearSpring::new(&k, pathway.clone()).unwrap()),
        Box::new(LinearDamper::new(&c, pathway.clone()).unwrap()),
        Box::new(ForceActuator::new(&f, pathway).unwrap()),
    ];

    let mut loads = Vec::new();
    for actuator in &actuators {
        loads.extend(actuator.to_loads(&model.mech).unwrap());
    }

    // Block displaced to q = 0.5 moving at q' = 2, with k = 10, c = 3,
    // F = 7: net = F - k*q - c*q' = 7 - 5 - 6 = -4 along N.x.
    let bindings = Bindings::new()
        .with("q", 0.5)
        .with("q'", 2.0)
        .with("k", 10.0)
        .with("c", 3.0)
        .with("F", 7.0);
    let total = net_force_on(model.block.masscenter(), &loads)
        .eval(&model.n, &model.mech, &bindings)
        .unwrap();
    assert_relative_eq!(total, nalgebra::Vector3::new(-4.0, 0.0, 0.0));

    // Reaction on the origin balances exactly.
    let reaction = net_force_on(&model.origin, &loads)
        .eval(&model.n, &model.mech, &bindings)
        .unwrap();
    assert_relative_eq!(total + reaction, nalgebra::Vector3::zeros());
}
