//! Rigid bodies and the trait for anything that carries a frame.

use std::sync::Arc;

use symech_expr::Expr;

use crate::mechanism::{Frame, Mechanism, Point};

/// Anything with an attached reference frame.
///
/// Joint and actuator constructors accept `impl HasFrame`, so a bare
/// [`Frame`] and a [`RigidBody`] are interchangeable wherever only the frame
/// matters.
pub trait HasFrame {
    /// The attached frame.
    fn frame(&self) -> Frame;
}

impl HasFrame for Frame {
    fn frame(&self) -> Frame {
        self.clone()
    }
}

impl HasFrame for RigidBody {
    fn frame(&self) -> Frame {
        self.frame.clone()
    }
}

impl<T: HasFrame> HasFrame for &T {
    fn frame(&self) -> Frame {
        (**self).frame()
    }
}

/// A rigid body: a frame, a mass center, and a symbolic mass.
#[derive(Debug, Clone)]
pub struct RigidBody {
    name: Arc<str>,
    frame: Frame,
    masscenter: Point,
    mass: Expr,
}

impl RigidBody {
    /// Create a body named `name`, registering `{name}_frame` and
    /// `{name}_masscenter` and introducing the mass symbol `{name}_mass`.
    pub fn new(mech: &mut Mechanism, name: &str) -> Self {
        let frame = mech.frame(&format!("{name}_frame"));
        Self::with_frame(mech, name, frame)
    }

    /// Create a body attached to an existing frame.
    pub fn with_frame(mech: &mut Mechanism, name: &str, frame: Frame) -> Self {
        let masscenter = mech.point(&format!("{name}_masscenter"));
        let mass = Expr::symbol(&format!("{name}_mass"));
        Self {
            name: Arc::from(name),
            frame,
            masscenter,
            mass,
        }
    }

    /// Replace the auto-generated mass with an explicit expression.
    #[must_use]
    pub fn with_mass(mut self, mass: Expr) -> Self {
        self.mass = mass;
        self
    }

    /// The body's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The body's mass center.
    #[must_use]
    pub fn masscenter(&self) -> &Point {
        &self.masscenter
    }

    /// The body's mass.
    #[must_use]
    pub fn mass(&self) -> &Expr {
        &self.mass
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registers_frame_and_masscenter() {
        let mut mech = Mechanism::new();
        let body = RigidBody::new(&mut mech, "crank");
        assert_eq!(body.name(), "crank");
        assert_eq!(body.frame().name(), "crank_frame");
        assert_eq!(body.masscenter().name(), "crank_masscenter");
        assert_eq!(*body.mass(), Expr::symbol("crank_mass"));
    }

    #[test]
    fn test_with_frame_reuses_frame() {
        let mut mech = Mechanism::new();
        let n = mech.frame("N");
        let body = RigidBody::with_frame(&mut mech, "ground", n.clone());
        assert_eq!(body.frame(), n);
    }

    #[test]
    fn test_with_mass_overrides() {
        let mut mech = Mechanism::new();
        let m = Expr::symbol("m");
        let body = RigidBody::new(&mut mech, "bob").with_mass(m.clone());
        assert_eq!(*body.mass(), m);
    }

    #[test]
    fn test_has_frame_is_uniform_over_frames_and_bodies() {
        let mut mech = Mechanism::new();
        let n = mech.frame("N");
        let body = RigidBody::with_frame(&mut mech, "ground", n.clone());

        fn frame_of(value: &impl HasFrame) -> Frame {
            value.frame()
        }
        assert_eq!(frame_of(&n), frame_of(&body));
    }
}
