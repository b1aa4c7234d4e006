//! The mechanism registry: frames, points, and the graphs connecting them.
//!
//! A [`Mechanism`] owns every reference frame and point of a model. Callers
//! hold cheap [`Frame`] and [`Point`] handles; all geometric state (relative
//! orientations, relative positions) lives in the registry, so handles stay
//! `Clone + Copy`-cheap and the borrow checker stays out of model-building
//! code.
//!
//! Orientations form an undirected graph over frames, positions one over
//! points. Queries ([`Mechanism::dcm`], [`Mechanism::position`]) walk the
//! graph breadth-first and compose the links along the discovered path.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use symech_expr::Expr;

use crate::error::KinError;
use crate::rotation::Rotation;
use crate::vector::Vector;

/// Handle to a reference frame registered in a [`Mechanism`].
///
/// Identity is the registry slot; the name rides along for display.
#[derive(Debug, Clone)]
pub struct Frame {
    pub(crate) id: usize,
    pub(crate) name: Arc<str>,
}

impl Frame {
    /// The frame's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit vector along this frame's first basis direction.
    #[must_use]
    pub fn x(&self) -> Vector {
        Vector::fixed(self.clone(), [Expr::one(), Expr::zero(), Expr::zero()])
    }

    /// Unit vector along this frame's second basis direction.
    #[must_use]
    pub fn y(&self) -> Vector {
        Vector::fixed(self.clone(), [Expr::zero(), Expr::one(), Expr::zero()])
    }

    /// Unit vector along this frame's third basis direction.
    #[must_use]
    pub fn z(&self) -> Vector {
        Vector::fixed(self.clone(), [Expr::zero(), Expr::zero(), Expr::one()])
    }
}

impl PartialEq for Frame {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Frame {}

impl PartialOrd for Frame {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frame {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.id.cmp(&other.id)
    }
}

impl std::hash::Hash for Frame {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Handle to a point registered in a [`Mechanism`].
#[derive(Debug, Clone)]
pub struct Point {
    pub(crate) id: usize,
    pub(crate) name: Arc<str>,
}

impl Point {
    /// The point's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Point {}

impl std::hash::Hash for Point {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

struct FrameData {
    name: Arc<str>,
    links: Vec<(usize, Rotation)>,
}

struct PointData {
    name: Arc<str>,
    links: Vec<(usize, Vector)>,
}

/// Registry of frames and points with their relative geometry.
#[derive(Default)]
pub struct Mechanism {
    frames: Vec<FrameData>,
    points: Vec<PointData>,
}

impl fmt::Debug for Mechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mechanism")
            .field("frames", &self.frames.len())
            .field("points", &self.points.len())
            .finish()
    }
}

impl Mechanism {
    /// An empty mechanism.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a frame, or return the existing handle if the name is
    /// already taken.
    pub fn frame(&mut self, name: &str) -> Frame {
        if let Some(id) = self.frames.iter().position(|f| &*f.name == name) {
            return Frame {
                id,
                name: Arc::clone(&self.frames[id].name),
            };
        }
        let name: Arc<str> = Arc::from(name);
        self.frames.push(FrameData {
            name: Arc::clone(&name),
            links: Vec::new(),
        });
        debug!(frame = %name, id = self.frames.len() - 1, "registered frame");
        Frame {
            id: self.frames.len() - 1,
            name,
        }
    }

    /// Register a point, or return the existing handle if the name is
    /// already taken.
    pub fn point(&mut self, name: &str) -> Point {
        if let Some(id) = self.points.iter().position(|p| &*p.name == name) {
            return Point {
                id,
                name: Arc::clone(&self.points[id].name),
            };
        }
        let name: Arc<str> = Arc::from(name);
        self.points.push(PointData {
            name: Arc::clone(&name),
            links: Vec::new(),
        });
        debug!(point = %name, id = self.points.len() - 1, "registered point");
        Point {
            id: self.points.len() - 1,
            name,
        }
    }

    pub(crate) fn check_frame(&self, frame: &Frame) -> Result<usize, KinError> {
        match self.frames.get(frame.id) {
            Some(data) if data.name == frame.name => Ok(frame.id),
            _ => Err(KinError::UnknownFrame {
                name: frame.name.to_string(),
            }),
        }
    }

    pub(crate) fn check_point(&self, point: &Point) -> Result<usize, KinError> {
        match self.points.get(point.id) {
            Some(data) if data.name == point.name => Ok(point.id),
            _ => Err(KinError::UnknownPoint {
                name: point.name.to_string(),
            }),
        }
    }

    /// Orient `child` relative to `parent`: `child` is rotated from
    /// coincidence with `parent` by `angle` about `axis`.
    ///
    /// The axis must be a nonzero vector fixed in either frame (a rotation
    /// axis has the same components in both). It is normalized symbolically,
    /// so non-unit axes are fine.
    pub fn orient_axis(
        &mut self,
        child: &Frame,
        parent: &Frame,
        axis: &Vector,
        angle: &Expr,
    ) -> Result<(), KinError> {
        let child_id = self.check_frame(child)?;
        let parent_id = self.check_frame(parent)?;
        if child_id == parent_id {
            return Err(KinError::IdenticalFrames {
                name: child.name.to_string(),
            });
        }

        if axis.is_zero() {
            return Err(KinError::ZeroAxis);
        }
        let (axis_frame, components) =
            axis.single_frame().ok_or(KinError::AxisFrame)?;
        let axis_frame_id = self.check_frame(axis_frame)?;
        if axis_frame_id != parent_id && axis_frame_id != child_id {
            return Err(KinError::AxisFrame);
        }

        let magnitude = (components[0].clone() * components[0].clone()
            + components[1].clone() * components[1].clone()
            + components[2].clone() * components[2].clone())
        .sqrt();
        let unit = [
            components[0].clone() / magnitude.clone(),
            components[1].clone() / magnitude.clone(),
            components[2].clone() / magnitude,
        ];

        let parent_from_child = Rotation::from_axis_angle(&unit, angle);
        let child_from_parent = parent_from_child.transpose();
        self.frames[parent_id]
            .links
            .push((child_id, parent_from_child));
        self.frames[child_id]
            .links
            .push((parent_id, child_from_parent));
        debug!(
            child = %child.name,
            parent = %parent.name,
            angle = %angle,
            "oriented frame"
        );
        Ok(())
    }

    /// The direction cosine matrix `M` with
    /// `components_in_to = M * components_in_from`.
    pub fn dcm(&self, to: &Frame, from: &Frame) -> Result<Rotation, KinError> {
        let to_id = self.check_frame(to)?;
        let from_id = self.check_frame(from)?;
        if to_id == from_id {
            return Ok(Rotation::identity());
        }

        let mut visited = vec![false; self.frames.len()];
        let mut queue = VecDeque::new();
        visited[to_id] = true;
        queue.push_back((to_id, Rotation::identity()));
        while let Some((id, acc)) = queue.pop_front() {
            for (next, rel) in &self.frames[id].links {
                if visited[*next] {
                    continue;
                }
                trace!(from = id, to = *next, "walking orientation graph");
                let acc_next = acc.compose(rel);
                if *next == from_id {
                    return Ok(acc_next);
                }
                visited[*next] = true;
                queue.push_back((*next, acc_next));
            }
        }
        Err(KinError::DisconnectedFrames {
            from: to.name.to_string(),
            to: from.name.to_string(),
        })
    }

    /// Fix `point` at displacement `rel` from `from`.
    pub fn set_position(
        &mut self,
        point: &Point,
        from: &Point,
        rel: Vector,
    ) -> Result<(), KinError> {
        let point_id = self.check_point(point)?;
        let from_id = self.check_point(from)?;
        if point_id == from_id {
            return Err(KinError::IdenticalPoints {
                name: point.name.to_string(),
            });
        }
        for (frame, _) in rel.frames() {
            self.check_frame(frame)?;
        }
        debug!(point = %point.name, from = %from.name, "positioned point");
        // Re-setting replaces any prior relation between the same pair.
        self.points[from_id].links.retain(|(id, _)| *id != point_id);
        self.points[point_id].links.retain(|(id, _)| *id != from_id);
        self.points[from_id].links.push((point_id, -rel.clone()));
        self.points[point_id].links.push((from_id, rel));
        Ok(())
    }

    /// Displacement of `of` relative to `from` (the vector from `from` to
    /// `of`), summed along the position graph.
    pub fn position(&self, of: &Point, from: &Point) -> Result<Vector, KinError> {
        let of_id = self.check_point(of)?;
        let from_id = self.check_point(from)?;
        if of_id == from_id {
            return Ok(Vector::zero());
        }

        let mut visited = vec![false; self.points.len()];
        let mut queue = VecDeque::new();
        visited[of_id] = true;
        queue.push_back((of_id, Vector::zero()));
        while let Some((id, acc)) = queue.pop_front() {
            for (next, rel) in &self.points[id].links {
                if visited[*next] {
                    continue;
                }
                trace!(from = id, to = *next, "walking position graph");
                let acc_next = acc.clone() + rel.clone();
                if *next == from_id {
                    return Ok(acc_next);
                }
                visited[*next] = true;
                queue.push_back((*next, acc_next));
            }
        }
        Err(KinError::DisconnectedPoints {
            from: of.name.to_string(),
            to: from.name.to_string(),
        })
    }
}
