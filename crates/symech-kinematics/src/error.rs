//! Error types for mechanism construction and geometric queries.

use thiserror::Error;

use symech_expr::ExprError;

/// Errors from building or querying a [`Mechanism`](crate::Mechanism).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KinError {
    /// A frame handle does not belong to this mechanism.
    #[error("frame {name} is not registered in this mechanism")]
    UnknownFrame {
        /// Name carried by the stray handle.
        name: String,
    },

    /// A point handle does not belong to this mechanism.
    #[error("point {name} is not registered in this mechanism")]
    UnknownPoint {
        /// Name carried by the stray handle.
        name: String,
    },

    /// No chain of orientations connects the two frames.
    #[error("no orientation path between frames {from} and {to}")]
    DisconnectedFrames {
        /// Frame the query started from.
        from: String,
        /// Frame the query could not reach.
        to: String,
    },

    /// No chain of positions connects the two points.
    #[error("no position path between points {from} and {to}")]
    DisconnectedPoints {
        /// Point the query started from.
        from: String,
        /// Point the query could not reach.
        to: String,
    },

    /// A rotation axis with exactly zero length was supplied.
    #[error("rotation axis is identically zero")]
    ZeroAxis,

    /// A rotation axis mixed basis vectors of several frames, or used a
    /// frame other than the two being oriented.
    #[error("rotation axis must be fixed in one of the frames being oriented")]
    AxisFrame,

    /// An orientation between a frame and itself was requested.
    #[error("cannot orient frame {name} relative to itself")]
    IdenticalFrames {
        /// The offending frame.
        name: String,
    },

    /// A position between a point and itself was requested.
    #[error("cannot position point {name} relative to itself")]
    IdenticalPoints {
        /// The offending point.
        name: String,
    },

    /// A joint coordinate that never varies with time was supplied.
    #[error("joint coordinate {symbol} is not time-varying")]
    NotTimeVarying {
        /// Printed form of the rejected coordinate.
        symbol: String,
    },

    /// A scalar operation failed.
    #[error(transparent)]
    Expr(#[from] ExprError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = KinError::DisconnectedFrames {
            from: "N".to_owned(),
            to: "A".to_owned(),
        };
        assert_eq!(err.to_string(), "no orientation path between frames N and A");

        let err = KinError::ZeroAxis;
        assert!(err.to_string().contains("zero"));
    }

    #[test]
    fn test_expr_error_wraps_transparently() {
        let inner = ExprError::Unbound {
            symbol: "k".to_owned(),
        };
        let err = KinError::from(inner.clone());
        assert_eq!(err.to_string(), inner.to_string());
    }
}
