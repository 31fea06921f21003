//! Axes, directions, and the six axis-aligned shift vectors.

use std::fmt;

/// One of the three cube axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Bit position within a storage row.
    X,
    /// Cathode layer.
    Y,
    /// Anode group.
    Z,
}

impl Axis {
    /// All axes, in `X, Y, Z` order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// The vector pointing along this axis in the given direction.
    pub fn towards(self, direction: Direction) -> AxisVector {
        AxisVector {
            axis: self,
            direction,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}

/// Sign of travel along an axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards increasing coordinates.
    Positive,
    /// Towards decreasing coordinates.
    Negative,
}

impl Direction {
    /// The opposite direction.
    pub fn reversed(self) -> Direction {
        match self {
            Direction::Positive => Direction::Negative,
            Direction::Negative => Direction::Positive,
        }
    }
}

/// An axis paired with a direction: one of the six shift vectors.
///
/// The associated constants ([`AxisVector::POS_X`] ... [`AxisVector::NEG_Z`])
/// are the complete set of values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AxisVector {
    /// The axis of travel.
    pub axis: Axis,
    /// The sign of travel.
    pub direction: Direction,
}

impl AxisVector {
    /// `+X`.
    pub const POS_X: AxisVector = AxisVector {
        axis: Axis::X,
        direction: Direction::Positive,
    };
    /// `-X`.
    pub const NEG_X: AxisVector = AxisVector {
        axis: Axis::X,
        direction: Direction::Negative,
    };
    /// `+Y`.
    pub const POS_Y: AxisVector = AxisVector {
        axis: Axis::Y,
        direction: Direction::Positive,
    };
    /// `-Y` (gravity).
    pub const NEG_Y: AxisVector = AxisVector {
        axis: Axis::Y,
        direction: Direction::Negative,
    };
    /// `+Z`.
    pub const POS_Z: AxisVector = AxisVector {
        axis: Axis::Z,
        direction: Direction::Positive,
    };
    /// `-Z`.
    pub const NEG_Z: AxisVector = AxisVector {
        axis: Axis::Z,
        direction: Direction::Negative,
    };

    /// All six vectors.
    pub const ALL: [AxisVector; 6] = [
        Self::POS_X,
        Self::NEG_X,
        Self::POS_Y,
        Self::NEG_Y,
        Self::POS_Z,
        Self::NEG_Z,
    ];

    /// Same axis, opposite direction.
    pub fn reversed(self) -> AxisVector {
        AxisVector {
            axis: self.axis,
            direction: self.direction.reversed(),
        }
    }

    /// Whether this vector points towards increasing coordinates.
    pub fn is_positive(self) -> bool {
        self.direction == Direction::Positive
    }
}

impl fmt::Display for AxisVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self.direction {
            Direction::Positive => '+',
            Direction::Negative => '-',
        };
        write!(f, "{sign}{}", self.axis)
    }
}
