//! Push direction vectors.

/// A direction with components in {-1, 0, 1}. Positive `x` points right,
/// positive `y` points down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Direction {
    /// Horizontal component.
    pub x: i32,
    /// Vertical component.
    pub y: i32,
}

impl Direction {
    /// Push towards increasing columns.
    pub const RIGHT: Self = Self::new(1, 0);
    /// Push towards decreasing columns.
    pub const LEFT: Self = Self::new(-1, 0);
    /// Push towards decreasing rows.
    pub const UP: Self = Self::new(0, -1);
    /// Push towards increasing rows.
    pub const DOWN: Self = Self::new(0, 1);

    /// Construct a direction; components are clamped into {-1, 0, 1}.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self {
            x: unit(x),
            y: unit(y),
        }
    }

    /// Lock a delta vector onto the eight compass directions.
    ///
    /// A component is kept when the angle of the vector lies within 60° of
    /// that axis, so near-axis vectors snap to a single component and
    /// diagonal ones keep both. A zero vector yields a zero direction.
    pub fn from_delta(dx: f64, dy: f64) -> Self {
        let angle = (dy / dx).atan();
        let x = if angle.cos().abs() > 0.5 { sign(dx) } else { 0 };
        let y = if angle.sin().abs() > 0.5 { sign(dy) } else { 0 };
        Self { x, y }
    }

    /// The opposite direction.
    #[inline]
    #[must_use]
    pub const fn reversed(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }

    /// The direction with its components swapped.
    #[inline]
    #[must_use]
    pub const fn swapped(self) -> Self {
        Self {
            x: self.y,
            y: self.x,
        }
    }

    /// Dot product, used to score how well a candidate agrees with a push.
    #[inline]
    pub const fn dot(self, other: Self) -> i32 {
        self.x * other.x + self.y * other.y
    }

    /// Number of non-zero components.
    #[inline]
    pub const fn component_count(self) -> i32 {
        self.x.abs() + self.y.abs()
    }

    /// Copy with one component replaced.
    #[inline]
    #[must_use]
    pub(super) fn with_component(self, axis: usize, value: i32) -> Self {
        if axis == 0 {
            Self { x: value, ..self }
        } else {
            Self { y: value, ..self }
        }
    }
}

/// Clamp an integer component into {-1, 0, 1}.
#[inline]
const fn unit(v: i32) -> i32 {
    if v > 0 {
        1
    } else if v < 0 {
        -1
    } else {
        0
    }
}

/// Sign of a float as an integer, with zero (and NaN) mapping to zero.
#[inline]
fn sign(v: f64) -> i32 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}
