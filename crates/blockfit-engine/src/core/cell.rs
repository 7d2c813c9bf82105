use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Absolute board coordinate.
///
/// # Coordinate System
///
/// - (0, 0) is the top-left cell of the board
/// - X increases rightward (columns)
/// - Y increases downward (rows)
///
/// Coordinates are signed so that queries outside the board (for example an
/// origin dragged past the left edge) are representable and simply rejected
/// by [`Board::is_in_bounds`](crate::Board::is_in_bounds).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, derive_more::Display,
)]
#[display("({x}, {y})")]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the cell reached by applying `offset` to this cell.
    ///
    /// Returns `None` if either coordinate leaves the `i32` range.
    #[must_use]
    pub const fn offset_by(self, offset: Offset) -> Option<Self> {
        match (self.x.checked_add(offset.dx), self.y.checked_add(offset.dy)) {
            (Some(x), Some(y)) => Some(Self { x, y }),
            _ => None,
        }
    }
}

/// Relative cell position inside a shape.
///
/// Serialized as a two-element array `[dx, dy]`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, derive_more::Display,
)]
#[display("[{dx}, {dy}]")]
pub struct Offset {
    pub dx: i32,
    pub dy: i32,
}

impl Offset {
    #[must_use]
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Rotates the offset 90° clockwise around the origin.
    ///
    /// With Y pointing down, a clockwise quarter turn maps `(dx, dy)` to `(-dy, dx)`.
    #[must_use]
    pub const fn rotated_right(self) -> Self {
        Self {
            dx: -self.dy,
            dy: self.dx,
        }
    }
}

impl Serialize for Offset {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        [self.dx, self.dy].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Offset {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let [dx, dy] = <[i32; 2]>::deserialize(deserializer)?;
        Ok(Self { dx, dy })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_by() {
        let cell = Cell::new(3, 4);
        assert_eq!(cell.offset_by(Offset::new(1, -2)), Some(Cell::new(4, 2)));
        assert_eq!(cell.offset_by(Offset::default()), Some(cell));
    }

    #[test]
    fn test_offset_by_overflow() {
        assert_eq!(Cell::new(i32::MAX, 0).offset_by(Offset::new(1, 0)), None);
        assert_eq!(Cell::new(0, i32::MIN).offset_by(Offset::new(0, -1)), None);
        assert_eq!(
            Cell::new(i32::MAX, i32::MIN).offset_by(Offset::new(-1, 1)),
            Some(Cell::new(i32::MAX - 1, i32::MIN + 1))
        );
    }

    #[test]
    fn test_rotated_right_four_times_is_identity() {
        let offset = Offset::new(2, 1);
        let rotated = offset
            .rotated_right()
            .rotated_right()
            .rotated_right()
            .rotated_right();
        assert_eq!(rotated, offset);
        assert_eq!(offset.rotated_right(), Offset::new(-1, 2));
    }

    #[test]
    fn test_offset_serialization() {
        let offset = Offset::new(-1, 3);
        let serialized = serde_json::to_string(&offset).unwrap();
        assert_eq!(serialized, "[-1,3]");

        assert!(serde_json::from_str::<Offset>("[1]").is_err());
        assert!(serde_json::from_str::<Offset>("[1,2,3]").is_err());
        assert!(serde_json::from_str::<Offset>("\"1,2\"").is_err());
    }
}
