use std::{collections::HashSet, fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::cell::{Cell, Offset};

/// Errors raised when a shape definition is rejected.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ShapeError {
    #[display("shape has no cells")]
    Empty,
    #[display("shape contains duplicate cell {offset}")]
    DuplicateOffset { offset: Offset },
    #[display("invalid character {ch:?} at row {row} of shape art")]
    InvalidArt { ch: char, row: usize },
    #[display("shape cell {offset} lies outside the supported offset range")]
    OffsetOutOfRange { offset: Offset },
    #[display("shape spans {width}x{height} cells, wider than the supported extent")]
    TooLarge { width: usize, height: usize },
}

/// Display color of a block.
///
/// Purely cosmetic: no game logic reads it. Serialized as `"#rrggbb"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Self = Self::new(0xff, 0xff, 0xff);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid color {input:?}: expected format '#rrggbb'")]
pub struct ParseColorError {
    input: String,
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError {
            input: s.to_owned(),
        };
        let hex = s.strip_prefix('#').ok_or_else(err)?;
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        let num = u32::from_str_radix(hex, 16).map_err(|_| err())?;
        let [_, r, g, b] = num.to_be_bytes();
        Ok(Self { r, g, b })
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Serialized form of a [`Shape`], validated on conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeRecord {
    pub offsets: Vec<Offset>,
    #[serde(default)]
    pub color: Color,
}

/// An immutable block shape: a non-empty set of cell offsets plus a color.
///
/// The offset order is preserved as authored. Construction rejects empty
/// shapes, duplicate offsets, offsets outside `±MAX_OFFSET` and bounding
/// boxes spanning more than `MAX_OFFSET + 1` cells on an axis, so every
/// `Shape` in circulation is valid. Rotation keeps these limits.
///
/// # Example
///
/// ```
/// use blockfit_engine::{Color, Shape};
///
/// let l = Shape::from_ascii(
///     "
///     #.
///     #.
///     ##
///     ",
///     Color::WHITE,
/// )
/// .unwrap();
/// assert_eq!(l.len(), 4);
/// assert_eq!(l.size(), (2, 3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ShapeRecord", into = "ShapeRecord")]
pub struct Shape {
    offsets: Vec<Offset>,
    color: Color,
}

impl TryFrom<ShapeRecord> for Shape {
    type Error = ShapeError;

    fn try_from(record: ShapeRecord) -> Result<Self, Self::Error> {
        Self::new(record.offsets, record.color)
    }
}

impl From<Shape> for ShapeRecord {
    fn from(shape: Shape) -> Self {
        Self {
            offsets: shape.offsets,
            color: shape.color,
        }
    }
}

impl Shape {
    /// Largest absolute offset on either axis.
    pub const MAX_OFFSET: i32 = 1024;

    pub fn new(offsets: Vec<Offset>, color: Color) -> Result<Self, ShapeError> {
        if offsets.is_empty() {
            return Err(ShapeError::Empty);
        }
        let range = -Self::MAX_OFFSET..=Self::MAX_OFFSET;
        let mut seen = HashSet::with_capacity(offsets.len());
        for &offset in &offsets {
            if !range.contains(&offset.dx) || !range.contains(&offset.dy) {
                return Err(ShapeError::OffsetOutOfRange { offset });
            }
            if !seen.insert(offset) {
                return Err(ShapeError::DuplicateOffset { offset });
            }
        }
        let shape = Self { offsets, color };
        let (min, max) = shape.bounds();
        if max.dx - min.dx > Self::MAX_OFFSET || max.dy - min.dy > Self::MAX_OFFSET {
            let (width, height) = shape.size();
            return Err(ShapeError::TooLarge { width, height });
        }
        Ok(shape)
    }

    /// Builds a shape from ASCII art.
    ///
    /// `#` marks an occupied cell and `.` an empty one. Rows are given from
    /// top to bottom; blank lines and surrounding whitespace are ignored.
    pub fn from_ascii(art: &str, color: Color) -> Result<Self, ShapeError> {
        let mut offsets = vec![];
        let rows = art.lines().map(str::trim).filter(|line| !line.is_empty());
        for (row, line) in rows.enumerate() {
            for (column, ch) in line.chars().enumerate() {
                match ch {
                    '#' => {
                        #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                        let offset = Offset::new(column as i32, row as i32);
                        offsets.push(offset);
                    }
                    '.' => {}
                    _ => return Err(ShapeError::InvalidArt { ch, row }),
                }
            }
        }
        Self::new(offsets, color)
    }

    #[must_use]
    pub fn offsets(&self) -> &[Offset] {
        &self.offsets
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Number of cells the shape occupies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Always `false`; present for API symmetry with [`len`](Self::len).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Smallest and largest offsets on each axis, as `(min, max)`.
    #[must_use]
    pub fn bounds(&self) -> (Offset, Offset) {
        let mut min = self.offsets[0];
        let mut max = self.offsets[0];
        for offset in &self.offsets[1..] {
            min.dx = min.dx.min(offset.dx);
            min.dy = min.dy.min(offset.dy);
            max.dx = max.dx.max(offset.dx);
            max.dy = max.dy.max(offset.dy);
        }
        (min, max)
    }

    /// Width and height of the shape's bounding box.
    #[must_use]
    pub fn size(&self) -> (usize, usize) {
        let (min, max) = self.bounds();
        (
            (max.dx - min.dx).unsigned_abs() as usize + 1,
            (max.dy - min.dy).unsigned_abs() as usize + 1,
        )
    }

    /// Absolute cells covered when the shape is anchored at `origin`.
    ///
    /// Returns `None` if some cell would leave the `i32` coordinate range.
    /// Such an origin can never be on any board.
    pub fn cells_at(&self, origin: Cell) -> Option<impl Iterator<Item = Cell> + '_> {
        let (min, max) = self.bounds();
        origin.offset_by(min)?;
        origin.offset_by(max)?;
        Some(
            self.offsets
                .iter()
                .map(move |&offset| Cell::new(origin.x + offset.dx, origin.y + offset.dy)),
        )
    }

    /// Returns a copy rotated 90° clockwise.
    ///
    /// The result is re-anchored so that its bounding box starts at `(0, 0)`.
    #[must_use]
    pub fn rotated_right(&self) -> Self {
        let rotated: Vec<Offset> = self.offsets.iter().map(|o| o.rotated_right()).collect();
        let min_dx = rotated.iter().map(|o| o.dx).min().unwrap_or(0);
        let min_dy = rotated.iter().map(|o| o.dy).min().unwrap_or(0);
        Self {
            offsets: rotated
                .into_iter()
                .map(|o| Offset::new(o.dx - min_dx, o.dy - min_dy))
                .collect(),
            color: self.color,
        }
    }

    /// Returns a copy rotated clockwise by `quarter_turns` × 90°.
    #[must_use]
    pub fn rotated(&self, quarter_turns: u8) -> Self {
        let mut shape = self.clone();
        for _ in 0..quarter_turns % 4 {
            shape = shape.rotated_right();
        }
        shape
    }
}
