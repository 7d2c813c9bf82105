use serde::{Deserialize, Serialize};

use super::shape::{Color, Shape, ShapeError, ShapeRecord};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum CatalogError {
    #[display("shape catalog is empty")]
    Empty,
    #[display("shape #{index} is invalid: {source}")]
    InvalidShape { index: usize, source: ShapeError },
}

/// Index of a shape inside a [`ShapeCatalog`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    derive_more::Display,
    Serialize,
    Deserialize,
)]
#[display("shape#{_0}")]
pub struct ShapeId(usize);

impl ShapeId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Immutable set of shapes that blocks are drawn from.
///
/// Loaded once per session and never mutated afterwards. A catalog always
/// holds at least one shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ShapeRecord>", into = "Vec<Shape>")]
pub struct ShapeCatalog {
    shapes: Vec<Shape>,
}

impl TryFrom<Vec<ShapeRecord>> for ShapeCatalog {
    type Error = CatalogError;

    fn try_from(records: Vec<ShapeRecord>) -> Result<Self, Self::Error> {
        Self::from_records(records)
    }
}

impl From<ShapeCatalog> for Vec<Shape> {
    fn from(catalog: ShapeCatalog) -> Self {
        catalog.shapes
    }
}

impl ShapeCatalog {
    pub fn new(shapes: Vec<Shape>) -> Result<Self, CatalogError> {
        if shapes.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { shapes })
    }

    /// Validates raw shape records, reporting the first invalid one by index.
    pub fn from_records(records: Vec<ShapeRecord>) -> Result<Self, CatalogError> {
        let shapes = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                Shape::try_from(record).map_err(|source| CatalogError::InvalidShape { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(shapes)
    }

    /// The built-in catalog used when no shapes are configured.
    ///
    /// Lines from one to five cells, squares, corners, and the T/S/Z/L
    /// tetrominoes. Orientation variety comes from spawn rotation.
    #[must_use]
    pub fn standard() -> Self {
        const ARTS: [(&str, Color); 13] = [
            ("#", Color::new(0xf4, 0xd3, 0x5e)),
            ("##", Color::new(0x9b, 0xd7, 0x70)),
            ("###", Color::new(0x5e, 0xc4, 0xf4)),
            ("####", Color::new(0x3a, 0x7b, 0xd5)),
            ("#####", Color::new(0x7a, 0x4f, 0xd6)),
            ("##\n##", Color::new(0xf2, 0x8c, 0x28)),
            ("###\n###\n###", Color::new(0xe0, 0x4b, 0x4b)),
            ("#.\n##", Color::new(0x4b, 0xc0, 0x9e)),
            ("#..\n#..\n###", Color::new(0xd6, 0x4f, 0xa3)),
            (".#.\n###", Color::new(0xb5, 0x6b, 0xe8)),
            (".##\n##.", Color::new(0x6b, 0xe8, 0x8a)),
            ("##.\n.##", Color::new(0xe8, 0x6b, 0x6b)),
            ("#.\n#.\n##", Color::new(0xe8, 0xa9, 0x3a)),
        ];
        let shapes = ARTS
            .iter()
            .map(|(art, color)| {
                Shape::from_ascii(art, *color).expect("built-in shape art should be valid")
            })
            .collect();
        Self { shapes }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(id.0)
    }

    /// Returns the id of the shape at `index`, if it exists.
    #[must_use]
    pub fn id(&self, index: usize) -> Option<ShapeId> {
        (index < self.shapes.len()).then_some(ShapeId(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ShapeId, &Shape)> + '_ {
        self.shapes
            .iter()
            .enumerate()
            .map(|(index, shape)| (ShapeId(index), shape))
    }
}

impl Default for ShapeCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
