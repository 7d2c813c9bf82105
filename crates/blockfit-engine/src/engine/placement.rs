//! Exhaustive placement search.
//!
//! All functions here are read-only scans over a [`Board`]. They try every
//! candidate origin and ask [`Board::can_place`], which costs
//! `O(width × height × |shape|)` per shape. Boards and shapes are small, and
//! the scan only runs when a placement has been committed, so no spatial
//! index is kept.

use crate::core::{Board, Cell, Shape};

/// Candidate origins for `shape`, row-major.
///
/// Only origins whose translated bounding box lies inside the board are
/// produced. Every other origin would put some cell out of bounds and can
/// never pass [`Board::can_place`].
fn candidate_origins(board: &Board, shape: &Shape) -> impl Iterator<Item = Cell> + use<> {
    let (min, max) = shape.bounds();
    let width = i32::try_from(board.width()).unwrap_or(i32::MAX);
    let height = i32::try_from(board.height()).unwrap_or(i32::MAX);
    let xs = -min.dx..width.saturating_sub(max.dx);
    let ys = -min.dy..height.saturating_sub(max.dy);
    ys.flat_map(move |y| xs.clone().map(move |x| Cell::new(x, y)))
}

/// Iterates over every origin at which `shape` can currently be placed.
pub fn legal_placements<'a>(board: &'a Board, shape: &'a Shape) -> impl Iterator<Item = Cell> + 'a {
    candidate_origins(board, shape).filter(move |&origin| board.can_place(shape, origin))
}

/// Returns the first legal origin in row-major order, if any.
#[must_use]
pub fn first_legal_placement(board: &Board, shape: &Shape) -> Option<Cell> {
    legal_placements(board, shape).next()
}

/// Checks whether `shape` fits anywhere on the board.
///
/// Short-circuits on the first legal origin.
#[must_use]
pub fn exists_legal_placement(board: &Board, shape: &Shape) -> bool {
    first_legal_placement(board, shape).is_some()
}

/// Game-over oracle: does at least one of `shapes` fit anywhere?
///
/// Returns `false` for an empty set of shapes.
///
/// # Example
///
/// ```
/// use blockfit_engine::{placement, BlockId, Board, Color, Shape};
///
/// let board = Board::from_ascii("##.\n###\n###", BlockId::new(0, 0));
/// let dot = Shape::from_ascii("#", Color::WHITE).unwrap();
/// let square = Shape::from_ascii("##\n##", Color::WHITE).unwrap();
///
/// assert!(placement::any_block_placeable(&board, [&square, &dot]));
/// assert!(!placement::any_block_placeable(&board, [&square]));
/// ```
pub fn any_block_placeable<'a, I>(board: &Board, shapes: I) -> bool
where
    I: IntoIterator<Item = &'a Shape>,
{
    shapes
        .into_iter()
        .any(|shape| exists_legal_placement(board, shape))
}
