use std::{collections::HashMap, fmt};

use super::{cell::Cell, shape::Shape};

/// Identity of a block instance.
///
/// Stored in board cells as a non-owning back-reference to the block that
/// occupies them. The generation distinguishes successive blocks that reuse
/// the same pool slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
#[display("{index}v{generation}")]
pub struct BlockId {
    index: u32,
    generation: u32,
}

impl BlockId {
    #[must_use]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    #[must_use]
    pub const fn index(self) -> u32 {
        self.index
    }

    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("board dimensions must be positive, got {width}x{height}")]
pub struct BoardSizeError {
    width: usize,
    height: usize,
}

/// Result of scanning the board for full lines.
///
/// `cells` holds every cell to vacate exactly once, even where a full row and
/// a full column cross. [`lines_cleared`](Self::lines_cleared) counts rows and
/// columns separately, so a crossing row and column count as two lines.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineClear {
    pub rows: Vec<usize>,
    pub columns: Vec<usize>,
    pub cells: Vec<Cell>,
}

impl LineClear {
    #[must_use]
    pub fn lines_cleared(&self) -> usize {
        self.rows.len() + self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.columns.is_empty()
    }
}

/// An occupant touched by [`Board::clear`] and the cells it still holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearedOccupant {
    pub block: BlockId,
    pub remaining_cells: usize,
}

/// The occupancy grid.
///
/// Each cell is either empty or holds the [`BlockId`] of the block occupying
/// it. The board also counts how many cells each occupant still holds, which
/// is how callers learn that a block has been cleared away completely.
///
/// # Example
///
/// ```
/// use blockfit_engine::{BlockId, Board, Cell, Color, Shape};
///
/// let mut board = Board::new(9, 9).unwrap();
/// let square = Shape::from_ascii("##\n##", Color::WHITE).unwrap();
///
/// assert!(board.can_place(&square, Cell::new(7, 7)));
/// assert!(!board.can_place(&square, Cell::new(8, 8)));
///
/// board.place(&square, Cell::new(7, 7), BlockId::new(0, 0));
/// assert_eq!(board.occupied_count(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Option<BlockId>>,
    occupant_cells: HashMap<BlockId, usize>,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Result<Self, BoardSizeError> {
        if width == 0 || height == 0 {
            return Err(BoardSizeError { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![None; width * height],
            occupant_cells: HashMap::new(),
        })
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        let x = usize::try_from(cell.x).ok().filter(|&x| x < self.width)?;
        let y = usize::try_from(cell.y).ok().filter(|&y| y < self.height)?;
        Some(y * self.width + x)
    }

    #[must_use]
    pub fn is_in_bounds(&self, cell: Cell) -> bool {
        self.index(cell).is_some()
    }

    /// Returns the occupant of `cell`, or `None` if the cell is empty or out of bounds.
    #[must_use]
    pub fn occupant(&self, cell: Cell) -> Option<BlockId> {
        self.index(cell).and_then(|i| self.cells[i])
    }

    #[must_use]
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.occupant(cell).is_some()
    }

    /// Number of occupied cells on the board.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.occupant_cells.values().sum()
    }

    /// Number of cells `block` currently occupies.
    #[must_use]
    pub fn cells_of(&self, block: BlockId) -> usize {
        self.occupant_cells.get(&block).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Iterates over all cells in row-major order (top row first).
    pub fn all_cells(&self) -> impl Iterator<Item = Cell> + use<> {
        #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        fn cell_at(width: usize, i: usize) -> Cell {
            Cell::new((i % width) as i32, (i / width) as i32)
        }
        let width = self.width;
        (0..self.width * self.height).map(move |i| cell_at(width, i))
    }

    /// Checks whether `shape` anchored at `origin` fits entirely on empty cells.
    ///
    /// Any cell out of bounds or already occupied makes the whole placement
    /// invalid, including origins so far away that a cell would overflow the
    /// coordinate range. Nothing is modified.
    #[must_use]
    pub fn can_place(&self, shape: &Shape, origin: Cell) -> bool {
        shape.cells_at(origin).is_some_and(|mut cells| {
            cells.all(|cell| self.index(cell).is_some_and(|i| self.cells[i].is_none()))
        })
    }

    /// Marks every cell of `shape` at `origin` as occupied by `occupant`.
    ///
    /// # Panics
    ///
    /// Panics if [`can_place`](Self::can_place) does not hold. Callers must check first.
    pub fn place(&mut self, shape: &Shape, origin: Cell, occupant: BlockId) {
        assert!(
            self.can_place(shape, origin),
            "placement of {occupant} at {origin} must be validated before committing"
        );
        let cells = shape
            .cells_at(origin)
            .expect("validated placement stays in coordinate range");
        for cell in cells {
            let i = self.index(cell).expect("validated cell is in bounds");
            self.cells[i] = Some(occupant);
        }
        *self.occupant_cells.entry(occupant).or_default() += shape.len();
    }

    fn is_row_full(&self, y: usize) -> bool {
        self.cells[y * self.width..][..self.width]
            .iter()
            .all(Option::is_some)
    }

    fn is_column_full(&self, x: usize) -> bool {
        (0..self.height).all(|y| self.cells[y * self.width + x].is_some())
    }

    /// Finds every full row and full column.
    ///
    /// Rows and columns are scanned independently. Read-only, so calling it
    /// twice without an intervening mutation yields identical results.
    #[must_use]
    pub fn detect_full_lines(&self) -> LineClear {
        let rows: Vec<usize> = (0..self.height).filter(|&y| self.is_row_full(y)).collect();
        let columns: Vec<usize> = (0..self.width).filter(|&x| self.is_column_full(x)).collect();

        let mut marked = vec![false; self.cells.len()];
        for &y in &rows {
            marked[y * self.width..][..self.width].fill(true);
        }
        for &x in &columns {
            for y in 0..self.height {
                marked[y * self.width + x] = true;
            }
        }
        let cells = self
            .all_cells()
            .zip(marked)
            .filter_map(|(cell, marked)| marked.then_some(cell))
            .collect();

        LineClear {
            rows,
            columns,
            cells,
        }
    }

    /// Vacates exactly the given cells.
    ///
    /// Empty cells are skipped. Returns each occupant that lost cells, once,
    /// in the order first encountered, together with the number of cells it
    /// still holds. An occupant reported with zero remaining cells has left
    /// the board entirely.
    ///
    /// # Panics
    ///
    /// Panics if any cell is out of bounds.
    pub fn clear(&mut self, cells: &[Cell]) -> Vec<ClearedOccupant> {
        let mut touched: Vec<BlockId> = vec![];
        for &cell in cells {
            let Some(i) = self.index(cell) else {
                panic!("cannot clear out-of-bounds cell {cell}");
            };
            let Some(occupant) = self.cells[i].take() else {
                continue;
            };
            let count = self
                .occupant_cells
                .get_mut(&occupant)
                .expect("occupied cell must have a tracked occupant");
            *count -= 1;
            if !touched.contains(&occupant) {
                touched.push(occupant);
            }
        }

        touched
            .into_iter()
            .map(|block| {
                let remaining_cells = self.cells_of(block);
                if remaining_cells == 0 {
                    self.occupant_cells.remove(&block);
                }
                ClearedOccupant {
                    block,
                    remaining_cells,
                }
            })
            .collect()
    }

    /// Creates a board from ASCII art, mainly for tests.
    ///
    /// `#` is a cell occupied by `occupant`, `.` is empty. Rows are listed
    /// from top to bottom and must all have the same length.
    ///
    /// # Panics
    ///
    /// Panics on ragged rows, unknown characters, or an empty picture.
    #[must_use]
    pub fn from_ascii(art: &str, occupant: BlockId) -> Self {
        let lines: Vec<&str> = art
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let width = lines.first().map_or(0, |line| line.chars().count());
        let mut board = Self::new(width, lines.len()).expect("board art must not be empty");

        for (y, line) in lines.iter().enumerate() {
            assert_eq!(
                line.chars().count(),
                width,
                "Each row must have exactly {width} cells, got {} at row {y}",
                line.chars().count()
            );
            for (x, ch) in line.chars().enumerate() {
                match ch {
                    '#' => board.cells[y * width + x] = Some(occupant),
                    '.' => {}
                    _ => panic!("unexpected character {ch:?} at ({x}, {y})"),
                }
            }
        }
        let occupied = board.cells.iter().flatten().count();
        if occupied > 0 {
            board.occupant_cells.insert(occupant, occupied);
        }
        board
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            for cell in row {
                f.write_str(if cell.is_some() { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{cell::Offset, shape::Color};

    const A: BlockId = BlockId::new(0, 0);
    const B: BlockId = BlockId::new(1, 0);

    fn shape(art: &str) -> Shape {
        Shape::from_ascii(art, Color::WHITE).unwrap()
    }

    #[test]
    fn test_new_rejects_zero_size() {
        assert!(Board::new(0, 9).is_err());
        assert!(Board::new(9, 0).is_err());
        let board = Board::new(9, 9).unwrap();
        assert_eq!(board.occupied_count(), 0);
        assert!(board.all_cells().all(|cell| !board.is_occupied(cell)));
    }

    #[test]
    fn test_is_in_bounds() {
        let board = Board::new(4, 3).unwrap();
        assert!(board.is_in_bounds(Cell::new(0, 0)));
        assert!(board.is_in_bounds(Cell::new(3, 2)));
        assert!(!board.is_in_bounds(Cell::new(4, 0)));
        assert!(!board.is_in_bounds(Cell::new(0, 3)));
        assert!(!board.is_in_bounds(Cell::new(-1, 0)));
        assert!(!board.is_in_bounds(Cell::new(0, -1)));
        assert_eq!(board.occupant(Cell::new(-1, -1)), None);
    }

    #[test]
    fn test_can_place_matches_cell_by_cell_check() {
        let board = Board::from_ascii(
            "
            ....
            .#..
            ....
            ",
            A,
        );
        let shapes = [shape("#"), shape("##\n##"), shape("###"), shape("#.\n##")];
        for shape in &shapes {
            for y in -2..5 {
                for x in -2..6 {
                    let origin = Cell::new(x, y);
                    let expected = shape
                        .cells_at(origin)
                        .unwrap()
                        .all(|c| board.is_in_bounds(c) && !board.is_occupied(c));
                    assert_eq!(board.can_place(shape, origin), expected, "{origin}");
                }
            }
        }
    }

    #[test]
    fn test_can_place_rejects_edge_overhang() {
        let board = Board::new(9, 9).unwrap();
        let bar = shape("###");
        assert!(board.can_place(&bar, Cell::new(6, 0)));
        assert!(!board.can_place(&bar, Cell::new(7, 0)));
        assert!(!board.can_place(&bar, Cell::new(-1, 0)));
    }

    #[test]
    fn test_can_place_rejects_far_origins() {
        let board = Board::new(9, 9).unwrap();
        let t = shape(".#.\n###");
        assert_eq!(t.offsets()[0], Offset::new(1, 0));
        for origin in [
            Cell::new(i32::MAX, 0),
            Cell::new(i32::MIN, 0),
            Cell::new(0, i32::MAX),
            Cell::new(0, i32::MIN),
            Cell::new(i32::MAX, i32::MAX),
        ] {
            assert!(!board.can_place(&t, origin), "{origin}");
        }
    }

    #[test]
    fn test_place_occupies_exactly_shape_cells() {
        let mut board = Board::new(5, 5).unwrap();
        let l = shape("#.\n#.\n##");
        board.place(&l, Cell::new(1, 1), A);
        assert_eq!(board.occupied_count(), l.len());
        assert_eq!(board.cells_of(A), 4);
        for cell in l.cells_at(Cell::new(1, 1)).unwrap() {
            assert_eq!(board.occupant(cell), Some(A));
        }
        assert!(!board.can_place(&shape("#"), Cell::new(1, 1)));
    }

    #[test]
    #[should_panic(expected = "must be validated")]
    fn test_place_without_room_panics() {
        let mut board = Board::new(3, 3).unwrap();
        board.place(&shape("###"), Cell::new(1, 0), A);
    }

    #[test]
    fn test_single_full_row() {
        let mut board = Board::new(9, 9).unwrap();
        let dot = shape("#");
        for x in 0..9 {
            board.place(&dot, Cell::new(x, 8), BlockId::new(x.unsigned_abs(), 0));
        }
        let lines = board.detect_full_lines();
        assert_eq!(lines.rows, vec![8]);
        assert!(lines.columns.is_empty());
        assert_eq!(lines.lines_cleared(), 1);
        assert_eq!(lines.cells.len(), 9);
    }

    #[test]
    fn test_crossing_row_and_column() {
        let board = Board::from_ascii(
            "
            ..#.
            ####
            ..#.
            ",
            A,
        );
        let lines = board.detect_full_lines();
        assert_eq!(lines.rows, vec![1]);
        assert_eq!(lines.columns, vec![2]);
        assert_eq!(lines.lines_cleared(), 2);
        assert_eq!(lines.cells.len(), 6);
        let shared = lines
            .cells
            .iter()
            .filter(|&&c| c == Cell::new(2, 1))
            .count();
        assert_eq!(shared, 1);
    }

    #[test]
    fn test_detect_full_lines_is_idempotent() {
        let board = Board::from_ascii(
            "
            ###
            #.#
            ###
            ",
            A,
        );
        let first = board.detect_full_lines();
        let second = board.detect_full_lines();
        assert_eq!(first, second);
        assert_eq!(first.lines_cleared(), 4);
        assert_eq!(first.cells.len(), 8);
    }

    #[test]
    fn test_clear_reports_remaining_cells() {
        let mut board = Board::new(3, 3).unwrap();
        board.place(&shape("###"), Cell::new(0, 0), A);
        board.place(&shape("#\n#"), Cell::new(0, 1), B);

        let cleared = board.clear(&[Cell::new(0, 0), Cell::new(1, 0), Cell::new(0, 1)]);
        assert_eq!(
            cleared,
            vec![
                ClearedOccupant {
                    block: A,
                    remaining_cells: 1
                },
                ClearedOccupant {
                    block: B,
                    remaining_cells: 1
                },
            ]
        );

        let cleared = board.clear(&[Cell::new(2, 0), Cell::new(2, 2)]);
        assert_eq!(
            cleared,
            vec![ClearedOccupant {
                block: A,
                remaining_cells: 0
            }]
        );
        assert_eq!(board.cells_of(A), 0);
        assert_eq!(board.occupied_count(), 1);
    }

    #[test]
    fn test_place_then_clear_restores_board() {
        let mut board = Board::from_ascii(
            "
            #...
            ....
            ...#
            ",
            A,
        );
        let before = board.clone();
        let t = shape(".#.\n###");
        let origin = Cell::new(1, 0);
        board.place(&t, origin, B);
        let cells: Vec<Cell> = t.cells_at(origin).unwrap().collect();
        let cleared = board.clear(&cells);
        assert_eq!(
            cleared,
            vec![ClearedOccupant {
                block: B,
                remaining_cells: 0
            }]
        );
        assert_eq!(board, before);
    }

    #[test]
    #[should_panic(expected = "out-of-bounds")]
    fn test_clear_out_of_bounds_panics() {
        let mut board = Board::new(2, 2).unwrap();
        board.clear(&[Cell::new(2, 0)]);
    }

    #[test]
    fn test_display() {
        let board = Board::from_ascii("#.\n.#", A);
        assert_eq!(board.to_string(), "#.\n.#\n");
        assert!(Board::from_ascii("##\n##", A).is_full());
    }
}
