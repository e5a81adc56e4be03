//! Symbolic screen snapshot: a fixed 16x20 grid of tile codes plus the
//! locators that find Mario and hazards inside it.
//!
//! Row 0 is the top of the visible screen, column 0 the left edge (the
//! window scrolls with the camera). Every lookup is bounds-checked: a probe
//! outside the grid reads as an empty tile, so the decision rules can look
//! several columns ahead or behind without special-casing screen edges.

pub const GRID_ROWS: usize = 16;
pub const GRID_COLS: usize = 20;

/// Scan row used for ground-level probes (gap detection, pit guard).
pub const GROUND_ROW: usize = GRID_ROWS - 1;

pub const TILE_EMPTY: u8 = 0;
pub const TILE_MARIO: u8 = 1;
pub const TILE_COIN: u8 = 5;
pub const TILE_GROUND: u8 = 10;
/// Ground crawler (goomba).
pub const TILE_CHIBIBO: u8 = 15;
/// Shelled crawler, explodes when stomped.
pub const TILE_NOKOBON: u8 = 16;
/// Ceiling spider.
pub const TILE_KUMO: u8 = 18;
/// Flying bee.
pub const TILE_BUNBUN: u8 = 19;

/// A cell in the grid. Always derived fresh from the current frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Fallback position when no 2x2 Mario block is on screen (transition
/// frames, death animation). Deliberately a plain in-bounds cell rather than
/// an absent marker: the dispatcher stays total and never branches on it.
pub const PLAYER_FALLBACK: Position = Position { row: 1, col: 1 };

/// One frame's tile-grid snapshot. Read-only once constructed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileGrid {
    cells: [[u8; GRID_COLS]; GRID_ROWS],
}

impl TileGrid {
    pub fn empty() -> Self {
        Self {
            cells: [[TILE_EMPTY; GRID_COLS]; GRID_ROWS],
        }
    }

    pub fn from_cells(cells: [[u8; GRID_COLS]; GRID_ROWS]) -> Self {
        Self { cells }
    }

    /// Build from row-major nested vectors (the trace file layout).
    /// Fails when the dimensions are not exactly 16x20.
    pub fn from_rows(rows: &[Vec<u8>]) -> Option<Self> {
        if rows.len() != GRID_ROWS {
            return None;
        }
        let mut cells = [[TILE_EMPTY; GRID_COLS]; GRID_ROWS];
        for (r, row) in rows.iter().enumerate() {
            if row.len() != GRID_COLS {
                return None;
            }
            cells[r].copy_from_slice(row);
        }
        Some(Self { cells })
    }

    /// Tile code at (row, col). Signed coordinates so lookahead windows can
    /// run past the screen edge; anything out of range reads as empty.
    pub fn tile(&self, row: i32, col: i32) -> u8 {
        if row < 0 || col < 0 {
            return TILE_EMPTY;
        }
        let (row, col) = (row as usize, col as usize);
        if row >= GRID_ROWS || col >= GRID_COLS {
            return TILE_EMPTY;
        }
        self.cells[row][col]
    }

    /// Does `code` occur anywhere on screen?
    pub fn contains(&self, code: u8) -> bool {
        self.cells.iter().any(|row| row.contains(&code))
    }

    /// Does `code` occur anywhere in the given row?
    pub fn row_contains(&self, row: i32, code: u8) -> bool {
        if row < 0 || row as usize >= GRID_ROWS {
            return false;
        }
        self.cells[row as usize].contains(&code)
    }

    /// Does `code` occur anywhere in the given column?
    pub fn column_contains(&self, col: i32, code: u8) -> bool {
        if col < 0 || col as usize >= GRID_COLS {
            return false;
        }
        self.cells.iter().any(|row| row[col as usize] == code)
    }

    /// First occurrence of `code` in row-major scan order, or `None` when it
    /// is not on screen. Callers must check presence before using the
    /// position; absence is an ordinary outcome here, not a failure.
    pub fn locate_first(&self, code: u8) -> Option<Position> {
        for (r, row) in self.cells.iter().enumerate() {
            for (c, &cell) in row.iter().enumerate() {
                if cell == code {
                    return Some(Position::new(r, c));
                }
            }
        }
        None
    }

    /// Bottom-right cell of the first 2x2 all-Mario block, scanning rows
    /// top-to-bottom and columns left-to-right. Mario renders as a 2x2
    /// footprint; the bottom-right corner is the canonical position every
    /// rule reasons from. Returns [`PLAYER_FALLBACK`] when no block exists.
    pub fn locate_player(&self) -> Position {
        for r in 0..GRID_ROWS - 1 {
            for c in 0..GRID_COLS - 1 {
                if self.cells[r][c] == TILE_MARIO
                    && self.cells[r][c + 1] == TILE_MARIO
                    && self.cells[r + 1][c] == TILE_MARIO
                    && self.cells[r + 1][c + 1] == TILE_MARIO
                {
                    return Position::new(r + 1, c + 1);
                }
            }
        }
        PLAYER_FALLBACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(cells: &[(usize, usize, u8)]) -> TileGrid {
        let mut raw = [[TILE_EMPTY; GRID_COLS]; GRID_ROWS];
        for &(r, c, code) in cells {
            raw[r][c] = code;
        }
        TileGrid::from_cells(raw)
    }

    fn place_player(cells: &mut Vec<(usize, usize, u8)>, row: usize, col: usize) {
        for dr in 0..2 {
            for dc in 0..2 {
                cells.push((row + dr, col + dc, TILE_MARIO));
            }
        }
    }

    #[test]
    fn locate_player_returns_bottom_right_of_block() {
        let mut cells = Vec::new();
        place_player(&mut cells, 4, 7);
        let grid = grid_with(&cells);
        assert_eq!(grid.locate_player(), Position::new(5, 8));
    }

    #[test]
    fn locate_player_falls_back_when_absent() {
        let grid = TileGrid::empty();
        assert_eq!(grid.locate_player(), PLAYER_FALLBACK);
    }

    #[test]
    fn lone_mario_tile_is_not_a_footprint() {
        let grid = grid_with(&[(5, 5, TILE_MARIO)]);
        assert_eq!(grid.locate_player(), PLAYER_FALLBACK);
    }

    #[test]
    fn locate_first_picks_earliest_row_major_occurrence() {
        let grid = grid_with(&[(9, 3, TILE_CHIBIBO), (2, 14, TILE_CHIBIBO)]);
        assert_eq!(grid.locate_first(TILE_CHIBIBO), Some(Position::new(2, 14)));
    }

    #[test]
    fn locate_first_absent_is_none() {
        let grid = TileGrid::empty();
        assert_eq!(grid.locate_first(TILE_NOKOBON), None);
    }

    #[test]
    fn out_of_bounds_probes_read_empty() {
        let mut raw = [[TILE_GROUND; GRID_COLS]; GRID_ROWS];
        raw[0][0] = TILE_GROUND;
        let grid = TileGrid::from_cells(raw);
        assert_eq!(grid.tile(-1, 0), TILE_EMPTY);
        assert_eq!(grid.tile(0, -3), TILE_EMPTY);
        assert_eq!(grid.tile(GRID_ROWS as i32, 0), TILE_EMPTY);
        assert_eq!(grid.tile(0, GRID_COLS as i32 + 4), TILE_EMPTY);
        assert_eq!(grid.tile(3, 3), TILE_GROUND);
    }

    #[test]
    fn row_and_column_membership_ignore_out_of_range_indices() {
        let grid = grid_with(&[(7, 0, TILE_KUMO)]);
        assert!(grid.row_contains(7, TILE_KUMO));
        assert!(grid.column_contains(0, TILE_KUMO));
        assert!(!grid.row_contains(-1, TILE_KUMO));
        assert!(!grid.column_contains(-1, TILE_KUMO));
        assert!(!grid.row_contains(GRID_ROWS as i32, TILE_KUMO));
        assert!(!grid.column_contains(GRID_COLS as i32, TILE_KUMO));
    }

    #[test]
    fn from_rows_rejects_bad_dimensions() {
        let short = vec![vec![0u8; GRID_COLS]; GRID_ROWS - 1];
        assert!(TileGrid::from_rows(&short).is_none());
        let ragged = {
            let mut rows = vec![vec![0u8; GRID_COLS]; GRID_ROWS];
            rows[8] = vec![0u8; GRID_COLS - 1];
            rows
        };
        assert!(TileGrid::from_rows(&ragged).is_none());
        let ok = vec![vec![0u8; GRID_COLS]; GRID_ROWS];
        assert!(TileGrid::from_rows(&ok).is_some());
    }
}
