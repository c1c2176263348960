//! Screen-space layout of grid cells and candidate sub-grids
//!
//! A slot with `N != 1` candidates is split into a square sub-grid of side
//! `ceil(sqrt(N)) + 1`. The extra row and column keep sub-tiles clear of the
//! cell's far edges. Candidate `j` always lands in sub-cell
//! `(j mod side, j div side)`, so a candidate keeps its place from frame to
//! frame until it is eliminated.

use crate::io::configuration::{SUBCELL_MARGIN, VisualizerConfig};

/// Axis-aligned pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    /// Left edge, may be negative for outlines that spill past the frame
    pub x: i64,
    /// Top edge
    pub y: i64,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Rect {
    /// Grow by `amount` pixels on every side
    #[must_use]
    pub const fn grow(self, amount: u32) -> Self {
        Self {
            x: self.x - amount as i64,
            y: self.y - amount as i64,
            width: self.width + 2 * amount,
            height: self.height + 2 * amount,
        }
    }
}

/// Smallest `r` with `r * r >= n`
pub const fn ceil_sqrt(n: usize) -> usize {
    let root = n.isqrt();
    if root * root < n { root + 1 } else { root }
}

/// Side of the square sub-grid used for `candidates` candidates
pub const fn subgrid_side(candidates: usize) -> usize {
    ceil_sqrt(candidates) + 1
}

/// Sub-cell `(column, row)` of candidate `index` in a sub-grid of `side`
pub const fn subcell(index: usize, side: usize) -> (usize, usize) {
    if side == 0 {
        return (0, 0);
    }
    (index % side, index / side)
}

/// Pixel geometry shared by every frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    columns: usize,
    rows: usize,
    cell_width: u32,
    cell_height: u32,
}

impl GridLayout {
    /// Layout of `columns × rows` square cells of `cell_size` pixels
    pub const fn new(columns: usize, rows: usize, cell_size: u32) -> Self {
        Self {
            columns,
            rows,
            cell_width: cell_size,
            cell_height: cell_size,
        }
    }

    /// Layout matching the grid the solver is built with
    pub const fn from_config(config: &VisualizerConfig) -> Self {
        Self::new(config.grid_width, config.grid_height, config.cell_size)
    }

    /// Grid width in cells
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Grid height in cells
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Frame size in pixels
    pub const fn frame_size(&self) -> (u32, u32) {
        (
            self.columns as u32 * self.cell_width,
            self.rows as u32 * self.cell_height,
        )
    }

    /// Rectangle covered by cell `(x, y)`
    pub const fn cell(&self, x: usize, y: usize) -> Rect {
        Rect {
            x: x as i64 * self.cell_width as i64,
            y: y as i64 * self.cell_height as i64,
            width: self.cell_width,
            height: self.cell_height,
        }
    }

    /// Rectangles for every candidate of a cell holding `candidates` modules
    ///
    /// Rectangles come back in candidate order. Sub-cells too small to hold a
    /// pixel have zero size and are expected to be skipped by the caller.
    pub fn candidate_cells(&self, x: usize, y: usize, candidates: usize) -> Vec<Rect> {
        let side = subgrid_side(candidates);
        let cell = self.cell(x, y);
        let sub_width = self.cell_width / side as u32;
        let sub_height = self.cell_height / side as u32;

        (0..candidates)
            .map(|index| {
                let (column, row) = subcell(index, side);
                Rect {
                    x: cell.x + column as i64 * sub_width as i64 + SUBCELL_MARGIN as i64,
                    y: cell.y + row as i64 * sub_height as i64 + SUBCELL_MARGIN as i64,
                    width: sub_width,
                    height: sub_height,
                }
            })
            .collect()
    }
}
