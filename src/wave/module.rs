//! Module identity handles and grid directions

use std::fmt;

/// Opaque handle to a module owned by the tile catalog
///
/// Handles are dense indices into the catalog in load order, so they double as
/// bit positions in candidate sets and as keys in the image cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId(usize);

impl ModuleId {
    /// Wrap a catalog index
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Catalog index of this module
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One of the four orthogonal neighbor directions on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards smaller `y`
    Up,
    /// Towards larger `x`
    Right,
    /// Towards larger `y`
    Down,
    /// Towards smaller `x`
    Left,
}

impl Direction {
    /// All directions in clockwise order starting at `Up`
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Direction pointing back at the origin cell
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }

    /// Grid offset `(dx, dy)` for one step in this direction
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::Up => (0, -1),
            Self::Right => (1, 0),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
        }
    }

    /// Dense index used for per-direction tables
    pub const fn index(self) -> usize {
        match self {
            Self::Up => 0,
            Self::Right => 1,
            Self::Down => 2,
            Self::Left => 3,
        }
    }

    /// Neighbor of `(x, y)` in this direction, if it lies inside `width × height`
    pub fn step(self, x: usize, y: usize, width: usize, height: usize) -> Option<(usize, usize)> {
        let (dx, dy) = self.offset();
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        (nx < width && ny < height).then_some((nx, ny))
    }
}
