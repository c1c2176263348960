//! Adjacency predicates and the precomputed rule table the solver propagates with

use crate::io::catalog::TileCatalog;
use crate::wave::bitset::CandidateSet;
use crate::wave::module::{Direction, ModuleId};
use image::{Rgba, RgbaImage};
use std::sync::Arc;

/// Adjacency predicate: may `to` sit next to `from` in direction `direction`?
pub type Constraint = Arc<dyn Fn(ModuleId, ModuleId, Direction) -> bool + Send + Sync>;

/// Constraint that allows every pairing
pub fn always() -> Constraint {
    Arc::new(|_, _, _| true)
}

/// Constraint that forbids `a` and `b` from touching in any direction
pub fn mutually_exclusive(a: ModuleId, b: ModuleId) -> Constraint {
    Arc::new(move |from, to, _| !((from == a && to == b) || (from == b && to == a)))
}

/// Constraint matching sampled edge pixels of neighboring tile images
///
/// `samples` pixels are taken at evenly spaced positions along every edge;
/// two modules may touch when the facing edges carry identical samples.
pub fn edge_matching(catalog: &TileCatalog, samples: usize) -> Constraint {
    let signatures = EdgeSignatures::from_catalog(catalog, samples);
    Arc::new(move |from, to, direction| signatures.matches(from, to, direction))
}

/// Sampled edge colors per module and direction
#[derive(Debug, Clone)]
pub struct EdgeSignatures {
    edges: Vec<[Vec<Rgba<u8>>; 4]>,
}

impl EdgeSignatures {
    /// Sample every module image in the catalog
    pub fn from_catalog(catalog: &TileCatalog, samples: usize) -> Self {
        let edges = catalog
            .modules()
            .iter()
            .map(|module| {
                let image = module.image();
                Direction::ALL.map(|direction| sample_edge(image, direction, samples))
            })
            .collect();
        Self { edges }
    }

    /// Edge samples of `module` on side `direction`
    pub fn edge(&self, module: ModuleId, direction: Direction) -> Option<&[Rgba<u8>]> {
        self.edges
            .get(module.index())
            .and_then(|sides| sides.get(direction.index()))
            .map(Vec::as_slice)
    }

    /// Facing edges of `from` (towards `direction`) and `to` (back towards `from`) agree
    pub fn matches(&self, from: ModuleId, to: ModuleId, direction: Direction) -> bool {
        match (
            self.edge(from, direction),
            self.edge(to, direction.opposite()),
        ) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

// Top and bottom edges are read left to right, left and right edges top to bottom,
// so facing edges line up sample for sample.
fn sample_edge(image: &RgbaImage, direction: Direction, samples: usize) -> Vec<Rgba<u8>> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let along = match direction {
        Direction::Up | Direction::Down => width,
        Direction::Left | Direction::Right => height,
    };

    (0..samples)
        .filter_map(|i| {
            let t = ((i as u64 + 1) * u64::from(along) / (samples as u64 + 1)) as u32;
            let t = t.min(along - 1);
            let (px, py) = match direction {
                Direction::Up => (t, 0),
                Direction::Down => (t, height - 1),
                Direction::Left => (0, t),
                Direction::Right => (width - 1, t),
            };
            image.get_pixel_checked(px, py).copied()
        })
        .collect()
}

/// Predicate evaluated once per module pair and direction
///
/// `allowed(from, direction)` is the set of modules that may occupy the
/// neighbor of a cell holding `from`.
#[derive(Debug, Clone)]
pub struct AdjacencyRules {
    module_count: usize,
    allowed: [Vec<CandidateSet>; 4],
}

impl AdjacencyRules {
    /// Tabulate a predicate over `module_count` modules
    pub fn build(module_count: usize, constraint: &Constraint) -> Self {
        let allowed = Direction::ALL.map(|direction| {
            (0..module_count)
                .map(|from| {
                    let from = ModuleId::new(from);
                    let mut set = CandidateSet::new(module_count);
                    for to in (0..module_count).map(ModuleId::new) {
                        if constraint(from, to, direction) {
                            set.insert(to);
                        }
                    }
                    set
                })
                .collect()
        });

        Self {
            module_count,
            allowed,
        }
    }

    /// Number of modules the table covers
    pub const fn module_count(&self) -> usize {
        self.module_count
    }

    /// Modules allowed next to `from` in `direction`
    pub fn allowed(&self, from: ModuleId, direction: Direction) -> Option<&CandidateSet> {
        self.allowed
            .get(direction.index())
            .and_then(|table| table.get(from.index()))
    }

    /// Union of what every candidate in `source` allows towards `direction`
    pub fn support(&self, source: &CandidateSet, direction: Direction) -> CandidateSet {
        let mut support = CandidateSet::new(self.module_count);
        for from in source.iter() {
            if let Some(allowed) = self.allowed(from, direction) {
                support.union_with(allowed);
            }
        }
        support
    }
}
