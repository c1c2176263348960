use rand::Rng;

/// Supplies run seeds: an optional fixed first seed, then fresh random ones
///
/// A fresh seed is never equal to the one handed out just before it.
#[derive(Debug, Clone, Default)]
pub struct SeedSource {
    first: Option<u64>,
    last: Option<u64>,
}

impl SeedSource {
    /// Source whose first seed is `first` when given
    pub const fn new(first: Option<u64>) -> Self {
        Self { first, last: None }
    }

    /// Seed for the next run
    pub fn next_seed(&mut self) -> u64 {
        let seed = match self.first.take() {
            Some(seed) => seed,
            None => {
                let mut rng = rand::rng();
                loop {
                    let candidate = rng.random::<u64>();
                    if Some(candidate) != self.last {
                        break candidate;
                    }
                }
            }
        };
        self.last = Some(seed);
        seed
    }

    /// Seed most recently handed out
    pub const fn last(&self) -> Option<u64> {
        self.last
    }
}
