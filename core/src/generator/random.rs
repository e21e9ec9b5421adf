use rand::prelude::*;

use super::*;

/// Uniformly samples `(row, col)` pairs from an injected random source, sampling again whenever the cell already
/// holds a mine.
#[derive(Debug)]
pub struct RejectionSampler<'a, R: ?Sized> {
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> RejectionSampler<'a, R> {
    pub fn new(rng: &'a mut R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + ?Sized> LayoutGenerator for RejectionSampler<'_, R> {
    fn generate(self, config: GameConfig) -> Result<MineLayout> {
        // the fields are public, a full board would never terminate
        config.validate()?;

        let mut mine_mask: Array2<bool> = Array2::default(config.dim());
        let mut mines_placed: CellCount = 0;
        let mut collisions: usize = 0;

        while mines_placed < config.mines {
            let coords: Coord2 = (
                self.rng.random_range(0..config.size),
                self.rng.random_range(0..config.size),
            );
            let cell = &mut mine_mask[coords.to_nd_index()];
            if *cell {
                collisions += 1;
                continue;
            }
            *cell = true;
            mines_placed += 1;
        }

        log::debug!(
            "Placed {} mines on a {}x{} board, {} collisions",
            mines_placed,
            config.size,
            config.size,
            collisions
        );
        MineLayout::from_mine_mask(mine_mask)
    }
}

/// Reproducible generation: the same seed always yields the same layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SeededGenerator {
    seed: u64,
}

impl SeededGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl LayoutGenerator for SeededGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout> {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        RejectionSampler::new(&mut rng).generate(config)
    }
}
