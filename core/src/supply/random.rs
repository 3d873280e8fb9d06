use super::*;

/// Draws every tile independently and uniformly from [`Letter::ALL`].
#[derive(Clone, Debug, PartialEq)]
pub struct RandomSupplyGenerator {
    seed: u64,
}

impl RandomSupplyGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl SupplyGenerator for RandomSupplyGenerator {
    fn generate(self, count: CellCount) -> TileSupply {
        use rand::prelude::*;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let supply = TileSupply::from_letters(
            (0..count).map(|_| Letter::ALL[rng.random_range(0..Letter::ALL.len())]),
        );

        log::debug!("generated {} tiles from seed {}", supply.len(), self.seed);
        supply
    }
}
