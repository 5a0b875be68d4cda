use super::*;

/// Uniform placement: every subset of `count` candidates is equally likely.
///
/// Seeded placers are reproducible; unseeded ones draw OS entropy when the mines
/// are placed, not when the placer is built.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RandomPlacer {
    seed: Option<u64>,
}

impl RandomPlacer {
    pub fn new() -> Self {
        Self { seed: None }
    }

    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }
}

impl MinePlacer for RandomPlacer {
    fn place(&mut self, candidates: &[Coord2], count: CellCount) -> Vec<Coord2> {
        use rand::prelude::*;

        let mut amount = usize::from(count);
        if amount > candidates.len() {
            log::warn!(
                "Not enough room for mines, requested {} but only {} candidates",
                amount,
                candidates.len()
            );
            amount = candidates.len();
        }

        let mut rng = match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };

        rand::seq::index::sample(&mut rng, candidates.len(), amount)
            .into_iter()
            .map(|index| candidates[index])
            .collect()
    }
}
