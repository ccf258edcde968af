use alloc::collections::BTreeSet;

use super::*;

/// Always yields the same bomb layout, for tests and replays.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedMinefieldGenerator {
    bombs: Vec<Coordinate>,
}

impl FixedMinefieldGenerator {
    pub fn new(bombs: impl Into<Vec<Coordinate>>) -> Self {
        Self {
            bombs: bombs.into(),
        }
    }
}

impl MinefieldGenerator for FixedMinefieldGenerator {
    fn generate(&mut self, config: GameConfig, excluded: Coordinate) -> Result<Vec<Coordinate>> {
        let mut seen = BTreeSet::new();
        for &coords in &self.bombs {
            if !coords.is_within_bounds(config.rows, config.cols) {
                return Err(GameError::InvalidCoords);
            }
            if coords == excluded || !seen.insert(coords) {
                return Err(GameError::InvalidLayout);
            }
        }
        if seen.len() != config.bombs as usize {
            return Err(GameError::InvalidLayout);
        }
        Ok(self.bombs.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yields_layout_unchanged() {
        let bombs = [Coordinate::new(0, 0), Coordinate::new(1, 2)];
        let mut generator = FixedMinefieldGenerator::new(bombs);

        let layout = generator
            .generate(GameConfig::new_unchecked(3, 3, 2), Coordinate::new(2, 2))
            .unwrap();

        assert_eq!(layout, bombs);
    }

    #[test]
    fn rejects_mismatched_layouts() {
        let config = GameConfig::new_unchecked(3, 3, 1);
        let start = Coordinate::new(2, 2);

        let mut on_start = FixedMinefieldGenerator::new([start]);
        assert_eq!(on_start.generate(config, start), Err(GameError::InvalidLayout));

        let mut outside = FixedMinefieldGenerator::new([Coordinate::new(3, 0)]);
        assert_eq!(outside.generate(config, start), Err(GameError::InvalidCoords));

        let mut duplicated =
            FixedMinefieldGenerator::new([Coordinate::new(0, 0), Coordinate::new(0, 0)]);
        assert_eq!(
            duplicated.generate(GameConfig::new_unchecked(3, 3, 2), start),
            Err(GameError::InvalidLayout)
        );

        let mut short = FixedMinefieldGenerator::new([Coordinate::new(0, 0)]);
        assert_eq!(
            short.generate(GameConfig::new_unchecked(3, 3, 2), start),
            Err(GameError::InvalidLayout)
        );
    }
}
