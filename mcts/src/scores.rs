use enum_map::{EnumArray, EnumMap};

/// Rollout outcome keyed by player. Missing entries read as zero.
pub struct Scores<P: EnumArray<Option<f64>>> {
    by_player: EnumMap<P, Option<f64>>,
}

impl<P: EnumArray<Option<f64>> + Copy + PartialEq> Scores<P> {
    /// Records `score` for `perspective`. A win for `perspective` is also
    /// recorded as -1.0 for every other player in `players`.
    #[allow(clippy::float_cmp)]
    pub fn from_outcome(perspective: P, score: f64, players: &[P]) -> Self {
        let mut by_player: EnumMap<P, Option<f64>> = EnumMap::default();
        by_player[perspective] = Some(score);
        if score == 1.0 {
            for &player in players.iter().filter(|&&p| p != perspective) {
                by_player[player] = Some(-1.0);
            }
        }
        Self { by_player }
    }

    pub fn get(&self, player: P) -> f64 {
        self.by_player[player].unwrap_or(0.0)
    }
}
