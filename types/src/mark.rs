use std::fmt::Display;

use enum_map::Enum;
use serde::{Deserialize, Serialize};

/// Content of a single board cell. `X` and `O` double as the two players.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash, Enum, Serialize, Deserialize,
)]
pub enum Mark {
    #[default]
    Blank,
    X,
    O,
}

impl Mark {
    pub const PLAYERS: [Mark; 2] = [Mark::X, Mark::O];

    /// The player moving after `self`. Rotation only knows the two players,
    /// so anything that is not `X` hands the turn to `X`.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::Blank | Mark::O => Mark::X,
        }
    }

    #[must_use]
    pub const fn is_player(self) -> bool {
        !matches!(self, Mark::Blank)
    }

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Mark::Blank => ' ',
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

impl Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
