use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{Mark, Position};

/// `player` puts its mark on `position`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Action {
    pub position: Position,
    pub player: Mark,
}

impl Action {
    #[must_use]
    pub const fn new(position: Position, player: Mark) -> Self {
        Self { position, player }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.player, self.position)
    }
}
