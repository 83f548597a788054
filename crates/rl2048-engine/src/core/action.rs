use std::str::FromStr;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::ParseActionError;

/// Set of actions, always listed in [`Action::ALL`] order.
pub type ActionSet = ArrayVec<Action, { Action::LEN }>;

/// A move direction.
///
/// Every direction is implemented as "compact left" applied to a rotated view of the board.
/// The discriminant is the number of counter-clockwise quarter turns that align the
/// direction with [`Action::Left`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
)]
pub enum Action {
    Left = 0,
    Up = 1,
    Right = 2,
    Down = 3,
}

impl Action {
    pub const LEN: usize = 4;
    pub const ALL: [Self; Self::LEN] = [Self::Left, Self::Up, Self::Right, Self::Down];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Left),
            1 => Some(Self::Up),
            2 => Some(Self::Right),
            3 => Some(Self::Down),
            _ => None,
        }
    }

    /// Counter-clockwise quarter turns that bring this direction to [`Action::Left`].
    #[must_use]
    pub const fn quarter_turns(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Up => "up",
            Self::Right => "right",
            Self::Down => "down",
        }
    }
}

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseActionError { name: s.to_owned() })
    }
}
