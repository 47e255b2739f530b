use core::fmt;
use serde::{Deserialize, Serialize};

/// The two active seats. The third group of the deal is never held by anyone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PlayerId {
    Ai = 1,
    Opponent = 2,
}

impl PlayerId {
    pub const BOTH: [PlayerId; 2] = [PlayerId::Ai, PlayerId::Opponent];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(PlayerId::Ai),
            1 => Some(PlayerId::Opponent),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize - 1
    }

    pub const fn other(self) -> PlayerId {
        match self {
            PlayerId::Ai => PlayerId::Opponent,
            PlayerId::Opponent => PlayerId::Ai,
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PlayerId::Ai => "AI",
            PlayerId::Opponent => "Opponent",
        };
        f.write_str(label)
    }
}
