//! Tactical motif detection
//!
//! Every detector is a predicate over a position and a legal move about to
//! be played from it. Detectors return `Ok(false)` when their preconditions
//! do not hold (wrong piece type, move mates, ...); `Err` is reserved for
//! illegal input and broken invariants.

mod discovered_attack;
mod fork;
mod pin;
mod sacrifice;
mod skewer;

pub use discovered_attack::is_discovered_attack;
pub use fork::is_fork;
pub use pin::is_pin;
pub use sacrifice::is_sacrifice;
pub use skewer::is_skewer;

use serde::{Deserialize, Serialize};
use shakmaty::{Move, Role, Square};

use crate::board::AugBoard;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Tactic {
    None = 0,
    Fork = 1,
    DiscoveredAttack = 2,
    Pin = 3,
    Skewer = 4,
    Sacrifice = 5,
}

impl Tactic {
    /// Detectable tactics, in detector table order.
    pub const ALL: [Tactic; 5] = [
        Tactic::Fork,
        Tactic::DiscoveredAttack,
        Tactic::Pin,
        Tactic::Skewer,
        Tactic::Sacrifice,
    ];

    pub fn detect(self, board: &AugBoard, mv: &Move) -> Result<bool> {
        match self {
            Tactic::None => Ok(false),
            Tactic::Fork => is_fork(board, mv),
            Tactic::DiscoveredAttack => is_discovered_attack(board, mv),
            Tactic::Pin => is_pin(board, mv),
            Tactic::Skewer => is_skewer(board, mv),
            Tactic::Sacrifice => is_sacrifice(board, mv),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tactic::None => "none",
            Tactic::Fork => "fork",
            Tactic::DiscoveredAttack => "discovered_attack",
            Tactic::Pin => "pin",
            Tactic::Skewer => "skewer",
            Tactic::Sacrifice => "sacrifice",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Tactic::None => "None",
            Tactic::Fork => "Fork",
            Tactic::DiscoveredAttack => "Discovered Attack",
            Tactic::Pin => "Pin",
            Tactic::Skewer => "Skewer",
            Tactic::Sacrifice => "Sacrifice",
        }
    }
}

/// The side to move can take the piece on `square` without losing material.
pub(crate) fn is_safely_capturable(board: &AugBoard, square: Square) -> Result<bool> {
    Ok(board.square_capturers(square).any() && board.see(square, None, 1)? >= 0)
}

/// Line pieces, the only ones that can pin or skewer.
pub(crate) fn is_line_piece(role: Option<Role>) -> bool {
    matches!(role, Some(Role::Queen | Role::Rook | Role::Bishop))
}
