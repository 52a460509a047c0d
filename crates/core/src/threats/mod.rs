//! Newly created threats
//!
//! Threats use the null-move technique: play the move, hand the turn straight
//! back to the mover, and ask whether something is now possible that was not
//! possible before the move.

mod capture;
mod fork;
mod mate;

pub use capture::{creates_hanging_piece_capture, creates_material_gain_capture};
pub use fork::creates_fork_threat;
pub use mate::creates_mate_threat;

use serde::{Deserialize, Serialize};
use shakmaty::Move;

use crate::board::AugBoard;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Threat {
    None = 0,
    Mate = 1,
    HangingPieceCapture = 2,
    MaterialGainCapture = 3,
}

impl Threat {
    pub const ALL: [Threat; 3] = [
        Threat::Mate,
        Threat::HangingPieceCapture,
        Threat::MaterialGainCapture,
    ];

    pub fn detect(self, board: &AugBoard, mv: &Move) -> Result<bool> {
        match self {
            Threat::None => Ok(false),
            Threat::Mate => creates_mate_threat(board, mv),
            Threat::HangingPieceCapture => creates_hanging_piece_capture(board, mv),
            Threat::MaterialGainCapture => creates_material_gain_capture(board, mv),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Threat::None => "none",
            Threat::Mate => "mate",
            Threat::HangingPieceCapture => "hanging_piece_capture",
            Threat::MaterialGainCapture => "material_gain_capture",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Threat::None => "None",
            Threat::Mate => "Mate Threat",
            Threat::HangingPieceCapture => "Hanging Piece Capture",
            Threat::MaterialGainCapture => "Material Gain Capture",
        }
    }
}

/// The position after `mv` with the mover to move again. `None` when `mv`
/// gives check, since passing would leave a king en prise.
pub(crate) fn after_with_tempo(board: &AugBoard, mv: &Move) -> Result<Option<AugBoard>> {
    Ok(board.after(mv)?.null_moved())
}
