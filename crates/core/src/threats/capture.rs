use shakmaty::Move;
use tracing::debug;

use super::after_with_tempo;
use crate::board::{move_to_uci, AugBoard};
use crate::error::Result;

/// The move sets up a capture of an undefended piece that was not on before.
pub fn creates_hanging_piece_capture(board: &AugBoard, mv: &Move) -> Result<bool> {
    if board.has_hanging_piece_capture() {
        return Ok(false);
    }
    let Some(probe) = after_with_tempo(board, mv)? else {
        return Ok(false);
    };
    let threat = probe.has_hanging_piece_capture();
    if threat {
        debug!(fen = %board.fen(), mv = %move_to_uci(mv), "hanging piece threat");
    }
    Ok(threat)
}

/// The move sets up a capture that wins material by static exchange.
pub fn creates_material_gain_capture(board: &AugBoard, mv: &Move) -> Result<bool> {
    if board.has_positive_see_capture()? {
        return Ok(false);
    }
    let Some(probe) = after_with_tempo(board, mv)? else {
        return Ok(false);
    };
    let threat = probe.has_positive_see_capture()?;
    if threat {
        debug!(fen = %board.fen(), mv = %move_to_uci(mv), "material gain threat");
    }
    Ok(threat)
}
