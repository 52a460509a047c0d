use shakmaty::{Move, Position, Role};
use tracing::debug;

use crate::board::{move_to_uci, AugBoard};
use crate::error::Result;

/// A knight mates a king whose every neighbouring square is taken by its own
/// pieces.
pub fn is_smothered_mate(board: &AugBoard, mv: &Move) -> Result<bool> {
    let after = board.after(mv)?;
    if !after.is_checkmate() {
        return Ok(false);
    }
    let Some(king) = after.current_color_king() else {
        return Ok(false);
    };

    let checkers = after.position().checkers();
    let knights_only = checkers
        .into_iter()
        .all(|sq| after.piece_type_at(sq) == Some(Role::Knight));
    if !knights_only {
        return Ok(false);
    }

    let mated = after.current_color();
    let smothered = after
        .attacks(king)
        .into_iter()
        .all(|sq| after.piece_color_at(sq) == Some(mated));
    if smothered {
        debug!(fen = %board.fen(), mv = %move_to_uci(mv), "smothered mate");
    }
    Ok(smothered)
}
