use shakmaty::{Color, Move, Rank, Role};
use tracing::debug;

use crate::board::{destination, move_to_uci, AugBoard};
use crate::error::Result;

fn back_rank(color: Color) -> Rank {
    match color {
        Color::White => Rank::First,
        Color::Black => Rank::Eighth,
    }
}

/// A rook or queen mates along the back rank of a king that is walled in by
/// its own pieces on the rank in front of it.
///
/// Every king-ring square off the back rank that the mating side does not
/// already cover must hold a piece of the mated side, and there has to be at
/// least one such blocker.
pub fn is_back_rank_mate(board: &AugBoard, mv: &Move) -> Result<bool> {
    let Some(king) = board.other_color_king() else {
        return Ok(false);
    };
    let rank = back_rank(board.other_color());
    let to = destination(mv);
    if king.rank() != rank || to.rank() != rank {
        return Ok(false);
    }

    let after = board.after(mv)?;
    if !after.is_checkmate() {
        return Ok(false);
    }
    if !matches!(after.piece_type_at(to), Some(Role::Queen | Role::Rook)) {
        return Ok(false);
    }

    let mated = after.current_color();
    let mut blockers = 0;
    for square in after.attacks(king) & !after.attacks(to) {
        if square.rank() == rank || after.is_attacked_by(after.other_color(), square) {
            continue;
        }
        if after.piece_color_at(square) != Some(mated) {
            return Ok(false);
        }
        blockers += 1;
    }

    if blockers > 0 {
        debug!(fen = %board.fen(), mv = %move_to_uci(mv), blockers, "back-rank mate");
    }
    Ok(blockers > 0)
}
