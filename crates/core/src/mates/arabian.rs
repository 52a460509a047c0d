use shakmaty::{File, Move, Piece, Rank, Role, Square};
use tracing::debug;

use crate::board::{destination, move_to_uci, AugBoard};
use crate::error::Result;

/// Arabian mate with the king anywhere on the edge of the board.
pub fn is_arabian_mate(board: &AugBoard, mv: &Move) -> Result<bool> {
    let Some(king) = board.other_color_king() else {
        return Ok(false);
    };
    let on_edge = matches!(king.file(), File::A | File::H)
        || matches!(king.rank(), Rank::First | Rank::Eighth);
    if !on_edge {
        return Ok(false);
    }
    is_arabian_mate_anywhere(board, mv)
}

/// The textbook pattern: king in a corner, rook next to it on the edge and
/// a knight two squares away on the diagonal guarding the rook.
pub fn is_arabian_mate_classic(board: &AugBoard, mv: &Move) -> Result<bool> {
    let Some(king) = board.other_color_king() else {
        return Ok(false);
    };
    let Some((rook_squares, knight_square)) = corner_pattern(king) else {
        return Ok(false);
    };
    if !moves_rook(board, mv) {
        return Ok(false);
    }

    let after = board.after(mv)?;
    if !after.is_checkmate() {
        return Ok(false);
    }
    let knight = Piece {
        color: after.other_color(),
        role: Role::Knight,
    };
    Ok(rook_squares.contains(&destination(mv)) && after.piece_at(knight_square) == Some(knight))
}

/// Rook mate next to the king, the rook guarded by a knight and every free
/// square around the king covered. The king may stand anywhere.
pub fn is_arabian_mate_anywhere(board: &AugBoard, mv: &Move) -> Result<bool> {
    let Some(king) = board.other_color_king() else {
        return Ok(false);
    };
    if !moves_rook(board, mv) {
        return Ok(false);
    }

    let after = board.after(mv)?;
    if !after.is_checkmate() {
        return Ok(false);
    }

    let rook = destination(mv);
    if king.distance(rook) > 1 || !after.attacks(rook).contains(king) {
        return Ok(false);
    }

    let mating = after.other_color();
    let knight_guard = after
        .attackers(mating, rook)
        .into_iter()
        .any(|sq| after.piece_type_at(sq) == Some(Role::Knight));
    if !knight_guard {
        return Ok(false);
    }

    let covered = after
        .attacks(king)
        .into_iter()
        .filter(|&sq| after.piece_at(sq).is_none())
        .all(|sq| after.attackers_through(mating, sq, king).any());
    if covered {
        debug!(fen = %board.fen(), mv = %move_to_uci(mv), %king, "arabian mate");
    }
    Ok(covered)
}

fn moves_rook(board: &AugBoard, mv: &Move) -> bool {
    !mv.is_castle() && mv.from().and_then(|sq| board.piece_type_at(sq)) == Some(Role::Rook)
}

/// Rook squares and knight square of the classic pattern for a cornered king.
fn corner_pattern(king: Square) -> Option<([Square; 2], Square)> {
    match king {
        Square::A1 => Some(([Square::A2, Square::B1], Square::C3)),
        Square::H1 => Some(([Square::H2, Square::G1], Square::F3)),
        Square::A8 => Some(([Square::A7, Square::B8], Square::C6)),
        Square::H8 => Some(([Square::H7, Square::G8], Square::F6)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_and_move(fen: &str, uci: &str) -> (AugBoard, Move) {
        let board = AugBoard::from_fen(fen).unwrap();
        let mv = board.parse_uci(uci).unwrap();
        (board, mv)
    }

    #[test]
    fn test_corner_arabian_mate() {
        let (board, mv) = board_and_move("7k/R7/5N2/8/8/8/8/6K1 w - - 0 1", "a7h7");
        assert!(is_arabian_mate(&board, &mv).unwrap());
        assert!(is_arabian_mate_classic(&board, &mv).unwrap());
        assert!(is_arabian_mate_anywhere(&board, &mv).unwrap());
    }

    #[test]
    fn test_edge_arabian_mate_is_not_classic() {
        // king on e8 between its own knights, rook on e7 guarded by Nd5
        let (board, mv) = board_and_move("3nkn2/R7/8/3N4/8/8/8/6K1 w - - 0 1", "a7e7");
        assert!(is_arabian_mate(&board, &mv).unwrap());
        assert!(!is_arabian_mate_classic(&board, &mv).unwrap());
    }

    #[test]
    fn test_rook_without_knight_is_not_arabian() {
        let (board, mv) = board_and_move("6k1/5ppp/8/8/8/8/5PPP/3R2K1 w - - 0 1", "d1d8");
        assert!(!is_arabian_mate(&board, &mv).unwrap());
    }
}
