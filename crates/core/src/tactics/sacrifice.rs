use shakmaty::Move;
use tracing::debug;

use crate::board::{destination, move_to_uci, role_value, AugBoard};
use crate::error::Result;

/// A sacrifice gives material away: the piece moves to an empty square or
/// takes something cheaper, and after the opponent's best recaptures on the
/// destination the mover is strictly down.
pub fn is_sacrifice(board: &AugBoard, mv: &Move) -> Result<bool> {
    let Some(from) = mv.from() else {
        return Ok(false);
    };
    if mv.is_castle() {
        return Ok(false);
    }
    let to = destination(mv);
    if mv.capture().map_or(0, role_value) >= board.piece_value_at(from) {
        return Ok(false);
    }

    let balance = board.see(to, Some(from), 1)?;
    if balance < 0 {
        debug!(fen = %board.fen(), mv = %move_to_uci(mv), balance, "sacrifice");
    }
    Ok(balance < 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(fen: &str, uci: &str) -> bool {
        let board = AugBoard::from_fen(fen).unwrap();
        let mv = board.parse_uci(uci).unwrap();
        is_sacrifice(&board, &mv).unwrap()
    }

    #[test]
    fn test_queen_for_defended_pawn() {
        assert!(check("4k3/8/2p5/3p4/8/8/8/3QK3 w - - 0 1", "d1d5"));
    }

    #[test]
    fn test_winning_capture_is_not_a_sacrifice() {
        assert!(!check("4k3/8/8/3n4/4P3/8/8/4K3 w - - 0 1", "e4d5"));
    }

    #[test]
    fn test_queen_walks_into_pawn() {
        assert!(check("4k3/8/2p5/8/8/8/8/3QK3 w - - 0 1", "d1d5"));
    }

    #[test]
    fn test_even_en_passant_trade() {
        // exd6 cxd6 swaps pawns
        assert!(!check("4k3/2p5/8/3pP3/8/8/8/4K3 w - d6 0 1", "e5d6"));
    }

    #[test]
    fn test_safe_quiet_move() {
        assert!(!check("4k3/8/8/8/8/8/8/3QK3 w - - 0 1", "d1d5"));
    }
}
