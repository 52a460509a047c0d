use shakmaty::Move;
use tracing::debug;

use super::after_with_tempo;
use crate::board::{move_to_uci, AugBoard};
use crate::error::Result;
use crate::tactics::is_fork;

/// The move prepares a fork: given a second move in a row the mover would
/// have a forking move available. Checks are excluded.
pub fn creates_fork_threat(board: &AugBoard, mv: &Move) -> Result<bool> {
    if board.gives_check(mv)? {
        return Ok(false);
    }
    let Some(probe) = after_with_tempo(board, mv)? else {
        return Ok(false);
    };
    for next in probe.legal_moves() {
        if is_fork(&probe, &next)? {
            debug!(fen = %board.fen(), mv = %move_to_uci(mv), fork = %move_to_uci(&next), "fork threat");
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEN: &str = "2q3k1/8/8/8/1N6/8/8/K7 w - - 0 1";

    fn check(uci: &str) -> bool {
        let board = AugBoard::from_fen(FEN).unwrap();
        let mv = board.parse_uci(uci).unwrap();
        creates_fork_threat(&board, &mv).unwrap()
    }

    #[test]
    fn test_knight_heads_for_fork_square() {
        // Nd5 threatens Ne7+ hitting king and queen
        assert!(check("b4d5"));
    }

    #[test]
    fn test_king_move_threatens_no_fork() {
        assert!(!check("a1b1"));
    }
}
