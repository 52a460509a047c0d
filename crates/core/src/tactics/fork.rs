use shakmaty::Move;
use tracing::debug;

use crate::board::{destination, move_to_uci, AttackFilter, AugBoard};
use crate::error::Result;

/// A move is a fork when the moved piece attacks at least two targets worth
/// attacking (heavier than itself, or undefended minor-or-better pieces) and
/// the opponent cannot win the piece back by capturing it.
///
/// A mating move is never a fork: the mate is the point of the move.
pub fn is_fork(board: &AugBoard, mv: &Move) -> Result<bool> {
    let Some(from) = mv.from() else {
        return Ok(false);
    };
    if board.gives_checkmate(mv)? {
        return Ok(false);
    }

    let heavier = AttackFilter::any().min_value(board.piece_value_at(from) + 1);
    let loose = AttackFilter::any().min_value(3).defended(false);
    let attacked = board.move_attacks(mv, heavier)? | board.move_attacks(mv, loose)?;
    if attacked.count() < 2 {
        return Ok(false);
    }

    let after = board.after(mv)?;
    let to = destination(mv);
    let fork = after.square_capturers(to).is_empty() || after.see(to, None, 1)? < 0;
    if fork {
        debug!(fen = %board.fen(), mv = %move_to_uci(mv), targets = attacked.count(), "fork");
    }
    Ok(fork)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(fen: &str, uci: &str) -> bool {
        let board = AugBoard::from_fen(fen).unwrap();
        let mv = board.parse_uci(uci).unwrap();
        is_fork(&board, &mv).unwrap()
    }

    #[test]
    fn test_knight_forks_king_and_queen() {
        assert!(check("3k4/N3q3/8/8/8/8/8/3K4 w - - 0 1", "a7c6"));
    }

    #[test]
    fn test_single_target_is_not_a_fork() {
        assert!(!check("3k4/N3q3/8/8/8/8/8/3K4 w - - 0 1", "a7c8"));
    }

    #[test]
    fn test_fork_on_a_defended_square_fails() {
        // the b7 pawn takes the knight on c6
        assert!(!check("3k4/Np2q3/8/8/8/8/8/3K4 w - - 0 1", "a7c6"));
    }

    #[test]
    fn test_pawn_forks_two_knights() {
        assert!(check("4k3/8/8/2n1n3/8/3P4/8/4K3 w - - 0 1", "d3d4"));
    }

    #[test]
    fn test_fork_leaves_position_untouched() {
        let fen = "3k4/N3q3/8/8/8/8/8/3K4 w - - 0 1";
        let board = AugBoard::from_fen(fen).unwrap();
        let mv = board.parse_uci("a7c6").unwrap();
        is_fork(&board, &mv).unwrap();
        assert_eq!(board.fen(), fen);
    }
}
