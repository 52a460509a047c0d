use shakmaty::{Color, Move, Square};
use tracing::debug;

use super::{is_line_piece, is_safely_capturable};
use crate::board::{attacking_pairs_on, move_to_uci, on_ray, role_value, AttackPairs, AugBoard};
use crate::error::Result;

/// A skewer: a line piece attacks a more valuable piece that has to step
/// aside and expose a lesser (but at least minor) piece behind it on the
/// same ray.
///
/// The skewer fails if the front piece has a move that saves the material,
/// i.e. some move after which taking the rear piece no longer pays.
pub fn is_skewer(board: &AugBoard, mv: &Move) -> Result<bool> {
    let Some(from) = mv.from() else {
        return Ok(false);
    };
    if !is_line_piece(board.piece_type_at(from)) {
        return Ok(false);
    }

    let mover = board.current_color();
    let (after, created) = board.new_attacking_pairs(mv)?;
    if after.is_checkmate() {
        return Ok(false);
    }

    for (attacker, front, rear) in skewer_triples(&after, &created, mover)? {
        if !has_escape(&after, attacker, front, rear)? {
            debug!(fen = %board.fen(), mv = %move_to_uci(mv), %front, %rear, "skewer");
            return Ok(true);
        }
    }
    Ok(false)
}

fn skewer_triples(
    after: &AugBoard,
    created: &AttackPairs,
    mover: Color,
) -> Result<Vec<(Square, Square, Square)>> {
    let mut triples = Vec::new();
    for pair in created {
        let front_value = after.piece_value_at(pair.attacked);
        if after.legal_moves_from(pair.attacked).is_empty() {
            continue;
        }
        if after.piece_value_at(pair.attacker) >= front_value {
            continue;
        }
        if is_safely_capturable(after, pair.attacker)? {
            continue;
        }

        let scratch = after.without_piece(pair.attacked);
        for behind in attacking_pairs_on(&scratch, mover) {
            let rear_value = after.piece_value_at(behind.attacked);
            if behind.attacker == pair.attacker
                && rear_value >= 3
                && rear_value <= front_value
                && on_ray(pair.attacker, pair.attacked, behind.attacked)
            {
                triples.push((pair.attacker, pair.attacked, behind.attacked));
            }
        }
    }
    Ok(triples)
}

/// Some move of the front piece leaves the attacker nothing to gain on the
/// rear piece, counting whatever the front piece captures on the way.
fn has_escape(after: &AugBoard, attacker: Square, front: Square, rear: Square) -> Result<bool> {
    for escape in after.legal_moves_from(front) {
        let taken = escape.capture().map_or(0, role_value);
        let reply = after.after(&escape)?;
        if taken - reply.see(rear, Some(attacker), 0)? >= 0 {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tactics::is_pin;

    fn board_and_move(fen: &str, uci: &str) -> (AugBoard, Move) {
        let board = AugBoard::from_fen(fen).unwrap();
        let mv = board.parse_uci(uci).unwrap();
        (board, mv)
    }

    #[test]
    fn test_rook_skewers_king_and_queen() {
        let (board, mv) = board_and_move("R7/8/8/8/4k3/8/4q3/7K w - - 0 1", "a8e8");
        assert!(is_skewer(&board, &mv).unwrap());
        assert!(!is_pin(&board, &mv).unwrap());
    }

    #[test]
    fn test_pinned_front_piece_is_a_pin_not_a_skewer() {
        let (board, mv) = board_and_move("4k3/3n4/8/8/8/8/8/4KB2 w - - 0 1", "f1b5");
        assert!(is_pin(&board, &mv).unwrap());
        assert!(!is_skewer(&board, &mv).unwrap());
    }

    #[test]
    fn test_defended_rear_piece_escapes() {
        // the d3 pawn guards the knight, so Rxe2 only loses the exchange
        let (board, mv) = board_and_move("R7/8/8/8/4k3/3p4/4n3/7K w - - 0 1", "a8e8");
        assert!(!is_skewer(&board, &mv).unwrap());
    }

    #[test]
    fn test_pawn_move_is_not_a_skewer() {
        let (board, mv) = board_and_move("R7/8/8/8/4k3/8/4q2P/7K w - - 0 1", "h2h3");
        assert!(!is_skewer(&board, &mv).unwrap());
    }
}
