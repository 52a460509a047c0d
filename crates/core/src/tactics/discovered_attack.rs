use shakmaty::{Move, Role};
use tracing::debug;

use super::is_safely_capturable;
use crate::board::{destination, move_to_uci, on_ray, AugBoard};
use crate::error::Result;

/// A discovered attack: moving a piece off the line between one of our
/// pieces and an enemy piece creates a new attack by the piece behind it.
///
/// The uncovered attack counts when its target is worth attacking (heavier
/// than the attacker, or undefended) and cannot simply take the moved piece,
/// and when the attacker is sound: not safely capturable, defended, or the
/// move gives check. On a mating move only the attack on the king counts.
pub fn is_discovered_attack(board: &AugBoard, mv: &Move) -> Result<bool> {
    let Some(from) = mv.from() else {
        return Ok(false);
    };
    let to = destination(mv);
    let (after, created) = board.new_attacking_pairs(mv)?;
    let mates = after.is_checkmate();
    let check = after.is_check();
    let hits_moved_piece = after.square_capturers(to);

    for pair in created {
        if pair.attacker == to || !on_ray(pair.attacker, from, pair.attacked) {
            continue;
        }
        if mates && after.piece_type_at(pair.attacked) != Some(Role::King) {
            continue;
        }

        let worth_attacking = after.piece_value_at(pair.attacker)
            < after.piece_value_at(pair.attacked)
            || !after.is_square_defended(pair.attacked);
        if !worth_attacking || hits_moved_piece.contains(pair.attacked) {
            continue;
        }

        let sound = check
            || after.is_square_defended(pair.attacker)
            || !is_safely_capturable(&after, pair.attacker)?;
        if sound {
            debug!(
                fen = %board.fen(),
                mv = %move_to_uci(mv),
                attacker = %pair.attacker,
                attacked = %pair.attacked,
                "discovered attack"
            );
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(fen: &str, uci: &str) -> bool {
        let board = AugBoard::from_fen(fen).unwrap();
        let mv = board.parse_uci(uci).unwrap();
        is_discovered_attack(&board, &mv).unwrap()
    }

    #[test]
    fn test_knight_uncovers_rook_on_queen() {
        assert!(check("q3k3/8/8/8/N7/8/1K6/R7 w - - 0 1", "a4c5"));
    }

    #[test]
    fn test_unprotected_rook_can_be_taken() {
        // without the king on b2 the queen simply takes the rook
        assert!(!check("q3k3/8/8/8/N7/8/8/R3K3 w - - 0 1", "a4c5"));
    }

    #[test]
    fn test_discovered_check_holds() {
        // the bishop steps off the e-file and the rook gives check
        assert!(check("4k3/8/8/8/4B3/8/8/K3R3 w - - 0 1", "e4h7"));
    }

    #[test]
    fn test_plain_move_is_not_discovered() {
        assert!(!check("q3k3/8/8/8/N7/8/1K6/R7 w - - 0 1", "b2c2"));
    }
}
