use shakmaty::{Color, Move, Role, Square};
use tracing::debug;

use super::{is_line_piece, is_safely_capturable};
use crate::board::{attacking_pairs_on, move_to_uci, on_ray, AttackPairs, AugBoard};
use crate::error::Result;

/// A pin: a line piece creates an attack on an enemy piece that shields a
/// more valuable piece behind it on the same ray.
///
/// Absolute when the shielded piece is the king. Relative when, with the
/// pinned piece lifted and the move handed back to us, taking the shielded
/// piece with the pinning piece wins material.
pub fn is_pin(board: &AugBoard, mv: &Move) -> Result<bool> {
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

    for (pinner, pinned, shielded) in pin_triples(&after, &created, mover)? {
        // TODO: pinned pawns; needs a rule for when a pawn pin wins anything
        if after.piece_type_at(pinned) == Some(Role::Pawn) {
            continue;
        }

        if after.piece_type_at(shielded) == Some(Role::King) {
            debug!(fen = %board.fen(), mv = %move_to_uci(mv), %pinned, "absolute pin");
            return Ok(true);
        }

        let Some(probe) = after.without_piece_null_moved(pinned) else {
            continue;
        };
        if probe.see(shielded, Some(pinner), 1)? > 0 {
            debug!(fen = %board.fen(), mv = %move_to_uci(mv), %pinned, "relative pin");
            return Ok(true);
        }
    }
    Ok(false)
}

/// (pinner, pinned, shielded) for every new attack whose target hides a
/// heavier piece on the same ray, skipping pinners the opponent can take.
fn pin_triples(
    after: &AugBoard,
    created: &AttackPairs,
    mover: Color,
) -> Result<Vec<(Square, Square, Square)>> {
    let mut triples = Vec::new();
    for pair in created {
        if is_safely_capturable(after, pair.attacker)? {
            continue;
        }
        let pinned_value = after.piece_value_at(pair.attacked);
        let scratch = after.without_piece(pair.attacked);
        for behind in attacking_pairs_on(&scratch, mover) {
            if behind.attacker == pair.attacker
                && on_ray(pair.attacker, pair.attacked, behind.attacked)
                && after.piece_value_at(behind.attacked) > pinned_value
            {
                triples.push((pair.attacker, pair.attacked, behind.attacked));
            }
        }
    }
    Ok(triples)
}
