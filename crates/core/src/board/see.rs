//! Static exchange evaluation

use std::cmp::Reverse;

use shakmaty::{Move, Square};
use tracing::trace;

use super::{role_value, AugBoard};
use crate::error::Result;

impl AugBoard {
    /// Net material the side to move wins by starting a capture sequence on
    /// `square`, assuming either side may stop once continuing would lose.
    ///
    /// `attacker` picks the piece that moves onto the square first; without
    /// it the least valuable capturer goes first. The first
    /// `moves_without_stop` plies are played even when they lose material.
    pub fn see(
        &self,
        square: Square,
        attacker: Option<Square>,
        moves_without_stop: u32,
    ) -> Result<i32> {
        self.exchange(square, attacker, moves_without_stop, 1)
    }

    fn exchange(
        &self,
        square: Square,
        attacker: Option<Square>,
        moves_without_stop: u32,
        move_num: u32,
    ) -> Result<i32> {
        let capture = match attacker {
            Some(from) => self.move_onto(from, square),
            None => self.least_valuable_capture(square),
        };
        let Some(capture) = capture else {
            return Ok(0);
        };

        let on_square = capture.capture().map_or(0, role_value);
        let child = self.after(&capture)?;
        let mut value = on_square - child.exchange(square, None, moves_without_stop, move_num + 1)?;
        if move_num > moves_without_stop {
            value = value.max(0);
        }
        trace!(%square, move_num, value, "exchange node");
        Ok(value)
    }

    /// Legal move of the piece on `from` onto `square`, capture or not.
    fn move_onto(&self, from: Square, square: Square) -> Option<Move> {
        self.legal_moves()
            .into_iter()
            .filter(|m| !m.is_castle() && m.from() == Some(from) && m.to() == square)
            .max_by_key(|m| m.promotion().map_or(0, role_value))
    }

    /// Capture onto `square` by the least valuable piece. Ties go to the
    /// lowest origin square, promotions to the queen.
    fn least_valuable_capture(&self, square: Square) -> Option<Move> {
        self.legal_moves()
            .into_iter()
            .filter(|m| m.is_capture() && m.to() == square)
            .min_by_key(|m| {
                (
                    role_value(m.role()),
                    m.from().map(|sq| sq as u8),
                    Reverse(m.promotion().map_or(0, role_value)),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(fen: &str) -> AugBoard {
        AugBoard::from_fen(fen).unwrap()
    }

    #[test]
    fn test_no_capturer_is_zero() {
        let b = board("4k3/8/8/3p4/8/8/8/4K3 w - - 0 1");
        assert_eq!(b.see(Square::D5, None, 0).unwrap(), 0);
    }

    #[test]
    fn test_undefended_piece_wins_its_value() {
        let b = board("4k3/8/8/3n4/4P3/8/8/4K3 w - - 0 1");
        assert_eq!(b.see(Square::D5, None, 0).unwrap(), 3);
    }

    #[test]
    fn test_defended_piece_nets_the_difference() {
        // exd5 cxd5: knight for pawn
        let b = board("4k3/8/2p5/3n4/4P3/8/8/4K3 w - - 0 1");
        assert_eq!(b.see(Square::D5, None, 0).unwrap(), 2);
    }

    #[test]
    fn test_forced_first_capture_can_go_negative() {
        // Qxd5 cxd5 loses the queen for a pawn
        let b = board("4k3/8/2p5/3p4/8/8/8/3QK3 w - - 0 1");
        assert_eq!(b.see(Square::D5, None, 0).unwrap(), 0);
        assert_eq!(b.see(Square::D5, Some(Square::D1), 1).unwrap(), -8);
    }

    #[test]
    fn test_least_valuable_capturer_goes_first() {
        // both the pawn and the queen hit d5; the pawn capture wins the knight cleanly
        let b = board("4k3/8/2p5/3n4/4P3/8/8/3QK3 w - - 0 1");
        assert_eq!(b.see(Square::D5, None, 0).unwrap(), 3);
    }

    #[test]
    fn test_quiet_first_move_with_explicit_attacker() {
        // Qd1-d5 walks into the c6 pawn
        let b = board("4k3/8/2p5/8/8/8/8/3QK3 w - - 0 1");
        assert_eq!(b.see(Square::D5, Some(Square::D1), 1).unwrap(), -9);
    }

    #[test]
    fn test_en_passant_wins_the_passed_pawn() {
        let b = board("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
        assert_eq!(b.see(Square::D6, None, 0).unwrap(), 1);
        // cxd6 recaptures at once
        let b = board("4k3/2p5/8/3pP3/8/8/8/4K3 w - d6 0 1");
        assert_eq!(b.see(Square::D6, Some(Square::E5), 1).unwrap(), 0);
    }

    #[test]
    fn test_see_does_not_mutate() {
        let fen = "4k3/8/2p5/3p4/8/8/8/3QK3 w - - 0 1";
        let b = board(fen);
        b.see(Square::D5, None, 0).unwrap();
        assert_eq!(b.fen(), fen);
    }
}
