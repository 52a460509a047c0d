//! Attack-set algebra
//!
//! An attacking pair is an (attacker, attacked) relation between a piece and
//! an enemy piece it hits. Detectors diff the pair sets before and after a
//! move to find the attacks the move created.

use std::collections::BTreeSet;

use shakmaty::{attacks, Bitboard, Board, Color, Move, Square};

use super::{destination, squares, AugBoard};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttackPair {
    pub attacker: Square,
    pub attacked: Square,
}

pub type AttackPairs = BTreeSet<AttackPair>;

/// All pairs where a piece of `color` attacks a piece of the other color.
pub fn attacking_pairs_on(board: &Board, color: Color) -> AttackPairs {
    let occupied = board.occupied();
    let mut pairs = AttackPairs::new();
    for attacked in board.by_color(!color) {
        for attacker in board.attacks_to(attacked, color, occupied) {
            pairs.insert(AttackPair { attacker, attacked });
        }
    }
    pairs
}

/// True iff `middle` lies strictly between `from` and `to` on a line.
pub fn on_ray(from: Square, middle: Square, to: Square) -> bool {
    attacks::between(from, to).contains(middle)
}

/// Filter applied to the targets of [`AugBoard::move_attacks`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttackFilter {
    pub min_value: Option<i32>,
    pub max_value: Option<i32>,
    pub defended: Option<bool>,
}

impl AttackFilter {
    pub fn any() -> Self {
        Self::default()
    }

    pub fn min_value(mut self, value: i32) -> Self {
        self.min_value = Some(value);
        self
    }

    pub fn max_value(mut self, value: i32) -> Self {
        self.max_value = Some(value);
        self
    }

    pub fn defended(mut self, defended: bool) -> Self {
        self.defended = Some(defended);
        self
    }

    fn accepts(&self, board: &AugBoard, square: Square) -> bool {
        let value = board.piece_value_at(square);
        self.min_value.map_or(true, |min| value >= min)
            && self.max_value.map_or(true, |max| value <= max)
            && self
                .defended
                .map_or(true, |defended| board.is_square_defended(square) == defended)
    }
}

impl AugBoard {
    /// Pairs for `color` in the position as it stands.
    pub fn attacking_pairs(&self, color: Color) -> AttackPairs {
        attacking_pairs_on(self.board(), color)
    }

    /// Enemy pieces the moved piece attacks once `mv` is played, filtered by
    /// value and by whether their own side defends them.
    pub fn move_attacks(&self, mv: &Move, filter: AttackFilter) -> Result<Bitboard> {
        let after = self.after(mv)?;
        let targets = after.attacks(destination(mv)) & after.board().by_color(after.current_color());
        Ok(squares(
            targets
                .into_iter()
                .filter(|&square| filter.accepts(&after, square)),
        ))
    }

    /// Pairs of the mover that exist after `mv` but not before, together
    /// with the position after the move.
    pub fn new_attacking_pairs(&self, mv: &Move) -> Result<(AugBoard, AttackPairs)> {
        let mover = self.current_color();
        let before = self.attacking_pairs(mover);
        let after = self.after(mv)?;
        let created = after
            .attacking_pairs(mover)
            .difference(&before)
            .copied()
            .collect();
        Ok((after, created))
    }
}
