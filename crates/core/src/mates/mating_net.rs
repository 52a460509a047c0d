use shakmaty::{Bitboard, Move, Role};
use tracing::debug;

use crate::board::{move_to_uci, AugBoard};
use crate::error::Result;

/// Multiset of piece types, one counter per role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RoleCounts([u8; 6]);

impl RoleCounts {
    fn slot(role: Role) -> usize {
        match role {
            Role::Pawn => 0,
            Role::Knight => 1,
            Role::Bishop => 2,
            Role::Rook => 3,
            Role::Queen => 4,
            Role::King => 5,
        }
    }

    pub fn add(&mut self, role: Role) {
        self.0[Self::slot(role)] += 1;
    }

    pub fn get(&self, role: Role) -> u8 {
        self.0[Self::slot(role)]
    }

    pub fn total(&self) -> u32 {
        self.0.iter().map(|&n| u32::from(n)).sum()
    }
}

impl FromIterator<Role> for RoleCounts {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        let mut counts = RoleCounts::default();
        for role in iter {
            counts.add(role);
        }
        counts
    }
}

/// Pieces of the mating side holding a mated king: `maters` give check,
/// `cutters` cover the empty squares around the king without giving check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatingNet {
    pub maters: Bitboard,
    pub cutters: Bitboard,
    pieces: RoleCounts,
}

impl MatingNet {
    /// Piece types over maters and cutters together.
    pub fn piece_types(&self) -> RoleCounts {
        self.pieces
    }
}

/// Mating net of a position whose side to move is checkmated, `None` for any
/// other position.
pub fn mating_net(board: &AugBoard) -> Option<MatingNet> {
    if !board.is_checkmate() {
        return None;
    }
    let king = board.current_color_king()?;
    let mating = board.other_color();

    let maters = board.attackers(mating, king);
    let occupied = board.board().occupied();
    let cutters = (board.attacks(king) & !occupied)
        .into_iter()
        .fold(Bitboard::EMPTY, |acc, sq| {
            acc | board.attackers_through(mating, sq, king)
        })
        & !maters;

    let pieces = (maters | cutters)
        .into_iter()
        .filter_map(|sq| board.piece_type_at(sq))
        .collect();
    Some(MatingNet {
        maters,
        cutters,
        pieces,
    })
}

/// Mating net after `mv`, `None` when `mv` does not mate.
pub fn move_mating_net(board: &AugBoard, mv: &Move) -> Result<Option<MatingNet>> {
    Ok(mating_net(&board.after(mv)?))
}

/// `mv` mates with exactly `pieces` in the mating net.
pub fn is_mate_with_pieces(board: &AugBoard, mv: &Move, pieces: &[Role]) -> Result<bool> {
    let Some(net) = move_mating_net(board, mv)? else {
        return Ok(false);
    };
    let wanted: RoleCounts = pieces.iter().copied().collect();
    let matches = net.piece_types() == wanted;
    if matches {
        debug!(fen = %board.fen(), mv = %move_to_uci(mv), ?pieces, "piece-combination mate");
    }
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::Square;

    fn board_and_move(fen: &str, uci: &str) -> (AugBoard, Move) {
        let board = AugBoard::from_fen(fen).unwrap();
        let mv = board.parse_uci(uci).unwrap();
        (board, mv)
    }

    #[test]
    fn test_king_and_queen_net() {
        let (board, mv) = board_and_move("k7/8/1K6/8/8/8/7Q/8 w - - 0 1", "h2h8");
        let net = move_mating_net(&board, &mv).unwrap().unwrap();
        assert_eq!(net.maters, Bitboard::from_square(Square::H8));
        assert_eq!(net.cutters, Bitboard::from_square(Square::B6));
        assert_eq!(net.piece_types().get(Role::Queen), 1);
        assert_eq!(net.piece_types().get(Role::King), 1);
        assert_eq!(net.piece_types().total(), 2);
        assert!(is_mate_with_pieces(&board, &mv, &[Role::King, Role::Queen]).unwrap());
        assert!(!is_mate_with_pieces(&board, &mv, &[Role::Queen, Role::Rook]).unwrap());
    }

    #[test]
    fn test_two_rooks_ladder() {
        // Rb7 cuts off the seventh rank, Ra8 mates
        let (board, mv) = board_and_move("6k1/1R6/8/8/8/8/8/R5K1 w - - 0 1", "a1a8");
        assert!(is_mate_with_pieces(&board, &mv, &[Role::Rook, Role::Rook]).unwrap());
    }

    #[test]
    fn test_cutters_see_through_the_king() {
        // h8 lies behind the king on the mating rank
        let (board, mv) = board_and_move("6k1/5ppp/8/8/8/8/5PPP/3R2K1 w - - 0 1", "d1d8");
        let net = move_mating_net(&board, &mv).unwrap().unwrap();
        assert_eq!(net.maters, Bitboard::from_square(Square::D8));
        assert!(net.cutters.is_empty());
    }

    #[test]
    fn test_no_net_without_mate() {
        let board = AugBoard::from_fen("6k1/5ppp/8/8/8/8/5PPP/3R2K1 w - - 0 1").unwrap();
        assert!(mating_net(&board).is_none());
    }
}
