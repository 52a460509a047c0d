//! Checkmate pattern classification
//!
//! Detectors take the position before the mating move and return `Ok(false)`
//! when the move does not mate. Piece-combination mates are read off the
//! mating net of the final position.

mod arabian;
mod backrank;
mod mating_net;
mod smothered;

pub use arabian::{is_arabian_mate, is_arabian_mate_anywhere, is_arabian_mate_classic};
pub use backrank::is_back_rank_mate;
pub use mating_net::{is_mate_with_pieces, mating_net, move_mating_net, MatingNet, RoleCounts};
pub use smothered::is_smothered_mate;

use serde::{Deserialize, Serialize};
use shakmaty::{Move, Role};
use tracing::warn;

use crate::board::{move_to_uci, AugBoard};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum CheckmateType {
    None = 0,
    BackRank = 1,
    Smothered = 2,
    Arabian = 3,
    QueenRook = 4,
    RookRook = 5,
    KingQueen = 6,
    KingRook = 7,
    KingBishopBishop = 8,
    KingBishopKnight = 9,
}

impl CheckmateType {
    pub const ALL: [CheckmateType; 9] = [
        CheckmateType::BackRank,
        CheckmateType::Smothered,
        CheckmateType::Arabian,
        CheckmateType::QueenRook,
        CheckmateType::RookRook,
        CheckmateType::KingQueen,
        CheckmateType::KingRook,
        CheckmateType::KingBishopBishop,
        CheckmateType::KingBishopKnight,
    ];

    /// Pieces that make up the mating net of a piece-combination mate.
    pub fn combination(&self) -> Option<&'static [Role]> {
        match self {
            CheckmateType::QueenRook => Some(&[Role::Queen, Role::Rook]),
            CheckmateType::RookRook => Some(&[Role::Rook, Role::Rook]),
            CheckmateType::KingQueen => Some(&[Role::King, Role::Queen]),
            CheckmateType::KingRook => Some(&[Role::King, Role::Rook]),
            CheckmateType::KingBishopBishop => Some(&[Role::King, Role::Bishop, Role::Bishop]),
            CheckmateType::KingBishopKnight => Some(&[Role::King, Role::Bishop, Role::Knight]),
            _ => None,
        }
    }

    pub fn detect(self, board: &AugBoard, mv: &Move) -> Result<bool> {
        match self {
            CheckmateType::None => Ok(false),
            CheckmateType::BackRank => is_back_rank_mate(board, mv),
            CheckmateType::Smothered => is_smothered_mate(board, mv),
            CheckmateType::Arabian => is_arabian_mate(board, mv),
            combo => match combo.combination() {
                Some(pieces) => is_mate_with_pieces(board, mv, pieces),
                None => Ok(false),
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckmateType::None => "none",
            CheckmateType::BackRank => "back_rank",
            CheckmateType::Smothered => "smothered",
            CheckmateType::Arabian => "arabian",
            CheckmateType::QueenRook => "queen_rook",
            CheckmateType::RookRook => "rook_rook",
            CheckmateType::KingQueen => "king_queen",
            CheckmateType::KingRook => "king_rook",
            CheckmateType::KingBishopBishop => "king_bishop_bishop",
            CheckmateType::KingBishopKnight => "king_bishop_knight",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CheckmateType::None => "None",
            CheckmateType::BackRank => "Back-Rank Mate",
            CheckmateType::Smothered => "Smothered Mate",
            CheckmateType::Arabian => "Arabian Mate",
            CheckmateType::QueenRook => "Queen and Rook Mate",
            CheckmateType::RookRook => "Two Rooks Mate",
            CheckmateType::KingQueen => "King and Queen Mate",
            CheckmateType::KingRook => "King and Rook Mate",
            CheckmateType::KingBishopBishop => "Two Bishops Mate",
            CheckmateType::KingBishopKnight => "Bishop and Knight Mate",
        }
    }
}

/// Classifies the mate delivered by the last move of `pv`.
///
/// All but the last move are played first. A last move that does not mate
/// means the caller handed over a line that is not a mating line, which is
/// reported as `Error::NotCheckmate`.
pub fn checkmate_types(
    board: &AugBoard,
    pv: &[Move],
    enabled: &[CheckmateType],
) -> Result<Vec<CheckmateType>> {
    let Some((last, line)) = pv.split_last() else {
        return Err(Error::EmptyPv);
    };
    let before = board.after_line(line)?;
    if !before.gives_checkmate(last)? {
        warn!(fen = %before.fen(), mv = %move_to_uci(last), "line does not end in checkmate");
        return Err(Error::NotCheckmate {
            uci: move_to_uci(last),
            fen: before.fen(),
        });
    }

    let mut found = Vec::new();
    for kind in enabled {
        if kind.detect(&before, last)? {
            found.push(*kind);
        }
    }
    found.sort();
    found.dedup();
    if found.is_empty() {
        found.push(CheckmateType::None);
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkmate_type_strings() {
        assert_eq!(CheckmateType::BackRank.as_str(), "back_rank");
        assert_eq!(CheckmateType::KingBishopKnight.as_str(), "king_bishop_knight");
        assert_eq!(CheckmateType::Smothered.display_name(), "Smothered Mate");
        assert_eq!(CheckmateType::KingQueen as u8, 6);
    }

    #[test]
    fn test_smothered_mate_line() {
        let board = AugBoard::from_fen("4r1k1/2pRP1pp/2p5/p4pN1/5Qn1/q5P1/P3PP1P/6K1 w - - 0 1")
            .unwrap();
        let pv = board
            .parse_pv(&[
                "f4c4", "g8h8", "g5f7", "h8g8", "f7h6", "g8h8", "c4g8", "e8g8", "h6f7",
            ])
            .unwrap();
        let types = checkmate_types(&board, &pv, &CheckmateType::ALL).unwrap();
        assert_eq!(types, vec![CheckmateType::Smothered]);
    }

    #[test]
    fn test_king_and_queen_mate_on_the_back_rank() {
        let board = AugBoard::from_fen("k7/8/1K6/8/8/8/7Q/8 w - - 0 1").unwrap();
        let pv = board.parse_pv(&["h2h8"]).unwrap();
        let types = checkmate_types(&board, &pv, &CheckmateType::ALL).unwrap();
        assert_eq!(types, vec![CheckmateType::KingQueen]);
    }

    fn mate_types(fen: &str, uci: &str) -> Vec<CheckmateType> {
        let board = AugBoard::from_fen(fen).unwrap();
        let pv = board.parse_pv(&[uci]).unwrap();
        checkmate_types(&board, &pv, &CheckmateType::ALL).unwrap()
    }

    #[test]
    fn test_queen_and_rook_mate() {
        // Rb7 holds the seventh rank, Qa8 mates
        assert_eq!(
            mate_types("6k1/1R6/8/8/8/8/8/Q5K1 w - - 0 1", "a1a8"),
            vec![CheckmateType::QueenRook]
        );
    }

    #[test]
    fn test_king_and_rook_mate() {
        assert_eq!(
            mate_types("k7/8/1K6/8/8/8/8/7R w - - 0 1", "h1h8"),
            vec![CheckmateType::KingRook]
        );
    }

    #[test]
    fn test_two_bishops_mate() {
        // Be5 covers b8, the king takes a7 and b7
        assert_eq!(
            mate_types("k7/8/1K6/4B3/8/8/B7/8 w - - 0 1", "a2d5"),
            vec![CheckmateType::KingBishopBishop]
        );
    }

    #[test]
    fn test_bishop_and_knight_mate() {
        // Nd7 covers b8
        assert_eq!(
            mate_types("k7/3N4/1K6/8/8/8/B7/8 w - - 0 1", "a2d5"),
            vec![CheckmateType::KingBishopKnight]
        );
    }

    #[test]
    fn test_non_mating_line_is_an_error() {
        let board = AugBoard::from_fen("6k1/5ppp/8/8/8/8/5PPP/3R2K1 w - - 0 1").unwrap();
        let pv = board.parse_pv(&["d1d7"]).unwrap();
        let err = checkmate_types(&board, &pv, &CheckmateType::ALL).unwrap_err();
        assert!(matches!(err, Error::NotCheckmate { .. }));
    }

    #[test]
    fn test_empty_line_is_an_error() {
        let board = AugBoard::from_fen("6k1/5ppp/8/8/8/8/5PPP/3R2K1 w - - 0 1").unwrap();
        assert!(matches!(
            checkmate_types(&board, &[], &CheckmateType::ALL),
            Err(Error::EmptyPv)
        ));
    }

    #[test]
    fn test_disabled_patterns_report_none() {
        let board = AugBoard::from_fen("6k1/5ppp/8/8/8/8/5PPP/3R2K1 w - - 0 1").unwrap();
        let pv = board.parse_pv(&["d1d8"]).unwrap();
        let types = checkmate_types(&board, &pv, &[CheckmateType::Smothered]).unwrap();
        assert_eq!(types, vec![CheckmateType::None]);
    }
}
