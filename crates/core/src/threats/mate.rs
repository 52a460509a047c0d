use shakmaty::Move;
use tracing::debug;

use super::after_with_tempo;
use crate::board::{move_to_uci, AugBoard};
use crate::error::Result;

/// A quiet move after which the mover, if allowed a second move, would mate
/// in one. Checks are excluded, as are positions where the mover already had
/// a mate in one.
pub fn creates_mate_threat(board: &AugBoard, mv: &Move) -> Result<bool> {
    if board.gives_check(mv)? || board.has_mate()? {
        return Ok(false);
    }
    let Some(probe) = after_with_tempo(board, mv)? else {
        return Ok(false);
    };
    let threat = probe.has_mate()?;
    if threat {
        debug!(fen = %board.fen(), mv = %move_to_uci(mv), "mate threat");
    }
    Ok(threat)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEN: &str = "7k/6pp/8/8/8/P7/R7/6K1 w - - 0 1";

    fn check(uci: &str) -> bool {
        let board = AugBoard::from_fen(FEN).unwrap();
        let mv = board.parse_uci(uci).unwrap();
        creates_mate_threat(&board, &mv).unwrap()
    }

    #[test]
    fn test_rook_swing_threatens_back_rank_mate() {
        assert!(check("a2d2"));
    }

    #[test]
    fn test_pawn_push_threatens_nothing() {
        assert!(!check("a3a4"));
    }

    #[test]
    fn test_threat_survives_requery() {
        let board = AugBoard::from_fen(FEN).unwrap();
        let mv = board.parse_uci("a2d2").unwrap();
        assert!(creates_mate_threat(&board, &mv).unwrap());
        let mut replay = board.clone();
        replay.push(&mv).unwrap();
        replay.push_null().unwrap();
        assert!(replay.has_mate().unwrap());
    }

    #[test]
    fn test_existing_mate_is_not_a_new_threat() {
        let board = AugBoard::from_fen("6k1/5ppp/8/8/8/8/5PPP/3R2K1 w - - 0 1").unwrap();
        let mv = board.parse_uci("h2h3").unwrap();
        assert!(!creates_mate_threat(&board, &mv).unwrap());
    }
}
