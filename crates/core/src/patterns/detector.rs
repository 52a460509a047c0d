//! Pattern labeling engine

use tracing::debug;

use super::scan::scan_pv;
use super::types::*;
use crate::board::{move_to_uci, AugBoard};
use crate::config::AnalyzerConfig;
use crate::error::{Error, Result};
use crate::mates::checkmate_types;
use crate::structures::pawn_structures;

#[derive(Debug, Default)]
pub struct PatternDetector {
    config: AnalyzerConfig,
}

impl PatternDetector {
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Label a position and the line played from it
    /// fen: the root position
    /// pv: moves in UCI format (e.g., "e2e4"), starting with our move
    pub fn label<S: AsRef<str>>(&self, fen: &str, pv: &[S]) -> Result<PositionLabels> {
        let board = AugBoard::from_fen_with(fen, self.config.castling)?;
        let moves = board.parse_pv(pv)?;
        let Some(first) = moves.first() else {
            return Err(Error::EmptyPv);
        };
        let opening = std::slice::from_ref(first);
        let config = &self.config;

        let (pv_tactics, move_tactics) = if config.tactics.is_empty() {
            (Vec::new(), Vec::new())
        } else {
            (
                scan_pv(&board, &moves, &config.tactics)?,
                scan_pv(&board, opening, &config.tactics)?,
            )
        };

        let (pv_threats, move_threats) = if config.threats.is_empty() {
            (Vec::new(), Vec::new())
        } else {
            (
                scan_pv(&board, &moves, &config.threats)?,
                scan_pv(&board, opening, &config.threats)?,
            )
        };

        let mated = board.after_line(&moves)?.is_checkmate();
        let checkmate = if mated && !config.checkmates.is_empty() {
            Some(checkmate_types(&board, &moves, &config.checkmates)?)
        } else {
            None
        };

        let structures = config.pawn_structures.then(|| pawn_structures(&board));

        let labels = PositionLabels {
            fen: board.fen(),
            first_move: move_to_uci(first),
            pv: moves.iter().map(move_to_uci).collect(),
            pv_tactics,
            move_tactics,
            pv_threats,
            move_threats,
            checkmate,
            pawn_structures: structures,
        };
        debug!(
            fen = %labels.fen,
            plies = labels.pv.len(),
            mate = labels.is_mate(),
            "labeled position"
        );
        Ok(labels)
    }

    /// Label a single move
    pub fn label_move(&self, fen: &str, uci: &str) -> Result<PositionLabels> {
        self.label(fen, &[uci])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mates::CheckmateType;
    use crate::structures::PawnStructure;
    use crate::tactics::Tactic;
    use crate::threats::Threat;

    #[test]
    fn test_label_fork_line() {
        let detector = PatternDetector::default();
        let labels = detector
            .label("3k4/N3q3/8/8/8/8/8/3K4 w - - 0 1", &["a7c6", "d8e8", "c6e7"])
            .unwrap();
        assert_eq!(labels.first_move, "a7c6");
        assert_eq!(labels.pv_tactics, vec![Tactic::Fork]);
        assert_eq!(labels.move_tactics, vec![Tactic::Fork]);
        assert!(labels.checkmate.is_none());
        assert_eq!(labels.pawn_structures, Some(vec![PawnStructure::None]));
    }

    #[test]
    fn test_label_back_rank_mate() {
        let detector = PatternDetector::default();
        let labels = detector
            .label_move("6k1/5ppp/8/8/8/8/5PPP/3R2K1 w - - 0 1", "d1d8")
            .unwrap();
        assert_eq!(labels.checkmate, Some(vec![CheckmateType::BackRank]));
    }

    #[test]
    fn test_disabled_families_stay_empty() {
        let config = AnalyzerConfig {
            threats: Vec::new(),
            pawn_structures: false,
            ..AnalyzerConfig::default()
        };
        let detector = PatternDetector::new(config).unwrap();
        let labels = detector
            .label_move("4k3/8/8/3n4/8/8/8/R3K3 w - - 0 1", "a1d1")
            .unwrap();
        assert!(labels.pv_threats.is_empty());
        assert!(labels.move_threats.is_empty());
        assert!(labels.pawn_structures.is_none());
    }

    #[test]
    fn test_threats_labeled() {
        let labels = PatternDetector::default()
            .label_move("4k3/8/8/3n4/8/8/8/R3K3 w - - 0 1", "a1d1")
            .unwrap();
        assert_eq!(
            labels.move_threats,
            vec![Threat::HangingPieceCapture, Threat::MaterialGainCapture]
        );
    }

    #[test]
    fn test_empty_pv_is_an_error() {
        let err = PatternDetector::default()
            .label::<&str>("3k4/N3q3/8/8/8/8/8/3K4 w - - 0 1", &[])
            .unwrap_err();
        assert!(matches!(err, Error::EmptyPv));
    }

    #[test]
    fn test_illegal_move_is_an_error() {
        let err = PatternDetector::default()
            .label_move("3k4/N3q3/8/8/8/8/8/3K4 w - - 0 1", "a7a8")
            .unwrap_err();
        assert!(matches!(err, Error::IllegalMove { .. }));
    }

    #[test]
    fn test_summary_counts() {
        let detector = PatternDetector::default();
        let labels = vec![
            detector
                .label("3k4/N3q3/8/8/8/8/8/3K4 w - - 0 1", &["a7c6", "d8e8", "c6e7"])
                .unwrap(),
            detector
                .label_move("6k1/5ppp/8/8/8/8/5PPP/3R2K1 w - - 0 1", "d1d8")
                .unwrap(),
        ];
        let summary = LabelSummary::from_labels(&labels);
        assert_eq!(summary.total_positions, 2);
        assert_eq!(summary.total_plies, 4);
        assert_eq!(summary.mates, 1);
        assert_eq!(summary.checkmates[0].motif, "back_rank");
        assert!(summary.tactics.iter().any(|c| c.motif == "fork" && c.count == 1));
    }
}
