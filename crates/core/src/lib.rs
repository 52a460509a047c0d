//! Chess Motifs Core Library
//!
//! Labels positions and principal variations with tactical motifs, newly
//! created threats, checkmate patterns and pawn structures. Built on static
//! exchange evaluation and attack-set algebra over shakmaty positions.

pub mod board;
pub mod config;
pub mod error;
pub mod mates;
pub mod patterns;
pub mod structures;
pub mod tactics;
pub mod threats;

pub use board::{capture_square, destination, move_to_uci, role_value, AugBoard, Ply};
pub use config::{AnalyzerConfig, CastlingRule};
pub use error::{Error, Result};
pub use mates::{checkmate_types, CheckmateType};
pub use patterns::{scan_pv, LabelSummary, Motif, PatternDetector, PositionLabels};
pub use structures::{pawn_structures, PawnStructure};
pub use tactics::Tactic;
pub use threats::{creates_fork_threat, Threat};
