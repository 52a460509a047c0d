//! Analyzer configuration

use std::path::Path;

use serde::{Deserialize, Serialize};
use shakmaty::CastlingMode;

use crate::error::{Error, Result};
use crate::mates::CheckmateType;
use crate::tactics::Tactic;
use crate::threats::Threat;

/// How castling rights in a FEN are read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CastlingRule {
    #[default]
    Standard,
    Chess960,
}

impl From<CastlingRule> for CastlingMode {
    fn from(rule: CastlingRule) -> Self {
        match rule {
            CastlingRule::Standard => CastlingMode::Standard,
            CastlingRule::Chess960 => CastlingMode::Chess960,
        }
    }
}

/// Which detectors run when labeling a position.
///
/// Missing fields take their defaults, so `{}` enables everything. An empty
/// list switches that family off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub castling: CastlingRule,
    pub tactics: Vec<Tactic>,
    pub threats: Vec<Threat>,
    pub checkmates: Vec<CheckmateType>,
    pub pawn_structures: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            castling: CastlingRule::Standard,
            tactics: Tactic::ALL.to_vec(),
            threats: Threat::ALL.to_vec(),
            checkmates: CheckmateType::ALL.to_vec(),
            pawn_structures: true,
        }
    }
}

impl AnalyzerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// `none` is the "nothing detected" marker, never a detector to run.
    pub fn validate(&self) -> Result<()> {
        if self.tactics.contains(&Tactic::None) {
            return Err(Error::Config("tactics must not list `none`".to_string()));
        }
        if self.threats.contains(&Threat::None) {
            return Err(Error::Config("threats must not list `none`".to_string()));
        }
        if self.checkmates.contains(&CheckmateType::None) {
            return Err(Error::Config("checkmates must not list `none`".to_string()));
        }
        Ok(())
    }
}
