//! Label records produced by the pattern detector

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::scan::Motif;
use crate::mates::CheckmateType;
use crate::structures::PawnStructure;
use crate::tactics::Tactic;
use crate::threats::Threat;

/// Everything detected for one position and its principal variation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionLabels {
    pub fen: String,
    pub first_move: String,
    pub pv: Vec<String>,
    /// Tactics over all of our moves in the line
    pub pv_tactics: Vec<Tactic>,
    pub move_tactics: Vec<Tactic>,
    pub pv_threats: Vec<Threat>,
    pub move_threats: Vec<Threat>,
    /// Set only when the line ends in checkmate
    pub checkmate: Option<Vec<CheckmateType>>,
    /// Set only when pawn structures are enabled
    pub pawn_structures: Option<Vec<PawnStructure>>,
}

impl PositionLabels {
    pub fn is_mate(&self) -> bool {
        self.checkmate.is_some()
    }
}

/// Summary of labels over a batch of positions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSummary {
    pub total_positions: u32,
    pub total_plies: u32,
    pub mates: u32,
    pub tactics: Vec<MotifCount>,
    pub threats: Vec<MotifCount>,
    pub checkmates: Vec<MotifCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotifCount {
    pub motif: String,
    pub count: u32,
}

impl LabelSummary {
    pub fn from_labels(labels: &[PositionLabels]) -> Self {
        let mut tactics = BTreeMap::new();
        let mut threats = BTreeMap::new();
        let mut checkmates = BTreeMap::new();
        let mut summary = LabelSummary::default();

        for label in labels {
            summary.total_positions += 1;
            summary.total_plies += label.pv.len() as u32;
            tally(&mut tactics, &label.pv_tactics);
            tally(&mut threats, &label.pv_threats);
            if let Some(kinds) = &label.checkmate {
                summary.mates += 1;
                tally(&mut checkmates, kinds);
            }
        }

        summary.tactics = counts(tactics);
        summary.threats = counts(threats);
        summary.checkmates = counts(checkmates);
        summary
    }
}

fn tally<M: Motif>(counts: &mut BTreeMap<M, u32>, found: &[M]) {
    for &motif in found.iter().filter(|&&m| m != M::NONE) {
        *counts.entry(motif).or_insert(0) += 1;
    }
}

/// Most frequent first, ties in enumeration order.
fn counts<M: Motif>(map: BTreeMap<M, u32>) -> Vec<MotifCount> {
    let mut out: Vec<(M, u32)> = map.into_iter().collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    out.into_iter()
        .map(|(motif, count)| MotifCount {
            motif: motif.name().to_string(),
            count,
        })
        .collect()
}
