//! Principal variation scanning

use std::collections::BTreeSet;
use std::slice;

use shakmaty::Move;

use crate::board::AugBoard;
use crate::error::Result;
use crate::mates::CheckmateType;
use crate::tactics::Tactic;
use crate::threats::Threat;

/// A family of per-move detectors sharing a "nothing found" value.
pub trait Motif: Copy + Ord + 'static {
    const NONE: Self;
    /// Every detectable variant, `NONE` excluded.
    const ALL: &'static [Self];

    fn detect(self, board: &AugBoard, mv: &Move) -> Result<bool>;

    fn name(self) -> &'static str;
}

impl Motif for Tactic {
    const NONE: Self = Tactic::None;
    const ALL: &'static [Self] = &Tactic::ALL;

    fn detect(self, board: &AugBoard, mv: &Move) -> Result<bool> {
        Tactic::detect(self, board, mv)
    }

    fn name(self) -> &'static str {
        self.as_str()
    }
}

impl Motif for Threat {
    const NONE: Self = Threat::None;
    const ALL: &'static [Self] = &Threat::ALL;

    fn detect(self, board: &AugBoard, mv: &Move) -> Result<bool> {
        Threat::detect(self, board, mv)
    }

    fn name(self) -> &'static str {
        self.as_str()
    }
}

impl Motif for CheckmateType {
    const NONE: Self = CheckmateType::None;
    const ALL: &'static [Self] = &CheckmateType::ALL;

    fn detect(self, board: &AugBoard, mv: &Move) -> Result<bool> {
        CheckmateType::detect(self, board, mv)
    }

    fn name(self) -> &'static str {
        self.as_str()
    }
}

/// Runs every `enabled` detector on each of our moves in `pv` (even plies)
/// and returns the sorted union of what fired, or `[M::NONE]`.
///
/// Replies are played but not inspected. `board` is left untouched.
pub fn scan_pv<M: Motif>(board: &AugBoard, pv: &[Move], enabled: &[M]) -> Result<Vec<M>> {
    let mut walk = board.clone();
    let mut found = BTreeSet::new();
    for plies in pv.chunks(2) {
        let ours = &plies[0];
        for &motif in enabled {
            if !found.contains(&motif) && motif.detect(&walk, ours)? {
                found.insert(motif);
            }
        }
        for mv in plies {
            walk.push(mv)?;
        }
    }

    if found.is_empty() {
        Ok(vec![M::NONE])
    } else {
        Ok(found.into_iter().collect())
    }
}

impl AugBoard {
    pub fn pv_tactics(&self, pv: &[Move]) -> Result<Vec<Tactic>> {
        scan_pv(self, pv, <Tactic as Motif>::ALL)
    }

    pub fn move_tactics(&self, mv: &Move) -> Result<Vec<Tactic>> {
        self.pv_tactics(slice::from_ref(mv))
    }

    pub fn pv_threats(&self, pv: &[Move]) -> Result<Vec<Threat>> {
        scan_pv(self, pv, <Threat as Motif>::ALL)
    }

    pub fn move_threats(&self, mv: &Move) -> Result<Vec<Threat>> {
        self.pv_threats(slice::from_ref(mv))
    }
}
