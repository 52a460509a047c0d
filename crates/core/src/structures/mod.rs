//! Pawn structure recognition
//!
//! Each structure is a template of exact pawn placements on a few central
//! files. When one structure specializes another (Hedgehog over Maroczy
//! bind, Botvinnik system over closed Sicilian) the specialized one carries
//! the larger value, so sorted results end with the most specific match.

use serde::{Deserialize, Serialize};
use shakmaty::File::{A, B, C, D, E, F, G};
use shakmaty::Rank::{Fifth as R5, Fourth as R4, Sixth as R6, Third as R3};
use shakmaty::{Bitboard, Color, File, Rank, Square};

use crate::board::{squares, AugBoard};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum PawnStructure {
    None = 0,
    Caro = 1,
    Slav = 2,
    SicilianScheveningen = 3,
    SicilianDragon = 4,
    SicilianBoleslavskyHole = 5,
    MaroczyBind = 6,
    Hedgehog = 7,
    RauzerFormation = 8,
    BoleslavskyWall = 9,
    D5Chain = 10,
    E5Chain = 11,
    ModernBenoni = 12,
    GiuocoPianoIsolani = 13,
    QueensGambitIsolani = 14,
    HangingPawns = 15,
    Carlsbad = 16,
    Panov = 17,
    Stonewall = 18,
    ClosedSicilian = 19,
    BotvinnikSystem = 20,
}

/// Pawns expected on one file: exactly these ranks, nothing else.
type FileTemplate = (File, &'static [Rank]);

/// White and black file templates of a structure.
struct Template {
    white: &'static [FileTemplate],
    black: &'static [FileTemplate],
}

fn t(white: &'static [FileTemplate], black: &'static [FileTemplate]) -> Option<Template> {
    Some(Template { white, black })
}

impl PawnStructure {
    pub const ALL: [PawnStructure; 20] = [
        PawnStructure::Caro,
        PawnStructure::Slav,
        PawnStructure::SicilianScheveningen,
        PawnStructure::SicilianDragon,
        PawnStructure::SicilianBoleslavskyHole,
        PawnStructure::MaroczyBind,
        PawnStructure::Hedgehog,
        PawnStructure::RauzerFormation,
        PawnStructure::BoleslavskyWall,
        PawnStructure::D5Chain,
        PawnStructure::E5Chain,
        PawnStructure::ModernBenoni,
        PawnStructure::GiuocoPianoIsolani,
        PawnStructure::QueensGambitIsolani,
        PawnStructure::HangingPawns,
        PawnStructure::Carlsbad,
        PawnStructure::Panov,
        PawnStructure::Stonewall,
        PawnStructure::ClosedSicilian,
        PawnStructure::BotvinnikSystem,
    ];

    fn template(self) -> Option<Template> {
        match self {
            PawnStructure::None => None,
            PawnStructure::Caro => t(&[(D, &[R4]), (E, &[])], &[(C, &[R6]), (D, &[]), (E, &[R6])]),
            PawnStructure::Slav => t(
                &[(C, &[]), (D, &[R4]), (E, &[R3])],
                &[(C, &[R6]), (D, &[]), (E, &[R6])],
            ),
            PawnStructure::SicilianScheveningen => {
                t(&[(D, &[]), (E, &[R4])], &[(C, &[]), (D, &[R6]), (E, &[R6])])
            }
            PawnStructure::SicilianDragon => {
                t(&[(D, &[]), (E, &[R4])], &[(C, &[]), (D, &[R6]), (G, &[R6])])
            }
            PawnStructure::SicilianBoleslavskyHole => {
                t(&[(D, &[]), (E, &[R4])], &[(C, &[]), (D, &[R6]), (E, &[R5])])
            }
            PawnStructure::MaroczyBind => t(&[(C, &[R4]), (D, &[]), (E, &[R4])], &[(C, &[])]),
            PawnStructure::Hedgehog => t(
                &[(C, &[R4]), (D, &[]), (E, &[R4])],
                &[(A, &[R6]), (B, &[R6]), (C, &[]), (D, &[R6]), (E, &[R6])],
            ),
            PawnStructure::RauzerFormation => t(
                &[(C, &[R4]), (D, &[]), (E, &[R4])],
                &[(C, &[R6]), (D, &[]), (E, &[R5])],
            ),
            PawnStructure::BoleslavskyWall => t(
                &[(C, &[R4]), (D, &[]), (E, &[R4])],
                &[(C, &[R6]), (D, &[R6]), (E, &[])],
            ),
            PawnStructure::D5Chain => t(&[(D, &[R5]), (E, &[R4])], &[(D, &[R6]), (E, &[R5])]),
            PawnStructure::E5Chain => t(&[(D, &[R4]), (E, &[R5])], &[(D, &[R5]), (E, &[R6])]),
            PawnStructure::ModernBenoni => t(
                &[(C, &[]), (D, &[R5]), (E, &[R4])],
                &[(C, &[R5]), (D, &[R6]), (E, &[])],
            ),
            PawnStructure::GiuocoPianoIsolani => {
                t(&[(C, &[]), (D, &[R4]), (E, &[])], &[(D, &[]), (E, &[])])
            }
            PawnStructure::QueensGambitIsolani => t(
                &[(C, &[]), (D, &[R4]), (E, &[])],
                &[(C, &[]), (D, &[]), (E, &[R6])],
            ),
            PawnStructure::HangingPawns => t(
                &[(B, &[]), (C, &[R4]), (D, &[R4]), (E, &[])],
                &[(C, &[]), (D, &[]), (E, &[R6])],
            ),
            PawnStructure::Carlsbad => t(
                &[(C, &[]), (D, &[R4]), (E, &[R3])],
                &[(C, &[R6]), (D, &[R5]), (E, &[])],
            ),
            PawnStructure::Panov => t(
                &[(C, &[R5]), (D, &[R4]), (E, &[])],
                &[(C, &[]), (D, &[R5]), (E, &[R6])],
            ),
            PawnStructure::Stonewall => t(
                &[(D, &[R4]), (E, &[R3]), (F, &[R4])],
                &[(D, &[R5]), (E, &[R6]), (F, &[R5])],
            ),
            PawnStructure::ClosedSicilian => t(&[(D, &[R3]), (E, &[R4])], &[(C, &[R5]), (D, &[R6])]),
            PawnStructure::BotvinnikSystem => t(
                &[(C, &[R4]), (D, &[R3]), (E, &[R4])],
                &[(C, &[R5]), (D, &[R6]), (E, &[R5])],
            ),
        }
    }

    /// The pawns of `board` match this structure's template.
    pub fn matches(self, board: &AugBoard) -> bool {
        let Some(template) = self.template() else {
            return false;
        };
        files_match(board, Color::White, template.white)
            && files_match(board, Color::Black, template.black)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PawnStructure::None => "none",
            PawnStructure::Caro => "caro",
            PawnStructure::Slav => "slav",
            PawnStructure::SicilianScheveningen => "sicilian_scheveningen",
            PawnStructure::SicilianDragon => "sicilian_dragon",
            PawnStructure::SicilianBoleslavskyHole => "sicilian_boleslavsky_hole",
            PawnStructure::MaroczyBind => "maroczy_bind",
            PawnStructure::Hedgehog => "hedgehog",
            PawnStructure::RauzerFormation => "rauzer_formation",
            PawnStructure::BoleslavskyWall => "boleslavsky_wall",
            PawnStructure::D5Chain => "d5_chain",
            PawnStructure::E5Chain => "e5_chain",
            PawnStructure::ModernBenoni => "modern_benoni",
            PawnStructure::GiuocoPianoIsolani => "giuoco_piano_isolani",
            PawnStructure::QueensGambitIsolani => "queens_gambit_isolani",
            PawnStructure::HangingPawns => "hanging_pawns",
            PawnStructure::Carlsbad => "carlsbad",
            PawnStructure::Panov => "panov",
            PawnStructure::Stonewall => "stonewall",
            PawnStructure::ClosedSicilian => "closed_sicilian",
            PawnStructure::BotvinnikSystem => "botvinnik_system",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PawnStructure::None => "None",
            PawnStructure::Caro => "Caro",
            PawnStructure::Slav => "Slav",
            PawnStructure::SicilianScheveningen => "Sicilian Scheveningen",
            PawnStructure::SicilianDragon => "Sicilian Dragon",
            PawnStructure::SicilianBoleslavskyHole => "Sicilian Boleslavsky Hole",
            PawnStructure::MaroczyBind => "Maroczy Bind",
            PawnStructure::Hedgehog => "Hedgehog",
            PawnStructure::RauzerFormation => "Rauzer Formation",
            PawnStructure::BoleslavskyWall => "Boleslavsky Wall",
            PawnStructure::D5Chain => "d5 Chain",
            PawnStructure::E5Chain => "e5 Chain",
            PawnStructure::ModernBenoni => "Modern Benoni",
            PawnStructure::GiuocoPianoIsolani => "Giuoco Piano Isolani",
            PawnStructure::QueensGambitIsolani => "Queen's Gambit Isolani",
            PawnStructure::HangingPawns => "Hanging Pawns",
            PawnStructure::Carlsbad => "Carlsbad",
            PawnStructure::Panov => "Panov",
            PawnStructure::Stonewall => "Stonewall",
            PawnStructure::ClosedSicilian => "Closed Sicilian",
            PawnStructure::BotvinnikSystem => "Botvinnik System",
        }
    }
}

fn files_match(board: &AugBoard, color: Color, files: &[FileTemplate]) -> bool {
    let pawns: Bitboard = board.board().pawns() & board.board().by_color(color);
    files.iter().all(|&(file, ranks)| {
        let expected = squares(ranks.iter().map(|&rank| Square::from_coords(file, rank)));
        (pawns & Bitboard::from_file(file)) == expected
    })
}

/// Every structure the pawns of `board` match, sorted, or `[None]`.
pub fn pawn_structures(board: &AugBoard) -> Vec<PawnStructure> {
    let found: Vec<PawnStructure> = PawnStructure::ALL
        .into_iter()
        .filter(|s| s.matches(board))
        .collect();
    if found.is_empty() {
        vec![PawnStructure::None]
    } else {
        found
    }
}
