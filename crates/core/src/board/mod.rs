//! Position facade over the shakmaty rules engine
//!
//! `AugBoard` wraps a `Chess` position with color-relative helpers, piece
//! values and the probing queries every detector is built on. Probes take
//! `&self` and return fresh child boards, so a caller's position is never
//! disturbed. The only mutation is the explicit undo log (`push`/`pop`) used
//! to walk a principal variation.

mod attacks;
mod see;

pub use attacks::{attacking_pairs_on, on_ray, AttackFilter, AttackPair, AttackPairs};

use std::fmt;

use shakmaty::fen::Fen;
use shakmaty::{
    Bitboard, Board, CastlingMode, Chess, Color, EnPassantMode, File, FromSetup, Move, MoveList,
    Piece, Position, Role, Square,
};

use crate::config::CastlingRule;
use crate::error::{Error, Result};

/// Relative value of a piece type.
///
/// The king is worth 10 so that exchange and comparison logic never has to
/// special-case it. It is never actually captured.
pub fn role_value(role: Role) -> i32 {
    match role {
        Role::Pawn => 1,
        Role::Knight => 3,
        Role::Bishop => 3,
        Role::Rook => 5,
        Role::Queen => 9,
        Role::King => 10,
    }
}

/// Convert shakmaty Move to UCI string
pub fn move_to_uci(mv: &Move) -> String {
    match mv {
        Move::Normal { from, to, promotion, .. } => {
            let promo = promotion.map(|r| match r {
                Role::Queen => "q",
                Role::Rook => "r",
                Role::Bishop => "b",
                Role::Knight => "n",
                _ => "",
            }).unwrap_or("");
            format!("{}{}{}", from, to, promo)
        }
        Move::EnPassant { from, to, .. } => format!("{}{}", from, to),
        Move::Castle { king, rook } => format!("{}{}", king, castle_target(*king, *rook)),
        Move::Put { .. } => String::new(),
    }
}

/// Square the moving piece ends up on. Castling is encoded by shakmaty as
/// king-takes-rook, so the king's real target square is reported instead.
pub fn destination(mv: &Move) -> Square {
    match mv {
        Move::Castle { king, rook } => castle_target(*king, *rook),
        other => other.to(),
    }
}

/// Square of the piece `mv` captures. Only en passant takes a pawn off a
/// square other than the destination.
pub fn capture_square(mv: &Move) -> Square {
    match *mv {
        Move::EnPassant { from, to } => Square::from_coords(to.file(), from.rank()),
        _ => mv.to(),
    }
}

fn castle_target(king: Square, rook: Square) -> Square {
    let file = if rook.file() > king.file() { File::G } else { File::C };
    Square::from_coords(file, king.rank())
}

pub(crate) fn squares<I: IntoIterator<Item = Square>>(iter: I) -> Bitboard {
    iter.into_iter()
        .fold(Bitboard::EMPTY, |bb, sq| bb | Bitboard::from_square(sq))
}

/// One entry of the undo log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ply {
    Move(Move),
    /// Side flip without moving a piece.
    Null,
}

/// Chess position augmented with the queries used by the motif detectors
#[derive(Debug, Clone)]
pub struct AugBoard {
    pos: Chess,
    mode: CastlingMode,
    history: Vec<(Chess, Ply)>,
}

impl AugBoard {
    pub fn from_fen(fen: &str) -> Result<Self> {
        Self::from_fen_with(fen, CastlingRule::default())
    }

    pub fn from_fen_with(fen: &str, rule: CastlingRule) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidFen {
            fen: fen.to_string(),
            reason,
        };
        let parsed: Fen = fen.trim().parse().map_err(|e| invalid(format!("{}", e)))?;
        let mode = CastlingMode::from(rule);
        let pos: Chess = parsed
            .into_position(mode)
            .map_err(|e| invalid(format!("{}", e)))?;
        Ok(Self {
            pos,
            mode,
            history: Vec::new(),
        })
    }

    pub fn from_position(pos: Chess) -> Self {
        Self {
            pos,
            mode: CastlingMode::Standard,
            history: Vec::new(),
        }
    }

    fn child(&self, pos: Chess) -> Self {
        Self {
            pos,
            mode: self.mode,
            history: Vec::new(),
        }
    }

    fn illegal(&self, mv: &Move) -> Error {
        Error::IllegalMove {
            uci: move_to_uci(mv),
            fen: self.fen(),
        }
    }

    pub fn fen(&self) -> String {
        Fen::from_position(&self.pos, EnPassantMode::Legal).to_string()
    }

    pub fn position(&self) -> &Chess {
        &self.pos
    }

    pub fn board(&self) -> &Board {
        self.pos.board()
    }

    // Colors and kings

    pub fn current_color(&self) -> Color {
        self.pos.turn()
    }

    pub fn other_color(&self) -> Color {
        !self.pos.turn()
    }

    pub fn current_color_king(&self) -> Option<Square> {
        self.board().king_of(self.current_color())
    }

    pub fn other_color_king(&self) -> Option<Square> {
        self.board().king_of(self.other_color())
    }

    // Pieces and material

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board().piece_at(square)
    }

    pub fn piece_type_at(&self, square: Square) -> Option<Role> {
        self.board().role_at(square)
    }

    pub fn piece_color_at(&self, square: Square) -> Option<Color> {
        self.board().color_at(square)
    }

    /// Value of the piece on `square`, 0 for an empty square.
    pub fn piece_value_at(&self, square: Square) -> i32 {
        self.piece_type_at(square).map_or(0, role_value)
    }

    pub fn count_material(&self, color: Color) -> i32 {
        self.board()
            .by_color(color)
            .into_iter()
            .map(|sq| self.piece_value_at(sq))
            .sum()
    }

    /// White material minus black material.
    pub fn absolute_material_balance(&self) -> i32 {
        self.count_material(Color::White) - self.count_material(Color::Black)
    }

    /// Side-to-move material minus opponent material.
    pub fn relative_material_balance(&self) -> i32 {
        self.count_material(self.current_color()) - self.count_material(self.other_color())
    }

    // Move parsing

    /// Parses a UCI move and checks that it is legal here.
    pub fn parse_uci(&self, uci: &str) -> Result<Move> {
        let wanted = uci.trim().to_ascii_lowercase();
        self.pos
            .legal_moves()
            .into_iter()
            .find(|m| move_to_uci(m) == wanted)
            .ok_or_else(|| Error::IllegalMove {
                uci: uci.to_string(),
                fen: self.fen(),
            })
    }

    /// Parses a line of UCI moves, each one validated in the position it is
    /// played from.
    pub fn parse_pv<S: AsRef<str>>(&self, pv: &[S]) -> Result<Vec<Move>> {
        let mut walk = self.child(self.pos.clone());
        let mut moves = Vec::with_capacity(pv.len());
        for uci in pv {
            let mv = walk.parse_uci(uci.as_ref())?;
            walk = walk.after(&mv)?;
            moves.push(mv);
        }
        Ok(moves)
    }

    // Rules engine queries

    pub fn legal_moves(&self) -> MoveList {
        self.pos.legal_moves()
    }

    pub fn legal_moves_from(&self, square: Square) -> Vec<Move> {
        self.pos
            .legal_moves()
            .into_iter()
            .filter(|m| m.from() == Some(square))
            .collect()
    }

    pub fn legal_captures(&self) -> Vec<Move> {
        self.pos
            .legal_moves()
            .into_iter()
            .filter(|m| m.is_capture())
            .collect()
    }

    pub fn is_check(&self) -> bool {
        self.pos.is_check()
    }

    pub fn is_checkmate(&self) -> bool {
        self.pos.is_checkmate()
    }

    pub fn gives_check(&self, mv: &Move) -> Result<bool> {
        Ok(self.after(mv)?.is_check())
    }

    pub fn gives_checkmate(&self, mv: &Move) -> Result<bool> {
        Ok(self.after(mv)?.is_checkmate())
    }

    /// Squares attacked by the piece on `square`.
    pub fn attacks(&self, square: Square) -> Bitboard {
        self.board().attacks_from(square)
    }

    /// Pieces of `color` attacking `square`.
    pub fn attackers(&self, color: Color, square: Square) -> Bitboard {
        let board = self.board();
        board.attacks_to(square, color, board.occupied())
    }

    /// Pieces of `color` that would attack `square` if the piece on `lifted`
    /// were not there. Used to see through a king onto its escape squares.
    pub fn attackers_through(&self, color: Color, square: Square, lifted: Square) -> Bitboard {
        let board = self.board();
        board.attacks_to(square, color, board.occupied() & !Bitboard::from_square(lifted))
    }

    pub fn is_attacked_by(&self, color: Color, square: Square) -> bool {
        self.attackers(color, square).any()
    }

    /// Origins of legal captures landing on `square`.
    pub fn square_capturers(&self, square: Square) -> Bitboard {
        squares(
            self.pos
                .legal_moves()
                .into_iter()
                .filter(|m| m.is_capture() && m.to() == square)
                .filter_map(|m| m.from()),
        )
    }

    /// Origins of the replies that capture the piece `mv` moves.
    pub fn move_capturers(&self, mv: &Move) -> Result<Bitboard> {
        Ok(self.after(mv)?.square_capturers(destination(mv)))
    }

    pub fn can_move_be_captured(&self, mv: &Move) -> Result<bool> {
        Ok(self.move_capturers(mv)?.any())
    }

    /// True iff the occupant of `square` is attacked by its own side.
    pub fn is_square_defended(&self, square: Square) -> bool {
        self.piece_color_at(square)
            .is_some_and(|color| self.attackers(color, square).any())
    }

    // Copy-on-write probes

    /// The position after `mv`, leaving `self` untouched.
    pub fn after(&self, mv: &Move) -> Result<Self> {
        let pos = self
            .pos
            .clone()
            .play(mv.clone())
            .map_err(|_| self.illegal(mv))?;
        Ok(self.child(pos))
    }

    /// The position after playing `moves` in order.
    pub fn after_line(&self, moves: &[Move]) -> Result<Self> {
        let mut walk = self.child(self.pos.clone());
        for mv in moves {
            walk = walk.after(mv)?;
        }
        Ok(walk)
    }

    /// The same placement with the other side to move. `None` when the side
    /// to move is in check: handing the opponent the move would let them
    /// capture the king.
    pub fn null_moved(&self) -> Option<Self> {
        self.pos.clone().swap_turn().ok().map(|pos| self.child(pos))
    }

    /// Raw board with the piece on `square` lifted off, for ray queries.
    pub fn without_piece(&self, square: Square) -> Board {
        let mut board = self.board().clone();
        board.discard_piece_at(square);
        board
    }

    /// The piece on `square` removed and the side to move flipped. `None`
    /// when that is not a legal position.
    pub fn without_piece_null_moved(&self, square: Square) -> Option<Self> {
        let mut setup = self.pos.to_setup(EnPassantMode::Legal);
        setup.board.discard_piece_at(square);
        setup.turn = !setup.turn;
        setup.ep_square = None;
        Chess::from_setup(setup, self.mode)
            .ok()
            .map(|pos| self.child(pos))
    }

    // Undo log

    pub fn push(&mut self, mv: &Move) -> Result<()> {
        let next = self
            .pos
            .clone()
            .play(mv.clone())
            .map_err(|_| self.illegal(mv))?;
        let prev = std::mem::replace(&mut self.pos, next);
        self.history.push((prev, Ply::Move(mv.clone())));
        Ok(())
    }

    pub fn push_null(&mut self) -> Result<()> {
        let next = self
            .pos
            .clone()
            .swap_turn()
            .map_err(|_| Error::IllegalMove {
                uci: "0000".to_string(),
                fen: self.fen(),
            })?;
        let prev = std::mem::replace(&mut self.pos, next);
        self.history.push((prev, Ply::Null));
        Ok(())
    }

    pub fn pop(&mut self) -> Option<Ply> {
        let (prev, ply) = self.history.pop()?;
        self.pos = prev;
        Some(ply)
    }

    pub fn peek(&self) -> Option<&Ply> {
        self.history.last().map(|(_, ply)| ply)
    }

    // Position predicates for threat detection

    /// Some legal move gives checkmate.
    pub fn has_mate(&self) -> Result<bool> {
        for mv in self.pos.legal_moves() {
            if self.gives_checkmate(&mv)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Some legal capture lands on a piece nobody defends.
    pub fn has_hanging_piece_capture(&self) -> bool {
        self.legal_captures()
            .iter()
            .any(|m| !self.is_square_defended(capture_square(m)))
    }

    /// Some legal capture wins material by static exchange.
    pub fn has_positive_see_capture(&self) -> Result<bool> {
        for mv in self.legal_captures() {
            if self.see(mv.to(), mv.from(), 0)? > 0 {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl fmt::Display for AugBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fen())
    }
}
