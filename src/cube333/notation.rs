//! Standard cube notation: parsing, formatting, inverting and applying moves to a
//! [`StickerCube`].

use super::sticker::StickerCube;
use super::Side;
use crate::error::NotationError;
use crate::moves::{Cancellation, Move, MoveSequence};

use log::warn;
use std::fmt;

/// The symbol a move turns. Face turns and slices use uppercase letters, whole cube rotations use
/// lowercase ones.
///
/// Anything else that shows up in a move token is kept as [`Face::Unknown`] rather than rejected;
/// applying an unknown move leaves the cube alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Face {
    R,
    L,
    U,
    D,
    F,
    B,
    M,
    E,
    S,
    X,
    Y,
    Z,
    Unknown(String),
}

impl Face {
    /// Read a face symbol. Rotations are accepted in either case.
    pub fn from_symbol(s: &str) -> Face {
        match s {
            "R" => Face::R,
            "L" => Face::L,
            "U" => Face::U,
            "D" => Face::D,
            "F" => Face::F,
            "B" => Face::B,
            "M" => Face::M,
            "E" => Face::E,
            "S" => Face::S,
            "x" | "X" => Face::X,
            "y" | "Y" => Face::Y,
            "z" | "Z" => Face::Z,
            _ => Face::Unknown(s.to_string()),
        }
    }

    /// The face turn of the given side.
    pub fn from_side(side: Side) -> Face {
        match side {
            Side::U => Face::U,
            Side::R => Face::R,
            Side::F => Face::F,
            Side::D => Face::D,
            Side::L => Face::L,
            Side::B => Face::B,
        }
    }

    /// Position of this symbol in the sticker cube's turn tables.
    pub(crate) fn layer_index(&self) -> Option<usize> {
        Some(match self {
            Face::R => 0,
            Face::L => 1,
            Face::U => 2,
            Face::D => 3,
            Face::F => 4,
            Face::B => 5,
            Face::M => 6,
            Face::E => 7,
            Face::S => 8,
            Face::X => 9,
            Face::Y => 10,
            Face::Z => 11,
            Face::Unknown(_) => return None,
        })
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Face::X => f.write_str("x"),
            Face::Y => f.write_str("y"),
            Face::Z => f.write_str("z"),
            Face::Unknown(s) => f.write_str(s),
            other => write!(f, "{other:?}"),
        }
    }
}

/// A single move: a face symbol and a number of clockwise quarter turns. A count of 1 is a plain
/// move, 2 a double move and 3 a prime move.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Turn {
    /// The symbol being turned.
    pub face: Face,
    /// Clockwise quarter turns, always in `1..=3`.
    pub count: u8,
}

impl Turn {
    /// A plain (clockwise) move of `face`.
    pub fn new(face: Face) -> Self {
        Turn { face, count: 1 }
    }

    /// Whether this is an anti-clockwise move.
    pub fn is_prime(&self) -> bool {
        self.count == 3
    }

    /// Whether this is a half turn.
    pub fn is_double(&self) -> bool {
        self.count == 2
    }

    /// Parse a single whitespace free token. A trailing `'` makes the move prime and a trailing
    /// `2` makes it double; whatever is left is the face symbol.
    pub fn parse_token(token: &str) -> Turn {
        let (symbol, count) = if let Some(s) = token.strip_suffix('\'') {
            (s, 3)
        } else if let Some(s) = token.strip_suffix('2') {
            (s, 2)
        } else {
            (token, 1)
        };
        Turn {
            face: Face::from_symbol(symbol),
            count,
        }
    }

    /// Parse text which must contain exactly one move.
    pub fn parse_one(text: &str) -> Result<Turn, NotationError> {
        let mut mvs = parse(text).0;
        if mvs.len() != 1 {
            return Err(NotationError::NotSingleMove {
                text: text.to_string(),
                count: mvs.len(),
            });
        }
        Ok(mvs.remove(0))
    }
}

impl Move for Turn {
    fn inverse(self) -> Self {
        Self {
            face: self.face,
            count: 4u8.wrapping_sub(self.count).rem_euclid(4),
        }
    }

    fn cancel(self, b: Self) -> Cancellation<Self> {
        if self.face == b.face {
            let count = (self.count + b.count) % 4;
            if count == 0 {
                Cancellation::NoMove
            } else {
                Cancellation::OneMove(Turn {
                    face: self.face,
                    count,
                })
            }
        } else {
            Cancellation::TwoMove(self, b)
        }
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.count {
            2 => write!(f, "{}2", self.face),
            3 => write!(f, "{}'", self.face),
            _ => write!(f, "{}", self.face),
        }
    }
}

/// Split text on whitespace into moves.
pub fn parse(text: &str) -> MoveSequence<Turn> {
    text.split_whitespace().map(Turn::parse_token).collect()
}

/// Format a move back into notation.
pub fn format_move(mv: &Turn) -> String {
    mv.to_string()
}

/// The inverse of a single move token: double moves are their own inverse, otherwise plain and
/// prime swap.
pub fn inverse_move(text: &str) -> String {
    let text = text.trim();
    if text.ends_with('2') {
        text.to_string()
    } else if let Some(plain) = text.strip_suffix('\'') {
        plain.to_string()
    } else {
        format!("{text}'")
    }
}

/// Apply exactly one move to a copy of `cube`.
pub fn apply_move(cube: &StickerCube, text: &str) -> Result<StickerCube, NotationError> {
    let mv = Turn::parse_one(text)?;
    Ok(cube.clone().make_move(&mv))
}

/// Apply every move in `text` to a copy of `cube`.
pub fn apply_sequence(cube: &StickerCube, text: &str) -> StickerCube {
    cube.clone().make_moves(&parse(text))
}

impl StickerCube {
    /// Apply an algorithm to a cube
    pub fn make_moves(self, mvs: &MoveSequence<Turn>) -> StickerCube {
        mvs.iter().fold(self, |c, m| c.make_move(m))
    }

    /// Apply a move to a cube. Unknown symbols are logged and skipped.
    pub fn make_move(mut self, mv: &Turn) -> StickerCube {
        for _ in 0..mv.count {
            if !self.quarter_turn(&mv.face) {
                warn!("ignoring unknown move `{mv}`");
                break;
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::collection::vec;
    use proptest::prelude::*;

    fn known_turn() -> impl Strategy<Value = Turn> {
        let faces = vec![
            Face::R,
            Face::L,
            Face::U,
            Face::D,
            Face::F,
            Face::B,
            Face::M,
            Face::E,
            Face::S,
            Face::X,
            Face::Y,
            Face::Z,
        ];
        (proptest::sample::select(faces), 1..=3u8).prop_map(|(face, count)| Turn { face, count })
    }

    #[test]
    fn parse_suffixes() {
        let mvs = parse("R U2  F' x y' M2");
        assert_eq!(mvs.to_string(), "R U2 F' x y' M2");
        assert!(mvs.get(2).is_some_and(Turn::is_prime));
        assert!(mvs.get(1).is_some_and(Turn::is_double));
        assert_eq!(mvs.get(3).map(|m| m.face.clone()), Some(Face::X));
    }

    #[test]
    fn unknown_faces_are_kept() {
        let mvs = parse("Rw Q'");
        assert_eq!(
            mvs.get(0).map(|m| m.face.clone()),
            Some(Face::Unknown("Rw".into()))
        );
        assert_eq!(mvs.get(1).map(|m| m.count), Some(3));
        assert_eq!(
            apply_sequence(&StickerCube::SOLVED, "Rw Q'"),
            StickerCube::SOLVED
        );
    }

    #[test]
    fn apply_move_needs_one_move() {
        assert_eq!(
            apply_move(&StickerCube::SOLVED, "R U"),
            Err(NotationError::NotSingleMove {
                text: "R U".into(),
                count: 2
            })
        );
        assert!(apply_move(&StickerCube::SOLVED, "  ").is_err());
        assert!(apply_move(&StickerCube::SOLVED, "R'").is_ok());
    }

    #[test]
    fn inverse_text() {
        assert_eq!(inverse_move("R"), "R'");
        assert_eq!(inverse_move("R'"), "R");
        assert_eq!(inverse_move("U2"), "U2");
        assert_eq!(inverse_move("x"), "x'");
    }

    #[test]
    fn sexy_move_has_order_six() {
        let mut cube = StickerCube::SOLVED;
        for i in 0..6 {
            if i > 0 {
                assert_ne!(cube, StickerCube::SOLVED);
            }
            cube = apply_sequence(&cube, "R U R' U'");
        }
        assert_eq!(cube, StickerCube::SOLVED);
    }

    #[test]
    fn double_is_two_quarters() {
        assert_eq!(
            apply_sequence(&StickerCube::SOLVED, "F2"),
            apply_sequence(&StickerCube::SOLVED, "F F")
        );
    }

    #[test]
    fn slices_and_rotations_agree() {
        // Rotations turn every layer, so they decompose into face turns and slices.
        let solved = StickerCube::SOLVED;
        let scramble = apply_sequence(&solved, "R U F' D2 L B'");
        for (rotation, layers) in [("x", "R M' L'"), ("y", "U E' D'"), ("z", "F S B'")] {
            assert_eq!(
                apply_sequence(&scramble, rotation),
                apply_sequence(&scramble, layers),
                "{rotation}"
            );
        }
    }

    #[test]
    fn copies_do_not_alias() {
        let cube = StickerCube::SOLVED;
        let turned = apply_move(&cube, "R").unwrap();
        assert_eq!(cube, StickerCube::SOLVED);
        assert_ne!(turned, cube);
    }

    proptest! {
        #[test]
        fn move_then_inverse(mv in known_turn()) {
            let text = format_move(&mv);
            let cube = apply_sequence(&StickerCube::SOLVED, "R U2 F' L D B2");
            let there = apply_move(&cube, &text).unwrap();
            let back = apply_move(&there, &inverse_move(&text)).unwrap();
            assert_eq!(back, cube);
        }

        #[test]
        fn sequence_then_inverse(mvs in vec(known_turn(), 0..20).prop_map(MoveSequence)) {
            let there = StickerCube::SOLVED.make_moves(&mvs);
            assert_eq!(there.make_moves(&mvs.inverse()), StickerCube::SOLVED);
        }

        #[test]
        fn cancel_matches_application(a in known_turn(), b in known_turn()) {
            let both = StickerCube::SOLVED.make_move(&a).make_move(&b);
            let cancelled = match a.clone().cancel(b.clone()) {
                Cancellation::NoMove => StickerCube::SOLVED,
                Cancellation::OneMove(m) => StickerCube::SOLVED.make_move(&m),
                Cancellation::TwoMove(a, b) => StickerCube::SOLVED.make_move(&a).make_move(&b),
            };
            assert_eq!(both, cancelled);
        }
    }
}
