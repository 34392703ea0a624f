//! Representations of the 3x3x3 Rubik's cube: stickers, notation, facelet snapshots and pieces.

pub mod cubie;
pub mod facelets;
pub mod notation;
pub mod sticker;

pub use cubie::{Corner, CubieConverter, CubieCube, Edge, PieceConverter};
pub use facelets::Facelets;
pub use notation::{Face, Turn};
pub use sticker::StickerCube;

#[cfg(test)]
use proptest_derive::Arbitrary;

/// One of the six faces of the cube. Stickers are coloured by the face they belong to when the
/// cube is solved, so a `Side` doubles as a sticker colour.
///
/// The discriminants follow the facelet order `U R F D L B`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[cfg_attr(test, derive(Arbitrary))]
#[allow(missing_docs)]
pub enum Side {
    U = 0,
    R = 1,
    F = 2,
    D = 3,
    L = 4,
    B = 5,
}

impl Side {
    /// All sides in facelet order.
    pub const ARRAY: [Side; 6] = [Side::U, Side::R, Side::F, Side::D, Side::L, Side::B];

    /// The side opposite to this one.
    pub fn opposite(self) -> Side {
        match self {
            Side::U => Side::D,
            Side::D => Side::U,
            Side::R => Side::L,
            Side::L => Side::R,
            Side::F => Side::B,
            Side::B => Side::F,
        }
    }

    /// The letter used for this side in facelet strings and notation.
    pub fn letter(self) -> char {
        match self {
            Side::U => 'U',
            Side::R => 'R',
            Side::F => 'F',
            Side::D => 'D',
            Side::L => 'L',
            Side::B => 'B',
        }
    }

    /// Read a side from its letter. Lowercase letters are accepted.
    pub fn from_letter(c: char) -> Option<Side> {
        match c.to_ascii_uppercase() {
            'U' => Some(Side::U),
            'R' => Some(Side::R),
            'F' => Some(Side::F),
            'D' => Some(Side::D),
            'L' => Some(Side::L),
            'B' => Some(Side::B),
            _ => None,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}
