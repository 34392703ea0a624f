//! Facelet snapshots: the 54 character strings a smart cube reports its full state as.
//!
//! Faces appear in the order `U R F D L B`, each face's nine stickers row-major, and every sticker
//! is written as the letter of the face it belongs to when solved.

use super::Side;
use crate::error::FaceletsError;

use std::fmt;
use std::str::FromStr;

/// A point in time snapshot of every sticker on the cube.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Facelets([Side; 54]);

impl Facelets {
    /// The snapshot of a solved cube.
    pub const SOLVED: Facelets = {
        let mut stickers = [Side::U; 54];
        let mut i = 0;
        while i < 54 {
            stickers[i] = Side::ARRAY[i / 9];
            i += 1;
        }
        Facelets(stickers)
    };

    /// Wrap an array of stickers.
    pub fn from_stickers(stickers: [Side; 54]) -> Self {
        Facelets(stickers)
    }

    /// All 54 stickers.
    pub fn stickers(&self) -> &[Side; 54] {
        &self.0
    }

    /// The nine stickers of one face.
    pub fn face(&self, side: Side) -> &[Side] {
        let start = side as usize * 9;
        &self.0[start..start + 9]
    }

    /// Whether this is exactly the solved snapshot.
    pub fn is_solved(&self) -> bool {
        *self == Self::SOLVED
    }
}

impl FromStr for Facelets {
    type Err = FaceletsError;

    fn from_str(s: &str) -> Result<Facelets, FaceletsError> {
        let chars: Vec<char> = s.trim().chars().collect();
        if chars.len() != 54 {
            return Err(FaceletsError::WrongLength(chars.len()));
        }

        let mut stickers = [Side::U; 54];
        for (index, (&ch, slot)) in chars.iter().zip(stickers.iter_mut()).enumerate() {
            *slot = Side::from_letter(ch).ok_or(FaceletsError::InvalidChar { index, ch })?;
        }
        Ok(Facelets(stickers))
    }
}

impl fmt::Display for Facelets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|s| write!(f, "{}", s.letter()))
    }
}

// Printed as the plain string since that's what cube links log.
impl fmt::Debug for Facelets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Facelets({self})")
    }
}
