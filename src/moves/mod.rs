//! Module for puzzle move generics and related functionality

use std::fmt;

/// Enum for representing the cancellation of two moves.
/// See [`cancel`](Move::cancel).
#[derive(Debug, Eq, PartialEq)]
pub enum Cancellation<M: Move> {
    /// The moves cancelled completely.
    ///
    /// e.g. `R R'` cancels completely
    NoMove,
    /// The moves cancelled into one move.
    ///
    /// e.g. `R R` cancels into `R2`
    OneMove(M),
    /// The moves didn't cancel
    ///
    /// e.g. `R U` stays as `R U` when cancelling
    TwoMove(M, M),
}

/// A move, for use in writing expressions or algorithms. It is intended that a term of this trait
/// is a power of a symbol in some group presentation.
pub trait Move: Eq + Clone {
    /// Take the inverse of a move. These inverses must satisfy the invertibility conditions of
    /// a group, i.e. that `X X^{-1} = X^{-1} X = e` where `e` is the empty sequence.
    fn inverse(self) -> Self
    where
        Self: Sized;

    /// Return the cancellation of two moves.
    ///
    /// ```rust
    /// use cube_trainer::cube333::notation::Turn;
    /// use cube_trainer::moves::{Cancellation, Move};
    ///
    /// let r = Turn::parse_one("R").unwrap();
    /// let u = Turn::parse_one("U'").unwrap();
    /// let r2 = Turn::parse_one("R2").unwrap();
    /// assert_eq!(r.clone().cancel(r.clone()), Cancellation::OneMove(r2));
    /// assert_eq!(r.clone().cancel(r.clone().inverse()), Cancellation::NoMove);
    /// assert_eq!(r.clone().cancel(u.clone()), Cancellation::TwoMove(r, u));
    /// ```
    fn cancel(self, b: Self) -> Cancellation<Self>
    where
        Self: Sized;
}

/// A sequence of moves (also known as an algorithm) for some specific type of move.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct MoveSequence<M: Move>(pub Vec<M>);

impl<M: Move> Default for MoveSequence<M> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<M: Move> MoveSequence<M> {
    /// Invert a sequence of moves.
    ///
    /// If `X` is a sequence of moves and `X^{-1}` is its inverse and `o` is composition, then
    /// `X o X^{-1} = X^{-1} o X = e` where `e` is the empty sequence.
    pub fn inverse(self) -> Self {
        Self(self.0.into_iter().rev().map(|m| m.inverse()).collect())
    }

    /// The number of moves in the sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the sequence has no moves.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The move at position `i`, if there is one.
    pub fn get(&self, i: usize) -> Option<&M> {
        self.0.get(i)
    }

    /// Append a move to the end of the sequence.
    pub fn push(&mut self, mv: M) {
        self.0.push(mv);
    }

    /// Insert moves at position `i`, shifting everything after it back.
    pub fn splice_at(&mut self, i: usize, mvs: impl IntoIterator<Item = M>) {
        self.0.splice(i..i, mvs);
    }

    /// Iterate over the moves in order.
    pub fn iter(&self) -> std::slice::Iter<'_, M> {
        self.0.iter()
    }
}

impl<M: Move> FromIterator<M> for MoveSequence<M> {
    fn from_iter<I: IntoIterator<Item = M>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<M: Move> IntoIterator for MoveSequence<M> {
    type Item = M;
    type IntoIter = std::vec::IntoIter<M>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, M: Move> IntoIterator for &'a MoveSequence<M> {
    type Item = &'a M;
    type IntoIter = std::slice::Iter<'a, M>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<M: Move + fmt::Display> fmt::Display for MoveSequence<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, m) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{m}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube333::notation::parse;

    #[test]
    fn splice_in_front() {
        let mut mvs = parse("F' L'");
        mvs.splice_at(0, parse("D2"));
        assert_eq!(mvs.to_string(), "D2 F' L'");
        mvs.splice_at(3, parse("x"));
        assert_eq!(mvs.len(), 4);
    }

    #[test]
    fn iterates_by_value_and_reference() {
        let mvs = parse("R U2 F'");
        let mut faces = Vec::new();
        for m in &mvs {
            faces.push(m.face.to_string());
        }
        assert_eq!(faces, ["R", "U", "F"]);
        let counts: Vec<u8> = mvs.into_iter().map(|m| m.count).collect();
        assert_eq!(counts, [1, 2, 3]);
    }

    #[test]
    fn inverse_reverses() {
        assert_eq!(parse("R U2 F'").inverse().to_string(), "F U2 R'");
        assert!(MoveSequence::<crate::cube333::Turn>::default().is_empty());
    }
}
