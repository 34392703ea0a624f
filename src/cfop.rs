//! Detection of CFOP milestones (cross, the four F2L pairs, OLL and PLL) in a facelet snapshot.
//!
//! Cross faces are chosen in the frame of the physical cube, while snapshots are read in the
//! frame the cube is displayed in. The two differ by a fixed half turn that swaps `U`/`D` and
//! `R`/`L`, so every check first maps the chosen face through [`visual_face`].
//!
//! F2L phases are reported by how many pairs are solved, not by which ones: solving the back
//! left pair first still reports `F2L-1`. Solve history is recorded in these terms.

use crate::cube333::{Corner, CubieConverter, Edge, Facelets, PieceConverter, Side};

use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A CFOP milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum Phase {
    Cross,
    #[serde(rename = "F2L-1")]
    F2l1,
    #[serde(rename = "F2L-2")]
    F2l2,
    #[serde(rename = "F2L-3")]
    F2l3,
    #[serde(rename = "F2L-4")]
    F2l4,
    #[serde(rename = "OLL")]
    Oll,
    #[serde(rename = "PLL")]
    Pll,
}

impl Phase {
    /// Every phase in the order a solve passes through them.
    pub const ORDER: [Phase; 7] = [
        Phase::Cross,
        Phase::F2l1,
        Phase::F2l2,
        Phase::F2l3,
        Phase::F2l4,
        Phase::Oll,
        Phase::Pll,
    ];

    /// The phase reached once `count` F2L pairs are solved (`1..=4`).
    pub fn f2l(count: usize) -> Option<Phase> {
        match count {
            1 => Some(Phase::F2l1),
            2 => Some(Phase::F2l2),
            3 => Some(Phase::F2l3),
            4 => Some(Phase::F2l4),
            _ => None,
        }
    }

    /// The phase after this one, if any.
    pub fn next(self) -> Option<Phase> {
        Phase::ORDER.get(self as usize + 1).copied()
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Cross => "Cross",
            Phase::F2l1 => "F2L-1",
            Phase::F2l2 => "F2L-2",
            Phase::F2l3 => "F2L-3",
            Phase::F2l4 => "F2L-4",
            Phase::Oll => "OLL",
            Phase::Pll => "PLL",
        })
    }
}

/// Map a cross face chosen on the physical cube to the face it appears as in snapshots.
pub fn visual_face(physical: Side) -> Side {
    match physical {
        Side::U => Side::D,
        Side::D => Side::U,
        Side::R => Side::L,
        Side::L => Side::R,
        Side::F => Side::F,
        Side::B => Side::B,
    }
}

/// The four corner/edge pairs that make up the first two layers under a (visual) cross face.
pub fn f2l_pairs(cross: Side) -> [(Corner, Edge); 4] {
    use Corner as C;
    use Edge as E;
    match cross {
        Side::D => [
            (C::DRF, E::FR),
            (C::DFL, E::FL),
            (C::DLB, E::BL),
            (C::DBR, E::BR),
        ],
        Side::U => [
            (C::UFR, E::FR),
            (C::ULF, E::FL),
            (C::UBL, E::BL),
            (C::URB, E::BR),
        ],
        Side::F => [
            (C::UFR, E::UR),
            (C::ULF, E::UL),
            (C::DFL, E::DL),
            (C::DRF, E::DR),
        ],
        Side::B => [
            (C::URB, E::UR),
            (C::UBL, E::UL),
            (C::DLB, E::DL),
            (C::DBR, E::DR),
        ],
        Side::R => [
            (C::UFR, E::UF),
            (C::URB, E::UB),
            (C::DBR, E::DB),
            (C::DRF, E::DF),
        ],
        Side::L => [
            (C::ULF, E::UF),
            (C::UBL, E::UB),
            (C::DLB, E::DB),
            (C::DFL, E::DF),
        ],
    }
}

/// Whether the four edge stickers of the cross face match its colour. Corners and the side
/// stickers of the cross edges aren't looked at.
pub fn detect_cross(facelets: &Facelets, cross: Side) -> bool {
    let face = visual_face(cross);
    let block = facelets.face(face);
    [1, 3, 5, 7].iter().all(|&i| block[i] == face)
}

/// Whether the face opposite the cross is a single colour.
pub fn detect_oll(facelets: &Facelets, cross: Side) -> bool {
    let block = facelets.face(visual_face(cross).opposite());
    block.iter().all(|&s| s == block[0])
}

/// Whether the cube is solved.
pub fn detect_pll(facelets: &Facelets) -> bool {
    facelets.is_solved()
}

/// Evaluates snapshots for CFOP milestones, using a [`PieceConverter`] to find F2L pairs.
#[derive(Debug, Default, Clone)]
pub struct PhaseDetector<C: PieceConverter = CubieConverter> {
    converter: C,
}

impl<C: PieceConverter> PhaseDetector<C> {
    /// Create a detector using the given converter.
    pub fn new(converter: C) -> Self {
        Self { converter }
    }

    /// Whether F2L pair `pair` (`0..4`) is solved. A snapshot the converter rejects counts as
    /// unsolved.
    pub fn detect_f2l_pair(&self, facelets: &Facelets, cross: Side, pair: usize) -> bool {
        let Some(&(corner, edge)) = f2l_pairs(visual_face(cross)).get(pair) else {
            warn!("there is no F2L pair {pair}");
            return false;
        };
        match self.converter.to_pieces(facelets) {
            Ok(cube) => cube.corner_solved(corner) && cube.edge_solved(edge),
            Err(e) => {
                warn!("could not read pieces from {facelets:?}: {e}");
                false
            }
        }
    }

    /// Count the solved F2L pairs, converting the snapshot only once.
    pub fn solved_pairs(&self, facelets: &Facelets, cross: Side) -> usize {
        match self.converter.to_pieces(facelets) {
            Ok(cube) => f2l_pairs(visual_face(cross))
                .iter()
                .filter(|&&(c, e)| cube.corner_solved(c) && cube.edge_solved(e))
                .count(),
            Err(e) => {
                warn!("could not read pieces from {facelets:?}: {e}");
                0
            }
        }
    }

    /// Every milestone currently satisfied, in solve order. Later checks only run when the ones
    /// before them hold.
    pub fn detect_cfop_phases(&self, facelets: &Facelets, cross: Side) -> Vec<Phase> {
        let mut phases = Vec::new();
        if !detect_cross(facelets, cross) {
            return phases;
        }
        phases.push(Phase::Cross);

        let pairs = self.solved_pairs(facelets, cross);
        phases.extend((1..=pairs).filter_map(Phase::f2l));
        if pairs < 4 || !detect_oll(facelets, cross) {
            return phases;
        }
        phases.push(Phase::Oll);

        if detect_pll(facelets) {
            phases.push(Phase::Pll);
        }
        phases
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube333::notation::apply_sequence;
    use crate::cube333::{CubieCube, StickerCube};
    use crate::error::PieceError;

    use proptest::prelude::*;

    fn snapshot(alg: &str) -> Facelets {
        apply_sequence(&StickerCube::SOLVED, alg).to_facelets()
    }

    struct Broken;

    impl PieceConverter for Broken {
        fn to_pieces(&self, _: &Facelets) -> Result<CubieCube, PieceError> {
            Err(PieceError::InvalidEdge(0))
        }
    }

    #[test]
    fn solved_has_every_phase() {
        let detector = PhaseDetector::new(CubieConverter);
        for cross in Side::ARRAY {
            assert_eq!(
                detector.detect_cfop_phases(&Facelets::SOLVED, cross),
                Phase::ORDER.to_vec()
            );
        }
    }

    #[test]
    fn cross_breaks_and_restores() {
        // a physical D cross is read from the U face of the snapshot
        assert!(detect_cross(&Facelets::SOLVED, Side::D));
        let broken = snapshot("R U R' U'");
        assert!(!detect_cross(&broken, Side::D));
        assert!(detect_cross(&snapshot("R U R' U' U R U' R'"), Side::D));
    }

    #[test]
    fn last_layer_turns_keep_f2l() {
        // the snapshot's D face is the physical U face, the last layer for a D cross
        let detector = PhaseDetector::new(CubieConverter);
        let facelets = snapshot("D");
        assert_eq!(
            detector.detect_cfop_phases(&facelets, Side::D),
            vec![
                Phase::Cross,
                Phase::F2l1,
                Phase::F2l2,
                Phase::F2l3,
                Phase::F2l4,
                Phase::Oll
            ]
        );
        assert!(!detect_pll(&facelets));
    }

    #[test]
    fn f2l_named_by_count() {
        // R' D' R takes out the first pair only; three remain, so phases still run up to F2L-3
        // even though it is pair 0 that is missing.
        let detector = PhaseDetector::new(CubieConverter);
        let facelets = snapshot("R' D' R");
        let solved: Vec<bool> = (0..4)
            .map(|p| detector.detect_f2l_pair(&facelets, Side::D, p))
            .collect();
        assert_eq!(solved, vec![false, true, true, true]);
        assert_eq!(
            detector.detect_cfop_phases(&facelets, Side::D),
            vec![Phase::Cross, Phase::F2l1, Phase::F2l2, Phase::F2l3]
        );
    }

    #[test]
    fn oll_needs_one_colour() {
        assert!(detect_oll(&Facelets::SOLVED, Side::U));
        assert!(!detect_oll(&snapshot("F"), Side::U));
    }

    #[test]
    fn converter_failure_means_no_pairs() {
        let detector = PhaseDetector::new(Broken);
        assert!(!detector.detect_f2l_pair(&Facelets::SOLVED, Side::D, 0));
        assert_eq!(
            detector.detect_cfop_phases(&Facelets::SOLVED, Side::D),
            vec![Phase::Cross]
        );
        assert!(!PhaseDetector::new(CubieConverter).detect_f2l_pair(&Facelets::SOLVED, Side::D, 4));
    }

    #[test]
    fn phase_names() {
        assert_eq!(Phase::F2l3.to_string(), "F2L-3");
        assert_eq!(serde_json::to_string(&Phase::Pll).unwrap(), "\"PLL\"");
        assert_eq!(Phase::Oll.next(), Some(Phase::Pll));
        assert_eq!(Phase::Pll.next(), None);
    }

    proptest! {
        #[test]
        fn pll_rejects_any_changed_sticker(i in 0..54usize, s in any::<Side>()) {
            let mut stickers = *Facelets::SOLVED.stickers();
            prop_assume!(stickers[i] != s);
            stickers[i] = s;
            assert!(!detect_pll(&Facelets::from_stickers(stickers)));
        }
    }
}
