//! A piece level view of the cube, read off a facelet snapshot.
//!
//! Corners are indexed `UFR URB UBL ULF DRF DFL DLB DBR` and edges
//! `UF UR UB UL DF DR DB DL FR FL BR BL`. For each slot we store which piece sits there and its
//! orientation relative to the U/D faces (corners) or the U/D then F/B faces (edges).

use super::facelets::Facelets;
use super::Side;
use crate::error::PieceError;

/// Corner pieces (and the slots they belong in).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Corner {
    UFR = 0,
    URB = 1,
    UBL = 2,
    ULF = 3,
    DRF = 4,
    DFL = 5,
    DLB = 6,
    DBR = 7,
}

/// Edge pieces (and the slots they belong in).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Edge {
    UF = 0,
    UR = 1,
    UB = 2,
    UL = 3,
    DF = 4,
    DR = 5,
    DB = 6,
    DL = 7,
    FR = 8,
    FL = 9,
    BR = 10,
    BL = 11,
}

impl Corner {
    /// All corners in slot order.
    pub const ARRAY: [Corner; 8] = [
        Corner::UFR,
        Corner::URB,
        Corner::UBL,
        Corner::ULF,
        Corner::DRF,
        Corner::DFL,
        Corner::DLB,
        Corner::DBR,
    ];
}

impl Edge {
    /// All edges in slot order.
    pub const ARRAY: [Edge; 12] = [
        Edge::UF,
        Edge::UR,
        Edge::UB,
        Edge::UL,
        Edge::DF,
        Edge::DR,
        Edge::DB,
        Edge::DL,
        Edge::FR,
        Edge::FL,
        Edge::BR,
        Edge::BL,
    ];
}

// Facelet indices of each corner slot, starting with the U/D sticker and going clockwise.
const CORNER_FACELETS: [[usize; 3]; 8] = [
    [8, 9, 20],
    [2, 45, 11],
    [0, 36, 47],
    [6, 18, 38],
    [29, 26, 15],
    [27, 44, 24],
    [33, 53, 42],
    [35, 17, 51],
];

// Facelet indices of each edge slot, U/D sticker first, otherwise F/B first.
const EDGE_FACELETS: [[usize; 2]; 12] = [
    [7, 19],
    [5, 10],
    [1, 46],
    [3, 37],
    [28, 25],
    [32, 16],
    [34, 52],
    [30, 43],
    [23, 12],
    [21, 41],
    [48, 14],
    [50, 39],
];

fn home_colour(facelet: usize) -> Side {
    Side::ARRAY[facelet / 9]
}

/// Pieces and orientations of a cube.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CubieCube {
    /// The corner in each corner slot.
    pub cp: [Corner; 8],
    /// Twist of each corner slot: 0 oriented, 1 clockwise, 2 anti-clockwise.
    pub co: [u8; 8],
    /// The edge in each edge slot.
    pub ep: [Edge; 12],
    /// Flip of each edge slot: 0 oriented, 1 flipped.
    pub eo: [u8; 12],
}

impl CubieCube {
    /// The solved cube.
    pub const SOLVED: CubieCube = CubieCube {
        cp: Corner::ARRAY,
        co: [0; 8],
        ep: Edge::ARRAY,
        eo: [0; 12],
    };

    /// Read the pieces off a snapshot.
    pub fn from_facelets(facelets: &Facelets) -> Result<CubieCube, PieceError> {
        let f = facelets.stickers();
        let mut cube = CubieCube::SOLVED;

        for (slot, idx) in CORNER_FACELETS.iter().enumerate() {
            let ori = idx
                .iter()
                .position(|&i| matches!(f[i], Side::U | Side::D))
                .ok_or(PieceError::InvalidCorner(slot))?;
            let col1 = f[idx[(ori + 1) % 3]];
            let col2 = f[idx[(ori + 2) % 3]];
            let piece = CORNER_FACELETS
                .iter()
                .position(|home| home_colour(home[1]) == col1 && home_colour(home[2]) == col2)
                .ok_or(PieceError::InvalidCorner(slot))?;
            cube.cp[slot] = Corner::ARRAY[piece];
            cube.co[slot] = ori as u8;
        }

        for (slot, [a, b]) in EDGE_FACELETS.iter().enumerate() {
            let (ca, cb) = (f[*a], f[*b]);
            let (piece, flip) = EDGE_FACELETS
                .iter()
                .enumerate()
                .find_map(|(k, [ha, hb])| {
                    let (ha, hb) = (home_colour(*ha), home_colour(*hb));
                    if (ca, cb) == (ha, hb) {
                        Some((k, 0))
                    } else if (ca, cb) == (hb, ha) {
                        Some((k, 1))
                    } else {
                        None
                    }
                })
                .ok_or(PieceError::InvalidEdge(slot))?;
            cube.ep[slot] = Edge::ARRAY[piece];
            cube.eo[slot] = flip;
        }

        Ok(cube)
    }

    /// Whether `corner` sits in its own slot, untwisted.
    pub fn corner_solved(&self, corner: Corner) -> bool {
        let i = corner as usize;
        self.cp[i] == corner && self.co[i] == 0
    }

    /// Whether `edge` sits in its own slot, unflipped.
    pub fn edge_solved(&self, edge: Edge) -> bool {
        let i = edge as usize;
        self.ep[i] == edge && self.eo[i] == 0
    }
}

/// Converts a facelet snapshot into pieces. Phase detection only needs pieces, so anything that
/// can solve or pattern match a cube can stand in here.
pub trait PieceConverter {
    /// Convert the snapshot, failing if it doesn't describe real pieces.
    fn to_pieces(&self, facelets: &Facelets) -> Result<CubieCube, PieceError>;
}

/// The built in converter, which reads pieces straight off the stickers.
#[derive(Debug, Default, Clone, Copy)]
pub struct CubieConverter;

impl PieceConverter for CubieConverter {
    fn to_pieces(&self, facelets: &Facelets) -> Result<CubieCube, PieceError> {
        CubieCube::from_facelets(facelets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube333::notation::apply_sequence;
    use crate::cube333::StickerCube;

    fn pieces_after(alg: &str) -> CubieCube {
        let facelets = apply_sequence(&StickerCube::SOLVED, alg).to_facelets();
        CubieCube::from_facelets(&facelets).unwrap()
    }

    #[test]
    fn solved_conversion() {
        assert_eq!(
            CubieCube::from_facelets(&Facelets::SOLVED),
            Ok(CubieCube::SOLVED)
        );
    }

    #[test]
    fn u_turn_cycles_top_layer() {
        let cube = pieces_after("U");
        // U takes the piece in UR to UF
        assert_eq!(cube.ep[Edge::UF as usize], Edge::UR);
        assert_eq!(cube.cp[Corner::UFR as usize], Corner::URB);
        assert_eq!(cube.co, [0; 8]);
        assert_eq!(cube.eo, [0; 12]);
        for e in [Edge::DF, Edge::FR, Edge::BL] {
            assert!(cube.edge_solved(e));
        }
    }

    #[test]
    fn f_turn_flips_edges() {
        let cube = pieces_after("F");
        assert!(!cube.edge_solved(Edge::UF));
        assert_eq!(cube.eo.iter().filter(|&&o| o == 1).count(), 4);
        assert_eq!(cube.co.iter().map(|&o| o as usize).sum::<usize>() % 3, 0);
        assert!(cube.corner_solved(Corner::UBL));
    }

    #[test]
    fn every_position_converts() {
        let cube = pieces_after("R U F' L2 D B' R2 D'");
        assert_eq!(cube.eo.iter().map(|&o| o as usize).sum::<usize>() % 2, 0);
        let mut corners = cube.cp;
        corners.sort();
        assert_eq!(corners, Corner::ARRAY);
    }

    #[test]
    fn broken_snapshot() {
        let mut stickers = *Facelets::SOLVED.stickers();
        // U9 is part of the UFR corner; giving it a side colour leaves no U/D sticker there
        stickers[8] = Side::R;
        assert_eq!(
            CubieCube::from_facelets(&Facelets::from_stickers(stickers)),
            Err(PieceError::InvalidCorner(0))
        );
    }
}
