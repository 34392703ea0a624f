//! A sticker level model of the cube: six faces of nine stickers each.
//!
//! Faces are stored in facelet order (`U R F D L B`) and every face is read row-major the way it
//! appears in a standard facelet string: `U` with `B` at the top, `D` with `F` at the top and the
//! four side faces with `U` at the top. Sticker 4 is the centre, `{1, 3, 5, 7}` are edge stickers
//! and `{0, 2, 6, 8}` are corner stickers.

use super::facelets::Facelets;
use super::notation::Face;
use super::Side;

use std::sync::OnceLock;

/// The nine stickers of one face.
pub type FaceStickers = [Side; 9];

/// A cube stored as 54 coloured stickers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StickerCube {
    /// Faces indexed by `Side as usize`.
    pub faces: [FaceStickers; 6],
}

impl Default for StickerCube {
    fn default() -> Self {
        Self::SOLVED
    }
}

/// Rotate the stickers of a single face clockwise, as seen when looking at that face. Corners
/// cycle `0 -> 2 -> 8 -> 6 -> 0` and edges cycle `1 -> 5 -> 7 -> 3 -> 1`.
pub fn rotate_face_clockwise(face: &FaceStickers) -> FaceStickers {
    let mut out = *face;
    out[2] = face[0];
    out[8] = face[2];
    out[6] = face[8];
    out[0] = face[6];
    out[5] = face[1];
    out[7] = face[5];
    out[3] = face[7];
    out[1] = face[3];
    out
}

/// Rotate the stickers of a single face counter-clockwise. The inverse of
/// [`rotate_face_clockwise`].
pub fn rotate_face_counter_clockwise(face: &FaceStickers) -> FaceStickers {
    let mut out = *face;
    out[0] = face[2];
    out[2] = face[8];
    out[8] = face[6];
    out[6] = face[0];
    out[1] = face[5];
    out[5] = face[7];
    out[7] = face[3];
    out[3] = face[1];
    out
}

impl StickerCube {
    /// The solved cube.
    pub const SOLVED: Self = StickerCube {
        faces: [
            [Side::U; 9],
            [Side::R; 9],
            [Side::F; 9],
            [Side::D; 9],
            [Side::L; 9],
            [Side::B; 9],
        ],
    };

    /// Create a solved cube.
    pub fn solved() -> Self {
        Self::SOLVED
    }

    /// Whether every face is a single colour. Unlike comparing against [`StickerCube::SOLVED`]
    /// this also accepts solved cubes held in another orientation.
    pub fn is_solved(&self) -> bool {
        self.faces.iter().all(|f| f.iter().all(|&s| s == f[4]))
    }

    /// The sticker at facelet index `i` (0..54).
    pub fn sticker(&self, i: usize) -> Side {
        self.faces[i / 9][i % 9]
    }

    /// Apply one clockwise quarter turn of `face`. Returns `false` and leaves the cube untouched
    /// when `face` is not a symbol we know how to turn.
    pub fn quarter_turn(&mut self, face: &Face) -> bool {
        let Some(layer) = face.layer_index() else {
            return false;
        };
        let dest = &turn_tables()[layer];

        let mut faces = self.faces;
        for (i, &d) in dest.iter().enumerate() {
            let d = d as usize;
            faces[d / 9][d % 9] = self.sticker(i);
        }
        self.faces = faces;
        true
    }

    /// The snapshot string of this cube.
    pub fn to_facelets(&self) -> Facelets {
        Facelets::from_stickers(std::array::from_fn(|i| self.sticker(i)))
    }

    /// Build a cube from a snapshot string.
    pub fn from_facelets(facelets: &Facelets) -> Self {
        let stickers = facelets.stickers();
        StickerCube {
            faces: std::array::from_fn(|f| std::array::from_fn(|i| stickers[f * 9 + i])),
        }
    }
}

impl std::fmt::Display for StickerCube {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let row = |side: Side, r: usize| -> String {
            self.faces[side as usize][r * 3..r * 3 + 3]
                .iter()
                .map(|s| s.letter())
                .collect()
        };
        for r in 0..3 {
            writeln!(f, "    {}", row(Side::U, r))?;
        }
        for r in 0..3 {
            writeln!(
                f,
                "{} {} {} {}",
                row(Side::L, r),
                row(Side::F, r),
                row(Side::R, r),
                row(Side::B, r)
            )?;
        }
        for r in 0..3 {
            writeln!(f, "    {}", row(Side::D, r))?;
        }
        Ok(())
    }
}

type Vec3 = [i8; 3];

// (normal, right, down) of each face in facelet order, with x towards R, y towards U and z
// towards F.
const FRAMES: [(Vec3, Vec3, Vec3); 6] = [
    ([0, 1, 0], [1, 0, 0], [0, 0, 1]),
    ([1, 0, 0], [0, 0, -1], [0, -1, 0]),
    ([0, 0, 1], [1, 0, 0], [0, -1, 0]),
    ([0, -1, 0], [1, 0, 0], [0, 0, -1]),
    ([-1, 0, 0], [0, 0, 1], [0, -1, 0]),
    ([0, 0, -1], [-1, 0, 0], [0, -1, 0]),
];

// Rotation axis and selected layer (`None` for the whole cube) of each turnable symbol, in
// `Face::layer_index` order. The axis points out of the face the turn is clockwise for.
const LAYERS: [(Vec3, Option<i8>); 12] = [
    ([1, 0, 0], Some(1)),  // R
    ([-1, 0, 0], Some(1)), // L
    ([0, 1, 0], Some(1)),  // U
    ([0, -1, 0], Some(1)), // D
    ([0, 0, 1], Some(1)),  // F
    ([0, 0, -1], Some(1)), // B
    ([-1, 0, 0], Some(0)), // M
    ([0, -1, 0], Some(0)), // E
    ([0, 0, 1], Some(0)),  // S
    ([1, 0, 0], None),     // x
    ([0, 1, 0], None),     // y
    ([0, 0, 1], None),     // z
];

fn dot(a: Vec3, b: Vec3) -> i8 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn cross(a: Vec3, b: Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

// Quarter turn clockwise when looking down `axis` towards the centre.
fn rotate(v: Vec3, axis: Vec3) -> Vec3 {
    let c = cross(axis, v);
    let d = dot(axis, v);
    [axis[0] * d - c[0], axis[1] * d - c[1], axis[2] * d - c[2]]
}

fn geometry(i: usize) -> (Vec3, Vec3) {
    let (n, r, d) = FRAMES[i / 9];
    let col = (i % 3) as i8 - 1;
    let row = ((i % 9) / 3) as i8 - 1;
    let pos = std::array::from_fn(|k| n[k] + col * r[k] + row * d[k]);
    (pos, n)
}

fn index_of(pos: Vec3, normal: Vec3) -> usize {
    let face = FRAMES
        .iter()
        .position(|&(n, _, _)| n == normal)
        .unwrap_or_else(|| unreachable!("rotations keep normals axis aligned"));
    let (_, r, d) = FRAMES[face];
    let col = (dot(pos, r) + 1) as usize;
    let row = (dot(pos, d) + 1) as usize;
    face * 9 + row * 3 + col
}

/// For each turnable layer, the destination facelet of every facelet under one clockwise quarter
/// turn.
fn turn_tables() -> &'static [[u8; 54]; 12] {
    static TABLES: OnceLock<[[u8; 54]; 12]> = OnceLock::new();
    TABLES.get_or_init(|| {
        LAYERS.map(|(axis, layer)| {
            std::array::from_fn(|i| {
                let (pos, normal) = geometry(i);
                let moved = layer.map_or(true, |l| dot(pos, axis) == l);
                if moved {
                    index_of(rotate(pos, axis), rotate(normal, axis)) as u8
                } else {
                    i as u8
                }
            })
        })
    })
}
