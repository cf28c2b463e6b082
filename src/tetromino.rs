//! Shape catalog: the seven flat polycubes and their colors
//!
//! Every shape lies in a single z-layer; rotation happens about the vertical (y) axis,
//! so a rotated shape spreads into x/z but never changes height.

use serde::Serialize;
use std::ops::Add;

/// Integer voxel coordinate, used both for board cells and for piece-relative offsets.
/// y grows downward: row 0 is the top of the well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        self.offset(rhs.x, rhs.y, rhs.z)
    }
}

/// Color identifier a settled block carries (a `#rrggbb` string)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct BlockColor(&'static str);

impl BlockColor {
    pub const fn new(hex: &'static str) -> Self {
        Self(hex)
    }

    pub fn hex(&self) -> &'static str {
        self.0
    }

    /// Decode to an RGB triple; malformed identifiers decode as white
    pub fn rgb(&self) -> (u8, u8, u8) {
        let digits = self.0.trim_start_matches('#');
        if digits.len() != 6 {
            return (255, 255, 255);
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).unwrap_or(255);
        (channel(0), channel(2), channel(4))
    }
}

/// The 7 canonical shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ShapeKind {
    I, // long bar
    O, // square
    T,
    S,
    Z,
    J,
    L,
}

const fn p(x: i32, y: i32) -> Position {
    Position::new(x, y, 0)
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::J,
        ShapeKind::L,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::I => "I",
            ShapeKind::O => "O",
            ShapeKind::T => "T",
            ShapeKind::S => "S",
            ShapeKind::Z => "Z",
            ShapeKind::J => "J",
            ShapeKind::L => "L",
        }
    }

    pub fn color(&self) -> BlockColor {
        match self {
            ShapeKind::I => BlockColor::new("#00f5ff"),
            ShapeKind::O => BlockColor::new("#ffff00"),
            ShapeKind::T => BlockColor::new("#a000f0"),
            ShapeKind::S => BlockColor::new("#00f000"),
            ShapeKind::Z => BlockColor::new("#f00000"),
            ShapeKind::J => BlockColor::new("#0000f0"),
            ShapeKind::L => BlockColor::new("#f0a000"),
        }
    }

    /// Unrotated block offsets relative to the piece anchor
    pub fn blocks(&self) -> [Position; 4] {
        match self {
            ShapeKind::I => [p(0, 0), p(1, 0), p(2, 0), p(3, 0)],
            ShapeKind::O => [p(0, 0), p(1, 0), p(0, 1), p(1, 1)],
            ShapeKind::T => [p(1, 0), p(0, 1), p(1, 1), p(2, 1)],
            ShapeKind::S => [p(1, 0), p(2, 0), p(0, 1), p(1, 1)],
            ShapeKind::Z => [p(0, 0), p(1, 0), p(1, 1), p(2, 1)],
            ShapeKind::J => [p(0, 0), p(0, 1), p(1, 1), p(2, 1)],
            ShapeKind::L => [p(2, 0), p(0, 1), p(1, 1), p(2, 1)],
        }
    }
}

/// A shape as it currently sits in a live piece (offsets may be rotated)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Shape {
    pub kind: ShapeKind,
    pub blocks: [Position; 4],
}

impl Shape {
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            blocks: kind.blocks(),
        }
    }

    pub fn color(&self) -> BlockColor {
        self.kind.color()
    }

    /// Quarter turn about the y axis: (x, y, z) -> (-z, y, x)
    pub fn rotated(&self) -> Shape {
        Shape {
            kind: self.kind,
            blocks: self.blocks.map(|b| Position::new(-b.z, b.y, b.x)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_shape_has_four_distinct_flat_blocks() {
        for kind in ShapeKind::ALL {
            let blocks = kind.blocks();
            let unique: HashSet<_> = blocks.iter().collect();
            assert_eq!(unique.len(), 4, "{} has duplicate blocks", kind.name());
            assert!(blocks.iter().all(|b| b.z == 0));
        }
    }

    #[test]
    fn test_shapes_are_distinct() {
        let footprints: HashSet<_> = ShapeKind::ALL.iter().map(|k| k.blocks()).collect();
        assert_eq!(footprints.len(), 7);
        let colors: HashSet<_> = ShapeKind::ALL.iter().map(|k| k.color()).collect();
        assert_eq!(colors.len(), 7);
    }

    #[test]
    fn test_rotation_is_a_four_cycle() {
        for kind in ShapeKind::ALL {
            let shape = Shape::new(kind);
            let once = shape.rotated();
            assert_ne!(once.blocks, shape.blocks, "{} unchanged by one turn", kind.name());
            let four = once.rotated().rotated().rotated();
            assert_eq!(four, shape);
        }
    }

    #[test]
    fn test_rotation_keeps_height() {
        let shape = Shape::new(ShapeKind::T).rotated();
        let ys: Vec<_> = shape.blocks.iter().map(|b| b.y).collect();
        assert_eq!(ys, vec![0, 1, 1, 1]);
        assert_eq!(shape.blocks[0], Position::new(0, 0, 1));
    }

    #[test]
    fn test_color_rgb() {
        assert_eq!(ShapeKind::O.color().hex(), "#ffff00");
        assert_eq!(ShapeKind::O.color().rgb(), (255, 255, 0));
        assert_eq!(ShapeKind::L.color().rgb(), (0xf0, 0xa0, 0x00));
        assert_eq!(BlockColor::new("bogus").rgb(), (255, 255, 255));
    }
}
