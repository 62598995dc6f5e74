//! Hex grid geometry with axial coordinates
//!
//! Tiles are addressed by integer axial coordinates `(q, r)`. Continuous
//! positions live in cartesian space and are mapped back onto tiles through
//! cube rounding. Tiles have unit radius.

use std::fmt;

use serde::{Deserialize, Serialize};

/// sqrt(3), the only layout constant of the axial <-> cartesian transform
const SQRT3: f32 = 1.732_050_8;

/// Axial hex coordinates of a single tile
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tile {
    pub q: i32,
    pub r: i32,
}

impl Tile {
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    pub const fn add(self, other: Tile) -> Tile {
        Tile::new(self.q + other.q, self.r + other.r)
    }

    pub const fn sub(self, other: Tile) -> Tile {
        Tile::new(self.q - other.q, self.r - other.r)
    }

    /// Distance between two tiles in steps
    pub fn distance_to(&self, other: Tile) -> i32 {
        hex_distance(*self, other)
    }

    /// Get neighbor in direction (0-5)
    pub fn neighbor(&self, direction: usize) -> Tile {
        self.add(DIRECTIONS[direction % 6])
    }

    /// All six neighbors, in direction order
    pub fn neighbors(&self) -> [Tile; 6] {
        DIRECTIONS.map(|dir| self.add(dir))
    }

    pub fn is_neighbor(&self, other: Tile) -> bool {
        hex_distance(*self, other) == 1
    }

    /// Center of this tile in cartesian space
    pub fn to_cart(self) -> CartCoord {
        hex_to_cart(tile_to_hex(self))
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

/// Direction vectors in axial coordinates, walking counterclockwise.
/// Index: 0=E, 1=NE, 2=NW, 3=W, 4=SW, 5=SE
pub const DIRECTIONS: [Tile; 6] = [
    Tile::new(1, 0),
    Tile::new(1, -1),
    Tile::new(0, -1),
    Tile::new(-1, 0),
    Tile::new(-1, 1),
    Tile::new(0, 1),
];

pub const CENTER: Tile = Tile::new(0, 0);

/// Fractional axial coordinates
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HexCoord {
    pub q: f32,
    pub r: f32,
}

/// Fractional cube coordinates (x + y + z == 0)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubeCoord {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Cartesian coordinates in tile units
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CartCoord {
    pub x: f32,
    pub y: f32,
}

impl CartCoord {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: CartCoord) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Tile this point falls into
    pub fn to_tile(self) -> Tile {
        hex_to_tile(cart_to_hex(self))
    }
}

/// Axis-aligned (in q and r) box over tiles, both corners inclusive
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Tile,
    pub max: Tile,
}

impl BoundingBox {
    /// Box spanning `radius` steps in both axes around `center`
    pub const fn around(center: Tile, radius: i32) -> Self {
        Self {
            min: Tile::new(center.q - radius, center.r - radius),
            max: Tile::new(center.q + radius, center.r + radius),
        }
    }

    /// Grow the box until it contains `tile`
    pub fn extend(&mut self, tile: Tile) {
        self.min.q = self.min.q.min(tile.q);
        self.min.r = self.min.r.min(tile.r);
        self.max.q = self.max.q.max(tile.q);
        self.max.r = self.max.r.max(tile.r);
    }

    pub fn contains(&self, tile: Tile) -> bool {
        (self.min.q..=self.max.q).contains(&tile.q) && (self.min.r..=self.max.r).contains(&tile.r)
    }

    /// Same box with every side pushed out by `amount`
    pub const fn expanded(&self, amount: i32) -> Self {
        Self {
            min: Tile::new(self.min.q - amount, self.min.r - amount),
            max: Tile::new(self.max.q + amount, self.max.r + amount),
        }
    }

    /// Iterate every tile in the box, q-major
    pub fn tiles(&self) -> impl Iterator<Item = Tile> {
        let (min, max) = (self.min, self.max);
        (min.q..=max.q).flat_map(move |q| (min.r..=max.r).map(move |r| Tile::new(q, r)))
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

pub fn tile_to_hex(t: Tile) -> HexCoord {
    HexCoord {
        q: t.q as f32,
        r: t.r as f32,
    }
}

/// Round fractional hex coordinates to the nearest tile
pub fn hex_to_tile(c: HexCoord) -> Tile {
    let rounded = hex_round(c);
    Tile::new(rounded.q as i32, rounded.r as i32)
}

pub fn cart_to_hex(c: CartCoord) -> HexCoord {
    HexCoord {
        q: SQRT3 / 3.0 * c.x - c.y / 3.0,
        r: 2.0 / 3.0 * c.y,
    }
}

pub fn hex_to_cart(c: HexCoord) -> CartCoord {
    CartCoord {
        x: SQRT3 * c.q + SQRT3 / 2.0 * c.r,
        y: 1.5 * c.r,
    }
}

pub fn hex_to_cube(c: HexCoord) -> CubeCoord {
    CubeCoord {
        x: c.q,
        y: -c.q - c.r,
        z: c.r,
    }
}

pub fn cube_to_hex(c: CubeCoord) -> HexCoord {
    HexCoord { q: c.x, r: c.z }
}

/// Round each cube component, then re-derive the one with the largest
/// rounding error from the other two so that x + y + z stays 0.
pub fn cube_round(c: CubeCoord) -> CubeCoord {
    let mut rx = c.x.round();
    let mut ry = c.y.round();
    let mut rz = c.z.round();

    let dx = (rx - c.x).abs();
    let dy = (ry - c.y).abs();
    let dz = (rz - c.z).abs();

    if dx > dy && dx > dz {
        rx = -ry - rz;
    } else if dy > dz {
        ry = -rx - rz;
    } else {
        rz = -rx - ry;
    }

    CubeCoord {
        x: rx,
        y: ry,
        z: rz,
    }
}

pub fn hex_round(c: HexCoord) -> HexCoord {
    cube_to_hex(cube_round(hex_to_cube(c)))
}

// ============================================================================
// DISTANCES AND AREAS
// ============================================================================

pub fn hex_distance(a: Tile, b: Tile) -> i32 {
    let d = a.sub(b);
    (d.q.abs() + (d.q + d.r).abs() + d.r.abs()) / 2
}

pub fn get_neighbor(t: Tile, direction: usize) -> Tile {
    t.neighbor(direction)
}

/// Ring of tiles at distance `radius - 1` from `center`, as one connected walk.
///
/// `radius == 1` yields nothing; callers seed the board border with
/// `hex_ring(CENTER, R + 1)`, the ring one step beyond the playable area.
pub fn hex_ring(center: Tile, radius: i32) -> Vec<Tile> {
    let distance = radius - 1;
    let mut ring = Vec::with_capacity(6 * distance.max(0) as usize);
    push_ring(center, distance, &mut ring);
    ring
}

/// Filled disk of every tile within `radius - 1` of `center`.
///
/// Ordering is center first, then ring by ring outward. Observation buffers
/// use this order as their layout, so it must not change.
pub fn hex_area(center: Tile, radius: i32) -> Vec<Tile> {
    let mut area = Vec::with_capacity(area_size(radius));
    area.push(center);
    for distance in 1..radius {
        push_ring(center, distance, &mut area);
    }
    area
}

/// Number of tiles `hex_area(_, radius)` produces
pub fn area_size(radius: i32) -> usize {
    if radius < 1 {
        return 1;
    }
    let r = radius as usize;
    1 + 3 * r * (r - 1)
}

/// True iff the two boxes overlap (closed intervals)
pub fn do_intersect(a: &BoundingBox, b: &BoundingBox) -> bool {
    !(a.min.q > b.max.q || a.max.q < b.min.q || a.max.r < b.min.r || a.min.r > b.max.r)
}

fn push_ring(center: Tile, distance: i32, out: &mut Vec<Tile>) {
    let mut tile = center.add(Tile::new(-distance, distance));
    for direction in 0..6 {
        for _ in 0..distance {
            out.push(tile);
            tile = tile.neighbor(direction);
        }
    }
}
