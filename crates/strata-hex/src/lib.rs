//! Hex coordinate math for the tile world (axial, cube, pixel). No state, no dependencies.
#![forbid(unsafe_code)]

use core::ops::{Add, AddAssign, Mul, Sub, SubAssign};

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Axial hex coordinate. `layer` is tracked separately by callers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Axial {
    pub q: i32,
    pub r: i32,
}

/// Cube form of an axial coordinate; always satisfies `x + y + z == 0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cube {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// Neighbor offsets: E, NE, NW, W, SW, SE.
pub const DIRECTIONS: [Axial; 6] = [
    Axial::new(1, 0),
    Axial::new(1, -1),
    Axial::new(0, -1),
    Axial::new(-1, 0),
    Axial::new(-1, 1),
    Axial::new(0, 1),
];

impl Axial {
    pub const ORIGIN: Axial = Axial { q: 0, r: 0 };

    #[inline]
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// `y` wraps at the i32 edges, so `x + y + z == 0` holds modulo 2³².
    #[inline]
    pub const fn to_cube(self) -> Cube {
        Cube {
            x: self.q,
            y: self.q.wrapping_neg().wrapping_sub(self.r),
            z: self.r,
        }
    }

    /// Computed in i64; saturates at `i32::MAX`.
    #[inline]
    pub fn distance(self, other: Axial) -> i32 {
        hex_len(
            i64::from(self.q) - i64::from(other.q),
            i64::from(self.r) - i64::from(other.r),
        )
    }

    #[inline]
    pub fn neighbor(self, dir: usize) -> Axial {
        self + DIRECTIONS[dir % 6]
    }

    #[inline]
    pub fn neighbors(self) -> [Axial; 6] {
        DIRECTIONS.map(|d| self + d)
    }
}

impl Cube {
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn to_axial(self) -> Axial {
        Axial {
            q: self.x,
            r: self.z,
        }
    }
}

impl From<(i32, i32)> for Axial {
    fn from(value: (i32, i32)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl From<Axial> for (i32, i32) {
    fn from(value: Axial) -> Self {
        (value.q, value.r)
    }
}

impl Add for Axial {
    type Output = Axial;
    #[inline]
    fn add(self, rhs: Axial) -> Axial {
        Axial::new(self.q.wrapping_add(rhs.q), self.r.wrapping_add(rhs.r))
    }
}

impl AddAssign for Axial {
    #[inline]
    fn add_assign(&mut self, rhs: Axial) {
        *self = *self + rhs;
    }
}

impl Sub for Axial {
    type Output = Axial;
    #[inline]
    fn sub(self, rhs: Axial) -> Axial {
        Axial::new(self.q.wrapping_sub(rhs.q), self.r.wrapping_sub(rhs.r))
    }
}

impl SubAssign for Axial {
    #[inline]
    fn sub_assign(&mut self, rhs: Axial) {
        *self = *self - rhs;
    }
}

impl Mul<i32> for Axial {
    type Output = Axial;
    #[inline]
    fn mul(self, rhs: i32) -> Axial {
        Axial::new(self.q.wrapping_mul(rhs), self.r.wrapping_mul(rhs))
    }
}

#[inline]
pub const fn axial_to_cube(q: i32, r: i32) -> Cube {
    Axial::new(q, r).to_cube()
}

/// Pointy-top layout: pixel position of the hex center for cell size `size`.
#[inline]
pub fn axial_to_pixel(q: i32, r: i32, size: f64) -> (f64, f64) {
    let qf = f64::from(q);
    let rf = f64::from(r);
    let x = size * SQRT_3 * (qf + rf * 0.5);
    let y = size * 1.5 * rf;
    (x, y)
}

pub fn pixel_to_axial(x: f64, y: f64, size: f64) -> Axial {
    let fq = (SQRT_3 / 3.0 * x - y / 3.0) / size;
    let fr = (2.0 / 3.0 * y) / size;
    cube_round(fq, -fq - fr, fr).to_axial()
}

/// Rounds fractional cube coordinates, re-deriving the axis with the largest
/// rounding error so the result keeps `x + y + z == 0`.
pub fn cube_round(x: f64, y: f64, z: f64) -> Cube {
    let mut rx = x.round();
    let mut ry = y.round();
    let mut rz = z.round();
    let dx = (rx - x).abs();
    let dy = (ry - y).abs();
    let dz = (rz - z).abs();
    if dx > dy && dx > dz {
        rx = -ry - rz;
    } else if dy > dz {
        ry = -rx - rz;
    } else {
        rz = -rx - ry;
    }
    Cube::new(rx as i32, ry as i32, rz as i32)
}

#[inline]
pub fn neighbors(q: i32, r: i32) -> [Axial; 6] {
    Axial::new(q, r).neighbors()
}

#[inline]
pub fn distance(a: Axial, b: Axial) -> i32 {
    a.distance(b)
}

#[inline]
fn hex_len(dq: i64, dr: i64) -> i32 {
    ((dq.abs() + dr.abs() + (dq + dr).abs()) / 2).min(i64::from(i32::MAX)) as i32
}

#[inline]
pub fn distance_from_origin(q: i32, r: i32) -> i32 {
    // Widened so any i32 pair is valid; saturates past i32::MAX.
    hex_len(i64::from(q), i64::from(r))
}

/// Pixel-space distance from the origin at unit cell size.
#[inline]
pub fn euclidean_distance(q: i32, r: i32) -> f64 {
    let (x, y) = axial_to_pixel(q, r, 1.0);
    (x * x + y * y).sqrt()
}

/// The `6 * radius` cells at exactly `radius` from the center (just the center for 0).
pub fn ring(q: i32, r: i32, radius: i32) -> Vec<Axial> {
    let center = Axial::new(q, r);
    if radius <= 0 {
        return vec![center];
    }
    let mut out = Vec::with_capacity(6 * radius as usize);
    let mut cur = center + DIRECTIONS[4] * radius;
    for dir in DIRECTIONS {
        for _ in 0..radius {
            out.push(cur);
            cur += dir;
        }
    }
    out
}

/// Every cell within `radius` of the center, `3r² + 3r + 1` in total.
pub fn range(q: i32, r: i32, radius: i32) -> Vec<Axial> {
    let radius = radius.max(0);
    let n = radius as usize;
    let mut out = Vec::with_capacity(n.saturating_mul(3 * n + 3).saturating_add(1));
    let center = Axial::new(q, r);
    let rad = i64::from(radius);
    for dq in -rad..=rad {
        let lo = (-rad).max(-dq - rad);
        let hi = rad.min(-dq + rad);
        for dr in lo..=hi {
            out.push(center + Axial::new(dq as i32, dr as i32));
        }
    }
    out
}
