//! Fixed-point 2D vectors on the kitchen floor plane (x/z).
//!
//! All actor math runs through this type so movement and facing stay
//! deterministic across platforms. The square root works on the raw Q32.32
//! bits with an integer Newton iteration; no float ever enters the sim loop.

use crate::fixed::Fixed64;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// A 2D vector in Q32.32 fixed-point. `x` runs across the kitchen,
/// `z` runs along it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: Fixed64,
    pub z: Fixed64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 {
        x: Fixed64::ZERO,
        z: Fixed64::ZERO,
    };

    pub fn new(x: Fixed64, z: Fixed64) -> Self {
        Self { x, z }
    }

    /// Construct from f64 components. Initialization/config only.
    pub fn from_f64(x: f64, z: f64) -> Self {
        Self {
            x: Fixed64::from_num(x),
            z: Fixed64::from_num(z),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.x == Fixed64::ZERO && self.z == Fixed64::ZERO
    }

    pub fn dot(&self, other: Vec2) -> Fixed64 {
        self.x * other.x + self.z * other.z
    }

    pub fn length_squared(&self) -> Fixed64 {
        self.dot(*self)
    }

    pub fn length(&self) -> Fixed64 {
        sqrt(self.length_squared())
    }

    /// Unit vector in the same direction. The zero vector normalizes to
    /// zero. Axis-aligned vectors normalize exactly (no sqrt round-off),
    /// which the axis-isolated movement fallback relies on.
    pub fn normalized(&self) -> Vec2 {
        if self.x == Fixed64::ZERO && self.z == Fixed64::ZERO {
            return Vec2::ZERO;
        }
        if self.z == Fixed64::ZERO {
            return Vec2::new(self.x.signum(), Fixed64::ZERO);
        }
        if self.x == Fixed64::ZERO {
            return Vec2::new(Fixed64::ZERO, self.z.signum());
        }
        let len = self.length();
        Vec2 {
            x: self.x / len,
            z: self.z / len,
        }
    }

    /// Move this vector toward `target` by at most `max_delta` per component
    /// magnitude, renormalizing the result. Used for the cosmetic facing
    /// interpolation; gameplay never reads the smoothed value.
    pub fn turned_toward(&self, target: Vec2, max_delta: Fixed64) -> Vec2 {
        if target.is_zero() {
            return *self;
        }
        let t = max_delta.clamp(Fixed64::ZERO, Fixed64::ONE);
        let blended = Vec2 {
            x: self.x + (target.x - self.x) * t,
            z: self.z + (target.z - self.z) * t,
        };
        if blended.is_zero() {
            // Directly opposed and t = 0.5 collapses the blend; snap instead.
            return target.normalized();
        }
        blended.normalized()
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.z + rhs.z)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.z += rhs.z;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.z - rhs.z)
    }
}

impl Mul<Fixed64> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: Fixed64) -> Vec2 {
        Vec2::new(self.x * rhs, self.z * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.z)
    }
}

/// Square root of a non-negative Fixed64.
///
/// For v = b / 2^32 (raw bits b), sqrt(v) = sqrt(b << 32) / 2^32, so the
/// result's raw bits are the integer square root of `b << 32`.
pub fn sqrt(v: Fixed64) -> Fixed64 {
    debug_assert!(v >= Fixed64::ZERO, "sqrt of negative fixed-point value");
    if v <= Fixed64::ZERO {
        return Fixed64::ZERO;
    }
    let bits = v.to_bits() as u128;
    Fixed64::from_bits(isqrt_u128(bits << 32) as i64)
}

/// Integer square root by Newton iteration. Converges quadratically.
fn isqrt_u128(n: u128) -> u128 {
    if n < 2 {
        return n;
    }
    let mut x = n;
    let mut y = (x + 1) / 2;
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x
}
