//! 2D float vector used for every size, point and scale factor in the view.
//!
//! `Vec2` is a value type: every operation returns a new instance. Arithmetic
//! is component-wise against another `Vec2`, or broadcast against an `f64`.
//! Rounding goes through [`f64::round`], i.e. halves round away from zero;
//! this is the single place continuous layout becomes pixel coordinates.

use std::ops::{Add, Div, Mul, Sub};

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const fn splat(v: f64) -> Self {
        Self { x: v, y: v }
    }

    /// Checked constructor for values arriving from the host.
    pub fn try_new(x: f64, y: f64) -> Result<Self, Error> {
        if !x.is_finite() || !y.is_finite() {
            return Err(Error::InvalidOperand { op: "Vec2::try_new", got: "non-finite f64" });
        }
        Ok(Self { x, y })
    }

    /// Component-wise floor division (`//`).
    pub fn floor_div(self, rhs: impl Into<Vec2>) -> Vec2 {
        let rhs = rhs.into();
        Vec2::new((self.x / rhs.x).floor(), (self.y / rhs.y).floor())
    }

    pub fn round(self) -> Vec2 {
        Vec2::new(self.x.round(), self.y.round())
    }

    /// Width over height. A zero height has no ratio.
    pub fn ratio(self) -> Result<f64, Error> {
        if self.y == 0.0 {
            return Err(Error::DegenerateRect);
        }
        Ok(self.x / self.y)
    }

    pub fn min(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x.min(other.x), self.y.min(other.y))
    }

    pub fn max(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x.max(other.x), self.y.max(other.y))
    }

    /// Rounded components as integers, for handing to pixel APIs.
    pub fn to_i64(self) -> (i64, i64) {
        let r = self.round();
        (r.x as i64, r.y as i64)
    }
}

impl From<(f64, f64)> for Vec2 {
    fn from((x, y): (f64, f64)) -> Self {
        Vec2::new(x, y)
    }
}

impl From<f64> for Vec2 {
    fn from(v: f64) -> Self {
        Vec2::splat(v)
    }
}

// One impl per operator covers both Vec2 and scalar right-hand sides.
macro_rules! componentwise {
    ($trait:ident, $method:ident, $op:tt) => {
        impl<T: Into<Vec2>> $trait<T> for Vec2 {
            type Output = Vec2;

            fn $method(self, rhs: T) -> Vec2 {
                let rhs = rhs.into();
                Vec2::new(self.x $op rhs.x, self.y $op rhs.y)
            }
        }
    };
}

componentwise!(Add, add, +);
componentwise!(Sub, sub, -);
componentwise!(Mul, mul, *);
componentwise!(Div, div, /);
