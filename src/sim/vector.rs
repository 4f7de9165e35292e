//! Vector helpers on top of glam
//!
//! glam already covers add/sub/scale/negate/dot/length through operators.
//! The few operations the simulation needs in a specific form live here.

use glam::Vec2;

/// Extra 2D vector operations used by the saber/ball kernel
pub trait VecExt {
    /// Unit vector, or the zero vector when length is zero
    fn unit(self) -> Self;
    /// Quarter turn: (x, y) -> (y, -x)
    fn orth(self) -> Self;
    /// Rotate by `angle` radians
    fn rotate_by(self, angle: f32) -> Self;
}

impl VecExt for Vec2 {
    #[inline]
    fn unit(self) -> Self {
        let len = self.length();
        if len == 0.0 { self } else { self * (1.0 / len) }
    }

    #[inline]
    fn orth(self) -> Self {
        Vec2::new(self.y, -self.x)
    }

    #[inline]
    fn rotate_by(self, angle: f32) -> Self {
        Vec2::from_angle(angle).rotate(self)
    }
}
