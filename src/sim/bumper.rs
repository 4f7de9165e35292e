//! Static reflective wedges
//!
//! A bumper is a convex polygon whose first edge is the reflective face.
//! Penetration is measured against the infinite line through that face,
//! which is exact for wedges tucked into the arena corners.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Arena;
use super::vector::VecExt;

/// Something a ball can bounce off
pub trait Obstacle {
    /// Signed distance of a circle of `radius` at `point` past the surface.
    /// Positive means penetrating.
    fn penetration(&self, point: Vec2, radius: f32) -> f32;

    /// Unit normal pointing into the obstacle
    fn normal(&self) -> Vec2;

    /// Velocity after bouncing: tangential part kept, normal part negated
    fn reflect(&self, velocity: Vec2) -> Vec2;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bumper {
    /// Unit normal pointing from the face into the solid
    pub normal: Vec2,
    /// Unit tangent along the face
    pub tangent: Vec2,
    pub vertices: Vec<Vec2>,
}

impl Bumper {
    /// Build a bumper from a convex polygon whose first edge is the face
    ///
    /// # Panics
    ///
    /// Panics if the polygon has fewer than 3 vertices.
    pub fn from_polygon(vertices: Vec<Vec2>) -> Self {
        assert!(
            vertices.len() >= 3,
            "bumper polygon needs at least 3 vertices, got {}",
            vertices.len()
        );
        let face = vertices[1] - vertices[0];
        let centroid = vertices.iter().copied().sum::<Vec2>() / vertices.len() as f32;
        let mut normal = face.orth().unit();
        if normal.dot(centroid - vertices[0]) < 0.0 {
            normal = -normal;
        }
        Self {
            normal,
            tangent: normal.orth(),
            vertices,
        }
    }

    /// Two triangular wedges filling the lower corners of the arena
    pub fn corner_wedges(arena: &Arena) -> Vec<Bumper> {
        let (w, h) = (arena.width, arena.height);
        vec![
            Bumper::from_polygon(vec![
                Vec2::new(0.0, h * 0.75),
                Vec2::new(w * 0.25, h),
                Vec2::new(0.0, h),
            ]),
            Bumper::from_polygon(vec![
                Vec2::new(w * 0.75, h),
                Vec2::new(w, h * 0.75),
                Vec2::new(w, h),
            ]),
        ]
    }

    /// Reference point for signed distances
    #[inline]
    pub fn origin(&self) -> Vec2 {
        self.vertices[0]
    }
}

impl Obstacle for Bumper {
    fn penetration(&self, point: Vec2, radius: f32) -> f32 {
        (point - self.origin()).dot(self.normal) + radius
    }

    fn normal(&self) -> Vec2 {
        self.normal
    }

    fn reflect(&self, velocity: Vec2) -> Vec2 {
        self.tangent * velocity.dot(self.tangent) - self.normal * velocity.dot(self.normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_points_into_solid() {
        let arena = Arena::new(800.0, 600.0);
        for b in Bumper::corner_wedges(&arena) {
            let centroid = b.vertices.iter().copied().sum::<Vec2>() / 3.0;
            assert!(b.penetration(centroid, 0.0) > 0.0);
            assert!(b.penetration(arena.center(), 0.0) < 0.0);
            assert!((b.normal.length() - 1.0).abs() < 1e-5);
            assert!(b.normal.dot(b.tangent).abs() < 1e-5);
        }
    }

    #[test]
    fn test_reflect_negates_normal_component() {
        let b = Bumper::from_polygon(vec![
            Vec2::new(0.0, 100.0),
            Vec2::new(100.0, 100.0),
            Vec2::new(50.0, 150.0),
        ]);
        assert!((b.normal - Vec2::new(0.0, 1.0)).length() < 1e-6);
        let v = b.reflect(Vec2::new(30.0, 40.0));
        assert!((v - Vec2::new(30.0, -40.0)).length() < 1e-4);
    }

    #[test]
    #[should_panic(expected = "at least 3 vertices")]
    fn test_degenerate_polygon_rejected() {
        Bumper::from_polygon(vec![Vec2::ZERO, Vec2::X]);
    }

    #[test]
    fn test_penetration_includes_radius() {
        let b = Bumper::from_polygon(vec![
            Vec2::new(0.0, 100.0),
            Vec2::new(100.0, 100.0),
            Vec2::new(50.0, 150.0),
        ]);
        assert!((b.penetration(Vec2::new(50.0, 95.0), 10.0) - 5.0).abs() < 1e-5);
        assert!(b.penetration(Vec2::new(50.0, 80.0), 10.0) < 0.0);
    }
}
