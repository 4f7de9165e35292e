//! Swept-region geometry for continuous collision detection
//!
//! The saber sweeps a quadrilateral over one step and a ball sweeps a
//! segment. Overlap between the quad and the segment inflated by the ball
//! radius (a capsule) is decided with a separating-axis test.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::vector::VecExt;
use crate::consts::EPSILON;

/// Linear motion of a point over one step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

impl Segment {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn delta(&self) -> Vec2 {
        self.end - self.start
    }

    #[inline]
    pub fn midpoint(&self) -> Vec2 {
        (self.start + self.end) * 0.5
    }
}

/// Four vertices of a swept region, in cyclic order once wound
pub type Quad = [Vec2; 4];

/// Order four points into a simple (non self-intersecting) cycle.
///
/// The points are the endpoints of two moving segments, in no particular
/// order. The result is consistent but its orientation (clockwise or
/// counter-clockwise) depends on the input. Collinear input yields an
/// arbitrary order.
pub fn wind_quad(v1: Vec2, v2: Vec2, v3: Vec2, v4: Vec2) -> Quad {
    let n12 = (v2 - v1).orth();
    let d3 = n12.dot(v3 - v1);
    let d4 = n12.dot(v4 - v1);

    if d3 >= 0.0 && d4 >= 0.0 {
        // v1 -> v2 is an edge with the rest on its positive side
        if (v3 - v2).orth().dot(v4 - v2) >= 0.0 {
            [v1, v2, v3, v4]
        } else {
            [v1, v2, v4, v3]
        }
    } else if d3 <= 0.0 && d4 <= 0.0 {
        // v2 -> v1 closes the cycle
        if (v3 - v1).orth().dot(v4 - v1) >= 0.0 {
            [v1, v3, v4, v2]
        } else {
            [v1, v4, v3, v2]
        }
    } else if d3 > d4 {
        // v1 -> v2 is a diagonal
        [v1, v4, v2, v3]
    } else {
        [v1, v3, v2, v4]
    }
}

/// Twice the signed area (positive when counter-clockwise in y-up terms)
fn signed_area2(quad: &Quad) -> f32 {
    (0..4)
        .map(|i| {
            let a = quad[i];
            let b = quad[(i + 1) % 4];
            a.perp_dot(b)
        })
        .sum()
}

/// Does the wound `quad` overlap `seg` inflated by `radius`?
///
/// Tests the segment's own normal and the four outward edge normals of the
/// quad. The segment axis is skipped when the segment is shorter than
/// `EPSILON`.
pub fn quad_segment_intersect(quad: &Quad, seg: &Segment, radius: f32) -> bool {
    let delta = seg.delta();
    if delta.length() > EPSILON {
        let axis = delta.unit().orth();
        let (min, max) = quad.iter().fold((f32::MAX, f32::MIN), |(lo, hi), v| {
            let d = axis.dot(*v - seg.start);
            (lo.min(d), hi.max(d))
        });
        if min > radius || max < -radius {
            return false;
        }
    }

    // `orth` of an edge points inward for negative area, outward otherwise
    let outward_sign = if signed_area2(quad) < 0.0 { -1.0 } else { 1.0 };

    for i in 0..4 {
        let a = quad[i];
        let b = quad[(i + 1) % 4];
        let normal = (b - a).orth().unit() * outward_sign;
        let d = normal.dot(seg.start - a).min(normal.dot(seg.end - a));
        if d > radius {
            return false;
        }
    }

    true
}
