//! Deterministic simulation module
//!
//! All gameplay logic lives here. Given the same seed, anchor positions and
//! timesteps, a run is reproducible:
//! - Seeded RNG only
//! - Stable iteration order (ball slot index)
//! - No rendering or platform dependencies

pub mod ball;
pub mod bumper;
pub mod collision;
pub mod geometry;
pub mod saber;
pub mod state;
pub mod tick;
pub mod vector;

pub use ball::Ball;
pub use bumper::{Bumper, Obstacle};
pub use collision::{BallContact, resolve_ball, touches_hilt};
pub use geometry::{Quad, Segment, quad_segment_intersect, wind_quad};
pub use saber::{Saber, Sweep};
pub use state::{Arena, GamePhase, GameState, Session};
pub use tick::tick;
pub use vector::VecExt;
