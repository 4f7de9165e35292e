//! Data-driven game balance
//!
//! Defaults come from `consts`. A host can override any subset of fields
//! with a JSON document.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Balance parameters for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration (pixels/s²)
    pub gravity: f32,

    // === Saber ===
    pub blade_length: f32,
    pub saber_angular_drag: f32,
    /// Cooldown after the hilt is hit (seconds)
    pub hurt_duration: f32,

    // === Balls ===
    pub ball_radius: f32,
    pub ball_drag: f32,
    pub dying_drag_factor: f32,
    pub dying_duration: f32,
    pub ball_max_health: u8,
    pub respawn_speed: f32,
    pub damage_threshold: f32,

    // === Session ===
    pub max_balls: usize,
    pub initial_balls: usize,
    pub ball_unlock_every: u64,
    pub life_every: u64,
    pub start_lives: u8,
    pub max_lives: u8,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,

            blade_length: BLADE_LENGTH,
            saber_angular_drag: SABER_ANGULAR_DRAG,
            hurt_duration: HURT_DURATION,

            ball_radius: BALL_RADIUS,
            ball_drag: BALL_DRAG,
            dying_drag_factor: DYING_DRAG_FACTOR,
            dying_duration: DYING_DURATION,
            ball_max_health: BALL_MAX_HEALTH,
            respawn_speed: RESPAWN_SPEED,
            damage_threshold: DAMAGE_THRESHOLD,

            max_balls: MAX_BALLS,
            initial_balls: INITIAL_BALLS,
            ball_unlock_every: BALL_UNLOCK_EVERY,
            life_every: LIFE_EVERY,
            start_lives: START_LIVES,
            max_lives: MAX_LIVES,
        }
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> TuningError {
    TuningError::Invalid {
        field,
        reason: reason.into(),
    }
}

impl Tuning {
    /// Parse and validate a JSON document; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("blade_length", self.blade_length),
            ("ball_radius", self.ball_radius),
            ("dying_duration", self.dying_duration),
            ("damage_threshold", self.damage_threshold),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(field, format!("must be finite and > 0, got {value}")));
            }
        }

        let non_negative = [
            ("gravity", self.gravity),
            ("saber_angular_drag", self.saber_angular_drag),
            ("hurt_duration", self.hurt_duration),
            ("ball_drag", self.ball_drag),
            ("dying_drag_factor", self.dying_drag_factor),
            ("respawn_speed", self.respawn_speed),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(field, format!("must be finite and >= 0, got {value}")));
            }
        }

        if self.ball_max_health == 0 {
            return Err(invalid("ball_max_health", "must be at least 1"));
        }
        if self.max_balls > MAX_BALLS {
            return Err(invalid("max_balls", format!("at most {MAX_BALLS}")));
        }
        if self.initial_balls > self.max_balls {
            return Err(invalid("initial_balls", "exceeds max_balls"));
        }
        if self.ball_unlock_every == 0 {
            return Err(invalid("ball_unlock_every", "must be at least 1"));
        }
        if self.life_every == 0 {
            return Err(invalid("life_every", "must be at least 1"));
        }
        if self.start_lives == 0 || self.start_lives > self.max_lives {
            return Err(invalid("start_lives", "must be in 1..=max_lives"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 500.0, "initial_balls": 3 }"#).unwrap();
        assert_eq!(tuning.gravity, 500.0);
        assert_eq!(tuning.initial_balls, 3);
        assert_eq!(tuning.blade_length, BLADE_LENGTH);
    }

    #[test]
    fn test_json_round_trip() {
        let tuning = Tuning {
            damage_threshold: 750.0,
            ..Tuning::default()
        };
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Tuning::from_json(r#"{ "ball_radius": -1.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "ball_radius", .. }));

        let err = Tuning::from_json(r#"{ "initial_balls": 5, "max_balls": 2 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "initial_balls", .. }));

        let err = Tuning::from_json(r#"{ "life_every": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "life_every", .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Tuning::from_json("{ gravity: ").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
        assert!(err.to_string().starts_with("failed to parse"));
    }
}
