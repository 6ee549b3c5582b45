use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{CardTransform, Size, Vector};

pub const TUNING_STORAGE_KEY: &str = "swipe_tuning";

/// Visual constants for dragging, throwing and respawning cards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeTuning {
    pub card_width: f64,
    pub card_height: f64,
    /// Horizontal drag at which rotation reaches its maximum.
    pub rotation_distance: f64,
    /// Max rotation is a full turn divided by this.
    pub rotation_divisor: f64,
    /// Scale shrinks by `|strength| / scale_divisor`.
    pub scale_divisor: f64,
    pub min_scale: f64,
    /// `|dx|` strictly above this dismisses the card.
    pub dismiss_threshold: f64,
    /// The throw moves the card horizontally by `dx * throw_multiplier`.
    pub throw_multiplier: f64,
    pub animation_secs: f64,
    pub respawn_delay_secs: f64,
    /// Distance a press must travel before a pan begins.
    pub pan_slop: f64,
}

impl Default for SwipeTuning {
    fn default() -> Self {
        Self {
            card_width: 200.0,
            card_height: 260.0,
            rotation_distance: 320.0,
            rotation_divisor: 16.0,
            scale_divisor: 4.0,
            min_scale: 0.93,
            dismiss_threshold: 150.0,
            throw_multiplier: 2.0,
            animation_secs: 0.2,
            respawn_delay_secs: 0.2,
            pan_slop: 4.0,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum TuningError {
    #[error("`{field}` must be a positive finite number, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("`{field}` must be a finite number >= 0, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("`min_scale` must be in (0, 1], got {0}")]
    MinScaleOutOfRange(f64),
    #[error("malformed tuning json: {0}")]
    Json(String),
}

/// Outcome the host picks for a finished drag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Outcome {
    /// Throw horizontally by this many pixels, then remove and respawn.
    Dismiss { throw_dx: f64 },
    Reset,
}

impl SwipeTuning {
    pub fn card_size(&self) -> Size {
        Size::new(self.card_width, self.card_height)
    }

    pub fn animation_ms(&self) -> u32 {
        secs_to_ms(self.animation_secs)
    }

    pub fn respawn_delay_ms(&self) -> u32 {
        secs_to_ms(self.respawn_delay_secs)
    }

    /// Live transform for a drag with cumulative `translation`.
    pub fn drag_transform(&self, translation: Vector) -> CardTransform {
        let strength = (translation.dx / self.rotation_distance).clamp(-1.0, 1.0);
        let rotation = 2.0 * std::f64::consts::PI * strength / self.rotation_divisor;
        let scale = (1.0 - strength.abs() / self.scale_divisor).max(self.min_scale);
        CardTransform { rotation, scale }
    }

    pub fn outcome_for(&self, distance: Vector) -> Outcome {
        if distance.dx.abs() > self.dismiss_threshold {
            Outcome::Dismiss {
                throw_dx: distance.dx * self.throw_multiplier,
            }
        } else {
            Outcome::Reset
        }
    }

    pub fn validate(self) -> Result<Self, TuningError> {
        let positive = [
            ("card_width", self.card_width),
            ("card_height", self.card_height),
            ("rotation_distance", self.rotation_distance),
            ("rotation_divisor", self.rotation_divisor),
            ("scale_divisor", self.scale_divisor),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(TuningError::NotPositive { field, value });
            }
        }
        let non_negative = [
            ("dismiss_threshold", self.dismiss_threshold),
            ("throw_multiplier", self.throw_multiplier),
            ("animation_secs", self.animation_secs),
            ("respawn_delay_secs", self.respawn_delay_secs),
            ("pan_slop", self.pan_slop),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(TuningError::Negative { field, value });
            }
        }
        if !(self.min_scale > 0.0 && self.min_scale <= 1.0) {
            return Err(TuningError::MinScaleOutOfRange(self.min_scale));
        }
        Ok(self)
    }

    pub fn from_json(raw: &str) -> Result<Self, TuningError> {
        serde_json::from_str::<SwipeTuning>(raw)
            .map_err(|e| TuningError::Json(e.to_string()))?
            .validate()
    }
}

fn secs_to_ms(secs: f64) -> u32 {
    (secs * 1000.0).round().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn no_horizontal_drag_means_identity() {
        let t = SwipeTuning::default();
        assert_eq!(t.drag_transform(Vector::new(0.0, 0.0)), CardTransform::IDENTITY);
        assert_eq!(t.drag_transform(Vector::new(0.0, 180.0)), CardTransform::IDENTITY);
    }

    #[test]
    fn transform_stays_bounded() {
        let t = SwipeTuning::default();
        let max_angle = 2.0 * PI / 16.0;
        let mut dx = -320.0;
        while dx <= 320.0 {
            let tr = t.drag_transform(Vector::new(dx, 37.0));
            assert!(tr.rotation.abs() <= max_angle + 1e-12, "dx={dx}");
            assert!((0.93..=1.0).contains(&tr.scale), "dx={dx}");
            dx += 7.5;
        }
    }

    #[test]
    fn strength_clamps_beyond_rotation_distance() {
        let t = SwipeTuning::default();
        let far_right = t.drag_transform(Vector::new(5000.0, 0.0));
        let far_left = t.drag_transform(Vector::new(-5000.0, 0.0));
        assert!(close(far_right.rotation, PI / 8.0));
        assert!(close(far_left.rotation, -PI / 8.0));
        assert!(close(far_left.scale, 0.93));
    }

    #[test]
    fn throw_scenario_values() {
        let t = SwipeTuning::default();
        let tr = t.drag_transform(Vector::new(200.0, 0.0));
        assert!(close(tr.rotation, 2.0 * PI * 0.625 / 16.0));
        assert!((tr.rotation - 0.245).abs() < 1e-3);
        assert!(close(tr.scale, 0.93));
    }

    #[test]
    fn small_drag_scales_linearly() {
        let t = SwipeTuning::default();
        let tr = t.drag_transform(Vector::new(32.0, 0.0));
        assert!(close(tr.scale, 1.0 - 0.1 / 4.0));
    }

    #[test]
    fn outcome_threshold_is_strict() {
        let t = SwipeTuning::default();
        assert_eq!(t.outcome_for(Vector::new(150.0, 0.0)), Outcome::Reset);
        assert_eq!(t.outcome_for(Vector::new(-150.0, 90.0)), Outcome::Reset);
        assert_eq!(
            t.outcome_for(Vector::new(150.5, 0.0)),
            Outcome::Dismiss { throw_dx: 301.0 }
        );
        assert_eq!(
            t.outcome_for(Vector::new(-200.0, 0.0)),
            Outcome::Dismiss { throw_dx: -400.0 }
        );
    }

    #[test]
    fn partial_json_uses_defaults() {
        let t = SwipeTuning::from_json(r#"{ "dismiss_threshold": 90 }"#).unwrap();
        assert_eq!(t.dismiss_threshold, 90.0);
        assert_eq!(t.card_size(), Size::new(200.0, 260.0));
        assert_eq!(t.animation_ms(), 200);
    }

    #[test]
    fn rejects_bad_values() {
        let err = SwipeTuning::from_json(r#"{ "rotation_distance": 0 }"#).unwrap_err();
        assert_eq!(
            err,
            TuningError::NotPositive {
                field: "rotation_distance",
                value: 0.0
            }
        );
        let err = SwipeTuning::from_json(r#"{ "min_scale": 1.5 }"#).unwrap_err();
        assert_eq!(err, TuningError::MinScaleOutOfRange(1.5));
        let err = SwipeTuning::from_json(r#"{ "respawn_delay_secs": -1 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Negative { field: "respawn_delay_secs", .. }));
        assert!(matches!(
            SwipeTuning::from_json("not json"),
            Err(TuningError::Json(_))
        ));
    }
}
