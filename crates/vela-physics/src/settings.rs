// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Tunable simulation settings shared by every body in a scene.

use serde::{Deserialize, Serialize};
use vela_math::Vec3;

use crate::error::{SceneError, SceneResult};

/// Scene-wide physics tunables.
///
/// Missing fields fall back to [`PhysicsSettings::default`] when loaded from
/// JSON, so partial files are valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    /// Gravity acceleration handed to new rigid bodies (m/s²).
    pub gravity: [f32; 3],
    /// Residual normal speed below which a floor/ceiling contact is treated
    /// as resting and its normal velocity is snapped to zero.
    pub contact_epsilon: f32,
    /// Speed and acceleration magnitude below which a contacting body sleeps
    /// for the rest of the step.
    pub sleep_epsilon: f32,
    /// Largest delta time accepted by a single frame; longer frames are
    /// clamped.
    pub max_delta_time: f32,
    /// `|normal.y|` above which a contact counts as floor/ceiling.
    pub vertical_normal_threshold: f32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            gravity: [0.0, -9.81, 0.0],
            contact_epsilon: 1e-4,
            sleep_epsilon: 1e-4,
            max_delta_time: 0.25,
            vertical_normal_threshold: 0.5,
        }
    }
}

impl PhysicsSettings {
    /// Gravity as a vector.
    pub fn gravity(&self) -> Vec3 {
        Vec3::from(self.gravity)
    }

    /// Checks every field against its allowed range.
    pub fn validate(&self) -> SceneResult<()> {
        if !Vec3::from(self.gravity).is_finite() {
            return Err(SceneError::Settings(format!(
                "gravity must be finite, got {:?}",
                self.gravity
            )));
        }
        for (name, value) in [
            ("contact_epsilon", self.contact_epsilon),
            ("sleep_epsilon", self.sleep_epsilon),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SceneError::Settings(format!(
                    "{name} must be finite and >= 0, got {value}"
                )));
            }
        }
        if !(self.max_delta_time.is_finite() && self.max_delta_time > 0.0) {
            return Err(SceneError::Settings(format!(
                "max_delta_time must be finite and > 0, got {}",
                self.max_delta_time
            )));
        }
        if !(0.0..=1.0).contains(&self.vertical_normal_threshold) {
            return Err(SceneError::Settings(format!(
                "vertical_normal_threshold must lie in [0, 1], got {}",
                self.vertical_normal_threshold
            )));
        }
        Ok(())
    }

    /// Parses and validates settings from JSON.
    pub fn from_json_str(json: &str) -> SceneResult<Self> {
        let settings: Self =
            serde_json::from_str(json).map_err(|e| SceneError::Settings(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialises settings as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> SceneResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SceneError::Settings(e.to_string()))
    }
}
