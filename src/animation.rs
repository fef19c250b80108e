//! Timing data read from a Lottie animation description.
//!
//! The sidebar graphic is drawn natively; the fetched document only supplies
//! its frame rate, frame range and canvas size.

use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum AnimationError {
    #[error("descripción de animación inválida: {0}")]
    Invalid(#[from] serde_json::Error),
    #[error("la animación no tiene fotogramas")]
    Empty,
}

#[derive(Debug, Deserialize)]
struct LottieHeader {
    #[serde(rename = "fr")]
    frame_rate: f64,
    #[serde(rename = "ip")]
    in_point: f64,
    #[serde(rename = "op")]
    out_point: f64,
    #[serde(rename = "w")]
    width: f64,
    #[serde(rename = "h")]
    height: f64,
    #[serde(default)]
    layers: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationInfo {
    pub frame_rate: f64,
    pub in_point: f64,
    pub out_point: f64,
    pub width: f64,
    pub height: f64,
    pub layer_count: usize,
}

impl AnimationInfo {
    pub fn from_json(value: serde_json::Value) -> Result<Self, AnimationError> {
        let header: LottieHeader = serde_json::from_value(value)?;
        if header.frame_rate <= 0.0 || header.out_point <= header.in_point {
            return Err(AnimationError::Empty);
        }
        Ok(Self {
            frame_rate: header.frame_rate,
            in_point: header.in_point,
            out_point: header.out_point,
            width: header.width,
            height: header.height,
            layer_count: header.layers.len(),
        })
    }

    /// Length of one loop in seconds at normal speed.
    pub fn duration_secs(&self) -> f64 {
        (self.out_point - self.in_point) / self.frame_rate
    }

    /// Loop progress in `[0, 1)` after `time_secs` at `speed`x playback.
    pub fn phase_at(&self, time_secs: f64, speed: f64) -> f64 {
        let period = self.duration_secs() / speed.max(f64::EPSILON);
        (time_secs / period).rem_euclid(1.0)
    }

    pub fn aspect_ratio(&self) -> f64 {
        if self.height > 0.0 { self.width / self.height } else { 1.0 }
    }
}
