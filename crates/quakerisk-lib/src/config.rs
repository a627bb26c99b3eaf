//! Analysis configuration.
//!
//! Defaults select the magnitude-scaled circle model with a three-day
//! lookback. A configuration can be read from JSON; absent fields keep their
//! defaults.

use std::fs;
use std::path::Path;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::impact::{
    FixedMultiplierBuffer, ImpactModel, ImpactModelKind, MagnitudeScaledCircle,
    DEFAULT_BUFFER_STEPS, DEFAULT_CIRCLE_STEPS, DEFAULT_KM_PER_MAGNITUDE,
};
use crate::window::DEFAULT_LOOKBACK_HOURS;

/// Tunables for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Which impact-area model to apply.
    pub model: ImpactModelKind,
    /// Width of the earthquake time window in hours.
    pub lookback_hours: i64,
    /// Polygon vertices for the magnitude-scaled circle.
    pub circle_steps: usize,
    /// Polygon vertices for the legacy buffer.
    pub buffer_steps: usize,
    /// Radius per magnitude unit for the legacy buffer, in kilometres.
    pub km_per_magnitude: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            model: ImpactModelKind::default(),
            lookback_hours: DEFAULT_LOOKBACK_HOURS,
            circle_steps: DEFAULT_CIRCLE_STEPS,
            buffer_steps: DEFAULT_BUFFER_STEPS,
            km_per_magnitude: DEFAULT_KM_PER_MAGNITUDE,
        }
    }
}

impl AnalysisConfig {
    /// Read and validate a JSON configuration file.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::InputNotFound {
                path: path.to_path_buf(),
            });
        }
        let contents = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_model(mut self, model: ImpactModelKind) -> Self {
        self.model = model;
        self
    }

    pub fn with_lookback_hours(mut self, hours: i64) -> Self {
        self.lookback_hours = hours;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.lookback_hours < 0 {
            return Err(Error::InvalidConfig {
                message: format!(
                    "lookback_hours must not be negative (got {})",
                    self.lookback_hours
                ),
            });
        }
        for (steps, field) in [
            (self.circle_steps, "circle_steps"),
            (self.buffer_steps, "buffer_steps"),
        ] {
            if steps < 3 {
                return Err(Error::InvalidConfig {
                    message: format!("{field} must be at least 3 (got {steps})"),
                });
            }
        }
        if !self.km_per_magnitude.is_finite() || self.km_per_magnitude <= 0.0 {
            return Err(Error::InvalidConfig {
                message: "km_per_magnitude must be a finite positive number".to_string(),
            });
        }
        Ok(())
    }

    pub fn lookback(&self) -> Duration {
        Duration::hours(self.lookback_hours)
    }

    /// Instantiate the configured impact model.
    pub fn impact_model(&self) -> Box<dyn ImpactModel> {
        match self.model {
            ImpactModelKind::MagnitudeScaled => Box::new(MagnitudeScaledCircle {
                steps: self.circle_steps,
            }),
            ImpactModelKind::FixedMultiplier => Box::new(FixedMultiplierBuffer {
                km_per_magnitude: self.km_per_magnitude,
                steps: self.buffer_steps,
            }),
        }
    }
}
