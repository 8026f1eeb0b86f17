//! Simulation configuration
//!
//! Every field has a default matching the reference caffeine model, so an
//! options file only needs the values it changes:
//!
//! ```json
//! { "parameters": { "emax": 1.0, "ec50": 2.5 }, "grid": { "points": 1000 } }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::AUCMethod;
use crate::data::{ModelParameters, TimeGrid};
use crate::error::CaffsimError;

/// Average perceived duration (h) of a single caffeine intake, from a user survey
pub const PERCEIVED_EFFECT_LIMIT: f64 = 3.17925;

/// Sampling grid configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridOptions {
    /// First time point (h)
    pub start: f64,
    /// Last time point (h), included
    pub end: f64,
    /// Number of time points
    pub points: usize,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: 12.0,
            points: 500,
        }
    }
}

impl GridOptions {
    pub fn build(&self) -> Result<TimeGrid, CaffsimError> {
        TimeGrid::new(self.start, self.end, self.points)
    }
}

/// Concentration band (mg/L) in which caffeine is considered active
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConcentrationWindow {
    pub lower: f64,
    pub upper: f64,
}

impl Default for ConcentrationWindow {
    fn default() -> Self {
        Self {
            lower: 1.0,
            upper: 3.0,
        }
    }
}

impl ConcentrationWindow {
    /// Inclusive on both bounds
    #[inline]
    pub fn contains(&self, concentration: f64) -> bool {
        concentration >= self.lower && concentration <= self.upper
    }

    pub fn validate(&self) -> Result<(), CaffsimError> {
        if !self.lower.is_finite() || self.lower < 0.0 {
            return Err(CaffsimError::domain(
                "window.lower",
                self.lower,
                "must be finite and non-negative",
            ));
        }
        if !self.upper.is_finite() || self.upper < self.lower {
            return Err(CaffsimError::domain(
                "window.upper",
                self.upper,
                "must be finite and not below the lower bound",
            ));
        }
        Ok(())
    }
}

/// Complete simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationOptions {
    /// Emax model parameters (default: Emax 1.0, EC50 2.0)
    pub parameters: ModelParameters,

    /// Sampling grid (default: 500 points over [0, 12] h)
    pub grid: GridOptions,

    /// Active concentration band (default: [1, 3] mg/L)
    pub window: ConcentrationWindow,

    /// Time (h) of the perceived-effect reference marker
    pub perceived_effect_limit: f64,

    /// Effect axis range used for chart output
    pub effect_limits: (f64, f64),

    /// Method used for the exposure AUCs (default: LinUpLogDown)
    pub auc_method: AUCMethod,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            parameters: ModelParameters::default(),
            grid: GridOptions::default(),
            window: ConcentrationWindow::default(),
            perceived_effect_limit: PERCEIVED_EFFECT_LIMIT,
            effect_limits: (0.0, 0.7),
            auc_method: AUCMethod::LinUpLogDown,
        }
    }
}

impl SimulationOptions {
    /// Parse options from a JSON document; missing fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self, CaffsimError> {
        let options: SimulationOptions = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Read options from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CaffsimError> {
        let contents = fs::read_to_string(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), "loaded simulation options");
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<(), CaffsimError> {
        self.parameters.validate()?;
        self.window.validate()?;
        self.grid.build()?;
        if !self.perceived_effect_limit.is_finite() {
            return Err(CaffsimError::domain(
                "perceived_effect_limit",
                self.perceived_effect_limit,
                "must be finite",
            ));
        }
        Ok(())
    }

    pub fn with_parameters(mut self, parameters: ModelParameters) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_emax(mut self, emax: f64) -> Self {
        self.parameters.emax = emax;
        self
    }

    pub fn with_ec50(mut self, ec50: f64) -> Self {
        self.parameters.ec50 = ec50;
        self
    }

    pub fn with_grid(mut self, start: f64, end: f64, points: usize) -> Self {
        self.grid = GridOptions { start, end, points };
        self
    }

    pub fn with_points(mut self, points: usize) -> Self {
        self.grid.points = points;
        self
    }

    pub fn with_window(mut self, lower: f64, upper: f64) -> Self {
        self.window = ConcentrationWindow { lower, upper };
        self
    }

    pub fn with_perceived_effect_limit(mut self, hours: f64) -> Self {
        self.perceived_effect_limit = hours;
        self
    }

    pub fn with_auc_method(mut self, method: AUCMethod) -> Self {
        self.auc_method = method;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_model() {
        let opts = SimulationOptions::default();
        assert_eq!(opts.parameters, ModelParameters::new(1.0, 2.0));
        assert_eq!(opts.grid.points, 500);
        assert_eq!(opts.window, ConcentrationWindow { lower: 1.0, upper: 3.0 });
        assert_eq!(opts.perceived_effect_limit, 3.17925);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let opts =
            SimulationOptions::from_json_str(r#"{ "parameters": { "emax": 1.5, "ec50": 2.5 }, "grid": { "points": 100 } }"#)
                .unwrap();
        assert_eq!(opts.parameters.emax, 1.5);
        assert_eq!(opts.parameters.ec50, 2.5);
        assert_eq!(opts.grid.points, 100);
        assert_eq!(opts.grid.end, 12.0);
        assert_eq!(opts.window, ConcentrationWindow::default());
        assert_eq!(opts.auc_method, AUCMethod::LinUpLogDown);
    }

    #[test]
    fn invalid_json_values_are_rejected() {
        let err = SimulationOptions::from_json_str(r#"{ "parameters": { "emax": 1.0, "ec50": 0.0 } }"#)
            .unwrap_err();
        assert!(err.is_invalid_domain());

        let err = SimulationOptions::from_json_str(r#"{ "window": { "lower": 3.0, "upper": 1.0 } }"#)
            .unwrap_err();
        assert!(err.is_invalid_domain());

        let err = SimulationOptions::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, CaffsimError::Json(_)));
    }

    #[test]
    fn builder_overrides() {
        let opts = SimulationOptions::default()
            .with_emax(2.0)
            .with_ec50(4.0)
            .with_points(50)
            .with_window(0.5, 2.0)
            .with_auc_method(AUCMethod::Linear);
        assert_eq!(opts.parameters, ModelParameters::new(2.0, 4.0));
        assert_eq!(opts.grid.points, 50);
        assert_eq!(opts.window.upper, 2.0);
        assert_eq!(opts.auc_method, AUCMethod::Linear);

        let opts = SimulationOptions::default()
            .with_parameters(ModelParameters::new(1.5, 2.5))
            .with_grid(0.0, 6.0, 25)
            .with_perceived_effect_limit(4.0);
        assert_eq!(opts.parameters, ModelParameters::new(1.5, 2.5));
        assert_eq!(
            opts.grid,
            GridOptions {
                start: 0.0,
                end: 6.0,
                points: 25
            }
        );
        assert_eq!(opts.perceived_effect_limit, 4.0);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn window_is_inclusive() {
        let w = ConcentrationWindow::default();
        assert!(w.contains(1.0));
        assert!(w.contains(3.0));
        assert!(!w.contains(3.0000001));
        assert!(!w.contains(0.999));
    }
}
