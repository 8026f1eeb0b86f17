//! Post-processing of simulated series
//!
//! Locates the active concentration window and derives exposure metrics
//! (peaks, AUCs, time spent in and above the window) from a
//! [`SimulationResult`].

pub mod calc;

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::simulator::options::{ConcentrationWindow, SimulationOptions};
use crate::simulator::SimulationResult;

/// Method for calculating AUC segments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AUCMethod {
    /// Linear trapezoidal rule: (C₁ + C₂) / 2 × Δt
    Linear,
    /// Linear for ascending segments, log-linear for descending ones
    #[default]
    LinUpLogDown,
}

/// A span of the time grid, given by inclusive sample indices
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start_index: usize,
    pub end_index: usize,
    /// Time (h) of the first sample in the window
    pub start: f64,
    /// Time (h) of the last sample in the window
    pub end: f64,
}

impl TimeWindow {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Span from the first to the last sample whose concentration lies in `window`
///
/// For a decaying profile the samples in between are all inside the window
/// too, so the span is contiguous. `None` if no sample is inside.
pub fn concentration_window(
    times: &Array1<f64>,
    concentrations: &Array1<f64>,
    window: &ConcentrationWindow,
) -> Option<TimeWindow> {
    let inside = |i: &usize| window.contains(concentrations[*i]);
    let first = (0..concentrations.len()).find(inside)?;
    let last = (0..concentrations.len()).rev().find(inside)?;
    Some(TimeWindow {
        start_index: first,
        end_index: last,
        start: times[first],
        end: times[last],
    })
}

/// Exposure metrics derived from one simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExposureSummary {
    /// Maximum concentration (mg/L)
    pub cmax: f64,
    /// Time of maximum concentration (h)
    pub tmax: f64,
    /// Area under the concentration curve over the grid (mg·h/L)
    pub auc_concentration: f64,
    /// Maximum effect
    pub effect_peak: f64,
    /// Time of maximum effect (h)
    pub effect_peak_time: f64,
    /// Area under the effect curve over the grid
    pub auc_effect: f64,
    /// Span where the concentration lies inside the active window
    pub window: Option<TimeWindow>,
    /// Total time (h) spent inside the active window
    pub time_in_window: f64,
    /// Total time (h) spent above the window's upper bound (excess effect)
    pub time_above_window: f64,
    /// Effect interpolated at the perceived-effect marker
    pub effect_at_perceived_limit: f64,
    /// Recommended daily intake for the subject's weight (mg)
    pub recommended_daily_intake: f64,
    /// Whether the single dose exceeds the recommended daily intake
    pub exceeds_daily_intake: bool,
}

/// Compute the [`ExposureSummary`] of a simulation
pub fn summarize(result: &SimulationResult, options: &SimulationOptions) -> ExposureSummary {
    let times = result.times().to_vec();
    let concentrations = result.concentrations().to_vec();
    let effects = result.effects().to_vec();

    // The grid always has at least two points
    let cmax_idx = calc::peak_index(&concentrations).unwrap_or(0);
    let emax_idx = calc::peak_index(&effects).unwrap_or(0);

    let window = concentration_window(result.times(), result.concentrations(), &options.window);
    let time_above_window = calc::time_above(&times, &concentrations, options.window.upper);
    let time_in_window = calc::time_above(&times, &concentrations, options.window.lower)
        - calc::time_above(&times, &concentrations, options.window.upper);

    let recommended_daily_intake = result.profile().recommended_daily_intake();
    if window.is_none() {
        tracing::warn!(
            lower = options.window.lower,
            upper = options.window.upper,
            "concentration never enters the active window"
        );
    }

    ExposureSummary {
        cmax: concentrations[cmax_idx],
        tmax: times[cmax_idx],
        auc_concentration: calc::auc(&times, &concentrations, options.auc_method),
        effect_peak: effects[emax_idx],
        effect_peak_time: times[emax_idx],
        auc_effect: calc::auc(&times, &effects, options.auc_method),
        window,
        time_in_window,
        time_above_window,
        effect_at_perceived_limit: calc::interpolate(
            &times,
            &effects,
            options.perceived_effect_limit,
        ),
        recommended_daily_intake,
        exceeds_daily_intake: result.intake().dose() > recommended_daily_intake,
    }
}
