pub mod options;
pub mod pd;
pub mod pk;

use ndarray::Array1;

use crate::analysis::{self, ExposureSummary, TimeWindow};
use crate::data::{IntakePlan, ModelParameters, SimulationRequest, SubjectProfile, TimeGrid};
use crate::error::CaffsimError;
use options::{ConcentrationWindow, SimulationOptions};

/// Everything computed for one simulation run
///
/// The series are co-indexed with [`SimulationResult::times`].
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    profile: SubjectProfile,
    intake: IntakePlan,
    parameters: ModelParameters,
    times: Array1<f64>,
    concentrations: Array1<f64>,
    effects: Array1<f64>,
    half_life: f64,
    intake_sensitivity: f64,
    receptor_sensitivity: f64,
}

impl SimulationResult {
    pub fn profile(&self) -> &SubjectProfile {
        &self.profile
    }

    pub fn intake(&self) -> &IntakePlan {
        &self.intake
    }

    pub fn parameters(&self) -> &ModelParameters {
        &self.parameters
    }

    /// Sampling times (h)
    pub fn times(&self) -> &Array1<f64> {
        &self.times
    }

    /// Plasma concentrations (mg/L)
    pub fn concentrations(&self) -> &Array1<f64> {
        &self.concentrations
    }

    pub fn effects(&self) -> &Array1<f64> {
        &self.effects
    }

    /// Elimination half-life (h)
    pub fn half_life(&self) -> f64 {
        self.half_life
    }

    /// T(n), the tolerance factor for the weekly intake count
    pub fn intake_sensitivity(&self) -> f64 {
        self.intake_sensitivity
    }

    /// g(age), the receptor sensitivity factor
    pub fn receptor_sensitivity(&self) -> f64 {
        self.receptor_sensitivity
    }

    /// Time span over which the concentration lies inside `window`
    pub fn concentration_window(&self, window: &ConcentrationWindow) -> Option<TimeWindow> {
        analysis::concentration_window(&self.times, &self.concentrations, window)
    }

    /// Exposure metrics of the concentration and effect curves
    pub fn summarize(&self, options: &SimulationOptions) -> ExposureSummary {
        analysis::summarize(self, options)
    }
}

/// Evaluate the PK-PD model for one subject over a time grid
///
/// Inputs are validated first; any degenerate value is reported as
/// [`CaffsimError::InvalidDomain`] and no series is computed.
pub fn run_simulation(
    profile: &SubjectProfile,
    intake: &IntakePlan,
    parameters: &ModelParameters,
    grid: &TimeGrid,
) -> Result<SimulationResult, CaffsimError> {
    profile.validate()?;
    intake.validate()?;
    parameters.validate()?;

    let half_life = pk::estimate_half_life(profile.age())?;
    let intake_sensitivity = pd::estimate_intake_sensitivity(intake.weekly_frequency());
    let receptor_sensitivity = pd::receptor_sensitivity(profile.age());
    tracing::debug!(
        half_life,
        intake_sensitivity,
        receptor_sensitivity,
        points = grid.len(),
        "evaluating caffeine model"
    );

    let recommended = profile.recommended_daily_intake();
    if intake.dose() > recommended {
        tracing::warn!(
            dose = intake.dose(),
            recommended,
            "single dose exceeds the recommended daily intake"
        );
    }

    let times = grid.times().clone();
    let concentrations = pk::concentration(&times, intake.dose(), profile.weight(), half_life);
    let effects = pd::effect(
        &times,
        &concentrations,
        parameters.ec50,
        parameters.emax,
        intake.weekly_frequency(),
        profile.age(),
    );

    Ok(SimulationResult {
        profile: *profile,
        intake: *intake,
        parameters: *parameters,
        times,
        concentrations,
        effects,
        half_life,
        intake_sensitivity,
        receptor_sensitivity,
    })
}

/// Run a parsed request with the model parameters and grid from `options`
pub fn simulate(
    request: &SimulationRequest,
    options: &SimulationOptions,
) -> Result<SimulationResult, CaffsimError> {
    options.validate()?;
    let grid = options.grid.build()?;
    run_simulation(&request.profile, &request.intake, &options.parameters, &grid)
}
