//! Input records for a caffeine simulation
//!
//! Every record is a plain value: it is built once from user input and never
//! mutated afterwards. Domain checks live on the records themselves so the
//! simulator can reject degenerate inputs before evaluating any series.

pub mod grid;
pub mod parser;

use serde::{Deserialize, Serialize};

use crate::error::CaffsimError;
use crate::simulator::pk::AGE_UPPER_BOUND;

pub use grid::TimeGrid;
pub use parser::SimulationRequest;

/// Caffeine intake considered appropriate per kilogram of body weight per day (mg/kg)
pub const DAILY_INTAKE_PER_KG: f64 = 2.5;

/// Fails unless `value` is finite and strictly positive
pub(crate) fn check_positive(param: &str, value: f64) -> Result<(), CaffsimError> {
    if !value.is_finite() {
        return Err(CaffsimError::domain(param, value, "must be finite"));
    }
    if value <= 0.0 {
        return Err(CaffsimError::domain(param, value, "must be greater than zero"));
    }
    Ok(())
}

/// Physiological description of the person drinking the caffeine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubjectProfile {
    /// Age in years
    age: f64,
    /// Body weight in kg
    weight: f64,
}

impl SubjectProfile {
    pub fn new(age: f64, weight: f64) -> Self {
        Self { age, weight }
    }

    pub fn age(&self) -> f64 {
        self.age
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Daily caffeine amount (mg) considered appropriate for this body weight
    pub fn recommended_daily_intake(&self) -> f64 {
        self.weight * DAILY_INTAKE_PER_KG
    }

    /// Check that the half-life model is defined for this subject
    ///
    /// The age response is a downward parabola with roots at 0 and
    /// [`AGE_UPPER_BOUND`]; outside that open interval the half-life is
    /// negative or infinite.
    pub fn validate(&self) -> Result<(), CaffsimError> {
        check_positive("age", self.age)?;
        if self.age >= AGE_UPPER_BOUND {
            return Err(CaffsimError::domain(
                "age",
                self.age,
                format!("must be below {:.2} years", AGE_UPPER_BOUND),
            ));
        }
        check_positive("weight", self.weight)
    }
}

/// How often and how much caffeine the subject takes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntakePlan {
    /// Number of caffeine intakes per week
    weekly_frequency: u32,
    /// Single dose in mg
    dose: f64,
}

impl IntakePlan {
    pub fn new(weekly_frequency: u32, dose: f64) -> Self {
        Self {
            weekly_frequency,
            dose,
        }
    }

    pub fn weekly_frequency(&self) -> u32 {
        self.weekly_frequency
    }

    pub fn dose(&self) -> f64 {
        self.dose
    }

    pub fn validate(&self) -> Result<(), CaffsimError> {
        check_positive("dose", self.dose)
    }
}

/// Emax model parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelParameters {
    /// Theoretical maximal effect
    pub emax: f64,
    /// Concentration (mg/L) producing half of the maximal effect
    pub ec50: f64,
}

impl Default for ModelParameters {
    fn default() -> Self {
        Self {
            emax: 1.0,
            ec50: 2.0,
        }
    }
}

impl ModelParameters {
    pub fn new(emax: f64, ec50: f64) -> Self {
        Self { emax, ec50 }
    }

    pub fn validate(&self) -> Result<(), CaffsimError> {
        check_positive("emax", self.emax)?;
        check_positive("ec50", self.ec50)
    }
}
