//! Strict parser for the `(age, weight, weekly frequency, dose)` input tuple
//!
//! Only plain decimal numbers separated by commas are accepted, optionally
//! wrapped in a single pair of parentheses. Nothing is evaluated.

use std::fmt;
use std::str::FromStr;

use super::{IntakePlan, SubjectProfile};
use crate::error::CaffsimError;

/// Number of fields in an input tuple
pub const INPUT_ARITY: usize = 4;

/// A parsed simulation request: who drinks the caffeine and how
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationRequest {
    pub profile: SubjectProfile,
    pub intake: IntakePlan,
}

impl SimulationRequest {
    pub fn new(profile: SubjectProfile, intake: IntakePlan) -> Self {
        Self { profile, intake }
    }
}

impl fmt::Display for SimulationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.profile.age(),
            self.profile.weight(),
            self.intake.weekly_frequency(),
            self.intake.dose()
        )
    }
}

impl FromStr for SimulationRequest {
    type Err = CaffsimError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| CaffsimError::InvalidInput {
            input: input.to_string(),
            reason,
        };

        let body = strip_parentheses(input.trim()).map_err(|r| invalid(r.to_string()))?;
        let fields: Vec<&str> = body.split(',').map(str::trim).collect();
        if fields.len() != INPUT_ARITY {
            return Err(invalid(format!(
                "expected {} comma-separated values, found {}",
                INPUT_ARITY,
                fields.len()
            )));
        }

        let mut values = [0.0; INPUT_ARITY];
        for (slot, field) in values.iter_mut().zip(&fields) {
            *slot = parse_number(field).map_err(invalid)?;
        }
        let [age, weight, weekly, dose] = values;

        Ok(SimulationRequest {
            profile: SubjectProfile::new(age, weight),
            intake: IntakePlan::new(weekly_frequency(weekly)?, dose),
        })
    }
}

fn strip_parentheses(text: &str) -> Result<&str, &'static str> {
    match (text.strip_prefix('('), text.ends_with(')')) {
        (Some(rest), true) => Ok(&rest[..rest.len() - 1]),
        (Some(_), false) => Err("missing closing parenthesis"),
        (None, true) => Err("missing opening parenthesis"),
        (None, false) => Ok(text),
    }
}

fn parse_number(field: &str) -> Result<f64, String> {
    if field.is_empty() {
        return Err("empty value".to_string());
    }
    // f64::from_str also accepts "inf" and "NaN"; only digits, sign, point and exponent pass here
    if !field
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
    {
        return Err(format!("'{field}' is not a number"));
    }
    field
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("'{field}' is not a number"))
}

fn weekly_frequency(value: f64) -> Result<u32, CaffsimError> {
    if value < 0.0 {
        return Err(CaffsimError::domain(
            "weekly_frequency",
            value,
            "must not be negative",
        ));
    }
    if value.fract() != 0.0 || value > u32::MAX as f64 {
        return Err(CaffsimError::domain(
            "weekly_frequency",
            value,
            "must be a whole number of intakes",
        ));
    }
    Ok(value as u32)
}
