//! One-compartment pharmacokinetics with an age-adjusted half-life

use ndarray::Array1;

use crate::error::CaffsimError;

/// Age at which the reference half-life is observed
pub const REFERENCE_AGE: f64 = 43.0;

/// Caffeine half-life (h) of a subject at [`REFERENCE_AGE`]
pub const REFERENCE_HALF_LIFE: f64 = 4.0;

/// Second root of the age response; the half-life model is undefined from here on
pub const AGE_UPPER_BOUND: f64 = 0.754 / 0.009;

/// Volume of distribution per kg of body weight (L/kg)
pub const VD_PER_KG: f64 = 0.7;

/// Relative hepatic clearance as a function of age
#[inline]
fn age_response(age: f64) -> f64 {
    -0.009 * age.powi(2) + 0.754 * age
}

/// Estimate the elimination half-life (h) for a subject of the given age
///
/// The half-life scales inversely with the age response, anchored so that
/// `estimate_half_life(43.0) == 4.0`.
///
/// # Errors
/// [`CaffsimError::InvalidDomain`] when the age response is not positive
/// (age ≤ 0 or age ≥ [`AGE_UPPER_BOUND`]) or the result is not finite.
pub fn estimate_half_life(age: f64) -> Result<f64, CaffsimError> {
    let response = age_response(age);
    let in_domain = age > 0.0 && age < AGE_UPPER_BOUND && response > 0.0;
    if !in_domain {
        return Err(CaffsimError::domain(
            "age",
            age,
            format!(
                "half-life is only defined for ages in (0, {:.2})",
                AGE_UPPER_BOUND
            ),
        ));
    }
    let half_life = REFERENCE_HALF_LIFE * (age_response(REFERENCE_AGE) / response);
    if !half_life.is_finite() {
        return Err(CaffsimError::domain(
            "age",
            age,
            "half-life is not finite",
        ));
    }
    Ok(half_life)
}

/// Volume of distribution (L) for a body weight in kg
#[inline]
pub fn volume_of_distribution(weight: f64) -> f64 {
    VD_PER_KG * weight
}

/// Elimination rate constant (1/h) for a half-life in hours
#[inline]
pub fn elimination_rate(half_life: f64) -> f64 {
    std::f64::consts::LN_2 / half_life
}

/// Plasma concentration (mg/L) after a single bolus dose, at each time in `t`
///
/// `C(t) = dose / Vd * exp(-k t)` with `Vd = 0.7 * weight` and `k = ln 2 / half_life`.
pub fn concentration(t: &Array1<f64>, dose: f64, weight: f64, half_life: f64) -> Array1<f64> {
    let c0 = dose / volume_of_distribution(weight);
    let ke = elimination_rate(half_life);
    t.mapv(|ti| c0 * (-ke * ti).exp())
}
