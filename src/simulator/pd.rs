//! Emax pharmacodynamics scaled by tolerance and receptor sensitivity

use ndarray::Array1;

/// Weekly intake count up to which tolerance builds linearly
pub const TOLERANCE_ONSET_LIMIT: u32 = 5;

/// Intake sensitivity of habitual consumers (more than [`TOLERANCE_ONSET_LIMIT`] intakes a week)
pub const HABITUAL_SENSITIVITY: f64 = 0.3;

/// Fixed gain applied to the Emax response
pub const EFFECT_GAIN: f64 = 1.2;

/// Sensitivity to caffeine given the number of intakes per week
///
/// Decreases linearly from 1.0 (no intake) to 0.5 at five intakes, then
/// drops to [`HABITUAL_SENSITIVITY`] for anything above.
pub fn estimate_intake_sensitivity(week_number: u32) -> f64 {
    if week_number <= TOLERANCE_ONSET_LIMIT {
        -0.1 * week_number as f64 + 1.0
    } else {
        HABITUAL_SENSITIVITY
    }
}

/// Adenosine receptor sensitivity, declining linearly with age
///
/// Reaches zero at 140 years; negative values are degenerate.
pub fn receptor_sensitivity(age: f64) -> f64 {
    -0.00375 * age + 0.525
}

/// Effect at each concentration in `concentration`
///
/// `E = Emax * g(age) * T(n) * C * 1.2 / (EC50 + C)`. The time axis does not
/// enter the formula but is taken so the signature lines up with the series
/// it annotates. `ec50` must be positive.
pub fn effect(
    t: &Array1<f64>,
    concentration: &Array1<f64>,
    ec50: f64,
    emax: f64,
    week_number: u32,
    age: f64,
) -> Array1<f64> {
    debug_assert_eq!(t.len(), concentration.len());
    let tn = estimate_intake_sensitivity(week_number);
    let g = receptor_sensitivity(age);
    // evaluated left to right so samples agree bit for bit with Emax·g·Tn·C·1.2
    concentration.mapv(|c| emax * g * tn * c * EFFECT_GAIN / (ec50 + c))
}

/// Asymptotic effect as concentration grows without bound
pub fn effect_ceiling(emax: f64, week_number: u32, age: f64) -> f64 {
    let tn = estimate_intake_sensitivity(week_number);
    let g = receptor_sensitivity(age);
    emax * g * tn * EFFECT_GAIN
}
