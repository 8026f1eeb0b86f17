//! Presentation of simulation results
//!
//! - [`Report`]: human-readable summary (text)
//! - [`ReportData`]: the same content as a serializable record (JSON)
//! - [`chart::ChartSpec`]: effect curve with its annotations, for an external plotter
//! - [`export`]: CSV/JSON writers

pub mod chart;
pub mod export;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analysis::ExposureSummary;
use crate::data::{IntakePlan, ModelParameters, SubjectProfile};
use crate::simulator::options::SimulationOptions;
use crate::simulator::SimulationResult;

/// Serializable summary of one run: echoed inputs, model coefficients and exposure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportData {
    pub profile: SubjectProfile,
    pub intake: IntakePlan,
    pub parameters: ModelParameters,
    pub half_life: f64,
    pub receptor_sensitivity: f64,
    pub intake_sensitivity: f64,
    pub perceived_effect_limit: f64,
    pub exposure: ExposureSummary,
}

impl ReportData {
    pub fn new(result: &SimulationResult, options: &SimulationOptions) -> Self {
        Self {
            profile: *result.profile(),
            intake: *result.intake(),
            parameters: *result.parameters(),
            half_life: result.half_life(),
            receptor_sensitivity: result.receptor_sensitivity(),
            intake_sensitivity: result.intake_sensitivity(),
            perceived_effect_limit: options.perceived_effect_limit,
            exposure: result.summarize(options),
        }
    }

    /// Text rendering of this summary
    pub fn report(&self) -> Report<'_> {
        Report { data: self }
    }
}

/// Boxed text report, in the order: inputs, coefficients, window, exposure
pub struct Report<'a> {
    data: &'a ReportData,
}

const RULE: &str = "══════════════════════════════════════════════";

fn row(f: &mut fmt::Formatter<'_>, text: impl fmt::Display) -> fmt::Result {
    writeln!(f, "║ {:<44} ║", text.to_string())
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.data;
        let e = &d.exposure;

        writeln!(f, "╔{RULE}╗")?;
        row(f, "Caffeine PK-PD simulation")?;
        writeln!(f, "╠{RULE}╣")?;
        row(f, "INPUTS")?;
        row(f, format!("  Age:                {} years", d.profile.age()))?;
        row(f, format!("  Weight:             {} kg", d.profile.weight()))?;
        row(
            f,
            format!("  Intakes per week:   {}", d.intake.weekly_frequency()),
        )?;
        row(f, format!("  Single dose:        {} mg", d.intake.dose()))?;

        writeln!(f, "╠{RULE}╣")?;
        row(f, "MODEL")?;
        row(f, format!("  Half-life (t½):     {:.2} h", d.half_life))?;
        row(
            f,
            format!("  Receptor g(age):    {:.4}", d.receptor_sensitivity),
        )?;
        row(f, format!("  Intake T(n):        {:.4}", d.intake_sensitivity))?;
        row(
            f,
            format!(
                "  Emax: {}, EC50: {}",
                d.parameters.emax, d.parameters.ec50
            ),
        )?;

        writeln!(f, "╠{RULE}╣")?;
        row(f, "EXPOSURE")?;
        row(
            f,
            format!("  Cmax:   {:>8.4} mg/L at {:.2} h", e.cmax, e.tmax),
        )?;
        row(f, format!("  AUC:    {:>8.4} mg·h/L", e.auc_concentration))?;
        row(
            f,
            format!(
                "  Peak effect: {:.4} at {:.2} h",
                e.effect_peak, e.effect_peak_time
            ),
        )?;
        match e.window {
            Some(w) => row(
                f,
                format!("  Active window: {:.2} h to {:.2} h", w.start, w.end),
            )?,
            None => row(f, "  Active window: not reached")?,
        }
        row(f, format!("  Time in window:     {:.2} h", e.time_in_window))?;
        row(
            f,
            format!("  Time above window:  {:.2} h", e.time_above_window),
        )?;
        row(
            f,
            format!(
                "  Effect at t={}h: {:.4}",
                d.perceived_effect_limit, e.effect_at_perceived_limit
            ),
        )?;

        writeln!(f, "╠{RULE}╣")?;
        row(
            f,
            format!(
                "  Daily intake limit: {:.2} mg",
                e.recommended_daily_intake
            ),
        )?;
        if e.exceeds_daily_intake {
            row(f, "  ! single dose exceeds the daily limit")?;
        }
        write!(f, "╚{RULE}╝")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SimulationRequest;
    use crate::simulator::simulate;

    fn data(input: &str) -> ReportData {
        let options = SimulationOptions::default();
        let request: SimulationRequest = input.parse().unwrap();
        ReportData::new(&simulate(&request, &options).unwrap(), &options)
    }

    #[test]
    fn report_echoes_inputs_with_fixed_precision() {
        let text = data("(20, 60, 3, 150)").report().to_string();
        assert!(text.contains("Age:                20 years"));
        assert!(text.contains("Weight:             60 kg"));
        assert!(text.contains("Intakes per week:   3"));
        assert!(text.contains("Single dose:        150 mg"));
        assert!(text.contains("Half-life (t½):     5.50 h"));
        assert!(text.contains("Receptor g(age):    0.4500"));
        assert!(text.contains("Intake T(n):        0.7000"));
        assert!(text.contains("Emax: 1, EC50: 2"));
        assert!(text.contains("Effect at t=3.17925h"));
        assert!(!text.contains("exceeds"));
    }

    #[test]
    fn report_flags_large_doses() {
        let text = data("(20, 50, 3, 400)").report().to_string();
        assert!(text.contains("Daily intake limit: 125.00 mg"));
        assert!(text.contains("exceeds the daily limit"));
    }

    #[test]
    fn report_data_serializes() {
        let json = serde_json::to_value(data("(20, 60, 3, 150)")).unwrap();
        assert_eq!(json["intake"]["weekly_frequency"], 3);
        assert_eq!(json["parameters"]["ec50"], 2.0);
        assert!(json["exposure"]["window"]["start"].as_f64().unwrap() > 1.0);
    }
}
