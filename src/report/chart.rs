use serde::{Deserialize, Serialize};

use crate::simulator::options::SimulationOptions;
use crate::simulator::SimulationResult;

/// A labelled line of (time, value) points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub label: String,
    pub points: Vec<[f64; 2]>,
}

/// Shaded vertical band between two times
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub label: String,
    pub start: f64,
    pub end: f64,
}

/// Vertical reference line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub label: String,
    pub time: f64,
}

/// Plot description of the effect curve: the series plus its annotations
///
/// Rendering is left to the consumer; this only fixes what is drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_limits: (f64, f64),
    pub y_limits: (f64, f64),
    pub effect: Series,
    /// Absent when the concentration never enters the active window
    pub band: Option<Band>,
    pub marker: Marker,
}

impl ChartSpec {
    pub fn new(result: &SimulationResult, options: &SimulationOptions) -> Self {
        let profile = result.profile();
        let label = format!(
            "Age={}, Weight={}kg, {}times/week",
            profile.age(),
            profile.weight(),
            result.intake().weekly_frequency()
        );
        let points = result
            .times()
            .iter()
            .zip(result.effects().iter())
            .map(|(&t, &e)| [t, e])
            .collect();

        let window = &options.window;
        let band = result.concentration_window(window).map(|w| Band {
            label: format!("Concentration {}~{}mg/L", window.lower, window.upper),
            start: w.start,
            end: w.end,
        });

        let times = result.times();
        ChartSpec {
            title: "Customized PK-PD Caffeine Model".to_string(),
            x_label: "Time (hours)".to_string(),
            y_label: "Caffeine Effect E(t)".to_string(),
            x_limits: (times[0], times[times.len() - 1]),
            y_limits: options.effect_limits,
            effect: Series { label, points },
            band,
            marker: Marker {
                label: format!(
                    "perceived_effect_limit (t={}h)",
                    options.perceived_effect_limit
                ),
                time: options.perceived_effect_limit,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SimulationRequest;
    use crate::simulator::simulate;

    #[test]
    fn chart_carries_series_band_and_marker() {
        let options = SimulationOptions::default();
        let request: SimulationRequest = "(20, 60, 3, 150)".parse().unwrap();
        let result = simulate(&request, &options).unwrap();
        let chart = ChartSpec::new(&result, &options);

        assert_eq!(chart.effect.label, "Age=20, Weight=60kg, 3times/week");
        assert_eq!(chart.effect.points.len(), 500);
        assert_eq!(chart.x_limits, (0.0, 12.0));
        assert_eq!(chart.y_limits, (0.0, 0.7));
        assert_eq!(chart.marker.time, 3.17925);
        assert_eq!(chart.marker.label, "perceived_effect_limit (t=3.17925h)");

        let band = chart.band.expect("band");
        assert_eq!(band.label, "Concentration 1~3mg/L");
        assert!(band.start < band.end);
    }

    #[test]
    fn no_band_for_tiny_doses() {
        let options = SimulationOptions::default();
        let request: SimulationRequest = "(20, 60, 3, 10)".parse().unwrap();
        let result = simulate(&request, &options).unwrap();
        assert!(ChartSpec::new(&result, &options).band.is_none());
    }
}
