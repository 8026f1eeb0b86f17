use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::error::CaffsimError;

/// Evenly spaced, strictly increasing sampling times in hours
///
/// The first point is exactly `start` and the last exactly `end`; interior
/// points are `start + i * step`. Serialized as a plain list of times;
/// deserialization rebuilds the grid through [`TimeGrid::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct TimeGrid {
    times: Array1<f64>,
}

impl Default for TimeGrid {
    /// 500 points over [0, 12] h
    fn default() -> Self {
        let step = 12.0 / 499.0;
        Self {
            times: Array1::from_shape_fn(500, |i| if i == 499 { 12.0 } else { i as f64 * step }),
        }
    }
}

impl TimeGrid {
    pub fn new(start: f64, end: f64, points: usize) -> Result<Self, CaffsimError> {
        if !start.is_finite() || !end.is_finite() {
            return Err(CaffsimError::InvalidGrid {
                reason: format!("bounds must be finite, got [{start}, {end}]"),
            });
        }
        if end <= start {
            return Err(CaffsimError::InvalidGrid {
                reason: format!("end ({end}) must be after start ({start})"),
            });
        }
        if points < 2 {
            return Err(CaffsimError::InvalidGrid {
                reason: format!("need at least 2 points, got {points}"),
            });
        }

        let last = points - 1;
        let step = (end - start) / last as f64;
        let times = Array1::from_shape_fn(points, |i| {
            if i == last {
                end
            } else {
                start + step * i as f64
            }
        });
        Ok(Self { times })
    }

    /// Rebuild a grid from its sample times
    ///
    /// The times must be finite, strictly increasing and evenly spaced.
    pub fn from_times(times: &[f64]) -> Result<Self, CaffsimError> {
        if times.len() < 2 {
            return Err(CaffsimError::InvalidGrid {
                reason: format!("need at least 2 points, got {}", times.len()),
            });
        }
        if let Some(bad) = times.iter().find(|t| !t.is_finite()) {
            return Err(CaffsimError::InvalidGrid {
                reason: format!("times must be finite, got {bad}"),
            });
        }
        if let Some(i) = (1..times.len()).find(|&i| times[i] <= times[i - 1]) {
            return Err(CaffsimError::InvalidGrid {
                reason: format!(
                    "times must be strictly increasing, got {} after {}",
                    times[i],
                    times[i - 1]
                ),
            });
        }

        let grid = Self::new(times[0], times[times.len() - 1], times.len())?;
        let tolerance = 1e-9 * (grid.end() - grid.start());
        let uneven = grid
            .times
            .iter()
            .zip(times)
            .any(|(expected, actual)| (expected - actual).abs() > tolerance);
        if uneven {
            return Err(CaffsimError::InvalidGrid {
                reason: "times must be evenly spaced".to_string(),
            });
        }
        Ok(grid)
    }

    pub fn times(&self) -> &Array1<f64> {
        &self.times
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn start(&self) -> f64 {
        self.times[0]
    }

    pub fn end(&self) -> f64 {
        self.times[self.times.len() - 1]
    }
}

impl TryFrom<Vec<f64>> for TimeGrid {
    type Error = CaffsimError;

    fn try_from(times: Vec<f64>) -> Result<Self, Self::Error> {
        Self::from_times(&times)
    }
}

impl From<TimeGrid> for Vec<f64> {
    fn from(grid: TimeGrid) -> Self {
        grid.times.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_matches_explicit_construction() {
        let grid = TimeGrid::default();
        assert_eq!(grid, TimeGrid::new(0.0, 12.0, 500).unwrap());
        assert_eq!(grid.len(), 500);
        assert_eq!(grid.start(), 0.0);
        assert_eq!(grid.end(), 12.0);
    }

    #[test]
    fn grid_is_strictly_increasing() {
        let grid = TimeGrid::new(0.0, 12.0, 500).unwrap();
        let times = grid.times().to_vec();
        for w in times.windows(2) {
            assert!(w[1] > w[0]);
        }
    }

    #[test]
    fn degenerate_grids_are_rejected() {
        assert!(TimeGrid::new(0.0, 12.0, 1).is_err());
        assert!(TimeGrid::new(5.0, 5.0, 10).is_err());
        assert!(TimeGrid::new(0.0, f64::INFINITY, 10).is_err());
    }

    #[test]
    fn grid_round_trips_through_json() {
        let grid = TimeGrid::new(0.0, 6.0, 25).unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        let back: TimeGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);

        let short: TimeGrid = serde_json::from_str("[0.0, 0.5, 1.0]").unwrap();
        assert_eq!(short, TimeGrid::new(0.0, 1.0, 3).unwrap());
    }

    #[test]
    fn invalid_grids_cannot_be_deserialized() {
        for json in [
            "[]",
            "[1.0]",
            "[5.0, 1.0, 1.0]",
            "[0.0, 1.0, 1.0]",
            "[0.0, 1.0, 5.0]",
            "[0.0, null, 2.0]",
        ] {
            assert!(
                serde_json::from_str::<TimeGrid>(json).is_err(),
                "{json} should be rejected"
            );
        }
    }
}
