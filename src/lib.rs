//! Personalised caffeine effect simulation
//!
//! A one-compartment pharmacokinetic model with an age-adjusted half-life
//! drives an Emax pharmacodynamic model scaled by tolerance (weekly intake)
//! and receptor sensitivity (age).
//!
//! ```rust
//! use caffsim::prelude::*;
//!
//! let request: SimulationRequest = "(20, 60, 3, 150)".parse()?;
//! let options = SimulationOptions::default();
//! let result = simulate(&request, &options)?;
//!
//! assert_eq!(result.times().len(), 500);
//! let window = result.concentration_window(&options.window).expect("window");
//! assert!(window.start < window.end);
//! # Ok::<(), caffsim::CaffsimError>(())
//! ```

pub mod analysis;
pub mod data;
pub mod error;
pub mod report;
pub mod simulator;

pub use crate::analysis::{AUCMethod, ExposureSummary, TimeWindow};
pub use crate::data::{IntakePlan, ModelParameters, SimulationRequest, SubjectProfile, TimeGrid};
pub use crate::simulator::pd::{effect, estimate_intake_sensitivity, receptor_sensitivity};
pub use crate::simulator::pk::{concentration, estimate_half_life};
pub use crate::simulator::{run_simulation, simulate, SimulationResult};
pub use error::CaffsimError;

pub mod prelude {
    pub use crate::analysis::{AUCMethod, ExposureSummary, TimeWindow};
    pub use crate::data::{
        IntakePlan, ModelParameters, SimulationRequest, SubjectProfile, TimeGrid,
    };
    pub use crate::error::CaffsimError;
    pub use crate::report::{chart::ChartSpec, ReportData};
    pub use crate::simulator::options::{ConcentrationWindow, GridOptions, SimulationOptions};
    pub use crate::simulator::{run_simulation, simulate, SimulationResult};

    pub mod models {
        pub use crate::simulator::pd::{effect, estimate_intake_sensitivity, receptor_sensitivity};
        pub use crate::simulator::pk::{concentration, estimate_half_life};
    }
}
