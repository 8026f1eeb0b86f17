//! Writers for simulation output

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;
use serde::Serialize;

use crate::error::CaffsimError;
use crate::simulator::SimulationResult;

#[derive(Serialize)]
struct SeriesRow {
    time: f64,
    concentration: f64,
    effect: f64,
}

/// Write the simulated series as CSV with a `time,concentration,effect` header
pub fn write_series_csv<W: Write>(
    result: &SimulationResult,
    writer: W,
) -> Result<(), CaffsimError> {
    let mut wtr = WriterBuilder::new().has_headers(true).from_writer(writer);
    for ((&time, &concentration), &effect) in result
        .times()
        .iter()
        .zip(result.concentrations().iter())
        .zip(result.effects().iter())
    {
        wtr.serialize(SeriesRow {
            time,
            concentration,
            effect,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write any serializable output as pretty-printed JSON
pub fn write_json<W: Write, T: Serialize>(value: &T, mut writer: W) -> Result<(), CaffsimError> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    Ok(())
}

pub fn write_series_csv_file(
    result: &SimulationResult,
    path: impl AsRef<Path>,
) -> Result<(), CaffsimError> {
    let file = File::create(path.as_ref())?;
    write_series_csv(result, file)?;
    tracing::info!(path = %path.as_ref().display(), "wrote series CSV");
    Ok(())
}

pub fn write_json_file<T: Serialize>(value: &T, path: impl AsRef<Path>) -> Result<(), CaffsimError> {
    let file = File::create(path.as_ref())?;
    write_json(value, file)?;
    tracing::info!(path = %path.as_ref().display(), "wrote JSON");
    Ok(())
}
