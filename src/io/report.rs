//! Whitespace-delimited result tables.

use std::fs::{File, OpenOptions};
use std::path::Path;

use csv::{Writer, WriterBuilder};
use log::info;

use crate::analysis::SimulationResults;
use crate::error::Result;

const SUMMARY_HEADER: [&str; 7] = [
    "g",
    "omega",
    "time",
    "nsteps_burn",
    "nsteps",
    "mean_phonons_DMC",
    "mean_energy_DMC",
];

const HISTOGRAM_HEADER: [&str; 3] = ["n_phonons", "probability", "poisson_fit"];

fn space_delimited(file: File) -> Writer<File> {
    WriterBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .from_writer(file)
}

fn summary_row(results: &SimulationResults) -> Vec<String> {
    vec![
        format!("{:?}", results.params.g),
        format!("{:?}", results.params.omega),
        format!("{:?}", results.params.time),
        results.nsteps_burn.to_string(),
        results.nsteps.to_string(),
        format!("{:.5}", results.mean_phonons),
        format!("{:.5}", results.mean_energy),
    ]
}

/// Write one summary row for the run.
///
/// The file is (re)created with a header line when it does not exist, is
/// empty, or `append` is false; otherwise the row is appended.
pub fn write_summary<P: AsRef<Path>>(path: P, results: &SimulationResults, append: bool) -> Result<()> {
    let path = path.as_ref();
    let is_empty = match path.metadata() {
        Ok(meta) => meta.len() == 0,
        Err(_) => true,
    };

    let mut writer = if is_empty || !append {
        let mut writer = space_delimited(File::create(path)?);
        writer.write_record(SUMMARY_HEADER)?;
        writer
    } else {
        space_delimited(OpenOptions::new().append(true).open(path)?)
    };
    writer.write_record(summary_row(results))?;
    writer.flush()?;

    info!("Summary written to {}", path.display());
    Ok(())
}

/// Write the sampled phonon distribution next to the fitted Poisson masses.
pub fn write_histogram<P: AsRef<Path>>(path: P, results: &SimulationResults) -> Result<()> {
    let path = path.as_ref();
    let mut writer = space_delimited(File::create(path)?);
    writer.write_record(HISTOGRAM_HEADER)?;
    for (k, p) in results.histogram.probabilities.iter().enumerate() {
        writer.write_record([
            k.to_string(),
            format!("{:.6}", p),
            format!("{:.6}", results.fit.probability(k)),
        ])?;
    }
    writer.flush()?;

    info!("Phonon distribution written to {}", path.display());
    Ok(())
}
