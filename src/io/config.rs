//! YAML run configuration.
//!
//! ```yaml
//! settings:
//!   nsteps: 100000
//!   nsteps_burn: 10000
//!   omega: 1.0
//!   g: 0.5
//!   time: 10.0
//! seed: 42
//! output:
//!   data_folder: data
//!   summary: data/energy_phonons.txt
//!   plot_folder: plot
//!   histogram: plot/phonons.txt
//!   append: true
//! ```

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::diagram::DiagramParams;
use crate::error::{Error, Result};

/// Physical and technical parameters of a run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub nsteps: usize,
    #[serde(default)]
    pub nsteps_burn: usize,
    pub omega: f64,
    pub g: f64,
    pub time: f64,
}

impl Settings {
    pub fn diagram_params(&self) -> DiagramParams {
        DiagramParams { omega: self.omega, g: self.g, time: self.time }
    }

    /// Check every parameter that would make the simulation meaningless and
    /// report all of them at once.
    pub fn check_positive_parameters(&self) -> Result<()> {
        let mut invalid = Vec::new();
        if self.nsteps == 0 {
            invalid.push(format!(
                "The number of MonteCarlo steps must be > 0 but is {}",
                self.nsteps
            ));
        }
        if !(self.omega > 0.0) {
            invalid.push(format!("The phonon frequency must be > 0.0 but is {}", self.omega));
        }
        if !(self.g > 0.0) {
            invalid.push(format!(
                "The intensity of electron phonon coupling must be > 0.0 but is {}",
                self.g
            ));
        }
        if !(self.time > 0.0) {
            invalid.push(format!("The lifetime of the electron must be > 0.0 but is {}", self.time));
        }

        if invalid.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidParameters(invalid))
        }
    }
}

/// Destinations of the report files.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutputPaths {
    pub data_folder: PathBuf,
    /// Table with one summary row per run
    pub summary: PathBuf,
    pub plot_folder: PathBuf,
    /// Phonon-number histogram and Poisson fit
    pub histogram: PathBuf,
    /// Append to an existing summary instead of overwriting it
    #[serde(default = "default_append")]
    pub append: bool,
}

fn default_append() -> bool {
    true
}

impl OutputPaths {
    /// Create the data and plot folders, leaving existing ones untouched.
    pub fn ensure_storage_directories_exist(&self) -> Result<()> {
        for folder in [&self.data_folder, &self.plot_folder] {
            debug!("Ensuring directory {} exists", folder.display());
            fs::create_dir_all(folder)?;
        }
        Ok(())
    }
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            data_folder: PathBuf::from("data"),
            summary: PathBuf::from("data/energy_phonons.txt"),
            plot_folder: PathBuf::from("plot"),
            histogram: PathBuf::from("plot/phonons.txt"),
            append: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub settings: Settings,
    /// Absent or null seeds the generator from entropy
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub output: OutputPaths,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);
        let config: Config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }
}
