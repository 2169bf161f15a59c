//! Check command implementation
//!
//! Prints the resolved configuration and the execution environment.

use pricer_pricing::lattice::MAX_LATTICE_STEPS;
use pricer_pricing::mc::{MAX_PATHS, MAX_STEPS};
use serde::Serialize;

use super::{emit, TableRows};
use crate::config::CliConfig;
use crate::Result;

/// Output of `pathpricer check`.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub version: &'static str,
    pub config_file: String,
    pub config: CliConfig,
    pub rayon_threads: usize,
    pub max_paths: usize,
    pub max_steps: usize,
    pub max_lattice_steps: usize,
}

impl TableRows for CheckReport {
    fn title(&self) -> String {
        format!("pathpricer v{}", self.version)
    }

    fn rows(&self) -> Vec<(String, String)> {
        vec![
            ("config file".to_string(), self.config_file.clone()),
            ("log level".to_string(), self.config.log_level.to_string()),
            (
                "seed".to_string(),
                self.config.seed.map_or("entropy".to_string(), |s| s.to_string()),
            ),
            ("paths".to_string(), self.config.n_paths.to_string()),
            ("steps".to_string(), self.config.n_steps.to_string()),
            ("output format".to_string(), self.config.output_format.to_string()),
            ("rayon threads".to_string(), self.rayon_threads.to_string()),
            ("max paths".to_string(), self.max_paths.to_string()),
            ("max steps".to_string(), self.max_steps.to_string()),
            ("max lattice steps".to_string(), self.max_lattice_steps.to_string()),
        ]
    }
}

/// Collects the configuration and thread-pool details.
pub fn evaluate(config: &CliConfig, config_file: &str) -> CheckReport {
    CheckReport {
        version: env!("CARGO_PKG_VERSION"),
        config_file: config_file.to_string(),
        config: config.clone(),
        rayon_threads: rayon::current_num_threads(),
        max_paths: MAX_PATHS,
        max_steps: MAX_STEPS,
        max_lattice_steps: MAX_LATTICE_STEPS,
    }
}

/// Run the check command
pub fn run(config: &CliConfig, config_file: &str) -> Result<()> {
    let report = evaluate(config, config_file);
    emit(&report, config.output_format, &mut std::io::stdout().lock())
}
