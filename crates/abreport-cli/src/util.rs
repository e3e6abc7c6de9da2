use std::{
    fs::File,
    io::{self, BufReader, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use abreport_analysis::{
    criteria::ExperimentConfig,
    loader::{self, LoadOptions},
    observation::{Arm, Dataset, Metric},
};
use anyhow::Context;
use tracing::info;

use crate::command::DataArg;

/// Destination of a command's JSON output
#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    /// Write `value` as pretty JSON to `output_path`, or to stdout if `None`
    pub fn save_json<T>(value: &T, output_path: Option<&Path>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = match output_path {
            Some(path) => Output::create(path)?,
            None => Output::Stdout {
                writer: io::stdout().lock(),
            },
        };
        output.write_json(value)
    }

    fn create(path: &Path) -> anyhow::Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path: path.to_owned(),
        })
    }

    fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    fn write_json<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(self)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

/// Read the experiment configuration, falling back to the gate placement defaults
///
/// # Errors
///
/// Returns error if the file cannot be opened or parsed
pub fn read_experiment_config(path: Option<&Path>) -> anyhow::Result<ExperimentConfig> {
    let Some(path) = path else {
        return Ok(ExperimentConfig::default());
    };
    let file = File::open(path)
        .with_context(|| format!("Failed to open experiment config: {}", path.display()))?;
    let config: ExperimentConfig = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse experiment config: {}", path.display()))?;
    info!(
        criteria = config.criteria.len(),
        baseline = %config.baseline,
        treatment = %config.treatment,
        "experiment config loaded"
    );
    Ok(config)
}

/// Load the experiment results CSV named by `arg`
///
/// # Errors
///
/// Returns error if the file is missing, malformed, or violates the schema
pub fn load_dataset(arg: &DataArg) -> anyhow::Result<Dataset> {
    let options = LoadOptions {
        known_arms: arg.arms.iter().map(Arm::new).collect(),
    };
    let dataset = loader::load_csv(&arg.csv, &options)
        .with_context(|| format!("Failed to load experiment data: {}", arg.csv.display()))?;
    info!(rows = dataset.len(), arms = dataset.arms().len(), "dataset loaded");
    Ok(dataset)
}

/// Format a per-arm value: rates as percentages, rounds with one decimal
pub fn format_value(metric: Metric, value: f64) -> String {
    if metric.is_rate() {
        format!("{:.2}%", value * 100.0)
    } else {
        format!("{value:.1}")
    }
}

/// Format an absolute delta: percentage points for rates, rounds otherwise
pub fn format_delta(metric: Metric, delta: f64) -> String {
    if metric.is_rate() {
        format!("{:+.2}pp", delta * 100.0)
    } else {
        format!("{delta:+.1}")
    }
}

pub fn format_relative(relative: Option<f64>) -> String {
    relative.map_or("N/A".to_string(), |r| format!("{:+.2}%", r * 100.0))
}
