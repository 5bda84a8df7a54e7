use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::Config;
use crate::document::{SubtitleDocument, output_path};
use crate::error::{Result, ShiftError};
use crate::offsetter::Offsetter;

pub struct Workflow {
    config: Config,
    offsetter: Offsetter,
}

impl Workflow {
    /// Fails on an invalid offset before any file is touched.
    pub fn new(config: Config) -> Result<Self> {
        let offsetter = Offsetter::new(config.offset()?, config.policy);
        Ok(Self { config, offsetter })
    }

    /// Where the shifted copy goes
    pub fn output_path(&self) -> Result<PathBuf> {
        match &self.config.output {
            Some(path) => Ok(path.clone()),
            None => output_path(&self.config.srt_file, &self.config.output_suffix),
        }
    }

    /// Read, shift and write the configured file. Returns the output path.
    pub fn run(&self) -> Result<PathBuf> {
        let input_path = self.config.srt_file.as_path();
        info!(
            "Offsetting {} by {} seconds",
            input_path.display(),
            self.offsetter.offset().as_seconds_f64()
        );

        if !input_path.exists() {
            return Err(ShiftError::FileNotFound(input_path.display().to_string()));
        }

        let output_path = self.output_path()?;
        if same_file(input_path, &output_path) {
            return Err(ShiftError::Config(format!(
                "Refusing to overwrite the source file {}",
                input_path.display()
            )));
        }

        let document = SubtitleDocument::read(input_path)?;
        let shifted = self.offsetter.apply(&document)?;
        debug!("Timestamp policy: {:?}", self.offsetter.policy());

        shifted.write(&output_path)?;
        info!("Shifted subtitles saved to {}", output_path.display());
        Ok(output_path)
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
