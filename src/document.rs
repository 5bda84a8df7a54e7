use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{Result, ShiftError};

/// Extension of every file this tool writes
pub const OUTPUT_EXTENSION: &str = "srt";

/// Default suffix appended to the source file stem
pub const DEFAULT_OUTPUT_SUFFIX: &str = "_offset";

/// A subtitle file held in memory as lines, each with its own terminator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubtitleDocument {
    lines: Vec<String>,
}

impl SubtitleDocument {
    /// Split `text` into lines, keeping `\n` / `\r\n` on each line so that
    /// joining them gives back the exact input.
    pub fn parse(text: &str) -> Self {
        Self {
            lines: text.split_inclusive('\n').map(str::to_string).collect(),
        }
    }

    pub fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ShiftError::FileNotFound(path.display().to_string()));
        }

        let text = fs::read_to_string(path)?;
        let document = Self::parse(&text);
        debug!("Read {} lines from {}", document.len(), path.display());
        Ok(document)
    }

    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_text())?;
        info!("Wrote {} lines to {}", self.len(), path.display());
        Ok(())
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn to_text(&self) -> String {
        self.lines.concat()
    }
}

/// Split a line into its content and its terminator (`"\r\n"`, `"\n"` or `""`).
pub fn split_terminator(line: &str) -> (&str, &str) {
    if let Some(content) = line.strip_suffix("\r\n") {
        (content, "\r\n")
    } else if let Some(content) = line.strip_suffix('\n') {
        (content, "\n")
    } else {
        (line, "")
    }
}

/// Derive the output file next to `input`: the file name is split at its
/// last `.`, and `<stem><suffix>.srt` replaces it. Names without an
/// extension keep the whole name as the stem. Non-UTF-8 names are kept
/// byte-for-byte.
pub fn output_path<P: AsRef<Path>>(input: P, suffix: &str) -> Result<PathBuf> {
    let input = input.as_ref();
    let stem = input.file_stem().ok_or_else(|| {
        ShiftError::Config(format!(
            "Cannot derive an output name from {}",
            input.display()
        ))
    })?;

    let mut name = OsString::from(stem);
    name.push(suffix);
    name.push(".");
    name.push(OUTPUT_EXTENSION);
    Ok(input.with_file_name(name))
}
