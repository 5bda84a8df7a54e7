use clap::Parser;
use std::path::PathBuf;

use crate::error::Result;
use crate::timestamp::Offset;

#[derive(Parser, Debug)]
#[command(author, version, about = "Offset subtitles in an SRT file.", long_about = None)]
pub struct Args {
    /// Path to the SRT file
    pub srt_file: PathBuf,

    /// Offset in seconds (positive delays, negative advances)
    #[arg(allow_negative_numbers = true)]
    pub offset_seconds: f64,

    /// Write the result here instead of next to the source file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Fail instead of wrapping timestamps shifted past midnight
    #[arg(long)]
    pub strict: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Validated offset. Checked before any file is read or created.
    pub fn offset(&self) -> Result<Offset> {
        Offset::from_seconds(self.offset_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShiftError;

    #[test]
    fn test_positional_arguments() {
        let args = Args::try_parse_from(["subshift", "movie.srt", "2.5"]).unwrap();
        assert_eq!(args.srt_file, PathBuf::from("movie.srt"));
        assert_eq!(args.offset_seconds, 2.5);
        assert!(!args.strict);
        assert!(args.output.is_none());
    }

    #[test]
    fn test_negative_offset() {
        let args = Args::try_parse_from(["subshift", "movie.srt", "-1.5", "--strict"]).unwrap();
        assert_eq!(args.offset_seconds, -1.5);
        assert!(args.strict);
    }

    #[test]
    fn test_options() {
        let args = Args::try_parse_from([
            "subshift", "-v", "-o", "out.srt", "-c", "cfg.toml", "movie.srt", "3",
        ])
        .unwrap();
        assert!(args.verbose);
        assert_eq!(args.output, Some(PathBuf::from("out.srt")));
        assert_eq!(args.config, Some(PathBuf::from("cfg.toml")));
        assert_eq!(args.offset_seconds, 3.0);
    }

    #[test]
    fn test_non_finite_offset_is_rejected() {
        for value in ["NaN", "inf"] {
            let args = Args::try_parse_from(["subshift", "movie.srt", value]).unwrap();
            assert!(
                matches!(args.offset(), Err(ShiftError::Argument(_))),
                "{} should be rejected",
                value
            );
        }

        let args = Args::try_parse_from(["subshift", "movie.srt", "-1.5"]).unwrap();
        assert_eq!(args.offset().unwrap(), Offset::from_millis(-1500));
    }

    #[test]
    fn test_argument_errors() {
        assert!(Args::try_parse_from(["subshift", "movie.srt", "soon"]).is_err());
        assert!(Args::try_parse_from(["subshift", "movie.srt"]).is_err());
        assert!(Args::try_parse_from(["subshift"]).is_err());
    }
}
