use std::borrow::Cow;
use tracing::debug;

use crate::document::{SubtitleDocument, split_terminator};
use crate::error::{Result, ShiftError};
use crate::timestamp::{Offset, Timestamp, TimestampError, TimestampPolicy};

/// Separator between the start and end of a timing line
pub const TIMING_ARROW: &str = "-->";

/// Shifts every timing line of a subtitle document by a fixed offset.
#[derive(Debug, Clone, Copy)]
pub struct Offsetter {
    offset: Offset,
    policy: TimestampPolicy,
}

impl Offsetter {
    pub fn new(offset: Offset, policy: TimestampPolicy) -> Self {
        Self { offset, policy }
    }

    pub fn offset(&self) -> Offset {
        self.offset
    }

    pub fn policy(&self) -> TimestampPolicy {
        self.policy
    }

    /// Shift all timing lines. The result has exactly as many lines as
    /// `lines`, in the same order; all other lines are copied verbatim.
    pub fn offset_document<S: AsRef<str>>(&self, lines: &[S]) -> Result<Vec<String>> {
        let mut shifted = 0usize;
        let new_lines = lines
            .iter()
            .enumerate()
            .map(|(index, line)| {
                let new_line = self.offset_line_at(line.as_ref(), index + 1)?;
                if let Cow::Owned(_) = new_line {
                    shifted += 1;
                }
                Ok(new_line.into_owned())
            })
            .collect::<Result<Vec<_>>>()?;

        debug!("Shifted {} of {} lines", shifted, new_lines.len());
        Ok(new_lines)
    }

    /// Document form of [`Offsetter::offset_document`].
    pub fn apply(&self, document: &SubtitleDocument) -> Result<SubtitleDocument> {
        self.offset_document(document.lines())
            .map(SubtitleDocument::from_lines)
    }

    /// Shift a single line; borrowed back unchanged unless it is a timing line.
    pub fn offset_line<'a>(&self, line: &'a str) -> Result<Cow<'a, str>> {
        self.offset_line_at(line, 1)
    }

    fn offset_line_at<'a>(&self, line: &'a str, line_number: usize) -> Result<Cow<'a, str>> {
        if !line.contains(TIMING_ARROW) {
            return Ok(Cow::Borrowed(line));
        }

        let (content, terminator) = split_terminator(line);
        let Some((start, end)) = split_timing(content) else {
            return Ok(Cow::Borrowed(line));
        };

        let start = self.shift(start, line_number)?;
        let end = self.shift(end, line_number)?;

        Ok(Cow::Owned(format!(
            "{} {} {}{}",
            start, TIMING_ARROW, end, terminator
        )))
    }

    fn shift(&self, text: &str, line_number: usize) -> Result<Timestamp> {
        let timestamp: Timestamp = text
            .parse()
            .map_err(|e: TimestampError| format_error(line_number, text, &e.to_string()))?;

        self.policy
            .apply(timestamp, self.offset)
            .ok_or_else(|| ShiftError::TimestampOutOfRange {
                line: line_number,
                timestamp: text.to_string(),
            })
    }
}

/// Split a timing line at the first arrow that has whitespace on both sides.
/// Caption text such as `a-->b` or `<!-- note -->` yields `None`.
fn split_timing(content: &str) -> Option<(&str, &str)> {
    let content = content.trim();
    content.match_indices(TIMING_ARROW).find_map(|(at, arrow)| {
        let (start, rest) = content.split_at(at);
        let end = &rest[arrow.len()..];
        let spaced = start.ends_with(char::is_whitespace) && end.starts_with(char::is_whitespace);
        spaced.then(|| (start.trim(), end.trim()))
    })
}

fn format_error(line: usize, text: &str, reason: &str) -> ShiftError {
    ShiftError::Format {
        line,
        message: format!("{} ({:?})", reason, text),
    }
}
