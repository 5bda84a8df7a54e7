//! Subshift - shift SRT subtitle timing by a fixed offset
//!
//! Every `HH:MM:SS,mmm --> HH:MM:SS,mmm` line of a subtitle file is moved
//! by the same signed number of seconds; all other lines are copied as-is.

pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod offsetter;
pub mod timestamp;
pub mod workflow;
