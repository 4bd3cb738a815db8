//! Shared data types for the barnforge climate and growth pipeline.

pub mod advisory;
pub mod environment;
pub mod equipment;
pub mod file_formats;
pub mod flock;
pub mod report;
