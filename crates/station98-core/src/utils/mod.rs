//! Utility functions for timestamps and string formatting.

pub mod format;

pub use format::{format_date, format_relative, parse_timestamp, truncate_string};
