//! Requote Core Library
//!
//! Per-field quoting repair for tab-delimited files, so fields with
//! embedded quote characters survive strict CSV/TSV bulk loaders.

pub mod error;
pub mod field;
pub mod logging;
pub mod record;
pub mod stream;

/// The delimiter the tool is built for
pub const DEFAULT_DELIMITER: char = '\t';
