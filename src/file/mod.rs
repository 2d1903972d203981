//! File I/O for source documents, transition lists and results.
//!
//! This module loads JSON or YAML input from disk or stdin and writes
//! extracted results back out.

pub mod loader;
pub mod writer;
