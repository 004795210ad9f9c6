//! Jobfile CLI - check, format, merge and inspect stepper jobfiles.
//!
//! The codec itself never touches the filesystem; this crate supplies the
//! file handling around it and the `jobfile` command.
//!
//! - [`cli`]: Command-line interface
//! - [`io`]: Reading and writing jobfiles on disk
//! - [`error`]: Error types and Result alias

pub mod cli;
pub mod error;
pub mod io;

pub use error::{CliError, Result};
pub use io::{read_jobfile, write_jobfile};
