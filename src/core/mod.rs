//! Core application functionality
//!
//! This module contains the command line program built on the library:
//! - CLI parsing, validation and settings resolution
//! - The user settings file
//! - The run pipeline from text to SVG frames
//! - Fatal error reporting

pub mod cli;
pub mod config_file;
pub mod platform;
pub mod runner;

// Re-export commonly used items
pub use cli::{CliArgs, Settings};
pub use config_file::ConfigFile;
pub use runner::run_app;
