//! Command-line host for Stirling-PDF update checks.
//!
//! Loads settings, installs logging and wires an announcement source into the
//! update facade.

pub mod cli;
pub mod logging;
pub mod paths;
pub mod settings;
