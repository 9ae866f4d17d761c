//! CLI-specific utilities for aurorax-search
//!
//! This module contains code specific to the command-line interface,
//! separate from the core library functionality.

pub mod parse;

pub use parse::{parse_block, parse_conjunction_type, parse_max_distance};
