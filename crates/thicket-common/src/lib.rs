//! Common utilities for Thicket.
//!
//! This crate provides shared infrastructure used by all Thicket components:
//! - **Warning System** - deduplicated, colored terminal output for repaired markup

pub mod warning;
