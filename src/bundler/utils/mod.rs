//! Shared helpers for packaging phases.

pub mod fs;
