//! CLI library components for the `comps` binary.

pub mod logging;
pub mod output;
