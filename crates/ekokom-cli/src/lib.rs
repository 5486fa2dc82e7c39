//! CLI library components for the packaging-waste report engine.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod status;
pub mod summary;
pub mod types;
