//! Shared utilities for the vox workspace.

pub mod logging;

pub use logging::init_tracing;
