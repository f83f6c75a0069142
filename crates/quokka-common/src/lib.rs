//! Shared utilities for the Quokka layout engine.

pub mod warning;

pub use warning::{clear_warnings, warn_once};
