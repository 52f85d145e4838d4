//! Utility modules providing cross-cutting functionality.
//!
//! This module contains helper abstractions that support the main library features,
//! including conditional parallel processing for native and WASM builds.

pub mod parallel;
