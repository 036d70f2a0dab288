//! Common test utilities for depsync CLI tests.
//!
//! This module provides:
//! - `TestWorkspace`: an isolated pnpm workspace in a temp directory
//! - Fixtures: manifest builders for workspace packages

#![allow(dead_code)]

pub mod fixtures;
pub mod workspace;

pub use fixtures::*;
pub use workspace::*;
