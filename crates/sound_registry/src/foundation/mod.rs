//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Math types and range helpers
//! - Typed handles over slot maps
//! - Logging utilities

pub mod math;
pub mod collections;
pub mod logging;
