//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the kernel:
//! - Math types and the axis-aligned box
//! - Frame time management
//! - Logging utilities

pub mod math;
pub mod time;
pub mod logging;
