//! Utility functions and helpers for menuscan.
//!
//! - `logging`: Tracing initialization and secret redaction.

pub mod logging;
