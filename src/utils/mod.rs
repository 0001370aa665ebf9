//! Path and formatting helpers.
//!
//! Provides:
//! - [`HumanSize`] - byte counts normalized to B/KB/MB/GB/TB
//! - [`path`] - segment-sequence path manipulation

pub mod format;
pub mod path;

pub use format::HumanSize;
