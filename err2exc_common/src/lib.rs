//! err2exc Common Library
//!
//! Shared vocabulary for the err2exc workspace: the legacy error kinds,
//! their display labels and line format, the exception value a rethrown
//! signal becomes, and configuration loading.
//!
//! # Module Structure
//!
//! - [`kind`] - Error kinds as a typed bitflag set
//! - [`format`] - Display label table and record line formatting
//! - [`location`] - Originating file and line
//! - [`exception`] - Exception value for rethrown signals
//! - [`config`] - Configuration loading and runtime settings
//! - [`prelude`] - Common re-exports for convenience

pub mod config;
pub mod exception;
pub mod format;
pub mod kind;
pub mod location;
pub mod prelude;
