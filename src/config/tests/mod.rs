//! Unit tests for configuration loading and precedence.
//!
//! - `helpers`: Shared test utilities
//! - `cli_flags`: Short flag parsing through the real loader
//! - `precedence`: Layer precedence tests
//! - `operation_mode`: Operation mode determination tests
//! - `field_resolution`: Locator, token, identity and view option resolution

mod field_resolution;
mod helpers;
