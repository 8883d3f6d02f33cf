//! Shared configuration, constants, and lookup tables for the almanac workspace.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
