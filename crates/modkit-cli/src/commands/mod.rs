//! Command implementations.

pub mod build;
pub mod utils;

pub use build::execute as build_execute;
