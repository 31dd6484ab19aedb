//! Numerical utilities
mod func;
mod ks;
pub mod root_finding;

pub use func::*;
pub use ks::*;
