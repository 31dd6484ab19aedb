//! Data utilities
mod gaussian;

pub use self::gaussian::GaussianSuffStat;
