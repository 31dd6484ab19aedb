//! Canonical probability distributions behind one interface.
//!
//! Every distribution in [`dist`] is a small immutable value type with a
//! validating constructor, a `new_unchecked` escape hatch, and trait
//! implementations from [`traits`] for whatever is mathematically defined
//! (density, cdf, quantiles, moments, entropy, sampling).
//!
//! The centerpiece is [`dist::NormalInverseGamma`], the conjugate prior for a
//! Gaussian with unknown mean and variance.
//!
//! # Example
//!
//! ```
//! use distcan::prelude::*;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::SmallRng::seed_from_u64(0x1234);
//!
//! let nig = NormalInverseGamma::new(0.0, 1.0, 5.0, 6.0).unwrap();
//!
//! // joint density at (mean = 1, variance = 3)
//! let f = nig.pdf(&(1.0, 3.0));
//! assert!((f - 0.011_727_232_702_125_35).abs() < 1E-14);
//!
//! // ancestral draws of (mean, variance) pairs
//! let pairs: Vec<(f64, f64)> = nig.sample(10, &mut rng);
//! assert!(pairs.iter().all(|&(_, s)| s > 0.0));
//! ```
#![warn(
    clippy::all,
    clippy::imprecise_flops,
    clippy::suboptimal_flops,
    clippy::unseparated_literal_suffix,
    clippy::unreadable_literal,
    clippy::option_option,
    clippy::implicit_clone
)]
#[cfg(feature = "serde1")]
extern crate serde;

pub mod consts;
pub mod data;
pub mod dist;
pub mod misc;
pub mod prelude;
pub mod traits;

mod test;

#[macro_export]
macro_rules! impl_display {
    ($kind: ty) => {
        impl ::std::fmt::Display for $kind {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                write!(f, "{}", String::from(self))
            }
        }
    };
}
