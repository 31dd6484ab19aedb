//! Probability distributions
//!
//! Every distribution also answers to the name it commonly goes by in
//! statistics packages, e.g. [`Normal`] for [`Gaussian`] or [`T`] for
//! [`StudentsT`].
mod beta;
mod chi;
mod chi_squared;
mod fisher_f;
mod gamma;
mod gaussian;
mod invgamma;
mod lognormal;
mod normal_inv_gamma;
mod students_t;
mod uniform;

pub use beta::{Beta, BetaError};
pub use chi::{Chi, ChiError};
pub use chi_squared::{ChiSquared, ChiSquaredError};
pub use fisher_f::{FisherF, FisherFError};
pub use gamma::{Gamma, GammaError};
pub use gaussian::{Gaussian, GaussianError, GaussianParameters};
pub use invgamma::{InvGamma, InvGammaError};
pub use lognormal::{LogNormal, LogNormalError};
pub use normal_inv_gamma::{
    Broadcast, BroadcastError, NormalInverseGamma, NormalInverseGammaError,
    NormalInverseGammaParameters,
};
pub use students_t::{StudentsT, StudentsTError};
pub use uniform::{Uniform, UniformError, UniformParameters};

pub type Normal = Gaussian;
pub type InverseGamma = InvGamma;
pub type NormalInvGamma = NormalInverseGamma;
pub type T = StudentsT;
pub type TDist = StudentsT;
pub type F = FisherF;
pub type FDist = FisherF;
pub type Chisq = ChiSquared;
pub type Chi2 = ChiSquared;
