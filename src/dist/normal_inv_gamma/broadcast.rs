use std::fmt;

use crate::dist::NormalInverseGamma;
use crate::traits::HasDensity;

/// A density argument that is either one value or a slice of values.
///
/// Scalars pair with every element of the other argument; two slices pair up
/// elementwise and must have the same length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Broadcast<'a> {
    /// A single value
    Scalar(f64),
    /// One value per element
    Slice(&'a [f64]),
}

impl<'a> Broadcast<'a> {
    /// Number of elements, `None` for a scalar
    pub fn len(&self) -> Option<usize> {
        match self {
            Broadcast::Scalar(_) => None,
            Broadcast::Slice(xs) => Some(xs.len()),
        }
    }

    #[inline]
    fn get(&self, ix: usize) -> f64 {
        match self {
            Broadcast::Scalar(x) => *x,
            Broadcast::Slice(xs) => xs[ix],
        }
    }
}

impl<'a> From<f64> for Broadcast<'a> {
    fn from(x: f64) -> Self {
        Broadcast::Scalar(x)
    }
}

impl<'a> From<&'a [f64]> for Broadcast<'a> {
    fn from(xs: &'a [f64]) -> Self {
        Broadcast::Slice(xs)
    }
}

impl<'a> From<&'a Vec<f64>> for Broadcast<'a> {
    fn from(xs: &'a Vec<f64>) -> Self {
        Broadcast::Slice(xs.as_slice())
    }
}

impl<'a, const N: usize> From<&'a [f64; N]> for Broadcast<'a> {
    fn from(xs: &'a [f64; N]) -> Self {
        Broadcast::Slice(xs.as_slice())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BroadcastError {
    /// `x` and `sig2` are both slices of different lengths
    LengthMismatch { x_len: usize, sig2_len: usize },
}

impl NormalInverseGamma {
    fn broadcast_with<F>(
        &self,
        x: Broadcast,
        sig2: Broadcast,
        func: F,
    ) -> Result<Vec<f64>, BroadcastError>
    where
        F: Fn(&(f64, f64)) -> f64,
    {
        let n = match (x.len(), sig2.len()) {
            (Some(x_len), Some(sig2_len)) if x_len != sig2_len => {
                return Err(BroadcastError::LengthMismatch { x_len, sig2_len })
            }
            (Some(n), _) | (None, Some(n)) => n,
            (None, None) => 1,
        };
        Ok((0..n).map(|ix| func(&(x.get(ix), sig2.get(ix)))).collect())
    }

    /// Joint density over any mix of scalar and slice arguments.
    ///
    /// Two scalars produce a single element.
    ///
    /// # Example
    ///
    /// ```
    /// use distcan::dist::{BroadcastError, NormalInverseGamma};
    ///
    /// let nig = NormalInverseGamma::new(0.0, 1.0, 5.0, 6.0).unwrap();
    ///
    /// let fs = nig.pdf_broadcast(&[0.0, 1.0, 2.0], 3.0).unwrap();
    /// assert_eq!(fs.len(), 3);
    /// assert!((fs[1] - 0.011_727_232_702_125_35).abs() < 1E-14);
    ///
    /// let err = nig.pdf_broadcast(&[0.0, 1.0], &[1.0, 2.0, 3.0]);
    /// assert_eq!(
    ///     err,
    ///     Err(BroadcastError::LengthMismatch { x_len: 2, sig2_len: 3 })
    /// );
    /// ```
    pub fn pdf_broadcast<'a, 'b>(
        &self,
        x: impl Into<Broadcast<'a>>,
        sig2: impl Into<Broadcast<'b>>,
    ) -> Result<Vec<f64>, BroadcastError> {
        self.broadcast_with(x.into(), sig2.into(), |xs| self.f(xs))
    }

    /// Log joint density over any mix of scalar and slice arguments
    pub fn ln_pdf_broadcast<'a, 'b>(
        &self,
        x: impl Into<Broadcast<'a>>,
        sig2: impl Into<Broadcast<'b>>,
    ) -> Result<Vec<f64>, BroadcastError> {
        self.broadcast_with(x.into(), sig2.into(), |xs| self.ln_f(xs))
    }
}

impl std::error::Error for BroadcastError {}

impl fmt::Display for BroadcastError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch { x_len, sig2_len } => write!(
                f,
                "cannot broadcast x of length {} against sig2 of length {}",
                x_len, sig2_len
            ),
        }
    }
}
