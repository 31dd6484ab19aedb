use rand::Rng;
use special::Gamma as _;

use crate::consts::HALF_LN_2PI;
use crate::data::GaussianSuffStat;
use crate::dist::{Gaussian, NormalInverseGamma};
use crate::traits::*;

#[inline]
fn ln_z(v: f64, a: f64, b: f64) -> f64 {
    // 0.5 * v.ln() + a.ln_gamma().0 - a * b.ln()
    let p1 = v.ln().mul_add(0.5, a.ln_gamma().0);
    -b.ln().mul_add(a, -p1)
}

impl HasDensity<Gaussian> for NormalInverseGamma {
    fn ln_f(&self, x: &Gaussian) -> f64 {
        let sigma = x.sigma();
        self.ln_f(&(x.mu(), sigma * sigma))
    }
}

impl Sampleable<Gaussian> for NormalInverseGamma {
    fn draw<R: Rng>(&self, rng: &mut R) -> Gaussian {
        let (mu, sig2): (f64, f64) = self.draw(rng);
        Gaussian::new_unchecked(mu, sig2.sqrt())
    }
}

impl NormalInverseGamma {
    /// Posterior given the sufficient statistic of Gaussian observations
    #[allow(clippy::many_single_char_names)]
    pub fn posterior_from_stat(&self, stat: &GaussianSuffStat) -> Self {
        let n = stat.n() as f64;

        let (m, v, a, b) = self.params();

        let v_inv = v.recip();

        let vn_inv = v_inv + n;
        let vn = vn_inv.recip();
        let mn = v_inv.mul_add(m, stat.sum_x()) / vn_inv;
        let an = n.mul_add(0.5, a);
        let p1 = (m * m).mul_add(v_inv, stat.sum_x_sq());
        let bn = (-mn * mn).mul_add(vn_inv, p1).mul_add(0.5, b);

        NormalInverseGamma::new_unchecked(mn, vn, an, bn)
    }

    /// Posterior distribution after observing Gaussian data `xs`
    ///
    /// # Example
    ///
    /// ```
    /// use distcan::dist::NormalInverseGamma;
    ///
    /// let prior = NormalInverseGamma::new(0.0, 1.0, 1.0, 1.0).unwrap();
    /// let post = prior.posterior(&[1.0, 2.0, 3.0]);
    ///
    /// assert_eq!(post.shape(), 2.5);
    /// assert_eq!(post.v0(), 0.25);
    /// assert!((post.mu() - 1.5).abs() < 1E-12);
    ///
    /// // no data, no update
    /// assert_eq!(prior.posterior(&[]), prior);
    /// ```
    pub fn posterior(&self, xs: &[f64]) -> Self {
        if xs.is_empty() {
            self.clone()
        } else {
            self.posterior_from_stat(&GaussianSuffStat::from(xs))
        }
    }

    /// Log marginal likelihood of the observations `xs`
    pub fn ln_m(&self, xs: &[f64]) -> f64 {
        if xs.is_empty() {
            return 0.0;
        }
        let stat = GaussianSuffStat::from(xs);
        let post = self.posterior_from_stat(&stat);
        let n = stat.n() as f64;
        let lnz_0 = ln_z(self.v0(), self.shape(), self.scale());
        let lnz_n = ln_z(post.v0(), post.shape(), post.scale());
        n.mul_add(-HALF_LN_2PI, lnz_n - lnz_0)
    }

    /// Log posterior predictive density of `y` given the observations `xs`
    ///
    /// With no observations this is the prior predictive, a scaled and
    /// shifted Student's t with 2α degrees of freedom.
    pub fn ln_pp(&self, y: f64, xs: &[f64]) -> f64 {
        let mut stat = GaussianSuffStat::from(xs);
        let post_n = self.posterior_from_stat(&stat);
        let lnz_n = ln_z(post_n.v0(), post_n.shape(), post_n.scale());

        stat.observe(&y);
        let post_m = self.posterior_from_stat(&stat);
        let lnz_m = ln_z(post_m.v0(), post_m.shape(), post_m.scale());

        -HALF_LN_2PI + lnz_m - lnz_n
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::LN_2PI;
    use crate::dist::{InvGamma, StudentsT};

    const TOL: f64 = 1E-12;

    fn prior() -> NormalInverseGamma {
        NormalInverseGamma::new(0.1, 1.2, 2.3, 3.4).unwrap()
    }

    const XS: [f64; 4] = [0.5, -1.0, 2.2, 1.1];

    // N(μ | m, sqrt(vσ²)) InvGamma(σ² | a, b), written out term by term
    fn ln_f_ref(gauss: &Gaussian, nig: &NormalInverseGamma) -> f64 {
        let (m, v, a, b) = nig.params();
        let mu = gauss.mu();
        let sigma = gauss.sigma();
        let sig2 = sigma * sigma;
        let lz_inv = a.mul_add(
            b.ln(),
            -(0.5_f64.mul_add(v.ln() + LN_2PI, a.ln_gamma().0)),
        );
        let d = mu - m;
        (d * d).mul_add(
            -0.5 / (sig2 * v),
            (a + 1.).mul_add(-sig2.ln(), 0.5_f64.mul_add(-sig2.ln(), lz_inv))
                - b / sig2,
        )
    }

    #[test]
    fn ln_f_of_gaussian_vs_reference() {
        let nig = prior();
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let gauss: Gaussian = nig.draw(&mut rng);
            let ln_f = nig.ln_f(&gauss);
            let ln_f_ref = ln_f_ref(&gauss, &nig);
            assert::close(ln_f, ln_f_ref, 1E-9 * ln_f.abs().max(1.0));
        }
    }

    #[test]
    fn ln_f_of_gaussian_off_center_prior() {
        // N(0.5 | 0.1, sqrt(1.2 * 1.1)) InvGamma(1.1 | 2.3, 3.4)
        let nig = prior();
        let gauss = Gaussian::new(0.5, 1.1_f64.sqrt()).unwrap();
        let ln_normal = -0.5 * (1.2 * 1.1 * std::f64::consts::TAU).ln()
            - 0.16 / (2.0 * 1.2 * 1.1);
        let ln_ig: f64 = InvGamma::new(2.3, 3.4).unwrap().ln_f(&1.1_f64);
        assert::close(nig.ln_f(&gauss), ln_normal + ln_ig, TOL);
        assert::close(ln_f_ref(&gauss, &nig), ln_normal + ln_ig, TOL);
    }

    #[test]
    fn gaussian_density_matches_joint_density() {
        let nig = prior();
        let gauss = Gaussian::new(0.5, 1.1_f64.sqrt()).unwrap();
        assert::close(nig.ln_f(&gauss), nig.ln_f(&(0.5, 1.1)), TOL);
    }

    #[test]
    fn drawn_gaussians_are_valid() {
        let nig = prior();
        let mut rng = rand::thread_rng();
        let gs: Vec<Gaussian> = nig.sample(50, &mut rng);
        assert_eq!(gs.len(), 50);
        assert!(gs.iter().all(|g| g.mu().is_finite() && g.sigma() > 0.0));
    }

    #[test]
    fn posterior_params() {
        let post = prior().posterior(&XS);
        assert::close(post.mu(), 0.596_551_724_137_931, TOL);
        assert::close(post.v0(), 0.206_896_551_724_137_94, TOL);
        assert::close(post.shape(), 4.3, TOL);
        assert::close(post.scale(), 6.194_137_931_034_483, TOL);
    }

    #[test]
    fn posterior_from_stat_matches_posterior_from_data() {
        let mut stat = GaussianSuffStat::new();
        stat.observe_many(&XS[..]);
        assert_eq!(prior().posterior_from_stat(&stat), prior().posterior(&XS));
    }

    #[test]
    fn posterior_of_no_data_is_prior() {
        assert_eq!(prior().posterior(&[]), prior());
    }

    #[test]
    fn sequential_posterior_equals_batch_posterior() {
        let seq = XS
            .iter()
            .fold(prior(), |nig, &x| nig.posterior(&[x]));
        let batch = prior().posterior(&XS);
        assert::close(seq.mu(), batch.mu(), TOL);
        assert::close(seq.v0(), batch.v0(), TOL);
        assert::close(seq.shape(), batch.shape(), TOL);
        assert::close(seq.scale(), batch.scale(), TOL);
    }

    #[test]
    fn ln_m() {
        assert::close(prior().ln_m(&XS), -7.554_662_411_571_835, TOL);
        assert_eq!(prior().ln_m(&[]), 0.0);
    }

    #[test]
    fn ln_m_is_sum_of_sequential_ln_pp() {
        let nig = prior();
        let sum: f64 = (0..XS.len()).map(|i| nig.ln_pp(XS[i], &XS[..i])).sum();
        assert::close(sum, nig.ln_m(&XS), TOL);
    }

    #[test]
    fn ln_pp() {
        assert::close(prior().ln_pp(0.7, &XS), -1.227_898_498_930_445_4, TOL);
        assert::close(prior().ln_pp(0.7, &[]), -1.629_123_329_114_868_8, TOL);
    }

    #[test]
    fn prior_predictive_is_students_t() {
        let nig = prior();
        let (m, v, a, b) = nig.params();
        let scale = (b * (1.0 + v) / a).sqrt();
        let t = StudentsT::new(2.0 * a).unwrap();
        for y in [-2.0_f64, 0.0, 0.7, 3.3] {
            let expected = t.ln_f(&((y - m) / scale)) - scale.ln();
            assert::close(nig.ln_pp(y, &[]), expected, 1E-10);
        }
    }
}
