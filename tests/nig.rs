use distcan::prelude::*;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;

fn nig() -> NormalInverseGamma {
    NormalInverseGamma::new(0.0, 1.0, 5.0, 6.0).unwrap()
}

#[test]
fn seeded_draws_are_reproducible() {
    let nig = nig();

    let mut rng_a = Xoshiro256Plus::seed_from_u64(1337);
    let mut rng_b = Xoshiro256Plus::seed_from_u64(1337);

    let xs: Vec<(f64, f64)> = nig.sample(100, &mut rng_a);
    let ys: Vec<(f64, f64)> = nig.sample(100, &mut rng_b);

    assert_eq!(xs, ys);
}

#[test]
fn single_draws_match_multi_draw() {
    let nig = nig();

    let mut rng_a = Xoshiro256Plus::seed_from_u64(42);
    let mut rng_b = Xoshiro256Plus::seed_from_u64(42);

    let xs: Vec<(f64, f64)> = nig.sample(10, &mut rng_a);
    let ys: Vec<(f64, f64)> = (0..10).map(|_| nig.draw(&mut rng_b)).collect();

    assert_eq!(xs, ys);
}

#[test]
fn alias_names_are_the_same_types() {
    let a = NormalInvGamma::new(0.0, 1.0, 5.0, 6.0).unwrap();
    assert_eq!(a, nig());

    let g: Normal = Gaussian::standard();
    assert_eq!(g.to_string(), "Normal(mu=0.00000, sigma=1.00000)");

    let ig: InverseGamma = InvGamma::new(5.0, 6.0).unwrap();
    let t: T = StudentsT::new(3.0).unwrap();
    let f: F = FisherF::new(4.0, 11.0).unwrap();
    let x2: Chi2 = Chisq::new(2.0).unwrap();
    assert_eq!(ig.to_string(), "InverseGamma(alpha=5.00000, beta=6.00000)");
    assert_eq!(t.to_string(), "T(df=3.00000)");
    assert_eq!(f.to_string(), "F(d1=4.00000, d2=11.00000)");
    assert_eq!(x2.to_string(), "ChiSquared(k=2.00000)");
}

#[test]
fn golden_density_through_every_entry_point() {
    let nig = nig();
    let expected = 0.011_727_232_702_125_35;

    assert!((nig.pdf(&(1.0, 3.0)) - expected).abs() < 1E-14);
    assert!((nig.ln_pdf(&(1.0, 3.0)).exp() - expected).abs() < 1E-14);

    let fs = nig.pdf_broadcast(&[1.0, 1.0], 3.0).unwrap();
    assert_eq!(fs.len(), 2);
    assert!(fs.iter().all(|f| (f - expected).abs() < 1E-14));

    let lnfs = nig.ln_pdfs(&[(1.0, 3.0), (0.0, 1.0)]);
    assert_eq!(lnfs.len(), 2);
    assert!((lnfs[0] - expected.ln()).abs() < 1E-12);
}

#[test]
fn mode_and_mean() {
    assert_eq!(nig().mode(), Some((0.0, 1.0)));
    assert_eq!(nig().mean(), Some((0.0, 1.5)));

    let heavy = NormalInverseGamma::new(2.0, 1.0, 1.0, 6.0).unwrap();
    assert_eq!(heavy.mean(), Some((2.0, f64::INFINITY)));
}

#[test]
fn posterior_concentrates_on_data() {
    let mut rng = Xoshiro256Plus::seed_from_u64(7);
    let truth = Gaussian::new(1.5, 0.5).unwrap();
    let xs: Vec<f64> = truth.sample(5_000, &mut rng);

    let post = nig().posterior(&xs);
    let (mu, sig2) = post.mean().unwrap();

    assert!((mu - 1.5).abs() < 0.05);
    assert!((sig2 - 0.25).abs() < 0.05);
}

#[test]
fn sampled_gaussians_are_valid_components() {
    let mut rng = Xoshiro256Plus::seed_from_u64(99);
    let gs: Vec<Gaussian> = nig().sample(20, &mut rng);
    for g in gs {
        let f = g.f(&0.0_f64);
        assert!(f.is_finite() && f > 0.0);
    }
}
