// tests that Clone, Debug, Display, and PartialEq are implemented for a
// distribution, and that continuous distributions agree with themselves
#[macro_export]
macro_rules! test_basic_impls {
    ([continuous] $fx: expr) => {
        $crate::test_basic_impls!($fx);

        #[test]
        fn ln_pdf_agrees_with_pdf_at_draws() {
            use $crate::traits::{ContinuousDistr, Sampleable};
            let fx = $fx;
            let mut rng = rand::thread_rng();
            for _ in 0..100 {
                let x: f64 = fx.draw(&mut rng);
                assert::close(fx.ln_pdf(&x), fx.pdf(&x).ln(), 1E-9);
            }
        }

        #[test]
        fn draws_should_be_in_support() {
            use $crate::traits::{Sampleable, Support};
            let fx = $fx;
            let mut rng = rand::thread_rng();
            let xs: Vec<f64> = fx.sample(100, &mut rng);
            assert_eq!(xs.len(), 100);
            assert!(xs.iter().all(|x| fx.supports(x)));
        }
    };
    ($fx: expr) => {
        #[test]
        fn should_impl_debug_clone_and_partialeq() {
            assert_eq!($fx, $fx.clone());
            let _s1 = format!("{:?}", $fx);
        }

        #[test]
        fn display_matches_string_from() {
            let fx = $fx;
            assert_eq!(format!("{}", fx), String::from(&fx));
        }
    };
}
