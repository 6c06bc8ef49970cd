use rand::SeedableRng;
use rand_distr::{Distribution, Gamma, Weibull};
use sindex_diagnostics::{DiagnosticKind, Diagnostics};
use sindex_distr::{Family, FitConfig, Method, Params, fit};

fn rng(seed: u64) -> rand::rngs::StdRng {
    rand::rngs::StdRng::seed_from_u64(seed)
}

#[test]
fn gamma_mle_and_lmoments_agree() {
    let dist = Gamma::new(2.5, 12.0).unwrap();
    let mut r = rng(21);
    let sample: Vec<f64> = (0..500).map(|_| dist.sample(&mut r)).collect();

    let mut diag = Diagnostics::new();
    let mle = fit(&sample, &FitConfig::new(), &mut diag).unwrap();
    let lmom = fit(
        &sample,
        &FitConfig::new().with_method(Method::Lmoments),
        &mut diag,
    )
    .unwrap();
    assert!(diag.is_empty(), "{:?}", diag.entries());

    let (Some(Params::Gamma { shape: a, rate: r1 }), Some(Params::Gamma { shape: b, rate: r2 })) =
        (mle.params().copied(), lmom.params().copied())
    else {
        panic!("expected gamma parameters");
    };
    assert!((a - b).abs() / a < 0.1, "shape {a} vs {b}");
    assert!((r1 - r2).abs() / r1 < 0.1, "rate {r1} vs {r2}");
}

#[test]
fn weibull_fit_passes_its_own_tests() {
    let dist = Weibull::new(15.0, 2.0).unwrap();
    let mut r = rng(5);
    let sample: Vec<f64> = (0..80).map(|_| dist.sample(&mut r)).collect();
    let config = FitConfig::new().with_family(Family::Weibull);
    let mut diag = Diagnostics::new();
    let fitted = fit(&sample, &config, &mut diag).unwrap();
    assert!(fitted.stats().ks_pval().unwrap() > 0.01);
    assert!(fitted.stats().ad_pval().unwrap() > 0.01);
}

#[test]
fn zero_inflated_sample() {
    let dist = Gamma::new(1.5, 4.0).unwrap();
    let mut r = rng(9);
    let mut sample: Vec<f64> = (0..60).map(|_| dist.sample(&mut r)).collect();
    for v in sample.iter_mut().take(15) {
        *v = 0.0;
    }
    let mut diag = Diagnostics::new();
    let fitted = fit(&sample, &FitConfig::new(), &mut diag).unwrap();
    assert!(fitted.is_defined());
    assert_eq!(fitted.stats().prob_zero(), 0.25);
    assert!(fitted.sample().iter().all(|&v| v > 0.0));
}

#[test]
fn failures_are_diagnostics_not_errors() {
    let mut diag = Diagnostics::new();
    let config = FitConfig::new()
        .with_family(Family::Gamma3)
        .with_method(Method::Lmoments);
    // Two values cannot define L-moments.
    let fitted = fit(&[1.0, 2.0], &config, &mut diag).unwrap();
    assert!(!fitted.is_defined());
    assert!(diag.any(|k| matches!(k, DiagnosticKind::InvalidLmoments { .. })));
}
