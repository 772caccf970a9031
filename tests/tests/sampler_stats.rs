// tests/sampler_stats.rs
// Statistical checks of the discrete, continuous and trapdoor samplers

mod common;

use solmae_algorithms::drbg::HmacDrbg;
use solmae_algorithms::lattice::{sample_preimage, Projection};
use solmae_algorithms::{CdtTable, Complex, GaussianSampler, SampleParams, SamplerState, TrapdoorBasis};
use solmae_algorithms::EntropySource;
use solmae_tests::seeded_rng;
use solmae_tests::stats::{chi_square_discrete_gaussian, Summary};
use statrs::distribution::{ContinuousCDF, Normal};

const Q: u32 = 12289;

#[test]
fn test_cdt_moments_sigma_3() {
    common::init_tracing();
    let sigma = 3.0;
    let table = CdtTable::build(sigma, 10.0).unwrap();
    let samples = table.sample_vec(8192, &mut seeded_rng(2024));

    let summary = Summary::of_ints(&samples);
    println!("CDT sigma=3: mean {:.4}, sd {:.4}", summary.mean, summary.std_dev);
    assert!(summary.mean.abs() < 0.3, "mean {}", summary.mean);
    assert!(
        summary.std_dev >= 0.8 * sigma && summary.std_dev <= 1.2 * sigma,
        "sd {}",
        summary.std_dev
    );
    assert!(samples.iter().all(|x| x.unsigned_abs() as usize <= table.cutoff()));
}

#[test]
fn test_cdt_goodness_of_fit() {
    for (sigma, seed) in [(1.55, 11u64), (3.0, 12), (6.0, 13)] {
        let table = CdtTable::build(sigma, 10.0).unwrap();
        let samples = table.sample_vec(20_000, &mut seeded_rng(seed));
        let result = chi_square_discrete_gaussian(&samples, sigma, 1e-4);
        println!(
            "CDT sigma={}: chi2 {:.2} (df {}, critical {:.2})",
            sigma, result.statistic, result.degrees_of_freedom, result.critical
        );
        assert!(result.passes(), "sigma {} chi2 {:?}", sigma, result);
    }
}

#[test]
fn test_cdt_sign_balance() {
    let table = CdtTable::build(2.0, 10.0).unwrap();
    let samples = table.sample_vec(10_000, &mut seeded_rng(5));
    let positive = samples.iter().filter(|&&x| x > 0).count() as f64;
    let negative = samples.iter().filter(|&&x| x < 0).count() as f64;
    assert!((positive / negative - 1.0).abs() < 0.08, "{} vs {}", positive, negative);
}

#[test]
fn test_box_muller_matches_normal_cdf() {
    let mut sampler = GaussianSampler::new(HmacDrbg::new(b"box-muller-integration"));
    let draws: Vec<f64> = (0..20_000).map(|_| sampler.standard_normal()).collect();

    let summary = Summary::of(&draws);
    assert!(summary.mean.abs() < 0.03, "mean {}", summary.mean);
    assert!((summary.std_dev - 1.0).abs() < 0.03, "sd {}", summary.std_dev);

    let normal = Normal::new(0.0, 1.0).unwrap();
    for x in [-2.0, -1.0, 0.0, 0.5, 1.5] {
        let empirical = draws.iter().filter(|&&d| d <= x).count() as f64 / draws.len() as f64;
        assert!(
            (empirical - normal.cdf(x)).abs() < 0.015,
            "cdf at {}: {} vs {}",
            x,
            empirical,
            normal.cdf(x)
        );
    }
}

#[test]
fn test_z_sample_centres() {
    let mut sampler = GaussianSampler::new(seeded_rng(77));
    for center in [-4.25, 0.3, 17.5] {
        let draws: Vec<i64> = (0..20_000).map(|_| sampler.z_sample(center, 2.0)).collect();
        let summary = Summary::of_ints(&draws);
        assert!((summary.mean - center).abs() < 0.1, "center {} mean {}", center, summary.mean);
        assert!((summary.std_dev - 2.0).abs() < 0.15, "sd {}", summary.std_dev);
    }
}

#[test]
fn test_peikert_per_coordinate_spread() {
    let mut sampler = GaussianSampler::new(HmacDrbg::new(b"peikert-integration"));
    let t = [0.0, 5.5, -3.0];
    let sigma = [0.5, 2.0, 4.0];
    let eta = 1.0;

    let mut columns = vec![Vec::new(); 3];
    for _ in 0..8000 {
        let z = sampler.peikert(&t, &sigma, eta).unwrap();
        for (col, &zi) in columns.iter_mut().zip(&z) {
            col.push(zi);
        }
    }
    for (i, col) in columns.iter().enumerate() {
        let summary = Summary::of_ints(col);
        // continuous perturbation, rounding noise of width eta, then rounding
        let target = (sigma[i] * sigma[i] + eta * eta + 1.0 / 12.0).sqrt();
        assert!((summary.mean - t[i]).abs() < 0.15, "coord {} mean {}", i, summary.mean);
        assert!(
            (summary.std_dev / target - 1.0).abs() < 0.1,
            "coord {} sd {} target {}",
            i,
            summary.std_dev,
            target
        );
    }
}

fn diagonal_basis(d: usize) -> TrapdoorBasis {
    let one = vec![Complex::ONE; d];
    let zero = vec![Complex::ZERO; d];
    TrapdoorBasis {
        d,
        b1_fft: (one.clone(), zero.clone()),
        b2_fft: (zero.clone(), one.clone()),
        b2_tilde_fft: (zero.clone(), one.clone()),
        beta1_fft: Projection::Pair(one.clone(), zero.clone()),
        beta2_fft: Projection::Pair(zero, one),
        sigma1: vec![1.2; d],
        sigma2: vec![1.2; d],
    }
}

#[test]
fn test_trapdoor_preimage_tracks_target() {
    let d = 64;
    let basis = diagonal_basis(d);
    let mut sampler = GaussianSampler::new(HmacDrbg::new(b"trapdoor-integration"));
    let c1: Vec<Complex> = (0..d).map(|i| Complex::new(i as f64, 0.0)).collect();
    let c2: Vec<Complex> = (0..d).map(|i| Complex::new(-(i as f64), 0.0)).collect();

    let mut err1 = Vec::new();
    let mut err2 = Vec::new();
    for _ in 0..200 {
        let (v1, v2) = sample_preimage((&c1, &c2), &basis, 1.0, &mut sampler).unwrap();
        assert_eq!(v1.len(), d);
        assert!(v1.iter().chain(&v2).all(|z| z.im == 0.0));
        err1.extend(v1.iter().zip(&c1).map(|(v, c)| v.re - c.re));
        err2.extend(v2.iter().zip(&c2).map(|(v, c)| v.re - c.re));
    }
    for errs in [&err1, &err2] {
        let summary = Summary::of(errs);
        assert!(summary.mean.abs() < 0.1, "mean {}", summary.mean);
        assert!(summary.std_dev < 2.5, "sd {}", summary.std_dev);
    }
}

#[test]
fn test_sampler_state_is_reproducible_with_drbg() {
    let params = SampleParams::new(256, Q, 1.55);
    let mut a = SamplerState::with_source(params.clone(), EntropySource::from_seed(b"state")).unwrap();
    let mut b = SamplerState::with_source(params, EntropySource::Os).unwrap();
    b.attach_drbg(b"state");

    assert_eq!(a.sample_noise_poly(), b.sample_noise_poly());
    assert_eq!(a.sample_cbd_poly().unwrap(), b.sample_cbd_poly().unwrap());

    let noise = a.sample_noise_poly_modq();
    assert_eq!(noise.len(), 256);
    assert!(noise.iter().all(|&x| x < Q));
    let summary = Summary::of_ints(&a.sample_noise_poly());
    assert!(summary.std_dev < 3.0 * 1.55);
}
