// tests/collaborators.rs
// DRBG, hashing, codec and RLWE pair generation seen from outside the crate

use rand::RngCore;
use solmae_algorithms::drbg::{EntropySource, HmacDrbg};
use solmae_algorithms::hash::{
    h_challenge, h_matrix_entry, h_pk_bind, h_seed_expand, h_sha256, h_to_small_poly,
    xof_shake128, DOMAIN_CHALLENGE, DOMAIN_MSG, DOMAIN_PK,
};
use solmae_algorithms::lattice::{pairgen, pairgen_seeded};
use solmae_algorithms::poly::serialize::{compress, decompress};
use solmae_algorithms::RingContext;
use solmae_tests::seeded_rng;

const Q: u32 = 12289;

#[test]
fn test_drbg_reproducibility() {
    let mut a = HmacDrbg::new(b"seed material");
    let mut b = HmacDrbg::new(b"seed material");
    assert_eq!(a.generate(100, None), b.generate(100, None));
    assert_eq!(
        a.generate(33, Some(b"context".as_slice())),
        b.generate(33, Some(b"context".as_slice()))
    );
    assert_eq!(a.next_u64(), b.next_u64());

    let mut c = HmacDrbg::new(b"other seed");
    assert_ne!(a.generate(32, None), c.generate(32, None));
}

#[test]
fn test_entropy_source_modes() {
    let mut det = EntropySource::from_seed(b"x");
    let mut again = EntropySource::from_seed(b"x");
    assert!(det.is_deterministic());
    assert_eq!(det.next_u64(), again.next_u64());

    let mut os = EntropySource::default();
    assert!(!os.is_deterministic());
    let mut buf = [0u8; 32];
    os.fill_bytes(&mut buf);
    assert_ne!(buf, [0u8; 32]);
}

#[test]
fn test_hash_domain_separation() {
    let parts: [&[u8]; 2] = [b"abc", b"def"];
    assert_ne!(h_sha256(&parts, DOMAIN_MSG), h_sha256(&parts, DOMAIN_PK));
    assert_ne!(h_sha256(&parts, DOMAIN_PK), h_sha256(&parts, DOMAIN_CHALLENGE));
    assert_ne!(h_sha256(&parts, b""), h_sha256(&[b"abcdef".as_slice()], b""));
    assert_eq!(h_pk_bind(b"pk"), h_sha256(&[b"pk".as_slice()], DOMAIN_PK));

    // the same seed expands differently for each use-site
    let seed = [0x42u8; 32];
    let expanded = h_seed_expand(&seed, 64);
    assert_ne!(&expanded[..32], &h_challenge(&seed, b"", 32)[..]);
    assert_ne!(h_matrix_entry(&seed, 0, 1, 64), h_matrix_entry(&seed, 1, 0, 64));
    assert_ne!(expanded, xof_shake128(&[seed.as_slice()], 64, b""));
}

#[test]
fn test_small_polynomials_are_bounded() {
    let coeffs = h_to_small_poly(&[7u8; 32], 512, 2).unwrap();
    assert_eq!(coeffs.len(), 512);
    assert!(coeffs.iter().all(|c| c.abs() <= 2));
    assert!(coeffs.iter().any(|&c| c != 0));
}

#[test]
fn test_codec_roundtrip_and_saturation() {
    let values: Vec<i64> = vec![0, 1, -1, 7, -8, 3, -5, 2];
    let packed = compress(&values, 32, Q).unwrap();
    assert_eq!(packed.len(), 4);
    let unpacked = decompress(&packed, 32, values.len(), Q).unwrap();
    let expected: Vec<u32> = values.iter().map(|&v| v.rem_euclid(Q as i64) as u32).collect();
    assert_eq!(unpacked, expected);

    // 4-bit fields saturate to [-8, 7]
    let wide = compress(&[100, -100], 8, Q).unwrap();
    assert_eq!(decompress(&wide, 8, 2, Q).unwrap(), vec![7, Q - 8]);

    assert!(compress(&[1, 2, 3], 2, Q).is_err());
    assert!(decompress(&packed[..2], 32, 8, Q).is_err());
}

#[test]
fn test_pairgen_relation() {
    let ctx = RingContext::new(Q, 256).unwrap();
    let mut rng = seeded_rng(31);
    let (a, s, b) = pairgen(ctx, 3, &mut rng).unwrap();
    let e = b.sub(&a.mul(&s).unwrap()).unwrap();
    assert!(s.infinity_norm() <= 3);
    assert!(e.infinity_norm() <= 3);

    let (a1, _, _) = pairgen_seeded(ctx, b"public seed", 3, &mut rng).unwrap();
    let (a2, s2, b2) = pairgen_seeded(ctx, b"public seed", 3, &mut rng).unwrap();
    assert_eq!(a1, a2);
    let e2 = b2.sub(&a2.mul(&s2).unwrap()).unwrap();
    assert!(e2.infinity_norm() <= 3);
    assert_ne!(a1, pairgen_seeded(ctx, b"other seed", 3, &mut rng).unwrap().0);
}
