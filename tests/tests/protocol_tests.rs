// tests/protocol_tests.rs
// End-to-end signature scenarios through the public API

mod common;

use solmae_api::Signature;
use solmae_params::pqc::solmae::{Solmae256Params, SolmaeSchemeParams};
use solmae_sign::solmae::reconstruct;
use solmae_sign::{keygen, sign, verify, Solmae256, Solmae512};
use solmae_tests::seeded_rng;

const MESSAGE: &[u8] = b"SOLMAE test message 123";

#[test]
fn test_scenario_q12289_n256() {
    common::init_tracing();
    assert_eq!(MESSAGE.len(), 23);

    let mut rng = seeded_rng(0x5017_4AE0);
    let (pk, sk) = keygen::<Solmae256Params, _>(&mut rng).unwrap();
    let sig = sign::<Solmae256Params, _>(&sk, MESSAGE, &mut rng).unwrap();

    for attempt in 0..3 {
        assert!(
            verify::<Solmae256Params>(&pk, MESSAGE, &sig).unwrap(),
            "verification {} failed",
            attempt
        );
    }

    let mut tampered = MESSAGE.to_vec();
    tampered[22] ^= 0x80;
    assert!(!verify::<Solmae256Params>(&pk, &tampered, &sig).unwrap());
}

#[test]
fn test_tampering_is_detected() {
    let mut rng = seeded_rng(3);
    let (pk, sk) = keygen::<Solmae256Params, _>(&mut rng).unwrap();
    let sig = sign::<Solmae256Params, _>(&sk, MESSAGE, &mut rng).unwrap();

    let mut bad = sig.clone();
    bad.c[31] ^= 0x01;
    assert!(!verify::<Solmae256Params>(&pk, MESSAGE, &bad).unwrap());

    let mut bad = sig.clone();
    bad.z.iter_mut().flatten().for_each(|x| *x = 0);
    assert!(!verify::<Solmae256Params>(&pk, MESSAGE, &bad).unwrap());

    let mut bad = sig;
    bad.z[1][255] = (bad.z[1][255] + 1) % Solmae256Params::Q;
    assert!(!verify::<Solmae256Params>(&pk, MESSAGE, &bad).unwrap());
}

#[test]
fn test_public_key_splits_t() {
    let (pk, sk) = keygen::<Solmae256Params, _>(&mut seeded_rng(8)).unwrap();
    let d = Solmae256Params::D_PARAM;
    for (t1, t0) in pk.t1.iter().zip(sk.t0()) {
        let t = reconstruct(t1, t0, d, Solmae256Params::Q);
        assert!(t.iter().all(|&x| x < Solmae256Params::Q));
        let high: Vec<u8> = t.iter().map(|&x| (x >> d) as u8).collect();
        assert_eq!(&high, t1);
    }
}

#[test]
fn test_trait_api_both_parameter_sets() {
    let mut rng = seeded_rng(21);

    let kp = Solmae256::keypair(&mut rng).unwrap();
    let sig = Solmae256::sign(MESSAGE, &Solmae256::secret_key(&kp)).unwrap();
    assert!(Solmae256::verify(MESSAGE, &sig, &Solmae256::public_key(&kp)).unwrap());

    let kp = Solmae512::keypair(&mut rng).unwrap();
    let sig = Solmae512::sign(MESSAGE, &Solmae512::secret_key(&kp)).unwrap();
    assert!(Solmae512::verify(MESSAGE, &sig, &Solmae512::public_key(&kp)).unwrap());
    assert_eq!(Solmae512::name(), "SOLMAE-512");
}

#[test]
fn test_malformed_public_key_surfaces_as_configuration_error() {
    let mut rng = seeded_rng(4);
    let kp = Solmae256::keypair(&mut rng).unwrap();
    let sig = Solmae256::sign(MESSAGE, &kp.1).unwrap();

    let mut pk = kp.0.clone();
    pk.t1[1].pop();
    let err = Solmae256::verify(MESSAGE, &sig, &pk).unwrap_err();
    assert!(err.is_configuration(), "{}", err);
}

#[test]
fn test_wire_formats() {
    let mut rng = seeded_rng(99);
    let (pk, sk) = keygen::<Solmae256Params, _>(&mut rng).unwrap();
    let sig = sign::<Solmae256Params, _>(&sk, MESSAGE, &mut rng).unwrap();

    let pk_bytes = Solmae256::public_key_to_bytes(&pk);
    let sig_bytes = Solmae256::signature_to_bytes(&sig).unwrap();
    let compact = Solmae256::signature_to_compact_bytes(&sig).unwrap();
    assert_eq!(pk_bytes.len(), Solmae256Params::PUBLIC_KEY_BYTES);
    assert_eq!(sig_bytes.len(), Solmae256Params::SIGNATURE_BYTES);
    assert_eq!(compact.len(), Solmae256Params::COMPACT_SIGNATURE_BYTES);
    println!("challenge {}", hex::encode(&sig.c));

    let pk2 = Solmae256::public_key_from_bytes(&pk_bytes).unwrap();
    for decoded in [
        Solmae256::signature_from_bytes(&sig_bytes).unwrap(),
        Solmae256::signature_from_compact_bytes(&compact).unwrap(),
    ] {
        assert!(verify::<Solmae256Params>(&pk2, MESSAGE, &decoded).unwrap());
    }

    assert!(Solmae256::signature_from_bytes(&sig_bytes[1..]).is_err());
    assert!(Solmae256::public_key_from_bytes(&pk_bytes[..40]).is_err());
}
