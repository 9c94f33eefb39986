use blockmode::{Aes, CtrStream, Mode, ModeDriver};
use proptest::prelude::*;

fn any_key() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        prop::collection::vec(any::<u8>(), 16),
        prop::collection::vec(any::<u8>(), 24),
        prop::collection::vec(any::<u8>(), 32),
    ]
}

fn any_iv() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 16)
}

/// Plaintext of 0..=32 whole blocks.
fn any_aligned() -> impl Strategy<Value = Vec<u8>> {
    (0usize..=32).prop_flat_map(|blocks| prop::collection::vec(any::<u8>(), blocks * 16))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn ecb_round_trip(key in any_key(), pt in any_aligned()) {
        let driver = ModeDriver::new(&key).unwrap();
        let ct = driver.encrypt(Mode::Ecb, None, &pt).unwrap();
        prop_assert_eq!(ct.len(), pt.len());
        prop_assert_eq!(driver.decrypt(Mode::Ecb, None, &ct).unwrap(), pt);
    }

    #[test]
    fn cbc_round_trip(key in any_key(), iv in any_iv(), pt in any_aligned()) {
        let driver = ModeDriver::new(&key).unwrap();
        let ct = driver.encrypt(Mode::Cbc, Some(iv.as_slice()), &pt).unwrap();
        prop_assert_eq!(driver.decrypt(Mode::Cbc, Some(iv.as_slice()), &ct).unwrap(), pt);
    }

    #[test]
    fn ctr_is_self_inverse(key in any_key(), iv in any_iv(), pt in prop::collection::vec(any::<u8>(), 0..600)) {
        let driver = ModeDriver::new(&key).unwrap();
        let ct = driver.encrypt(Mode::Ctr, Some(iv.as_slice()), &pt).unwrap();
        prop_assert_eq!(ct.len(), pt.len());
        prop_assert_eq!(driver.encrypt(Mode::Ctr, Some(iv.as_slice()), &ct).unwrap(), pt);
    }

    #[test]
    fn ctr_split_matches_one_shot(
        iv in any_iv(),
        pt in prop::collection::vec(any::<u8>(), 0..1200),
        split in any::<prop::sample::Index>(),
    ) {
        let cipher = Aes::from_slice(b"0123456789abcdef").unwrap();
        let n = split.index(pt.len() + 1);

        let whole = CtrStream::new(&cipher, &iv).unwrap().xor_key_stream(&pt);

        let mut stream = CtrStream::new(&cipher, &iv).unwrap();
        let mut parts = stream.xor_key_stream(&pt[..n]);
        parts.extend(stream.xor_key_stream(&pt[n..]));
        prop_assert_eq!(parts, whole);
    }

    #[test]
    fn cbc_change_affects_only_later_blocks(
        iv in any_iv(),
        blocks in 1usize..8,
        byte in any::<prop::sample::Index>(),
        flip in 1u8..=255,
    ) {
        let driver = ModeDriver::new(b"0123456789abcdef").unwrap();
        let pt: Vec<u8> = (0..blocks * 16).map(|i| i as u8).collect();
        let base = driver.encrypt(Mode::Cbc, Some(iv.as_slice()), &pt).unwrap();

        let pos = byte.index(pt.len());
        let mut modified = pt.clone();
        modified[pos] ^= flip;
        let changed = driver.encrypt(Mode::Cbc, Some(iv.as_slice()), &modified).unwrap();

        let first = pos / 16 * 16;
        prop_assert_eq!(&base[..first], &changed[..first]);
        for start in (first..pt.len()).step_by(16) {
            prop_assert_ne!(&base[start..start + 16], &changed[start..start + 16]);
        }
    }
}
