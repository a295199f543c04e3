use cipherkit::encoding::{base64_to_bytes, bytes_to_base64};
use cipherkit::{Blowfish, BlowfishParameters, CryptoError, KeyGenerator};
use proptest::prelude::*;

#[test]
fn round_trip_with_generated_keys_of_every_width() {
    let blowfish = Blowfish;
    let keys = KeyGenerator::default();

    for bits in (32..=448).step_by(32) {
        let key = keys.generate_blowfish_key(bits).unwrap();
        let encrypted = blowfish.encrypt_str("Hello, Blowfish!", &key).unwrap();
        assert_eq!(base64_to_bytes(&encrypted).unwrap().len() % 8, 0);
        assert_eq!(blowfish.decrypt_str(&encrypted, &key).unwrap(), "Hello, Blowfish!");
    }
}

#[test]
fn same_key_and_text_give_the_same_ciphertext() {
    let blowfish = Blowfish;
    let key = KeyGenerator::default().generate_blowfish_key(128).unwrap();
    assert_eq!(
        blowfish.encrypt_str("deterministic", &key).unwrap(),
        blowfish.encrypt_str("deterministic", &key).unwrap()
    );
}

#[test]
fn structured_round_trip_with_generated_secret() {
    let blowfish = Blowfish;
    let secret = KeyGenerator::default().generate_blowfish_secret_key(448).unwrap();

    let encrypted = blowfish.encrypt(&BlowfishParameters::new("Hello World", secret.clone()));
    assert!(!encrypted.has_error, "{:?}", encrypted.errors);
    assert_eq!(encrypted.secret_key.as_deref(), Some(secret.as_str()));

    let decrypted = blowfish.decrypt(&BlowfishParameters::new(
        encrypted.encrypted_data.unwrap(),
        secret,
    ));
    assert!(!decrypted.has_error, "{:?}", decrypted.errors);
    assert_eq!(decrypted.decrypted_data.as_deref(), Some("Hello World"));
}

#[test]
fn strict_and_structured_paths_share_a_wire_format() {
    let blowfish = Blowfish;
    let keys = KeyGenerator::default();
    let key = keys.generate_blowfish_key(64).unwrap();
    let secret = bytes_to_base64(&key);

    let strict = blowfish.encrypt_str("interop", &key).unwrap();
    let structured = blowfish.encrypt(&BlowfishParameters::new("interop", secret.clone()));
    assert_eq!(structured.encrypted_data.as_deref(), Some(strict.as_str()));

    let decrypted = blowfish.decrypt(&BlowfishParameters::new(strict, secret));
    assert_eq!(decrypted.decrypted_data.as_deref(), Some("interop"));
}

#[test]
fn tampered_ciphertext_is_never_returned_as_the_plaintext() {
    let blowfish = Blowfish;
    let key = [0x42u8; 16];
    let encrypted = blowfish.encrypt_str("a longer message over several blocks", &key).unwrap();
    let mut bytes = base64_to_bytes(&encrypted).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0x80;

    let tampered = bytes_to_base64(&bytes);
    assert!(!matches!(
        blowfish.decrypt_str(&tampered, &key),
        Ok(ref text) if text == "a longer message over several blocks"
    ));
    assert!(matches!(
        blowfish.decrypt_str(&bytes_to_base64(&bytes[..5]), &key),
        Err(CryptoError::Cryptographic(_))
    ));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn any_text_survives_a_round_trip(
        text in "\\PC{1,200}",
        key_len in 4usize..=56,
        seed in any::<u8>(),
    ) {
        let blowfish = Blowfish;
        let key = vec![seed; key_len];
        let encrypted = blowfish.encrypt_str(&text, &key).unwrap();
        prop_assert_eq!(blowfish.decrypt_str(&encrypted, &key).unwrap(), text);
    }
}
