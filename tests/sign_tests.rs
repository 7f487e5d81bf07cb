//! tests/sign_tests.rs
//! HMAC-SHA256 signer: known answers and determinism

mod common;

use common::{TEST_DEVICE_KEY_RAW, TEST_SIGNING_STRING};
use iot_sas_token::aliases::{zeroed, Digest32};
use iot_sas_token::sign_hmac_sha256;

fn sign_hex(key: &[u8], message: &[u8]) -> String {
    let mut digest = zeroed::<32>();
    sign_hmac_sha256(key, message, &mut digest);
    hex::encode(digest.expose_secret())
}

#[test]
fn rfc4231_case_1() {
    let key = hex::decode("0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b").unwrap();
    assert_eq!(
        sign_hex(&key, b"Hi There"),
        "b0344c61d8db38535ca8afceaf0bf12b881dc200c9833da726e9376c2e32cff7"
    );
}

#[test]
fn device_key_over_signing_string() {
    assert_eq!(
        sign_hex(TEST_DEVICE_KEY_RAW, TEST_SIGNING_STRING.as_bytes()),
        "e24b4aa0e2186a9bce5ff50d6da0876354cb2d70c13335225737f8cf88824521"
    );
}

#[test]
fn identical_inputs_give_identical_digests() {
    let messages: [&[u8]; 4] = [b"", b"a", TEST_SIGNING_STRING.as_bytes(), &[0u8; 200]];
    for message in messages {
        let first = sign_hex(TEST_DEVICE_KEY_RAW, message);
        for _ in 0..3 {
            assert_eq!(sign_hex(TEST_DEVICE_KEY_RAW, message), first);
        }
    }
}

#[test]
fn key_and_message_both_bind_the_digest() {
    let base = sign_hex(b"key", b"message");
    assert_ne!(base, sign_hex(b"kez", b"message"));
    assert_ne!(base, sign_hex(b"key", b"messagf"));
}

#[test]
fn every_digest_byte_is_overwritten() {
    let mut digest = Digest32::new([0xFF; 32]);
    sign_hmac_sha256(b"Jefe", b"what do ya want for nothing?", &mut digest);
    let mut fresh = zeroed::<32>();
    sign_hmac_sha256(b"Jefe", b"what do ya want for nothing?", &mut fresh);
    assert_eq!(digest.expose_secret(), fresh.expose_secret());
}
