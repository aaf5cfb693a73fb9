use super::*;
use crate::crypto::password::generate_password_with;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const BASE64_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

fn url(raw: &str) -> ValidatedUrl {
    ValidatedUrl::parse(raw).unwrap()
}

fn decode_record(token: &str) -> serde_json::Value {
    serde_json::from_slice(&STANDARD.decode(token).unwrap()).unwrap()
}

#[test]
fn test_seal_open_roundtrip() {
    let target = url("https://example.com/docs?page=2#intro");

    let token = seal(&target, "correct horse").unwrap();
    let opened = open(&token, "correct horse").unwrap();

    assert_eq!(opened, target.as_str());
}

#[test]
fn test_roundtrip_unicode() {
    let target = url("https://例え.jp/パス");

    let token = seal(&target, "pässwörd🔑").unwrap();

    assert_eq!(open(&token, "pässwörd🔑").unwrap(), target.as_str());
}

#[test]
fn test_roundtrip_legacy_params() {
    let target = url("http://old.example.org");

    let token = seal_with_params(&target, "secret", &KdfParams::legacy()).unwrap();

    assert_eq!(
        open_with_params(&token, "secret", &KdfParams::legacy()).unwrap(),
        target.as_str()
    );
    // The default PRF derives another key
    assert!(open(&token, "secret").is_err());
}

fn url_of_len(len: usize, rng: &mut StdRng) -> ValidatedUrl {
    const PATH_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789-_~";
    let mut raw = String::from("https://x.io/");
    while raw.len() < len {
        raw.push(char::from(PATH_CHARS[rng.gen_range(0..PATH_CHARS.len())]));
    }
    assert_eq!(raw.len(), len);
    url(&raw)
}

#[test]
fn test_roundtrip_across_lengths_and_passwords() {
    let mut rng = StdRng::seed_from_u64(2024);

    // Just below, at and above one and two cipher blocks, then random sizes
    let mut lengths = vec![15, 16, 17, 31, 32, 33];
    lengths.extend((0..14).map(|_| rng.gen_range(14..160)));

    for len in lengths {
        let target = url_of_len(len, &mut rng);
        let password = generate_password_with(&mut rng);
        let other = generate_password_with(&mut rng);
        assert_ne!(password, other);

        let token = seal(&target, &password).unwrap();
        assert_eq!(open(&token, &password).unwrap(), target.as_str(), "len {}", len);

        let wrong = open(&token, &other).ok();
        assert_ne!(wrong.as_deref(), Some(target.as_str()), "len {}", len);
    }
}

#[test]
fn test_wrong_password_fails() {
    let target = url("https://example.com/private/report");

    let token = seal(&target, "password-one").unwrap();

    assert!(matches!(
        open(&token, "password-two"),
        Err(EnvelopeError::DecryptionFailed)
    ));
}

#[test]
fn test_open_is_retryable() {
    let target = url("https://example.com");
    let token = seal(&target, "right").unwrap();

    assert!(open(&token, "wrong").is_err());
    assert!(open(&token, "also wrong").is_err());
    assert_eq!(open(&token, "right").unwrap(), "https://example.com");
    assert_eq!(open(&token, "right").unwrap(), "https://example.com");
}

#[test]
fn test_token_record_shape() {
    let token = seal(&url("https://example.com"), "pw").unwrap();
    let record = decode_record(&token);

    let object = record.as_object().unwrap();
    let keys: Vec<&String> = object.keys().collect();
    assert_eq!(keys.len(), 3);

    let salt = object["salt"].as_str().unwrap();
    let iv = object["iv"].as_str().unwrap();
    let encrypted = object["encrypted"].as_str().unwrap();

    assert_eq!(salt.len(), 32);
    assert_eq!(iv.len(), 32);
    assert!(salt.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    assert!(iv.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    // 19 bytes of plaintext pad to two blocks
    assert_eq!(STANDARD.decode(encrypted).unwrap().len(), 32);
}

#[test]
fn test_token_field_order_is_salt_iv_encrypted() {
    let token = seal(&url("https://example.com"), "pw").unwrap();
    let json = String::from_utf8(STANDARD.decode(&token).unwrap()).unwrap();

    assert!(json.starts_with("{\"salt\":\""));
    let salt_at = json.find("\"salt\"").unwrap();
    let iv_at = json.find("\"iv\"").unwrap();
    let encrypted_at = json.find("\"encrypted\"").unwrap();
    assert!(salt_at < iv_at && iv_at < encrypted_at);
    assert!(!json.contains(' '));
}

#[test]
fn test_fresh_salt_and_iv_per_seal() {
    let target = url("https://example.com");

    let first = EnvelopeRecord::from_token(&seal(&target, "pw").unwrap()).unwrap();
    let second = EnvelopeRecord::from_token(&seal(&target, "pw").unwrap()).unwrap();

    assert_ne!(first.salt, second.salt);
    assert_ne!(first.iv, second.iv);
    assert_ne!(first.encrypted, second.encrypted);
}

#[test]
fn test_record_to_token_roundtrip() {
    let record = EnvelopeRecord::from_token(&seal(&url("example.com"), "pw").unwrap()).unwrap();

    let rebuilt = record.to_token().unwrap();

    assert_eq!(EnvelopeRecord::from_token(&rebuilt).unwrap(), record);
    assert_eq!(open(&rebuilt, "pw").unwrap(), "https://example.com");
}

#[test]
fn test_surrounding_whitespace_is_ignored() {
    let token = seal(&url("https://example.com"), "pw").unwrap();

    assert_eq!(open(&format!("  {}\n", token), "pw").unwrap(), "https://example.com");
}

#[test]
fn test_malformed_tokens_fail() {
    assert!(open("", "pw").is_err());
    assert!(open("not base64 at all!", "pw").is_err());
    // Valid base64, not JSON
    assert!(open(&STANDARD.encode("hello"), "pw").is_err());
    // JSON, wrong shape
    assert!(open(&STANDARD.encode("[1,2,3]"), "pw").is_err());
}

#[test]
fn test_missing_and_extra_fields_fail() {
    let record = EnvelopeRecord::from_token(&seal(&url("https://example.com"), "pw").unwrap()).unwrap();

    let missing = serde_json::json!({ "salt": record.salt, "iv": record.iv });
    assert!(open(&STANDARD.encode(missing.to_string()), "pw").is_err());

    let extra = serde_json::json!({
        "salt": record.salt,
        "iv": record.iv,
        "encrypted": record.encrypted,
        "version": 2,
    });
    assert!(open(&STANDARD.encode(extra.to_string()), "pw").is_err());

    // Reordered fields are still one record
    let reordered = serde_json::json!({
        "encrypted": record.encrypted,
        "iv": record.iv,
        "salt": record.salt,
    });
    assert_eq!(
        open(&STANDARD.encode(reordered.to_string()), "pw").unwrap(),
        "https://example.com"
    );
}

#[test]
fn test_bad_hex_fields_fail() {
    let record = EnvelopeRecord::from_token(&seal(&url("https://example.com"), "pw").unwrap()).unwrap();

    let short_salt = EnvelopeRecord {
        salt: record.salt[..30].to_string(),
        ..record.clone()
    };
    assert!(open(&short_salt.to_token().unwrap(), "pw").is_err());

    let uppercase_iv = EnvelopeRecord {
        iv: record.iv.to_uppercase(),
        ..record.clone()
    };
    if uppercase_iv.iv != record.iv {
        assert!(open(&uppercase_iv.to_token().unwrap(), "pw").is_err());
    }

    let not_hex = EnvelopeRecord {
        iv: "z".repeat(32),
        ..record
    };
    assert!(open(&not_hex.to_token().unwrap(), "pw").is_err());
}

#[test]
fn test_single_character_tampering() {
    let target = url("https://example.com/a/reasonably/long/path?with=query");
    let token = seal(&target, "pw").unwrap();

    let mut rejected = 0;
    for (i, original) in token.char_indices() {
        let replacement = BASE64_ALPHABET
            .chars()
            .find(|&c| c != original)
            .unwrap();
        let mut tampered = token.clone();
        tampered.replace_range(i..i + original.len_utf8(), &replacement.to_string());

        match open(&tampered, "pw") {
            Ok(recovered) => assert_ne!(recovered, target.as_str(), "tampering at {} went unnoticed", i),
            Err(_) => rejected += 1,
        }
    }

    // Without an integrity tag an IV edit can still decrypt, just never to the original
    assert!(rejected * 4 >= token.len() * 3, "only {} of {} rejected", rejected, token.len());
}

#[test]
fn test_empty_plaintext_is_treated_as_failure() {
    let salt = generate_salt();
    let iv = generate_iv();
    let key = derive_key("pw", &salt, &KdfParams::default());
    let ciphertext = cipher::encrypt("", &key, &iv).unwrap();

    let token = EnvelopeRecord::new(&salt, &iv, &ciphertext).to_token().unwrap();

    assert!(matches!(open(&token, "pw"), Err(EnvelopeError::DecryptionFailed)));
}

#[test]
fn test_error_message_is_generic() {
    let token = seal(&url("https://example.com"), "pw").unwrap();

    let wrong_password = open(&token, "nope").unwrap_err().to_string();
    let garbage = open("garbage", "pw").unwrap_err().to_string();

    assert_eq!(wrong_password, "Incorrect password");
    assert_eq!(wrong_password, garbage);
}
