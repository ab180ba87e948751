use std::collections::HashSet;

use linkreg::utils::device::DeviceKind;
use linkreg::utils::password::{hash_password, verify_password};
use linkreg::utils::url_validator::validate_url;
use linkreg::utils::{Alphabet, generate_random_code, is_valid_short_code};

#[test]
fn test_generate_random_code_length() {
    assert_eq!(generate_random_code(6, Alphabet::Full).len(), 6);
    assert_eq!(generate_random_code(10, Alphabet::Readable).len(), 10);
    assert_eq!(generate_random_code(0, Alphabet::Full).len(), 0);
}

#[test]
fn test_generate_random_code_characters() {
    for alphabet in [Alphabet::Full, Alphabet::Readable] {
        let valid_chars: HashSet<char> = alphabet.chars().iter().map(|&b| b as char).collect();
        let code = generate_random_code(100, alphabet);

        for ch in code.chars() {
            assert!(valid_chars.contains(&ch), "Invalid character: {}", ch);
        }
        assert!(is_valid_short_code(&code));
    }
}

#[test]
fn test_generate_random_code_uniqueness() {
    let mut codes = HashSet::new();

    for _ in 0..1000 {
        codes.insert(generate_random_code(8, Alphabet::Full));
    }

    // 应该生成大量不同的代码
    assert!(
        codes.len() > 990,
        "Generated codes lack sufficient randomness"
    );
}

#[test]
fn test_password_digest_is_hex_sha256() {
    let digest = hash_password("secret");
    assert_eq!(
        digest,
        "2bb80d537b1da3e38bd30361aa855686bde0eacd7162fef6a25fe97bf527a25b"
    );
    assert!(verify_password("secret", &digest));
    assert!(!verify_password("Secret", &digest));
}

#[test]
fn test_validate_url_schemes() {
    assert!(validate_url("https://example.com/path?q=1").is_ok());
    assert!(validate_url("http://localhost:8080").is_ok());
    assert!(validate_url("").is_err());
    assert!(validate_url("example.com").is_err());
    assert!(validate_url("javascript:alert(1)").is_err());
}

#[test]
fn test_device_kind_from_user_agent() {
    let iphone = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1";
    let desktop = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

    assert_eq!(DeviceKind::from_user_agent(iphone), Some(DeviceKind::Mobile));
    assert_eq!(DeviceKind::from_user_agent(desktop), Some(DeviceKind::Desktop));
}
