//! Random short-code generation with collision checks.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::errors::{LinkregError, Result};
use crate::storages::MappingRecord;

pub const DEFAULT_CODE_LENGTH: usize = 5;
pub const MIN_CODE_LENGTH: usize = 4;
pub const MAX_ATTEMPTS: usize = 10_000;

const FULL_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
// 去掉 0/O/o、1/l/I
const READABLE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnpqrstuvwxyz23456789";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alphabet {
    #[default]
    Full,
    Readable,
}

impl Alphabet {
    pub fn chars(&self) -> &'static [u8] {
        match self {
            Self::Full => FULL_ALPHABET,
            Self::Readable => READABLE_ALPHABET,
        }
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => write!(f, "full"),
            Self::Readable => write!(f, "readable"),
        }
    }
}

impl FromStr for Alphabet {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "readable" => Ok(Self::Readable),
            _ => Err(format!(
                "Invalid alphabet '{}', expected 'full' or 'readable'",
                s
            )),
        }
    }
}

/// `length` characters drawn uniformly from `alphabet`.
pub fn generate_random_code(length: usize, alphabet: Alphabet) -> String {
    let chars = alphabet.chars();
    std::iter::repeat_with(|| chars[rand::random_range(0..chars.len())] as char)
        .take(length)
        .collect()
}

/// Short codes are non-empty and limited to `[0-9A-Za-z_-]`.
pub fn is_valid_short_code(code: &str) -> bool {
    !code.is_empty()
        && code
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

#[derive(Debug, Clone, Copy)]
pub struct CodeGenerator {
    length: usize,
    alphabet: Alphabet,
    max_attempts: usize,
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_LENGTH, Alphabet::default())
    }
}

impl CodeGenerator {
    /// Lengths below [`MIN_CODE_LENGTH`] are raised to it.
    pub fn new(length: usize, alphabet: Alphabet) -> Self {
        if length < MIN_CODE_LENGTH {
            warn!(
                "Code length {} is below the minimum, using {}",
                length, MIN_CODE_LENGTH
            );
        }
        Self {
            length: length.max(MIN_CODE_LENGTH),
            alphabet,
            max_attempts: MAX_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn random_code(&self) -> String {
        generate_random_code(self.length, self.alphabet)
    }

    /// A fresh code not used by any of `existing`.
    pub fn unique_code(&self, existing: &[MappingRecord]) -> Result<String> {
        self.unique_code_from(existing, || self.random_code())
    }

    /// Like [`CodeGenerator::unique_code`], drawing candidates from `next`.
    pub fn unique_code_from<F>(&self, existing: &[MappingRecord], mut next: F) -> Result<String>
    where
        F: FnMut() -> String,
    {
        let taken: HashSet<&str> = existing.iter().map(|r| r.code.as_str()).collect();

        for attempt in 1..=self.max_attempts {
            let candidate = next();
            if !taken.contains(candidate.as_str()) {
                debug!("Generated code '{}' after {} attempt(s)", candidate, attempt);
                return Ok(candidate);
            }
            trace!("Candidate '{}' already taken", candidate);
        }

        Err(LinkregError::generation_exhausted(format!(
            "No free {}-character code found after {} attempts; supply one explicitly with --code",
            self.length, self.max_attempts
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readable_alphabet_excludes_ambiguous() {
        for ambiguous in [b'0', b'O', b'o', b'1', b'l', b'I'] {
            assert!(!Alphabet::Readable.chars().contains(&ambiguous));
        }
        assert_eq!(Alphabet::Full.chars().len(), 62);
    }

    #[test]
    fn test_length_floor() {
        assert_eq!(CodeGenerator::new(2, Alphabet::Full).length(), 4);
        assert_eq!(CodeGenerator::new(9, Alphabet::Full).length(), 9);
        assert_eq!(CodeGenerator::default().length(), 5);
    }

    #[test]
    fn test_unique_code_skips_taken() {
        let existing = vec![
            MappingRecord::new("aaaa", "https://a.example"),
            MappingRecord::new("bbbb", "https://b.example"),
        ];
        let mut candidates = vec!["aaaa", "bbbb", "cccc"].into_iter();

        let code = CodeGenerator::default()
            .unique_code_from(&existing, || candidates.next().unwrap().to_string())
            .unwrap();
        assert_eq!(code, "cccc");
    }

    #[test]
    fn test_exhaustion() {
        let existing = vec![MappingRecord::new("same", "https://example.com")];
        let mut calls = 0;

        let err = CodeGenerator::default()
            .with_max_attempts(25)
            .unique_code_from(&existing, || {
                calls += 1;
                "same".to_string()
            })
            .unwrap_err();

        assert_eq!(calls, 25);
        assert!(matches!(err, LinkregError::GenerationExhausted(_)));
        assert!(err.message().contains("--code"));
    }

    #[test]
    fn test_valid_short_code() {
        assert!(is_valid_short_code("promo_1-A"));
        assert!(!is_valid_short_code(""));
        assert!(!is_valid_short_code("has space"));
        assert!(!is_valid_short_code("slash/code"));
        assert!(!is_valid_short_code("ümlaut"));
    }
}
