//! Parsing of `lang=url,lang=url` locale target lists.

use std::collections::BTreeMap;
use std::fmt;

use crate::utils::url_validator::validate_url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingSeparator,
    EmptyTag,
    EmptyUrl,
    InvalidUrl(String),
    DuplicateTag,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSeparator => write!(f, "missing '='"),
            Self::EmptyTag => write!(f, "empty locale tag"),
            Self::EmptyUrl => write!(f, "empty URL"),
            Self::InvalidUrl(reason) => write!(f, "{}", reason),
            Self::DuplicateTag => write!(f, "locale already given earlier in the list"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLocale {
    pub pair: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleTargets {
    pub targets: BTreeMap<String, String>,
    pub skipped: Vec<SkippedLocale>,
}

/// Split `input` on commas, then each pair on its first `=`.
///
/// Blank segments are ignored. Malformed pairs are left out of `targets`
/// and listed in `skipped`. The first occurrence of a tag wins; tags are
/// compared case-insensitively.
pub fn parse_locale_targets(input: &str) -> LocaleTargets {
    let mut parsed = LocaleTargets::default();

    for raw in input.split(',') {
        let pair = raw.trim();
        if pair.is_empty() {
            continue;
        }

        let mut skip = |reason: SkipReason| {
            parsed.skipped.push(SkippedLocale {
                pair: pair.to_string(),
                reason,
            })
        };

        let Some((tag, url)) = pair.split_once('=') else {
            skip(SkipReason::MissingSeparator);
            continue;
        };
        let (tag, url) = (tag.trim(), url.trim());

        if tag.is_empty() {
            skip(SkipReason::EmptyTag);
            continue;
        }
        if url.is_empty() {
            skip(SkipReason::EmptyUrl);
            continue;
        }
        if let Err(e) = validate_url(url) {
            skip(SkipReason::InvalidUrl(e.to_string()));
            continue;
        }
        if parsed
            .targets
            .keys()
            .any(|existing| existing.eq_ignore_ascii_case(tag))
        {
            skip(SkipReason::DuplicateTag);
            continue;
        }

        parsed.targets.insert(tag.to_string(), url.to_string());
    }

    parsed
}
