//! Add / remove / list over the mapping store.
//!
//! The `apply_*` functions work on an in-memory record set and never touch
//! storage; [`LinkService`] wraps them in load → mutate → save.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::errors::{LinkregError, Result};
use crate::services::locale::{SkippedLocale, parse_locale_targets};
use crate::storages::models::now_millis;
use crate::storages::{DeviceTargets, MappingRecord, Storage, Targets};
use crate::utils::password::process_new_password;
use crate::utils::time_parser::TimeParser;
use crate::utils::url_validator::validate_url;
use crate::utils::{CodeGenerator, is_valid_short_code};

/// Input to [`LinkService::add`]; option values as the user typed them.
#[derive(Debug, Clone, Default)]
pub struct AddLinkRequest {
    pub code: Option<String>,
    pub url: String,
    pub expires: Option<String>,
    pub password: Option<String>,
    pub mobile: Option<String>,
    pub desktop: Option<String>,
    pub locale: Option<String>,
    pub replace: bool,
}

#[derive(Debug, Clone)]
pub struct AddOutcome {
    pub record: MappingRecord,
    /// The code was generated rather than supplied.
    pub generated: bool,
    /// Record overwritten in replace mode.
    pub replaced: Option<MappingRecord>,
    pub skipped_locales: Vec<SkippedLocale>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RemoveOutcome {
    Removed(MappingRecord),
    NotFound(String),
}

fn check_url(field: &str, url: &str) -> Result<String> {
    let url = url.trim();
    if url.is_empty() {
        return Err(LinkregError::invalid_input(format!("{} is required", field)));
    }
    validate_url(url)
        .map_err(|e| LinkregError::invalid_input(format!("{} '{}': {}", field, url, e)))?;
    Ok(url.to_string())
}

fn check_optional_url(field: &str, url: Option<&str>) -> Result<Option<String>> {
    url.map(|u| check_url(field, u)).transpose()
}

/// Validate `request` and add or replace its record in `records`.
///
/// On error `records` is left unchanged.
pub fn apply_add(
    records: &mut Vec<MappingRecord>,
    request: &AddLinkRequest,
    generator: &CodeGenerator,
    now: DateTime<Utc>,
) -> Result<AddOutcome> {
    let url = check_url("URL", &request.url)?;

    if let Some(code) = &request.code
        && !is_valid_short_code(code)
    {
        return Err(LinkregError::invalid_input(format!(
            "Invalid short code '{}': only letters, digits, '_' and '-' are allowed",
            code
        )));
    }

    let mobile = check_optional_url("Mobile URL", request.mobile.as_deref())?;
    let desktop = check_optional_url("Desktop URL", request.desktop.as_deref())?;

    let expires_at = request
        .expires
        .as_deref()
        .map(|raw| TimeParser::parse_expire_time_at(raw, now))
        .transpose()?;
    if let Some(expires) = expires_at
        && expires <= now
    {
        warn!("Expiry {} is already in the past", expires);
    }

    let locale = request
        .locale
        .as_deref()
        .map(parse_locale_targets)
        .unwrap_or_default();
    for skipped in &locale.skipped {
        warn!("Skipping locale pair '{}': {}", skipped.pair, skipped.reason);
    }

    let existing = request
        .code
        .as_deref()
        .and_then(|code| records.iter().position(|r| r.code == code));

    if let (Some(index), false) = (existing, request.replace) {
        return Err(LinkregError::duplicate_code(format!(
            "Short code '{}' already exists and points to {}; use --replace to overwrite it",
            records[index].code, records[index].url
        )));
    }

    let (code, generated) = match &request.code {
        Some(code) => (code.clone(), false),
        None => (generator.unique_code(records)?, true),
    };

    let mut record = MappingRecord {
        code,
        url,
        created_at: now,
        expires_at,
        password_hash: process_new_password(request.password.as_deref()),
        targets: Targets {
            device: DeviceTargets { mobile, desktop },
            locale: locale.targets,
        },
        extra: serde_json::Map::new(),
    };

    let replaced = match existing {
        Some(index) => {
            let previous = &records[index];
            // 覆盖时保留原始创建时间和外部字段
            record.created_at = previous.created_at;
            record.extra = previous.extra.clone();
            Some(std::mem::replace(&mut records[index], record.clone()))
        }
        None => {
            records.push(record.clone());
            None
        }
    };

    Ok(AddOutcome {
        record,
        generated,
        replaced,
        skipped_locales: locale.skipped,
    })
}

/// Remove `code` from `records`, returning the removed record.
pub fn apply_remove(records: &mut Vec<MappingRecord>, code: &str) -> Option<MappingRecord> {
    let index = records.iter().position(|r| r.code == code)?;
    Some(records.remove(index))
}

/// Width the code column is padded to in `list` output.
pub const CODE_COLUMN_WIDTH: usize = 12;
const COLUMN_GAP: &str = "  ";

pub fn format_list_line(record: &MappingRecord) -> String {
    format!(
        "{:<width$}{}{}",
        record.code,
        COLUMN_GAP,
        record.url,
        width = CODE_COLUMN_WIDTH
    )
}

/// Indent that lines detail rows up with the URL column.
pub fn detail_indent() -> String {
    " ".repeat(CODE_COLUMN_WIDTH + COLUMN_GAP.len())
}

/// `code  url` lines in insertion order.
pub fn list_lines(records: &[MappingRecord]) -> impl Iterator<Item = String> + '_ {
    records.iter().map(format_list_line)
}

/// Snapshot of the store taken by [`LinkService::list`].
#[derive(Debug, Clone)]
pub struct LinkListing {
    records: Vec<MappingRecord>,
}

impl LinkListing {
    /// A fresh iterator on every call.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        list_lines(&self.records)
    }

    pub fn records(&self) -> &[MappingRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

pub struct LinkService<'a> {
    storage: &'a dyn Storage,
    generator: CodeGenerator,
}

impl<'a> LinkService<'a> {
    pub fn new(storage: &'a dyn Storage, generator: CodeGenerator) -> Self {
        Self { storage, generator }
    }

    pub fn add(&self, request: &AddLinkRequest) -> Result<AddOutcome> {
        let mut records = self.storage.load()?;
        let outcome = apply_add(&mut records, request, &self.generator, now_millis())?;
        self.storage.save(&records)?;

        if outcome.replaced.is_some() {
            info!("Replaced short code '{}'", outcome.record.code);
        } else {
            info!("Added short code '{}'", outcome.record.code);
        }
        Ok(outcome)
    }

    /// A missing code is reported through [`RemoveOutcome::NotFound`]
    /// and leaves the store untouched.
    pub fn remove(&self, code: &str) -> Result<RemoveOutcome> {
        let mut records = self.storage.load()?;
        match apply_remove(&mut records, code) {
            Some(removed) => {
                self.storage.save(&records)?;
                info!("Removed short code '{}'", code);
                Ok(RemoveOutcome::Removed(removed))
            }
            None => {
                debug!(
                    "Short code '{}' not found in {}",
                    code,
                    self.storage.describe()
                );
                Ok(RemoveOutcome::NotFound(code.to_string()))
            }
        }
    }

    pub fn list(&self) -> Result<LinkListing> {
        Ok(LinkListing {
            records: self.storage.load()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(code: Option<&str>, url: &str) -> AddLinkRequest {
        AddLinkRequest {
            code: code.map(str::to_string),
            url: url.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_add_with_explicit_code_appends() {
        let mut records = vec![MappingRecord::new("first", "https://first.example")];
        let outcome = apply_add(
            &mut records,
            &request(Some("promo1"), "https://example.com"),
            &CodeGenerator::default(),
            now_millis(),
        )
        .unwrap();

        assert!(!outcome.generated);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].code, "promo1");
    }

    #[test]
    fn test_add_rejects_invalid_code() {
        let mut records = Vec::new();
        let err = apply_add(
            &mut records,
            &request(Some("bad code!"), "https://example.com"),
            &CodeGenerator::default(),
            now_millis(),
        )
        .unwrap_err();
        assert!(matches!(err, LinkregError::InvalidInput(_)));
        assert!(records.is_empty());
    }

    #[test]
    fn test_add_rejects_missing_url() {
        let mut records = Vec::new();
        let err = apply_add(
            &mut records,
            &request(None, "  "),
            &CodeGenerator::default(),
            now_millis(),
        )
        .unwrap_err();
        assert!(matches!(err, LinkregError::InvalidInput(_)));
    }

    #[test]
    fn test_password_is_digested() {
        let mut records = Vec::new();
        let mut req = request(Some("secret"), "https://example.com");
        req.password = Some("hunter2".to_string());

        let outcome = apply_add(&mut records, &req, &CodeGenerator::default(), now_millis())
            .unwrap();
        let hash = outcome.record.password_hash.unwrap();
        assert_eq!(hash.len(), 64);
        assert_ne!(hash, "hunter2");
    }

    #[test]
    fn test_replace_keeps_created_at() {
        let mut original = MappingRecord::new("keep", "https://old.example");
        original.created_at = DateTime::parse_from_rfc3339("2020-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let mut records = vec![original.clone()];

        let mut req = request(Some("keep"), "https://new.example");
        req.replace = true;
        let outcome =
            apply_add(&mut records, &req, &CodeGenerator::default(), now_millis()).unwrap();

        assert_eq!(outcome.replaced, Some(original.clone()));
        assert_eq!(records[0].url, "https://new.example");
        assert_eq!(records[0].created_at, original.created_at);
    }

    #[test]
    fn test_remove_and_list_lines() {
        let mut records = vec![
            MappingRecord::new("a", "https://a.example"),
            MappingRecord::new("b", "https://b.example"),
        ];
        assert!(apply_remove(&mut records, "missing").is_none());
        assert_eq!(apply_remove(&mut records, "a").unwrap().code, "a");

        let lines: Vec<String> = list_lines(&records).collect();
        assert_eq!(lines, vec!["b             https://b.example".to_string()]);
    }

    #[test]
    fn test_list_line_format() {
        let record = MappingRecord::new("promo1", "https://example.com");
        assert_eq!(format_list_line(&record), "promo1        https://example.com");

        let long = MappingRecord::new("a-very-long-code", "https://example.com");
        assert_eq!(
            format_list_line(&long),
            "a-very-long-code  https://example.com"
        );
    }

    #[test]
    fn test_detail_indent_matches_url_column() {
        let line = format_list_line(&MappingRecord::new("promo1", "https://example.com"));
        assert_eq!(line.find("https://"), Some(detail_indent().len()));
        assert!(detail_indent().chars().all(|c| c == ' '));
    }
}
