//! File storage tests
//!
//! Uses temporary directories for every case.

use std::fs;

use chrono::{DateTime, Utc};
use linkreg::errors::LinkregError;
use linkreg::services::{AddLinkRequest, LinkService, RedirectService, ResolveRequest};
use linkreg::storages::{FileStorage, MappingRecord, Storage};
use linkreg::utils::CodeGenerator;
use linkreg::utils::password::hash_password;
use tempfile::TempDir;

fn ts(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw).unwrap().with_timezone(&Utc)
}

/// 覆盖所有字段的记录
fn full_record() -> MappingRecord {
    let mut record = MappingRecord::new("full", "https://example.com/full");
    record.created_at = ts("2024-03-01T12:00:00.250Z");
    record.expires_at = Some(ts("2031-01-01T00:00:00Z"));
    record.password_hash = Some(hash_password("pw"));
    record.targets.device.mobile = Some("https://m.example.com".to_string());
    record
        .targets
        .locale
        .insert("de".to_string(), "https://example.com/de".to_string());
    record
}

#[test]
fn test_save_load_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let storage = FileStorage::new(temp_dir.path().join("links.json"));
    let records = vec![
        full_record(),
        MappingRecord::new("plain", "https://plain.example"),
    ];

    storage.save(&records).unwrap();
    assert_eq!(storage.load().unwrap(), records);
}

#[test]
fn test_load_accepts_reordered_keys() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("links.json");
    fs::write(
        &path,
        r#"[
  {
    "targets": { "locale": { "en": "https://example.com/en" }, "device": { "desktop": null, "mobile": null } },
    "passwordHash": null,
    "expiresAt": null,
    "url": "https://example.com",
    "createdAt": "2024-01-01T00:00:00.000Z",
    "code": "promo1"
  }
]
"#,
    )
    .unwrap();

    let records = FileStorage::new(&path).load().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].code, "promo1");
    assert_eq!(records[0].targets.locale["en"], "https://example.com/en");
}

#[test]
fn test_record_with_bad_timestamp_is_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("links.json");
    fs::write(
        &path,
        r#"[{"code":"x","url":"https://example.com","createdAt":"yesterday"}]"#,
    )
    .unwrap();

    let err = FileStorage::new(&path).load().unwrap_err();
    assert!(matches!(err, LinkregError::Parse(_)));
    assert!(err.message().contains("links.json"));
}

#[test]
fn test_remove_missing_keeps_file_bytes() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("links.json");
    let storage = FileStorage::new(&path);
    storage.save(&[full_record()]).unwrap();
    let before = fs::read(&path).unwrap();

    LinkService::new(&storage, CodeGenerator::default())
        .remove("ghost")
        .unwrap();

    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn test_failed_add_does_not_create_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("links.json");
    let storage = FileStorage::new(&path);

    let err = LinkService::new(&storage, CodeGenerator::default())
        .add(&AddLinkRequest {
            url: "not-a-url".to_string(),
            ..Default::default()
        })
        .unwrap_err();

    assert!(matches!(err, LinkregError::InvalidInput(_)));
    assert!(!path.exists());
}

#[test]
fn test_resolve_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let storage = FileStorage::new(temp_dir.path().join("links.json"));
    storage.save(&[full_record()]).unwrap();
    let service = RedirectService::new(&storage);

    let mut request = ResolveRequest::new("full");
    request.at = ts("2025-01-01T00:00:00Z");
    request.password = Some("pw".to_string());
    request.locale = Some("de-AT".to_string());
    assert_eq!(service.resolve(&request).unwrap().url, "https://example.com/de");

    request.at = ts("2032-01-01T00:00:00Z");
    assert!(matches!(
        service.resolve(&request),
        Err(LinkregError::Expired(_))
    ));

    let missing = ResolveRequest::new("nope");
    assert!(matches!(
        service.resolve(&missing),
        Err(LinkregError::NotFound(_))
    ));
}
