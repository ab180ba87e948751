//! Effective redirect target of a short code.
//!
//! Device override first, then locale, then the record URL. Expiry and
//! password protection are checked before any target is chosen.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::errors::{LinkregError, Result};
use crate::storages::{MappingRecord, Storage};
use crate::utils::device::DeviceKind;
use crate::utils::password::verify_password;
use crate::utils::time_parser::TimeParser;

#[derive(Debug, Clone)]
pub struct ResolveRequest {
    pub code: String,
    pub device: Option<DeviceKind>,
    pub locale: Option<String>,
    pub password: Option<String>,
    pub at: DateTime<Utc>,
}

impl ResolveRequest {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            device: None,
            locale: None,
            password: None,
            at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSource {
    Device(DeviceKind),
    Locale(String),
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub url: String,
    pub source: TargetSource,
}

fn primary_subtag(tag: &str) -> &str {
    tag.split(['-', '_']).next().unwrap_or(tag)
}

fn match_locale<'r>(record: &'r MappingRecord, requested: &str) -> Option<(&'r String, &'r String)> {
    let locales = &record.targets.locale;
    locales
        .iter()
        .find(|(tag, _)| tag.eq_ignore_ascii_case(requested))
        .or_else(|| {
            let primary = primary_subtag(requested);
            locales
                .iter()
                .find(|(tag, _)| tag.eq_ignore_ascii_case(primary))
        })
}

/// Pick the target of `record` for `request`.
pub fn resolve_record(record: &MappingRecord, request: &ResolveRequest) -> Result<Resolution> {
    if let Some(expires_at) = record.expires_at
        && record.is_expired_at(request.at)
    {
        return Err(LinkregError::expired(format!(
            "Short code '{}' expired at {}",
            record.code,
            crate::storages::models::timestamp::format(&expires_at)
        )));
    }

    if let Some(hash) = &record.password_hash {
        match request.password.as_deref() {
            None => {
                return Err(LinkregError::unauthorized(format!(
                    "Short code '{}' is password protected; pass --password",
                    record.code
                )));
            }
            Some(password) if !verify_password(password, hash) => {
                return Err(LinkregError::unauthorized(format!(
                    "Wrong password for short code '{}'",
                    record.code
                )));
            }
            Some(_) => {}
        }
    }

    if let Some(device) = request.device {
        let target = match device {
            DeviceKind::Mobile => record.targets.device.mobile.as_ref(),
            DeviceKind::Desktop => record.targets.device.desktop.as_ref(),
        };
        if let Some(url) = target {
            return Ok(Resolution {
                url: url.clone(),
                source: TargetSource::Device(device),
            });
        }
    }

    if let Some(requested) = request.locale.as_deref()
        && let Some((tag, url)) = match_locale(record, requested)
    {
        return Ok(Resolution {
            url: url.clone(),
            source: TargetSource::Locale(tag.clone()),
        });
    }

    Ok(Resolution {
        url: record.url.clone(),
        source: TargetSource::Default,
    })
}

pub struct RedirectService<'a> {
    storage: &'a dyn Storage,
}

impl<'a> RedirectService<'a> {
    pub fn new(storage: &'a dyn Storage) -> Self {
        Self { storage }
    }

    pub fn resolve(&self, request: &ResolveRequest) -> Result<Resolution> {
        let records = self.storage.load()?;
        let record = records
            .iter()
            .find(|r| r.code == request.code)
            .ok_or_else(|| {
                LinkregError::not_found(format!("Short code '{}' not found", request.code))
            })?;

        let resolution = resolve_record(record, request)?;
        debug!(
            "Resolved '{}' to {} via {:?}",
            record.code, resolution.url, resolution.source
        );
        if let Some(expires_at) = record.expires_at {
            debug!(
                "'{}' expires {}",
                record.code,
                TimeParser::format_remaining(request.at, expires_at)
            );
        }
        Ok(resolution)
    }
}
