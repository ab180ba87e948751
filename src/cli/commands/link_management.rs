use std::path::PathBuf;

use chrono::Utc;
use colored::*;

use crate::cli::args::{AddArgs, ListArgs, RemoveArgs, ResolveArgs};
use crate::config::Config;
use crate::errors::Result;
use crate::services::link_service::{detail_indent, format_list_line};
use crate::services::{LinkService, RedirectService, RemoveOutcome, ResolveRequest};
use crate::storages::models::timestamp;
use crate::storages::{FileStorage, MappingRecord, Storage};
use crate::utils::CodeGenerator;
use crate::utils::device::DeviceKind;
use crate::utils::time_parser::TimeParser;

fn open_storage(config: &Config, file: Option<PathBuf>) -> FileStorage {
    FileStorage::new(file.unwrap_or_else(|| config.data_file()))
}

pub fn add_link(config: &Config, file: Option<PathBuf>, args: AddArgs) -> Result<()> {
    let storage = open_storage(config, file);
    let generator = CodeGenerator::new(
        args.length.unwrap_or(config.codes.length),
        args.alphabet.unwrap_or(config.codes.alphabet),
    );

    let outcome = LinkService::new(&storage, generator).add(&args.to_request())?;
    let record = &outcome.record;

    for skipped in &outcome.skipped_locales {
        println!(
            "{} Skipped locale pair '{}': {}",
            "⚠".bold().yellow(),
            skipped.pair,
            skipped.reason
        );
    }
    if outcome.generated {
        println!(
            "{} Generated random code: {}",
            "ℹ".bold().blue(),
            record.code.magenta()
        );
    }
    if let Some(previous) = &outcome.replaced {
        println!(
            "{} Replaced '{}': {} -> {}",
            "⚠".bold().yellow(),
            record.code.cyan(),
            previous.url.dimmed(),
            record.url.blue()
        );
    } else {
        println!(
            "{} Added short link: {} -> {}",
            "✓".bold().green(),
            record.code.cyan(),
            record.url.blue()
        );
    }
    if let Some(expires_at) = record.expires_at {
        println!("  expires: {}", timestamp::format(&expires_at).yellow());
    }

    Ok(())
}

pub fn remove_link(config: &Config, file: Option<PathBuf>, args: RemoveArgs) -> Result<()> {
    let storage = open_storage(config, file);

    match LinkService::new(&storage, CodeGenerator::default()).remove(&args.code)? {
        RemoveOutcome::Removed(record) => {
            println!(
                "{} Removed short link: {} -> {}",
                "✓".bold().green(),
                record.code.cyan(),
                record.url.blue()
            );
        }
        RemoveOutcome::NotFound(code) => {
            // 不存在不算失败，进程仍以 0 退出
            println!(
                "{} Short code '{}' not found in {}, nothing removed",
                "⚠".bold().yellow(),
                code.cyan(),
                storage.describe()
            );
        }
    }

    Ok(())
}

fn print_details(record: &MappingRecord) {
    let indent = detail_indent();
    let now = Utc::now();

    if let Some(expires_at) = record.expires_at {
        println!(
            "{}expires  {} ({})",
            indent,
            timestamp::format(&expires_at).yellow(),
            TimeParser::format_remaining(now, expires_at)
        );
    }
    if record.is_password_protected() {
        println!("{}password protected", indent);
    }
    if let Some(mobile) = &record.targets.device.mobile {
        println!("{}mobile   {}", indent, mobile.blue());
    }
    if let Some(desktop) = &record.targets.device.desktop {
        println!("{}desktop  {}", indent, desktop.blue());
    }
    for (tag, url) in &record.targets.locale {
        println!("{}locale   {} {}", indent, tag.magenta(), url.blue());
    }
}

pub fn list_links(config: &Config, file: Option<PathBuf>, args: ListArgs) -> Result<()> {
    let storage = open_storage(config, file);
    let listing = LinkService::new(&storage, CodeGenerator::default()).list()?;

    if listing.is_empty() {
        println!(
            "{} No short links in {}",
            "ℹ".bold().blue(),
            storage.describe()
        );
        return Ok(());
    }

    if args.details {
        for record in listing.records() {
            println!("{}", format_list_line(record));
            print_details(record);
        }
    } else {
        for line in listing.lines() {
            println!("{}", line);
        }
    }

    println!();
    println!(
        "{} {} short link(s) in {}",
        "ℹ".bold().blue(),
        listing.len().to_string().green(),
        storage.describe()
    );
    Ok(())
}

pub fn resolve_link(config: &Config, file: Option<PathBuf>, args: ResolveArgs) -> Result<()> {
    let storage = open_storage(config, file);
    let at = match args.at.as_deref() {
        Some(raw) => TimeParser::parse_expire_time(raw)?,
        None => Utc::now(),
    };

    let device = args.device.or_else(|| {
        args.user_agent
            .as_deref()
            .and_then(DeviceKind::from_user_agent)
    });

    let request = ResolveRequest {
        code: args.code,
        device,
        locale: args.locale,
        password: args.password,
        at,
    };

    let resolution = RedirectService::new(&storage).resolve(&request)?;
    println!("{}", resolution.url);
    Ok(())
}
