//! linkreg - a flat-file short link registry
//!
//! Short codes and their targets live in a single JSON array on disk.
//! Every invocation reads the whole file, changes it in memory and writes
//! it back.
//!
//! # Architecture
//! - `storages`: the record model and the `Storage` trait (file and memory backends)
//! - `services`: add / remove / list and link resolution on top of a store
//! - `utils`: code generation, URL validation, password digests, time parsing
//! - `cli`: argv parsing and command output
//! - `config`: the optional `linkreg.toml`
//! - `system`: logging setup

pub mod cli;
pub mod config;
pub mod errors;
pub mod services;
pub mod storages;
pub mod system;
pub mod utils;

pub use errors::{LinkregError, Result};
