//! Command-line definitions using clap's derive macros.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::services::AddLinkRequest;
use crate::utils::Alphabet;
use crate::utils::device::DeviceKind;

/// linkreg - a flat-file short link registry
#[derive(Parser, Debug)]
#[command(name = "linkreg")]
#[command(version)]
#[command(about = "A small command-line registry for short link mappings", long_about = None)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Mapping file (default: links.json beside the binary)
    #[arg(long, global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Config file (default: linkreg.toml beside the binary)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a short link
    Add(AddArgs),

    /// Remove a short link
    Remove(RemoveArgs),

    /// List all short links
    List(ListArgs),

    /// Show where a short code redirects
    Resolve(ResolveArgs),

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Show this help
    Help,

    // 未知命令：显示用法，不做任何修改
    #[command(external_subcommand)]
    Unknown(Vec<String>),
}

#[derive(Args, Debug, Default)]
pub struct AddArgs {
    /// Target URL
    #[arg(long)]
    pub url: String,

    /// Short code, random when omitted
    #[arg(long)]
    pub code: Option<String>,

    /// Expiry: RFC3339, YYYY-MM-DD or relative (1d, 2w, 1h30m)
    #[arg(long, value_name = "TIME")]
    pub expires: Option<String>,

    /// Require a password (stored as SHA-256)
    #[arg(long)]
    pub password: Option<String>,

    /// Target for mobile devices
    #[arg(long, value_name = "URL")]
    pub mobile: Option<String>,

    /// Target for desktop devices
    #[arg(long, value_name = "URL")]
    pub desktop: Option<String>,

    /// Per-locale targets, e.g. en=https://a,fr=https://b
    #[arg(long, value_name = "LANG=URL,...")]
    pub locale: Option<String>,

    /// Overwrite an existing code
    #[arg(long)]
    pub replace: bool,

    /// Length of generated codes (min 4)
    #[arg(long, value_name = "N")]
    pub length: Option<usize>,

    /// 'full' or 'readable' (no 0/O/1/l/I)
    #[arg(long, value_name = "MODE")]
    pub alphabet: Option<Alphabet>,
}

impl AddArgs {
    pub fn to_request(&self) -> AddLinkRequest {
        AddLinkRequest {
            url: self.url.clone(),
            code: self.code.clone(),
            expires: self.expires.clone(),
            password: self.password.clone(),
            mobile: self.mobile.clone(),
            desktop: self.desktop.clone(),
            locale: self.locale.clone(),
            replace: self.replace,
        }
    }
}

#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Short code to remove
    #[arg(long)]
    pub code: String,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Show expiry, password and override targets under each link
    #[arg(long)]
    pub details: bool,
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Short code to resolve
    #[arg(long)]
    pub code: String,

    /// 'mobile' or 'desktop'
    #[arg(long, value_name = "KIND")]
    pub device: Option<DeviceKind>,

    /// Detect the device from a User-Agent
    #[arg(long, value_name = "UA")]
    pub user_agent: Option<String>,

    /// Preferred locale, e.g. fr-CA
    #[arg(long, value_name = "TAG")]
    pub locale: Option<String>,

    /// Password for protected links
    #[arg(long)]
    pub password: Option<String>,

    /// Evaluate expiry at this time instead of now
    #[arg(long, value_name = "TIME")]
    pub at: Option<String>,
}

/// Configuration management commands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a sample configuration file
    Generate {
        /// Output path (default: linkreg.toml beside the binary)
        output_path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Commands {
    pub fn name(&self) -> &str {
        match self {
            Commands::Add(_) => "add",
            Commands::Remove(_) => "remove",
            Commands::List(_) => "list",
            Commands::Resolve(_) => "resolve",
            Commands::Config { .. } => "config",
            Commands::Help => "help",
            Commands::Unknown(args) => args.first().map(String::as_str).unwrap_or(""),
        }
    }
}
