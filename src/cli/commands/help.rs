use clap::CommandFactory;
use colored::*;

use crate::cli::args::Cli;

pub fn show_help() {
    println!("{}", "linkreg - short link registry".bold().magenta());
    println!();
    println!("{}", Cli::command().render_help());
    println!("{}", "Examples:".bold());
    println!(
        "  {}",
        "linkreg add --url https://example.com --code promo1".cyan()
    );
    println!(
        "  {}",
        "linkreg add --url https://example.com --expires 7d --alphabet readable".cyan()
    );
    println!(
        "  {}",
        "linkreg add --url https://example.com --locale en=https://example.com/en,fr=https://example.com/fr"
            .cyan()
    );
    println!("  {}", "linkreg resolve --code promo1 --locale fr-CA".cyan());
}

pub fn show_unknown_command(name: &str) {
    println!(
        "{} Unknown command '{}'",
        "⚠".bold().yellow(),
        name.cyan()
    );
    println!();
    show_help();
}
