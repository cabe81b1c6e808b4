//! # jot
//!
//! A plain-markdown note manager with selector-based subtree refiling.
//!
//! ## Usage
//!
//! Move a subtree between files:
//! ```sh
//! jot refile inbox.md#meeting work.md#projects
//! ```
//!
//! List unambiguous selectors for every heading:
//! ```sh
//! jot peek --toc notes.md
//! ```
//!
//! Refile whatever subtree contains a byte offset (editor integration):
//! ```sh
//! jot refile --offset 120 notes.md '#archive'
//! ```

mod cli;

use clap::Parser as ClapParser;
use cli::{Cli, Command, OutputFormat};
use color_eyre::Result;
use jot::refile::DestinationTarget;
use jot::{Config, RefileError, RefileSummary, Refiler, SelectorEntry};
use std::process;
use tracing_subscriber::EnvFilter;
use unicode_width::UnicodeWidthStr;

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("JOT_LOG"))
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();
    let config = Config::load();
    let refiler = Refiler::new(config.notes_dir());

    match args.command {
        Command::Refile {
            source,
            dest,
            prepend,
            offset,
            output,
        } => {
            let prepend = prepend || config.refile.prepend;
            let result = match offset {
                Some(byte_offset) => refiler.refile_by_offset(&source, byte_offset, &dest, prepend),
                None => refiler.refile(&source, &dest, prepend),
            };
            match result {
                Ok(summary) => print_summary(&summary, &output),
                Err(e) => fail(&e),
            }
        }
        Command::Peek {
            target,
            toc,
            short,
            render,
            output,
        } => {
            if toc || !target.contains('#') {
                let file = target.split('#').next().unwrap_or_default();
                match refiler.list_selectors(file, short || config.peek.short) {
                    Ok(entries) => print_toc(&entries, &output),
                    Err(e) => fail(&e),
                }
            } else {
                match refiler.peek(&target) {
                    Ok(sub) if render => termimad::print_text(&sub.content),
                    Ok(sub) => print!("{}", sub.content),
                    Err(e) => fail(&e),
                }
            }
        }
        Command::Resolve {
            dest,
            prepend,
            output,
        } => match refiler.resolve_destination(&dest, prepend || config.refile.prepend) {
            Ok(target) => print_plan(&target, &output),
            Err(e) => fail(&e),
        },
    }

    Ok(())
}

fn fail(e: &RefileError) -> ! {
    eprintln!("{}", e);
    process::exit(1);
}

fn print_summary(summary: &RefileSummary, format: &OutputFormat) {
    match format {
        OutputFormat::Plain => {
            println!(
                "Refiled '{}' -> {} (level {})",
                summary.heading,
                summary.dest_file.display(),
                summary.level
            );
            if !summary.created.is_empty() {
                println!("Created headings: {}", summary.created.join(" / "));
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(summary).unwrap();
            println!("{}", json);
        }
    }
}

fn print_toc(entries: &[SelectorEntry], format: &OutputFormat) {
    match format {
        OutputFormat::Plain => {
            let width = entries
                .iter()
                .map(|e| e.selector.width())
                .max()
                .unwrap_or(0);
            for entry in entries {
                let pad = " ".repeat(width - entry.selector.width());
                let indent = "  ".repeat(entry.level.saturating_sub(1));
                let flag = if entry.optimal { "" } else { " *" };
                println!("{}{}  {}{}{}", entry.selector, pad, indent, entry.heading, flag);
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(entries).unwrap();
            println!("{}", json);
        }
    }
}

fn print_plan(target: &DestinationTarget, format: &OutputFormat) {
    match format {
        OutputFormat::Plain => {
            let position = if target.prepend { "prepend" } else { "append" };
            println!(
                "{}: {} at byte {} (level {})",
                target.file.display(),
                position,
                target.insert_offset,
                target.target_level
            );
            if !target.create_segments.is_empty() {
                println!("Would create: {}", target.create_segments.join(" / "));
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(target).unwrap();
            println!("{}", json);
        }
    }
}
