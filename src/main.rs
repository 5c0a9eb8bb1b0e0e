//! # chatlens CLI
//!
//! Command-line interface for the chatlens library.

use std::process;

use clap::Parser as ClapParser;

use chatlens::ChatlensError;
use chatlens::aggregate::combine_files;
use chatlens::analysis::{WEEKDAYS, emoji_counts, global_meta, hour_counts, top_n, word_counts};
use chatlens::cli::Args;

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), ChatlensError> {
    let args = <Args as ClapParser>::parse();

    println!("🔍 chatlens v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("👤 Owner:   {}", args.owner);
    for file in &args.files {
        println!("📂 Input:   {}", file.display());
    }
    println!();

    let combined = combine_files(&args.files, &args.owner)?;

    println!("💬 {} messages combined", combined.records.len());
    println!();

    for report in &combined.reports {
        println!("📄 {} ({})", report.path.display(), report.kind);
        println!("{}", report.summary);
    }

    if args.no_analysis || combined.records.is_empty() {
        return Ok(());
    }

    let meta = global_meta(&combined.records);
    if let Some(meta) = &meta {
        println!("📊 Activity");
        println!("{}", meta);
    }

    println!("🕐 By hour of day");
    for (hour, count) in hour_counts(&combined.records).iter().enumerate() {
        if *count > 0 {
            println!("  {hour:>2}:00  {count}");
        }
    }
    println!();

    println!("🔤 Top {} words per sender", args.top);
    for (sender, counts) in word_counts(&combined.records) {
        let top: Vec<String> = top_n(&counts, args.top)
            .into_iter()
            .map(|(word, n)| format!("{word} ({n})"))
            .collect();
        println!("  {sender}: {}", top.join(", "));
    }
    println!();

    println!("😀 Top {} emoji per sender", args.top);
    for (sender, counts) in emoji_counts(&combined.records) {
        if counts.is_empty() {
            continue;
        }
        let top: Vec<String> = top_n(&counts, args.top)
            .into_iter()
            .map(|(emoji, n)| format!("{emoji} ({n})"))
            .collect();
        println!("  {sender}: {}", top.join(", "));
    }

    // Keep the weekday line last; it reads as the headline takeaway.
    if let Some(meta) = &meta {
        let busiest = meta
            .weekday_counts
            .iter()
            .enumerate()
            .max_by_key(|(_, n)| **n)
            .map(|(i, _)| WEEKDAYS[i]);
        if let Some(day) = busiest {
            println!();
            println!("📅 Busiest weekday: {day}");
        }
    }

    Ok(())
}
