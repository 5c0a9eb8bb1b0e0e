//! Command-line interface definition using clap.
//!
//! This module only defines the argument structure; the binary in
//! `src/main.rs` does the actual work. The struct is public so embedders can
//! reuse the same argument parsing.

use std::path::PathBuf;

use clap::Parser;

/// Merge WhatsApp and Messenger chat exports into one chronological
/// transcript and report activity statistics.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatlens")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatlens family_chat.txt
    chatlens chat.txt messages.json --owner Alice
    chatlens chat.txt --top 5
    chatlens messages.json --no-analysis")]
pub struct Args {
    /// Input files (.txt for WhatsApp, .json for Messenger)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Canonical name substituted for "you" self-references
    #[arg(short, long, default_value = "me")]
    pub owner: String,

    /// How many top words/emoji to show per sender
    #[arg(short, long, default_value_t = 10, value_name = "N")]
    pub top: usize,

    /// Skip the word/emoji/activity statistics, print summaries only
    #[arg(long)]
    pub no_analysis: bool,
}
