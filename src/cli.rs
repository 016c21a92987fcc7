use std::{
    io::{self, BufRead, IsTerminal},
    path::PathBuf,
    time::Duration,
};

use anyhow::Context;
use clap::Parser;

/// Scrape a Google Cloud Skills Boost journey page into a CSV of its courses.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Journey URL. Falls back to $GCSB_JOURNEY_URL, then the config file, then a prompt
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// JSON configuration file [default: ./scraper.json when present]
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Root folder for exported data (overrides config and $DATA_PATH)
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Write the CSV here instead of <data root>/CLMML11/CLMML11-Courses.csv
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Give up on the request after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Fail instead of prompting when no URL is configured
    #[arg(long)]
    pub no_prompt: bool,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}

/// Ask for the journey URL. A terminal gets an interactive prompt; piped stdin is read one line
/// at a time, and EOF counts as an empty answer.
pub fn ask_url(prompt: &str) -> anyhow::Result<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return dialoguer::Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .context("failed to read URL from terminal");
    }
    read_answer(stdin.lock())
}

fn read_answer(mut input: impl BufRead) -> anyhow::Result<String> {
    let mut line = String::new();
    input.read_line(&mut line).context("failed to read URL from stdin")?;
    Ok(line.trim().to_string())
}
