use std::env;

use anyhow::bail;
use clap::Parser;
use url::Url;

use crate::{
    cli::Cli,
    config::{Config, ENV_JOURNEY_URL, GCSB_HOME_URL, GCSB_JOURNEY_URL},
    extract::{Extractor, JourneyPage, http::HttpFetcher},
    source::Candidates,
};

mod cli;
mod config;
mod extract;
mod link;
mod log;
mod pipeline;
mod record;
mod source;
mod stage;
mod writer;

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    // Before logging, so RUST_LOG from .env applies. A missing .env is fine.
    let _ = dotenvy::dotenv();
    log::init(args.verbose);

    let mut config = Config::load(args.config.as_deref())?.with_env(|k| env::var(k).ok());
    if let Some(dir) = &args.data_dir {
        config.data_path = dir.clone();
    }

    // Selectors are checked before anything touches the network or the terminal.
    let page = JourneyPage::new(&config.selectors)?;

    let candidates = Candidates {
        flag: args.url.clone(),
        env: env::var(ENV_JOURNEY_URL).ok(),
        config: config.gcsb_journey_url.clone(),
    };
    let (source, url) = source::resolve(&candidates, || {
        if args.no_prompt {
            bail!("no journey URL supplied (use --url or set {ENV_JOURNEY_URL})");
        }
        cli::ask_url(&format!(
            "Please enter the GCSB Journey URL (e.g. {GCSB_JOURNEY_URL})"
        ))
    })?;
    let url = link::with_default_scheme(&url);
    tracing::info!(%source, %url, "journey URL");

    let base = Url::parse(GCSB_HOME_URL)?;
    let extractor = Extractor::new(HttpFetcher::new(args.timeout()), page, base);
    let destination = args.output.clone().unwrap_or_else(|| config.output_path());

    let report = pipeline::run(&extractor, &url, &destination)?;
    report.print();
    Ok(())
}
