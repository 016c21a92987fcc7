use std::time::Duration;

use anyhow::Context;
use url::Url;

use crate::extract::Fetcher;

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.10 Safari/605.1.1";

/// Blocking GET over `ureq`. Non-2xx responses come back as errors; the body size is not capped.
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    /// `timeout` bounds the whole request; `None` waits indefinitely.
    pub fn new(timeout: Option<Duration>) -> Self {
        let cfg = ureq::Agent::config_builder().timeout_global(timeout).build();
        HttpFetcher {
            agent: ureq::Agent::new_with_config(cfg),
        }
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &Url) -> anyhow::Result<String> {
        let body = self
            .agent
            .get(url.as_str())
            .header("User-Agent", USER_AGENT)
            .call()
            .with_context(|| format!("failed request for URL {url}"))?
            .into_body()
            .with_config()
            .limit(u64::MAX)
            .read_to_string()
            .context("read body")?;
        Ok(body)
    }
}
