use anyhow::Context;
use url::Url;

use crate::{record::ItemRecord, stage::Stage};

pub mod http;
pub mod journey;

pub use journey::JourneyPage;

/// Source of raw page markup.
pub trait Fetcher {
    fn fetch(&self, url: &Url) -> anyhow::Result<String>;
}

/// Fetches a journey page and turns its item nodes into records.
pub struct Extractor<F> {
    fetcher: F,
    page: JourneyPage,
    base: Url,
}

impl<F: Fetcher> Extractor<F> {
    /// `base` is what relative course links are resolved against.
    pub fn new(fetcher: F, page: JourneyPage, base: Url) -> Self {
        Extractor {
            fetcher,
            page,
            base,
        }
    }

    /// One GET, one parse. `observe` is told when fetching and parsing begin.
    ///
    /// A URL that does not parse, a failed request, or a non-2xx status is returned as an error.
    /// Missing fields never are; they fall back to their placeholders.
    pub fn extract(
        &self,
        url: &str,
        mut observe: impl FnMut(Stage),
    ) -> anyhow::Result<Vec<ItemRecord>> {
        observe(Stage::Fetching);
        let url = Url::parse(url).with_context(|| format!("invalid URL {url:?}"))?;
        let html = self.fetcher.fetch(&url)?;
        tracing::debug!(%url, bytes = html.len(), "fetched page");

        observe(Stage::Parsing);
        let records = self.page.parse_items(&html, &self.base);
        tracing::info!(%url, items = records.len(), "extracted items");
        Ok(records)
    }
}
