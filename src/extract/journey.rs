use anyhow::anyhow;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::{
    config::SelectorSet,
    link::absolutise,
    record::{Field, ItemRecord},
};

/// Compiled selectors for a journey page.
pub struct JourneyPage {
    item: Selector,
    title: Selector,
    details: Selector,
    description: Selector,
    link: Selector,
}

impl JourneyPage {
    /// Compile `set`. A selector that does not parse is reported with the field it belongs to.
    pub fn new(set: &SelectorSet) -> anyhow::Result<Self> {
        Ok(JourneyPage {
            item: compile("item", &set.item)?,
            title: compile(Field::Title.name(), &set.title)?,
            details: compile(Field::Details.name(), &set.details)?,
            description: compile(Field::Description.name(), &set.description)?,
            link: compile(Field::Link.name(), &set.link)?,
        })
    }

    fn query(&self, field: Field) -> &Selector {
        match field {
            Field::Title => &self.title,
            Field::Details => &self.details,
            Field::Description => &self.description,
            Field::Link => &self.link,
        }
    }

    /// Pull one record per item node, in document order.
    pub fn parse_items(&self, html: &str, base: &Url) -> Vec<ItemRecord> {
        let doc = Html::parse_document(html);
        doc.select(&self.item)
            .map(|node| self.parse_item(node, base))
            .collect()
    }

    fn parse_item(&self, node: ElementRef<'_>, base: &Url) -> ItemRecord {
        let mut record = ItemRecord::empty();
        for field in Field::ALL {
            match self.first_match(node, field, base) {
                Some(value) => record.set(field, value),
                None => tracing::debug!(
                    field = field.name(),
                    placeholder = record.get(field),
                    "no match"
                ),
            }
        }
        record
    }

    fn first_match(&self, node: ElementRef<'_>, field: Field, base: &Url) -> Option<String> {
        let mut matches = node.select(self.query(field));
        match field {
            Field::Link => matches
                .find_map(|el| el.value().attr("href"))
                .map(|href| absolutise(base, href)),
            _ => matches.next().map(|el| normalize_ws(&el.text().collect::<String>())),
        }
    }
}

fn compile(what: &str, css: &str) -> anyhow::Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("invalid {what} selector {css:?}: {e}"))
}

fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
