use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;

/// Course code the export is filed under.
pub const COURSE_CODE: &str = "CLMML11";
/// The journey this tool was written against; shown as a hint when prompting.
pub const GCSB_JOURNEY_URL: &str = "https://www.cloudskillsboost.google/journeys/17";
/// Relative course links are resolved against this.
pub const GCSB_HOME_URL: &str = "https://www.cloudskillsboost.google/";

/// Config file picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "scraper.json";

pub const ENV_DATA_PATH: &str = "DATA_PATH";
pub const ENV_JOURNEY_URL: &str = "GCSB_JOURNEY_URL";

/// Settings loaded once at startup and handed to whatever needs them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root folder for exported data.
    pub data_path: PathBuf,
    /// Journey URL used when neither the flag nor the environment supplies one.
    pub gcsb_journey_url: Option<String>,
    pub selectors: SelectorSet,
}

/// CSS selectors describing a journey page. Field selectors are scoped to a single item node.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SelectorSet {
    pub item: String,
    pub title: String,
    pub details: String,
    pub description: String,
    pub link: String,
}

impl Default for SelectorSet {
    fn default() -> Self {
        SelectorSet {
            item: "div.journey-item".to_string(),
            title: ".journey-item__title".to_string(),
            details: ".journey-item__details".to_string(),
            description: ".journey-item__description".to_string(),
            link: "a[href]".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_path: PathBuf::from("data"),
            gcsb_journey_url: None,
            selectors: SelectorSet::default(),
        }
    }
}

impl Config {
    pub fn from_json(s: &str) -> anyhow::Result<Self> {
        serde_json::from_str(s).context("invalid configuration")
    }

    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_FILE`] is read if present and
    /// defaults are used otherwise.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let p = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !p.is_file() {
                    tracing::debug!("no {DEFAULT_CONFIG_FILE}, using defaults");
                    return Ok(Config::default());
                }
                p
            }
        };
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Config::from_json(&raw).with_context(|| format!("in {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Apply environment overrides. `lookup` is `std::env::var` in production.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(dir) = lookup(ENV_DATA_PATH).filter(|d| !d.trim().is_empty()) {
            self.data_path = PathBuf::from(dir);
        }
        self
    }

    /// `<data root>/<course code>/<course code>-Courses.csv`
    pub fn output_path(&self) -> PathBuf {
        self.data_path
            .join(COURSE_CODE)
            .join(format!("{COURSE_CODE}-Courses.csv"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn output_path_nests_course_code() {
        let cfg = Config {
            data_path: PathBuf::from("/srv/data"),
            ..Config::default()
        };
        assert_eq!(
            cfg.output_path(),
            PathBuf::from("/srv/data/CLMML11/CLMML11-Courses.csv")
        );
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = Config::from_json(r#"{"gcsb_journey_url": "https://example.com/j/1"}"#)
            .expect("parse");
        assert_eq!(cfg.data_path, PathBuf::from("data"));
        assert_eq!(cfg.gcsb_journey_url.as_deref(), Some("https://example.com/j/1"));
        assert_eq!(cfg.selectors, SelectorSet::default());
    }

    #[test]
    fn selector_overrides_are_per_field() {
        let cfg = Config::from_json(r#"{"selectors": {"item": "li.course"}}"#).expect("parse");
        assert_eq!(cfg.selectors.item, "li.course");
        assert_eq!(cfg.selectors.link, SelectorSet::default().link);
    }

    #[test]
    fn env_overrides_data_path() {
        let cfg = Config::default().with_env(|k| (k == ENV_DATA_PATH).then(|| "/tmp/x".to_string()));
        assert_eq!(cfg.data_path, PathBuf::from("/tmp/x"));

        let cfg = Config::default().with_env(|_| Some("  ".to_string()));
        assert_eq!(cfg.data_path, PathBuf::from("data"));
    }

    #[test]
    fn load_reads_explicit_file() {
        let mut tmp = NamedTempFile::new().expect("tmp file");
        write!(tmp, r#"{{"data_path": "out"}}"#).unwrap();
        let cfg = Config::load(Some(tmp.path())).expect("load");
        assert_eq!(cfg.data_path, PathBuf::from("out"));
    }

    #[test]
    fn load_fails_for_missing_explicit_file() {
        let err = Config::load(Some(Path::new("/definitely/not/here.json"))).unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(Config::from_json("{ not json").is_err());
    }
}
