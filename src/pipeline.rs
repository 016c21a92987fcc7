use std::{path::Path, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::{OwoColorize, Stream::Stdout};

use crate::{
    extract::{Extractor, Fetcher},
    stage::Stage,
    writer::{self, Outcome},
};

/// How a run that got past fetching ended.
#[derive(Debug)]
pub enum Report {
    Written(std::path::PathBuf),
    NoData,
    WriteFailed(anyhow::Error),
}

impl Report {
    /// The one status line printed on stdout.
    pub fn message(&self) -> String {
        match self {
            Report::Written(p) => format!("Data successfully written to {}", p.display()),
            Report::NoData => "No data to write!".to_string(),
            Report::WriteFailed(e) => {
                format!("An I/O error occurred while writing the file: {e:#}")
            }
        }
    }

    pub fn print(&self) {
        let msg = self.message();
        match self {
            Report::Written(_) => println!("{}", msg.if_supports_color(Stdout, |t| t.green())),
            Report::NoData => println!("{}", msg.if_supports_color(Stdout, |t| t.yellow())),
            Report::WriteFailed(_) => println!("{}", msg.if_supports_color(Stdout, |t| t.red())),
        }
    }
}

/// Tracks the current [`Stage`] and mirrors it on a stderr spinner.
struct Run {
    stage: Stage,
    spinner: ProgressBar,
}

impl Run {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            spinner.set_style(style);
        }
        spinner.enable_steady_tick(Duration::from_millis(100));
        Run {
            stage: Stage::Idle,
            spinner,
        }
    }

    fn enter(&mut self, next: Stage) {
        debug_assert!(
            self.stage.can_advance_to(next),
            "illegal transition {} -> {}",
            self.stage,
            next
        );
        tracing::debug!(from = %self.stage, to = %next, "stage");
        self.stage = next;
        if next.is_terminal() {
            self.spinner.finish_and_clear();
        } else {
            self.spinner.set_message(next.to_string());
        }
    }
}

/// Fetch `url`, extract its items and write them to `destination`.
///
/// Network faults are returned as errors. Write faults are folded into
/// [`Report::WriteFailed`] so the caller can report them without aborting.
pub fn run<F: Fetcher>(
    extractor: &Extractor<F>,
    url: &str,
    destination: &Path,
) -> anyhow::Result<Report> {
    let mut run = Run::new();

    let records = match extractor.extract(url, |s| run.enter(s)) {
        Ok(r) => r,
        Err(e) => {
            run.enter(Stage::Failed);
            tracing::error!(url, "fetch failed: {e:#}");
            return Err(e);
        }
    };

    run.enter(Stage::Writing);
    let report = match writer::write(&records, destination) {
        Ok(Outcome::Written(p)) => Report::Written(p),
        Ok(Outcome::NoData) => Report::NoData,
        Err(e) => {
            run.enter(Stage::Failed);
            tracing::error!(path = %destination.display(), "write failed: {e:#}");
            return Ok(Report::WriteFailed(e));
        }
    };
    run.enter(Stage::Done);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{GCSB_HOME_URL, SelectorSet},
        extract::JourneyPage,
    };
    use tempfile::tempdir;
    use url::Url;

    struct Static(&'static str);

    impl Fetcher for Static {
        fn fetch(&self, _url: &Url) -> anyhow::Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct Down;

    impl Fetcher for Down {
        fn fetch(&self, url: &Url) -> anyhow::Result<String> {
            anyhow::bail!("failed request for URL {url}")
        }
    }

    fn extractor<F: Fetcher>(f: F) -> Extractor<F> {
        Extractor::new(
            f,
            JourneyPage::new(&SelectorSet::default()).unwrap(),
            Url::parse(GCSB_HOME_URL).unwrap(),
        )
    }

    const PAGE: &str = r#"<div class="journey-item"><h3 class="journey-item__title">One</h3></div>
        <div class="journey-item"><h3 class="journey-item__title">Two</h3></div>"#;

    #[test]
    fn writes_and_reports_path() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("CLMML11/CLMML11-Courses.csv");
        let report = run(&extractor(Static(PAGE)), "https://example.com/j", &dest).unwrap();
        assert!(matches!(report, Report::Written(ref p) if p == &dest));
        assert_eq!(std::fs::read_to_string(&dest).unwrap().lines().count(), 3);
        assert!(report.message().starts_with("Data successfully written to "));
    }

    #[test]
    fn empty_page_reports_no_data() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("out.csv");
        let report = run(&extractor(Static("<p>nothing</p>")), "https://example.com/j", &dest)
            .unwrap();
        assert!(matches!(report, Report::NoData));
        assert_eq!(report.message(), "No data to write!");
        assert!(!dest.exists());
    }

    #[test]
    fn network_fault_is_an_error() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("out.csv");
        let err = run(&extractor(Down), "https://example.com/j", &dest).unwrap_err();
        assert!(err.to_string().contains("failed request"));
        assert!(!dest.exists());
    }

    #[test]
    fn write_fault_is_reported_not_raised() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        let report = run(&extractor(Static(PAGE)), "https://example.com/j", &blocker.join("o.csv"))
            .unwrap();
        assert!(matches!(report, Report::WriteFailed(_)));
        assert!(report.message().starts_with("An I/O error occurred while writing the file:"));
    }
}
