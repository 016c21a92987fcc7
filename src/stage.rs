use std::fmt;

/// Where a run currently is. A run moves strictly forward through
/// `Idle → Fetching → Parsing → Writing → Done`; only `Fetching` and `Writing` may end in
/// `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Fetching,
    Parsing,
    Writing,
    Done,
    Failed,
}

impl Stage {
    pub fn can_advance_to(self, next: Stage) -> bool {
        matches!(
            (self, next),
            (Stage::Idle, Stage::Fetching)
                | (Stage::Fetching, Stage::Parsing)
                | (Stage::Parsing, Stage::Writing)
                | (Stage::Writing, Stage::Done)
                | (Stage::Fetching, Stage::Failed)
                | (Stage::Writing, Stage::Failed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Done | Stage::Failed)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Idle => "idle",
            Stage::Fetching => "fetching",
            Stage::Parsing => "parsing",
            Stage::Writing => "writing",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        f.write_str(s)
    }
}
