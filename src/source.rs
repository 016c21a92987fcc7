use std::fmt;

use anyhow::bail;

/// Where the journey URL came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Flag,
    Env,
    Config,
    Prompt,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Source::Flag => "--url",
            Source::Env => crate::config::ENV_JOURNEY_URL,
            Source::Config => "config",
            Source::Prompt => "prompt",
        })
    }
}

/// URL candidates gathered without user interaction.
#[derive(Debug, Default, Clone)]
pub struct Candidates {
    pub flag: Option<String>,
    pub env: Option<String>,
    pub config: Option<String>,
}

/// Sources consulted before falling back to the prompt.
///
/// NOTE: Ordering is important here, as it signifies priority.
static SOURCES: &[Source] = &[Source::Flag, Source::Env, Source::Config];

impl Candidates {
    fn get(&self, source: Source) -> Option<&str> {
        match source {
            Source::Flag => self.flag.as_deref(),
            Source::Env => self.env.as_deref(),
            Source::Config => self.config.as_deref(),
            Source::Prompt => None,
        }
    }
}

/// Pick the journey URL from the highest-priority non-empty source, asking via `prompt` only if
/// every other source is empty. Fails when the prompt yields nothing too.
pub fn resolve(
    candidates: &Candidates,
    prompt: impl FnOnce() -> anyhow::Result<String>,
) -> anyhow::Result<(Source, String)> {
    let found = SOURCES.iter().find_map(|&s| {
        candidates
            .get(s)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| (s, v.to_string()))
    });
    if let Some(hit) = found {
        return Ok(hit);
    }

    let answer = prompt()?;
    let answer = answer.trim();
    if answer.is_empty() {
        bail!("no journey URL supplied");
    }
    Ok((Source::Prompt, answer.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn never() -> anyhow::Result<String> {
        panic!("prompt should not be reached")
    }

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn flag_beats_everything() {
        let c = Candidates {
            flag: some("https://a"),
            env: some("https://b"),
            config: some("https://c"),
        };
        assert_eq!(resolve(&c, never).unwrap(), (Source::Flag, "https://a".to_string()));
    }

    #[test]
    fn env_beats_config() {
        let c = Candidates {
            flag: None,
            env: some("https://b"),
            config: some("https://c"),
        };
        assert_eq!(resolve(&c, never).unwrap().0, Source::Env);
    }

    #[test]
    fn empty_values_fall_through() {
        let c = Candidates {
            flag: some(""),
            env: some("   "),
            config: some("https://c"),
        };
        assert_eq!(resolve(&c, never).unwrap(), (Source::Config, "https://c".to_string()));
    }

    #[test]
    fn prompt_is_last_resort() {
        let got = resolve(&Candidates::default(), || Ok(" example.com/j ".to_string())).unwrap();
        assert_eq!(got, (Source::Prompt, "example.com/j".to_string()));
    }

    #[test]
    fn empty_prompt_is_fatal() {
        let err = resolve(&Candidates::default(), || Ok(String::new())).unwrap_err();
        assert!(err.to_string().contains("no journey URL supplied"));
    }

    #[test]
    fn prompt_errors_propagate() {
        let err = resolve(&Candidates::default(), || anyhow::bail!("not a terminal")).unwrap_err();
        assert!(err.to_string().contains("not a terminal"));
    }

    #[test]
    fn first_non_empty_source_wins() {
        proptest::proptest!(|(flag in proptest::option::of("[a-z]{0,6}"), env in proptest::option::of("[a-z]{0,6}"), config in proptest::option::of("[a-z]{0,6}"))| {
            let c = Candidates { flag: flag.clone(), env: env.clone(), config: config.clone() };
            let expected = [(Source::Flag, flag), (Source::Env, env), (Source::Config, config)]
                .into_iter()
                .find_map(|(s, v)| v.filter(|v| !v.is_empty()).map(|v| (s, v)));
            let got = resolve(&c, || Ok(String::new())).ok();
            proptest::prop_assert_eq!(got, expected);
        })
    }
}
