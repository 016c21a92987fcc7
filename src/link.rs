use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// Prepend `https://` when `input` carries no scheme.
pub fn with_default_scheme(input: &str) -> String {
    static SCHEME_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://").unwrap());

    let s = input.trim();
    if SCHEME_RE.is_match(s) {
        s.to_string()
    } else {
        format!("https://{s}")
    }
}

/// Make `href` absolute against `base`. Absolute hrefs pass through untouched; anything `Url`
/// cannot join is kept verbatim.
pub fn absolutise(base: &Url, href: &str) -> String {
    let href = href.trim();
    if let Ok(u) = Url::parse(href) {
        return u.to_string();
    }
    match base.join(href) {
        Ok(u) => u.to_string(),
        Err(_) => href.to_string(),
    }
}
