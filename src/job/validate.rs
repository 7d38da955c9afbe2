use std::sync::LazyLock;

use regex::Regex;

// Prefix match: anything may follow the identifier (extra query params etc).
static SOURCE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(https?://)?(www\.)?(youtube\.com/(watch\?v=|embed/)|youtu\.be/)[A-Za-z0-9_-]+")
        .expect("source url pattern is valid")
});

/// Syntactic pre-check for a media link.
///
/// Accepts watch-style (`youtube.com/watch?v=ID`), embed-style
/// (`youtube.com/embed/ID`) and short links (`youtu.be/ID`), with an optional
/// `http`/`https` scheme and `www.` prefix. A passing URL may still be rejected
/// by the backend later, which surfaces as a failed job.
pub fn validate_source_url(url: &str) -> bool {
    !url.trim().is_empty() && SOURCE_URL.is_match(url)
}

/// Formats a duration in seconds as `M:SS`.
///
/// Minutes are unbounded and fractional seconds are truncated. Negative or
/// non-finite input renders as `0:00`.
pub fn format_duration(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.trunc() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}
