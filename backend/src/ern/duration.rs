//! Duration normalization to ISO-8601.
//!
//! Accepts `PT..` values untouched, `MM:SS` and `HH:MM:SS`. Anything else
//! becomes `PT0S`: duration is best-effort metadata.

use once_cell::sync::Lazy;
use regex::Regex;

pub const ZERO_DURATION: &str = "PT0S";

static ISO_DURATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^P(?:\d+D)?T(?:\d+H)?(?:\d+M)?(?:\d+(?:\.\d+)?S)?$").expect("valid regex")
});

static CLOCK_DURATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+):(\d{1,2})(?::(\d{1,2}))?$").expect("valid regex"));

/// Normalize a duration string to `PT[<H>H]<M>M<S>S`.
///
/// Two parts are always minutes and seconds.
pub fn normalize_duration(raw: &str) -> String {
    let value = raw.trim();

    // Every component is optional in the pattern; a bare `T` is not a duration.
    if ISO_DURATION.is_match(value) && !value.ends_with('T') {
        return value.to_string();
    }

    let Some(caps) = CLOCK_DURATION.captures(value) else {
        return ZERO_DURATION.to_string();
    };

    let parse = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u64>().ok());

    match (parse(1), parse(2), parse(3)) {
        (Some(minutes), Some(seconds), None) => format!("PT{}M{}S", minutes, seconds),
        (Some(hours), Some(minutes), Some(seconds)) if hours > 0 => {
            format!("PT{}H{}M{}S", hours, minutes, seconds)
        }
        (Some(_), Some(minutes), Some(seconds)) => format!("PT{}M{}S", minutes, seconds),
        _ => ZERO_DURATION.to_string(),
    }
}
