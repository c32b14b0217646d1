#![forbid(unsafe_code)]

//! `SMARTBUDGET_*` environment overrides.
//!
//! Config structs read their overrides through these helpers. A variable that
//! is set but unparsable is ignored with a warning, never an error.

use std::time::Duration;

/// Read a millisecond duration. Zero is rejected like any other bad value
/// since every timing knob in the client must be positive.
pub fn duration_ms(var: &str) -> Option<Duration> {
    let raw = std::env::var(var).ok()?;
    match raw.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => Some(Duration::from_millis(ms)),
        _ => {
            tracing::warn!(var, value = %raw, "ignoring invalid millisecond override");
            None
        }
    }
}

/// Read a boolean flag (`1`/`true`/`yes` or `0`/`false`/`no`).
pub fn flag(var: &str) -> Option<bool> {
    let raw = std::env::var(var).ok()?;
    parse_flag(&raw).or_else(|| {
        tracing::warn!(var, value = %raw, "ignoring invalid flag override");
        None
    })
}

/// Read a non-empty string.
pub fn string(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn parse_flag(raw: &str) -> Option<bool> {
    let v = raw.trim();
    if v == "1" || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("yes") {
        Some(true)
    } else if v == "0" || v.eq_ignore_ascii_case("false") || v.eq_ignore_ascii_case("no") {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_accept_common_spellings() {
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag(" TRUE "), Some(true));
        assert_eq!(parse_flag("no"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn unset_variables_are_none() {
        assert_eq!(duration_ms("SMARTBUDGET_TEST_SURELY_UNSET_MS"), None);
        assert_eq!(flag("SMARTBUDGET_TEST_SURELY_UNSET_FLAG"), None);
        assert_eq!(string("SMARTBUDGET_TEST_SURELY_UNSET_STR"), None);
    }
}
