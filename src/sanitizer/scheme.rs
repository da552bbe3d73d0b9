use std::collections::HashSet;

use url::{ParseError, Url};

/// Decides whether a decoded link value may be emitted.
///
/// Absolute URLs must use one of `schemes`. Relative references carry no
/// scheme and are always allowed. Values with control characters are
/// rejected outright, since browsers disagree on how to read them.
pub fn is_allowed_url(value: &str, schemes: &HashSet<String>) -> bool {
    if value
        .chars()
        .any(|c| c.is_control() && !matches!(c, '\t' | '\n' | '\r'))
    {
        return false;
    }

    match Url::parse(value) {
        Ok(url) => schemes.contains(url.scheme()),
        Err(ParseError::RelativeUrlWithoutBase) => true,
        Err(_) => false,
    }
}
