//! Media query validation for nested `@media` groups

/// Decides if a raw `@media ...` key is acceptable.
///
/// Keys that are rejected are dropped from the output with a diagnostic.
pub trait MediaQueryValidator {
    /// Is the full key, including the `@media` prefix, a valid media query
    fn is_valid(&self, query: &str) -> bool;
}

impl<F: Fn(&str) -> bool> MediaQueryValidator for F {
    #[inline]
    fn is_valid(&self, query: &str) -> bool {
        self(query)
    }
}

/// Known media types, including the ones deprecated in media queries level 4
const MEDIA_TYPES: &[&str] = &[
    "all",
    "screen",
    "print",
    "speech",
    "aural",
    "braille",
    "embossed",
    "handheld",
    "projection",
    "tty",
    "tv",
];

/// A grammar check for the common media query syntax.
///
/// Accepts a comma separated list of queries, each one of
/// * `[only|not] <type> [and (<feature>[: <value>])]*`
/// * `(<feature>[: <value>]) [and (<feature>[: <value>])]*`
#[derive(Clone, Copy, Debug, Default)]
pub struct BasicMediaValidator;

impl MediaQueryValidator for BasicMediaValidator {
    fn is_valid(&self, query: &str) -> bool {
        let Some(list) = query.strip_prefix("@media") else {
            return false;
        };
        if !(list.starts_with(char::is_whitespace) || list.starts_with('(')) {
            return false;
        }
        let list = list.trim();
        !list.is_empty() && list.split(',').all(is_valid_query)
    }
}

/// Check a single query from a query list
fn is_valid_query(query: &str) -> bool {
    let mut rest = query.trim();
    if rest.is_empty() {
        return false;
    }

    if !rest.starts_with('(') {
        let (mut word, mut tail) = split_word(rest);
        if word.eq_ignore_ascii_case("only") || word.eq_ignore_ascii_case("not") {
            (word, tail) = split_word(tail.trim_start());
        }
        if !MEDIA_TYPES.iter().any(|kind| word.eq_ignore_ascii_case(kind)) {
            return false;
        }

        rest = tail.trim_start();
        if rest.is_empty() {
            return true;
        }
        let Some(after_and) = strip_and(rest) else {
            return false;
        };
        rest = after_and;
    }

    loop {
        let Some(after) = strip_expression(rest) else {
            return false;
        };
        rest = after.trim_start();
        if rest.is_empty() {
            return true;
        }
        let Some(after_and) = strip_and(rest) else {
            return false;
        };
        rest = after_and;
    }
}

/// Split off a leading identifier
fn split_word(input: &str) -> (&str, &str) {
    let end = input
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
        .unwrap_or(input.len());
    input.split_at(end)
}

/// Strip a leading `and` keyword
fn strip_and(input: &str) -> Option<&str> {
    let (word, tail) = split_word(input);
    word.eq_ignore_ascii_case("and")
        .then(|| tail.trim_start())
        .filter(|tail| !tail.is_empty())
}

/// Strip a leading `(feature)` or `(feature: value)` expression
fn strip_expression(input: &str) -> Option<&str> {
    let inner = input.strip_prefix('(')?;
    let close = inner.find(')')?;
    let (expression, tail) = inner.split_at(close);
    let tail = tail.strip_prefix(')')?;

    let (feature, value) = match expression.split_once(':') {
        Some((feature, value)) => (feature.trim(), Some(value.trim())),
        None => (expression.trim(), None),
    };

    let feature_ok = !feature.is_empty()
        && feature
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-');
    let value_ok = value.is_none_or(|value| {
        !value.is_empty() && !value.contains(['(', '{', '}', ';', ':'])
    });

    (feature_ok && value_ok).then_some(tail)
}
