use std::collections::HashSet;

use crate::consts::{ENTRY_SEPARATORS, RANGE_MARKER, RANGE_MARKERS};
use crate::range::span;
use crate::{expand, normalize, CanonicalDate};

/// Parses free-form multi-date input into an ordered, de-duplicated list.
///
/// Entries are separated by commas, semicolons (ASCII or fullwidth), the
/// ideographic comma `、` or newlines, and within an entry by whitespace.
/// A token containing a range marker (`~`, `〜`, `～`, en dash, em dash) is an
/// inclusive range between its first two non-empty sides.
///
/// Unreadable tokens are dropped silently, and a range with an unreadable
/// side contributes nothing. Dates keep the order they were first seen.
pub fn parse_input_to_dates(input: &str) -> Vec<CanonicalDate> {
    parse_input_within(input, usize::MAX).unwrap_or_default()
}

/// [`parse_input_to_dates`] that gives up with `None` once the result would
/// hold more than `max` dates. Ranges longer than `max` are refused before
/// they are expanded.
pub(crate) fn parse_input_within(input: &str, max: usize) -> Option<Vec<CanonicalDate>> {
    if input.is_empty() {
        return Some(Vec::new());
    }

    let unified: String = input
        .chars()
        .map(|c| if RANGE_MARKERS.contains(&c) { RANGE_MARKER } else { c })
        .collect();

    let tokens = unified
        .split(ENTRY_SEPARATORS)
        .flat_map(str::split_whitespace);

    let mut seen = HashSet::new();
    let mut dates = Vec::new();
    for token in tokens {
        for date in token_dates(token, max)? {
            if seen.insert(date) {
                if dates.len() == max {
                    tracing::debug!(max, "input holds too many dates");
                    return None;
                }
                dates.push(date);
            }
        }
    }
    Some(dates)
}

fn token_dates(token: &str, max: usize) -> Option<Vec<CanonicalDate>> {
    if !token.contains(RANGE_MARKER) {
        return Some(normalize(token).map_or_else(
            || {
                tracing::trace!(token, "skipping unreadable date");
                Vec::new()
            },
            |date| vec![date],
        ));
    }

    let mut sides = token
        .split(RANGE_MARKER)
        .map(str::trim)
        .filter(|s| !s.is_empty());

    match (sides.next().and_then(normalize), sides.next().and_then(normalize)) {
        (Some(start), Some(end)) if span(start, end) > max => {
            tracing::debug!(token, max, "range spans too many days");
            None
        }
        (Some(start), Some(end)) => Some(expand(start, end)),
        _ => {
            tracing::trace!(token, "skipping range with an unreadable side");
            Some(Vec::new())
        }
    }
}
