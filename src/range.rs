use crate::CanonicalDate;

/// Every calendar day from `start` to `end` inclusive, ascending.
///
/// Both endpoints are resolved as UTC calendar days (see
/// [`CanonicalDate::resolve`]), so unchecked values such as `2025-01-32`
/// count as the day they overflow to. A reversed interval yields an empty
/// list; endpoints are never swapped. An endpoint outside the representable
/// calendar also yields an empty list.
///
/// The list is built in full, one entry per day: a span of centuries is
/// hundreds of thousands of entries. Bound the span first when the
/// endpoints come from untrusted input.
pub fn expand(start: CanonicalDate, end: CanonicalDate) -> Vec<CanonicalDate> {
    let (Some(first), Some(last)) = (start.resolve(), end.resolve()) else {
        tracing::debug!(%start, %end, "range endpoint does not resolve to a calendar day");
        return Vec::new();
    };

    if first > last {
        tracing::debug!(%start, %end, "reversed range expands to nothing");
        return Vec::new();
    }

    first
        .iter_days()
        .take_while(|day| *day <= last)
        .map(CanonicalDate::from)
        .collect()
}

/// Number of dates [`expand`] would return, without building them.
pub(crate) fn span(start: CanonicalDate, end: CanonicalDate) -> usize {
    match (start.resolve(), end.resolve()) {
        (Some(first), Some(last)) if first <= last => {
            let days = last.signed_duration_since(first).num_days() + 1;
            usize::try_from(days).unwrap_or(usize::MAX)
        }
        _ => 0,
    }
}
