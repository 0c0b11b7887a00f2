//! Pure filter, sort and group helpers shared by the views.
//!
//! Filters compose conjunctively and an unset selection is a no-op. Sorts
//! are stable, so ties keep arrival order. Grouping partitions its input.

use indexmap::IndexMap;
use std::cmp::Ordering;
use std::hash::Hash;

use crate::cli::types::SortDirection;

/// Normalize a categorical selection: blank or `"all"` means no filter.
pub fn choice(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("all") {
        None
    } else {
        Some(value.to_string())
    }
}

/// Case-insensitive substring search over several fields.
///
/// A blank query matches everything; otherwise any single field matching
/// is a hit. Missing fields never match.
pub fn matches_search(query: &str, fields: &[Option<&str>]) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    fields
        .iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Whether `value` passes an optional equality filter.
pub fn matches_choice(selected: Option<&str>, value: Option<&str>) -> bool {
    match selected {
        None => true,
        Some(selected) => value == Some(selected),
    }
}

/// Stable sort on one numeric key.
pub fn sort_by_number<T, F>(items: &mut [T], direction: SortDirection, key: F)
where
    F: Fn(&T) -> f64,
{
    items.sort_by(|a, b| {
        let ord = key(a).partial_cmp(&key(b)).unwrap_or(Ordering::Equal);
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}

/// Partition into groups keyed by `key`, groups in first-appearance order.
pub fn group_by<T, K, F>(items: impl IntoIterator<Item = T>, key: F) -> IndexMap<K, Vec<T>>
where
    K: Hash + Eq,
    F: Fn(&T) -> K,
{
    let mut groups: IndexMap<K, Vec<T>> = IndexMap::new();
    for item in items {
        groups.entry(key(&item)).or_default().push(item);
    }
    groups
}

/// Distinct non-empty values in first-appearance order.
pub fn distinct<'a, T: 'a>(
    items: impl IntoIterator<Item = &'a T>,
    value: impl Fn(&'a T) -> Option<&'a str>,
) -> Vec<String> {
    let mut seen: IndexMap<&str, ()> = IndexMap::new();
    for item in items {
        if let Some(v) = value(item).filter(|v| !v.is_empty()) {
            seen.insert(v, ());
        }
    }
    seen.into_keys().map(String::from).collect()
}

/// Distinct values with how many items carry each, first-appearance order.
pub fn counts<'a, T: 'a>(
    items: impl IntoIterator<Item = &'a T>,
    value: impl Fn(&'a T) -> &'a str,
) -> IndexMap<String, usize> {
    let mut out: IndexMap<String, usize> = IndexMap::new();
    for item in items {
        *out.entry(value(item).to_string()).or_default() += 1;
    }
    out
}
