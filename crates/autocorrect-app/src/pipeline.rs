// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{Dictionary, Entry};

/// Union of both dictionaries; the user value wins on a shared key.
pub fn merge(builtin: &Dictionary, user: &Dictionary) -> Dictionary {
    let mut merged = builtin.clone();
    merged.extend(user.iter().map(|(typo, correction)| (typo.clone(), correction.clone())));
    merged
}

/// Case-insensitive substring match against the typo or the correction.
///
/// The query is trimmed first and an empty query keeps every entry. Results
/// come back in the dictionary's key order.
pub fn filter(dict: &Dictionary, query: &str) -> Vec<Entry> {
    let needle = query.trim().to_lowercase();
    dict.iter()
        .filter(|(typo, correction)| {
            needle.is_empty()
                || typo.to_lowercase().contains(&needle)
                || correction.to_lowercase().contains(&needle)
        })
        .map(Entry::from)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub entries: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub total_matches: usize,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Returns the 1-indexed `page` of `entries`.
///
/// There is always at least one page, so an empty input renders as page 1
/// of 1 with no entries. A page past the end (or page 0) falls back to
/// page 1.
pub fn paginate<T: Clone>(entries: &[T], page_size: usize, page: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_pages = entries.len().div_ceil(page_size).max(1);
    let page = if page == 0 || page > total_pages {
        1
    } else {
        page
    };

    let start = (page - 1) * page_size;
    let end = (start + page_size).min(entries.len());
    let window = entries.get(start..end).unwrap_or_default();

    Page {
        entries: window.to_vec(),
        page,
        total_pages,
        total_matches: entries.len(),
    }
}
