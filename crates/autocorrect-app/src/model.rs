// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Typo to correction mapping. Keys are case-sensitive and iterate in
/// ascending byte order, which is the order every listing uses.
pub type Dictionary = BTreeMap<String, String>;

pub const PAGE_SIZE: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Entry {
    pub typo: String,
    pub correction: String,
}

impl Entry {
    pub fn new(typo: impl Into<String>, correction: impl Into<String>) -> Self {
        Self {
            typo: typo.into(),
            correction: correction.into(),
        }
    }
}

impl From<(&String, &String)> for Entry {
    fn from((typo, correction): (&String, &String)) -> Self {
        Self::new(typo.clone(), correction.clone())
    }
}

/// Which dictionary a merged entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntrySource {
    Builtin,
    User,
}

impl EntrySource {
    pub const fn is_removable(self) -> bool {
        matches!(self, Self::User)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub entry: Entry,
    pub source: EntrySource,
}

impl Row {
    pub fn removable(&self) -> bool {
        self.source.is_removable()
    }
}

/// One rendered page of the merged view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub rows: Vec<Row>,
    pub page: usize,
    pub total_pages: usize,
    pub total_matches: usize,
}

impl PageView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}
