// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use autocorrect_app::{Dictionary, Entry};
use std::path::PathBuf;

const WORDS: [&str; 32] = [
    "receive", "separate", "definitely", "because", "which", "their", "believe", "friend",
    "weird", "necessary", "occasion", "beginning", "tomorrow", "government", "environment",
    "calendar", "address", "embarrass", "privilege", "restaurant", "library", "february",
    "accommodate", "committee", "conscious", "existence", "grammar", "independent", "judgment",
    "knowledge", "maintenance", "recommend",
];

/// Pairs that exercise the export format: commas, quotes, escapes, and
/// non-ASCII text.
const AWKWARD_PAIRS: [(&str, &str); 6] = [
    ("a,b", "c\"d"),
    ("teh", "the"),
    ("line\nbreak", "line break"),
    ("back\\slash", "backslash"),
    ("naïve", "naive, really"),
    ("\"quoted\"", "quoted"),
];

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }
}

/// Produces plausible misspellings from a fixed word list. The same seed
/// always yields the same sequence.
#[derive(Debug, Clone)]
pub struct EntryFaker {
    rng: DeterministicRng,
    seed: u64,
}

impl EntryFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            seed: normalized,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn entry(&mut self) -> Entry {
        let word = WORDS[self.rng.int_n(WORDS.len())];
        Entry::new(self.misspell(word), word)
    }

    /// `count` entries with distinct typos. Each typo carries a numeric
    /// suffix so the count is exact even when misspellings collide.
    pub fn dictionary(&mut self, count: usize) -> Dictionary {
        (0..count)
            .map(|index| {
                let entry = self.entry();
                (format!("{}{index}", entry.typo), entry.correction)
            })
            .collect()
    }

    fn misspell(&mut self, word: &str) -> String {
        let mut chars: Vec<char> = word.chars().collect();
        if chars.len() < 3 {
            return word.to_owned();
        }
        match self.rng.int_n(3) {
            0 => {
                let index = self.rng.int_n(chars.len() - 1);
                if chars[index] == chars[index + 1] {
                    chars.remove(index);
                } else {
                    chars.swap(index, index + 1);
                }
            }
            1 => {
                let index = self.rng.int_n(chars.len());
                chars.remove(index);
            }
            _ => {
                let index = self.rng.int_n(chars.len());
                let doubled = chars[index];
                chars.insert(index, doubled);
            }
        }
        chars.into_iter().collect()
    }
}

pub fn awkward_dictionary() -> Dictionary {
    AWKWARD_PAIRS
        .iter()
        .map(|(typo, correction)| ((*typo).to_owned(), (*correction).to_owned()))
        .collect()
}

pub fn temp_db_path() -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let db_path = dir.path().join("autocorrect.db");
    Ok((dir, db_path))
}
