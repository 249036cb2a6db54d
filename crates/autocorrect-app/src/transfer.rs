// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Line-oriented export format.
//!
//! Each record is `<typo>,<correction>` where both sides are JSON string
//! literals, for example `"teh","the"`. Records are separated by `\n`.
//! Because JSON escapes control characters, a newline inside a value is
//! written as `\n` and never breaks the record structure.

use crate::Dictionary;

pub const EXPORT_FILE_NAME: &str = "autocorrect-dictionary.csv";
pub const EXPORT_MIME_TYPE: &str = "text/csv";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub entries: Dictionary,
    pub skipped: usize,
}

pub fn serialize_export(dict: &Dictionary) -> String {
    dict.iter()
        .map(|(typo, correction)| format!("{},{}", quote(typo), quote(correction)))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn parse_import(text: &str) -> Dictionary {
    parse_import_report(text).entries
}

/// Parses every record it can and counts the non-blank lines it had to drop.
/// Later duplicates overwrite earlier ones.
pub fn parse_import_report(text: &str) -> ImportReport {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut report = ImportReport::default();
    for line in text.split('\n') {
        report.push_line(line);
    }
    report
}

/// Like [`parse_import_report`] for raw file contents. Each line is decoded
/// on its own, so a line that is not valid UTF-8 counts as skipped instead of
/// rejecting the whole file.
pub fn parse_import_bytes(bytes: &[u8]) -> ImportReport {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let mut report = ImportReport::default();
    for line in bytes.split(|byte| *byte == b'\n') {
        match std::str::from_utf8(line) {
            Ok(line) => report.push_line(line),
            Err(_) => report.skipped += 1,
        }
    }
    report
}

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

impl ImportReport {
    fn push_line(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }
        match parse_record(line) {
            Some((typo, correction)) => {
                self.entries.insert(typo, correction);
            }
            None => self.skipped += 1,
        }
    }
}

/// Splits at the first comma that closes a complete left-hand literal, so a
/// typo that itself contains commas still parses.
fn parse_record(line: &str) -> Option<(String, String)> {
    let (index, typo) = line
        .match_indices(',')
        .find_map(|(index, _)| unquote(&line[..index]).map(|typo| (index, typo)))?;
    let correction = unquote(&line[index + 1..])?;
    Some((typo, correction))
}

fn quote(value: &str) -> String {
    // Serializing a str cannot fail.
    serde_json::to_string(value).unwrap_or_default()
}

fn unquote(segment: &str) -> Option<String> {
    serde_json::from_str::<String>(segment).ok()
}
