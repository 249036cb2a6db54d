// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use autocorrect_app::{
    Dictionary, Entry, EntryForm, ImportReport, merge, parse_import_bytes, parse_import_report,
    serialize_export,
};

use crate::{StoragePort, USER_DICT_KEY};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionarySnapshot {
    pub builtin: Dictionary,
    pub user: Dictionary,
    pub merged: Dictionary,
}

/// Reads and mutates the user dictionary held in a [`StoragePort`].
///
/// Nothing is cached between calls: every operation reloads the user
/// dictionary, so the store stays the single source of truth.
pub struct DictionaryManager<S> {
    store: S,
    builtin: Dictionary,
}

impl<S: StoragePort> DictionaryManager<S> {
    pub fn new(store: S) -> Self {
        Self::with_builtin(store, Dictionary::new())
    }

    pub fn with_builtin(store: S, builtin: Dictionary) -> Self {
        Self { store, builtin }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn load_user(&self) -> Result<Dictionary> {
        let Some(value) = self
            .store
            .get(USER_DICT_KEY)
            .context("load user dictionary")?
        else {
            return Ok(Dictionary::new());
        };
        serde_json::from_value(value).with_context(|| {
            format!("decode user dictionary at {USER_DICT_KEY:?}; expected an object of strings")
        })
    }

    fn save_user(&mut self, dict: &Dictionary) -> Result<()> {
        let value = serde_json::to_value(dict).context("encode user dictionary")?;
        self.store
            .set(USER_DICT_KEY, value)
            .context("persist user dictionary")
    }

    pub fn snapshot(&self) -> Result<DictionarySnapshot> {
        let user = self.load_user()?;
        let merged = merge(&self.builtin, &user);
        Ok(DictionarySnapshot {
            builtin: self.builtin.clone(),
            user,
            merged,
        })
    }

    /// Validates before touching the store; a [`autocorrect_app::ValidationError`]
    /// comes back inside the `anyhow` error and can be downcast.
    pub fn add_entry(&mut self, typo: &str, correction: &str) -> Result<Entry> {
        let entry = EntryForm::new(typo, correction).validate()?;

        let mut user = self.load_user()?;
        let previous = user.insert(entry.typo.clone(), entry.correction.clone());
        self.save_user(&user)?;

        match previous {
            Some(previous) => tracing::info!(
                typo = %entry.typo,
                from = %previous,
                to = %entry.correction,
                "replaced user entry"
            ),
            None => tracing::info!(typo = %entry.typo, correction = %entry.correction, "added user entry"),
        }
        Ok(entry)
    }

    /// Returns whether anything was removed. Built-in entries cannot be
    /// removed; a typo missing from the user dictionary leaves the store
    /// untouched.
    pub fn remove_entry(&mut self, typo: &str) -> Result<bool> {
        let mut user = self.load_user()?;
        if user.remove(typo).is_none() {
            tracing::debug!(typo, "no user entry to remove");
            return Ok(false);
        }
        self.save_user(&user)?;
        tracing::info!(typo, "removed user entry");
        Ok(true)
    }

    /// Overlays `imported` on the stored user dictionary; imported values win.
    pub fn import_merge(&mut self, imported: &Dictionary) -> Result<usize> {
        let mut user = self.load_user()?;
        user.extend(
            imported
                .iter()
                .map(|(typo, correction)| (typo.clone(), correction.clone())),
        );
        self.save_user(&user)?;
        tracing::info!(
            imported = imported.len(),
            total = user.len(),
            "merged imported entries"
        );
        Ok(imported.len())
    }

    pub fn import_text(&mut self, text: &str) -> Result<ImportReport> {
        self.import_report(parse_import_report(text))
    }

    /// Imports raw file contents; lines that are not valid UTF-8 are skipped.
    pub fn import_bytes(&mut self, bytes: &[u8]) -> Result<ImportReport> {
        self.import_report(parse_import_bytes(bytes))
    }

    fn import_report(&mut self, report: ImportReport) -> Result<ImportReport> {
        if report.skipped > 0 {
            tracing::warn!(skipped = report.skipped, "dropped malformed import lines");
        }
        self.import_merge(&report.entries)?;
        Ok(report)
    }

    pub fn export_user(&self) -> Result<String> {
        let user = self.load_user()?;
        Ok(serialize_export(&user))
    }
}
