// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::Entry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    EmptyTypo,
    EmptyCorrection,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTypo => f.write_str("typo is required -- enter a typo and retry"),
            Self::EmptyCorrection => {
                f.write_str("correction is required -- enter a correction and retry")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// Raw input for a new dictionary entry, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryForm {
    pub typo: String,
    pub correction: String,
}

impl EntryForm {
    pub fn new(typo: impl Into<String>, correction: impl Into<String>) -> Self {
        Self {
            typo: typo.into(),
            correction: correction.into(),
        }
    }

    /// Trims both fields and rejects either one being empty.
    pub fn validate(&self) -> ValidationResult<Entry> {
        let typo = self.typo.trim();
        if typo.is_empty() {
            return Err(ValidationError::EmptyTypo);
        }
        let correction = self.correction.trim();
        if correction.is_empty() {
            return Err(ValidationError::EmptyCorrection);
        }
        Ok(Entry::new(typo, correction))
    }
}
