// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use serde_json::Value;
use std::collections::HashMap;

use crate::StoragePort;

/// In-process store used by `--demo` and tests. It counts writes and can be
/// told to fail, so callers can check both the "nothing written" and the
/// "store rejected the call" paths.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, Value>,
    writes: usize,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: Value) -> Self {
        let mut store = Self::default();
        store.values.insert(key.to_owned(), value);
        store
    }

    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn set_fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }
}

impl StoragePort for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        if self.fail_reads {
            bail!("memory store refused read of {key:?}");
        }
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        if self.fail_writes {
            bail!("memory store refused write of {key:?}");
        }
        self.values.insert(key.to_owned(), value);
        self.writes += 1;
        Ok(())
    }
}
