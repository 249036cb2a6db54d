// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Diagnostics go to stderr so `export -` can stream records on stdout.
//! Verbosity comes from `AUTOCORRECT_LOG` (an `EnvFilter` directive such as
//! `debug` or `autocorrect_db=debug`) and defaults to warnings only.

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "AUTOCORRECT_LOG";
const DEFAULT_DIRECTIVE: &str = "warn";

pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|error| anyhow!("initialize logging: {error}"))
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}
