// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use autocorrect_app::{Dictionary, EXPORT_FILE_NAME, PAGE_SIZE, parse_import_bytes};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_VERSION: i64 = 1;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub storage: Storage,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub dictionary: DictionarySection,
    #[serde(default)]
    pub export: Export,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            storage: Storage::default(),
            ui: Ui::default(),
            dictionary: DictionarySection::default(),
            export: Export::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Storage {
    pub db_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ui {
    pub page_size: Option<i64>,
}

impl Default for Ui {
    fn default() -> Self {
        Self {
            page_size: Some(PAGE_SIZE as i64),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DictionarySection {
    pub builtin_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Export {
    pub file_name: Option<String>,
}

impl Default for Export {
    fn default() -> Self {
        Self {
            file_name: Some(EXPORT_FILE_NAME.to_owned()),
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("AUTOCORRECT_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!(
                "cannot resolve config directory; set AUTOCORRECT_CONFIG_PATH to the config file"
            )
        })?;

        let app_dir = config_root.join(autocorrect_db::APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} has no version; add `version = 1` at the top",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(db_path) = &self.storage.db_path {
            autocorrect_db::validate_db_path(db_path)?;
        }

        if let Some(page_size) = self.ui.page_size
            && page_size <= 0
        {
            bail!(
                "ui.page_size in {} must be positive, got {}",
                path.display(),
                page_size
            );
        }

        if let Some(file_name) = &self.export.file_name
            && file_name.trim().is_empty()
        {
            bail!("export.file_name in {} must not be empty", path.display());
        }

        if let Some(builtin) = &self.dictionary.builtin_path
            && builtin.trim().is_empty()
        {
            bail!(
                "dictionary.builtin_path in {} must not be empty; remove the key to ship no built-in entries",
                path.display()
            );
        }

        Ok(())
    }

    pub fn db_path(&self) -> Result<PathBuf> {
        match &self.storage.db_path {
            Some(path) => Ok(PathBuf::from(path)),
            None => autocorrect_db::default_db_path(),
        }
    }

    pub fn page_size(&self) -> usize {
        self.ui
            .page_size
            .and_then(|size| usize::try_from(size).ok())
            .filter(|size| *size > 0)
            .unwrap_or(PAGE_SIZE)
    }

    pub fn export_file_name(&self) -> &str {
        self.export.file_name.as_deref().unwrap_or(EXPORT_FILE_NAME)
    }

    pub fn builtin_path(&self) -> Option<PathBuf> {
        self.dictionary.builtin_path.as_ref().map(PathBuf::from)
    }

    /// Reads the built-in dictionary file, if one is configured. It uses the
    /// same line format as exports.
    pub fn load_builtin(&self) -> Result<Dictionary> {
        let Some(path) = self.builtin_path() else {
            return Ok(Dictionary::new());
        };
        let raw = fs::read(&path)
            .with_context(|| format!("read built-in dictionary {}", path.display()))?;
        let report = parse_import_bytes(&raw);
        if report.skipped > 0 {
            tracing::warn!(
                path = %path.display(),
                skipped = report.skipped,
                "built-in dictionary has malformed lines"
            );
        }
        Ok(report.entries)
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# autocorrect config\n# Place this file at: {}\n\nversion = 1\n\n[storage]\n# Optional. Default is platform data dir (for example ~/.local/share/autocorrect/autocorrect.db)\n# db_path = \"/absolute/path/to/autocorrect.db\"\n\n[ui]\npage_size = {}\n\n[dictionary]\n# Optional built-in entries, one `\"typo\",\"correction\"` record per line\n# builtin_path = \"/absolute/path/to/builtin.csv\"\n\n[export]\nfile_name = \"{}\"\n",
            path.display(),
            PAGE_SIZE,
            EXPORT_FILE_NAME,
        )
    }
}
