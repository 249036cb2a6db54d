// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use autocorrect_app::{EXPORT_MIME_TYPE, PageView, ViewCommand, ViewState};
use autocorrect_db::{DictionaryManager, StoragePort};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

pub const DEMO_ENTRIES: [(&str, &str); 8] = [
    ("teh", "the"),
    ("adn", "and"),
    ("recieve", "receive"),
    ("seperate", "separate"),
    ("definately", "definitely"),
    ("wich", "which"),
    ("becuase", "because"),
    ("tommorow", "tomorrow"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportTarget {
    Stdout,
    File(PathBuf),
    DefaultFile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List { search: String, page: usize },
    Add { typo: String, correction: String },
    Remove { typo: String },
    Export { target: ExportTarget },
    Import { path: Option<PathBuf> },
}

pub struct Runtime<S> {
    manager: DictionaryManager<S>,
    page_size: usize,
    export_file_name: String,
}

impl<S: StoragePort> Runtime<S> {
    pub fn new(manager: DictionaryManager<S>, page_size: usize, export_file_name: &str) -> Self {
        Self {
            manager,
            page_size,
            export_file_name: export_file_name.to_owned(),
        }
    }

    pub fn execute(&mut self, command: &Command, out: &mut impl Write) -> Result<()> {
        match command {
            Command::List { search, page } => {
                let mut state = ViewState::default();
                state.dispatch(ViewCommand::Search(search.clone()));
                state.dispatch(ViewCommand::GoToPage(*page));
                self.render(&mut state, out)
            }
            Command::Add { typo, correction } => {
                let entry = self.manager.add_entry(typo, correction)?;
                writeln!(
                    out,
                    "added {} -> {}",
                    entry.typo.escape_debug(),
                    entry.correction.escape_debug()
                )?;
                self.reload(out)
            }
            Command::Remove { typo } => {
                if self.manager.remove_entry(typo)? {
                    writeln!(out, "removed {}", typo.escape_debug())?;
                }
                self.reload(out)
            }
            Command::Export { target } => self.export(target, out),
            Command::Import { path } => {
                let Some(path) = path else {
                    tracing::info!("no import file given; nothing to do");
                    return Ok(());
                };
                let bytes =
                    fs::read(path).with_context(|| format!("read import file {}", path.display()))?;
                let report = self.manager.import_bytes(&bytes)?;
                writeln!(
                    out,
                    "imported {} entries from {}",
                    report.entries.len(),
                    path.display()
                )?;
                self.reload(out)
            }
        }
    }

    fn export(&self, target: &ExportTarget, out: &mut impl Write) -> Result<()> {
        let csv = self.manager.export_user()?;
        let count = csv.lines().count();
        let path = match target {
            ExportTarget::Stdout => {
                if !csv.is_empty() {
                    writeln!(out, "{csv}")?;
                }
                return Ok(());
            }
            ExportTarget::File(path) => path.clone(),
            ExportTarget::DefaultFile => PathBuf::from(&self.export_file_name),
        };
        fs::write(&path, csv).with_context(|| format!("write export file {}", path.display()))?;
        writeln!(
            out,
            "exported {count} entries to {} ({EXPORT_MIME_TYPE})",
            path.display()
        )?;
        Ok(())
    }

    fn render(&self, state: &mut ViewState, out: &mut impl Write) -> Result<()> {
        let snapshot = self.manager.snapshot()?;
        let requested = state.page;
        let view = state.render(&snapshot.merged, &snapshot.user, self.page_size);
        if view.page != requested {
            tracing::debug!(requested, shown = view.page, "page out of range; showing first page");
        }
        write_page(&view, out)
    }

    fn reload(&self, out: &mut impl Write) -> Result<()> {
        let snapshot = self.manager.snapshot()?;
        writeln!(
            out,
            "{} entries ({} user, {} built-in)",
            snapshot.merged.len(),
            snapshot.user.len(),
            snapshot.builtin.len()
        )?;
        Ok(())
    }
}

fn write_page(view: &PageView, out: &mut impl Write) -> Result<()> {
    if view.is_empty() {
        writeln!(out, "0 results")?;
        return Ok(());
    }

    let width = view
        .rows
        .iter()
        .map(|row| row.entry.typo.escape_debug().count())
        .max()
        .unwrap_or(0);
    for row in &view.rows {
        let marker = if row.removable() { "" } else { "  (built-in)" };
        writeln!(
            out,
            "{:<width$}  {}{marker}",
            row.entry.typo.escape_debug().to_string(),
            row.entry.correction.escape_debug()
        )?;
    }

    let matches = match view.total_matches {
        1 => "1 match".to_owned(),
        count => format!("{count} matches"),
    };
    if view.total_pages == 1 {
        writeln!(out, "{matches}")?;
        return Ok(());
    }

    write!(out, "page {} of {} ({matches})", view.page, view.total_pages)?;
    if view.has_prev() {
        write!(out, "; previous: --page {}", view.page - 1)?;
    }
    if view.has_next() {
        write!(out, "; next: --page {}", view.page + 1)?;
    }
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Command, ExportTarget, Runtime};
    use anyhow::Result;
    use autocorrect_app::{Dictionary, ValidationError};
    use autocorrect_db::{DictionaryManager, MemoryStore};
    use autocorrect_testkit::EntryFaker;

    fn runtime(builtin: Dictionary) -> Runtime<MemoryStore> {
        Runtime::new(
            DictionaryManager::with_builtin(MemoryStore::new(), builtin),
            100,
            "autocorrect-dictionary.csv",
        )
    }

    fn run(runtime: &mut Runtime<MemoryStore>, command: Command) -> Result<String> {
        let mut out = Vec::new();
        runtime.execute(&command, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    fn list(search: &str, page: usize) -> Command {
        Command::List {
            search: search.to_owned(),
            page,
        }
    }

    #[test]
    fn list_empty_store_prints_zero_results() -> Result<()> {
        let mut runtime = runtime(Dictionary::new());
        assert_eq!(run(&mut runtime, list("", 1))?, "0 results\n");
        Ok(())
    }

    #[test]
    fn list_marks_builtin_rows() -> Result<()> {
        let builtin: Dictionary = [("teh".to_owned(), "the".to_owned())].into();
        let mut runtime = runtime(builtin);
        run(
            &mut runtime,
            Command::Add {
                typo: "adn".to_owned(),
                correction: "and".to_owned(),
            },
        )?;

        let output = run(&mut runtime, list("", 1))?;
        assert_eq!(output, "adn  and\nteh  the  (built-in)\n2 matches\n");
        Ok(())
    }

    #[test]
    fn list_pages_and_recovers_stale_page() -> Result<()> {
        let mut runtime = runtime(EntryFaker::new(5).dictionary(250));

        let third = run(&mut runtime, list("", 3))?;
        assert!(third.ends_with("page 3 of 3 (250 matches); previous: --page 2\n"));
        assert_eq!(third.lines().count(), 51);

        let middle = run(&mut runtime, list("", 2))?;
        assert!(middle.ends_with("page 2 of 3 (250 matches); previous: --page 1; next: --page 3\n"));

        let stale = run(&mut runtime, list("", 4))?;
        assert!(stale.ends_with("page 1 of 3 (250 matches); next: --page 2\n"));
        Ok(())
    }

    #[test]
    fn single_match_footer_is_singular() -> Result<()> {
        let builtin: Dictionary = [
            ("teh".to_owned(), "the".to_owned()),
            ("adn".to_owned(), "and".to_owned()),
        ]
        .into();
        let mut runtime = runtime(builtin);
        assert_eq!(
            run(&mut runtime, list("teh", 1))?,
            "teh  the  (built-in)\n1 match\n"
        );
        Ok(())
    }

    #[test]
    fn add_with_blank_typo_fails_validation() {
        let mut runtime = runtime(Dictionary::new());
        let error = run(
            &mut runtime,
            Command::Add {
                typo: "  ".to_owned(),
                correction: "x".to_owned(),
            },
        )
        .expect_err("blank typo should fail");
        assert_eq!(
            error.downcast_ref::<ValidationError>(),
            Some(&ValidationError::EmptyTypo)
        );
    }

    #[test]
    fn remove_missing_entry_is_silent() -> Result<()> {
        let mut runtime = runtime(Dictionary::new());
        let output = run(
            &mut runtime,
            Command::Remove {
                typo: "nope".to_owned(),
            },
        )?;
        assert_eq!(output, "0 entries (0 user, 0 built-in)\n");
        Ok(())
    }

    #[test]
    fn import_without_path_is_noop() -> Result<()> {
        let mut runtime = runtime(Dictionary::new());
        assert_eq!(run(&mut runtime, Command::Import { path: None })?, "");
        Ok(())
    }

    #[test]
    fn import_missing_file_reports_path() {
        let mut runtime = runtime(Dictionary::new());
        let error = run(
            &mut runtime,
            Command::Import {
                path: Some("/definitely/not/here.csv".into()),
            },
        )
        .expect_err("unreadable file should fail");
        assert!(error.to_string().contains("read import file"));
    }

    #[test]
    fn import_skips_undecodable_line_and_keeps_the_rest() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("mixed.csv");
        let mut bytes = b"\"teh\",\"the\"\n\"bad".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe]);
        bytes.extend_from_slice(b"\",\"x\"\n\"adn\",\"and\"\n");
        std::fs::write(&path, bytes)?;

        let mut runtime = runtime(Dictionary::new());
        let output = run(&mut runtime, Command::Import { path: Some(path) })?;
        assert!(output.starts_with("imported 2 entries"));

        let user = runtime.manager.load_user()?;
        assert_eq!(user.len(), 2);
        assert_eq!(user.get("teh").map(String::as_str), Some("the"));
        assert_eq!(user.get("adn").map(String::as_str), Some("and"));
        Ok(())
    }

    #[test]
    fn export_then_import_through_files() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("out.csv");

        let mut source = runtime(Dictionary::new());
        source.manager.import_merge(&autocorrect_testkit::awkward_dictionary())?;
        let exported = run(
            &mut source,
            Command::Export {
                target: ExportTarget::File(path.clone()),
            },
        )?;
        assert!(exported.contains("exported 6 entries"));
        assert!(exported.contains("text/csv"));

        let mut target = runtime(Dictionary::new());
        let imported = run(&mut target, Command::Import { path: Some(path) })?;
        assert!(imported.starts_with("imported 6 entries"));
        assert_eq!(target.manager.load_user()?, source.manager.load_user()?);
        Ok(())
    }

    #[test]
    fn export_to_stdout_writes_records() -> Result<()> {
        let mut runtime = runtime(Dictionary::new());
        runtime.manager.add_entry("teh", "the")?;
        let output = run(
            &mut runtime,
            Command::Export {
                target: ExportTarget::Stdout,
            },
        )?;
        assert_eq!(output, "\"teh\",\"the\"\n");
        Ok(())
    }
}
