// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod runtime;

use anyhow::{Context, Result, anyhow};
use autocorrect_app::Dictionary;
use autocorrect_db::{DictionaryManager, MemoryStore, StoragePort, Store};
use config::Config;
use runtime::{Command, DEMO_ENTRIES, ExportTarget, Runtime};
use std::env;
use std::io;
use std::path::PathBuf;

const DEMO_STORE_NOTE: &str = "demo mode keeps entries in memory; nothing is written to disk";

fn main() {
    if let Err(error) = logging::init() {
        eprintln!("{error:#}");
    }
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `autocorrect --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;

    if options.print_db_path {
        if options.demo {
            println!("{DEMO_STORE_NOTE}");
        } else {
            println!("{}", config.db_path()?.display());
        }
        return Ok(());
    }

    let builtin = config.load_builtin()?;
    tracing::debug!(entries = builtin.len(), "loaded built-in dictionary");

    if options.demo {
        let demo: Dictionary = DEMO_ENTRIES
            .iter()
            .map(|(typo, correction)| ((*typo).to_owned(), (*correction).to_owned()))
            .collect();
        let mut seeded = DictionaryManager::new(MemoryStore::new());
        seeded.import_merge(&demo)?;
        return dispatch(seeded.into_store(), builtin, &config, &options);
    }

    let db_path = config.db_path()?;
    let store = Store::open(&db_path).with_context(|| {
        format!(
            "open database {} -- if this path is wrong, set [storage].db_path or AUTOCORRECT_DB_PATH",
            db_path.display()
        )
    })?;
    store.bootstrap()?;
    dispatch(store, builtin, &config, &options)
}

fn dispatch<S: StoragePort>(
    store: S,
    builtin: Dictionary,
    config: &Config,
    options: &CliOptions,
) -> Result<()> {
    let manager = DictionaryManager::with_builtin(store, builtin);
    // Reading once surfaces a broken store before any command runs.
    manager.load_user()?;
    if options.check_only {
        return Ok(());
    }

    let Some(command) = &options.command else {
        print_help();
        return Ok(());
    };

    let mut runtime = Runtime::new(manager, config.page_size(), config.export_file_name());
    let stdout = io::stdout();
    let mut out = stdout.lock();
    runtime.execute(command, &mut out)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    print_db_path: bool,
    demo: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
    command: Option<Command>,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        print_config_path: false,
        print_db_path: false,
        demo: false,
        print_example: false,
        check_only: false,
        show_help: false,
        command: None,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-path" => {
                options.print_db_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--demo" => {
                options.demo = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            flag if flag.starts_with('-') => {
                return Err(anyhow!(
                    "unknown argument {flag:?}; run with --help to see supported options"
                ));
            }
            name => {
                let rest: Vec<String> = iter
                    .by_ref()
                    .map(|arg| arg.as_ref().to_owned())
                    .collect();
                options.command = Some(parse_command(name, rest)?);
                break;
            }
        }
    }

    Ok(options)
}

fn parse_command(name: &str, args: Vec<String>) -> Result<Command> {
    let mut iter = args.into_iter();
    let command = match name {
        "list" => {
            let mut search = String::new();
            let mut page = 1;
            while let Some(arg) = iter.next() {
                match arg.as_str() {
                    "--search" | "-s" => {
                        search = iter
                            .next()
                            .ok_or_else(|| anyhow!("--search requires a query"))?;
                    }
                    "--page" | "-p" => {
                        let value = iter
                            .next()
                            .ok_or_else(|| anyhow!("--page requires a number"))?;
                        page = value
                            .parse()
                            .with_context(|| format!("invalid page number {value:?}"))?;
                    }
                    unknown => {
                        return Err(anyhow!("unknown list option {unknown:?}"));
                    }
                }
            }
            return Ok(Command::List { search, page });
        }
        "add" => {
            let typo = iter
                .next()
                .ok_or_else(|| anyhow!("add requires <typo> <correction>"))?;
            let correction = iter
                .next()
                .ok_or_else(|| anyhow!("add requires <typo> <correction>"))?;
            Command::Add { typo, correction }
        }
        "remove" => {
            let typo = iter.next().ok_or_else(|| anyhow!("remove requires <typo>"))?;
            Command::Remove { typo }
        }
        "export" => {
            let target = match iter.next() {
                None => ExportTarget::DefaultFile,
                Some(path) if path == "-" => ExportTarget::Stdout,
                Some(path) => ExportTarget::File(PathBuf::from(path)),
            };
            Command::Export { target }
        }
        "import" => Command::Import {
            path: iter.next().map(PathBuf::from),
        },
        unknown => {
            return Err(anyhow!(
                "unknown command {unknown:?}; expected one of: list, add, remove, export, import"
            ));
        }
    };

    if let Some(extra) = iter.next() {
        return Err(anyhow!("unexpected argument {extra:?} for {name}"));
    }
    Ok(command)
}

fn print_help() {
    println!("autocorrect [options] <command>");
    println!();
    println!("commands:");
    println!("  list [--search <q>] [--page <n>]  Show one page of the merged dictionary");
    println!("  add <typo> <correction>           Add or override a user entry");
    println!("  remove <typo>                     Remove a user entry (built-ins stay)");
    println!("  export [<path>|-]                 Write user entries as CSV (default file from config)");
    println!("  import [<path>]                   Merge entries from a CSV export");
    println!();
    println!("options:");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-path             Print resolved database path");
    println!("  --print-example-config   Print a config template");
    println!("  --demo                   Run against an in-memory store with sample entries");
    println!("  --check                  Validate config, built-in dictionary, and database");
    println!("  --help                   Show this help");
    println!();
    println!("set {}=debug for diagnostics on stderr", logging::LOG_ENV);
}

#[cfg(test)]
mod tests {
    use super::{CliOptions, parse_cli_args};
    use crate::runtime::{Command, ExportTarget};
    use anyhow::Result;
    use std::path::PathBuf;

    fn default_options_path() -> PathBuf {
        PathBuf::from("/tmp/autocorrect-config.toml")
    }

    #[test]
    fn parse_cli_args_defaults_to_provided_config_path() -> Result<()> {
        let options = parse_cli_args(Vec::<String>::new(), default_options_path())?;
        assert_eq!(
            options,
            CliOptions {
                config_path: default_options_path(),
                print_config_path: false,
                print_db_path: false,
                demo: false,
                print_example: false,
                check_only: false,
                show_help: false,
                command: None,
            }
        );
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_config_path_override() -> Result<()> {
        let options = parse_cli_args(
            vec!["--config", "/custom/config.toml"],
            default_options_path(),
        )?;
        assert_eq!(options.config_path, PathBuf::from("/custom/config.toml"));
        Ok(())
    }

    #[test]
    fn parse_cli_args_errors_for_missing_config_value() {
        let error = parse_cli_args(vec!["--config"], default_options_path())
            .expect_err("missing config value should fail");
        assert!(error.to_string().contains("--config requires a file path"));
    }

    #[test]
    fn parse_cli_args_errors_for_unknown_argument() {
        let error = parse_cli_args(vec!["--wat"], default_options_path())
            .expect_err("unknown arg should fail");
        let message = error.to_string();
        assert!(message.contains("unknown argument"));
        assert!(message.contains("--help"));
    }

    #[test]
    fn parse_cli_args_sets_demo_and_check_flags() -> Result<()> {
        let options = parse_cli_args(vec!["--demo", "--check"], default_options_path())?;
        assert!(options.demo);
        assert!(options.check_only);
        assert!(!options.show_help);
        Ok(())
    }

    #[test]
    fn list_parses_search_and_page() -> Result<()> {
        let options = parse_cli_args(
            vec!["--demo", "list", "--search", "THE", "--page", "3"],
            default_options_path(),
        )?;
        assert!(options.demo);
        assert_eq!(
            options.command,
            Some(Command::List {
                search: "THE".to_owned(),
                page: 3,
            })
        );
        Ok(())
    }

    #[test]
    fn list_rejects_non_numeric_page() {
        let error = parse_cli_args(vec!["list", "--page", "two"], default_options_path())
            .expect_err("non-numeric page should fail");
        assert!(error.to_string().contains("invalid page number"));
    }

    #[test]
    fn add_requires_both_fields() {
        let error = parse_cli_args(vec!["add", "teh"], default_options_path())
            .expect_err("missing correction should fail");
        assert!(error.to_string().contains("add requires"));
    }

    #[test]
    fn add_keeps_values_that_look_like_flags() -> Result<()> {
        let options = parse_cli_args(vec!["add", "-teh", "--the"], default_options_path())?;
        assert_eq!(
            options.command,
            Some(Command::Add {
                typo: "-teh".to_owned(),
                correction: "--the".to_owned(),
            })
        );
        Ok(())
    }

    #[test]
    fn export_targets() -> Result<()> {
        let default = parse_cli_args(vec!["export"], default_options_path())?;
        assert_eq!(
            default.command,
            Some(Command::Export {
                target: ExportTarget::DefaultFile
            })
        );

        let stdout = parse_cli_args(vec!["export", "-"], default_options_path())?;
        assert_eq!(
            stdout.command,
            Some(Command::Export {
                target: ExportTarget::Stdout
            })
        );

        let file = parse_cli_args(vec!["export", "out.csv"], default_options_path())?;
        assert_eq!(
            file.command,
            Some(Command::Export {
                target: ExportTarget::File(PathBuf::from("out.csv"))
            })
        );
        Ok(())
    }

    #[test]
    fn import_path_is_optional() -> Result<()> {
        let options = parse_cli_args(vec!["import"], default_options_path())?;
        assert_eq!(options.command, Some(Command::Import { path: None }));
        Ok(())
    }

    #[test]
    fn extra_arguments_are_rejected() {
        let error = parse_cli_args(vec!["remove", "teh", "adn"], default_options_path())
            .expect_err("extra argument should fail");
        assert!(error.to_string().contains("unexpected argument"));
    }

    #[test]
    fn unknown_command_lists_choices() {
        let error = parse_cli_args(vec!["frobnicate"], default_options_path())
            .expect_err("unknown command should fail");
        assert!(error.to_string().contains("list, add, remove, export, import"));
    }
}
