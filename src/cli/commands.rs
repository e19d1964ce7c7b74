//! Command dispatch

use std::collections::HashSet;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::services::{run_self_test, SelectionReport};
use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands, ConfigCommands, OutputFormat};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{select, CommentId};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let config_dir = resolve_config_dir(cli.config_dir.as_deref())?;

    match &cli.command {
        Some(Commands::Select {
            file,
            depth,
            format,
        }) => {
            let container = build_container(&config_dir)?;
            cmd_select(&container, file.as_deref(), *depth, *format)
        }
        Some(Commands::Tree { file, depth }) => {
            let container = build_container(&config_dir)?;
            cmd_tree(&container, file.as_deref(), *depth)
        }
        Some(Commands::Check { file, ids, depth }) => {
            let container = build_container(&config_dir)?;
            cmd_check(&container, file, ids, *depth)
        }
        Some(Commands::SelfTest) => cmd_self_test(),
        Some(Commands::Config { command }) => {
            let container = build_container(&config_dir)?;
            cmd_config(&container, &config_dir, command)
        }
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => write_help(&mut io::stdout())
            .map_err(|e| CliError::from(InfraError::io("print help", e))),
    }
}

/// Bare invocation shows usage instead of doing nothing.
fn write_help(out: &mut impl Write) -> io::Result<()> {
    Cli::command().write_help(out)?;
    writeln!(out)
}

fn resolve_config_dir(config_dir: Option<&Path>) -> CliResult<PathBuf> {
    match config_dir {
        Some(dir) => Ok(dir.to_path_buf()),
        None => std::env::current_dir()
            .map_err(|e| CliError::from(InfraError::io("get current directory", e))),
    }
}

fn build_container(config_dir: &Path) -> CliResult<ServiceContainer> {
    let settings = Settings::load(Some(config_dir))?;
    debug!("settings: {:?}", settings);
    Ok(ServiceContainer::new(settings))
}

fn thread_path(container: &ServiceContainer, file: Option<&Path>) -> PathBuf {
    file.map(Path::to_path_buf)
        .unwrap_or_else(|| container.settings.dataset.clone())
}

fn format_ids(ids: &[CommentId]) -> String {
    format!("[{}]", ids.iter().join(", "))
}

#[instrument(level = "debug", skip(container))]
fn cmd_select(
    container: &ServiceContainer,
    file: Option<&Path>,
    depth: Option<usize>,
    format: OutputFormat,
) -> CliResult<()> {
    let path = thread_path(container, file);
    let depth_limit = depth.unwrap_or(container.settings.depth_limit);
    let report = container.selection.select_file(&path, depth_limit)?;

    match format {
        OutputFormat::Text => print_report(&report),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report).map_err(|e| {
                ApplicationError::OperationFailed {
                    context: "serialize selection report".to_string(),
                    source: Box::new(e),
                }
            })?;
            output::info(&json);
        }
    }
    Ok(())
}

fn print_report(report: &SelectionReport) {
    output::info(&format_ids(&report.selected));
    output::info(&format!(
        "Total comments selected: {}",
        report.selected_count()
    ));
}

#[instrument(level = "debug", skip(container))]
fn cmd_tree(container: &ServiceContainer, file: Option<&Path>, depth: Option<usize>) -> CliResult<()> {
    let path = thread_path(container, file);
    let depth_limit = depth.unwrap_or(container.settings.depth_limit);
    let thread = container.selection.loader().load(&path)?;
    let selection = select(&thread.root, depth_limit);
    let selected: HashSet<CommentId> = selection.ids.iter().copied().collect();

    output::header(&format!(
        "{} (depth limit {}, score {})",
        path.display(),
        depth_limit,
        selection.score
    ));
    let tree = thread.arena.to_tree(|data| {
        if selected.contains(&data.id) {
            output::selected_label(data)
        } else {
            output::dropped_label(data)
        }
    });
    output::info(&tree);
    Ok(())
}

#[instrument(level = "debug", skip(container))]
fn cmd_check(
    container: &ServiceContainer,
    file: &Path,
    ids: &[CommentId],
    depth: Option<usize>,
) -> CliResult<()> {
    let depth_limit = depth.unwrap_or(container.settings.depth_limit);
    container.selection.check_file(file, ids, depth_limit)?;
    output::success(&format!(
        "{} is a valid selection at depth limit {}",
        format_ids(ids),
        depth_limit
    ));
    Ok(())
}

#[instrument(level = "debug")]
fn cmd_self_test() -> CliResult<()> {
    let outcome = run_self_test();
    if outcome.passed {
        output::success("Test Passed");
        output::detail(&format_ids(&outcome.result));
        Ok(())
    } else {
        output::failure("Test Failed");
        Err(CliError::SelfTestFailed {
            result: outcome.result,
        })
    }
}

fn cmd_config(container: &ServiceContainer, config_dir: &Path, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::header("Effective settings");
            output::info(&container.settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Path => {
            let marker = |p: &Path| if container.fs.exists(p) { "exists" } else { "missing" };
            match global_config_path() {
                Some(global) => output::info(&format!("global: {} ({})", global.display(), marker(global.as_path()))),
                None => output::warning("no home directory, global config unavailable"),
            }
            let local = local_config_path(config_dir);
            output::info(&format!("local:  {} ({})", local.display(), marker(local.as_path())));
            Ok(())
        }
        ConfigCommands::Init { global, force } => {
            let target = if *global {
                global_config_path()
                    .ok_or_else(|| CliError::Usage("cannot determine global config directory".into()))?
            } else {
                local_config_path(config_dir)
            };
            if container.fs.exists(&target) && !force {
                return Err(CliError::Usage(format!(
                    "config already exists: {} (use --force to overwrite)",
                    target.display()
                )));
            }
            container
                .fs
                .ensure_parent(&target)
                .and_then(|_| container.fs.write(&target, &Settings::template()))
                .map_err(|e| InfraError::io(format!("write {}", target.display()), e))?;
            output::success(&format!("created {}", target.display()));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_subcommand_when_writing_help_then_lists_commands() {
        let mut out = Vec::new();

        write_help(&mut out).unwrap();

        let help = String::from_utf8(out).unwrap();
        assert!(help.contains("Usage: threadtrim"));
        assert!(help.contains("select"));
        assert!(help.contains("self-test"));
    }

    #[test]
    fn given_ids_when_formatting_then_bracketed_and_comma_separated() {
        assert_eq!(format_ids(&[1, 2, 5]), "[1, 2, 5]");
        assert_eq!(format_ids(&[]), "[]");
    }
}
