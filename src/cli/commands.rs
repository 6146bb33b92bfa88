//! Command dispatch

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::application::services::MoveOutcome;
use crate::cli::args::{Cli, Commands, ConfigCommands, MetricCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::Tree;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let project_dir = match &cli.project_dir {
        Some(dir) if !dir.is_dir() => return Err(InfraError::ProjectDir(dir.clone()).into()),
        Some(dir) => dir.clone(),
        None => std::env::current_dir().map_err(|source| InfraError::Environment {
            what: "current directory",
            source,
        })?,
    };
    let settings = Settings::load(Some(project_dir.as_path()))?;
    let file = resolve_layout_file(cli.file.as_deref(), &settings, &project_dir);
    debug!("layout file: {}", file.display());
    let container = ServiceContainer::new(settings);

    match &cli.command {
        Some(Commands::Tree { ends }) => {
            cmd_tree(&container, &file, *ends || container.settings.show_end_markers)
        }
        Some(Commands::Move {
            source,
            destination,
            dry_run,
        }) => cmd_move(&container, &file, *source, *destination, *dry_run),
        Some(Commands::Metric { command }) => match command {
            MetricCommands::List => cmd_metric_list(&container, &file),
            MetricCommands::Move { from, to, dry_run } => {
                cmd_metric_move(&container, &file, *from, *to, *dry_run)
            }
        },
        Some(Commands::Normalize { dry_run }) => cmd_normalize(&container, &file, *dry_run),
        Some(Commands::Check) => cmd_check(&container, &file),
        Some(Commands::Config { command }) => cmd_config(&container, command, &project_dir),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(*shell, &mut cmd, "dashlayout", &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage("no command given, see --help".into())),
    }
}

/// `--file` wins over the configured layout file; relative paths resolve
/// against the project directory.
fn resolve_layout_file(file: Option<&Path>, settings: &Settings, project_dir: &Path) -> PathBuf {
    let file = file.unwrap_or(settings.layout_file.as_path());
    if file.is_absolute() {
        file.to_path_buf()
    } else {
        project_dir.join(file)
    }
}

#[instrument(skip(container))]
fn cmd_tree(container: &ServiceContainer, file: &Path, show_ends: bool) -> CliResult<()> {
    let tree = container.layout.tree(file)?;
    let rendered = render_tree(&tree, show_ends);
    writeln!(io::stdout().lock(), "{}", rendered).map_err(|e| InfraError::output("tree", e))?;
    Ok(())
}

#[instrument(skip(container))]
fn cmd_move(
    container: &ServiceContainer,
    file: &Path,
    source: isize,
    destination: isize,
    dry_run: bool,
) -> CliResult<()> {
    match container.layout.move_item(file, source, destination, dry_run)? {
        MoveOutcome::Unchanged => {
            output::warning(&format!("nothing to move: {} -> {}", source, destination));
        }
        MoveOutcome::Moved(items) => {
            if dry_run {
                output::header("Dry run, layout not written:");
            } else {
                output::success(&format!("Moved {} -> {}", source, destination));
            }
            output::items(&items);
        }
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_metric_list(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    let dashboard = container.layout.load(file)?;
    output::metrics(&dashboard.metrics);
    Ok(())
}

#[instrument(skip(container))]
fn cmd_metric_move(
    container: &ServiceContainer,
    file: &Path,
    from: isize,
    to: isize,
    dry_run: bool,
) -> CliResult<()> {
    let metrics = container.layout.move_metric(file, from, to, dry_run)?;
    output::metrics(&metrics);
    Ok(())
}

#[instrument(skip(container))]
fn cmd_normalize(container: &ServiceContainer, file: &Path, dry_run: bool) -> CliResult<()> {
    let items = container.layout.normalize(file, dry_run)?;
    if !dry_run {
        output::success(&format!("Normalized {}", file.display()));
    }
    output::items(&items);
    Ok(())
}

#[instrument(skip(container))]
fn cmd_check(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    container.layout.check(file)?;
    output::success(&format!("{} is consistent", file.display()));
    Ok(())
}

fn cmd_config(
    container: &ServiceContainer,
    command: &ConfigCommands,
    project_dir: &Path,
) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&container.settings.to_toml()?),
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::detail(&format!("global: {}", path.display())),
                None => output::detail("global: <unavailable>"),
            }
            output::detail(&format!(
                "local:  {}",
                local_config_path(project_dir).display()
            ));
        }
        ConfigCommands::Template => output::info(&Settings::template()),
    }
    Ok(())
}

/// Render the addressable tree, one line per slot.
pub fn render_tree(tree: &Tree, show_ends: bool) -> termtree::Tree<String> {
    let mut root = termtree::Tree::new(format!("dashboard ({} slots)", tree.len()));
    for node in tree.top_level().iter().filter_map(|&idx| tree.get_node(idx)) {
        let mut branch = termtree::Tree::new(node.to_string());
        for child in tree.children_of(node) {
            if child.is_section_end() && !show_ends {
                continue;
            }
            branch.push(termtree::Tree::new(child.to_string()));
        }
        root.push(branch);
    }
    root
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{build_tree, Item, ItemKind};

    #[test]
    fn given_relative_file_when_resolving_then_joins_project_dir() {
        let settings = Settings::default();
        let resolved = resolve_layout_file(None, &settings, Path::new("/work"));
        assert_eq!(resolved, PathBuf::from("/work/dashboard.json"));

        let explicit = resolve_layout_file(Some(Path::new("/abs/x.json")), &settings, Path::new("/work"));
        assert_eq!(explicit, PathBuf::from("/abs/x.json"));
    }

    #[test]
    fn given_section_when_rendering_then_end_slot_is_optional() {
        let items = vec![
            Item::section("s"),
            Item::new("a", ItemKind::Chart).in_section("s"),
        ];
        let tree = build_tree(&items);

        let hidden = render_tree(&tree, false).to_string();
        assert!(hidden.contains("[1] 1.1 a"));
        assert!(!hidden.contains("end of section"));

        let shown = render_tree(&tree, true).to_string();
        assert!(shown.contains("[2] end of section"));
    }
}
