//! Command dispatch: each subcommand maps onto a service call.

use std::io::{self, BufRead};
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::services::ForestService;
use crate::application::{render_svg, ApplicationError, ApplicationResult, IoResultExt, Outcome};
use crate::cli::args::{Cli, Commands, ConfigCommands, FormatArg};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::END_OF_CHILDREN;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;
use crate::tree_traits::TreeNodeConvert;

/// Runs `cli` with interactive input read from stdin.
pub fn execute_command(cli: &Cli, container: &mut ServiceContainer) -> CliResult<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    execute_with_input(cli, container, &mut input)
}

/// Runs `cli`, reading interactive answers from `input`.
pub fn execute_with_input(cli: &Cli, container: &mut ServiceContainer, input: &mut dyn BufRead) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage("no command given, see --help".to_string()));
    };

    match command {
        Commands::Build { name, root, fanout } => build(container, input, name, root, usize::from(*fanout)),
        Commands::List => list(container),
        Commands::Show { name } => show(container, name),
        Commands::Insert {
            name,
            parent,
            value,
            max,
        } => {
            let max = max.unwrap_or(container.settings.default_max_children);
            let mut forest = container.forest()?;
            let result = forest.insert(name, parent, value, max);
            conclude(result, |address| format!("inserted '{value}' under '{parent}' at {address}"))
                .map(|_| ())
        }
        Commands::Delete { name, value, promote } => {
            let mut forest = container.forest()?;
            let result = forest.delete(name, value, *promote);
            let summary = conclude(result, |s| {
                if *promote {
                    format!("deleted '{value}', children promoted")
                } else {
                    format!("deleted {} node(s): {}", s.removed.len(), s.removed.iter().join(", "))
                }
            })?;
            if summary.tree_dropped {
                output::detail(&format!("tree '{name}' is now empty and was removed"));
            }
            Ok(())
        }
        Commands::Rename { name, old, new } => {
            let mut forest = container.forest()?;
            conclude(forest.rename(name, old, new), |_| format!("renamed '{old}' to '{new}'"))
        }
        Commands::Search { name, value } => {
            let address = container.forest()?.search(name, value)?;
            output::info(&address);
            Ok(())
        }
        Commands::Resolve { name, address } => {
            let value = container.forest()?.resolve(name, address)?;
            output::info(&value);
            Ok(())
        }
        Commands::Path { name, from, to } => {
            let path = container.forest()?.path(name, from, to)?;
            output::info(&path.iter().join(" -> "));
            Ok(())
        }
        Commands::Traverse { name, order } => {
            let values = container.forest()?.traverse(name, (*order).into())?;
            output::info(&values.iter().join(" "));
            Ok(())
        }
        Commands::Height { name } => {
            let height = container.forest()?.height(name)?;
            output::info(&height);
            Ok(())
        }
        Commands::Layout { name, format, output } => layout(container, name, *format, output.as_deref()),
        Commands::Remove { name } => {
            let mut forest = container.forest()?;
            conclude(forest.remove(name), |_| format!("removed tree '{name}'")).map(|_| ())
        }
        Commands::Config { command } => config(container, command),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let bin = cmd.get_name().to_string();
            generate(*shell, &mut cmd, bin, &mut io::stdout());
            Ok(())
        }
    }
}

/// Reports a mutation as an `Outcome`; failures propagate for the exit code.
fn conclude<T>(result: ApplicationResult<T>, describe: impl FnOnce(&T) -> String) -> CliResult<T> {
    let outcome = Outcome::from_result(&result, describe);
    debug!("{}", outcome);
    if outcome.ok {
        output::success(&outcome.message);
    }
    Ok(result?)
}

#[instrument(skip(container, input))]
fn build(
    container: &mut ServiceContainer,
    input: &mut dyn BufRead,
    name: &str,
    root: &str,
    fanout: usize,
) -> CliResult<()> {
    // Open first so a corrupt store fails before any prompting
    let mut forest = container.forest()?;
    if forest.registry().contains(name) {
        output::warning(&format!("tree '{name}' exists and will be replaced"));
    }

    let token = container.sessions.start(name, fanout, root)?;
    output::header(&format!(
        "Building '{name}': up to {fanout} children per node, blank line or {END_OF_CHILDREN} to stop"
    ));

    while let Some(pending) = container.sessions.get(token)?.pending().map(str::to_string) {
        let mut values = Vec::new();
        for i in 0..fanout {
            output::prompt(&format!("child {} of {}:", i + 1, pending));
            let mut line = String::new();
            let read = input
                .read_line(&mut line)
                .map_err(|e| CliError::from(InfraError::io("read child value", e)))?;
            let value = line.trim();
            if read == 0 {
                println!();
                break;
            }
            if value.is_empty() || value.eq_ignore_ascii_case(END_OF_CHILDREN) {
                break;
            }
            values.push(value.to_string());
        }

        let report = container.sessions.add_children(token, &values)?;
        for rejected in &report.rejected {
            output::warning(&format!("value '{rejected}' already exists, skipped"));
        }
    }

    let (name, tree) = container.sessions.finish(token)?;
    let count = tree.len();
    forest.commit(&name, tree)?;
    output::success(&format!("saved tree '{name}' with {count} node(s)"));
    Ok(())
}

fn list(container: &ServiceContainer) -> CliResult<()> {
    let forest = container.forest()?;
    let registry = forest.registry();
    if registry.is_empty() {
        output::info(&"No trees stored.");
        return Ok(());
    }
    for (name, tree) in registry.iter() {
        output::info(&format!("{name}\t{} node(s), height {}", tree.len(), tree.height()));
    }
    Ok(())
}

fn show(container: &ServiceContainer, name: &str) -> CliResult<()> {
    let forest = container.forest()?;
    let tree = forest.tree(name)?;
    output::info(&tree.to_tree_string());
    Ok(())
}

fn layout(container: &ServiceContainer, name: &str, format: FormatArg, target: Option<&Path>) -> CliResult<()> {
    let forest: ForestService = container.forest()?;
    let layout = forest.layout(name, &container.settings.layout)?;
    let rendered = match format {
        FormatArg::Svg => render_svg(&layout),
        FormatArg::Json => {
            serde_json::to_string_pretty(&layout).map_err(|e| ApplicationError::OperationFailed {
                context: "serialize layout".to_string(),
                source: Box::new(e),
            })?
        }
    };

    match target {
        Some(path) => {
            container
                .fs
                .write(path, &rendered)
                .with_path_context("write layout", path)?;
            output::success(&format!("wrote {}", path.display()));
        }
        None => output::info(&rendered),
    }
    Ok(())
}

fn config(container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&container.settings.to_toml()?),
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => {
            let global = global_config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(unavailable)".to_string());
            output::info(&format!("config: {global}"));
            output::info(&format!("store:  {}", container.settings.store_path.display()));
        }
    }
    Ok(())
}
